//! TANDEM Core - Entity Types
//!
//! Shared data types for the two-stage analysis pipeline: identity types,
//! the append-only message ledger, agent configuration, stage result sum
//! types, and the error taxonomy. No I/O lives here.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod config;
pub mod error;
pub mod message;
pub mod result;

pub use config::{
    AgentConfig, AgentConfigs, ToolSpec, DATA_SPECIALIST_PROMPT, REPORT_GENERATOR_PROMPT,
};
pub use error::{AgentError, ConfigError, LedgerError, LlmError, TandemError, TandemResult};
pub use message::{Message, MessageLedger};
pub use result::{
    Analysis, AnalysisMetadata, AnalysisResult, ConversationEntry, FailureMetadata, Report,
    ReportFailure, ReportResult, StageFailure,
};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Entity identifier using UUIDv7 for timestamp-sortable IDs.
pub type EntityId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 EntityId (timestamp-sortable).
pub fn new_entity_id() -> EntityId {
    Uuid::now_v7()
}
