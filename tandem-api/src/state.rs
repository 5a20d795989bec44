//! Shared application state: the pipeline, the message ledger, and the
//! conversation log with its stats.
//!
//! The original kept one process-wide mutable conversation object with no
//! synchronization, so two simultaneous requests corrupted each other's
//! history. Here the log lives behind an async `RwLock` for consistent
//! reads, and the analyze endpoint additionally serializes requests
//! through a gate mutex so only one pipeline run mutates the log at a
//! time.

use crate::config::ApiConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tandem_agents::Pipeline;
use tandem_core::{MessageLedger, Timestamp};
use tokio::sync::{Mutex, RwLock};

// ============================================================================
// CONVERSATION LOG
// ============================================================================

/// A role-tagged message in the request-level conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ConversationMessage {
    /// Who authored the message (`user` or an agent identity)
    pub role: String,
    /// Message text
    pub content: String,
    /// When the message was appended
    #[schema(value_type = String, format = "date-time")]
    pub timestamp: Timestamp,
}

/// Stats snapshot over the current conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ConversationStats {
    /// Seconds since the conversation started
    pub duration: f64,
    /// Messages in the history
    pub message_count: usize,
    /// Errors per message; 0 when the history is empty
    pub error_rate: f64,
}

/// Conversation history and error counter, reset at the start of each
/// incoming request.
#[derive(Debug, Default)]
pub struct ConversationLog {
    history: Vec<ConversationMessage>,
    error_count: u32,
    started_at: Option<Instant>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset history and error counter and stamp the start time. Called
    /// exactly once per incoming request, never per retry attempt.
    pub fn start(&mut self) {
        self.history.clear();
        self.error_count = 0;
        self.started_at = Some(Instant::now());
    }

    /// Append a message.
    pub fn push(&mut self, role: impl Into<String>, content: impl Into<String>) {
        self.history.push(ConversationMessage {
            role: role.into(),
            content: content.into(),
            timestamp: chrono::Utc::now(),
        });
    }

    /// Count a failed pipeline attempt.
    pub fn record_error(&mut self) {
        self.error_count += 1;
    }

    /// Current history, in insertion order.
    pub fn history(&self) -> &[ConversationMessage] {
        &self.history
    }

    /// Number of messages in the history.
    pub fn message_count(&self) -> usize {
        self.history.len()
    }

    /// Errors recorded since the last start.
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// Errors per message; 0 when the history is empty.
    pub fn error_rate(&self) -> f64 {
        if self.history.is_empty() {
            0.0
        } else {
            f64::from(self.error_count) / self.history.len() as f64
        }
    }

    /// Stats snapshot; zeroed before the first request.
    pub fn stats(&self) -> ConversationStats {
        ConversationStats {
            duration: self
                .started_at
                .map(|t| t.elapsed().as_secs_f64())
                .unwrap_or(0.0),
            message_count: self.message_count(),
            error_rate: self.error_rate(),
        }
    }
}

// ============================================================================
// APP STATE
// ============================================================================

/// Shared state for all routes.
pub struct AppState {
    /// The two-stage agent pipeline
    pub pipeline: Pipeline,
    /// Ledger shared by the agents
    pub ledger: Arc<MessageLedger>,
    /// Conversation log; short write locks only
    pub log: RwLock<ConversationLog>,
    /// Serializes analyze requests end to end
    pub request_gate: Mutex<()>,
    /// API configuration
    pub config: ApiConfig,
    /// Process start, for uptime reporting
    pub started: Instant,
}

impl AppState {
    pub fn new(pipeline: Pipeline, ledger: Arc<MessageLedger>, config: ApiConfig) -> Self {
        Self {
            pipeline,
            ledger,
            log: RwLock::new(ConversationLog::new()),
            request_gate: Mutex::new(()),
            config,
            started: Instant::now(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
