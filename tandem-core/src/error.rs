//! Error types for TANDEM operations

use thiserror::Error;

/// Message ledger errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Ledger lock poisoned")]
    LockPoisoned,
}

/// LLM provider errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("Missing API key for {provider}")]
    MissingApiKey { provider: String },

    #[error("Request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: i32,
        message: String,
    },

    #[error("Rate limited by {provider}")]
    RateLimited { provider: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Request to {provider} timed out after {elapsed_ms}ms")]
    Timeout { provider: String, elapsed_ms: u64 },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Agent stage errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("Analysis stage failed: {reason}")]
    AnalysisFailed { reason: String },

    #[error("Report stage failed: {reason}")]
    ReportFailed { reason: String },
}

/// Master error type for all TANDEM errors.
#[derive(Debug, Clone, Error)]
pub enum TandemError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),
}

/// Result type alias for TANDEM operations.
pub type TandemResult<T> = Result<T, TandemError>;

// =============================================================================
// TESTS
// =============================================================================
