//! Error Types for the TANDEM API
//!
//! Errors serialize to the JSON envelope clients expect: an `error` message
//! plus, when a pipeline ran, a `metadata` block carrying the timestamp,
//! status tag, and retry count. Stack traces stay in the logs; responses
//! carry only the short message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request contains invalid input data (no retry)
    InvalidInput,

    /// The pipeline failed on every retry attempt
    PipelineFailed,

    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorCode::PipelineFailed | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error for API operations.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Failed pipeline attempts, when a pipeline ran before the error
    pub retry_count: Option<u32>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            retry_count: None,
        }
    }

    /// Create an InvalidInput error (rejected immediately, never retried).
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create a PipelineFailed error after exhausting retries.
    pub fn pipeline_failed(message: impl Into<String>, retry_count: u32) -> Self {
        let mut error = Self::new(ErrorCode::PipelineFailed, message);
        error.retry_count = Some(retry_count);
        error
    }

    /// Create an InternalError.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

// ============================================================================
// WIRE ENVELOPE
// ============================================================================

/// Metadata block attached to error responses that ran the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorMetadata {
    /// When the error response was produced
    #[schema(value_type = String, format = "date-time")]
    pub timestamp: tandem_core::Timestamp,
    /// Always `"error"`
    pub status: String,
    /// Failed pipeline attempts
    pub retry_count: u32,
}

/// JSON body for error responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorEnvelope {
    /// Short error message
    pub error: String,
    /// Present when a pipeline ran before the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ErrorMetadata>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope = ErrorEnvelope {
            error: self.message.clone(),
            metadata: self.retry_count.map(|retry_count| ErrorMetadata {
                timestamp: Utc::now(),
                status: "error".to_string(),
                retry_count,
            }),
        };
        (self.status_code(), Json(envelope)).into_response()
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// TESTS
// =============================================================================
