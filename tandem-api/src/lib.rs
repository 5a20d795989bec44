//! TANDEM API - HTTP Layer
//!
//! Exposes the two-stage agent pipeline over three REST endpoints:
//! `POST /analyze` (bounded-retry request handler), `GET /health`
//! (process metrics), and `GET /conversation` (read-only history view).

pub mod config;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use state::{AppState, ConversationLog, ConversationMessage, ConversationStats};
