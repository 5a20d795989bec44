//! Conversation view endpoint.
//!
//! Read-only data for human-facing rendering: the current conversation
//! history and its stats. Rendering itself is a frontend concern; this
//! endpoint only exposes the data the original server passed into its
//! HTML template.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::{AppState, ConversationMessage, ConversationStats};

/// Response body for GET /conversation.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ConversationResponse {
    /// Conversation history in insertion order
    pub conversation: Vec<ConversationMessage>,
    /// Stats snapshot
    pub stats: ConversationStats,
}

/// GET /conversation - Current conversation history and stats
#[utoipa::path(
    get,
    path = "/conversation",
    tag = "Conversation",
    responses(
        (status = 200, description = "Current conversation", body = ConversationResponse),
    ),
)]
pub async fn conversation(State(state): State<Arc<AppState>>) -> Json<ConversationResponse> {
    let log = state.log.read().await;

    Json(ConversationResponse {
        conversation: log.history().to_vec(),
        stats: log.stats(),
    })
}

// =============================================================================
// TESTS
// =============================================================================
