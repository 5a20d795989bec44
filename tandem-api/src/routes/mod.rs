//! REST API Routes Module
//!
//! Three endpoints: the analyze pipeline, the health check, and the
//! read-only conversation view, plus the OpenAPI document.

pub mod analyze;
pub mod conversation;
pub mod health;

use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Handler for /openapi.json endpoint.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Create the API router with CORS and trace layers.
pub fn create_api_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/analyze", post(analyze::analyze))
        .route("/health", get(health::health))
        .route("/conversation", get(conversation::conversation))
        .route("/openapi.json", get(openapi_json))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
