//! Health check endpoint with process metrics.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tandem_core::Timestamp;

use crate::state::AppState;

// ============================================================================
// TYPES
// ============================================================================

/// Process metrics reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthMetrics {
    /// Messages in the current conversation history
    pub conversation_count: usize,
    /// Errors per message in the current conversation
    pub error_rate: f64,
    /// Seconds since process start
    pub uptime: f64,
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` when the process responds
    pub status: String,
    /// When the check ran
    #[schema(value_type = String, format = "date-time")]
    pub timestamp: Timestamp,
    /// Crate version
    pub version: String,
    /// Process metrics
    pub metrics: HealthMetrics,
}

// ============================================================================
// HANDLER
// ============================================================================

/// GET /health - Health check with detailed metrics
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Process is healthy", body = HealthResponse),
    ),
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let log = state.log.read().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        metrics: HealthMetrics {
            conversation_count: log.message_count(),
            error_rate: log.error_rate(),
            uptime: state.started.elapsed().as_secs_f64(),
        },
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use tandem_agents::{DataSpecialist, Pipeline, ReportGenerator};
    use tandem_core::{AgentConfigs, MessageLedger};
    use tandem_llm::{CompletionProvider, ScriptedCompletionProvider};

    fn test_state() -> Arc<AppState> {
        let provider: Arc<dyn CompletionProvider> = Arc::new(ScriptedCompletionProvider::new());
        let ledger = Arc::new(MessageLedger::new());
        let configs = AgentConfigs::default();
        let specialist = DataSpecialist::new(
            Arc::clone(&provider),
            Arc::clone(&ledger),
            configs.data_specialist,
        );
        let reporter = ReportGenerator::new(
            provider,
            Arc::clone(&ledger),
            configs.report_generator,
        );
        Arc::new(AppState::new(
            Pipeline::new(specialist, reporter),
            ledger,
            ApiConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_health_reports_zeroed_metrics_before_first_request() {
        let state = test_state();

        let Json(response) = health(State(state)).await;

        assert_eq!(response.status, "healthy");
        assert_eq!(response.metrics.conversation_count, 0);
        assert_eq!(response.metrics.error_rate, 0.0);
        assert!(response.metrics.uptime >= 0.0);
    }

    #[tokio::test]
    async fn test_health_reflects_conversation_log() {
        let state = test_state();
        {
            let mut log = state.log.write().await;
            log.start();
            log.push("user", "input");
            log.push("Data Specialist", "analysis");
            log.record_error();
        }

        let Json(response) = health(State(state)).await;

        assert_eq!(response.metrics.conversation_count, 2);
        assert_eq!(response.metrics.error_rate, 0.5);
    }
}
