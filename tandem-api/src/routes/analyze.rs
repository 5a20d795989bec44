//! Analyze endpoint: the bounded-retry request handler.
//!
//! Runs the two-stage pipeline up to a fixed number of attempts, with a
//! linearly growing delay between attempts. Invalid input is rejected
//! immediately and never retried; transient stage failures are retried;
//! exhausted retries surface as a terminal error response.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tandem_agents::PipelineOutcome;
use tandem_core::{AnalysisResult, ReportResult, Timestamp};

use crate::error::{ApiError, ApiResult, ErrorEnvelope};
use crate::state::{AppState, ConversationMessage, ConversationStats};

// ============================================================================
// WIRE TYPES
// ============================================================================

/// Request body for POST /analyze.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct AnalyzeRequest {
    /// Raw input data, JSON or free text
    #[serde(default)]
    pub input: String,
}

/// Metadata block on success responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ResponseMetadata {
    /// When the response was produced
    #[schema(value_type = String, format = "date-time")]
    pub timestamp: Timestamp,
    /// Always `"success"`
    pub status: String,
    /// Failed pipeline attempts before the success
    pub retry_count: u32,
}

/// Success envelope for POST /analyze.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AnalyzeResponse {
    /// Analysis stage result
    pub analysis: AnalysisResult,
    /// Report stage result
    pub report: ReportResult,
    /// Full conversation history for this request
    pub conversation: Vec<ConversationMessage>,
    /// Stats snapshot for this request
    pub stats: ConversationStats,
    /// Timestamp, status tag, and retry count
    pub metadata: ResponseMetadata,
}

// ============================================================================
// HANDLER
// ============================================================================

/// POST /analyze - Run the two-stage pipeline with bounded retry
#[utoipa::path(
    post,
    path = "/analyze",
    tag = "Analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Pipeline completed", body = AnalyzeResponse),
        (status = 400, description = "Empty input", body = ErrorEnvelope),
        (status = 500, description = "Retries exhausted", body = ErrorEnvelope),
    ),
)]
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    if req.input.is_empty() {
        return Err(ApiError::invalid_input("No input provided"));
    }

    tracing::info!(input_len = req.input.len(), "processing analyze request");

    // One analyze request at a time; the log and ledger are reset exactly
    // once per request, not per retry attempt.
    let _gate = state.request_gate.lock().await;
    state.log.write().await.start();
    state
        .ledger
        .clear()
        .map_err(|e| ApiError::internal_error(e.to_string()))?;

    let max_retries = state.config.max_retries;
    let mut last_error = "pipeline failed".to_string();

    for attempt in 1..=max_retries {
        let outcome = state.pipeline.run(&req.input).await;

        match outcome {
            PipelineOutcome {
                analysis,
                report: Some(report),
            } if !analysis.is_failure() && !report.is_failure() => {
                let mut log = state.log.write().await;
                log.push("user", req.input.clone());
                for entry in report.conversation() {
                    log.push(entry.role.clone(), entry.content.clone());
                }

                let retry_count = attempt - 1;
                tracing::info!(retry_count, "analyze request succeeded");

                return Ok(Json(AnalyzeResponse {
                    analysis,
                    report,
                    conversation: log.history().to_vec(),
                    stats: log.stats(),
                    metadata: ResponseMetadata {
                        timestamp: Utc::now(),
                        status: "success".to_string(),
                        retry_count,
                    },
                }));
            }
            outcome => {
                last_error = outcome
                    .error()
                    .unwrap_or("pipeline failed")
                    .to_string();
                state.log.write().await.record_error();
                tracing::error!(attempt, error = %last_error, "pipeline attempt failed");

                if attempt < max_retries {
                    tokio::time::sleep(state.config.retry_delay_for(attempt)).await;
                }
            }
        }
    }

    Err(ApiError::pipeline_failed(last_error, max_retries))
}

// =============================================================================
// TESTS
// =============================================================================
