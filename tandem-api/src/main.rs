//! TANDEM API Server Entry Point
//!
//! Bootstraps configuration, builds the Anthropic provider and the two
//! agents sharing one message ledger, and starts the Axum HTTP server.

use std::sync::Arc;

use axum::Router;
use tandem_agents::{DataSpecialist, Pipeline, ReportGenerator};
use tandem_api::{create_api_router, ApiConfig, ApiError, ApiResult, AppState};
use tandem_core::{AgentConfigs, MessageLedger};
use tandem_llm::{AnthropicCompletionProvider, CompletionProvider};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ApiConfig::from_env();

    let agent_configs = AgentConfigs::from_env()
        .map_err(|e| ApiError::internal_error(format!("Invalid agent config: {}", e)))?;

    let provider: Arc<dyn CompletionProvider> = Arc::new(
        AnthropicCompletionProvider::from_env()
            .map_err(|e| ApiError::internal_error(format!("Provider setup failed: {}", e)))?,
    );
    tracing::info!(model = provider.model_id(), "completion provider ready");

    let ledger = Arc::new(MessageLedger::new());
    let specialist = DataSpecialist::new(
        Arc::clone(&provider),
        Arc::clone(&ledger),
        agent_configs.data_specialist,
    );
    let reporter = ReportGenerator::new(
        provider,
        Arc::clone(&ledger),
        agent_configs.report_generator,
    );

    let state = Arc::new(AppState::new(
        Pipeline::new(specialist, reporter),
        ledger,
        config.clone(),
    ));
    let app: Router = create_api_router(state);

    let addr = config.bind_addr();
    tracing::info!(%addr, "Starting TANDEM API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
