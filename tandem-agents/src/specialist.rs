//! Data Specialist agent: first stage of the pipeline.

use std::sync::Arc;
use tandem_core::{AgentConfig, AnalysisMetadata, AnalysisResult, MessageLedger};
use tandem_llm::{ChatTurn, CompletionProvider, CompletionRequest};

/// Identity the specialist addresses its analysis to.
const REPORTER_IDENTITY: &str = "Report Generator";

/// Analyzes raw input data through a single generation call and records the
/// analysis in the message ledger.
pub struct DataSpecialist {
    provider: Arc<dyn CompletionProvider>,
    ledger: Arc<MessageLedger>,
    config: AgentConfig,
}

impl DataSpecialist {
    /// Bind a specialist to a provider, a ledger, and its immutable config.
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        ledger: Arc<MessageLedger>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            ledger,
            config,
        }
    }

    /// Parse the raw input as JSON, degrading gracefully: malformed input
    /// is wrapped as `{"raw_input": ...}` rather than rejected.
    fn parse_payload(raw_input: &str) -> serde_json::Value {
        let stripped = raw_input.replace("data = ", "");
        serde_json::from_str(&stripped)
            .unwrap_or_else(|_| serde_json::json!({ "raw_input": stripped }))
    }

    /// Run the analysis stage.
    ///
    /// Capability failures are caught here and converted into a
    /// failure-tagged result; retrying is the request handler's job.
    pub async fn analyze(&self, raw_input: &str) -> AnalysisResult {
        let payload = Self::parse_payload(raw_input);
        let payload_text =
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());

        let request = CompletionRequest {
            system: self.config.system_prompt.clone(),
            turns: vec![ChatTurn::user(format!(
                "Analyze this data and identify key patterns and anomalies:\n{}",
                payload_text
            ))],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let analysis = match self.provider.complete(request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(agent = %self.config.name, error = ?e, "analysis call failed");
                return AnalysisResult::failed(e.to_string());
            }
        };

        if let Err(e) = self
            .ledger
            .record(&self.config.name, REPORTER_IDENTITY, &analysis)
        {
            tracing::error!(agent = %self.config.name, error = ?e, "ledger append failed");
            return AnalysisResult::failed(e.to_string());
        }

        AnalysisResult::completed(
            &self.config.name,
            analysis,
            AnalysisMetadata {
                description: self.config.description.clone(),
                tools_used: self.config.tool_names(),
            },
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
