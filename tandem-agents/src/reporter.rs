//! Report Generator agent: second stage of the pipeline.
//!
//! Two generation calls per report: a clarification pass over the analysis,
//! then a final report with the clarification replayed as assistant-authored
//! context. Forcing the model to see its own intermediate output improves
//! grounding of the final numeric claims.

use std::sync::Arc;
use tandem_core::{
    AgentConfig, AnalysisResult, ConversationEntry, MessageLedger, ReportResult, TandemResult,
};
use tandem_llm::{ChatTurn, CompletionProvider, CompletionRequest};

/// Identity the reporter addresses its clarification to.
const SPECIALIST_IDENTITY: &str = "Data Specialist";

/// Turns an analysis into a clarification exchange and a final report.
pub struct ReportGenerator {
    provider: Arc<dyn CompletionProvider>,
    ledger: Arc<MessageLedger>,
    config: AgentConfig,
}

impl ReportGenerator {
    /// Bind a reporter to a provider, a ledger, and its immutable config.
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

    fn request(&self, turns: Vec<ChatTurn>) -> CompletionRequest {
        CompletionRequest {
            system: self.config.system_prompt.clone(),
            turns,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    /// Run the report stage.
    ///
    /// A failed or contentless analysis is not an error here: the stage
    /// proceeds with empty content. Capability failures of either call are
    /// converted into a failure-tagged result with no partial conversation.
    /// The clarification already written to the ledger stays recorded even
    /// when the second call fails.
    pub async fn report(&self, analysis: &AnalysisResult) -> ReportResult {
        let initial_analysis = analysis.content().unwrap_or_default().to_string();

        match self.generate(&initial_analysis).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(agent = %self.config.name, error = ?e, "report call failed");
                ReportResult::failed(e.to_string())
            }
        }
    }

    async fn generate(&self, initial_analysis: &str) -> TandemResult<ReportResult> {
        // Clarification pass
        let clarification = self
            .provider
            .complete(self.request(vec![ChatTurn::user(format!(
                "Based on this analysis, what clarifications are needed?\n\n{}",
                initial_analysis
            ))]))
            .await?;

        self.ledger
            .record(&self.config.name, SPECIALIST_IDENTITY, &clarification)?;

        // Final report, with the clarification replayed verbatim as
        // assistant-authored context.
        let final_report = self
            .provider
            .complete(self.request(vec![
                ChatTurn::user(initial_analysis),
                ChatTurn::assistant(&clarification),
                ChatTurn::user("Generate a final report summarizing all findings"),
            ]))
            .await?;

        Ok(ReportResult::completed(
            vec![
                ConversationEntry::now(SPECIALIST_IDENTITY, initial_analysis),
                ConversationEntry::now(&self.config.name, &clarification),
                ConversationEntry::now(&self.config.name, &final_report),
            ],
            final_report,
        ))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_core::{AgentConfigs, AnalysisMetadata};
    use tandem_llm::{ScriptedCompletionProvider, TurnRole};

    fn reporter(
        provider: Arc<ScriptedCompletionProvider>,
        ledger: Arc<MessageLedger>,
    ) -> ReportGenerator {
        let configs = AgentConfigs::default();
        ReportGenerator::new(provider, ledger, configs.report_generator)
    }

    fn completed_analysis(content: &str) -> AnalysisResult {
        AnalysisResult::completed(
            "Data Specialist",
            content,
            AnalysisMetadata {
                description: String::new(),
                tools_used: Vec::new(),
            },
        )
    }

    #[tokio::test]
    async fn test_report_success_orders_conversation() {
        let provider = Arc::new(ScriptedCompletionProvider::new());
        provider.push_ok("which region?");
        provider.push_ok("final report text");
        let ledger = Arc::new(MessageLedger::new());
        let agent = reporter(Arc::clone(&provider), Arc::clone(&ledger));

        let result = agent.report(&completed_analysis("the analysis")).await;

        match result {
            ReportResult::Completed(report) => {
                assert_eq!(report.final_report, "final report text");
                let roles: Vec<&str> = report
                    .conversation
                    .iter()
                    .map(|e| e.role.as_str())
                    .collect();
                assert_eq!(
                    roles,
                    vec!["Data Specialist", "Report Generator", "Report Generator"]
                );
                assert_eq!(report.conversation[0].content, "the analysis");
                assert_eq!(report.conversation[1].content, "which region?");
                assert_eq!(report.conversation[2].content, "final report text");
            }
            ReportResult::Failed(_) => panic!("expected success"),
        }

        // Clarification recorded from reporter to specialist
        let recorded = ledger
            .query(Some("Report Generator"), Some("Data Specialist"))
            .unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].content, "which region?");
    }

    #[tokio::test]
    async fn test_final_call_replays_clarification_as_assistant() {
        let provider = Arc::new(ScriptedCompletionProvider::new());
        provider.push_ok("the clarification");
        provider.push_ok("the report");
        let ledger = Arc::new(MessageLedger::new());
        let agent = reporter(Arc::clone(&provider), ledger);

        agent.report(&completed_analysis("the analysis")).await;

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);

        let final_turns = &requests[1].turns;
        assert_eq!(final_turns.len(), 3);
        assert_eq!(final_turns[0].role, TurnRole::User);
        assert_eq!(final_turns[0].content, "the analysis");
        assert_eq!(final_turns[1].role, TurnRole::Assistant);
        assert_eq!(final_turns[1].content, "the clarification");
        assert_eq!(final_turns[2].role, TurnRole::User);
        assert_eq!(
            final_turns[2].content,
            "Generate a final report summarizing all findings"
        );
    }

    #[tokio::test]
    async fn test_failed_analysis_uses_empty_content() {
        let provider = Arc::new(ScriptedCompletionProvider::new());
        provider.push_ok("clarification");
        provider.push_ok("report");
        let ledger = Arc::new(MessageLedger::new());
        let agent = reporter(Arc::clone(&provider), ledger);

        let failed = AnalysisResult::failed("upstream down");
        let result = agent.report(&failed).await;

        assert!(!result.is_failure());
        let first_prompt = &provider.requests()[0].turns[0].content;
        assert!(first_prompt.ends_with("clarifications are needed?\n\n"));
    }

    #[tokio::test]
    async fn test_first_call_failure_yields_no_conversation() {
        let provider = Arc::new(ScriptedCompletionProvider::failing("down"));
        let ledger = Arc::new(MessageLedger::new());
        let agent = reporter(Arc::clone(&provider), Arc::clone(&ledger));

        let result = agent.report(&completed_analysis("analysis")).await;

        assert!(result.is_failure());
        assert!(result.conversation().is_empty());
        assert_eq!(provider.calls(), 1);
        assert!(ledger.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_second_call_failure_keeps_ledger_clarification() {
        let provider = Arc::new(ScriptedCompletionProvider::failing("down"));
        provider.push_ok("the clarification");
        let ledger = Arc::new(MessageLedger::new());
        let agent = reporter(Arc::clone(&provider), Arc::clone(&ledger));

        let result = agent.report(&completed_analysis("analysis")).await;

        assert!(result.is_failure());
        assert!(result.conversation().is_empty());
        assert_eq!(provider.calls(), 2);

        // Partial progress stays in the ledger even though the stage failed.
        let recorded = ledger.query(Some("Report Generator"), None).unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].content, "the clarification");
    }
}
