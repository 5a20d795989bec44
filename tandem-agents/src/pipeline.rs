//! Pipeline coordinator: sequences the two agent stages.

use crate::{DataSpecialist, ReportGenerator};
use tandem_core::{AnalysisResult, ConversationEntry, ReportResult};

/// Combined output of both pipeline stages.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Analysis stage result
    pub analysis: AnalysisResult,
    /// Report stage result; `None` when the analysis failed and the
    /// reporter was never invoked
    pub report: Option<ReportResult>,
}

impl PipelineOutcome {
    /// True iff both stages completed.
    pub fn is_success(&self) -> bool {
        !self.analysis.is_failure()
            && self.report.as_ref().is_some_and(|r| !r.is_failure())
    }

    /// First stage error, if any.
    pub fn error(&self) -> Option<&str> {
        self.analysis
            .error()
            .or_else(|| self.report.as_ref().and_then(|r| r.error()))
    }

    /// The aggregated conversation, empty unless both stages succeeded.
    pub fn conversation(&self) -> &[ConversationEntry] {
        self.report.as_ref().map(|r| r.conversation()).unwrap_or(&[])
    }
}

/// Runs Data Specialist then Report Generator, short-circuiting on a
/// failed analysis.
pub struct Pipeline {
    specialist: DataSpecialist,
    reporter: ReportGenerator,
}

impl Pipeline {
    pub fn new(specialist: DataSpecialist, reporter: ReportGenerator) -> Self {
        Self {
            specialist,
            reporter,
        }
    }

    /// Run both stages in order. The reporter is never invoked on a failed
    /// analysis.
    pub async fn run(&self, raw_input: &str) -> PipelineOutcome {
        let analysis = self.specialist.analyze(raw_input).await;

        if analysis.is_failure() {
            tracing::warn!(error = ?analysis.error(), "analysis failed, skipping report stage");
            return PipelineOutcome {
                analysis,
                report: None,
            };
        }

        let report = self.reporter.report(&analysis).await;
        PipelineOutcome {
            analysis,
            report: Some(report),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tandem_core::{AgentConfigs, MessageLedger};
    use tandem_llm::{CompletionProvider, ScriptedCompletionProvider};

    fn pipeline(provider: Arc<ScriptedCompletionProvider>) -> (Pipeline, Arc<MessageLedger>) {
        let provider: Arc<dyn CompletionProvider> = provider;
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
        (Pipeline::new(specialist, reporter), ledger)
    }

    #[tokio::test]
    async fn test_run_success_combines_both_stages() {
        let provider = Arc::new(ScriptedCompletionProvider::new());
        provider.push_ok("the analysis");
        provider.push_ok("the clarification");
        provider.push_ok("the report");
        let (pipeline, ledger) = pipeline(Arc::clone(&provider));

        let outcome = pipeline.run(r#"{"sales": [1, 2, 3]}"#).await;

        assert!(outcome.is_success());
        assert!(outcome.error().is_none());
        assert_eq!(outcome.conversation().len(), 3);
        assert_eq!(provider.calls(), 3);
        // Analysis plus clarification recorded
        assert_eq!(ledger.len().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_failed_analysis_short_circuits() {
        let provider = Arc::new(ScriptedCompletionProvider::failing("upstream down"));
        let (pipeline, _ledger) = pipeline(Arc::clone(&provider));

        let outcome = pipeline.run("{}").await;

        assert!(!outcome.is_success());
        assert!(outcome.report.is_none());
        assert!(outcome.error().unwrap().contains("upstream down"));
        // Reporter never invoked
        assert_eq!(provider.calls(), 1);
        assert!(outcome.conversation().is_empty());
    }

    #[tokio::test]
    async fn test_failed_report_surfaces_error() {
        let provider = Arc::new(ScriptedCompletionProvider::failing("report stage down"));
        provider.push_ok("the analysis");
        let (pipeline, _ledger) = pipeline(provider);

        let outcome = pipeline.run("{}").await;

        assert!(!outcome.is_success());
        assert!(outcome.error().unwrap().contains("report stage down"));
        assert!(outcome.report.is_some());
    }
}
