//! Stage result types for the two-agent pipeline.
//!
//! Each stage returns an explicit success/failure sum type instead of the
//! exception-driven dicts of the original implementation. The serialized
//! shapes match the original wire format: success and failure variants are
//! untagged and distinguished by their fields.

use crate::Timestamp;
use chrono::Utc;
use serde::{Deserialize, Serialize};

// ============================================================================
// ANALYSIS STAGE
// ============================================================================

/// Metadata attached to a successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AnalysisMetadata {
    /// The analyst agent's description
    pub description: String,
    /// Names of the tools the agent declares
    pub tools_used: Vec<String>,
}

/// A successful analysis produced by the Data Specialist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Analysis {
    /// Agent identity that produced the analysis
    pub role: String,
    /// The analysis text
    pub content: String,
    /// When the analysis completed
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub timestamp: Timestamp,
    /// Agent description and declared tools
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AnalysisMetadata>,
}

/// Failure metadata carried by a failed stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FailureMetadata {
    /// When the failure occurred
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub timestamp: Timestamp,
    /// Always `"failed"`
    pub status: String,
}

impl FailureMetadata {
    /// Failure metadata stamped with the current time.
    pub fn now() -> Self {
        Self {
            timestamp: Utc::now(),
            status: "failed".to_string(),
        }
    }
}

/// A failed stage: error description plus failure metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StageFailure {
    /// Short error description
    pub error: String,
    /// Timestamp and failed-status tag
    pub metadata: FailureMetadata,
}

/// Outcome of the analysis stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum AnalysisResult {
    Completed(Analysis),
    Failed(StageFailure),
}

impl AnalysisResult {
    /// Build a success-tagged result stamped with the current time.
    pub fn completed(
        role: impl Into<String>,
        content: impl Into<String>,
        metadata: AnalysisMetadata,
    ) -> Self {
        Self::Completed(Analysis {
            role: role.into(),
            content: content.into(),
            timestamp: Utc::now(),
            metadata: Some(metadata),
        })
    }

    /// Build a failure-tagged result stamped with the current time.
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed(StageFailure {
            error: error.into(),
            metadata: FailureMetadata::now(),
        })
    }

    /// Analysis text, or `None` for a failed result.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Completed(analysis) => Some(&analysis.content),
            Self::Failed(_) => None,
        }
    }

    /// Error text, or `None` for a successful result.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Completed(_) => None,
            Self::Failed(failure) => Some(&failure.error),
        }
    }

    /// Whether this result is failure-tagged.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

// ============================================================================
// REPORT STAGE
// ============================================================================

/// A role-tagged entry in the aggregated conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ConversationEntry {
    /// Agent identity the entry is attributed to
    pub role: String,
    /// Entry text
    pub content: String,
    /// When the entry was assembled
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub timestamp: Timestamp,
}

impl ConversationEntry {
    /// Build an entry stamped with the current time.
    pub fn now(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A successful report: ordered conversation plus the bare final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Report {
    /// Analysis, clarification, and final report in stage order
    pub conversation: Vec<ConversationEntry>,
    /// The final report text
    pub final_report: String,
}

/// A failed report stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReportFailure {
    /// Short error description
    pub error: String,
    /// When the failure occurred
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub timestamp: Timestamp,
}

/// Outcome of the report stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(untagged)]
pub enum ReportResult {
    Completed(Report),
    Failed(ReportFailure),
}

impl ReportResult {
    /// Build a success-tagged result.
    pub fn completed(conversation: Vec<ConversationEntry>, final_report: impl Into<String>) -> Self {
        Self::Completed(Report {
            conversation,
            final_report: final_report.into(),
        })
    }

    /// Build a failure-tagged result stamped with the current time.
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed(ReportFailure {
            error: error.into(),
            timestamp: Utc::now(),
        })
    }

    /// Conversation entries, empty for a failed result.
    pub fn conversation(&self) -> &[ConversationEntry] {
        match self {
            Self::Completed(report) => &report.conversation,
            Self::Failed(_) => &[],
        }
    }

    /// Error text, or `None` for a successful result.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Completed(_) => None,
            Self::Failed(failure) => Some(&failure.error),
        }
    }

    /// Whether this result is failure-tagged.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_success_serialization() {
        let result = AnalysisResult::completed(
            "Data Specialist",
            "sales average $120",
            AnalysisMetadata {
                description: "Analyzes patterns and correlations in data".to_string(),
                tools_used: vec!["analyze_correlation".to_string()],
            },
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["role"], "Data Specialist");
        assert_eq!(json["content"], "sales average $120");
        assert_eq!(json["metadata"]["tools_used"][0], "analyze_correlation");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_analysis_failure_serialization() {
        let result = AnalysisResult::failed("upstream unavailable");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["error"], "upstream unavailable");
        assert_eq!(json["metadata"]["status"], "failed");
        assert!(json.get("content").is_none());
    }

    #[test]
    fn test_analysis_accessors() {
        let ok = AnalysisResult::completed(
            "Data Specialist",
            "text",
            AnalysisMetadata {
                description: String::new(),
                tools_used: Vec::new(),
            },
        );
        assert_eq!(ok.content(), Some("text"));
        assert_eq!(ok.error(), None);
        assert!(!ok.is_failure());

        let failed = AnalysisResult::failed("boom");
        assert_eq!(failed.content(), None);
        assert_eq!(failed.error(), Some("boom"));
        assert!(failed.is_failure());
    }

    #[test]
    fn test_report_success_serialization() {
        let result = ReportResult::completed(
            vec![
                ConversationEntry::now("Data Specialist", "the analysis"),
                ConversationEntry::now("Report Generator", "the clarification"),
                ConversationEntry::now("Report Generator", "the report"),
            ],
            "the report",
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["final_report"], "the report");
        assert_eq!(json["conversation"].as_array().unwrap().len(), 3);
        assert_eq!(json["conversation"][0]["role"], "Data Specialist");
    }

    #[test]
    fn test_report_failure_has_no_conversation() {
        let result = ReportResult::failed("second call failed");
        assert!(result.is_failure());
        assert!(result.conversation().is_empty());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["error"], "second call failed");
        assert!(json.get("conversation").is_none());
    }

    #[test]
    fn test_analysis_result_round_trip() {
        let result = AnalysisResult::failed("boom");
        let json = serde_json::to_string(&result).unwrap();
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert!(back.is_failure());
        assert_eq!(back.error(), Some("boom"));
    }
}
