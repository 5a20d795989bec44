//! OpenAPI document for the TANDEM API.

use utoipa::OpenApi;

use crate::error::{ErrorEnvelope, ErrorMetadata};
use crate::routes::analyze::{AnalyzeRequest, AnalyzeResponse, ResponseMetadata};
use crate::routes::conversation::ConversationResponse;
use crate::routes::health::{HealthMetrics, HealthResponse};
use crate::state::{ConversationMessage, ConversationStats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TANDEM API",
        description = "Two-stage agent analysis pipeline over the Anthropic Messages API",
    ),
    paths(
        crate::routes::analyze::analyze,
        crate::routes::health::health,
        crate::routes::conversation::conversation,
    ),
    components(schemas(
        AnalyzeRequest,
        AnalyzeResponse,
        ResponseMetadata,
        ConversationResponse,
        ConversationMessage,
        ConversationStats,
        HealthResponse,
        HealthMetrics,
        ErrorEnvelope,
        ErrorMetadata,
    )),
    tags(
        (name = "Analyze", description = "Two-stage analysis pipeline"),
        (name = "Health", description = "Process health and metrics"),
        (name = "Conversation", description = "Conversation history view"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_lists_all_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/analyze"));
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
        assert!(paths.iter().any(|p| p.as_str() == "/conversation"));
    }
}
