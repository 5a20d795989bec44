//! Anthropic completion provider over the Messages API

use super::client::AnthropicClient;
use super::types::{ApiMessage, ContentBlock, MessageRequest, MessageResponse};
use crate::{CompletionProvider, CompletionRequest, TurnRole};
use async_trait::async_trait;
use tandem_core::{LlmError, TandemError, TandemResult};

/// Default model when `TANDEM_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";

/// Anthropic completion provider using Claude models.
pub struct AnthropicCompletionProvider {
    client: AnthropicClient,
    model: String,
}

impl AnthropicCompletionProvider {
    /// Create a new Anthropic completion provider.
    ///
    /// # Arguments
    /// * `api_key` - Anthropic API key
    /// * `model` - Model name (e.g., "claude-3-sonnet-20240229")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: AnthropicClient::new(api_key, 50),
            model: model.into(),
        }
    }

    /// Create a provider from the environment.
    ///
    /// Environment variables:
    /// - `ANTHROPIC_API_KEY`: API key (required)
    /// - `TANDEM_MODEL`: model name (default: claude-3-sonnet-20240229)
    pub fn from_env() -> TandemResult<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            TandemError::Llm(LlmError::MissingApiKey {
                provider: "anthropic".to_string(),
            })
        })?;
        let model = std::env::var("TANDEM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    /// Extract text from content blocks.
    fn extract_text(content: Vec<ContentBlock>) -> String {
        content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl CompletionProvider for AnthropicCompletionProvider {
    async fn complete(&self, request: CompletionRequest) -> TandemResult<String> {
        let messages = request
            .turns
            .into_iter()
            .map(|turn| ApiMessage {
                role: match turn.role {
                    TurnRole::User => "user".to_string(),
                    TurnRole::Assistant => "assistant".to_string(),
                },
                content: turn.content,
            })
            .collect();

        let api_request = MessageRequest {
            model: self.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            system: Some(request.system),
            temperature: Some(request.temperature),
        };

        let response: MessageResponse = self.client.request("messages", api_request).await?;

        Ok(Self::extract_text(response.content))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for AnthropicCompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicCompletionProvider")
            .field("model", &self.model)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
