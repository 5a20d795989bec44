//! TANDEM LLM - Completion Provider Abstraction
//!
//! Provider-agnostic trait for text generation. The agents depend only on
//! this contract: a system instruction, an ordered list of role-tagged
//! turns, a temperature, and a token budget in; generated text out.
//! The Anthropic implementation lives under [`providers`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tandem_core::{LlmError, TandemResult};

pub mod providers;

pub use providers::anthropic::AnthropicCompletionProvider;

// ============================================================================
// COMPLETION REQUEST
// ============================================================================

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// A single role-tagged turn in a completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    /// A user-authored turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    /// An assistant-authored turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// A text-generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// System instruction prefix
    pub system: String,
    /// Ordered conversation turns, replayed verbatim
    pub turns: Vec<ChatTurn>,
    /// Sampling temperature in [0, 1]
    pub temperature: f32,
    /// Token budget for the response
    pub max_tokens: i32,
}

// ============================================================================
// COMPLETION PROVIDER TRAIT
// ============================================================================

/// Trait for text-generation providers.
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate text for the given request.
    ///
    /// # Returns
    /// * `Ok(String)` - The generated text
    /// * `Err(TandemError::Llm)` - If generation fails
    async fn complete(&self, request: CompletionRequest) -> TandemResult<String>;

    /// Get the model identifier for this provider.
    fn model_id(&self) -> &str;
}

// ============================================================================
// SCRIPTED PROVIDER FOR TESTING
// ============================================================================

/// Scripted completion provider for testing.
///
/// Returns queued outcomes in order, then falls back to a fixed outcome
/// once the script is exhausted. Counts every call, which lets tests
/// assert exactly how many generation requests a code path issued.
#[derive(Debug)]
pub struct ScriptedCompletionProvider {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    fallback: Result<String, LlmError>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletionProvider {
    /// Provider that answers every call with `"scripted response"` unless
    /// scripted otherwise.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Ok("scripted response".to_string()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Provider whose every unscripted call fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Err(LlmError::RequestFailed {
                provider: "scripted".to_string(),
                status: 500,
                message: message.into(),
            }),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response.
    pub fn push_ok(&self, text: impl Into<String>) {
        self.script
            .lock()
            .expect("script lock")
            .push_back(Ok(text.into()));
    }

    /// Queue a failure.
    pub fn push_err(&self, error: LlmError) {
        self.script
            .lock()
            .expect("script lock")
            .push_back(Err(error));
    }

    /// Total number of completion calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Every request received so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Default for ScriptedCompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedCompletionProvider {
    async fn complete(&self, request: CompletionRequest) -> TandemResult<String> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.requests.lock().expect("requests lock").push(request);
        let next = self.script.lock().expect("script lock").pop_front();
        match next.unwrap_or_else(|| self.fallback.clone()) {
            Ok(text) => Ok(text),
            Err(error) => Err(error.into()),
        }
    }

    fn model_id(&self) -> &str {
        "scripted"
    }
}

// =============================================================================
// TESTS
// =============================================================================
