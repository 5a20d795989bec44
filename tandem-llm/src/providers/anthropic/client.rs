//! Anthropic HTTP client with rate limiting and a per-request timeout

use super::types::ApiError;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tandem_core::{LlmError, TandemError, TandemResult};
use tokio::sync::Semaphore;

const PROVIDER: &str = "anthropic";

/// Default per-request timeout. The upstream call otherwise has no bound
/// and a hung request would block the whole pipeline.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Anthropic API client with rate limiting.
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    base_url: String,
    rate_limiter: Arc<Semaphore>,
    started: Instant,
    last_request_ms: Arc<AtomicU64>,
    min_request_interval_ms: u64,
}

impl AnthropicClient {
    /// Create a new Anthropic client.
    ///
    /// # Arguments
    /// * `api_key` - Anthropic API key
    /// * `requests_per_minute` - Maximum requests per minute (default: 50)
    pub fn new(api_key: impl Into<String>, requests_per_minute: u32) -> Self {
        Self::with_timeout(api_key, requests_per_minute, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client with an explicit per-request timeout.
    pub fn with_timeout(
        api_key: impl Into<String>,
        requests_per_minute: u32,
        timeout: Duration,
    ) -> Self {
        let permits = (requests_per_minute as usize).max(1);
        let min_interval_ms = (60_000 / requests_per_minute.max(1) as u64).max(10);

        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: "https://api.anthropic.com/v1".to_string(),
            rate_limiter: Arc::new(Semaphore::new(permits)),
            started: Instant::now(),
            last_request_ms: Arc::new(AtomicU64::new(0)),
            min_request_interval_ms: min_interval_ms,
        }
    }

    /// Make an API request with automatic rate limiting.
    pub async fn request<Req: Serialize, Res: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Req,
    ) -> TandemResult<Res> {
        // Rate limiting: acquire permit
        let _permit = self.rate_limiter.acquire().await.map_err(|e| {
            TandemError::Llm(LlmError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: format!("Rate limiter error: {}", e),
            })
        })?;

        // Enforce minimum interval between requests
        let now_ms = self.started.elapsed().as_millis() as u64;
        let last_ms = self.last_request_ms.load(Ordering::Relaxed);
        let elapsed = now_ms.saturating_sub(last_ms);

        if elapsed < self.min_request_interval_ms {
            let wait_ms = self.min_request_interval_ms - elapsed;
            tokio::time::sleep(Duration::from_millis(wait_ms)).await;
        }

        self.last_request_ms
            .store(self.started.elapsed().as_millis() as u64, Ordering::Relaxed);

        // Make HTTP request
        let sent_at = Instant::now();
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TandemError::Llm(LlmError::Timeout {
                        provider: PROVIDER.to_string(),
                        elapsed_ms: sent_at.elapsed().as_millis() as u64,
                    })
                } else {
                    TandemError::Llm(LlmError::RequestFailed {
                        provider: PROVIDER.to_string(),
                        status: 0,
                        message: format!("HTTP request failed: {}", e),
                    })
                }
            })?;

        // Handle response
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| {
                TandemError::Llm(LlmError::InvalidResponse {
                    provider: PROVIDER.to_string(),
                    reason: format!("Failed to parse response: {}", e),
                })
            })
        } else {
            // Parse error response
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            let error_msg = if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                api_error.error.message
            } else {
                error_text
            };

            Err(match status {
                StatusCode::TOO_MANY_REQUESTS => TandemError::Llm(LlmError::RateLimited {
                    provider: PROVIDER.to_string(),
                }),
                _ => TandemError::Llm(LlmError::RequestFailed {
                    provider: PROVIDER.to_string(),
                    status: status.as_u16() as i32,
                    message: error_msg,
                }),
            })
        }
    }
}

impl std::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
