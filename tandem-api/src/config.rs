//! API Configuration Module
//!
//! Bind address, port, and the retry policy for the analyze endpoint.
//! Configuration is loaded from environment variables with defaults
//! matching the original deployment.

use std::time::Duration;

/// API configuration for the HTTP server and retry policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Bind host for the HTTP listener.
    pub bind: String,

    /// Listen port.
    pub port: u16,

    /// Maximum pipeline attempts per request.
    pub max_retries: u32,

    /// Base inter-attempt delay; actual delay grows linearly with the
    /// attempt count.
    pub retry_delay: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 4323,
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `TANDEM_BIND`: bind host (default: 0.0.0.0)
    /// - `PORT` / `TANDEM_PORT`: listen port (default: 4323)
    /// - `TANDEM_MAX_RETRIES`: pipeline attempts per request (default: 3)
    /// - `TANDEM_RETRY_DELAY_MS`: base inter-attempt delay (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind = std::env::var("TANDEM_BIND").unwrap_or(defaults.bind);

        let port = std::env::var("PORT")
            .ok()
            .or_else(|| std::env::var("TANDEM_PORT").ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let max_retries = std::env::var("TANDEM_MAX_RETRIES")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(defaults.max_retries)
            .max(1);

        let retry_delay = std::env::var("TANDEM_RETRY_DELAY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_delay);

        Self {
            bind,
            port,
            max_retries,
            retry_delay,
        }
    }

    /// Delay before the retry that follows failed attempt `attempt`
    /// (1-based). Linear backoff: base delay scaled by the attempt count.
    pub fn retry_delay_for(&self, attempt: u32) -> Duration {
        self.retry_delay * attempt
    }

    /// Socket address string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 4323);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(1));
        assert_eq!(config.bind_addr(), "0.0.0.0:4323");
    }

    #[test]
    fn test_linear_backoff() {
        let config = ApiConfig {
            retry_delay: Duration::from_millis(100),
            ..ApiConfig::default()
        };
        assert_eq!(config.retry_delay_for(1), Duration::from_millis(100));
        assert_eq!(config.retry_delay_for(2), Duration::from_millis(200));
        assert_eq!(config.retry_delay_for(3), Duration::from_millis(300));
    }
}
