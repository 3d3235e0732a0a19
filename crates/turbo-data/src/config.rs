//! Client configuration.

use std::time::Duration;

use crate::retry::RetryPolicy;

/// Fake Store API, the catalog the browser talks to by default.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// Default total timeout per request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`CatalogClient`](crate::CatalogClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the catalog service.
    pub base_url: String,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Total operation timeout.
    pub timeout: Duration,
    /// Retry policy applied to every request.
    pub retry: RetryPolicy,
    /// User-Agent header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration for `base_url` with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the total timeout; the connect timeout becomes a quarter of it.
    pub fn with_timeout(mut self, total: Duration) -> Self {
        self.timeout = total;
        self.connect_timeout = total / 4;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: DEFAULT_TIMEOUT / 4,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            user_agent: format!("turbo-data/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.retry.max_attempts, 1);
    }

    #[test]
    fn test_with_timeout_derives_connect_timeout() {
        let config =
            ClientConfig::new("http://localhost:3000").with_timeout(Duration::from_secs(2));
        assert_eq!(config.connect_timeout, Duration::from_millis(500));
        assert_eq!(config.base_url, "http://localhost:3000");
    }
}
