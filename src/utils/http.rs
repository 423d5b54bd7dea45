//! HTTP client utilities.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::config::HttpConfig;

/// Default User-Agent sent with every API request
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Smallest per-request timeout; a zero timeout would fail every request
pub const MIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Shared HTTP client with a bounded per-request timeout
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::from_config(&HttpConfig::default())
    }

    /// Create a client from the `[http]` configuration section
    pub fn from_config(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        Self::with_settings(user_agent, Duration::from_secs(config.timeout_secs))
    }

    /// Create a new HTTP client with a custom user agent and timeout
    ///
    /// The timeout is raised to [`MIN_TIMEOUT`] when shorter.
    pub fn with_settings(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let timeout = timeout.max(MIN_TIMEOUT);
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            timeout,
        })
    }

    /// Get the underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Request timeout applied to every call
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_timeout_from_config() {
        let config = HttpConfig {
            timeout_secs: 2,
            user_agent: Some("tests/1.0".to_string()),
        };
        assert_eq!(
            HttpClient::from_config(&config).unwrap().timeout(),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn test_zero_timeout_is_raised_to_minimum() {
        let config = HttpConfig {
            timeout_secs: 0,
            user_agent: None,
        };
        assert_eq!(HttpClient::from_config(&config).unwrap().timeout(), MIN_TIMEOUT);
        assert_eq!(
            HttpClient::with_settings("tests/1.0", Duration::from_millis(1))
                .unwrap()
                .timeout(),
            MIN_TIMEOUT
        );
    }

    #[test]
    fn test_user_agent_names_crate() {
        assert!(DEFAULT_USER_AGENT.starts_with("stock-images-mcp/"));
    }
}
