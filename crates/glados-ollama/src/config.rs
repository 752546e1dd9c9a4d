//! Public configuration for the Ollama client.

use std::time::Duration;

/// Default address of a local Ollama server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";

/// Configuration for [`OllamaClient`](crate::OllamaClient).
///
/// # Example
///
/// ```
/// use glados_ollama::OllamaConfig;
/// use std::time::Duration;
///
/// let config = OllamaConfig::new()
///     .with_base_url("http://gpu-box:11434")
///     .with_optional_timeout(Some(Duration::from_secs(120)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaConfig {
    /// Server root, without the `/api` suffix
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Per-request timeout; `None` waits as long as the model takes
    pub(crate) timeout: Option<Duration>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("glados-terminal/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }
}

impl OllamaConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server root.
    ///
    /// Defaults to `http://127.0.0.1:11434`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set an optional per-request timeout.
    ///
    /// No timeout is applied by default: local models can take a long time
    /// to load on first use.
    #[must_use]
    pub const fn with_optional_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OllamaConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.user_agent.contains("glados-terminal"));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = OllamaConfig::new()
            .with_base_url("http://10.0.0.2:11434")
            .with_optional_timeout(Some(Duration::from_secs(60)));

        assert_eq!(config.base_url, "http://10.0.0.2:11434");
        assert_eq!(config.timeout, Some(Duration::from_secs(60)));

        let cleared = config.with_optional_timeout(None);
        assert!(cleared.timeout.is_none());
    }
}
