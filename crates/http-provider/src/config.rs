use std::fmt::Debug;
use std::time::Duration;

/// The endpoint the reply server listens on by default.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/";

/// Builder for [`HttpConfig`].
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct HttpConfigBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl HttpConfigBuilder {
    /// Creates a builder with every option unset.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL prompts are posted to.
    #[inline]
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets a deadline for the whole request. Without it, a hanging server
    /// keeps the request pending forever.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> HttpConfig {
        HttpConfig {
            endpoint: self
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout: self.timeout,
        }
    }
}

impl Debug for HttpConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConfigBuilder")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Configuration for the HTTP reply provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HttpConfig {
    pub(crate) endpoint: String,
    pub(crate) timeout: Option<Duration>,
}

impl HttpConfig {
    /// Returns the URL prompts are posted to.
    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the request deadline, if any.
    #[inline]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for HttpConfig {
    #[inline]
    fn default() -> Self {
        HttpConfigBuilder::new().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.endpoint(), "http://localhost:5000/");
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_overrides() {
        let config = HttpConfigBuilder::new()
            .with_endpoint("http://127.0.0.1:8080/chat")
            .with_timeout(Duration::from_secs(3))
            .build();
        assert_eq!(config.endpoint(), "http://127.0.0.1:8080/chat");
        assert_eq!(config.timeout(), Some(Duration::from_secs(3)));
    }
}
