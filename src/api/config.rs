use std::time::Duration;

/// Default backend location used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";
/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime configuration describing how to reach the backend API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme, host and optional path prefix in front of `/api/v1`.
    pub base_url: String,
    /// Upper bound for a whole request, including reading the body.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Construct a configuration for an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
