use std::time::Duration;

use crate::error::ConfigError;

/// Platform origin used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.backplane.dev";

/// Per-request deadline used when no timeout is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Configuration for connecting to a Backplane project.
///
/// Immutable once a client has been built from it; every resource client
/// shares the same instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Project identifier interpolated into every request path.
    pub project: String,
    /// API key sent as `Authorization: Bearer <api_key>`.
    pub api_key: String,
    /// Platform origin (defaults to [`DEFAULT_BASE_URL`]).
    pub base_url: String,
    /// Deadline applied to each request unless overridden per call.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new config for a project and API key.
    pub fn new(project: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build a config from `BACKPLANE_PROJECT`, `BACKPLANE_API_KEY` and the
    /// optional `BACKPLANE_URL` / `BACKPLANE_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let project = std::env::var("BACKPLANE_PROJECT").map_err(|_| ConfigError::MissingProject)?;
        let api_key = std::env::var("BACKPLANE_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;
        let mut config = Self::new(project, api_key);

        if let Ok(url) = std::env::var("BACKPLANE_URL") {
            config = config.base_url(url);
        }
        if let Ok(raw) = std::env::var("BACKPLANE_TIMEOUT_MS") {
            let ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidTimeout(format!("{raw}: {e}")))?;
            config = config.timeout_ms(ms);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the platform origin.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the default request deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the default request deadline in milliseconds.
    pub fn timeout_ms(self, ms: u64) -> Self {
        self.timeout(Duration::from_millis(ms))
    }

    /// Check the required fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project.trim().is_empty() {
            return Err(ConfigError::MissingProject);
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}
