use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Code for a request that exceeded its deadline.
pub const TIMEOUT: &str = "TIMEOUT";
/// Code for a request that failed before a response was received.
pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
/// Code for an operation that needs a session while none is held.
pub const NO_SESSION: &str = "NO_SESSION";
/// Code for a 2xx body that does not match the expected shape.
pub const INVALID_RESPONSE: &str = "INVALID_RESPONSE";

/// Errors raised while building a client. These are not recoverable and are
/// never wrapped in an [`ApiResult`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: project is required")]
    MissingProject,

    #[error("Configuration error: api key is required")]
    MissingApiKey,

    #[error("Configuration error: invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Configuration error: invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("Configuration error: invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Configuration error: failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Error descriptor carried by every failed operation.
///
/// `code` is one of the locally synthesized codes ([`TIMEOUT`],
/// [`NETWORK_ERROR`], [`NO_SESSION`], [`INVALID_RESPONSE`]) or whatever the
/// remote service returned. `status` is set whenever an HTTP response exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Result envelope returned by every operation: data on success, an
/// [`ApiError`] otherwise.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            status: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn timeout() -> Self {
        Self::new("Request timeout").with_code(TIMEOUT)
    }

    pub fn network(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            "Unknown error".to_string()
        } else {
            message
        };
        Self::new(message).with_code(NETWORK_ERROR)
    }

    pub fn no_session(message: impl Into<String>) -> Self {
        Self::new(message).with_code(NO_SESSION)
    }

    pub fn invalid_response(status: u16, err: &serde_json::Error) -> Self {
        Self::new(format!("Invalid response body: {err}"))
            .with_code(INVALID_RESPONSE)
            .with_status(status)
    }

    /// Build the error for a non-2xx response from its (possibly null) body.
    pub fn from_response(status: u16, body: &JsonValue) -> Self {
        let message = body
            .get("message")
            .and_then(JsonValue::as_str)
            .or_else(|| body.get("error").and_then(JsonValue::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {status}"));

        let code = body
            .get("code")
            .and_then(code_string)
            .or_else(|| body.get("statusCode").and_then(code_string));

        Self {
            message,
            code,
            status: Some(status),
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn is_timeout(&self) -> bool {
        self.code() == Some(TIMEOUT)
    }

    pub fn is_network(&self) -> bool {
        self.code() == Some(NETWORK_ERROR)
    }

    pub fn is_no_session(&self) -> bool {
        self.code() == Some(NO_SESSION)
    }
}

fn code_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
