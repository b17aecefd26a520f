use std::collections::HashMap;
use std::time::Duration;

use backplane_core::HttpMethod;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Options for invoking a deployed function.
///
/// # Example
/// ```
/// use backplane_functions::InvokeOptions;
/// use serde_json::json;
///
/// let opts = InvokeOptions::new()
///     .body(json!({"name": "World"}))
///     .header("x-request-id", "abc");
/// ```
#[derive(Debug, Clone)]
pub struct InvokeOptions {
    pub(crate) method: HttpMethod,
    pub(crate) body: Option<JsonValue>,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) timeout: Option<Duration>,
}

impl Default for InvokeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl InvokeOptions {
    /// POST with no body.
    pub fn new() -> Self {
        Self {
            method: HttpMethod::Post,
            body: None,
            headers: HashMap::new(),
            timeout: None,
        }
    }

    /// Set a JSON body.
    pub fn body(mut self, value: JsonValue) -> Self {
        self.body = Some(value);
        self
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Add a custom header. Replaces the default of the same name.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add multiple custom headers.
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Override the client deadline for this invocation.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Result of a successful invocation.
///
/// The platform returns only the function's JSON output, so `status` and
/// `headers` are fixed to `200` and a JSON content type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionResponse {
    pub data: JsonValue,
    pub status: u16,
    pub headers: HashMap<String, String>,
}

impl FunctionResponse {
    pub(crate) fn from_data(data: JsonValue) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self {
            data,
            status: 200,
            headers,
        }
    }

    /// Get a response header (case-insensitive lookup).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Deserialize the function output.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data)
    }

    pub fn into_data(self) -> JsonValue {
        self.data
    }
}

/// A deployed function as described by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionInfo {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Source and settings for a new or updated function.
///
/// # Example
/// ```
/// use backplane_functions::FunctionDeployment;
///
/// let deployment = FunctionDeployment::new("hello", "export default () => 'hi'")
///     .runtime("deno")
///     .env("GREETING", "hi");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FunctionDeployment {
    pub name: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_jwt: Option<bool>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub env_vars: HashMap<String, String>,
}

impl FunctionDeployment {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }

    /// Require a valid user JWT on invocation.
    pub fn verify_jwt(mut self, verify: bool) -> Self {
        self.verify_jwt = Some(verify);
        self
    }

    /// Add an environment variable scoped to this function.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }
}
