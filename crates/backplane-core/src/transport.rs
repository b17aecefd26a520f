//! The single HTTP primitive every resource client goes through.
//!
//! [`Transport::send`] issues one request under a deadline and normalizes
//! every outcome (timeout, network failure, non-2xx status, unparsable body)
//! into an [`ApiResult`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, ConfigError};

/// HTTP methods accepted by the platform API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized as JSON (the default for every API call).
    Json(JsonValue),
    /// Sent verbatim with the given content type.
    Bytes { data: Vec<u8>, content_type: String },
}

/// Per-call options for [`Transport::send`].
///
/// # Example
/// ```
/// use backplane_core::{HttpMethod, RequestOptions};
/// use serde_json::json;
/// use std::time::Duration;
///
/// let opts = RequestOptions::new()
///     .method(HttpMethod::Post)
///     .json(json!({"email": "a@b.com"}))
///     .header("x-request-id", "42")
///     .timeout(Duration::from_secs(5));
/// assert_eq!(opts.http_method(), HttpMethod::Post);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    method: HttpMethod,
    body: Option<RequestBody>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl RequestOptions {
    /// GET with no body, default headers and the configured timeout.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get() -> Self {
        Self::new()
    }

    pub fn post() -> Self {
        Self::new().method(HttpMethod::Post)
    }

    pub fn put() -> Self {
        Self::new().method(HttpMethod::Put)
    }

    pub fn patch() -> Self {
        Self::new().method(HttpMethod::Patch)
    }

    pub fn delete() -> Self {
        Self::new().method(HttpMethod::Delete)
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Set a JSON body.
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Set a raw body with its content type.
    pub fn bytes(mut self, data: Vec<u8>, content_type: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Bytes {
            data,
            content_type: content_type.into(),
        });
        self
    }

    /// Add a header. Replaces a default header of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Send `token` as the bearer credential instead of the API key.
    pub fn bearer(self, token: &str) -> Self {
        self.header(AUTHORIZATION.as_str(), format!("Bearer {token}"))
    }

    /// Override the configured deadline for this call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn http_method(&self) -> HttpMethod {
        self.method
    }

    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }
}

/// HTTP transport bound to one [`ClientConfig`].
///
/// Cheap to clone; clones share the connection pool and configuration.
#[derive(Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: Arc<str>,
    authorization: HeaderValue,
    config: Arc<ClientConfig>,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("project", &self.config.project)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}

impl Transport {
    /// Build a transport, failing fast on missing or malformed configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let base = config.base_url.trim_end_matches('/');
        Url::parse(base)?;

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| ConfigError::InvalidHeader(format!("api key: {e}")))?;
        authorization.set_sensitive(true);

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url: Arc::from(base),
            authorization,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn project(&self) -> &str {
        &self.config.project
    }

    /// Path of a project-scoped resource: `/v1/projects/<project>/<resource>`.
    pub fn project_path(&self, resource: &str) -> String {
        format!(
            "/v1/projects/{}/{}",
            encode_segment(&self.config.project),
            resource.trim_start_matches('/')
        )
    }

    /// Absolute URL for a path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send one request and return the parsed JSON body.
    ///
    /// A body that is empty or not JSON becomes `Value::Null`.
    pub async fn send(&self, path: &str, options: RequestOptions) -> ApiResult<JsonValue> {
        self.execute(path, options).await.map(|(_, body)| body)
    }

    /// Send one request and decode the body into `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let (status, body) = self.execute(path, options).await?;
        serde_json::from_value(body).map_err(|e| ApiError::invalid_response(status, &e))
    }

    async fn execute(&self, path: &str, options: RequestOptions) -> ApiResult<(u16, JsonValue)> {
        let method = options.method;
        let deadline = options.timeout.unwrap_or(self.config.timeout);
        let request = self.build(path, options)?;

        debug!(%method, path, "Sending request");

        match tokio::time::timeout(deadline, dispatch(request)).await {
            Err(_) => {
                warn!(%method, path, timeout_ms = deadline.as_millis() as u64, "Request timed out");
                Err(ApiError::timeout())
            }
            Ok(Err(err)) => {
                warn!(%method, path, error = %err, "Request failed");
                Err(ApiError::network(err.to_string()))
            }
            Ok(Ok((status, body))) if (200..300).contains(&status) => {
                debug!(%method, path, status, "Request succeeded");
                Ok((status, body))
            }
            Ok(Ok((status, body))) => {
                let err = ApiError::from_response(status, &body);
                debug!(%method, path, status, code = ?err.code, "Request returned error status");
                Err(err)
            }
        }
    }

    fn build(&self, path: &str, options: RequestOptions) -> ApiResult<reqwest::RequestBuilder> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.authorization.clone());

        if let Some(RequestBody::Bytes { content_type, .. }) = &options.body {
            let value = HeaderValue::from_str(content_type)
                .map_err(|e| ApiError::network(format!("Invalid content type '{content_type}': {e}")))?;
            headers.insert(CONTENT_TYPE, value);
        }

        for (name, value) in &options.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::network(format!("Invalid header name '{name}': {e}")))?;
            let mut header_value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::network(format!("Invalid header value for '{name}': {e}")))?;
            if header_name == AUTHORIZATION {
                header_value.set_sensitive(true);
            }
            headers.insert(header_name, header_value);
        }

        let request = self
            .http
            .request(options.method.into(), self.url(path))
            .headers(headers);

        Ok(match options.body {
            Some(RequestBody::Json(value)) => request.body(value.to_string()),
            Some(RequestBody::Bytes { data, .. }) => request.body(data),
            None => request,
        })
    }
}

async fn dispatch(request: reqwest::RequestBuilder) -> Result<(u16, JsonValue), reqwest::Error> {
    let response = request.send().await?;
    let status = response.status().as_u16();
    let bytes = response.bytes().await?;
    let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    Ok((status, body))
}

/// Percent-encode a value for use as a single path segment.
pub fn encode_segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Append `key=value` pairs to a path as a query string. Returns the path
/// unchanged when there are no pairs.
pub fn with_query<K, V>(path: &str, pairs: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in pairs {
        serializer.append_pair(key.as_ref(), value.as_ref());
        any = true;
    }
    if !any {
        return path.to_string();
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{}", serializer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> Transport {
        Transport::new(ClientConfig::new("demo", "key123").base_url("https://api.example.com/"))
            .unwrap()
    }

    #[test]
    fn new_rejects_missing_credentials() {
        assert!(matches!(
            Transport::new(ClientConfig::new("demo", "")),
            Err(ConfigError::MissingApiKey)
        ));
        assert!(matches!(
            Transport::new(ClientConfig::new("", "key")),
            Err(ConfigError::MissingProject)
        ));
    }

    #[test]
    fn new_rejects_bad_base_url() {
        let config = ClientConfig::new("demo", "key").base_url("not a url");
        assert!(matches!(Transport::new(config), Err(ConfigError::InvalidBaseUrl(_))));
    }

    #[test]
    fn new_rejects_key_with_newline() {
        let config = ClientConfig::new("demo", "bad\nkey");
        assert!(matches!(Transport::new(config), Err(ConfigError::InvalidHeader(_))));
    }

    #[test]
    fn url_joins_base_and_path() {
        let t = transport();
        assert_eq!(t.url("/v1/x"), "https://api.example.com/v1/x");
        assert_eq!(t.url("v1/x"), "https://api.example.com/v1/x");
    }

    #[test]
    fn project_path_interpolates_project() {
        let t = transport();
        assert_eq!(t.project_path("auth/signin"), "/v1/projects/demo/auth/signin");
        assert_eq!(t.project_path("/env"), "/v1/projects/demo/env");
    }

    #[test]
    fn encode_segment_escapes_spaces_and_slashes() {
        assert_eq!(encode_segment("my table"), "my%20table");
        assert_eq!(encode_segment("a/b"), "a%2Fb");
        assert_eq!(encode_segment("plain_name"), "plain_name");
    }

    #[test]
    fn with_query_skips_empty_pairs() {
        let empty: Vec<(&str, String)> = Vec::new();
        assert_eq!(with_query("/rows", empty), "/rows");
        assert_eq!(
            with_query("/rows", [("limit", "5"), ("sort_by", "created at")]),
            "/rows?limit=5&sort_by=created+at"
        );
        assert_eq!(with_query("/t?a=1", [("b", "2")]), "/t?a=1&b=2");
    }

    #[test]
    fn request_options_defaults_to_get() {
        let opts = RequestOptions::new();
        assert_eq!(opts.http_method(), HttpMethod::Get);
        assert!(opts.body().is_none());
    }

    #[test]
    fn bearer_adds_authorization_header() {
        let opts = RequestOptions::post().bearer("tok");
        assert_eq!(
            opts.headers,
            vec![("authorization".to_string(), "Bearer tok".to_string())]
        );
    }
}
