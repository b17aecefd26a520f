//! Programmable stand-in for the Backplane API, used by the integration tests
//! of every client crate.
//!
//! The server binds `127.0.0.1:0`, answers each `(method, path)` with a canned
//! [`StubResponse`] and records every request it receives, so tests can assert
//! on request shape and call counts.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, task::JoinHandle};

/// Canned response for one route.
#[derive(Debug, Clone)]
pub struct StubResponse {
    status: u16,
    body: String,
    content_type: &'static str,
    delay: Option<Duration>,
}

impl StubResponse {
    /// Respond with a JSON body.
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: "application/json",
            delay: None,
        }
    }

    /// Respond with a plain-text body.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            content_type: "text/plain",
            delay: None,
        }
    }

    /// Respond with no body.
    pub fn empty(status: u16) -> Self {
        Self::text(status, "")
    }

    /// Wait before answering.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request as received by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Body parsed as JSON, or `Null` when absent or not JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    /// Header value by lowercase name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Raw (still encoded) value of a query parameter; the last occurrence wins.
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query_params(key).pop()
    }

    /// Every raw value of a query parameter, in order.
    pub fn query_params(&self, key: &str) -> Vec<String> {
        self.query
            .as_deref()
            .unwrap_or_default()
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
            .collect()
    }
}

#[derive(Default)]
struct StubState {
    routes: Mutex<HashMap<(String, String), StubResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Running stub server. Stops when dropped.
pub struct StubServer {
    addr: SocketAddr,
    state: Arc<StubState>,
    task: JoinHandle<()>,
}

impl StubServer {
    /// Bind a random local port and start serving.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(StubState::default());

        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, state, task })
    }

    /// Base URL of the server, e.g. `http://127.0.0.1:41234`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Register (or replace) the response for `method` + `path`.
    pub fn on(&self, method: &str, path: &str, response: StubResponse) -> &Self {
        lock(&self.state.routes).insert((method.to_ascii_uppercase(), path.to_string()), response);
        self
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }

    /// Number of requests received so far.
    pub fn hits(&self) -> usize {
        lock(&self.state.requests).len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.state.requests).last().cloned()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let recorded = RecordedRequest {
        method: method.as_str().to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        headers: headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect(),
        body: body.to_vec(),
    };
    lock(&state.requests).push(recorded);

    let stub = lock(&state.routes)
        .get(&(method.as_str().to_string(), path.clone()))
        .cloned();

    let Some(stub) = stub else {
        let body = json!({ "message": format!("No stub for {method} {path}"), "code": "STUB_MISSING" });
        return (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response();
    };

    if let Some(delay) = stub.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(stub.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, stub.content_type)], stub.body).into_response()
}
