//! Transport behavior against an in-process stub server.
//!
//! Run with: cargo test -p backplane-core --test integration

use std::time::Duration;

use backplane_core::{ApiError, ClientConfig, HttpMethod, RequestOptions, Transport};
use backplane_stub::{StubResponse, StubServer};
use serde::Deserialize;
use serde_json::json;

async fn setup() -> (StubServer, Transport) {
    let server = StubServer::start().await.expect("stub server");
    let config = ClientConfig::new("demo", "key123").base_url(server.url());
    let transport = Transport::new(config).expect("transport");
    (server, transport)
}

#[tokio::test]
async fn success_returns_parsed_body() {
    let (server, transport) = setup().await;
    server.on("GET", "/v1/ping", StubResponse::json(200, json!({"pong": true})));

    let data = transport.send("/v1/ping", RequestOptions::get()).await.unwrap();
    assert_eq!(data, json!({"pong": true}));
}

#[tokio::test]
async fn sends_json_body_and_default_headers() {
    let (server, transport) = setup().await;
    server.on("POST", "/v1/echo", StubResponse::json(201, json!({})));

    transport
        .send(
            "/v1/echo",
            RequestOptions::post().json(json!({"name": "World"})),
        )
        .await
        .unwrap();

    let req = server.last_request().unwrap();
    assert_eq!(req.method, "POST");
    assert_eq!(req.json(), json!({"name": "World"}));
    assert_eq!(req.header("authorization"), Some("Bearer key123"));
    assert_eq!(req.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn caller_headers_override_and_augment_defaults() {
    let (server, transport) = setup().await;
    server.on("GET", "/v1/me", StubResponse::json(200, json!({})));

    transport
        .send(
            "/v1/me",
            RequestOptions::get()
                .header("Authorization", "Bearer session-token")
                .header("x-trace", "abc"),
        )
        .await
        .unwrap();

    let req = server.last_request().unwrap();
    assert_eq!(req.header("authorization"), Some("Bearer session-token"));
    assert_eq!(req.header("x-trace"), Some("abc"));
}

#[tokio::test]
async fn non_json_success_body_is_null() {
    let (server, transport) = setup().await;
    server.on("DELETE", "/v1/thing", StubResponse::text(200, "deleted"));

    let data = transport.send("/v1/thing", RequestOptions::delete()).await.unwrap();
    assert!(data.is_null());
}

#[tokio::test]
async fn error_status_uses_body_message_and_code() {
    let (server, transport) = setup().await;
    server.on(
        "POST",
        "/v1/signup",
        StubResponse::json(409, json!({"message": "User already exists", "code": "USER_EXISTS"})),
    );

    let err = transport
        .send("/v1/signup", RequestOptions::post().json(json!({})))
        .await
        .unwrap_err();
    assert_eq!(err.message, "User already exists");
    assert_eq!(err.code.as_deref(), Some("USER_EXISTS"));
    assert_eq!(err.status, Some(409));
}

#[tokio::test]
async fn error_status_with_numeric_status_code_field() {
    let (server, transport) = setup().await;
    server.on(
        "GET",
        "/v1/bucket",
        StubResponse::json(404, json!({"error": "Bucket not found", "statusCode": 404})),
    );

    let err = transport.send("/v1/bucket", RequestOptions::get()).await.unwrap_err();
    assert_eq!(err.message, "Bucket not found");
    assert_eq!(err.code.as_deref(), Some("404"));
    assert_eq!(err.status, Some(404));
}

#[tokio::test]
async fn unparsable_error_body_uses_generic_message() {
    let (server, transport) = setup().await;
    server.on("GET", "/v1/broken", StubResponse::text(503, "<html>bad gateway</html>"));

    let err = transport.send("/v1/broken", RequestOptions::get()).await.unwrap_err();
    assert_eq!(
        err,
        ApiError {
            message: "Request failed with status 503".into(),
            code: None,
            status: Some(503),
        }
    );
}

#[tokio::test]
async fn deadline_elapsing_yields_timeout() {
    let (server, transport) = setup().await;
    server.on(
        "GET",
        "/v1/slow",
        StubResponse::json(200, json!({"late": true})).delay(Duration::from_millis(500)),
    );

    let err = transport
        .send(
            "/v1/slow",
            RequestOptions::get().timeout(Duration::from_millis(50)),
        )
        .await
        .unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(err.message, "Request timeout");
    assert_eq!(err.status, None);
}

#[tokio::test]
async fn configured_timeout_applies_without_override() {
    let server = StubServer::start().await.unwrap();
    server.on(
        "GET",
        "/v1/slow",
        StubResponse::empty(204).delay(Duration::from_millis(500)),
    );
    let transport =
        Transport::new(ClientConfig::new("demo", "key123").base_url(server.url()).timeout_ms(50))
            .unwrap();

    let err = transport.send("/v1/slow", RequestOptions::get()).await.unwrap_err();
    assert!(err.is_timeout());
}

#[tokio::test]
async fn connection_refused_yields_network_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let transport =
        Transport::new(ClientConfig::new("demo", "key123").base_url(format!("http://{addr}")))
            .unwrap();

    let err = transport.send("/v1/anything", RequestOptions::get()).await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(err.status, None);
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn invalid_header_yields_network_error_without_request() {
    let (server, transport) = setup().await;

    let err = transport
        .send("/v1/x", RequestOptions::get().header("bad header", "v"))
        .await
        .unwrap_err();
    assert!(err.is_network());
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn typed_request_decodes_body() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Pong {
        pong: bool,
    }

    let (server, transport) = setup().await;
    server.on("GET", "/v1/ping", StubResponse::json(200, json!({"pong": true})));

    let pong: Pong = transport.request("/v1/ping", RequestOptions::get()).await.unwrap();
    assert_eq!(pong, Pong { pong: true });
}

#[tokio::test]
async fn typed_request_reports_shape_mismatch() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Pong {
        pong: bool,
    }

    let (server, transport) = setup().await;
    server.on("GET", "/v1/ping", StubResponse::json(200, json!({"other": 1})));

    let err = transport
        .request::<Pong>("/v1/ping", RequestOptions::get())
        .await
        .unwrap_err();
    assert_eq!(err.code.as_deref(), Some("INVALID_RESPONSE"));
    assert_eq!(err.status, Some(200));
}

#[tokio::test]
async fn bytes_body_carries_its_content_type() {
    let (server, transport) = setup().await;
    server.on("POST", "/v1/upload", StubResponse::json(200, json!({"ok": true})));

    transport
        .send(
            "/v1/upload",
            RequestOptions::new()
                .method(HttpMethod::Post)
                .bytes(b"hello".to_vec(), "text/plain"),
        )
        .await
        .unwrap();

    let req = server.last_request().unwrap();
    assert_eq!(req.body, b"hello");
    assert_eq!(req.header("content-type"), Some("text/plain"));
}

#[tokio::test]
async fn every_outcome_is_exactly_data_or_error() {
    let (server, transport) = setup().await;
    server.on("GET", "/v1/ok", StubResponse::json(200, json!(1)));
    server.on("GET", "/v1/fail", StubResponse::json(500, json!({"message": "boom"})));

    for path in ["/v1/ok", "/v1/fail", "/v1/unrouted"] {
        let envelope: backplane_core::Envelope<_> =
            transport.send(path, RequestOptions::get()).await.into();
        assert_ne!(envelope.data().is_some(), envelope.error().is_some(), "{path}");
    }
}
