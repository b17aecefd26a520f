//! Facade wiring against an in-process stub server.
//!
//! Run with: cargo test -p backplane --test integration

use backplane::prelude::*;
use backplane_stub::{StubResponse, StubServer};
use serde_json::json;

fn session_json() -> serde_json::Value {
    json!({
        "access_token": "user-token",
        "refresh_token": "r1",
        "expires_in": 900,
        "token_type": "bearer",
        "user": {
            "id": "user-1",
            "email": "a@b.com",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }
    })
}

async fn setup() -> (StubServer, BackplaneClient) {
    let server = StubServer::start().await.expect("stub server");
    let client =
        BackplaneClient::new(ClientConfig::new("demo", "key123").base_url(server.url())).unwrap();
    (server, client)
}

#[tokio::test]
async fn auth_session_is_shared_across_accessor_calls() {
    let (server, client) = setup().await;
    server.on(
        "POST",
        "/v1/projects/demo/auth/signin",
        StubResponse::json(200, session_json()),
    );
    server.on(
        "GET",
        "/v1/projects/demo/auth/user",
        StubResponse::json(200, session_json()["user"].clone()),
    );

    client.auth().sign_in("a@b.com", "pw").await.unwrap();
    assert_eq!(client.auth().state().await, AuthState::Authenticated);

    let clone = client.clone();
    let me = clone.auth().get_profile().await.unwrap();
    assert_eq!(me.id, "user-1");
    assert_eq!(
        server.last_request().unwrap().header("authorization"),
        Some("Bearer user-token")
    );
}

#[tokio::test]
async fn resource_clients_share_configuration() {
    let (server, client) = setup().await;
    server.on(
        "GET",
        "/v1/projects/demo/database/tables/todos/rows",
        StubResponse::json(200, json!([{"id": 1}])),
    );
    server.on("GET", "/v1/projects/demo/env", StubResponse::json(200, json!([])));
    server.on("GET", "/v1/projects/demo/functions", StubResponse::json(200, json!([])));
    server.on("GET", "/v1/projects/demo/logs", StubResponse::json(200, json!([])));
    server.on("GET", "/v1/projects/demo/storage/buckets", StubResponse::json(200, json!([])));

    let rows = client.from("todos").limit(1).select().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(client.env().list().await.unwrap().is_empty());
    assert!(client.functions().list().await.unwrap().is_empty());
    assert!(client.logs().query(&LogQuery::new()).await.unwrap().is_empty());
    assert!(client.storage().list_buckets().await.unwrap().is_empty());

    let requests = server.requests();
    assert_eq!(requests.len(), 5);
    for req in requests {
        assert_eq!(req.header("authorization"), Some("Bearer key123"), "{}", req.path);
    }
}

#[test]
fn construction_fails_fast() {
    assert!(matches!(
        BackplaneClient::new(ClientConfig::new("", "key")),
        Err(ConfigError::MissingProject)
    ));
    assert!(matches!(
        BackplaneClient::new(ClientConfig::new("demo", " ")),
        Err(ConfigError::MissingApiKey)
    ));
    assert!(matches!(
        BackplaneClient::new(ClientConfig::new("demo", "key").base_url("not a url")),
        Err(ConfigError::InvalidBaseUrl(_))
    ));
    assert!(matches!(
        BackplaneClient::new(ClientConfig::new("demo", "bad\nkey")),
        Err(ConfigError::InvalidHeader(_))
    ));
}

#[test]
fn accessors_expose_configuration() {
    let client = BackplaneClient::new(ClientConfig::new("demo", "key").timeout_ms(1500)).unwrap();
    assert_eq!(client.config().project, "demo");
    assert_eq!(client.config().timeout.as_millis(), 1500);
    assert_eq!(client.database().from("todos").table(), "todos");
    assert_eq!(
        client.storage().from("avatars").get_public_url("a.png"),
        format!("{}/v1/projects/demo/storage/buckets/avatars/public/a.png", backplane::DEFAULT_BASE_URL)
    );
}
