//! Storage client against an in-process stub server.
//!
//! Run with: cargo test -p backplane-storage --test integration

use backplane_core::{ClientConfig, Transport};
use backplane_storage::{BucketOptions, StorageClient};
use backplane_stub::{StubResponse, StubServer};
use serde_json::json;

const BUCKETS: &str = "/v1/projects/demo/storage/buckets";

async fn setup() -> (StubServer, StorageClient) {
    let server = StubServer::start().await.expect("stub server");
    let transport =
        Transport::new(ClientConfig::new("demo", "key123").base_url(server.url())).unwrap();
    (server, StorageClient::new(transport))
}

#[tokio::test]
async fn bucket_lifecycle() {
    let (server, storage) = setup().await;
    server.on(
        "POST",
        BUCKETS,
        StubResponse::json(201, json!({"id": "b1", "name": "avatars", "public": true})),
    );
    server.on(
        "GET",
        BUCKETS,
        StubResponse::json(200, json!({"buckets": [{"id": "b1", "name": "avatars", "public": true}]})),
    );
    server.on(
        "GET",
        &format!("{BUCKETS}/b1"),
        StubResponse::json(200, json!({"id": "b1", "name": "avatars"})),
    );
    server.on("DELETE", &format!("{BUCKETS}/b1"), StubResponse::empty(204));

    let created = storage
        .create_bucket("avatars", BucketOptions::new().public(true))
        .await
        .unwrap();
    assert!(created.public);
    assert_eq!(
        server.last_request().unwrap().json(),
        json!({"name": "avatars", "public": true})
    );

    let buckets = storage.list_buckets().await.unwrap();
    assert_eq!(buckets.len(), 1);
    assert_eq!(storage.get_bucket("b1").await.unwrap().name, "avatars");
    storage.delete_bucket("b1").await.unwrap();
    assert_eq!(server.hits(), 4);
}

#[tokio::test]
async fn upload_sends_raw_bytes() {
    let (server, storage) = setup().await;
    server.on(
        "POST",
        &format!("{BUCKETS}/avatars/objects/users/me.png"),
        StubResponse::json(200, json!({"path": "users/me.png", "id": "o1", "size": 4})),
    );

    let file = storage
        .from("avatars")
        .upload("users/me.png", vec![0x89, b'P', b'N', b'G'], "image/png")
        .await
        .unwrap();
    assert_eq!(file.name, "users/me.png");
    assert_eq!(file.id.as_deref(), Some("o1"));

    let req = server.last_request().unwrap();
    assert_eq!(req.body, vec![0x89, b'P', b'N', b'G']);
    assert_eq!(req.header("content-type"), Some("image/png"));
    assert_eq!(req.header("authorization"), Some("Bearer key123"));
}

#[tokio::test]
async fn upload_acknowledged_without_echo_reports_sent_object() {
    let (server, storage) = setup().await;
    let route = format!("{BUCKETS}/docs/objects/a.txt");
    let docs = storage.from("docs");

    for ack in [
        StubResponse::json(200, json!({"success": true})),
        StubResponse::json(200, json!({"Key": "docs/a.txt"})),
        StubResponse::empty(201),
    ] {
        server.on("POST", &route, ack);
        let file = docs.upload("a.txt", b"hi".to_vec(), "text/plain").await.unwrap();
        assert_eq!(file.name, "a.txt");
        assert_eq!(file.content_type.as_deref(), Some("text/plain"));
        assert_eq!(file.id, None);
    }
    assert_eq!(server.hits(), 3);
}

#[tokio::test]
async fn list_with_prefix() {
    let (server, storage) = setup().await;
    server.on(
        "GET",
        &format!("{BUCKETS}/avatars/objects"),
        StubResponse::json(200, json!([{"name": "users/a.png"}, {"name": "users/b.png"}])),
    );

    let files = storage.from("avatars").list(Some("users/")).await.unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(
        server.last_request().unwrap().query_param("prefix").as_deref(),
        Some("users%2F")
    );

    storage.from("avatars").list(None).await.unwrap();
    assert_eq!(server.last_request().unwrap().query, None);
}

#[tokio::test]
async fn remove_is_one_batched_request() {
    let (server, storage) = setup().await;
    server.on("DELETE", &format!("{BUCKETS}/avatars/objects"), StubResponse::json(200, json!([])));

    storage
        .from("avatars")
        .remove(["a.png", "b.png", "c.png"])
        .await
        .unwrap();
    assert_eq!(server.hits(), 1);
    assert_eq!(
        server.last_request().unwrap().json(),
        json!({"paths": ["a.png", "b.png", "c.png"]})
    );
}

#[tokio::test]
async fn signed_url() {
    let (server, storage) = setup().await;
    server.on(
        "POST",
        &format!("{BUCKETS}/private/objects/doc.pdf/sign"),
        StubResponse::json(200, json!({"signedUrl": "https://cdn.example.com/doc.pdf?token=abc"})),
    );

    let signed = storage
        .from("private")
        .create_signed_url("doc.pdf", 600)
        .await
        .unwrap();
    assert_eq!(signed.signed_url, "https://cdn.example.com/doc.pdf?token=abc");
    assert_eq!(signed.expires_in, Some(600));
    assert_eq!(server.last_request().unwrap().json(), json!({"expires_in": 600}));
}

#[tokio::test]
async fn public_url_makes_no_request() {
    let (server, storage) = setup().await;

    let url = storage.from("avatars").get_public_url("me.png");
    assert_eq!(
        url,
        format!("{}{BUCKETS}/avatars/public/me.png", server.url())
    );
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn missing_bucket_passes_through() {
    let (server, storage) = setup().await;
    server.on(
        "GET",
        &format!("{BUCKETS}/nope"),
        StubResponse::json(404, json!({"message": "Bucket not found", "statusCode": 404})),
    );

    let err = storage.get_bucket("nope").await.unwrap_err();
    assert_eq!(err.message, "Bucket not found");
    assert_eq!(err.code(), Some("404"));
    assert_eq!(err.status, Some(404));
}

#[tokio::test]
async fn update_bucket_sends_only_set_options() {
    let (server, storage) = setup().await;
    server.on(
        "PATCH",
        &format!("{BUCKETS}/avatars"),
        StubResponse::json(200, json!({"id": "avatars", "name": "avatars", "file_size_limit": 2048})),
    );

    let bucket = storage
        .update_bucket("avatars", BucketOptions::new().file_size_limit(2048))
        .await
        .unwrap();
    assert_eq!(bucket.file_size_limit, Some(2048));
    assert_eq!(
        server.last_request().unwrap().json(),
        json!({"file_size_limit": 2048})
    );
}
