use backplane_core::{encode_segment, with_query, ApiResult, RequestOptions};
use serde_json::json;
use tracing::debug;

use crate::client::StorageClient;
use crate::types::*;

/// File operations API scoped to a specific bucket.
///
/// Created via `StorageClient::from("bucket_name")`.
///
/// # Example
/// ```ignore
/// let avatars = storage.from("avatars");
/// avatars.upload("me.png", bytes, "image/png").await?;
/// let link = avatars.create_signed_url("me.png", 3600).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BucketApi {
    client: StorageClient,
    bucket: String,
}

impl BucketApi {
    pub(crate) fn new(client: StorageClient, bucket: String) -> Self {
        Self { client, bucket }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// List objects, optionally under a folder prefix.
    pub async fn list(&self, prefix: Option<&str>) -> ApiResult<Vec<FileObject>> {
        let path = with_query(&self.objects_path(), prefix.map(|p| ("prefix", p)));
        let listing: Listing<FileObject> = self
            .client
            .transport()
            .request(&path, RequestOptions::get())
            .await?;
        Ok(listing.into())
    }

    /// Upload `data` to `path`, sent as the raw request body.
    ///
    /// Mirrors `client.storage.from('bucket').upload(path, file)`.
    pub async fn upload(&self, path: &str, data: Vec<u8>, content_type: &str) -> ApiResult<FileObject> {
        debug!(bucket = %self.bucket, path, size = data.len(), "Uploading object");
        let body = self
            .client
            .transport()
            .send(&self.object_path(path), RequestOptions::post().bytes(data, content_type))
            .await?;
        let uploaded = serde_json::from_value::<FileObject>(body).ok();
        Ok(uploaded.unwrap_or_else(|| FileObject {
            name: path.to_string(),
            id: None,
            size: None,
            content_type: Some(content_type.to_string()),
            created_at: None,
            updated_at: None,
            metadata: None,
        }))
    }

    /// Remove several objects in one request.
    pub async fn remove<I, S>(&self, paths: I) -> ApiResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        debug!(bucket = %self.bucket, count = paths.len(), "Removing objects");
        self.client
            .transport()
            .send(
                &self.objects_path(),
                RequestOptions::delete().json(json!({ "paths": paths })),
            )
            .await?;
        Ok(())
    }

    /// Create a URL granting access to `path` for `expires_in` seconds.
    pub async fn create_signed_url(&self, path: &str, expires_in: u64) -> ApiResult<SignedUrl> {
        let mut signed: SignedUrl = self
            .client
            .transport()
            .request(
                &format!("{}/sign", self.object_path(path)),
                RequestOptions::post().json(json!({ "expires_in": expires_in })),
            )
            .await?;
        signed.expires_in.get_or_insert(expires_in);
        Ok(signed)
    }

    /// Public URL of an object in a public bucket. No request is made and
    /// the object is not checked for existence.
    pub fn get_public_url(&self, path: &str) -> String {
        let transport = self.client.transport();
        let resource = format!(
            "storage/buckets/{}/public/{}",
            encode_segment(&self.bucket),
            encode_object_path(path)
        );
        transport.url(&transport.project_path(&resource))
    }

    fn objects_path(&self) -> String {
        format!("{}/objects", self.client.bucket_path(&self.bucket))
    }

    fn object_path(&self, path: &str) -> String {
        format!("{}/{}", self.objects_path(), encode_object_path(path))
    }
}

/// Encode each segment of an object path, keeping the `/` separators.
fn encode_object_path(path: &str) -> String {
    path.trim_start_matches('/')
        .split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use backplane_core::{ClientConfig, Transport};

    fn avatars() -> BucketApi {
        let config = ClientConfig::new("demo", "key").base_url("https://api.example.com/");
        StorageClient::new(Transport::new(config).unwrap()).from("avatars")
    }

    #[test]
    fn object_paths_keep_folders() {
        assert_eq!(encode_object_path("a/b c.png"), "a/b%20c.png");
        assert_eq!(encode_object_path("/top.txt"), "top.txt");
        assert_eq!(
            avatars().object_path("users/1.png"),
            "/v1/projects/demo/storage/buckets/avatars/objects/users/1.png"
        );
    }

    #[test]
    fn public_url_is_local() {
        assert_eq!(
            avatars().get_public_url("users/me.png"),
            "https://api.example.com/v1/projects/demo/storage/buckets/avatars/public/users/me.png"
        );
    }
}
