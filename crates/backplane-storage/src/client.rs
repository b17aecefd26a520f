use backplane_core::{encode_segment, ApiError, ApiResult, RequestOptions, Transport};
use tracing::debug;

use crate::bucket_api::BucketApi;
use crate::types::*;

/// Client for storage buckets at `/v1/projects/{project}/storage/...`.
///
/// # Example
/// ```ignore
/// use backplane_storage::{BucketOptions, StorageClient};
///
/// let storage = StorageClient::new(transport);
/// storage.create_bucket("avatars", BucketOptions::new().public(true)).await?;
/// let files = storage.from("avatars").list(None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct StorageClient {
    transport: Transport,
}

impl StorageClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// File operations scoped to one bucket.
    ///
    /// Mirrors `client.storage.from('bucket')`.
    pub fn from(&self, bucket: &str) -> BucketApi {
        BucketApi::new(self.clone(), bucket.to_string())
    }

    // ─── Bucket Operations ───────────────────────────────────────

    pub async fn list_buckets(&self) -> ApiResult<Vec<Bucket>> {
        let listing: Listing<Bucket> = self
            .transport
            .request(&self.buckets_path(), RequestOptions::get())
            .await?;
        Ok(listing.into())
    }

    pub async fn get_bucket(&self, id: &str) -> ApiResult<Bucket> {
        self.transport
            .request(&self.bucket_path(id), RequestOptions::get())
            .await
    }

    /// Create a bucket named `name`.
    pub async fn create_bucket(&self, name: &str, options: BucketOptions) -> ApiResult<Bucket> {
        debug!(bucket = name, "Creating bucket");
        let mut body = serde_json::to_value(&options)
            .map_err(|e| ApiError::new(format!("Invalid bucket options: {e}")))?;
        body["name"] = name.into();
        self.transport
            .request(&self.buckets_path(), RequestOptions::post().json(body))
            .await
    }

    /// Change a bucket's visibility or limits. Unset options are left as they are.
    pub async fn update_bucket(&self, id: &str, options: BucketOptions) -> ApiResult<Bucket> {
        let body = serde_json::to_value(&options)
            .map_err(|e| ApiError::new(format!("Invalid bucket options: {e}")))?;
        self.transport
            .request(&self.bucket_path(id), RequestOptions::patch().json(body))
            .await
    }

    pub async fn delete_bucket(&self, id: &str) -> ApiResult<()> {
        self.transport
            .send(&self.bucket_path(id), RequestOptions::delete())
            .await?;
        Ok(())
    }

    // ─── Internal ────────────────────────────────────────────────

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }

    fn buckets_path(&self) -> String {
        self.transport.project_path("storage/buckets")
    }

    pub(crate) fn bucket_path(&self, id: &str) -> String {
        format!("{}/{}", self.buckets_path(), encode_segment(id))
    }
}
