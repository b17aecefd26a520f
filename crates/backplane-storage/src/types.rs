use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A storage bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub file_size_limit: Option<i64>,
    #[serde(default)]
    pub allowed_mime_types: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Options for creating or updating a bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BucketOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mime_types: Option<Vec<String>>,
}

impl BucketOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }

    /// Maximum object size in bytes.
    pub fn file_size_limit(mut self, limit: i64) -> Self {
        self.file_size_limit = Some(limit);
        self
    }

    pub fn allowed_mime_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_mime_types = Some(types.into_iter().map(Into::into).collect());
        self
    }
}

/// A file object in a bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileObject {
    /// Object path relative to the bucket.
    #[serde(alias = "path", alias = "key")]
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default, alias = "mime_type", alias = "mimetype")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<JsonValue>,
}

/// A time-limited URL for a private object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedUrl {
    #[serde(alias = "signedURL", alias = "signedUrl", alias = "url")]
    pub signed_url: String,
    /// Lifetime in seconds, when the platform reports it.
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Listings come back bare or wrapped under a named key.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    List(Vec<T>),
    Wrapped {
        #[serde(alias = "buckets", alias = "objects", alias = "files")]
        data: Vec<T>,
    },
    Empty(()),
}

impl<T> From<Listing<T>> for Vec<T> {
    fn from(listing: Listing<T>) -> Self {
        match listing {
            Listing::List(items) | Listing::Wrapped { data: items } => items,
            Listing::Empty(()) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bucket_options_skip_unset() {
        let body = serde_json::to_value(BucketOptions::new().public(true)).unwrap();
        assert_eq!(body, json!({"public": true}));

        let body = serde_json::to_value(
            BucketOptions::new()
                .file_size_limit(1024)
                .allowed_mime_types(["image/png"]),
        )
        .unwrap();
        assert_eq!(
            body,
            json!({"file_size_limit": 1024, "allowed_mime_types": ["image/png"]})
        );
    }

    #[test]
    fn bucket_defaults_to_private() {
        let bucket: Bucket = serde_json::from_value(json!({"id": "b1", "name": "avatars"})).unwrap();
        assert!(!bucket.public);
        assert!(bucket.created_at.is_none());
    }

    #[test]
    fn file_object_accepts_path_key() {
        let file: FileObject =
            serde_json::from_value(json!({"path": "a/b.png", "size": 12, "mime_type": "image/png"}))
                .unwrap();
        assert_eq!(file.name, "a/b.png");
        assert_eq!(file.size, Some(12));
        assert_eq!(file.content_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn signed_url_aliases() {
        let url: SignedUrl =
            serde_json::from_value(json!({"signedURL": "https://x/y?token=t", "expires_in": 60}))
                .unwrap();
        assert_eq!(url.signed_url, "https://x/y?token=t");
        assert_eq!(url.expires_in, Some(60));
    }

    #[test]
    fn listing_shapes() {
        let wrapped: Vec<FileObject> =
            serde_json::from_value::<Listing<FileObject>>(json!({"objects": [{"name": "a"}]}))
                .unwrap()
                .into();
        assert_eq!(wrapped.len(), 1);

        let bare: Vec<Bucket> =
            serde_json::from_value::<Listing<Bucket>>(json!([{"id": "1", "name": "x"}]))
                .unwrap()
                .into();
        assert_eq!(bare[0].name, "x");

        let empty: Vec<Bucket> = serde_json::from_value::<Listing<Bucket>>(JsonValue::Null)
            .unwrap()
            .into();
        assert!(empty.is_empty());
    }
}
