//! Backplane storage client.
//!
//! Buckets live at `/v1/projects/{project}/storage/buckets`; object
//! operations go through a [`BucketApi`] obtained with
//! [`StorageClient::from`].
//!
//! # Usage
//!
//! ```ignore
//! use backplane_storage::{BucketOptions, StorageClient};
//!
//! let storage = StorageClient::new(transport);
//! storage.create_bucket("avatars", BucketOptions::new().public(true)).await?;
//!
//! let avatars = storage.from("avatars");
//! avatars.upload("me.png", bytes, "image/png").await?;
//! let url = avatars.get_public_url("me.png");
//! avatars.remove(["me.png"]).await?;
//! ```

pub mod bucket_api;
pub mod client;
pub mod types;

pub use bucket_api::BucketApi;
pub use client::StorageClient;
pub use types::{Bucket, BucketOptions, FileObject, SignedUrl};
