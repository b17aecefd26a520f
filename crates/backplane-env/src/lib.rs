//! Backplane environment variables client.
//!
//! ```ignore
//! use backplane_env::EnvClient;
//!
//! let env = EnvClient::new(transport);
//! env.set("STRIPE_KEY", "sk_test_...").await?;
//! env.set_many([("A", "1"), ("B", "2")]).await?;
//! env.delete_many(["A", "B"]).await?;
//! ```

pub mod client;
pub mod types;

pub use client::EnvClient;
pub use types::EnvVar;
