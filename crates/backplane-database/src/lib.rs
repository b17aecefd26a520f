//! Backplane database client.
//!
//! Row CRUD and SQL passthrough at `/v1/projects/{project}/database/...`,
//! plus a fluent [`QueryBuilder`] for paginated, ordered reads.
//!
//! # Usage
//!
//! ```ignore
//! use backplane_database::{DatabaseClient, SortOrder};
//!
//! let db = DatabaseClient::new(transport);
//! let page = db.from("todos").order_by("id", SortOrder::Asc).limit(10).select().await?;
//! println!("{} of {}", page.len(), page.count);
//!
//! let result = db.execute_sql("select count(*) from todos", vec![]).await?;
//! ```

pub mod builder;
pub mod client;
pub mod types;

pub use builder::QueryBuilder;
pub use client::DatabaseClient;
pub use types::{QueryState, RowSet, SortOrder};
