//! Backplane logs client.
//!
//! ```ignore
//! use backplane_logs::{LogLevel, LogQuery, LogsClient};
//!
//! let logs = LogsClient::new(transport);
//! let errors = logs.query(&LogQuery::new().level(LogLevel::Error).limit(20)).await?;
//! let hello = logs.function_logs("hello", &LogQuery::new()).await?;
//! ```

pub mod client;
pub mod types;

pub use client::LogsClient;
pub use types::{LogEntry, LogLevel, LogQuery};
