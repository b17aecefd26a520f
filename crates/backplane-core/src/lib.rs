//! Shared runtime for the Backplane client crates: configuration, the
//! `Transport` HTTP primitive and the result envelope every operation returns.

pub mod config;
pub mod error;
pub mod response;
pub mod transport;
pub mod value;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{ApiError, ApiResult, ConfigError, INVALID_RESPONSE, NETWORK_ERROR, NO_SESSION, TIMEOUT};
pub use response::Envelope;
pub use transport::{encode_segment, with_query, HttpMethod, RequestBody, RequestOptions, Transport};
pub use value::Row;

#[doc(hidden)]
pub use serde_json as __serde_json;
