//! Rust client for the Backplane backend platform.
//!
//! [`BackplaneClient`] bundles the database, auth, functions, logs, env and
//! storage clients behind one configuration. Each service is a cargo
//! feature (all enabled by default) and its crate is re-exported here.

mod client;

pub use client::BackplaneClient;

// Re-export core (always available)
pub use backplane_core::*;

#[cfg(feature = "database")]
pub use backplane_database;

#[cfg(feature = "auth")]
pub use backplane_auth;

#[cfg(feature = "functions")]
pub use backplane_functions;

#[cfg(feature = "logs")]
pub use backplane_logs;

#[cfg(feature = "env")]
pub use backplane_env;

#[cfg(feature = "storage")]
pub use backplane_storage;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use backplane::prelude::*;
/// ```
pub mod prelude {
    pub use crate::BackplaneClient;
    pub use backplane_core::{row, ApiError, ApiResult, ClientConfig, ConfigError, Envelope, Row};

    #[cfg(feature = "database")]
    pub use backplane_database::{DatabaseClient, QueryBuilder, RowSet, SortOrder};

    #[cfg(feature = "auth")]
    pub use backplane_auth::{
        AuthClient, AuthState, OtpDispatch, Session, UpdateProfileParams, User,
        VerifySignUpParams,
    };

    #[cfg(feature = "functions")]
    pub use backplane_functions::{
        FunctionDeployment, FunctionInfo, FunctionResponse, FunctionsClient, InvokeOptions,
    };

    #[cfg(feature = "logs")]
    pub use backplane_logs::{LogEntry, LogLevel, LogQuery, LogsClient};

    #[cfg(feature = "env")]
    pub use backplane_env::{EnvClient, EnvVar};

    #[cfg(feature = "storage")]
    pub use backplane_storage::{
        Bucket, BucketApi, BucketOptions, FileObject, SignedUrl, StorageClient,
    };
}
