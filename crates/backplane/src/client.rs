use backplane_core::{ClientConfig, ConfigError, Transport};
use tracing::debug;

#[cfg(feature = "auth")]
use backplane_auth::AuthClient;
#[cfg(feature = "database")]
use backplane_database::{DatabaseClient, QueryBuilder};
#[cfg(feature = "env")]
use backplane_env::EnvClient;
#[cfg(feature = "functions")]
use backplane_functions::FunctionsClient;
#[cfg(feature = "logs")]
use backplane_logs::LogsClient;
#[cfg(feature = "storage")]
use backplane_storage::StorageClient;

/// Entry point for the Backplane API.
///
/// Holds one [`Transport`] and one instance of each enabled resource
/// client built around clones of it. The accessors borrow those instances,
/// so the auth session survives across calls.
///
/// # Example
/// ```ignore
/// use backplane::prelude::*;
///
/// let client = BackplaneClient::new(ClientConfig::new("my-project", "api-key"))?;
/// client.auth().sign_in("user@example.com", "password").await?;
/// let todos = client.from("todos").limit(10).select().await?;
/// ```
#[derive(Debug, Clone)]
pub struct BackplaneClient {
    transport: Transport,
    #[cfg(feature = "database")]
    database: DatabaseClient,
    #[cfg(feature = "auth")]
    auth: AuthClient,
    #[cfg(feature = "functions")]
    functions: FunctionsClient,
    #[cfg(feature = "logs")]
    logs: LogsClient,
    #[cfg(feature = "env")]
    env: EnvClient,
    #[cfg(feature = "storage")]
    storage: StorageClient,
}

impl BackplaneClient {
    /// Build a client. Fails on an empty project or API key, an unparsable
    /// base URL, or a key that cannot be sent as a header.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let transport = Transport::new(config)?;
        debug!(project = transport.project(), "Created Backplane client");
        Ok(Self {
            #[cfg(feature = "database")]
            database: DatabaseClient::new(transport.clone()),
            #[cfg(feature = "auth")]
            auth: AuthClient::new(transport.clone()),
            #[cfg(feature = "functions")]
            functions: FunctionsClient::new(transport.clone()),
            #[cfg(feature = "logs")]
            logs: LogsClient::new(transport.clone()),
            #[cfg(feature = "env")]
            env: EnvClient::new(transport.clone()),
            #[cfg(feature = "storage")]
            storage: StorageClient::new(transport.clone()),
            transport,
        })
    }

    /// Build a client from `BACKPLANE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// The shared HTTP transport.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    #[cfg(feature = "database")]
    pub fn database(&self) -> &DatabaseClient {
        &self.database
    }

    /// Start a fluent query on `table`.
    #[cfg(feature = "database")]
    pub fn from(&self, table: &str) -> QueryBuilder {
        self.database.from(table)
    }

    #[cfg(feature = "auth")]
    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    #[cfg(feature = "functions")]
    pub fn functions(&self) -> &FunctionsClient {
        &self.functions
    }

    #[cfg(feature = "logs")]
    pub fn logs(&self) -> &LogsClient {
        &self.logs
    }

    #[cfg(feature = "env")]
    pub fn env(&self) -> &EnvClient {
        &self.env
    }

    #[cfg(feature = "storage")]
    pub fn storage(&self) -> &StorageClient {
        &self.storage
    }
}
