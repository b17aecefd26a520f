use backplane_core::{encode_segment, ApiResult, RequestOptions, Transport};
use serde_json::json;
use tracing::debug;

use crate::types::{echoed_var, echoed_vars, EnvList, EnvVar};

/// Client for project environment variables at `/v1/projects/{project}/env`.
///
/// Values are plain strings; the platform decides which ones are secret.
#[derive(Debug, Clone)]
pub struct EnvClient {
    transport: Transport,
}

impl EnvClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> ApiResult<Vec<EnvVar>> {
        let list: EnvList = self
            .transport
            .request(&self.path(), RequestOptions::get())
            .await?;
        Ok(list.into())
    }

    pub async fn get(&self, key: &str) -> ApiResult<EnvVar> {
        self.transport
            .request(&self.key_path(key), RequestOptions::get())
            .await
    }

    /// Create or overwrite one variable.
    ///
    /// When the platform acknowledges without echoing the variable, the
    /// value that was sent is returned.
    pub async fn set(&self, key: &str, value: &str) -> ApiResult<EnvVar> {
        debug!(key, "Setting environment variable");
        let body = self
            .transport
            .send(
                &self.key_path(key),
                RequestOptions::put().json(json!({ "value": value })),
            )
            .await?;
        Ok(echoed_var(body).unwrap_or_else(|| EnvVar::new(key, value)))
    }

    /// Create or overwrite several variables in one request.
    ///
    /// Returns the variables the platform echoed, or the ones sent.
    pub async fn set_many<I>(&self, vars: I) -> ApiResult<Vec<EnvVar>>
    where
        I: IntoIterator,
        I::Item: Into<EnvVar>,
    {
        let vars: Vec<EnvVar> = vars.into_iter().map(Into::into).collect();
        debug!(count = vars.len(), "Setting environment variables");
        let body = self
            .transport
            .send(
                &self.path(),
                RequestOptions::put().json(json!({ "variables": &vars })),
            )
            .await?;
        Ok(echoed_vars(body).unwrap_or(vars))
    }

    pub async fn delete(&self, key: &str) -> ApiResult<()> {
        self.transport
            .send(&self.key_path(key), RequestOptions::delete())
            .await?;
        Ok(())
    }

    /// Delete several variables in one request.
    pub async fn delete_many<I, S>(&self, keys: I) -> ApiResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        self.transport
            .send(&self.path(), RequestOptions::delete().json(json!({ "keys": keys })))
            .await?;
        Ok(())
    }

    fn path(&self) -> String {
        self.transport.project_path("env")
    }

    fn key_path(&self, key: &str) -> String {
        format!("{}/{}", self.path(), encode_segment(key))
    }
}
