use backplane_core::{encode_segment, ApiError, ApiResult, RequestOptions, Transport};
use tracing::debug;

use crate::types::*;

/// Client for serverless functions at `/v1/projects/{project}/functions/...`.
///
/// # Example
/// ```ignore
/// use backplane_functions::{FunctionsClient, InvokeOptions};
/// use serde_json::json;
///
/// let functions = FunctionsClient::new(transport);
/// let response = functions
///     .invoke("hello", InvokeOptions::new().body(json!({"name": "World"})))
///     .await?;
/// println!("{}", response.data);
/// ```
#[derive(Debug, Clone)]
pub struct FunctionsClient {
    transport: Transport,
}

impl FunctionsClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// All functions deployed in the project.
    pub async fn list(&self) -> ApiResult<Vec<FunctionInfo>> {
        self.transport
            .request(&self.path(""), RequestOptions::get())
            .await
    }

    pub async fn get(&self, name: &str) -> ApiResult<FunctionInfo> {
        self.transport
            .request(&self.named_path(name), RequestOptions::get())
            .await
    }

    /// Create or replace a function.
    pub async fn deploy(&self, deployment: FunctionDeployment) -> ApiResult<FunctionInfo> {
        debug!(function = %deployment.name, "Deploying function");
        let body = serde_json::to_value(&deployment)
            .map_err(|e| ApiError::new(format!("Invalid deployment: {e}")))?;
        self.transport
            .request(&self.path(""), RequestOptions::post().json(body))
            .await
    }

    pub async fn delete(&self, name: &str) -> ApiResult<()> {
        self.transport
            .send(&self.named_path(name), RequestOptions::delete())
            .await?;
        Ok(())
    }

    /// Invoke a function and return its JSON output.
    ///
    /// Failures carry the status and message the platform reported.
    pub async fn invoke(&self, name: &str, options: InvokeOptions) -> ApiResult<FunctionResponse> {
        debug!(function = name, method = %options.method, "Invoking function");

        let mut request = RequestOptions::new().method(options.method);
        if let Some(body) = options.body {
            request = request.json(body);
        }
        for (key, value) in options.headers {
            request = request.header(key, value);
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let path = format!("{}/invoke", self.named_path(name));
        let data = self.transport.send(&path, request).await?;
        Ok(FunctionResponse::from_data(data))
    }

    fn path(&self, endpoint: &str) -> String {
        if endpoint.is_empty() {
            self.transport.project_path("functions")
        } else {
            self.transport.project_path(&format!("functions/{endpoint}"))
        }
    }

    fn named_path(&self, name: &str) -> String {
        self.path(&encode_segment(name))
    }
}
