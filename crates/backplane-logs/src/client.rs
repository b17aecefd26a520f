use backplane_core::{with_query, ApiResult, RequestOptions, Transport};
use tracing::debug;

use crate::types::{LogEntry, LogPage, LogQuery};

/// Read-only client for project logs at `/v1/projects/{project}/logs`.
#[derive(Debug, Clone)]
pub struct LogsClient {
    transport: Transport,
}

impl LogsClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Entries matching `query`.
    pub async fn query(&self, query: &LogQuery) -> ApiResult<Vec<LogEntry>> {
        let path = with_query(&self.transport.project_path("logs"), query.query_pairs());
        debug!(?query, "Querying logs");
        let page: LogPage = self.transport.request(&path, RequestOptions::get()).await?;
        Ok(page.into())
    }

    /// Entries emitted by one function. Any `source` already on the query is replaced.
    pub async fn function_logs(&self, name: &str, query: &LogQuery) -> ApiResult<Vec<LogEntry>> {
        let query = query.clone().source(format!("function:{name}"));
        self.query(&query).await
    }
}
