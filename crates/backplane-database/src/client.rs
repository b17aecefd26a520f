use backplane_core::{encode_segment, with_query, ApiResult, RequestOptions, Row, Transport};
use serde_json::{json, Value as JsonValue};
use tracing::debug;

use crate::builder::QueryBuilder;
use crate::types::{OneOrMany, QueryState, RowSet, TableName};

/// Client for table rows and SQL at `/v1/projects/{project}/database/...`.
///
/// SQL text is forwarded verbatim; bulk operations send every item in one
/// request and leave atomicity to the service.
#[derive(Debug, Clone)]
pub struct DatabaseClient {
    transport: Transport,
}

impl DatabaseClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Start a fluent query on `table`.
    ///
    /// Mirrors `client.from('table')`.
    pub fn from(&self, table: &str) -> QueryBuilder {
        QueryBuilder::new(self.clone(), table)
    }

    /// Names of the project's tables.
    pub async fn list_tables(&self) -> ApiResult<Vec<String>> {
        let names: Vec<TableName> = self
            .transport
            .request(&self.path("tables"), RequestOptions::get())
            .await?;
        Ok(names.into_iter().map(String::from).collect())
    }

    /// Read rows with the given pagination and ordering.
    pub async fn select(&self, table: &str, state: &QueryState) -> ApiResult<RowSet> {
        let path = with_query(&self.rows_path(table), state.query_pairs());
        debug!(table, ?state, "Selecting rows");
        self.transport.request(&path, RequestOptions::get()).await
    }

    /// Insert rows in a single batched request.
    pub async fn insert(&self, table: &str, rows: Vec<Row>) -> ApiResult<Vec<Row>> {
        let body = JsonValue::Array(rows.into_iter().map(JsonValue::from).collect());
        let inserted: OneOrMany = self
            .transport
            .request(&self.rows_path(table), RequestOptions::post().json(body))
            .await?;
        Ok(inserted.into())
    }

    /// Update the row identified by `id`.
    pub async fn update(&self, table: &str, id: &str, values: Row) -> ApiResult<Row> {
        let path = format!("{}/{}", self.rows_path(table), encode_segment(id));
        self.transport
            .request(&path, RequestOptions::patch().json(values.into()))
            .await
    }

    /// Delete the row identified by `id`.
    pub async fn delete(&self, table: &str, id: &str) -> ApiResult<()> {
        let path = format!("{}/{}", self.rows_path(table), encode_segment(id));
        self.transport.send(&path, RequestOptions::delete()).await?;
        Ok(())
    }

    /// Delete several rows in one request.
    pub async fn delete_many<I>(&self, table: &str, ids: impl IntoIterator<Item = I>) -> ApiResult<()>
    where
        I: Into<JsonValue>,
    {
        let ids: Vec<JsonValue> = ids.into_iter().map(Into::into).collect();
        self.transport
            .send(
                &self.rows_path(table),
                RequestOptions::delete().json(json!({ "ids": ids })),
            )
            .await?;
        Ok(())
    }

    /// Run a SQL statement on the service. The text is not inspected.
    pub async fn execute_sql(&self, query: &str, params: Vec<JsonValue>) -> ApiResult<RowSet> {
        let body = json!({
            "query": query,
            "params": params,
        });
        self.transport
            .request(&self.path("sql"), RequestOptions::post().json(body))
            .await
    }

    fn path(&self, endpoint: &str) -> String {
        self.transport.project_path(&format!("database/{endpoint}"))
    }

    pub(crate) fn rows_path(&self, table: &str) -> String {
        self.path(&format!("tables/{}/rows", encode_segment(table)))
    }
}
