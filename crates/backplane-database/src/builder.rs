use backplane_core::{ApiResult, Row};
use serde_json::Value as JsonValue;

use crate::client::DatabaseClient;
use crate::types::{QueryState, RowSet, SortOrder};

/// Fluent query on one table, created by `DatabaseClient::from("table")`.
///
/// `page`, `limit` and `order_by` overwrite their field each time they are
/// called; nothing is sent until [`select`](Self::select). Writes go straight
/// to the [`DatabaseClient`] and ignore the accumulated state. Names and
/// values are not validated.
///
/// # Example
/// ```ignore
/// let rows = db
///     .from("todos")
///     .order_by("created_at", SortOrder::Desc)
///     .page(2)
///     .limit(20)
///     .select()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    client: DatabaseClient,
    table: String,
    state: QueryState,
}

impl QueryBuilder {
    pub fn new(client: DatabaseClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
            state: QueryState::default(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// The state that `select` will send.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Page number to read.
    pub fn page(mut self, page: u32) -> Self {
        self.state.page = Some(page);
        self
    }

    /// Maximum number of rows to return.
    pub fn limit(mut self, limit: u32) -> Self {
        self.state.limit = Some(limit);
        self
    }

    /// Order by a column.
    pub fn order_by(mut self, column: &str, order: SortOrder) -> Self {
        self.state.sort_by = Some(column.to_string());
        self.state.sort_order = Some(order);
        self
    }

    pub fn order_by_asc(self, column: &str) -> Self {
        self.order_by(column, SortOrder::Asc)
    }

    pub fn order_by_desc(self, column: &str) -> Self {
        self.order_by(column, SortOrder::Desc)
    }

    /// Execute one read with the accumulated state.
    pub async fn select(self) -> ApiResult<RowSet> {
        self.client.select(&self.table, &self.state).await
    }

    pub async fn insert(&self, rows: Vec<Row>) -> ApiResult<Vec<Row>> {
        self.client.insert(&self.table, rows).await
    }

    pub async fn update(&self, id: &str, values: Row) -> ApiResult<Row> {
        self.client.update(&self.table, id, values).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&self.table, id).await
    }

    pub async fn delete_many<I>(&self, ids: impl IntoIterator<Item = I>) -> ApiResult<()>
    where
        I: Into<JsonValue>,
    {
        self.client.delete_many(&self.table, ids).await
    }
}
