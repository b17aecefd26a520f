use backplane_core::Row;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction for [`QueryState::sort_order`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pagination and ordering accumulated by a `QueryBuilder`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Query-string pairs for the fields that are set, in a fixed order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(column) = &self.sort_by {
            pairs.push(("sort_by", column.clone()));
        }
        if let Some(order) = self.sort_order {
            pairs.push(("sort_order", order.as_str().to_string()));
        }
        pairs
    }
}

/// Rows returned by a read or a SQL statement, with the total the service
/// reported (or the number of rows when it reported none).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRowSet")]
pub struct RowSet {
    pub rows: Vec<Row>,
    pub count: u64,
}

impl RowSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }
}

impl IntoIterator for RowSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Shapes the service uses for row reads: a bare array, an object wrapping
/// the rows with a count, or nothing at all.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRowSet {
    List(Vec<Row>),
    Object {
        #[serde(default, alias = "data")]
        rows: Option<Vec<Row>>,
        #[serde(default)]
        count: Option<Count>,
        #[serde(default)]
        total: Option<Count>,
        #[serde(default, alias = "rowCount")]
        row_count: Option<Count>,
    },
    Empty(()),
}

/// Counts arrive as numbers or, for bigint columns, as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Number(u64),
    Text(String),
}

impl Count {
    fn value(self) -> Option<u64> {
        match self {
            Count::Number(n) => Some(n),
            Count::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl From<RawRowSet> for RowSet {
    fn from(raw: RawRowSet) -> Self {
        let (rows, count) = match raw {
            RawRowSet::List(rows) => (rows, None),
            RawRowSet::Object {
                rows,
                count,
                total,
                row_count,
            } => {
                let count = [count, total, row_count]
                    .into_iter()
                    .flatten()
                    .find_map(Count::value);
                (rows.unwrap_or_default(), count)
            }
            RawRowSet::Empty(()) => (Vec::new(), None),
        };
        let count = count.unwrap_or(rows.len() as u64);
        Self { rows, count }
    }
}

/// Write responses may carry one row, several, or none.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany {
    Many(Vec<Row>),
    One(Row),
    Empty(()),
}

impl From<OneOrMany> for Vec<Row> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::Many(rows) => rows,
            OneOrMany::One(row) => vec![row],
            OneOrMany::Empty(()) => Vec::new(),
        }
    }
}

/// Table listings are either plain names or `{ "name": ... }` objects.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum TableName {
    Plain(String),
    Described { name: String },
}

impl From<TableName> for String {
    fn from(value: TableName) -> Self {
        match value {
            TableName::Plain(name) | TableName::Described { name } => name,
        }
    }
}
