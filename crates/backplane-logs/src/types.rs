use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
    /// Any level this client does not know about.
    #[serde(other)]
    Unknown,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(alias = "created_at")]
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Where the entry came from, e.g. `api` or `function:hello`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonValue>,
}

/// Filters for a log query. Unset fields are not sent.
///
/// # Example
/// ```
/// use backplane_logs::{LogLevel, LogQuery};
///
/// let query = LogQuery::new().level(LogLevel::Error).search("timeout").limit(50);
/// assert_eq!(query.query_pairs().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub level: Option<LogLevel>,
    pub source: Option<String>,
    pub search: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
}

impl LogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Free-text search over messages.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Only entries at or after `start`.
    pub fn start_time(mut self, start: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self
    }

    /// Only entries at or before `end`.
    pub fn end_time(mut self, end: DateTime<Utc>) -> Self {
        self.end_time = Some(end);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs for the fields that are set, in a fixed order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(level) = self.level {
            pairs.push(("level", level.as_str().to_string()));
        }
        if let Some(source) = &self.source {
            pairs.push(("source", source.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(start) = self.start_time {
            pairs.push(("start_time", start.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        if let Some(end) = self.end_time {
            pairs.push(("end_time", end.to_rfc3339_opts(SecondsFormat::Millis, true)));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Log listings come back bare or wrapped in `logs` / `data`.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum LogPage {
    List(Vec<LogEntry>),
    Wrapped {
        #[serde(alias = "data")]
        logs: Vec<LogEntry>,
    },
}

impl From<LogPage> for Vec<LogEntry> {
    fn from(page: LogPage) -> Self {
        match page {
            LogPage::List(logs) | LogPage::Wrapped { logs } => logs,
        }
    }
}
