use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::ops::{Deref, DerefMut};

/// A dynamic table row: column name to JSON value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Row(pub Map<String, JsonValue>);

impl Row {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Set a column value, returning the row for chaining.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
        self.0.insert(column.into(), value.into());
        self
    }

    /// Get a typed value from a column, returning None if missing or of another type.
    pub fn get_as<T: serde::de::DeserializeOwned>(&self, column: &str) -> Option<T> {
        self.0
            .get(column)
            .and_then(|v| T::deserialize(v).ok())
    }

    pub fn into_inner(self) -> Map<String, JsonValue> {
        self.0
    }

    /// Interpret a JSON value as a row. Anything other than an object is rejected.
    pub fn from_value(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Object(map) => Some(Self(map)),
            _ => None,
        }
    }
}

impl Deref for Row {
    type Target = Map<String, JsonValue>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Row {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Row> for JsonValue {
    fn from(row: Row) -> Self {
        JsonValue::Object(row.0)
    }
}

impl<K: Into<String>, V: Into<JsonValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Build a [`Row`] from `(column, value)` pairs.
///
/// ```
/// use backplane_core::row;
/// let row = row![("title", "Write docs"), ("done", false)];
/// assert_eq!(row.len(), 2);
/// ```
#[macro_export]
macro_rules! row {
    () => {
        $crate::Row::new()
    };
    ($(($key:expr, $val:expr)),+ $(,)?) => {{
        let mut row = $crate::Row::new();
        $(
            row.set($key, $crate::__serde_json::json!($val));
        )+
        row
    }};
}
