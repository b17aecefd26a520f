use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A project environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    /// May be masked by the platform for secret values.
    #[serde(default)]
    pub value: String,
}

impl EnvVar {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for EnvVar {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Variable listings come back bare, wrapped in `variables` / `data`, or as
/// a plain `{ key: value }` object.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum EnvList {
    List(Vec<EnvVar>),
    Wrapped {
        #[serde(alias = "data")]
        variables: Vec<EnvVar>,
    },
    Map(serde_json::Map<String, JsonValue>),
    Empty(()),
}

impl From<EnvList> for Vec<EnvVar> {
    fn from(list: EnvList) -> Self {
        match list {
            EnvList::List(vars) | EnvList::Wrapped { variables: vars } => vars,
            EnvList::Map(map) => map
                .into_iter()
                .map(|(key, value)| {
                    let value = match value {
                        JsonValue::String(s) => s,
                        other => other.to_string(),
                    };
                    EnvVar { key, value }
                })
                .collect(),
            EnvList::Empty(()) => Vec::new(),
        }
    }
}

/// The variable echoed back by a single write, if the body carries one.
pub(crate) fn echoed_var(body: JsonValue) -> Option<EnvVar> {
    match body {
        JsonValue::Object(map) if map.contains_key("key") => {
            serde_json::from_value(JsonValue::Object(map)).ok()
        }
        _ => None,
    }
}

/// Variables echoed back by a bulk write, if the body carries any.
pub(crate) fn echoed_vars(body: JsonValue) -> Option<Vec<EnvVar>> {
    let list = match body {
        JsonValue::Object(ref map) if !map.contains_key("variables") && !map.contains_key("data") => {
            return None
        }
        other => serde_json::from_value::<EnvList>(other).ok()?,
    };
    let vars: Vec<EnvVar> = list.into();
    (!vars.is_empty()).then_some(vars)
}
