//! Attribute record for one container/release pair

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Value stored for an attribute whose extraction was attempted and failed
pub const NOT_APPLICABLE: &str = "Not applicable";

/// Flat attribute key to value mapping
///
/// Keys are kept sorted so the serialized form is stable between runs.
/// Loading accepts non-string values written by older tools: `null` becomes
/// the sentinel and other values their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    attributes: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing whatever was there
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.attributes.insert(key.to_string(), value.into());
    }

    /// Reset a key to the sentinel before an extraction attempt
    pub fn mark_not_applicable(&mut self, key: &str) {
        self.set(key, NOT_APPLICABLE);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(|s| s.as_str())
    }

    /// The value of `key` if it holds a real (non-sentinel) value
    pub fn extracted(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| *v != NOT_APPLICABLE)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attributes: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(key, value)| (key, value_text(value)))
            .collect())
    }
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => NOT_APPLICABLE.to_string(),
        other => other.to_string(),
    }
}
