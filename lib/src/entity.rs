use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value::{Dict, Value};

/// A single structured-data object: a dictionary of JSON-compatible values
/// that always carries a type under [`Entity::TYPE_KEY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(Dict);

impl Entity {
    pub const TYPE_KEY: &'static str = "@type";

    pub fn new<T: Into<Arc<str>>>(kind: T) -> Self {
        let mut dict = Dict::new();
        dict.insert(Entity::TYPE_KEY.into(), Value::String(kind.into()));
        Entity(dict)
    }

    /// The entity's type label.
    pub fn kind(&self) -> &str {
        self.get(Entity::TYPE_KEY)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert<K: Into<Arc<str>>, V: Into<Value>>(&mut self, key: K, value: V) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pretty-printed JSON: two-space indent, non-ASCII characters kept as is.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
