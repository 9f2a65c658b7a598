//! Structured change payloads in the shape the editing backend expects
//!
//! Editors describe every edit as a flat mapping with a `cmd` key naming the
//! command plus command-specific properties, e.g.
//! `{"cmd": "update_topic_property", "property_name": "name", "old_value": "A", "new_value": "B"}`.
//! [`BackendChange`] is that mapping. The change stack does not depend on it;
//! any payload type works.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the command name
pub const CMD_KEY: &str = "cmd";

/// A backend change description: string keys to arbitrary JSON values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendChange(Map<String, Value>);

impl BackendChange {
    /// Start a change for the given command
    pub fn new(cmd: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert(CMD_KEY.to_string(), Value::String(cmd.into()));
        BackendChange(map)
    }

    /// Wrap an existing mapping as-is
    pub fn from_map(map: Map<String, Value>) -> Self {
        BackendChange(map)
    }

    /// Add a property
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// The command name, if present and a string
    pub fn cmd(&self) -> Option<&str> {
        self.0.get(CMD_KEY).and_then(Value::as_str)
    }

    /// Look up a property
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Borrow the underlying mapping
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into a JSON object value
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for BackendChange {
    fn from(map: Map<String, Value>) -> Self {
        BackendChange::from_map(map)
    }
}
