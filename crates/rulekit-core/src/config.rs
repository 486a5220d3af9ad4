//! Configuration document types
//!
//! The configuration document is the only externally visible structured
//! representation of a condition: a plain nested key/value document with a
//! `type` discriminator at each level. Decoding it back through
//! [`crate::codec`] must reproduce an equivalent object graph.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConditionError, Result};
use crate::rule::new_uid;

/// Serialized form of a condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionConfig {
    /// Type identifier of the condition kind
    #[serde(rename = "type")]
    pub type_id: String,

    /// Rule documents, in display/evaluation order
    #[serde(rename = "conditionRules", default)]
    pub condition_rules: Vec<RuleConfig>,
}

/// Serialized form of a single rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Type identifier of the rule kind
    #[serde(rename = "type")]
    pub type_id: String,

    /// Stable opaque id. Generated when absent so that freshly added rules
    /// can be decoded before they were ever serialized.
    #[serde(default = "new_uid")]
    pub uid: String,

    /// Rule-specific fields, opaque to the core
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl ConditionConfig {
    /// Create an empty document for a condition kind
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            condition_rules: Vec::new(),
        }
    }
}

impl RuleConfig {
    /// Create a document for a fresh rule of `type_id` with no settings
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            uid: new_uid(),
            settings: Map::new(),
        }
    }

    /// Set a rule-specific field
    pub fn with_setting(mut self, key: impl Into<String>, value: Value) -> Self {
        self.settings.insert(key.into(), value);
        self
    }

    /// Get a required rule-specific field
    pub fn setting(&self, field: &str) -> Result<&Value> {
        self.settings.get(field).ok_or_else(|| ConditionError::MissingField {
            field: field.to_string(),
        })
    }

    /// Deserialize the rule-specific fields into a typed settings struct
    pub fn settings_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.settings.clone()))?)
    }
}

/// Serialize a typed settings struct into the flattened settings map
pub fn to_settings<T: Serialize>(settings: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(settings)? {
        Value::Object(map) => Ok(map),
        other => Err(ConditionError::InvalidOperation(format!(
            "rule settings must serialize to an object, got {other}"
        ))),
    }
}
