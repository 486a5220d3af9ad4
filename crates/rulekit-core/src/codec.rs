//! Conversion between condition object graphs and configuration documents
//!
//! Round-trip law: for any valid condition `c`, `decode(&registry,
//! &encode(&c)?)` produces a condition whose document equals `c`'s exactly,
//! including rule order and uids.

use std::sync::Arc;

use log::debug;

use crate::condition::{Condition, RuleInput};
use crate::config::ConditionConfig;
use crate::error::Result;
use crate::registry::ConditionRegistry;

/// Reconstruct a condition from its configuration document.
///
/// The condition kind and every rule kind must be registered; unknown type
/// identifiers and rules failing validation surface as errors, never get
/// dropped.
pub fn decode(registry: &Arc<ConditionRegistry>, config: &ConditionConfig) -> Result<Condition> {
    debug!(
        "decoding condition {} with {} rules",
        config.type_id,
        config.condition_rules.len()
    );
    let mut condition = Condition::new(Arc::clone(registry), &config.type_id)?;
    let inputs = config
        .condition_rules
        .iter()
        .cloned()
        .map(RuleInput::Config)
        .collect();
    condition.set_rules(inputs)?;
    Ok(condition)
}

/// Canonical configuration document for `condition`
pub fn encode(condition: &Condition) -> Result<ConditionConfig> {
    condition.config()
}

/// Decode a condition from a JSON document string
pub fn decode_json(registry: &Arc<ConditionRegistry>, json: &str) -> Result<Condition> {
    let config: ConditionConfig = serde_json::from_str(json)?;
    decode(registry, &config)
}

/// Encode a condition to a JSON document string
pub fn encode_json(condition: &Condition) -> Result<String> {
    Ok(serde_json::to_string(&encode(condition)?)?)
}
