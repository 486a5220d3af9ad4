//! High-level condition operations for presentation-layer callers
//!
//! The service exposes the actions a condition-builder front end issues
//! against the model: create/load a condition, add a rule of a chosen type,
//! switch a rule's type in place, delete by uid, reorder after a drag-sort,
//! and list the type-switch menu options.

use std::sync::Arc;

use tracing::debug;

use rulekit_core::{codec, Condition, ConditionConfig, ConditionError, ConditionRegistry, RuleConfig};

use crate::error::Result;

/// One entry of the type-switch menu: a rule type identifier paired with the
/// human-readable label its kind registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTypeOption {
    /// Stable rule type identifier
    pub type_id: String,
    /// Display label
    pub label: String,
}

/// Facade over a built registry
#[derive(Debug, Clone)]
pub struct ConditionService {
    registry: Arc<ConditionRegistry>,
}

impl ConditionService {
    /// Create a service over a built registry
    pub fn new(registry: Arc<ConditionRegistry>) -> Self {
        Self { registry }
    }

    /// The underlying registry
    pub fn registry(&self) -> &Arc<ConditionRegistry> {
        &self.registry
    }

    /// Create an empty condition of a registered kind
    pub fn create_condition(&self, type_id: &str) -> Result<Condition> {
        Ok(Condition::new(Arc::clone(&self.registry), type_id)?)
    }

    /// Reconstruct a condition from a JSON document string
    pub fn condition_from_json(&self, json: &str) -> Result<Condition> {
        Ok(codec::decode_json(&self.registry, json)?)
    }

    /// Reconstruct a condition from a YAML document string
    pub fn condition_from_yaml(&self, yaml: &str) -> Result<Condition> {
        let config: ConditionConfig = serde_yaml::from_str(yaml)?;
        Ok(codec::decode(&self.registry, &config)?)
    }

    /// Serialize a condition to a JSON document string
    pub fn to_json(&self, condition: &Condition) -> Result<String> {
        Ok(codec::encode_json(condition)?)
    }

    /// Serialize a condition to a YAML document string
    pub fn to_yaml(&self, condition: &Condition) -> Result<String> {
        Ok(serde_yaml::to_string(&codec::encode(condition)?)?)
    }

    /// Append a freshly constructed rule of `type_id` (the "Add a rule"
    /// action)
    pub fn add_rule_of_type(&self, condition: &mut Condition, type_id: &str) -> Result<()> {
        debug!(type_id, "adding rule");
        let rule = self.registry.create_rule(&RuleConfig::new(type_id))?;
        condition.add_rule(rule)?;
        Ok(())
    }

    /// Replace the rule at `uid` with a default instance of `new_type`,
    /// preserving its position. The replacement gets a fresh uid.
    pub fn switch_rule_type(
        &self,
        condition: &mut Condition,
        uid: &str,
        new_type: &str,
    ) -> Result<()> {
        debug!(uid, new_type, "switching rule type");
        let rule = self.registry.create_rule(&RuleConfig::new(new_type))?;
        condition.replace_rule(uid, rule)?;
        Ok(())
    }

    /// Delete the rule addressed by `uid`
    pub fn remove_rule(&self, condition: &mut Condition, uid: &str) -> Result<()> {
        debug!(uid, "removing rule");
        condition
            .remove_rule(uid)
            .ok_or_else(|| ConditionError::RuleNotFound {
                uid: uid.to_string(),
            })?;
        Ok(())
    }

    /// Reorder the rule sequence to match `uids` (issued after a drag-sort)
    pub fn reorder_rules(&self, condition: &mut Condition, uids: &[String]) -> Result<()> {
        debug!(count = uids.len(), "reordering rules");
        Ok(condition.reorder_rules(uids)?)
    }

    /// Type-switch menu options for the condition's effective rule types,
    /// sorted alphabetically by label.
    ///
    /// Sorting applies to this menu only; the stored rule sequence keeps its
    /// insertion order.
    pub fn rule_type_options(&self, condition: &mut Condition) -> Result<Vec<RuleTypeOption>> {
        let mut options: Vec<RuleTypeOption> = condition
            .rule_types()?
            .iter()
            .map(|type_id| RuleTypeOption {
                type_id: type_id.clone(),
                label: self
                    .registry
                    .rule_type_label(type_id)
                    .unwrap_or(type_id)
                    .to_string(),
            })
            .collect();
        options.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(options)
    }
}
