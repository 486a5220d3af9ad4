//! Shared condition/rule fixtures for integration tests

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use rulekit_core::config::to_settings;
use rulekit_core::{
    ConditionHandle, ConditionRegistry, ConditionRule, Result, RuleConfig, RuleState,
};

pub const ENTRY_CONDITION: &str = "demo.conditions.Entry";
pub const STATUS_RULE: &str = "demo.rules.Status";
pub const AMOUNT_RULE: &str = "demo.rules.Amount";
pub const LEGACY_RULE: &str = "demo.rules.Legacy";
pub const GROUP_RULE: &str = "demo.rules.Group";

/// Matches entries with a given status value
#[derive(Debug)]
pub struct StatusRule {
    state: RuleState,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct StatusSettings {
    #[serde(default)]
    value: String,
}

impl StatusRule {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            state: RuleState::new(),
            value: value.into(),
        }
    }

    pub fn from_config(config: &RuleConfig) -> Result<Box<dyn ConditionRule>> {
        let settings: StatusSettings = config.settings_as()?;
        Ok(Box::new(Self {
            state: RuleState::with_uid(&config.uid),
            value: settings.value,
        }))
    }
}

impl ConditionRule for StatusRule {
    fn type_id(&self) -> &str {
        STATUS_RULE
    }

    fn uid(&self) -> &str {
        self.state.uid()
    }

    fn set_condition(&mut self, handle: ConditionHandle) {
        self.state.set_condition(handle);
    }

    fn condition(&self) -> Option<&ConditionHandle> {
        self.state.condition()
    }

    fn settings(&self) -> Result<Map<String, Value>> {
        to_settings(&StatusSettings {
            value: self.value.clone(),
        })
    }
}

/// Matches entries whose amount compares against a threshold
#[derive(Debug)]
pub struct AmountRule {
    state: RuleState,
    pub operator: String,
    pub threshold: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct AmountSettings {
    #[serde(default = "default_operator")]
    operator: String,
    #[serde(default)]
    threshold: f64,
}

fn default_operator() -> String {
    ">".to_string()
}

impl AmountRule {
    pub fn new(operator: impl Into<String>, threshold: f64) -> Self {
        Self {
            state: RuleState::new(),
            operator: operator.into(),
            threshold,
        }
    }

    pub fn from_config(config: &RuleConfig) -> Result<Box<dyn ConditionRule>> {
        let settings: AmountSettings = config.settings_as()?;
        Ok(Box::new(Self {
            state: RuleState::with_uid(&config.uid),
            operator: settings.operator,
            threshold: settings.threshold,
        }))
    }
}

impl ConditionRule for AmountRule {
    fn type_id(&self) -> &str {
        AMOUNT_RULE
    }

    fn uid(&self) -> &str {
        self.state.uid()
    }

    fn set_condition(&mut self, handle: ConditionHandle) {
        self.state.set_condition(handle);
    }

    fn condition(&self) -> Option<&ConditionHandle> {
        self.state.condition()
    }

    fn settings(&self) -> Result<Map<String, Value>> {
        to_settings(&AmountSettings {
            operator: self.operator.clone(),
            threshold: self.threshold,
        })
    }
}

/// A base rule kind that may never be chosen as a standalone rule
#[derive(Debug)]
pub struct LegacyRule {
    state: RuleState,
}

impl LegacyRule {
    pub fn new() -> Self {
        Self {
            state: RuleState::new(),
        }
    }

    pub fn from_config(config: &RuleConfig) -> Result<Box<dyn ConditionRule>> {
        Ok(Box::new(Self {
            state: RuleState::with_uid(&config.uid),
        }))
    }
}

impl ConditionRule for LegacyRule {
    fn type_id(&self) -> &str {
        LEGACY_RULE
    }

    fn uid(&self) -> &str {
        self.state.uid()
    }

    fn is_selectable(&self) -> bool {
        false
    }

    fn set_condition(&mut self, handle: ConditionHandle) {
        self.state.set_condition(handle);
    }

    fn condition(&self) -> Option<&ConditionHandle> {
        self.state.condition()
    }

    fn settings(&self) -> Result<Map<String, Value>> {
        Ok(Map::new())
    }
}

/// A rule kind contributed by an extension handler, not the static catalog
#[derive(Debug)]
pub struct GroupRule {
    state: RuleState,
}

impl GroupRule {
    pub fn new() -> Self {
        Self {
            state: RuleState::new(),
        }
    }

    pub fn from_config(config: &RuleConfig) -> Result<Box<dyn ConditionRule>> {
        Ok(Box::new(Self {
            state: RuleState::with_uid(&config.uid),
        }))
    }
}

impl ConditionRule for GroupRule {
    fn type_id(&self) -> &str {
        GROUP_RULE
    }

    fn uid(&self) -> &str {
        self.state.uid()
    }

    fn set_condition(&mut self, handle: ConditionHandle) {
        self.state.set_condition(handle);
    }

    fn condition(&self) -> Option<&ConditionHandle> {
        self.state.condition()
    }

    fn settings(&self) -> Result<Map<String, Value>> {
        Ok(Map::new())
    }
}

/// Builder pre-populated with every fixture rule kind and the entry
/// condition kind. Tests chain extra registrations on top before `build()`.
pub fn registry_builder() -> rulekit_core::ConditionRegistryBuilder {
    ConditionRegistry::builder()
        .register_rule_type(STATUS_RULE, "Status", StatusRule::from_config)
        .register_rule_type(AMOUNT_RULE, "Amount", AmountRule::from_config)
        .register_rule_type(LEGACY_RULE, "Legacy", LegacyRule::from_config)
        .register_rule_type(GROUP_RULE, "Group", GroupRule::from_config)
        .register_condition_type(
            ENTRY_CONDITION,
            "Entry",
            vec![STATUS_RULE.to_string(), AMOUNT_RULE.to_string()],
        )
}

/// Registry with the fixture kinds and no extension handlers
pub fn registry() -> Arc<ConditionRegistry> {
    registry_builder().build()
}
