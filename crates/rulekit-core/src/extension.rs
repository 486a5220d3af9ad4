//! Extension point for modifying a condition's allowed rule types
//!
//! Applications register handlers on the [`crate::ConditionRegistryBuilder`]
//! at startup. When a condition first resolves its effective rule types, a
//! [`RuleTypesEvent`] carrying the kind's static catalog list is passed to
//! every handler in registration order; the event's final list becomes the
//! condition's effective set.

/// Mutable event handed to rule-type registration handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTypesEvent {
    /// Type identifier of the condition being resolved
    pub condition_type: String,

    /// Working list of rule type identifiers. Handlers may append, remove,
    /// or replace entries in place.
    pub rule_types: Vec<String>,
}

impl RuleTypesEvent {
    /// Create an event seeded with a condition kind's static rule types
    pub fn new(condition_type: impl Into<String>, rule_types: Vec<String>) -> Self {
        Self {
            condition_type: condition_type.into(),
            rule_types,
        }
    }
}

/// Handler signature for rule-type registration events
pub type RuleTypesHandler = Box<dyn Fn(&mut RuleTypesEvent) + Send + Sync>;
