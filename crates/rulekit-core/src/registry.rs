//! Registries mapping stable type identifiers to condition kinds and rule
//! factories
//!
//! The registry is the process-wide wiring a condition-builder application
//! performs once at startup: which condition kinds exist, which rule kinds
//! exist (with a factory to decode each from its configuration document),
//! and which extension handlers get a say in every condition's effective
//! rule-type set. Once built the registry is immutable and shared behind an
//! [`Arc`], so registration cannot race active resolution by construction.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::config::RuleConfig;
use crate::error::{ConditionError, Result};
use crate::extension::{RuleTypesEvent, RuleTypesHandler};
use crate::rule::ConditionRule;

/// Factory constructing a rule instance from its configuration document
pub type RuleFactory = Box<dyn Fn(&RuleConfig) -> Result<Box<dyn ConditionRule>> + Send + Sync>;

struct RuleTypeDef {
    label: String,
    factory: RuleFactory,
}

struct ConditionTypeDef {
    label: String,
    /// Static catalog of allowed rule types, before extension handlers run
    rule_types: Vec<String>,
}

/// Immutable registry of condition kinds, rule kinds, and extension handlers
pub struct ConditionRegistry {
    rule_types: HashMap<String, RuleTypeDef>,
    condition_types: HashMap<String, ConditionTypeDef>,
    handlers: Vec<RuleTypesHandler>,
}

impl fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionRegistry")
            .field("rule_types", &self.rule_types.keys().collect::<Vec<_>>())
            .field(
                "condition_types",
                &self.condition_types.keys().collect::<Vec<_>>(),
            )
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl ConditionRegistry {
    /// Start building a registry
    pub fn builder() -> ConditionRegistryBuilder {
        ConditionRegistryBuilder::new()
    }

    /// Whether a rule kind is registered
    pub fn has_rule_type(&self, type_id: &str) -> bool {
        self.rule_types.contains_key(type_id)
    }

    /// Whether a condition kind is registered
    pub fn has_condition_type(&self, type_id: &str) -> bool {
        self.condition_types.contains_key(type_id)
    }

    /// Human-readable label a rule kind registered itself under
    pub fn rule_type_label(&self, type_id: &str) -> Option<&str> {
        self.rule_types.get(type_id).map(|def| def.label.as_str())
    }

    /// Human-readable label a condition kind registered itself under
    pub fn condition_type_label(&self, type_id: &str) -> Option<&str> {
        self.condition_types
            .get(type_id)
            .map(|def| def.label.as_str())
    }

    /// Static catalog rule types for a condition kind, before extension
    /// handlers run
    pub fn static_rule_types(&self, condition_type: &str) -> Result<&[String]> {
        self.condition_types
            .get(condition_type)
            .map(|def| def.rule_types.as_slice())
            .ok_or_else(|| ConditionError::UnknownType(condition_type.to_string()))
    }

    /// Construct a rule instance from its configuration document
    pub fn create_rule(&self, config: &RuleConfig) -> Result<Box<dyn ConditionRule>> {
        let def = self
            .rule_types
            .get(&config.type_id)
            .ok_or_else(|| ConditionError::UnknownType(config.type_id.clone()))?;
        (def.factory)(config)
    }

    /// Resolve the effective rule types for a condition kind.
    ///
    /// Seeds a [`RuleTypesEvent`] with the kind's static catalog list and
    /// runs every registered handler over it in registration order; the
    /// event's final list is the effective set.
    pub fn resolve_rule_types(&self, condition_type: &str) -> Result<Vec<String>> {
        let static_types = self.static_rule_types(condition_type)?.to_vec();
        let mut event = RuleTypesEvent::new(condition_type, static_types);
        for handler in &self.handlers {
            handler(&mut event);
        }
        debug!(
            "resolved {} rule types for condition type {}",
            event.rule_types.len(),
            condition_type
        );
        Ok(event.rule_types)
    }
}

/// Builder for [`ConditionRegistry`]
///
/// # Example
///
/// ```rust,ignore
/// let registry = ConditionRegistry::builder()
///     .register_rule_type("app.rules.Status", "Status", StatusRule::from_config)
///     .register_condition_type(
///         "app.conditions.Entry",
///         "Entry",
///         vec!["app.rules.Status".to_string()],
///     )
///     .on_register_rule_types(|event| {
///         event.rule_types.push("plugin.rules.Extra".to_string());
///     })
///     .build();
/// ```
pub struct ConditionRegistryBuilder {
    rule_types: HashMap<String, RuleTypeDef>,
    condition_types: HashMap<String, ConditionTypeDef>,
    handlers: Vec<RuleTypesHandler>,
}

impl ConditionRegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            rule_types: HashMap::new(),
            condition_types: HashMap::new(),
            handlers: Vec::new(),
        }
    }

    /// Register a rule kind with its display label and decode factory.
    ///
    /// Registering the same type identifier again replaces the earlier
    /// definition.
    pub fn register_rule_type<F>(
        mut self,
        type_id: impl Into<String>,
        label: impl Into<String>,
        factory: F,
    ) -> Self
    where
        F: Fn(&RuleConfig) -> Result<Box<dyn ConditionRule>> + Send + Sync + 'static,
    {
        self.rule_types.insert(
            type_id.into(),
            RuleTypeDef {
                label: label.into(),
                factory: Box::new(factory),
            },
        );
        self
    }

    /// Register a condition kind with its display label and static catalog
    /// of allowed rule types
    pub fn register_condition_type(
        mut self,
        type_id: impl Into<String>,
        label: impl Into<String>,
        rule_types: Vec<String>,
    ) -> Self {
        self.condition_types.insert(
            type_id.into(),
            ConditionTypeDef {
                label: label.into(),
                rule_types,
            },
        );
        self
    }

    /// Subscribe a handler to rule-type resolution.
    ///
    /// Handlers run in registration order against every condition kind's
    /// resolution; they receive the condition type so they can scope their
    /// changes.
    pub fn on_register_rule_types<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut RuleTypesEvent) + Send + Sync + 'static,
    {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Finalize the registry. After this point no further registration is
    /// possible.
    pub fn build(self) -> Arc<ConditionRegistry> {
        Arc::new(ConditionRegistry {
            rule_types: self.rule_types,
            condition_types: self.condition_types,
            handlers: self.handlers,
        })
    }
}

impl Default for ConditionRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
