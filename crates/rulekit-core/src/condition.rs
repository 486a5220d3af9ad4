//! The condition composite
//!
//! A [`Condition`] owns an ordered sequence of rules, resolves and caches
//! its effective rule-type set through the registry's extension handlers,
//! and re-validates membership on every mutation. Rule order is strictly
//! insertion order and is preserved through serialization; the composite
//! never sorts it.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::config::{ConditionConfig, RuleConfig};
use crate::error::{ConditionError, Result};
use crate::registry::ConditionRegistry;
use crate::rule::{ConditionHandle, ConditionRule};

/// Input accepted by [`Condition::set_rules`]: either an already constructed
/// rule or its configuration document
pub enum RuleInput {
    /// A constructed rule instance
    Rule(Box<dyn ConditionRule>),
    /// A rule document to decode through the registry
    Config(RuleConfig),
}

impl From<Box<dyn ConditionRule>> for RuleInput {
    fn from(rule: Box<dyn ConditionRule>) -> Self {
        RuleInput::Rule(rule)
    }
}

impl From<RuleConfig> for RuleInput {
    fn from(config: RuleConfig) -> Self {
        RuleInput::Config(config)
    }
}

/// Composite container for an ordered, validated collection of rules
pub struct Condition {
    type_id: String,
    registry: Arc<ConditionRegistry>,
    /// Effective rule types: `None` until first resolution or explicit
    /// override, then fixed for the life of the instance
    rule_types: Option<Vec<String>>,
    rules: Vec<Box<dyn ConditionRule>>,
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("type_id", &self.type_id)
            .field("rule_types", &self.rule_types)
            .field(
                "rules",
                &self.rules.iter().map(|r| r.type_id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Condition {
    /// Create an empty condition of a registered kind
    pub fn new(registry: Arc<ConditionRegistry>, type_id: impl Into<String>) -> Result<Self> {
        let type_id = type_id.into();
        if !registry.has_condition_type(&type_id) {
            return Err(ConditionError::UnknownType(type_id));
        }
        Ok(Self {
            type_id,
            registry,
            rule_types: None,
            rules: Vec::new(),
        })
    }

    /// Type identifier of this condition's kind
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// The registry this condition resolves against
    pub fn registry(&self) -> &Arc<ConditionRegistry> {
        &self.registry
    }

    /// Effective rule types for this condition.
    ///
    /// Resolved through the registry's extension handlers on the first call
    /// and cached for the life of the instance; later calls return the
    /// cached set without re-running handlers.
    pub fn rule_types(&mut self) -> Result<&[String]> {
        if self.rule_types.is_none() {
            let resolved = self.registry.resolve_rule_types(&self.type_id)?;
            self.rule_types = Some(resolved);
        }
        Ok(self.rule_types.as_deref().unwrap_or_default())
    }

    /// Override the effective rule types.
    ///
    /// A manual set always wins: it is never merged with catalog or handler
    /// output, and it replaces any previously cached resolution.
    pub fn set_rule_types(&mut self, rule_types: Vec<String>) {
        self.rule_types = Some(rule_types);
    }

    /// The rule sequence, in insertion order.
    ///
    /// This is a direct view of the condition's own storage, not a copy.
    /// Membership must only change through [`Condition::add_rule`],
    /// [`Condition::set_rules`], [`Condition::remove_rule`] and
    /// [`Condition::replace_rule`].
    pub fn rules(&self) -> &[Box<dyn ConditionRule>] {
        &self.rules
    }

    /// Find a rule by uid
    pub fn rule(&self, uid: &str) -> Option<&dyn ConditionRule> {
        self.rules
            .iter()
            .find(|rule| rule.uid() == uid)
            .map(|rule| rule.as_ref())
    }

    fn position(&self, uid: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.uid() == uid)
    }

    /// Validate a candidate rule: it must be selectable and its type must be
    /// a member of the effective rule-type set
    fn validate_rule(&mut self, rule: &dyn ConditionRule) -> Result<()> {
        if !rule.is_selectable() {
            debug!("rejecting non-selectable rule type {}", rule.type_id());
            return Err(ConditionError::InvalidRule(format!(
                "rule type {} is not selectable",
                rule.type_id()
            )));
        }
        let type_id = rule.type_id().to_string();
        let allowed = self.rule_types()?;
        if !allowed.iter().any(|t| t == &type_id) {
            debug!(
                "rejecting rule type {} not allowed for condition {}",
                type_id, self.type_id
            );
            return Err(ConditionError::InvalidRule(format!(
                "rule type {type_id} is not allowed for condition {}",
                self.type_id
            )));
        }
        Ok(())
    }

    /// Append a rule to the sequence.
    ///
    /// The rule is validated first; when validation fails the sequence is
    /// left untouched and the error is returned.
    pub fn add_rule(&mut self, mut rule: Box<dyn ConditionRule>) -> Result<()> {
        self.validate_rule(rule.as_ref())?;
        rule.set_condition(ConditionHandle::new(&self.type_id));
        self.rules.push(rule);
        Ok(())
    }

    /// Replace the whole rule sequence.
    ///
    /// Configuration-document elements are decoded through the registry
    /// first; every resulting rule is then validated. All-or-nothing: if any
    /// element fails to decode or validate, the prior sequence stays
    /// installed and the error is returned.
    pub fn set_rules(&mut self, rules: Vec<RuleInput>) -> Result<()> {
        let mut next: Vec<Box<dyn ConditionRule>> = Vec::with_capacity(rules.len());
        for input in rules {
            let rule = match input {
                RuleInput::Rule(rule) => rule,
                RuleInput::Config(config) => self.registry.create_rule(&config)?,
            };
            next.push(rule);
        }
        for rule in &next {
            self.validate_rule(rule.as_ref())?;
        }
        let handle = ConditionHandle::new(&self.type_id);
        for rule in &mut next {
            rule.set_condition(handle.clone());
        }
        self.rules = next;
        Ok(())
    }

    /// Replace the rule addressed by `uid` with `rule`, preserving its
    /// position in the sequence
    pub fn replace_rule(&mut self, uid: &str, mut rule: Box<dyn ConditionRule>) -> Result<()> {
        let pos = self
            .position(uid)
            .ok_or_else(|| ConditionError::RuleNotFound {
                uid: uid.to_string(),
            })?;
        self.validate_rule(rule.as_ref())?;
        rule.set_condition(ConditionHandle::new(&self.type_id));
        self.rules[pos] = rule;
        Ok(())
    }

    /// Remove and return the rule addressed by `uid`
    pub fn remove_rule(&mut self, uid: &str) -> Option<Box<dyn ConditionRule>> {
        let pos = self.position(uid)?;
        Some(self.rules.remove(pos))
    }

    /// Reorder the rule sequence to match `uids` exactly.
    ///
    /// Every existing rule must appear exactly once; otherwise the sequence
    /// is left untouched and an error is returned.
    pub fn reorder_rules(&mut self, uids: &[String]) -> Result<()> {
        if uids.len() != self.rules.len() {
            return Err(ConditionError::InvalidOperation(format!(
                "reorder must address every rule exactly once: got {} uids for {} rules",
                uids.len(),
                self.rules.len()
            )));
        }
        let mut order = Vec::with_capacity(uids.len());
        for uid in uids {
            let pos = self
                .position(uid)
                .ok_or_else(|| ConditionError::RuleNotFound { uid: uid.clone() })?;
            if order.contains(&pos) {
                return Err(ConditionError::InvalidOperation(format!(
                    "duplicate uid in reorder: {uid}"
                )));
            }
            order.push(pos);
        }
        let mut taken: Vec<Option<Box<dyn ConditionRule>>> =
            self.rules.drain(..).map(Some).collect();
        let mut next = Vec::with_capacity(order.len());
        for pos in order {
            if let Some(rule) = taken[pos].take() {
                next.push(rule);
            }
        }
        self.rules = next;
        Ok(())
    }

    /// Canonical configuration document for this condition, with rule
    /// documents in insertion order
    pub fn config(&self) -> Result<ConditionConfig> {
        let mut condition_rules = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            condition_rules.push(rule.config()?);
        }
        Ok(ConditionConfig {
            type_id: self.type_id.clone(),
            condition_rules,
        })
    }
}
