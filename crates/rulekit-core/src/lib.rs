//! rulekit Core - Condition/rule composition model
//!
//! This crate provides the building blocks for rule-composition UIs:
//! - The [`Condition`] composite holding an ordered, validated rule sequence
//! - The [`ConditionRule`] capability contract for concrete rule types
//! - The [`ConditionRegistry`] mapping stable type identifiers to factories
//! - The extension point through which applications widen or narrow a
//!   condition's allowed rule types
//! - The configuration-document wire format and its codec

pub mod codec;
pub mod condition;
pub mod config;
pub mod error;
pub mod extension;
pub mod registry;
pub mod rule;

// Re-export commonly used types
pub use condition::{Condition, RuleInput};
pub use config::{ConditionConfig, RuleConfig};
pub use error::{ConditionError, Result};
pub use extension::RuleTypesEvent;
pub use registry::{ConditionRegistry, ConditionRegistryBuilder};
pub use rule::{ConditionHandle, ConditionRule, RuleState};
