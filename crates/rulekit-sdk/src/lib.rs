//! rulekit SDK
//!
//! High-level API for applications embedding the condition builder: wire up
//! a registry once at startup, then drive conditions through a
//! [`ConditionService`] using the operations a builder front end issues
//! (add, type switch, delete, reorder, serialize).

pub mod error;
pub mod service;

// Re-export main types
pub use error::{Result, SdkError};
pub use service::{ConditionService, RuleTypeOption};

// Re-export commonly used types from the core
pub use rulekit_core::{
    codec, Condition, ConditionConfig, ConditionError, ConditionHandle, ConditionRegistry,
    ConditionRegistryBuilder, ConditionRule, RuleConfig, RuleInput, RuleState, RuleTypesEvent,
};
