//! Error types for rulekit Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum ConditionError {
    /// A type identifier does not resolve to any registered condition or
    /// rule kind
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// A rule failed selectability or rule-type-membership validation
    #[error("Invalid condition rule: {0}")]
    InvalidRule(String),

    /// An operation was issued against the composite in a way its contract
    /// does not allow
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// No rule with the given uid exists in the condition
    #[error("Rule not found: {uid}")]
    RuleNotFound { uid: String },

    /// Missing required field in a configuration document
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Configuration document (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, ConditionError>;
