//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Core condition error
    #[error("Condition error: {0}")]
    Condition(#[from] rulekit_core::ConditionError),

    /// YAML document error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
