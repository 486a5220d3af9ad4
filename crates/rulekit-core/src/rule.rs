//! The rule capability contract and per-instance lifecycle helpers

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::RuleConfig;
use crate::error::Result;

/// Non-owning back-reference from a rule to the condition holding it.
///
/// The handle stores the owning condition's type identifier only; it never
/// extends the condition's lifetime and is never used to mutate the
/// condition's collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionHandle {
    /// Type identifier of the owning condition
    pub condition_type: String,
}

impl ConditionHandle {
    /// Create a handle for a condition kind
    pub fn new(condition_type: impl Into<String>) -> Self {
        Self {
            condition_type: condition_type.into(),
        }
    }
}

/// Generate a fresh opaque rule uid
pub fn new_uid() -> String {
    Uuid::new_v4().to_string()
}

/// Capability contract every concrete rule type implements.
///
/// A rule is one typed, configurable unit of criteria belonging to exactly
/// one condition. Its `uid` is generated once at construction and preserved
/// across every re-serialization, so the presentation layer can keep
/// addressing the same logical rule across partial updates.
pub trait ConditionRule: std::fmt::Debug {
    /// Stable, fully-qualified type identifier of this rule kind
    fn type_id(&self) -> &str;

    /// Opaque identifier addressing this rule within its condition
    fn uid(&self) -> &str;

    /// Whether this rule kind may be chosen as a standalone rule.
    ///
    /// Base/abstract rule kinds report `false` to exclude themselves from
    /// ever being instantiated directly.
    fn is_selectable(&self) -> bool {
        true
    }

    /// Set the back-reference to the owning condition.
    ///
    /// Invoked exactly once by the composite at attach time; external
    /// callers never invoke this directly.
    fn set_condition(&mut self, handle: ConditionHandle);

    /// The owning condition, if this rule has been attached
    fn condition(&self) -> Option<&ConditionHandle>;

    /// Rule-specific configuration fields (everything except `type` and
    /// `uid`). Must be sufficient to reconstruct an equivalent rule.
    fn settings(&self) -> Result<Map<String, Value>>;

    /// Full configuration document for this rule
    fn config(&self) -> Result<RuleConfig> {
        Ok(RuleConfig {
            type_id: self.type_id().to_string(),
            uid: self.uid().to_string(),
            settings: self.settings()?,
        })
    }
}

/// Common per-instance state for concrete rule types to embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleState {
    uid: String,
    condition: Option<ConditionHandle>,
}

impl RuleState {
    /// Create state with a freshly generated uid
    pub fn new() -> Self {
        Self {
            uid: new_uid(),
            condition: None,
        }
    }

    /// Create state with an existing uid, generating one if it is empty
    pub fn with_uid(uid: impl Into<String>) -> Self {
        let uid = uid.into();
        Self {
            uid: if uid.is_empty() { new_uid() } else { uid },
            condition: None,
        }
    }

    /// The rule's uid
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Record the owning condition
    pub fn set_condition(&mut self, handle: ConditionHandle) {
        self.condition = Some(handle);
    }

    /// The owning condition, if attached
    pub fn condition(&self) -> Option<&ConditionHandle> {
        self.condition.as_ref()
    }
}

impl Default for RuleState {
    fn default() -> Self {
        Self::new()
    }
}
