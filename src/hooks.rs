//! Host-injected operations consumed by the wizard.
//!
//! The wizard owns no persistence. Everything that touches the outside
//! world (name-uniqueness validation, verification, save, close) goes
//! through this trait, allowing different hosts (REST backend, test
//! recorder, ...) to be used interchangeably.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::draft::PolicyDraft;

/// Outcome of the server-side name-uniqueness check.
///
/// Absence of `error` means the name was admitted. `created` indicates the
/// entity was created server-side as a side effect of validation, so a
/// later save must not create it again.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameValidation {
    #[serde(default)]
    pub created: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NameValidation {
    /// An admitting response with no side effects
    pub fn ok() -> Self {
        Self::default()
    }

    /// A rejecting response with the given reason
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            created: false,
            error: Some(reason.into()),
        }
    }
}

/// Outcome of the verify-step check; same admission rule as
/// [`NameValidation`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Payload handed to the host on finish
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRequest {
    /// The completed draft
    pub draft: PolicyDraft,
    /// True when an earlier name validation already created the entity
    /// server-side; the host should update rather than create
    pub already_created: bool,
}

/// Host operations injected at wizard construction.
///
/// All methods may be called from the wizard's async context; hooks are
/// trusted to resolve or fail in finite time (the wizard sets no timeouts
/// and never retries).
#[async_trait]
pub trait WizardHooks: Send + Sync {
    /// Validate the policy name against the external service. Called once
    /// per forward-navigation attempt out of the details step.
    async fn validate_name(&self, name: &str) -> Result<NameValidation>;

    /// Verify the draft (condition syntax, reachability, ...). Called once
    /// per forward-navigation attempt out of the verify step.
    async fn verify(&self, draft: &PolicyDraft) -> Result<VerifyResponse>;

    /// Persist the draft. Called once per `finish()`.
    async fn save(&self, request: SaveRequest) -> Result<()>;

    /// The wizard was cancelled. Never called on finish; closing after a
    /// successful save is the host's convention.
    async fn close(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation_admission() {
        assert!(NameValidation::ok().error.is_none());
        assert_eq!(
            NameValidation::rejected("duplicate").error.as_deref(),
            Some("duplicate")
        );
    }

    #[test]
    fn test_name_validation_from_wire_shape() {
        // Hosts typically deserialize the validator response straight from
        // the backend; `error` may be entirely absent.
        let admitted: NameValidation = serde_json::from_str(r#"{"created": true}"#).unwrap();
        assert!(admitted.created);
        assert!(admitted.error.is_none());

        let rejected: NameValidation =
            serde_json::from_str(r#"{"created": false, "error": "invalid name"}"#).unwrap();
        assert_eq!(rejected.error.as_deref(), Some("invalid name"));
    }
}
