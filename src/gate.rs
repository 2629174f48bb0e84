//! Async validation gate: the single suspension point of the wizard.
//!
//! Runs a step's external precondition (name uniqueness, verification)
//! through the injected hooks and folds every outcome — including transport
//! failure — into a [`GateResult`]. Nothing here mutates the session; the
//! caller applies the result under the staleness guard.

use tracing::{debug, warn};

use crate::draft::PolicyDraft;
use crate::hooks::WizardHooks;
use crate::steps::registry::GateKind;

/// Message shown when the external call itself fails, as opposed to the
/// validator rejecting the input
const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Outcome of an async precondition check. Created per invocation and
/// consumed immediately to decide navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateResult {
    /// Navigation may proceed. `created` reports that the entity was
    /// created server-side as a side effect of validation.
    Admitted { created: bool },
    /// Navigation stays on the current step with the given reason shown
    /// inline
    Rejected { reason: String },
}

impl GateResult {
    pub fn is_admitted(&self) -> bool {
        matches!(self, GateResult::Admitted { .. })
    }
}

/// Run one gate check against the hooks. Exactly one hook call per
/// invocation; the caller guarantees no second check is dispatched while
/// one is pending.
pub async fn check(kind: GateKind, hooks: &dyn WizardHooks, draft: &PolicyDraft) -> GateResult {
    match kind {
        GateKind::ValidateName => {
            debug!(name = draft.trimmed_name(), "dispatching name validation");
            match hooks.validate_name(draft.trimmed_name()).await {
                Ok(response) => match response.error {
                    None => GateResult::Admitted {
                        created: response.created,
                    },
                    Some(reason) => {
                        debug!(%reason, "name validation rejected");
                        GateResult::Rejected { reason }
                    }
                },
                Err(err) => {
                    warn!(error = %err, "name validation call failed");
                    GateResult::Rejected {
                        reason: GENERIC_FAILURE.to_string(),
                    }
                }
            }
        }
        GateKind::Verify => {
            debug!("dispatching draft verification");
            match hooks.verify(draft).await {
                Ok(response) => match response.error {
                    None => GateResult::Admitted { created: false },
                    Some(reason) => {
                        debug!(%reason, "verification rejected");
                        GateResult::Rejected { reason }
                    }
                },
                Err(err) => {
                    warn!(error = %err, "verification call failed");
                    GateResult::Rejected {
                        reason: GENERIC_FAILURE.to_string(),
                    }
                }
            }
        }
    }
}
