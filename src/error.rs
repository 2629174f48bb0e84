//! Wizard error types
//!
//! These cover host programming errors only. Failures of the injected
//! operations (validator, save, verify) never surface here: they are caught
//! at the gate/finish boundary and converted into in-session error text so
//! the user can correct and retry.

use thiserror::Error;

use crate::steps::registry::StepKey;

/// Errors returned to the host for misuse of a wizard session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// The session was cancelled or finished; the shell should be dropped
    #[error("wizard session is closed")]
    Closed,

    /// The requested step is not part of this session's step list
    /// (e.g. jumping to the create step when `show_create_step` is false)
    #[error("step '{0}' is not included in this session")]
    StepNotIncluded(StepKey),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(WizardError::Closed.to_string(), "wizard session is closed");
        assert_eq!(
            WizardError::StepNotIncluded(StepKey::Create).to_string(),
            "step 'create' is not included in this session"
        );
    }
}
