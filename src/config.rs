//! Construction-time wizard configuration

use serde::{Deserialize, Serialize};

use crate::draft::PolicyDraft;

/// Options fixed by the host when a wizard is opened.
///
/// The mode flags (`show_create_step`, `is_editing`) are read exactly once
/// when the step list is built; changing them afterwards has no effect on a
/// running session. `is_loading` is the only host-mutable knob, via
/// [`crate::shell::WizardShell::set_loading`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardOptions {
    /// Pre-filled draft, used for edit mode
    #[serde(default)]
    pub initial_value: PolicyDraft,
    /// External busy flag (e.g. a save-in-flight indicator from the host);
    /// disables all controls while set
    #[serde(default)]
    pub is_loading: bool,
    /// Include the "Create Policy" step at the front of the wizard
    #[serde(default)]
    pub show_create_step: bool,
    /// Editing an existing policy rather than creating a new one
    #[serde(default)]
    pub is_editing: bool,
}

impl WizardOptions {
    /// Options for creating a policy from scratch
    pub fn create() -> Self {
        Self {
            show_create_step: true,
            ..Self::default()
        }
    }

    /// Options for editing an existing policy
    pub fn edit(initial_value: PolicyDraft) -> Self {
        Self {
            initial_value,
            is_editing: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_shows_create_step() {
        let options = WizardOptions::create();
        assert!(options.show_create_step);
        assert!(!options.is_editing);
    }

    #[test]
    fn test_edit_prefills_draft() {
        let options = WizardOptions::edit(PolicyDraft::named("existing"));
        assert!(options.is_editing);
        assert_eq!(options.initial_value.name, "existing");
    }
}
