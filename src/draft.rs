//! Draft policy object edited incrementally across wizard steps

use serde::{Deserialize, Serialize};

/// The in-progress policy being built or edited by the wizard.
///
/// Only `name` carries wizard semantics (details-step validity and the
/// server-side uniqueness check). The remaining fields are carried for the
/// host and handed back untouched on save.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PolicyDraft {
    /// Policy name; must be non-empty (after trimming) to leave the
    /// details step, and unique server-side.
    #[serde(default)]
    pub name: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Condition expression evaluated by the host (e.g. "arch = x86_64")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub condition: String,
    /// Actions triggered when the policy fires
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    /// Whether the policy is active once saved
    #[serde(default)]
    pub is_enabled: bool,
}

impl PolicyDraft {
    /// Create a draft with just a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether the name is usable (non-empty after trimming)
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// The name with surrounding whitespace removed, as sent to the
    /// uniqueness validator
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_name_rejects_whitespace() {
        assert!(!PolicyDraft::default().has_name());
        assert!(!PolicyDraft::named("   ").has_name());
        assert!(PolicyDraft::named("cpu policy").has_name());
    }

    #[test]
    fn test_trimmed_name() {
        let draft = PolicyDraft::named("  cpu policy ");
        assert_eq!(draft.trimmed_name(), "cpu policy");
    }

    #[test]
    fn test_deserialize_partial_draft() {
        let draft: PolicyDraft = serde_json::from_str(r#"{"name": "existing"}"#).unwrap();
        assert_eq!(draft.name, "existing");
        assert!(draft.actions.is_empty());
        assert!(!draft.is_enabled);
    }
}
