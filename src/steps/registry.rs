//! Static catalog of wizard steps and per-session step list construction

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::WizardOptions;

/// Stable identity of a wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKey {
    /// Initial create-mode choice ("Create Policy")
    Create,
    /// Name and description ("Policy Details")
    Details,
    /// Final verification and save ("Verify Policy")
    Verify,
}

impl StepKey {
    /// Stable string form used in logs and serialized views
    pub fn as_str(self) -> &'static str {
        match self {
            StepKey::Create => "create",
            StepKey::Details => "details",
            StepKey::Verify => "verify",
        }
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asynchronous precondition guarding forward navigation out of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    /// Server-side name-uniqueness check (`WizardHooks::validate_name`)
    ValidateName,
    /// Draft verification (`WizardHooks::verify`)
    Verify,
}

/// One step of the wizard, immutable once the session list is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDef {
    pub key: StepKey,
    /// Display title shown as the step heading
    pub title: &'static str,
    /// Async gate run before leaving this step forward, if any
    pub gate: Option<GateKind>,
}

/// Catalog entry: a step definition plus its inclusion predicate.
/// Predicates are total functions of the mode flags.
struct CatalogEntry {
    def: StepDef,
    included: fn(&WizardOptions) -> bool,
}

/// Ordered catalog of every step the wizard knows about. The details step
/// is the unconditional fallback keeping the built list non-empty.
static CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        def: StepDef {
            key: StepKey::Create,
            title: "Create Policy",
            gate: None,
        },
        included: |options| options.show_create_step,
    },
    CatalogEntry {
        def: StepDef {
            key: StepKey::Details,
            title: "Policy Details",
            gate: Some(GateKind::ValidateName),
        },
        included: |_| true,
    },
    CatalogEntry {
        def: StepDef {
            key: StepKey::Verify,
            title: "Verify Policy",
            gate: Some(GateKind::Verify),
        },
        included: |_| true,
    },
];

/// Build the ordered, filtered step list for one session. Evaluated exactly
/// once per wizard invocation; the result is treated as immutable.
pub fn build_steps(options: &WizardOptions) -> Vec<StepDef> {
    let steps: Vec<StepDef> = CATALOG
        .iter()
        .filter(|entry| (entry.included)(options))
        .map(|entry| entry.def)
        .collect();

    debug_assert!(validate(&steps).is_ok());
    steps
}

/// Check the step-list invariants: non-empty, unique keys. Returns all
/// violations found.
pub fn validate(steps: &[StepDef]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if steps.is_empty() {
        errors.push("step list is empty".to_string());
    }

    for (i, step) in steps.iter().enumerate() {
        if steps[..i].iter().any(|s| s.key == step.key) {
            errors.push(format!("duplicate step key '{}'", step.key));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(show_create_step: bool, is_editing: bool) -> WizardOptions {
        WizardOptions {
            show_create_step,
            is_editing,
            ..WizardOptions::default()
        }
    }

    #[test]
    fn test_all_mode_combinations_valid() {
        for show_create in [false, true] {
            for editing in [false, true] {
                let steps = build_steps(&options(show_create, editing));
                assert!(validate(&steps).is_ok());
                assert!(!steps.is_empty());
            }
        }
    }

    #[test]
    fn test_create_step_included_iff_flag_set() {
        let with_create = build_steps(&options(true, false));
        assert_eq!(with_create[0].key, StepKey::Create);
        assert_eq!(with_create[0].title, "Create Policy");

        let without_create = build_steps(&options(false, false));
        assert_eq!(without_create[0].key, StepKey::Details);
        assert_eq!(without_create[0].title, "Policy Details");
        assert!(without_create.iter().all(|s| s.key != StepKey::Create));
    }

    #[test]
    fn test_details_precedes_verify() {
        let steps = build_steps(&options(false, true));
        let details = steps.iter().position(|s| s.key == StepKey::Details).unwrap();
        let verify = steps.iter().position(|s| s.key == StepKey::Verify).unwrap();
        assert!(details < verify);
    }

    #[test]
    fn test_gates() {
        let steps = build_steps(&options(true, false));
        let by_key = |key| steps.iter().find(|s| s.key == key).unwrap();
        assert_eq!(by_key(StepKey::Create).gate, None);
        assert_eq!(by_key(StepKey::Details).gate, Some(GateKind::ValidateName));
        assert_eq!(by_key(StepKey::Verify).gate, Some(GateKind::Verify));
    }

    #[test]
    fn test_validate_catches_duplicates() {
        let steps = vec![
            StepDef {
                key: StepKey::Details,
                title: "Policy Details",
                gate: None,
            },
            StepDef {
                key: StepKey::Details,
                title: "Policy Details",
                gate: None,
            },
        ];
        let errors = validate(&steps).unwrap_err();
        assert!(errors[0].contains("duplicate step key 'details'"));
    }

    #[test]
    fn test_validate_catches_empty_list() {
        let errors = validate(&[]).unwrap_err();
        assert!(errors[0].contains("empty"));
    }
}
