//! Mutable per-invocation wizard state

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::WizardOptions;
use crate::draft::PolicyDraft;
use crate::steps::registry::{self, StepDef, StepKey};

/// State of one wizard invocation.
///
/// Exclusively owned by a [`crate::shell::WizardShell`] for the lifetime of
/// one wizard session and discarded on cancel/finish. The `id` doubles as
/// the staleness guard: an async gate result is applied only if the session
/// it was dispatched for is still the open one.
#[derive(Debug)]
pub struct WizardSession {
    /// Session identity, compared when an async result lands
    pub id: Uuid,
    /// When the wizard was opened
    pub started_at: DateTime<Utc>,
    /// Ordered, filtered steps; non-empty with unique keys
    steps: Vec<StepDef>,
    /// Index of the active step in `steps`
    active: usize,
    /// Highest index ever reached through validated forward navigation;
    /// upper bound for direct jumps
    highest_reached: usize,
    /// The draft policy, mutated incrementally as fields are edited
    pub draft: PolicyDraft,
    /// Per-step local validity (e.g. details: name is non-empty)
    valid: HashMap<StepKey, bool>,
    /// An async gate check (or save) is in flight; at most one at a time
    pub pending: bool,
    /// The entity was created server-side as a validation side effect
    pub entity_created: bool,
    /// Inline error shown on the active step
    pub error: Option<String>,
    /// External busy flag mirrored from the host
    pub loading: bool,
    /// Mode flag captured at construction, drives the wizard title
    pub is_editing: bool,
    /// Cancelled or finished; every further operation is rejected
    pub closed: bool,
}

impl WizardSession {
    /// Build a fresh session from the host options. The step list is
    /// computed here, once, and never changes afterwards.
    pub fn new(options: &WizardOptions) -> Self {
        let steps = registry::build_steps(options);
        let draft = options.initial_value.clone();

        let mut valid = HashMap::new();
        for step in &steps {
            let initially_valid = match step.key {
                StepKey::Details => draft.has_name(),
                _ => true,
            };
            valid.insert(step.key, initially_valid);
        }

        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            steps,
            active: 0,
            highest_reached: 0,
            draft,
            valid,
            pending: false,
            entity_created: false,
            error: None,
            loading: options.is_loading,
            is_editing: options.is_editing,
            closed: false,
        }
    }

    /// The ordered step list for this session
    pub fn steps(&self) -> &[StepDef] {
        &self.steps
    }

    /// The currently shown step
    pub fn active_step(&self) -> &StepDef {
        // Invariant: `active` is always a valid index into the non-empty list
        &self.steps[self.active]
    }

    /// Index of the active step
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Highest step index reached through validated navigation
    pub fn highest_reached(&self) -> usize {
        self.highest_reached
    }

    pub fn is_first(&self) -> bool {
        self.active == 0
    }

    pub fn is_last(&self) -> bool {
        self.active + 1 == self.steps.len()
    }

    /// Local validity of the active step
    pub fn active_valid(&self) -> bool {
        self.valid.get(&self.active_step().key).copied().unwrap_or(false)
    }

    /// Position of a step in this session's list, if included
    pub fn index_of(&self, key: StepKey) -> Option<usize> {
        self.steps.iter().position(|s| s.key == key)
    }

    /// Advance to the next step after a successful validity/gate check
    pub fn advance(&mut self) {
        debug_assert!(!self.is_last());
        self.active += 1;
        self.highest_reached = self.highest_reached.max(self.active);
        self.error = None;
    }

    /// Move to the previous step; keeps all entered values and errors are
    /// cleared since they referred to the step being left
    pub fn retreat(&mut self) {
        debug_assert!(!self.is_first());
        self.active -= 1;
        self.error = None;
    }

    /// Jump directly to an already-reached step
    pub fn jump_to(&mut self, index: usize) {
        debug_assert!(index <= self.highest_reached);
        self.active = index;
        self.error = None;
    }

    /// Update the draft name: recomputes details-step validity and clears
    /// any stale inline error
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.valid.insert(StepKey::Details, self.draft.has_name());
        self.error = None;
    }

    /// Override a step's local validity (for host-rendered step bodies
    /// whose validity the wizard cannot derive itself)
    pub fn set_step_valid(&mut self, key: StepKey, valid: bool) {
        self.valid.insert(key, valid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_step_without_create() {
        let session = WizardSession::new(&WizardOptions::default());
        assert_eq!(session.active_step().key, StepKey::Details);
        assert!(session.is_first());
    }

    #[test]
    fn test_initial_step_with_create() {
        let session = WizardSession::new(&WizardOptions::create());
        assert_eq!(session.active_step().key, StepKey::Create);
    }

    #[test]
    fn test_details_validity_follows_name() {
        let mut session = WizardSession::new(&WizardOptions::default());
        assert!(!session.active_valid());

        session.set_name("cpu policy");
        assert!(session.active_valid());

        session.set_name("   ");
        assert!(!session.active_valid());
    }

    #[test]
    fn test_edit_mode_prefill_is_valid() {
        let options = WizardOptions::edit(PolicyDraft::named("existing"));
        let session = WizardSession::new(&options);
        assert!(session.active_valid());
        assert!(session.is_editing);
    }

    #[test]
    fn test_advance_tracks_highest_reached() {
        let mut session = WizardSession::new(&WizardOptions::default());
        session.advance();
        assert_eq!(session.highest_reached(), 1);

        session.retreat();
        assert_eq!(session.active_index(), 0);
        // Watermark survives moving back
        assert_eq!(session.highest_reached(), 1);
    }

    #[test]
    fn test_set_name_clears_error() {
        let mut session = WizardSession::new(&WizardOptions::default());
        session.error = Some("name already taken".to_string());
        session.set_name("another name");
        assert!(session.error.is_none());
    }
}
