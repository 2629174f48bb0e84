//! Observable wizard surface composing options, registry, session and
//! navigation

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::config::WizardOptions;
use crate::draft::PolicyDraft;
use crate::error::WizardError;
use crate::hooks::WizardHooks;
use crate::session::WizardSession;
use crate::steps::controller::{NavOutcome, NavigationController};
use crate::steps::registry::StepKey;

/// Enabled/disabled state of the wizard controls, as the host should
/// render them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlState {
    /// Next: active step locally valid, nothing pending, not loading, and
    /// not on the last step
    pub next_enabled: bool,
    /// Back is hidden entirely on the first step
    pub back_visible: bool,
    /// Back is additionally disabled while a check is pending
    pub back_enabled: bool,
    /// Cancel is always available unless the host reports loading
    pub cancel_enabled: bool,
    /// Finish/Save: same rule as Next, on the last step only
    pub save_enabled: bool,
}

/// Snapshot of everything the host needs to render the wizard chrome
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    /// Wizard heading: "Create a policy" or "Edit a policy"
    pub title: &'static str,
    /// Key of the active step, selecting the step body to render
    pub step_key: StepKey,
    /// Display title of the active step
    pub step_title: &'static str,
    /// Ordered titles of all included steps, for the step indicator
    pub step_titles: Vec<&'static str>,
    /// Index of the active step within `step_titles`
    pub active_index: usize,
    /// An async check or save is in flight (show a spinner, keep controls
    /// disabled)
    pub pending: bool,
    /// Inline error to show adjacent to the offending field, if any
    pub error: Option<String>,
    pub controls: ControlState,
}

impl WizardView {
    /// Format step progress for display, e.g. `create > [details] > verify`
    pub fn format_progress(&self) -> String {
        self.step_titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                if i == self.active_index {
                    format!("[{title}]")
                } else {
                    (*title).to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

/// One wizard invocation: owns the session, exposes field edits and
/// navigation, and renders [`WizardView`] snapshots.
///
/// Cloning is cheap and shares the session, so a host can drive navigation
/// from one handle and cancel from another.
#[derive(Clone)]
pub struct WizardShell {
    session: Arc<Mutex<WizardSession>>,
    controller: NavigationController,
    is_editing: bool,
}

impl WizardShell {
    /// Open a wizard. The step list is computed here from the mode flags
    /// and stays fixed for the session.
    pub fn new(options: &WizardOptions, hooks: Arc<dyn WizardHooks>) -> Self {
        let session = Arc::new(Mutex::new(WizardSession::new(options)));
        let controller = NavigationController::new(Arc::clone(&session), hooks);
        Self {
            session,
            controller,
            is_editing: options.is_editing,
        }
    }

    /// Wizard heading derived from the editing mode flag
    pub fn title(&self) -> &'static str {
        if self.is_editing {
            "Edit a policy"
        } else {
            "Create a policy"
        }
    }

    /// Snapshot the observable state for rendering
    pub async fn view(&self) -> Result<WizardView, WizardError> {
        let session = self.session.lock().await;
        if session.closed {
            return Err(WizardError::Closed);
        }

        let step = session.active_step();
        let gate_open = session.active_valid() && !session.pending && !session.loading;
        let controls = ControlState {
            next_enabled: gate_open && !session.is_last(),
            back_visible: !session.is_first(),
            back_enabled: !session.is_first() && !session.pending && !session.loading,
            cancel_enabled: !session.loading,
            save_enabled: gate_open && session.is_last(),
        };

        Ok(WizardView {
            title: self.title(),
            step_key: step.key,
            step_title: step.title,
            step_titles: session.steps().iter().map(|s| s.title).collect(),
            active_index: session.active_index(),
            pending: session.pending,
            error: session.error.clone(),
            controls,
        })
    }

    /// Edit the policy name; recomputes the details step's validity and
    /// clears any inline error
    pub async fn set_name(&self, name: impl Into<String>) -> Result<(), WizardError> {
        let mut session = self.session.lock().await;
        if session.closed {
            return Err(WizardError::Closed);
        }
        session.set_name(name);
        Ok(())
    }

    /// Edit draft fields other than the name (description, condition,
    /// actions). Validity of the steps rendering those fields is the
    /// host's to report via [`set_step_valid`].
    ///
    /// [`set_step_valid`]: WizardShell::set_step_valid
    pub async fn update_draft(
        &self,
        edit: impl FnOnce(&mut PolicyDraft),
    ) -> Result<(), WizardError> {
        let mut session = self.session.lock().await;
        if session.closed {
            return Err(WizardError::Closed);
        }
        edit(&mut session.draft);
        session.error = None;
        Ok(())
    }

    /// Report local validity of a host-rendered step body
    pub async fn set_step_valid(&self, key: StepKey, valid: bool) -> Result<(), WizardError> {
        let mut session = self.session.lock().await;
        if session.closed {
            return Err(WizardError::Closed);
        }
        session.set_step_valid(key, valid);
        Ok(())
    }

    /// Mirror the host's external busy flag; while set, all controls are
    /// disabled independent of any pending check
    pub async fn set_loading(&self, loading: bool) -> Result<(), WizardError> {
        let mut session = self.session.lock().await;
        if session.closed {
            return Err(WizardError::Closed);
        }
        session.loading = loading;
        Ok(())
    }

    /// Current draft contents
    pub async fn draft(&self) -> Result<PolicyDraft, WizardError> {
        let session = self.session.lock().await;
        if session.closed {
            return Err(WizardError::Closed);
        }
        Ok(session.draft.clone())
    }

    /// Advance one step (see [`NavigationController::next`])
    pub async fn next(&self) -> Result<NavOutcome, WizardError> {
        self.controller.next().await
    }

    /// Go back one step (see [`NavigationController::back`])
    pub async fn back(&self) -> Result<NavOutcome, WizardError> {
        self.controller.back().await
    }

    /// Jump to an already-reached step (see [`NavigationController::go_to`])
    pub async fn go_to(&self, key: StepKey) -> Result<NavOutcome, WizardError> {
        self.controller.go_to(key).await
    }

    /// Cancel the wizard (see [`NavigationController::cancel`])
    pub async fn cancel(&self) -> Result<(), WizardError> {
        self.controller.cancel().await
    }

    /// Save from the last step (see [`NavigationController::finish`])
    pub async fn finish(&self) -> Result<NavOutcome, WizardError> {
        self.controller.finish().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_progress_marks_active() {
        let view = WizardView {
            title: "Create a policy",
            step_key: StepKey::Details,
            step_title: "Policy Details",
            step_titles: vec!["Create Policy", "Policy Details", "Verify Policy"],
            active_index: 1,
            pending: false,
            error: None,
            controls: ControlState {
                next_enabled: true,
                back_visible: true,
                back_enabled: true,
                cancel_enabled: true,
                save_enabled: false,
            },
        };
        assert_eq!(
            view.format_progress(),
            "Create Policy > [Policy Details] > Verify Policy"
        );
    }
}
