//! Guarded step transitions over a shared wizard session.
//!
//! All operations are short critical sections on the session mutex; the
//! lock is never held across a hook await, so the host can still cancel
//! the wizard while a gate check or save is in flight. A late result is
//! then discarded by re-checking the session identity and closed flag
//! before any state is mutated.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::WizardError;
use crate::gate::{self, GateResult};
use crate::hooks::{SaveRequest, WizardHooks};
use crate::session::WizardSession;
use crate::steps::registry::StepKey;

/// Message shown when the save callback fails; the session stays open so
/// the user can retry
const SAVE_FAILURE: &str = "Saving the policy failed. Please try again.";

/// Result of one navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The active step changed to the given step
    Moved(StepKey),
    /// The draft was saved; the session is closed and the host should
    /// dismiss the wizard
    Finished,
    /// A gate check or the save rejected; the session stays on the current
    /// step with the reason recorded as inline error text
    Rejected,
    /// The request was dropped: control disabled, check already pending,
    /// or the target step is not reachable
    Ignored,
}

/// Implements `next` / `back` / `go_to` / `cancel` / `finish` over the
/// shared session, routing gated transitions through the validation gate.
#[derive(Clone)]
pub struct NavigationController {
    session: Arc<Mutex<WizardSession>>,
    hooks: Arc<dyn WizardHooks>,
}

impl NavigationController {
    pub fn new(session: Arc<Mutex<WizardSession>>, hooks: Arc<dyn WizardHooks>) -> Self {
        Self { session, hooks }
    }

    /// Move forward one step. Gated steps only advance on an admitted gate
    /// result; on the last step this is equivalent to [`finish`].
    ///
    /// Re-entrant calls while a check is pending are ignored, not queued.
    ///
    /// [`finish`]: NavigationController::finish
    pub async fn next(&self) -> Result<NavOutcome, WizardError> {
        let (sid, gate_kind, draft, was_last) = {
            let mut session = self.session.lock().await;
            if session.closed {
                return Err(WizardError::Closed);
            }
            if session.pending || session.loading || !session.active_valid() {
                debug!(
                    step = %session.active_step().key,
                    pending = session.pending,
                    "ignoring next()"
                );
                return Ok(NavOutcome::Ignored);
            }

            let step = *session.active_step();
            if step.gate.is_none() && !session.is_last() {
                session.advance();
                let reached = session.active_step().key;
                debug!(step = %reached, "advanced");
                return Ok(NavOutcome::Moved(reached));
            }

            // Gated step, or ungated last step heading into the save:
            // claim the single in-flight slot before releasing the lock.
            session.pending = true;
            session.error = None;
            (
                session.id,
                step.gate,
                session.draft.clone(),
                session.is_last(),
            )
        };

        if let Some(kind) = gate_kind {
            let result = gate::check(kind, self.hooks.as_ref(), &draft).await;

            let mut session = self.session.lock().await;
            if session.closed || session.id != sid {
                debug!(session = %sid, "discarding gate result for closed session");
                return Ok(NavOutcome::Ignored);
            }
            match result {
                GateResult::Admitted { created } => {
                    if created {
                        session.entity_created = true;
                    }
                    if !was_last {
                        session.pending = false;
                        session.advance();
                        let reached = session.active_step().key;
                        debug!(step = %reached, "gate admitted, advanced");
                        return Ok(NavOutcome::Moved(reached));
                    }
                    // Last step admitted: keep the pending slot claimed
                    // through the save below.
                }
                GateResult::Rejected { reason } => {
                    session.pending = false;
                    session.error = Some(reason);
                    return Ok(NavOutcome::Rejected);
                }
            }
        }

        // With the current catalog the last step (verify) carries a gate,
        // so the save is reached only after that gate admitted. An ungated
        // last step would drop straight through to the save here.
        self.run_save(sid).await
    }

    /// Move back one step. Never re-runs validation and never discards
    /// entered values; ignored on the first step or while a check is
    /// pending.
    pub async fn back(&self) -> Result<NavOutcome, WizardError> {
        let mut session = self.session.lock().await;
        if session.closed {
            return Err(WizardError::Closed);
        }
        if session.pending || session.loading || session.is_first() {
            return Ok(NavOutcome::Ignored);
        }
        session.retreat();
        Ok(NavOutcome::Moved(session.active_step().key))
    }

    /// Jump directly to a step, as from a step-indicator click. Permitted
    /// only to included steps at or before the highest index previously
    /// reached through validated navigation; no re-validation is run.
    pub async fn go_to(&self, key: StepKey) -> Result<NavOutcome, WizardError> {
        let mut session = self.session.lock().await;
        if session.closed {
            return Err(WizardError::Closed);
        }
        if session.pending || session.loading {
            return Ok(NavOutcome::Ignored);
        }
        let index = session
            .index_of(key)
            .ok_or(WizardError::StepNotIncluded(key))?;
        if index > session.highest_reached() || index == session.active_index() {
            return Ok(NavOutcome::Ignored);
        }
        session.jump_to(index);
        Ok(NavOutcome::Moved(key))
    }

    /// Terminate the session and notify the host. Calls no validator and
    /// no save; a gate result still in flight is discarded when it lands.
    pub async fn cancel(&self) -> Result<(), WizardError> {
        {
            let mut session = self.session.lock().await;
            if session.closed {
                return Err(WizardError::Closed);
            }
            session.closed = true;
            info!(session = %session.id, "wizard cancelled");
        }
        self.hooks.close().await;
        Ok(())
    }

    /// Commit the draft from the last step. Runs the step's gate first (the
    /// verify step gates its own exit), then the save hook. Ignored when
    /// the wizard is not on its last step.
    pub async fn finish(&self) -> Result<NavOutcome, WizardError> {
        {
            let session = self.session.lock().await;
            if session.closed {
                return Err(WizardError::Closed);
            }
            if !session.is_last() {
                return Ok(NavOutcome::Ignored);
            }
        }
        self.next().await
    }

    /// Dispatch the save hook. The caller has already claimed the pending
    /// slot under `sid`; it is released here unless the session went away
    /// in the meantime.
    async fn run_save(&self, sid: Uuid) -> Result<NavOutcome, WizardError> {
        let request = {
            let session = self.session.lock().await;
            if session.closed || session.id != sid {
                return Ok(NavOutcome::Ignored);
            }
            SaveRequest {
                draft: session.draft.clone(),
                already_created: session.entity_created,
            }
        };

        let saved = self.hooks.save(request).await;

        let mut session = self.session.lock().await;
        if session.closed || session.id != sid {
            debug!(session = %sid, "discarding save result for closed session");
            return Ok(NavOutcome::Ignored);
        }
        session.pending = false;
        match saved {
            Ok(()) => {
                session.closed = true;
                info!(session = %session.id, "policy saved, session finished");
                Ok(NavOutcome::Finished)
            }
            Err(err) => {
                warn!(error = %err, "save failed");
                session.error = Some(SAVE_FAILURE.to_string());
                Ok(NavOutcome::Rejected)
            }
        }
    }
}
