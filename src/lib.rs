//! policy-wizard — step-navigation state machine for policy create/edit
//! wizards.
//!
//! The wizard owns which step is shown, what the draft contains, how
//! forward/backward navigation is gated by validation (including an async
//! name-uniqueness check against an external service), and how the final
//! save is triggered and reported. Rendering, persistence and notification
//! are external: the host injects them through [`WizardHooks`] and renders
//! from [`WizardView`] snapshots.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use policy_wizard::{WizardOptions, WizardShell, WizardHooks};
//! # async fn open(hooks: Arc<dyn WizardHooks>) {
//! let shell = WizardShell::new(&WizardOptions::create(), hooks);
//! shell.set_name("cpu utilization").await.unwrap();
//! shell.next().await.unwrap();
//! # }
//! ```

pub mod config;
pub mod draft;
pub mod error;
pub mod gate;
pub mod hooks;
pub mod session;
pub mod shell;
pub mod steps;

pub use config::WizardOptions;
pub use draft::PolicyDraft;
pub use error::WizardError;
pub use gate::GateResult;
pub use hooks::{NameValidation, SaveRequest, VerifyResponse, WizardHooks};
pub use session::WizardSession;
pub use shell::{ControlState, WizardShell, WizardView};
pub use steps::{GateKind, NavOutcome, NavigationController, StepDef, StepKey};
