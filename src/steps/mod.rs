//! Step catalog and guarded navigation over it

pub mod controller;
pub mod registry;

pub use controller::{NavOutcome, NavigationController};
pub use registry::{GateKind, StepDef, StepKey};
