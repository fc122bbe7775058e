//! The five-step authoring flow.
//!
//! [`WizardState`] is a plain value mutated only through [`Action`]s by the
//! pure [`reduce`] function. The [`Sequencer`] owns one state, runs the step
//! validators before any transition and hands complete documents to a
//! [`DocumentSink`].

pub mod sequencer;
pub mod state;
pub mod steps;

pub use sequencer::{
    DocumentSink, Sequencer, StepOutcome, SubmitOutcome, View, WizardConfig, DEFAULT_GRACE_PERIOD,
};
pub use state::{reduce, Action, WizardState};
pub use steps::{WizardStep, STEP_COUNT};
