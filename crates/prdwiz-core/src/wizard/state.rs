//! Wizard state and its reducer.

use super::steps::{WizardStep, STEP_COUNT};
use crate::models::PrdDraft;

/// State of one editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    /// 1-based step index. The reducer stores whatever it is given; the
    /// sequencer keeps it within `1..=STEP_COUNT`.
    pub current_step: usize,
    pub form_data: PrdDraft,
    /// True only while a submission is being persisted
    pub is_submitting: bool,
    /// Joined messages of the last failed gate
    pub error: Option<String>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: 1,
            form_data: PrdDraft::default(),
            is_submitting: false,
            error: None,
        }
    }
}

/// The complete set of state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetStep(usize),
    /// Shallow merge; nested groups are replaced wholesale
    UpdateFormData(PrdDraft),
    SetSubmitting(bool),
    SetError(Option<String>),
    ResetForm,
}

/// Apply one action. Total and free of side effects.
pub fn reduce(state: WizardState, action: Action) -> WizardState {
    match action {
        Action::SetStep(step) => WizardState {
            current_step: step,
            ..state
        },
        Action::UpdateFormData(partial) => {
            let mut form_data = state.form_data;
            form_data.merge(partial);
            WizardState { form_data, ..state }
        }
        Action::SetSubmitting(is_submitting) => WizardState {
            is_submitting,
            ..state
        },
        Action::SetError(error) => WizardState { error, ..state },
        Action::ResetForm => WizardState::default(),
    }
}

impl WizardState {
    /// The active step, or `None` if the index is out of range.
    pub fn step(&self) -> Option<WizardStep> {
        WizardStep::from_index(self.current_step)
    }

    /// Apply `action` in place.
    pub fn dispatch(&mut self, action: Action) {
        *self = reduce(std::mem::take(self), action);
    }

    /// Completion percentage shown by the progress bar: 0 on the first step,
    /// 100 on the last.
    pub fn progress(&self) -> u8 {
        let done = self.current_step.saturating_sub(1).min(STEP_COUNT - 1);
        // At most 100, fits in a u8.
        (done * 100 / (STEP_COUNT - 1)) as u8
    }
}
