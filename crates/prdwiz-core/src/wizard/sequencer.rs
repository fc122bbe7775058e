//! Drives the wizard through its steps: validation gates, navigation and the
//! final submission.

use std::{future::Future, time::Duration};

use log::{debug, error, info, warn};
use tokio::sync::watch;

use super::{
    state::{Action, WizardState},
    steps::WizardStep,
};
use crate::{
    error::Result,
    models::{NewDocument, PrdDocument, PrdDraft},
    notify::Notifier,
    validation::{validate_document, ValidationResult},
};

/// Delay between a successful save and the form reset.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_millis(1500);

/// Destination for submitted documents.
pub trait DocumentSink: Send + Sync {
    fn create_document(
        &self,
        document: NewDocument,
    ) -> impl Future<Output = Result<PrdDocument>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardConfig {
    pub grace_period: Duration,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }
}

/// Where the caller should go once a flow completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    DocumentList,
}

/// Result of [`Sequencer::go_next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved forward to this step
    Advanced(WizardStep),
    /// Last step passed; the draft can be submitted
    Ready,
    Rejected(ValidationResult),
}

/// Result of a submission that did not fail in persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(ValidationResult),
    Saved { document: PrdDocument, next: View },
}

/// Sets `is_submitting` for its lifetime and clears it on every exit path,
/// including a dropped future.
struct Submitting<'a> {
    state: &'a mut WizardState,
    published: &'a watch::Sender<bool>,
}

impl<'a> Submitting<'a> {
    fn begin(state: &'a mut WizardState, published: &'a watch::Sender<bool>) -> Self {
        state.dispatch(Action::SetSubmitting(true));
        published.send_replace(true);
        Self { state, published }
    }
}

impl Drop for Submitting<'_> {
    fn drop(&mut self) {
        self.state.dispatch(Action::SetSubmitting(false));
        self.published.send_replace(false);
    }
}

pub struct Sequencer<S> {
    state: WizardState,
    sink: S,
    notifier: Notifier,
    config: WizardConfig,
    submitting: watch::Sender<bool>,
}

impl<S: DocumentSink> Sequencer<S> {
    pub fn new(sink: S, notifier: Notifier) -> Self {
        Self {
            state: WizardState::default(),
            sink,
            notifier,
            config: WizardConfig::default(),
            submitting: watch::channel(false).0,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: WizardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Follows `is_submitting` while a `submit` call is awaiting the sink.
    pub fn watch_submitting(&self) -> watch::Receiver<bool> {
        self.submitting.subscribe()
    }

    /// The active step.
    pub fn step(&self) -> WizardStep {
        self.state.step().unwrap_or(WizardStep::ProjectInfo)
    }

    /// Merge edits into the draft.
    pub fn update(&mut self, partial: PrdDraft) {
        self.state.dispatch(Action::UpdateFormData(partial));
    }

    fn reject(&mut self, result: ValidationResult) -> ValidationResult {
        self.state.dispatch(Action::SetError(Some(result.joined())));
        if let Some(first) = result.first_error() {
            self.notifier.error(first);
        }
        result
    }

    /// Validate the active step and advance when it passes.
    pub fn go_next(&mut self) -> StepOutcome {
        self.state.dispatch(Action::SetError(None));

        let step = self.step();
        let result = step.validate(&self.state.form_data);
        if !result.is_valid {
            debug!("{step} rejected with {} errors", result.errors.len());
            return StepOutcome::Rejected(self.reject(result));
        }

        match WizardStep::from_index(step.index() + 1) {
            Some(next) => {
                self.state.dispatch(Action::SetStep(next.index()));
                self.notifier
                    .success(format!("Step {} completed successfully", step.index()));
                StepOutcome::Advanced(next)
            }
            None => StepOutcome::Ready,
        }
    }

    /// Step back without validating the step being left.
    pub fn go_previous(&mut self) -> WizardStep {
        self.state.dispatch(Action::SetError(None));

        let step = self.step();
        if step.index() > 1 {
            self.state.dispatch(Action::SetStep(step.index() - 1));
        }
        self.step()
    }

    /// Validate the active step and the whole draft, then persist it.
    ///
    /// Validation failures come back as [`SubmitOutcome::Rejected`] without
    /// touching the sink. A persistence failure leaves the draft intact,
    /// records the message in the error slot and is returned as `Err`. After a
    /// successful save the form is reset once the grace period has elapsed.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        self.state.dispatch(Action::SetError(None));

        let step_result = self.step().validate(&self.state.form_data);
        if !step_result.is_valid {
            warn!("Submission rejected on {}", self.step());
            return Ok(SubmitOutcome::Rejected(self.reject(step_result)));
        }
        let whole = validate_document(&self.state.form_data);
        if !whole.is_valid {
            warn!("Submission rejected: {}", whole.errors.join("; "));
            return Ok(SubmitOutcome::Rejected(self.reject(whole)));
        }

        let document = NewDocument::try_from(self.state.form_data.clone())?;
        let saved = {
            let _submitting = Submitting::begin(&mut self.state, &self.submitting);
            self.sink.create_document(document).await
        };

        match saved {
            Ok(document) => {
                info!("Submitted PRD {}", document.id);
                self.notifier.success("PRD created successfully!");
                tokio::time::sleep(self.config.grace_period).await;
                self.state.dispatch(Action::ResetForm);
                Ok(SubmitOutcome::Saved {
                    document,
                    next: View::DocumentList,
                })
            }
            Err(e) => {
                error!("Failed to save PRD: {e}");
                let message = e.to_string();
                self.state.dispatch(Action::SetError(Some(message.clone())));
                self.notifier.error(message);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
        time::Instant,
    };

    use super::*;
    use crate::{
        error::PrdError,
        fixtures::sample_draft,
        notify::{NotificationCenter, NotificationKind},
    };

    #[derive(Default)]
    struct MemorySink {
        fail: bool,
        hang: bool,
        calls: AtomicUsize,
        saved: Mutex<Vec<PrdDocument>>,
        submitting: Mutex<Option<watch::Receiver<bool>>>,
        seen_submitting: Mutex<Vec<bool>>,
    }

    impl DocumentSink for MemorySink {
        async fn create_document(&self, document: NewDocument) -> Result<PrdDocument> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let observed = self
                .submitting
                .lock()
                .unwrap()
                .as_ref()
                .map(|rx| *rx.borrow());
            if let Some(flag) = observed {
                self.seen_submitting.lock().unwrap().push(flag);
            }
            if self.hang {
                std::future::pending::<()>().await;
            }
            if self.fail {
                return Err(PrdError::Configuration {
                    message: "disk full".to_string(),
                });
            }
            let stored = document.with_id("1-acme".to_string());
            self.saved.lock().unwrap().push(stored.clone());
            Ok(stored)
        }
    }

    fn sequencer(sink: MemorySink) -> (NotificationCenter, Sequencer<MemorySink>) {
        let center = NotificationCenter::default();
        let sequencer = Sequencer::new(sink, center.notifier()).with_config(WizardConfig {
            grace_period: Duration::ZERO,
        });
        (center, sequencer)
    }

    fn messages(center: &mut NotificationCenter) -> Vec<(NotificationKind, String)> {
        center
            .pump(Instant::now())
            .into_iter()
            .map(|n| (n.kind, n.message))
            .collect()
    }

    #[test]
    fn test_go_next_blocks_on_invalid_step() {
        let (mut center, mut sequencer) = sequencer(MemorySink::default());

        let outcome = sequencer.go_next();
        assert!(matches!(outcome, StepOutcome::Rejected(ref r) if r.errors.len() == 2));
        assert_eq!(sequencer.state().current_step, 1);
        assert_eq!(
            sequencer.state().error.as_deref(),
            Some("Project name is required\nProject vision is required")
        );
        assert_eq!(
            messages(&mut center),
            vec![(NotificationKind::Error, "Project name is required".to_string())]
        );
    }

    #[test]
    fn test_walks_all_steps() {
        let (mut center, mut sequencer) = sequencer(MemorySink::default());
        sequencer.update(sample_draft("Acme"));

        for expected in 2..=5 {
            let outcome = sequencer.go_next();
            assert_eq!(
                outcome,
                StepOutcome::Advanced(WizardStep::from_index(expected).unwrap())
            );
            assert_eq!(sequencer.state().error, None);
        }
        assert_eq!(sequencer.go_next(), StepOutcome::Ready);
        assert_eq!(sequencer.state().current_step, 5);

        let notes = messages(&mut center);
        assert_eq!(notes.len(), 4);
        assert_eq!(notes[0].1, "Step 1 completed successfully");
    }

    #[test]
    fn test_go_previous_does_not_validate() {
        let (_center, mut sequencer) = sequencer(MemorySink::default());
        sequencer.update(sample_draft("Acme"));
        sequencer.go_next();
        sequencer.update(PrdDraft {
            reference_links: Some(vec![]),
            ..Default::default()
        });

        assert_eq!(sequencer.go_previous(), WizardStep::ProjectInfo);
        assert_eq!(sequencer.go_previous(), WizardStep::ProjectInfo);
        assert_eq!(sequencer.state().current_step, 1);
    }

    #[tokio::test]
    async fn test_submit_rejects_incomplete_draft_without_saving() {
        let (_center, mut sequencer) = sequencer(MemorySink::default());
        sequencer.update(PrdDraft {
            project_name: Some("Acme".to_string()),
            vision: Some("v".to_string()),
            ..Default::default()
        });

        match sequencer.submit().await.unwrap() {
            SubmitOutcome::Rejected(result) => {
                assert!(result.errors.iter().any(|e| e.contains("user story")));
            }
            other => panic!("Expected rejection, got {other:?}"),
        }
        assert_eq!(sequencer.sink.calls.load(Ordering::SeqCst), 0);
        assert!(sequencer.state().error.is_some());
    }

    #[tokio::test]
    async fn test_submit_success_resets_form() {
        let (mut center, mut sequencer) = sequencer(MemorySink::default());
        sequencer.update(sample_draft("Acme"));

        let outcome = sequencer.submit().await.unwrap();
        match outcome {
            SubmitOutcome::Saved { document, next } => {
                assert_eq!(document.project_name, "Acme");
                assert_eq!(next, View::DocumentList);
            }
            other => panic!("Expected save, got {other:?}"),
        }
        assert_eq!(sequencer.state(), &WizardState::default());
        assert_eq!(sequencer.sink.saved.lock().unwrap().len(), 1);
        assert!(messages(&mut center)
            .contains(&(NotificationKind::Success, "PRD created successfully!".to_string())));
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_draft() {
        let (mut center, mut sequencer) = sequencer(MemorySink {
            fail: true,
            ..Default::default()
        });
        sequencer.update(sample_draft("Acme"));

        let err = sequencer.submit().await.unwrap_err();
        assert!(matches!(err, PrdError::Configuration { .. }));

        let state = sequencer.state();
        assert!(!state.is_submitting);
        assert_eq!(state.form_data, sample_draft("Acme"));
        assert_eq!(state.error.as_deref(), Some("Configuration error: disk full"));
        assert!(messages(&mut center)
            .iter()
            .any(|(kind, _)| *kind == NotificationKind::Error));

        // Retrying reaches the sink again.
        let _ = sequencer.submit().await;
        assert_eq!(sequencer.sink.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_submitting_spans_the_sink_call() {
        let (_center, mut sequencer) = sequencer(MemorySink::default());
        let rx = sequencer.watch_submitting();
        *sequencer.sink.submitting.lock().unwrap() = Some(rx.clone());
        sequencer.update(sample_draft("Acme"));

        assert!(!*rx.borrow());
        sequencer.submit().await.unwrap();

        assert_eq!(*sequencer.sink.seen_submitting.lock().unwrap(), vec![true]);
        assert!(!*rx.borrow());
        assert!(!sequencer.state().is_submitting);
    }

    #[tokio::test]
    async fn test_dropped_submit_clears_submitting() {
        let (mut center, mut sequencer) = sequencer(MemorySink {
            hang: true,
            ..Default::default()
        });
        let rx = sequencer.watch_submitting();
        sequencer.update(sample_draft("Acme"));
        sequencer.go_next();

        let timed_out = tokio::time::timeout(Duration::from_millis(20), sequencer.submit()).await;
        assert!(timed_out.is_err());

        assert_eq!(sequencer.sink.calls.load(Ordering::SeqCst), 1);
        let state = sequencer.state();
        assert!(!state.is_submitting);
        assert!(!*rx.borrow());
        assert_eq!(state.form_data, sample_draft("Acme"));
        assert_eq!(state.current_step, 2);
        assert_eq!(state.error, None);
        assert!(!messages(&mut center)
            .iter()
            .any(|(_, message)| message == "PRD created successfully!"));
    }
}
