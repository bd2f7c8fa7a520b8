//! Submit handling: the one listener a form has, and the guard that keeps
//! submissions from overlapping.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use log::{debug, warn};

use crate::config::FormConfig;
use crate::error::TransportError;
use crate::form::Form;
use crate::orchestrator::FormOrchestrator;
use crate::presenter::ErrorPresenter;
use crate::submit::{SubmissionOutcome, SubmissionPipeline, Transport};
use crate::validation::ValidationResult;

/// Shown when validation fails.
pub const CORRECT_ERRORS_MESSAGE: &str = "Please correct the errors in the form";

/// A submit intent, e.g. a button press.
///
/// Handlers call [`prevent_default`](Self::prevent_default) to stop the
/// platform's own full-page submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    /// Creates a fresh event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses the default submission behavior.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler suppressed the default behavior.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// What happened to one submit intent.
#[derive(Debug)]
pub enum SubmitAttempt {
    /// A previous submission was still in flight; nothing was done.
    Ignored,
    /// Validation failed; field errors are on display.
    Invalid(ValidationResult),
    /// The endpoint answered.
    Submitted(SubmissionOutcome),
    /// The request or its decoding failed.
    Failed(TransportError),
}

impl SubmitAttempt {
    /// Returns `true` if the endpoint accepted the form.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Submitted(outcome) if outcome.success)
    }
}

/// Returns the orchestrator to `Idle` and clears the in-flight flag when the
/// attempt ends, including on cancellation.
struct InFlight<'a> {
    flag: &'a AtomicBool,
    orchestrator: &'a FormOrchestrator,
}

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool, orchestrator: &'a FormOrchestrator) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag, orchestrator })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.orchestrator.finish();
        self.flag.store(false, Ordering::Release);
    }
}

/// Runs validation and, when it passes, submission for one form.
pub struct FormController {
    orchestrator: FormOrchestrator,
    pipeline: SubmissionPipeline,
    presenter: ErrorPresenter,
    in_flight: AtomicBool,
}

impl FormController {
    /// Creates a controller from its parts.
    pub fn new(orchestrator: FormOrchestrator, pipeline: SubmissionPipeline) -> Self {
        let presenter = orchestrator.presenter().clone();
        Self {
            orchestrator,
            pipeline,
            presenter,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Wires a controller for an in-memory form.
    pub fn for_form(form: &Form, transport: impl Transport + 'static, config: &FormConfig) -> Self {
        let presenter = ErrorPresenter::new(form.clone());
        let orchestrator = FormOrchestrator::from_config(form.clone(), presenter.clone(), config);
        let pipeline = SubmissionPipeline::new(transport, config.endpoint.clone(), presenter)
            .with_timeout(config.timeout());
        Self::new(orchestrator, pipeline)
    }

    /// The orchestrator this controller validates with.
    pub fn orchestrator(&self) -> &FormOrchestrator {
        &self.orchestrator
    }

    /// Whether a submission is waiting on the network.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Handles one submit intent.
    ///
    /// The default behavior is always prevented. While an earlier submission
    /// is still in flight the intent is ignored.
    pub async fn handle_submit(&self, event: &mut SubmitEvent) -> SubmitAttempt {
        event.prevent_default();

        let Some(_guard) = InFlight::acquire(&self.in_flight, &self.orchestrator) else {
            warn!("Submit ignored: a submission is already in flight");
            return SubmitAttempt::Ignored;
        };

        let pass = self.orchestrator.validate();
        if !pass.is_valid() {
            self.presenter.show_message(CORRECT_ERRORS_MESSAGE);
            return SubmitAttempt::Invalid(pass.result);
        }

        debug!("Form valid, submitting to {}", self.pipeline.endpoint());
        match self.pipeline.submit(&pass.snapshot).await {
            Ok(outcome) => SubmitAttempt::Submitted(outcome),
            Err(e) => SubmitAttempt::Failed(e),
        }
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("orchestrator", &self.orchestrator)
            .field("pipeline", &self.pipeline)
            .field("in_flight", &self.is_submitting())
            .finish()
    }
}

/// The submit trigger of one form. Accepts exactly one listener.
#[derive(Debug, Default)]
pub struct SubmitTarget {
    listener: OnceLock<Arc<FormController>>,
}

impl SubmitTarget {
    /// Creates a trigger with no listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the form's listener. Returns `false` if one is already registered.
    pub fn add_submit_listener(&self, controller: Arc<FormController>) -> bool {
        self.listener.set(controller).is_ok()
    }

    /// Whether a listener is registered.
    pub fn has_listener(&self) -> bool {
        self.listener.get().is_some()
    }

    /// Fires a submit intent. Returns `None` when nobody listens, in which
    /// case the default behavior is left alone.
    pub async fn submit(&self, event: &mut SubmitEvent) -> Option<SubmitAttempt> {
        let controller = self.listener.get()?;
        Some(controller.handle_submit(event).await)
    }
}
