//! Form validation and submission library
//!
//! Validates a registration form field by field, shows errors in per-field
//! slots, and POSTs the form as JSON once every field passes.

pub mod config;
pub mod error;
pub mod form;
pub mod format;
pub mod orchestrator;
pub mod presenter;
pub mod submit;
pub mod trigger;
pub mod validation;

pub use config::FormConfig;
pub use orchestrator::{FormOrchestrator, ValidationPass};
pub use presenter::ErrorPresenter;
pub use submit::{HttpTransport, SubmissionOutcome, SubmissionPipeline, Transport};
pub use trigger::{FormController, SubmitAttempt, SubmitEvent, SubmitTarget};
