//! Form orchestrator: one validation pass over the registration form.

use std::sync::{Arc, RwLock};

use log::debug;

use crate::config::{FieldIds, FormConfig};
use crate::form::{FieldSource, FieldValue, FormSnapshot};
use crate::format::format_phone_number;
use crate::presenter::ErrorPresenter;
use crate::validation::{FieldResult, FormRules, ValidationResult};

/// Where the orchestrator is in its cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrchestratorState {
    #[default]
    Idle,
    Validating,
    Valid,
    Invalid,
}

/// Everything one validation pass produced.
#[derive(Debug, Clone)]
pub struct ValidationPass {
    /// Per-field results in validation order.
    pub fields: Vec<FieldResult>,
    /// Aggregate of `fields`.
    pub result: ValidationResult,
    /// Values the pass ran against. On success the phone is already formatted.
    pub snapshot: FormSnapshot,
}

impl ValidationPass {
    /// Whether every field passed.
    pub fn is_valid(&self) -> bool {
        self.result.is_valid()
    }
}

/// Validates a form in a fixed field order and drives the error presenter.
///
/// The orchestrator never reaches into global state: the field source and
/// the presenter are handed to it.
///
/// # Example
///
/// ```
/// use formcheck_lib::config::FormConfig;
/// use formcheck_lib::form::{FieldSource, registration_form};
/// use formcheck_lib::orchestrator::FormOrchestrator;
/// use formcheck_lib::presenter::ErrorPresenter;
///
/// let config = FormConfig::default();
/// let form = registration_form("validate_Form", &config.fields);
/// let orchestrator =
///     FormOrchestrator::from_config(form.clone(), ErrorPresenter::new(form.clone()), &config);
///
/// let pass = orchestrator.validate();
/// assert!(!pass.is_valid());
/// assert_eq!(
///     form.field_error("email").as_deref(),
///     Some("Please enter a valid email address.")
/// );
/// ```
pub struct FormOrchestrator {
    source: Arc<dyn FieldSource>,
    presenter: ErrorPresenter,
    fields: FieldIds,
    rules: FormRules,
    state: RwLock<OrchestratorState>,
}

impl FormOrchestrator {
    /// Creates an orchestrator with explicit rules.
    ///
    /// `rules` must only name ids captured for `fields`.
    pub fn new(
        source: impl FieldSource + 'static,
        presenter: ErrorPresenter,
        fields: FieldIds,
        rules: FormRules,
    ) -> Self {
        Self {
            source: Arc::new(source),
            presenter,
            fields,
            rules,
            state: RwLock::new(OrchestratorState::Idle),
        }
    }

    /// Creates an orchestrator with the registration rules for `config`.
    pub fn from_config(
        source: impl FieldSource + 'static,
        presenter: ErrorPresenter,
        config: &FormConfig,
    ) -> Self {
        let rules = FormRules::registration(&config.fields, config.reject_future_dates);
        Self::new(source, presenter, config.fields.clone(), rules)
    }

    /// Current state.
    pub fn state(&self) -> OrchestratorState {
        self.state.read().map(|s| *s).unwrap_or_default()
    }

    /// Returns to `Idle` once the caller is done with the pass.
    pub fn finish(&self) {
        self.set_state(OrchestratorState::Idle);
    }

    /// The presenter this orchestrator writes to.
    pub fn presenter(&self) -> &ErrorPresenter {
        &self.presenter
    }

    /// The ids this orchestrator captures.
    pub fn fields(&self) -> &FieldIds {
        &self.fields
    }

    /// Runs one validation pass.
    ///
    /// Clears stale errors, captures every field, then checks every field
    /// even after one fails, so all problems are shown together. On success
    /// the phone field is rewritten as `XXX-XXX-XXXX`.
    ///
    /// # Panics
    ///
    /// Panics if the source lacks a configured field or the sink lacks a slot.
    pub fn validate(&self) -> ValidationPass {
        self.set_state(OrchestratorState::Validating);
        self.presenter.clear_all_errors();

        let mut snapshot = FormSnapshot::capture(self.source.as_ref(), &self.fields);
        debug!("Validating {} fields", snapshot.len());

        let fields = self.rules.evaluate(&snapshot);
        for field in &fields {
            match field.message() {
                Some(message) => {
                    debug!("Field {} failed: {}", field.field_id(), message);
                    self.presenter.show_error(field.field_id(), message);
                }
                None => self.presenter.clear_error(field.field_id()),
            }
        }

        let result = ValidationResult::from_fields(&fields);
        if result.is_valid() {
            self.rewrite_phone(&mut snapshot);
            self.set_state(OrchestratorState::Valid);
        } else {
            debug!("Validation failed on {} fields", result.errors().len());
            self.set_state(OrchestratorState::Invalid);
        }

        ValidationPass {
            fields,
            result,
            snapshot,
        }
    }

    fn rewrite_phone(&self, snapshot: &mut FormSnapshot) {
        let phone_id = &self.fields.phone;
        let Some(raw) = snapshot.text(phone_id) else {
            return;
        };

        let formatted = format_phone_number(raw);
        if !self.source.set_value(phone_id, &formatted) {
            panic!("form has no field `{phone_id}`");
        }
        snapshot.insert(phone_id.as_str(), FieldValue::Text(formatted));
    }

    fn set_state(&self, state: OrchestratorState) {
        if let Ok(mut guard) = self.state.write() {
            *guard = state;
        }
    }
}

impl std::fmt::Debug for FormOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormOrchestrator")
            .field("fields", &self.fields)
            .field("rules", &self.rules)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
