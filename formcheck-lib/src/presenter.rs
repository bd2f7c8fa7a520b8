//! Error presentation.
//!
//! Every field has an error slot whose id is the field id followed by
//! `_error`. Messages that concern the whole form go to [`FORM_SLOT`].

use std::sync::Arc;

/// Suffix appended to a field id to get its error slot id.
pub const ERROR_SLOT_SUFFIX: &str = "_error";

/// Slot for messages that concern the whole form rather than one field.
pub const FORM_SLOT: &str = "form_error";

/// Returns the error slot id for a field.
pub fn error_slot_id(field_id: &str) -> String {
    format!("{field_id}{ERROR_SLOT_SUFFIX}")
}

/// Write access to the error slots of a form.
///
/// The presenter never styles anything; it only sets slot text.
pub trait ErrorSink: Send + Sync {
    /// Replaces the text of an error slot.
    ///
    /// Implementations should panic if the slot does not exist: a message
    /// with nowhere to go is a wiring bug.
    fn set_error_text(&self, slot_id: &str, text: &str);

    /// Ids of the slots currently showing a non-empty message.
    fn displayed_slots(&self) -> Vec<String>;
}

/// Shows and clears field errors and form-level messages.
///
/// Cheap to clone; clones share the same sink.
#[derive(Clone)]
pub struct ErrorPresenter {
    sink: Arc<dyn ErrorSink>,
}

impl ErrorPresenter {
    /// Creates a presenter writing into `sink`.
    pub fn new(sink: impl ErrorSink + 'static) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Creates a presenter from an already shared sink.
    pub fn from_arc(sink: Arc<dyn ErrorSink>) -> Self {
        Self { sink }
    }

    /// Writes `message` into the field's error slot.
    pub fn show_error(&self, field_id: &str, message: &str) {
        self.sink.set_error_text(&error_slot_id(field_id), message);
    }

    /// Empties the field's error slot.
    pub fn clear_error(&self, field_id: &str) {
        self.sink.set_error_text(&error_slot_id(field_id), "");
    }

    /// Empties every slot that currently shows text, the form-level slot included.
    pub fn clear_all_errors(&self) {
        for slot in self.sink.displayed_slots() {
            self.sink.set_error_text(&slot, "");
        }
    }

    /// Writes a form-level message.
    pub fn show_message(&self, message: &str) {
        self.sink.set_error_text(FORM_SLOT, message);
    }

    /// Empties the form-level slot.
    pub fn clear_message(&self) {
        self.sink.set_error_text(FORM_SLOT, "");
    }
}

impl std::fmt::Debug for ErrorPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorPresenter").finish_non_exhaustive()
    }
}
