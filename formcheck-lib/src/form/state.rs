//! In-memory form state shared between the orchestrator and its caller.

use std::sync::{Arc, RwLock};

use super::builder::{FormElement, InputElement, InputType};
use super::FieldSource;
use crate::presenter::{ErrorSink, FORM_SLOT, error_slot_id};

/// Internal state for a Form
#[derive(Debug, Default)]
struct FormInner {
    /// Form id
    id: String,
    /// Fields in document order
    elements: Vec<FormElement>,
    /// Error slots as (slot id, text), in creation order
    slots: Vec<(String, String)>,
}

impl FormInner {
    fn element(&self, field_id: &str) -> Option<&FormElement> {
        self.elements.iter().find(|e| e.id() == field_id)
    }

    fn element_mut(&mut self, field_id: &str) -> Option<&mut FormElement> {
        self.elements.iter_mut().find(|e| e.id() == field_id)
    }

    fn add_slot(&mut self, slot_id: String) {
        if !self.slots.iter().any(|(id, _)| *id == slot_id) {
            self.slots.push((slot_id, String::new()));
        }
    }
}

/// An in-memory form: its fields plus their error slots.
///
/// `Form` is the reference [`FieldSource`] and [`ErrorSink`]. Clones share
/// state, so one clone can be handed to an orchestrator while another is used
/// to fill in fields or read back error text.
///
/// # Example
///
/// ```
/// use formcheck_lib::config::FieldIds;
/// use formcheck_lib::form::{FieldSource, registration_form};
///
/// let form = registration_form("validate_Form", &FieldIds::default());
/// form.set_value("email", "john@doe.com");
/// form.set_checked("yes", true);
///
/// assert_eq!(form.value("email").as_deref(), Some("john@doe.com"));
/// assert_eq!(form.is_checked("no"), Some(false));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Form {
    inner: Arc<RwLock<FormInner>>,
}

impl Form {
    /// Create a form from its fields, with one error slot per field key and a
    /// form-level slot.
    pub fn new(id: impl Into<String>, elements: Vec<FormElement>) -> Self {
        let mut inner = FormInner {
            id: id.into(),
            elements: Vec::new(),
            slots: Vec::new(),
        };
        for element in &elements {
            inner.add_slot(error_slot_id(element.error_key()));
        }
        inner.add_slot(FORM_SLOT.to_string());
        inner.elements = elements;

        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Get the form id
    pub fn id(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.id.clone())
            .unwrap_or_default()
    }

    /// Check if a field with this id exists
    pub fn contains(&self, field_id: &str) -> bool {
        self.inner
            .read()
            .map(|guard| guard.element(field_id).is_some())
            .unwrap_or(false)
    }

    /// Get a copy of every field in document order
    pub fn elements(&self) -> Vec<FormElement> {
        self.inner
            .read()
            .map(|guard| guard.elements.clone())
            .unwrap_or_default()
    }

    /// Check if an error slot exists
    pub fn has_error_slot(&self, slot_id: &str) -> bool {
        self.inner
            .read()
            .map(|guard| guard.slots.iter().any(|(id, _)| id == slot_id))
            .unwrap_or(false)
    }

    /// Get the text of an error slot, `None` if the slot does not exist
    pub fn error_text(&self, slot_id: &str) -> Option<String> {
        self.inner.read().ok().and_then(|guard| {
            guard
                .slots
                .iter()
                .find(|(id, _)| id == slot_id)
                .map(|(_, text)| text.clone())
        })
    }

    /// Get the error currently shown for a field, `None` if its slot is empty
    pub fn field_error(&self, field_id: &str) -> Option<String> {
        self.error_text(&error_slot_id(field_id))
            .filter(|text| !text.is_empty())
    }

    /// Get the form-level message, `None` if empty
    pub fn message(&self) -> Option<String> {
        self.error_text(FORM_SLOT).filter(|text| !text.is_empty())
    }

    // -------------------------------------------------------------------------
    // Mutation methods
    // -------------------------------------------------------------------------

    /// Add an error slot that is not tied to a field
    pub fn add_error_slot(&self, slot_id: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.add_slot(slot_id.into());
        }
    }

    /// Check or uncheck a checkbox or radio option.
    ///
    /// Checking a radio option unchecks the other options with the same name.
    /// Returns `false` if the field does not exist or is not checkable.
    pub fn set_checked(&self, field_id: &str, checked: bool) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };

        let group = match guard.element_mut(field_id) {
            Some(FormElement::Input(input)) if input.input_type.is_checkable() => {
                input.checked = checked;
                match input.input_type {
                    InputType::Radio if checked => input.name.clone(),
                    _ => None,
                }
            }
            _ => return false,
        };

        if let Some(group) = group {
            for element in guard.elements.iter_mut() {
                if let FormElement::Input(other) = element {
                    if other.input_type == InputType::Radio
                        && other.id != field_id
                        && other.name.as_deref() == Some(group.as_str())
                    {
                        other.checked = false;
                    }
                }
            }
        }

        true
    }

    /// Select a dropdown option by index, or clear the selection with `None`.
    ///
    /// Returns `false` if the field is not a dropdown or the index is out of range.
    pub fn select(&self, field_id: &str, index: Option<usize>) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        match guard.element_mut(field_id) {
            Some(FormElement::Select(select)) => {
                if index.is_some_and(|i| i >= select.options.len()) {
                    return false;
                }
                select.selected = index;
                true
            }
            _ => false,
        }
    }

    /// Remove a field. Its error slot stays so other writers are unaffected.
    pub(crate) fn remove(&self, field_id: &str) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        let before = guard.elements.len();
        guard.elements.retain(|e| e.id() != field_id);
        guard.elements.len() != before
    }
}

impl FieldSource for Form {
    fn value(&self, field_id: &str) -> Option<String> {
        let guard = self.inner.read().ok()?;
        match guard.element(field_id)? {
            FormElement::Input(input) => Some(input.value.clone()),
            FormElement::Select(select) => Some(
                select
                    .selected
                    .and_then(|i| select.options.get(i))
                    .map(|option| option.value.clone())
                    .unwrap_or_default(),
            ),
        }
    }

    fn is_checked(&self, field_id: &str) -> Option<bool> {
        let guard = self.inner.read().ok()?;
        match guard.element(field_id)? {
            FormElement::Input(InputElement {
                input_type,
                checked,
                ..
            }) => Some(input_type.is_checkable() && *checked),
            FormElement::Select(_) => Some(false),
        }
    }

    fn set_value(&self, field_id: &str, value: &str) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        match guard.element_mut(field_id) {
            Some(FormElement::Input(input)) => {
                input.value = value.to_string();
                true
            }
            Some(FormElement::Select(select)) => {
                select.selected = select.options.iter().position(|o| o.value == value);
                true
            }
            None => false,
        }
    }
}

impl ErrorSink for Form {
    /// # Panics
    ///
    /// Panics if the form has no slot with this id, or if its state was
    /// poisoned by an earlier panic.
    fn set_error_text(&self, slot_id: &str, text: &str) {
        let Ok(mut guard) = self.inner.write() else {
            panic!("form state is poisoned; cannot write error slot `{slot_id}`");
        };
        if let Some((_, existing)) = guard.slots.iter_mut().find(|(id, _)| id == slot_id) {
            *existing = text.to_string();
            return;
        }
        let form_id = guard.id.clone();
        drop(guard);
        panic!("form `{form_id}` has no error slot `{slot_id}`");
    }

    fn displayed_slots(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|guard| {
                guard
                    .slots
                    .iter()
                    .filter(|(_, text)| !text.is_empty())
                    .map(|(id, _)| id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldIds;
    use crate::form::{
        create_dropdown, create_form, create_text_input, registration_form, remove_form_field,
    };

    #[test]
    fn test_radio_options_are_exclusive() {
        let form = registration_form("f", &FieldIds::default());
        assert!(form.set_checked("yes", true));
        assert!(form.set_checked("no", true));
        assert_eq!(form.is_checked("yes"), Some(false));
        assert_eq!(form.is_checked("no"), Some(true));
        assert_eq!(form.value("no").as_deref(), Some("no"));
    }

    #[test]
    fn test_text_fields_are_not_checkable() {
        let form = registration_form("f", &FieldIds::default());
        assert!(!form.set_checked("email", true));
        assert_eq!(form.is_checked("email"), Some(false));
        assert_eq!(form.is_checked("missing"), None);
    }

    #[test]
    fn test_dropdown_value() {
        let form = create_form(
            "f",
            vec![create_dropdown("gender", [("male", "Male"), ("female", "Female")])],
        );
        assert_eq!(form.value("gender").as_deref(), Some("male"));
        assert!(form.select("gender", Some(1)));
        assert_eq!(form.value("gender").as_deref(), Some("female"));
        assert!(!form.select("gender", Some(2)));
        assert!(form.select("gender", None));
        assert_eq!(form.value("gender").as_deref(), Some(""));
        assert!(form.set_value("gender", "male"));
        assert_eq!(form.value("gender").as_deref(), Some("male"));
    }

    #[test]
    fn test_remove_form_field() {
        let form = create_form("f", vec![create_text_input("firstName", "First", true)]);
        assert!(remove_form_field(&form, "firstName"));
        assert!(!form.contains("firstName"));
        assert!(!remove_form_field(&form, "firstName"));
        assert!(form.has_error_slot("firstName_error"));
    }

    #[test]
    fn test_error_slots() {
        let form = create_form("f", vec![create_text_input("email", "", true)]);
        form.set_error_text("email_error", "bad");
        assert_eq!(form.field_error("email").as_deref(), Some("bad"));
        assert_eq!(form.displayed_slots(), vec!["email_error".to_string()]);

        form.set_error_text("email_error", "");
        assert_eq!(form.field_error("email"), None);
        assert!(form.displayed_slots().is_empty());
    }

    #[test]
    #[should_panic(expected = "has no error slot `nowhere_error`")]
    fn test_missing_slot_panics() {
        let form = create_form("f", vec![]);
        form.set_error_text("nowhere_error", "bad");
    }

    #[test]
    #[should_panic(expected = "form state is poisoned")]
    fn test_poisoned_state_panics_on_error_write() {
        let form = create_form("f", vec![create_text_input("email", "", true)]);
        let poisoner = form.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("writer crashed");
        })
        .join();

        assert!(form.inner.is_poisoned());
        form.set_error_text("email_error", "bad");
    }

    #[test]
    fn test_clones_share_state() {
        let form = create_form("f", vec![create_text_input("phone", "", true)]);
        let other = form.clone();
        other.set_value("phone", "1234567890");
        assert_eq!(form.value("phone").as_deref(), Some("1234567890"));
    }
}
