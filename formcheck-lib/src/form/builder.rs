//! Helpers for assembling forms from field elements.
//!
//! # Example
//!
//! ```
//! use formcheck_lib::form::{
//!     InputType, add_form_field, create_dropdown, create_form, create_text_input,
//! };
//!
//! let form = create_form(
//!     "userForm",
//!     vec![
//!         create_text_input("username", "Enter your username", true),
//!         add_form_field(InputType::Email, "email", "Enter your email", true),
//!         create_dropdown("gender", [("male", "Male"), ("female", "Female")]),
//!     ],
//! );
//!
//! assert!(form.contains("email"));
//! assert!(form.has_error_slot("email_error"));
//! ```

use super::Form;
use crate::config::FieldIds;

/// The `type` of an input element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    Text,
    Email,
    Password,
    Tel,
    Date,
    Checkbox,
    Radio,
}

impl InputType {
    /// Returns `true` for inputs whose state is a checked flag.
    pub fn is_checkable(self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}

/// A single `<input>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputElement {
    pub input_type: InputType,
    pub id: String,
    /// Shared name; radio options in one group have the same name.
    pub name: Option<String>,
    pub placeholder: String,
    pub required: bool,
    pub value: String,
    pub checked: bool,
}

impl InputElement {
    /// Sets the shared name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the initial value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the initial checked state.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

/// One `<option>` of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// A `<select>` dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectElement {
    pub id: String,
    pub options: Vec<SelectOption>,
    /// Index of the selected option. A fresh dropdown selects its first option.
    pub selected: Option<usize>,
}

/// Anything that can be placed in a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormElement {
    Input(InputElement),
    Select(SelectElement),
}

impl FormElement {
    /// The element's id.
    pub fn id(&self) -> &str {
        match self {
            Self::Input(input) => &input.id,
            Self::Select(select) => &select.id,
        }
    }

    /// Key of the error slot this element reports into: the group name for
    /// radio options, the id otherwise.
    pub fn error_key(&self) -> &str {
        match self {
            Self::Input(InputElement {
                input_type: InputType::Radio,
                name: Some(name),
                ..
            }) => name.as_str(),
            _ => self.id(),
        }
    }

    /// Sets the name of an input; dropdowns are returned unchanged.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        match self {
            Self::Input(input) => Self::Input(input.with_name(name)),
            other => other,
        }
    }

    /// Sets the value of an input; dropdowns are returned unchanged.
    pub fn with_value(self, value: impl Into<String>) -> Self {
        match self {
            Self::Input(input) => Self::Input(input.with_value(value)),
            other => other,
        }
    }
}

/// Creates a form with the given id and fields.
///
/// An error slot `<key>_error` is created for every field (radio options
/// share one slot named after their group), plus the form-level slot
/// `form_error`.
pub fn create_form(id: impl Into<String>, fields: Vec<FormElement>) -> Form {
    Form::new(id, fields)
}

/// Creates an input of a specific type.
pub fn add_form_field(
    input_type: InputType,
    id: impl Into<String>,
    placeholder: impl Into<String>,
    required: bool,
) -> FormElement {
    FormElement::Input(InputElement {
        input_type,
        id: id.into(),
        name: None,
        placeholder: placeholder.into(),
        required,
        value: String::new(),
        checked: false,
    })
}

/// Creates a text input.
pub fn create_text_input(
    id: impl Into<String>,
    placeholder: impl Into<String>,
    required: bool,
) -> FormElement {
    add_form_field(InputType::Text, id, placeholder, required)
}

/// Creates a dropdown from `(value, label)` pairs.
pub fn create_dropdown<V, L>(
    id: impl Into<String>,
    options: impl IntoIterator<Item = (V, L)>,
) -> FormElement
where
    V: Into<String>,
    L: Into<String>,
{
    let options: Vec<SelectOption> = options
        .into_iter()
        .map(|(value, label)| SelectOption {
            value: value.into(),
            label: label.into(),
        })
        .collect();
    let selected = (!options.is_empty()).then_some(0);

    FormElement::Select(SelectElement {
        id: id.into(),
        options,
        selected,
    })
}

/// Creates one radio option per value. Each option's id is its value.
pub fn create_radio_group<I, S>(name: &str, values: I) -> Vec<FormElement>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values
        .into_iter()
        .map(|value| {
            let value: String = value.into();
            add_form_field(InputType::Radio, value.clone(), "", false)
                .with_name(name)
                .with_value(value)
        })
        .collect()
}

/// Removes a field from a form. Does nothing if the field is not there.
///
/// Returns `true` if a field was removed.
pub fn remove_form_field(form: &Form, field_id: &str) -> bool {
    form.remove(field_id)
}

/// Builds the standard registration form for `ids`.
///
/// Fields appear in validation order; every text field is required.
pub fn registration_form(form_id: impl Into<String>, ids: &FieldIds) -> Form {
    let mut fields = vec![
        create_text_input(&ids.first_name, "First name", true),
        create_text_input(&ids.last_name, "Last name", true),
        add_form_field(InputType::Email, &ids.email, "Email", true),
        add_form_field(InputType::Password, &ids.password, "Password", true),
        add_form_field(InputType::Password, &ids.confirm_password, "Confirm password", true),
        add_form_field(InputType::Tel, &ids.phone, "Phone", true),
        add_form_field(InputType::Date, &ids.date, "", true),
    ];
    fields.extend(create_radio_group(&ids.choice_group.name, &ids.choice_group.options));
    fields.push(add_form_field(InputType::Checkbox, &ids.checkbox, "", true));

    create_form(form_id, fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_form_field() {
        let field = add_form_field(InputType::Email, "userEmail", "Enter your email", true);
        match field {
            FormElement::Input(input) => {
                assert_eq!(input.input_type, InputType::Email);
                assert_eq!(input.id, "userEmail");
                assert_eq!(input.placeholder, "Enter your email");
                assert!(input.required);
                assert!(input.value.is_empty());
            }
            other => panic!("expected input, got {other:?}"),
        }
    }

    #[test]
    fn test_create_dropdown_selects_first() {
        let dropdown = create_dropdown("gender", [("male", "Male"), ("female", "Female")]);
        match dropdown {
            FormElement::Select(select) => {
                assert_eq!(select.options.len(), 2);
                assert_eq!(select.options[1].label, "Female");
                assert_eq!(select.selected, Some(0));
            }
            other => panic!("expected select, got {other:?}"),
        }

        let empty = create_dropdown("empty", Vec::<(String, String)>::new());
        assert!(matches!(empty, FormElement::Select(SelectElement { selected: None, .. })));
    }

    #[test]
    fn test_radio_group_shares_error_key() {
        let options = create_radio_group("yesNo", ["yes", "no"]);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].id(), "yes");
        assert_eq!(options[1].error_key(), "yesNo");
    }

    #[test]
    fn test_registration_form_has_every_field() {
        let ids = FieldIds::default();
        let form = registration_form("validate_Form", &ids);
        for id in ids.all_ids().filter(|id| *id != ids.choice_group.name) {
            assert!(form.contains(id), "missing {id}");
        }
        assert!(form.has_error_slot("yesNo_error"));
        assert!(form.has_error_slot("checkbox_error"));
        assert!(form.has_error_slot("form_error"));
    }
}
