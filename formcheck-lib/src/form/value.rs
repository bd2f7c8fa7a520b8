//! Field values and form snapshots.
//!
//! ## Wire format
//!
//! A [`FormSnapshot`] serializes as a JSON object whose keys appear in
//! capture order:
//! - `Text` serializes as a string: `"email": "john@doe.com"`
//! - `Checked` serializes as a boolean: `"checkbox": true`
//! - `Choice` with one selection serializes as that value: `"yesNo": "yes"`
//! - `Choice` with no selection serializes as `null`
//! - `Choice` with several selections serializes as an array

use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

use super::FieldSource;
use crate::config::FieldIds;

/// The value of one field at the moment a snapshot was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text-like input (text, email, password, tel, date, select).
    Text(String),
    /// Checkbox state.
    Checked(bool),
    /// Values of the checked options in a single-choice group.
    Choice(Vec<String>),
}

impl FieldValue {
    /// Returns the text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the checkbox state if this is a checkbox value.
    pub fn as_checked(&self) -> Option<bool> {
        match self {
            Self::Checked(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the selected values if this is a choice value.
    pub fn as_choice(&self) -> Option<&[String]> {
        match self {
            Self::Choice(values) => Some(values),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Checked(value)
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Checked(b) => serializer.serialize_bool(*b),
            Self::Choice(values) => match values.as_slice() {
                [] => serializer.serialize_none(),
                [single] => serializer.serialize_str(single),
                many => many.serialize(serializer),
            },
        }
    }
}

/// Ordered field id → value mapping captured once per submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    fields: Vec<(String, FieldValue)>,
}

impl FormSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every registration field from `source` before anything else happens.
    ///
    /// Text fields come first in validation order, then the choice group
    /// (keyed by group name), then the checkbox.
    ///
    /// # Panics
    ///
    /// Panics if `source` has no field for one of the ids. That is a wiring
    /// bug between the configuration and the form, not bad user input.
    pub fn capture(source: &dyn FieldSource, ids: &FieldIds) -> Self {
        let mut snapshot = Self::new();

        for id in ids.text_fields() {
            let value = source.value(id).unwrap_or_else(|| missing_field(id));
            snapshot.insert(id, FieldValue::Text(value));
        }

        let mut selected = Vec::new();
        for option in &ids.choice_group.options {
            if source.is_checked(option).unwrap_or_else(|| missing_field(option)) {
                selected.push(source.value(option).unwrap_or_else(|| missing_field(option)));
            }
        }
        snapshot.insert(&ids.choice_group.name, FieldValue::Choice(selected));

        let checked = source
            .is_checked(&ids.checkbox)
            .unwrap_or_else(|| missing_field(&ids.checkbox));
        snapshot.insert(&ids.checkbox, FieldValue::Checked(checked));

        snapshot
    }

    /// Inserts or replaces a value, keeping the original position on replace.
    pub fn insert(&mut self, field_id: impl Into<String>, value: impl Into<FieldValue>) {
        let field_id = field_id.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(id, _)| *id == field_id) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((field_id, value)),
        }
    }

    /// Returns the value captured for `field_id`.
    pub fn get(&self, field_id: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(id, _)| id == field_id)
            .map(|(_, value)| value)
    }

    /// Returns the text captured for `field_id`, if it is a text field.
    pub fn text(&self, field_id: &str) -> Option<&str> {
        self.get(field_id).and_then(FieldValue::as_text)
    }

    /// Iterates over the fields in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(id, value)| (id.as_str(), value))
    }

    /// Number of captured fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for FormSnapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (id, value) in &self.fields {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }
}

fn missing_field(field_id: &str) -> ! {
    panic!("form has no field `{field_id}`")
}
