//! Rule builder for fluent validation API.

use chrono::Local;
use regex::Regex;

use super::FieldResult;
use super::messages::*;
use super::rules;
use crate::config::FieldIds;
use crate::form::{FieldValue, FormSnapshot};

/// Type alias for rule predicates. The snapshot is passed for cross-field rules.
type Check = Box<dyn Fn(&FieldValue, &FormSnapshot) -> bool + Send + Sync>;

struct Rule {
    check: Check,
    message: String,
}

/// Internal representation of a field being validated.
struct FieldEntry {
    field_id: String,
    rules: Vec<Rule>,
}

/// Ordered validation rules for the fields of a form.
///
/// Fields are evaluated in the order they were added. Within a field the
/// first failing rule decides the message.
#[derive(Default)]
pub struct FormRules {
    fields: Vec<FieldEntry>,
}

impl FormRules {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// The rule set for the standard registration form.
    ///
    /// With `reject_future_dates` the date must also be no later than today.
    pub fn registration(ids: &FieldIds, reject_future_dates: bool) -> Self {
        let date = Self::new()
            .field(&ids.first_name)
            .pattern(&rules::NAME_PATTERN, FIRST_NAME_MESSAGE)
            .field(&ids.last_name)
            .pattern(&rules::NAME_PATTERN, LAST_NAME_MESSAGE)
            .field(&ids.email)
            .email(EMAIL_MESSAGE)
            .field(&ids.password)
            .password_strength(PASSWORD_MESSAGE)
            .field(&ids.confirm_password)
            .equals_field(&ids.password, CONFIRM_PASSWORD_MESSAGE)
            .field(&ids.phone)
            .pattern(&rules::PHONE_PATTERN, PHONE_MESSAGE)
            .field(&ids.date)
            .required(DATE_MESSAGE)
            .date(DATE_MESSAGE);

        let date = if reject_future_dates {
            date.not_in_future(FUTURE_DATE_MESSAGE)
        } else {
            date
        };

        date.field(&ids.choice_group.name)
            .single_choice(CHOICE_MESSAGE)
            .field(&ids.checkbox)
            .checked(CHECKBOX_MESSAGE)
            .finish()
    }

    /// Add a field to validate.
    pub fn field(self, field_id: impl Into<String>) -> FieldBuilder {
        FieldBuilder {
            rules: self,
            entry: FieldEntry {
                field_id: field_id.into(),
                rules: Vec::new(),
            },
        }
    }

    /// Ids of the fields, in evaluation order.
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.field_id.as_str())
    }

    /// Number of fields with rules.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field has rules.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Evaluate every field against `snapshot`. Never stops early: a failing
    /// field does not prevent later fields from being checked.
    ///
    /// # Panics
    ///
    /// Panics if the snapshot has no value for a field that has rules.
    pub fn evaluate(&self, snapshot: &FormSnapshot) -> Vec<FieldResult> {
        self.fields
            .iter()
            .map(|field| {
                let value = snapshot
                    .get(&field.field_id)
                    .unwrap_or_else(|| panic!("snapshot has no field `{}`", field.field_id));

                match field.rules.iter().find(|rule| !(rule.check)(value, snapshot)) {
                    Some(rule) => FieldResult::invalid(&field.field_id, &rule.message),
                    None => FieldResult::valid(&field.field_id),
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for FormRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.field_ids()).finish()
    }
}

/// Builder for adding validation rules to a single field.
pub struct FieldBuilder {
    rules: FormRules,
    entry: FieldEntry,
}

impl FieldBuilder {
    /// Add a custom rule over the field's value.
    pub fn rule<F>(self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        self.rule_with_snapshot(move |value, _| f(value), msg)
    }

    /// Add a custom rule that may look at other fields.
    pub fn rule_with_snapshot<F>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&FieldValue, &FormSnapshot) -> bool + Send + Sync + 'static,
    {
        self.entry.rules.push(Rule {
            check: Box::new(f),
            message: msg.into(),
        });
        self
    }

    /// Add a rule over the field's text. Non-text values fail.
    pub fn text_rule<F>(self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.rule(move |value| value.as_text().is_some_and(&f), msg)
    }

    /// Require the field to be non-empty after trimming.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.text_rule(rules::validate_required_field, msg)
    }

    /// Require the value to match a regex pattern.
    pub fn pattern(self, pattern: &Regex, msg: impl Into<String>) -> Self {
        let pattern = pattern.clone();
        self.text_rule(move |v| rules::validate_custom_regex(v, &pattern), msg)
    }

    /// Require a `local@domain.tld` email address.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.text_rule(rules::validate_email, msg)
    }

    /// Require at least 8 characters including a digit.
    pub fn password_strength(self, msg: impl Into<String>) -> Self {
        self.text_rule(rules::validate_password_strength, msg)
    }

    /// Require a parseable calendar date.
    pub fn date(self, msg: impl Into<String>) -> Self {
        self.text_rule(rules::validate_date_format, msg)
    }

    /// Require the date to be no later than today's local date.
    pub fn not_in_future(self, msg: impl Into<String>) -> Self {
        self.text_rule(
            |v| rules::validate_not_in_future(v, Local::now().date_naive()),
            msg,
        )
    }

    /// Require exact equality with another text field.
    pub fn equals_field(self, other: impl Into<String>, msg: impl Into<String>) -> Self {
        let other = other.into();
        self.rule_with_snapshot(
            move |value, snapshot| {
                value.as_text().is_some() && value.as_text() == snapshot.text(&other)
            },
            msg,
        )
    }

    /// Require the checkbox to be checked.
    pub fn checked(self, msg: impl Into<String>) -> Self {
        self.rule(|value| value.as_checked() == Some(true), msg)
    }

    /// Require exactly one option of a choice group to be selected.
    pub fn single_choice(self, msg: impl Into<String>) -> Self {
        self.rule(|value| value.as_choice().is_some_and(|v| v.len() == 1), msg)
    }

    /// Continue to the next field.
    pub fn field(self, field_id: impl Into<String>) -> FieldBuilder {
        self.finish().field(field_id)
    }

    /// Finalize this field and return the rule set.
    pub fn finish(self) -> FormRules {
        let mut rules = self.rules;
        rules.fields.push(self.entry);
        rules
    }
}
