//! FieldSource trait for reading and rewriting form fields.

/// Read access to the current values of a form's fields.
///
/// The orchestrator only ever sees a form through this trait, so it never
/// touches the rendering surface directly.
pub trait FieldSource: Send + Sync {
    /// Current text of a field, or `None` if there is no field with that id.
    ///
    /// For radio options this is the option's value attribute; for selects
    /// it is the value of the selected option (empty if none).
    fn value(&self, field_id: &str) -> Option<String>;

    /// Whether a checkbox or radio option is checked, or `None` if there is
    /// no such field. Text-like fields report `Some(false)`.
    fn is_checked(&self, field_id: &str) -> Option<bool>;

    /// Replaces the text of a field. Returns `false` if there is no such field.
    fn set_value(&self, field_id: &str, value: &str) -> bool;
}
