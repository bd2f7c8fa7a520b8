/// Outcome of validating one field.
///
/// `message` is present exactly when the field is invalid; the constructors
/// are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldResult {
    field_id: String,
    message: Option<String>,
}

impl FieldResult {
    /// A passing field.
    pub fn valid(field_id: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            message: None,
        }
    }

    /// A failing field with the message to show.
    pub fn invalid(field_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            message: Some(message.into()),
        }
    }

    /// Id of the field (and key of its error slot).
    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    /// Whether the field passed.
    pub fn is_valid(&self) -> bool {
        self.message.is_none()
    }

    /// The failure message, if the field failed.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Information about a single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field id.
    pub field_id: String,
    /// Error message.
    pub message: String,
}

/// Result of validating every field of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    /// All fields passed validation.
    #[default]
    Valid,
    /// One or more fields failed validation, in field order.
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    /// Collects per-field results into an overall result.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a FieldResult>) -> Self {
        let errors: Vec<FieldError> = fields
            .into_iter()
            .filter_map(|field| {
                field.message().map(|message| FieldError {
                    field_id: field.field_id().to_string(),
                    message: message.to_string(),
                })
            })
            .collect();

        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }

    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Check if any field failed validation.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Get all validation errors.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Get the first validation error (if any).
    pub fn first_error(&self) -> Option<&FieldError> {
        self.errors().first()
    }

    /// Get the error for a specific field (if it failed).
    pub fn error_for(&self, field_id: &str) -> Option<&FieldError> {
        self.errors().iter().find(|e| e.field_id == field_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_iff_invalid() {
        let ok = FieldResult::valid("email");
        assert!(ok.is_valid());
        assert_eq!(ok.message(), None);

        let bad = FieldResult::invalid("email", "Please enter a valid email address.");
        assert!(!bad.is_valid());
        assert_eq!(bad.message(), Some("Please enter a valid email address."));
    }

    #[test]
    fn test_from_fields() {
        let fields = vec![
            FieldResult::valid("first_Name"),
            FieldResult::invalid("password", "weak"),
            FieldResult::invalid("match_Password", "mismatch"),
        ];
        let result = ValidationResult::from_fields(&fields);
        assert!(result.is_invalid());
        assert_eq!(result.errors().len(), 2);
        assert_eq!(result.first_error().unwrap().field_id, "password");
        assert_eq!(result.error_for("match_Password").unwrap().message, "mismatch");
        assert!(result.error_for("first_Name").is_none());

        let all_ok = [FieldResult::valid("a"), FieldResult::valid("b")];
        assert!(ValidationResult::from_fields(&all_ok).is_valid());
    }
}
