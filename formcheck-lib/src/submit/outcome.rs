//! Submission outcome

use serde::Deserialize;
use serde::Serialize;

/// Shown when the server accepted the form.
pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";

/// Shown when the submission failed and there is nothing more specific to say.
pub const FAILURE_MESSAGE: &str = "Form submission failed";

/// The decoded answer of the submission endpoint: `{ "success": bool, "message"?: string }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    /// Whether the server accepted the form.
    pub success: bool,
    /// Server-provided explanation, usually only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmissionOutcome {
    /// An accepted submission.
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// A rejected submission with the server's reason.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    /// The text to show the user for this outcome.
    pub fn display_message(&self) -> &str {
        if self.success {
            SUCCESS_MESSAGE
        } else {
            self.message.as_deref().unwrap_or(FAILURE_MESSAGE)
        }
    }
}
