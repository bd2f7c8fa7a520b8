//! Transport error types

/// Errors that can occur while sending a form to its endpoint.
///
/// Every variant is surfaced to the user as a single form-level message;
/// none of them is tied to an individual field.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Network error during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status and no usable body.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The endpoint could not be resolved against the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The form snapshot could not be encoded as JSON.
    #[error("Request encode error: {0}")]
    Encode(serde_json::Error),

    /// The response body was not a submission outcome.
    #[error("Response decode error: {message}")]
    Decode {
        /// Description of the decode error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },

    /// No answer arrived within the submission timeout.
    #[error("Submission timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// A non-HTTP transport could not deliver the request.
    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

impl TransportError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new decode error with the raw response body.
    pub fn decode_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the request never produced a response.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_) | Self::Unavailable(_))
    }

    /// Returns `true` if a response arrived but could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
