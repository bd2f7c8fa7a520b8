//! Configuration error types

/// Errors that can occur while loading a [`FormConfig`](crate::config::FormConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration document is not valid JSON for the expected shape.
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The submission endpoint is empty or malformed.
    #[error("Invalid endpoint: {0:?}")]
    InvalidEndpoint(String),

    /// A timeout is set to zero, which would fail every submission.
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    /// A field id is empty or used twice.
    #[error("Invalid field id: {0:?}")]
    InvalidFieldId(String),
}
