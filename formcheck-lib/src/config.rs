//! Form configuration

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default submission endpoint.
pub const DEFAULT_ENDPOINT: &str = "/submitForm";

/// Configuration for a registration form and its submission.
///
/// Every field has a default, so a partial JSON document is enough.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use formcheck_lib::config::FormConfig;
///
/// let config = FormConfig::default()
///     .with_endpoint("/api/register")
///     .with_timeout(Duration::from_secs(10))
///     .with_reject_future_dates(true);
///
/// assert_eq!(config.endpoint, "/api/register");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Endpoint the form is POSTed to, relative to the transport's base URL.
    ///
    /// Default: `/submitForm`
    pub endpoint: String,

    /// Ids of the fields the registration form validates.
    pub fields: FieldIds,

    /// Whether a date after today fails validation.
    ///
    /// Default: `false`
    pub reject_future_dates: bool,

    /// Whole-submission timeout in milliseconds. Must be non-zero when set.
    pub timeout_ms: Option<u64>,

    /// Connection timeout in milliseconds. Must be non-zero when set.
    pub connect_timeout_ms: Option<u64>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            fields: FieldIds::default(),
            reject_future_dates: false,
            timeout_ms: None,
            connect_timeout_ms: None,
        }
    }
}

impl FormConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and checks a config from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Sets the submission endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the field ids.
    pub fn with_fields(mut self, fields: FieldIds) -> Self {
        self.fields = fields;
        self
    }

    /// Sets whether future dates are rejected.
    pub fn with_reject_future_dates(mut self, reject: bool) -> Self {
        self.reject_future_dates = reject;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(duration_ms(timeout));
        self
    }

    /// Sets the connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = Some(duration_ms(timeout));
        self
    }

    /// Returns the request timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Returns the connection timeout, if configured.
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    /// Checks that the endpoint is usable, every timeout is non-zero and every
    /// field id is distinct and non-empty.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() || self.endpoint.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }

        if self.timeout_ms == Some(0) {
            return Err(ConfigError::ZeroTimeout("timeout_ms"));
        }
        if self.connect_timeout_ms == Some(0) {
            return Err(ConfigError::ZeroTimeout("connect_timeout_ms"));
        }

        let mut seen = HashSet::new();
        for id in self.fields.all_ids() {
            if id.trim().is_empty() || !seen.insert(id) {
                return Err(ConfigError::InvalidFieldId(id.to_string()));
            }
        }

        Ok(())
    }
}

/// Whole milliseconds in `duration`, rounded up so a sub-millisecond value is never zero.
fn duration_ms(duration: Duration) -> u64 {
    let ms = duration.as_millis() + u128::from(duration.subsec_nanos() % 1_000_000 != 0);
    u64::try_from(ms).unwrap_or(u64::MAX)
}

/// Ids of the fields in a registration form.
///
/// The defaults match the stock registration page: `first_Name`, `last_Name`,
/// `email`, `password`, `match_Password`, `phone`, `date`, the `yesNo` group
/// and `checkbox`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldIds {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub date: String,
    pub choice_group: ChoiceGroup,
    pub checkbox: String,
}

impl Default for FieldIds {
    fn default() -> Self {
        Self {
            first_name: "first_Name".to_string(),
            last_name: "last_Name".to_string(),
            email: "email".to_string(),
            password: "password".to_string(),
            confirm_password: "match_Password".to_string(),
            phone: "phone".to_string(),
            date: "date".to_string(),
            choice_group: ChoiceGroup::default(),
            checkbox: "checkbox".to_string(),
        }
    }
}

impl FieldIds {
    /// Text field ids in validation order.
    pub fn text_fields(&self) -> [&str; 7] {
        [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.password.as_str(),
            self.confirm_password.as_str(),
            self.phone.as_str(),
            self.date.as_str(),
        ]
    }

    /// Every id the form uses: text fields, the group name, its options and the checkbox.
    pub fn all_ids(&self) -> impl Iterator<Item = &str> {
        self.text_fields()
            .into_iter()
            .chain(std::iter::once(self.choice_group.name.as_str()))
            .chain(self.choice_group.options.iter().map(String::as_str))
            .chain(std::iter::once(self.checkbox.as_str()))
    }
}

/// A single-choice (radio) group: its shared name and the ids of its options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChoiceGroup {
    /// Group name; also the key of the group's error slot.
    pub name: String,
    /// Ids of the options in the group.
    pub options: Vec<String>,
}

impl Default for ChoiceGroup {
    fn default() -> Self {
        Self {
            name: "yesNo".to_string(),
            options: vec!["yes".to_string(), "no".to_string()],
        }
    }
}
