//! Field validators.
//!
//! Every validator is a pure predicate over the raw field text. None of them
//! trims or otherwise normalizes its input unless stated.

use std::sync::LazyLock;

use chrono::DateTime;
use chrono::NaiveDate;
use regex::Regex;

/// Letters only, at least one.
pub static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").expect("name pattern is valid"));

/// Exactly ten digits.
pub static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("phone pattern is valid"));

/// `local@domain.tld`: one `@`, no whitespace, a `.` after the `@`.
pub static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Date layouts accepted besides RFC 3339.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Returns `true` if `email` looks like `local@domain.tld`.
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Returns `true` if `password` has at least 8 characters and one digit.
pub fn validate_password_strength(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN && password.chars().any(|c| c.is_ascii_digit())
}

/// Returns `true` if `value` is not empty after trimming whitespace.
pub fn validate_required_field(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Returns `true` if `pattern` matches `value`.
pub fn validate_custom_regex(value: &str, pattern: &Regex) -> bool {
    pattern.is_match(value)
}

/// Returns `true` if `value` parses as a calendar date.
pub fn validate_date_format(value: &str) -> bool {
    parse_date(value).is_some()
}

/// Returns `true` if `value` is a date no later than `today`.
///
/// Unparseable input is not in the future; pair with [`validate_date_format`].
pub fn validate_not_in_future(value: &str, today: NaiveDate) -> bool {
    parse_date(value).is_none_or(|date| date <= today)
}

/// Parses `YYYY-MM-DD`, `MM/DD/YYYY` or an RFC 3339 timestamp into a date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
