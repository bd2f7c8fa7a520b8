//! Field formatters.

use chrono::Datelike;
use chrono::NaiveDate;

use crate::validation::rules::parse_date;

/// Formats a phone number as `XXX-XXX-XXXX`.
///
/// All non-digits are dropped first. The first ten digits are grouped and any
/// further digits are appended as-is. With fewer than ten digits the bare
/// digits are returned, unpadded.
///
/// ```
/// use formcheck_lib::format::format_phone_number;
///
/// assert_eq!(format_phone_number("1234567890"), "123-456-7890");
/// assert_eq!(format_phone_number("(123) 456-7890"), "123-456-7890");
/// assert_eq!(format_phone_number("12345"), "12345");
/// ```
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 10 {
        return digits;
    }

    format!(
        "{}-{}-{}{}",
        &digits[..3],
        &digits[3..6],
        &digits[6..10],
        &digits[10..]
    )
}

/// Upper-cases the first character and lower-cases the rest. Whitespace is kept.
pub fn capitalize_names(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Renders a date as `month/day/year` with no zero padding.
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Parses `date` and renders it with [`format_date`].
pub fn format_date_str(date: &str) -> Option<String> {
    parse_date(date).map(format_date)
}
