//! Messages shown for failing registration fields.

pub const FIRST_NAME_MESSAGE: &str = "First name must only contain letters.";
pub const LAST_NAME_MESSAGE: &str = "Last name must only contain letters.";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const PASSWORD_MESSAGE: &str =
    "Password must include at least 1 number and be 8 characters long.";
pub const CONFIRM_PASSWORD_MESSAGE: &str = "Passwords do not match.";
pub const PHONE_MESSAGE: &str = "Phone number must be 10 digits long.";
pub const DATE_MESSAGE: &str = "Please select a valid date.";
pub const FUTURE_DATE_MESSAGE: &str = "Selected date cannot be in the future.";
pub const CHOICE_MESSAGE: &str = "Please select yes or no.";
pub const CHECKBOX_MESSAGE: &str = "Please check the box.";
