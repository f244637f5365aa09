use validator::ValidateEmail;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::NewWaitlistEntry,
};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

const MAX_NAME_LEN: usize = 100;

/// Validates that the input looks like a valid email address
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.validate_email()
}

/// Trims the submission and rejects it when a field is missing or malformed.
pub fn validate_new_entry(input: &NewWaitlistEntry) -> AppResult<NewWaitlistEntry> {
    if input.has_missing_fields() {
        return Err(AppError::InvalidInput(MISSING_FIELDS_MESSAGE.into()));
    }

    let entry = input.trimmed();

    if entry.first_name.chars().count() > MAX_NAME_LEN
        || entry.last_name.chars().count() > MAX_NAME_LEN
    {
        return Err(AppError::InvalidInput(format!(
            "Names must be at most {MAX_NAME_LEN} characters"
        )));
    }

    if !is_valid_email(&entry.email) {
        return Err(AppError::InvalidInput(INVALID_EMAIL_MESSAGE.into()));
    }

    Ok(entry)
}
