//! Form validation utilities
//!
//! Rules are applied in a fixed order by each form: required fields, email
//! format, password length, password confirmation. The first failing rule
//! is the only one reported.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::FormInput;

/// Minimum password length, counted in characters
pub const MIN_PASSWORD_LENGTH: usize = 10;

/// Two-part `local@domain.tld` shape with no whitespace and a single `@`
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Errors that can occur during local form validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingFields,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Validate that every named field is present and non-empty
///
/// Values are taken verbatim: a field holding only whitespace counts as filled.
pub fn validate_required(input: &FormInput, fields: &[&str]) -> Result<(), ValidationError> {
    if fields.iter().all(|field| input.is_filled(field)) {
        Ok(())
    } else {
        Err(ValidationError::MissingFields)
    }
}

/// Validate an email address against the `x@y.z` shape
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Validate the minimum password length
pub fn validate_password_length(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    Ok(())
}

/// Validate that a password and its confirmation are byte-for-byte equal
pub fn validate_password_match(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password == confirmation {
        Ok(())
    } else {
        Err(ValidationError::PasswordMismatch)
    }
}

/// Whether a password currently satisfies the length requirement
pub fn password_requirement_met(password: &str) -> bool {
    validate_password_length(password).is_ok()
}
