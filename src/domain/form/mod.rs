//! Form domain
//!
//! This module provides the form input snapshot, the local validation rules,
//! and the definitions of the three authentication forms driven by the
//! generic controller.

mod input;
mod password_reset;
mod registration;
mod sign_in;
mod validation;

use std::fmt;
use std::time::Duration;

use serde::Serialize;

pub use input::{FormInput, UserType};
pub use password_reset::{PasswordResetForm, PasswordResetRequest};
pub use registration::{RegistrationForm, RegistrationRequest};
pub use sign_in::{SignInForm, SignInRequest};
pub use validation::{
    password_requirement_met, validate_email, validate_password_length, validate_password_match,
    validate_required, ValidationError, MIN_PASSWORD_LENGTH,
};

/// Which authentication flow a form belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    SignIn,
    Registration,
    PasswordReset,
}

impl FormKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SignIn => "sign_in",
            Self::Registration => "registration",
            Self::PasswordReset => "password_reset",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing texts of one form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormTexts {
    /// Submit control label while idle
    pub idle_label: &'static str,
    /// Submit control label while a request is in flight
    pub busy_label: &'static str,
    pub success: &'static str,
    /// Shown when the server rejects without a message
    pub failure_fallback: &'static str,
    pub missing_fields: &'static str,
}

/// Shown for every transport failure, whatever the form
pub const TRANSPORT_FAILURE_TEXT: &str = "An error occurred. Please try again.";

/// One authentication form driven by the generic controller
pub trait AuthForm: Send + Sync + 'static {
    /// Typed request body sent to the endpoint
    type Request: Serialize + Send + Sync;

    fn kind(&self) -> FormKind;

    /// Every field the form reads from the page
    fn fields(&self) -> &[&'static str];

    fn texts(&self) -> &FormTexts;

    /// Endpoint path the request is posted to
    fn endpoint(&self) -> &str;

    /// Delay between the success message and navigation
    fn redirect_delay(&self) -> Duration;

    /// Validate the input and build the request body
    ///
    /// Rules run in a fixed order and the first failure is returned.
    fn prepare(&self, input: &FormInput) -> Result<Self::Request, ValidationError>;

    /// Resolve the navigation target after a successful submission
    fn redirect_target(&self, server_redirect: Option<&str>) -> String;

    /// Fields wiped right before navigating away on success
    fn fields_cleared_on_success(&self) -> &[&'static str] {
        &[]
    }

    /// Text shown for a validation failure
    fn describe(&self, error: &ValidationError) -> String {
        match error {
            ValidationError::MissingFields => self.texts().missing_fields.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_kind_display() {
        assert_eq!(FormKind::SignIn.to_string(), "sign_in");
        assert_eq!(FormKind::Registration.to_string(), "registration");
        assert_eq!(FormKind::PasswordReset.to_string(), "password_reset");
    }

    #[test]
    fn test_describe_uses_form_specific_missing_text() {
        let form = SignInForm::default();
        assert_eq!(
            form.describe(&ValidationError::MissingFields),
            "Please enter both username and password"
        );
        assert_eq!(
            form.describe(&ValidationError::PasswordMismatch),
            "Passwords do not match"
        );
    }
}
