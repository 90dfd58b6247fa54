//! Password reset form

use std::time::Duration;

use serde::Serialize;

use super::{
    validate_password_length, validate_password_match, validate_required, AuthForm, FormInput,
    FormKind, FormTexts, ValidationError,
};

const FIELDS: &[&str] = &["newPassword", "confirmPassword"];

const TEXTS: FormTexts = FormTexts {
    idle_label: "Reset Password",
    busy_label: "Resetting...",
    success: "Password successfully changed!",
    failure_fallback: "Password reset failed",
    missing_fields: "Please fill in all fields",
};

/// Request body for the password reset endpoint
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    pub new_password: String,
    pub confirm_password: String,
}

/// Password reset form definition
#[derive(Debug, Clone)]
pub struct PasswordResetForm {
    endpoint: String,
    sign_in_route: String,
    redirect_delay: Duration,
}

impl PasswordResetForm {
    pub fn new(endpoint: impl Into<String>, sign_in_route: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            sign_in_route: sign_in_route.into(),
            redirect_delay: Duration::from_millis(2000),
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }
}

impl Default for PasswordResetForm {
    fn default() -> Self {
        Self::new("/api/reset-password", "/login")
    }
}

impl AuthForm for PasswordResetForm {
    type Request = PasswordResetRequest;

    fn kind(&self) -> FormKind {
        FormKind::PasswordReset
    }

    fn fields(&self) -> &[&'static str] {
        FIELDS
    }

    fn texts(&self) -> &FormTexts {
        &TEXTS
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn redirect_delay(&self) -> Duration {
        self.redirect_delay
    }

    fn prepare(&self, input: &FormInput) -> Result<PasswordResetRequest, ValidationError> {
        validate_required(input, FIELDS)?;

        let new_password = input.value("newPassword");
        let confirm_password = input.value("confirmPassword");
        validate_password_length(new_password)?;
        validate_password_match(new_password, confirm_password)?;

        Ok(PasswordResetRequest {
            new_password: new_password.to_string(),
            confirm_password: confirm_password.to_string(),
        })
    }

    fn redirect_target(&self, _server_redirect: Option<&str>) -> String {
        self.sign_in_route.clone()
    }

    fn fields_cleared_on_success(&self) -> &[&'static str] {
        FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(new_password: &str, confirm_password: &str) -> FormInput {
        FormInput::new()
            .with("newPassword", new_password)
            .with("confirmPassword", confirm_password)
    }

    #[test]
    fn test_prepare_matching_passwords() {
        let request = PasswordResetForm::default()
            .prepare(&input("abcdefghij", "abcdefghij"))
            .unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"newPassword": "abcdefghij", "confirmPassword": "abcdefghij"})
        );
    }

    #[test]
    fn test_missing_confirmation() {
        assert_eq!(
            PasswordResetForm::default()
                .prepare(&input("abcdefghij", ""))
                .err(),
            Some(ValidationError::MissingFields)
        );
    }

    #[test]
    fn test_short_password() {
        let form = PasswordResetForm::default();
        assert_eq!(
            form.prepare(&input("short", "short")).err(),
            Some(ValidationError::PasswordTooShort(10))
        );
        assert_eq!(
            form.describe(&ValidationError::PasswordTooShort(10)),
            "Password must be at least 10 characters long"
        );
    }

    #[test]
    fn test_nine_characters_rejected_ten_accepted() {
        let form = PasswordResetForm::default();
        assert!(form.prepare(&input("123456789", "123456789")).is_err());
        assert!(form.prepare(&input("1234567890", "1234567890")).is_ok());
    }

    #[test]
    fn test_mismatch() {
        assert_eq!(
            PasswordResetForm::default()
                .prepare(&input("abcdefghij", "abcdefghiJ"))
                .err(),
            Some(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_redirects_to_sign_in_and_clears_fields() {
        let form = PasswordResetForm::default();
        assert_eq!(form.redirect_target(Some("/dashboard")), "/login");
        assert_eq!(
            form.fields_cleared_on_success(),
            &["newPassword", "confirmPassword"]
        );
        assert_eq!(form.redirect_delay(), Duration::from_millis(2000));
    }
}
