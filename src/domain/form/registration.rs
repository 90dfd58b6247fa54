//! Registration form

use std::time::Duration;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use super::{
    validate_email, validate_password_length, validate_password_match, validate_required, AuthForm,
    FormInput, FormKind, FormTexts, UserType, ValidationError,
};

const FIELDS: &[&str] = &[
    "fullName",
    "email",
    "username",
    "userType",
    "contact",
    "password",
    "confirmPassword",
];

const REQUIRED_WITH_DERIVED_USERNAME: &[&str] = &[
    "fullName",
    "email",
    "userType",
    "contact",
    "password",
    "confirmPassword",
];

const TEXTS: FormTexts = FormTexts {
    idle_label: "Create Account",
    busy_label: "Creating Account...",
    success: "Registration successful! Redirecting to dashboard...",
    failure_fallback: "Registration failed",
    missing_fields: "Please fill in all required fields",
};

const USERNAME_SUFFIX_LENGTH: usize = 5;

/// Request body for the registration endpoint
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub user_type: UserType,
    pub contact: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registration form definition
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    endpoint: String,
    redirect: String,
    redirect_delay: Duration,
    derive_username: bool,
}

impl RegistrationForm {
    pub fn new(endpoint: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            redirect: redirect.into(),
            redirect_delay: Duration::from_millis(1500),
            derive_username: false,
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// Generate a username from the email when the page has none
    pub fn with_derived_username(mut self, enabled: bool) -> Self {
        self.derive_username = enabled;
        self
    }

    fn required_fields(&self) -> &'static [&'static str] {
        if self.derive_username {
            REQUIRED_WITH_DERIVED_USERNAME
        } else {
            FIELDS
        }
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new("/api/register", "/dashboard")
    }
}

impl AuthForm for RegistrationForm {
    type Request = RegistrationRequest;

    fn kind(&self) -> FormKind {
        FormKind::Registration
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

    fn prepare(&self, input: &FormInput) -> Result<RegistrationRequest, ValidationError> {
        validate_required(input, self.required_fields())?;

        // An unrecognized value means the select holds no valid choice
        let user_type = input
            .value("userType")
            .parse::<UserType>()
            .map_err(|_| ValidationError::MissingFields)?;

        let email = input.value("email");
        validate_email(email)?;

        let password = input.value("password");
        let confirm_password = input.value("confirmPassword");
        validate_password_length(password)?;
        validate_password_match(password, confirm_password)?;

        let username = match input.get("username").filter(|value| !value.is_empty()) {
            Some(username) => username.to_string(),
            None => {
                let username = derive_username(email);
                debug!(username = %username, "Derived username from email");
                username
            }
        };

        Ok(RegistrationRequest {
            full_name: input.value("fullName").to_string(),
            email: email.to_string(),
            username,
            user_type,
            contact: input.value("contact").to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        })
    }

    fn redirect_target(&self, _server_redirect: Option<&str>) -> String {
        self.redirect.clone()
    }
}

/// Email local part followed by a short random lowercase suffix
fn derive_username(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(USERNAME_SUFFIX_LENGTH)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();

    format!("{}{}", local, suffix)
}
