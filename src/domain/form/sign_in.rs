//! Sign-in form

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::{validate_required, AuthForm, FormInput, FormKind, FormTexts, UserType, ValidationError};

const FIELDS: &[&str] = &["username", "password", "userType"];
const REQUIRED: &[&str] = &["username", "password"];

const TEXTS: FormTexts = FormTexts {
    idle_label: "Sign in",
    busy_label: "Signing in...",
    success: "Login successful! Redirecting...",
    failure_fallback: "Login failed",
    missing_fields: "Please enter both username and password",
};

/// Request body for the sign-in endpoint
#[derive(Clone, Serialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserType>,
}

/// Sign-in form definition
#[derive(Debug, Clone)]
pub struct SignInForm {
    endpoint: String,
    default_redirect: String,
    redirect_delay: Duration,
}

impl SignInForm {
    /// Create a sign-in form posting to `endpoint`
    ///
    /// `default_redirect` is used when the server does not supply a target.
    pub fn new(endpoint: impl Into<String>, default_redirect: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            default_redirect: default_redirect.into(),
            redirect_delay: Duration::from_millis(1500),
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }
}

impl Default for SignInForm {
    fn default() -> Self {
        Self::new("/api/login", "/dashboard")
    }
}

impl AuthForm for SignInForm {
    type Request = SignInRequest;

    fn kind(&self) -> FormKind {
        FormKind::SignIn
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

    fn prepare(&self, input: &FormInput) -> Result<SignInRequest, ValidationError> {
        validate_required(input, REQUIRED)?;

        let role = match input.get("userType").filter(|value| !value.is_empty()) {
            Some(value) => match value.parse::<UserType>() {
                Ok(role) => Some(role),
                Err(e) => {
                    debug!(error = %e, "Ignoring unrecognized sign-in role");
                    None
                }
            },
            None => None,
        };

        Ok(SignInRequest {
            username: input.value("username").to_string(),
            password: input.value("password").to_string(),
            role,
        })
    }

    fn redirect_target(&self, server_redirect: Option<&str>) -> String {
        server_redirect
            .filter(|target| !target.is_empty())
            .unwrap_or(&self.default_redirect)
            .to_string()
    }
}
