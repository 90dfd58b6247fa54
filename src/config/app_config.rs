use std::time::Duration;

use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;

use crate::domain::{PasswordResetForm, RegistrationForm, Routes, SignInForm};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub endpoints: EndpointsConfig,
    pub routes: RoutesConfig,
    pub timing: TimingConfig,
    pub registration: RegistrationConfig,
    pub logging: LoggingConfig,
}

/// Where form endpoints live
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// Upper bound on one submission round trip
    pub timeout_ms: u64,
}

/// Endpoint paths, relative to the backend base URL
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub login: String,
    pub register: String,
    pub reset_password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    pub home: String,
    pub login: String,
    pub register: String,
    pub forgot_password: String,
    pub dashboard: String,
}

/// Delays, in milliseconds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub message_dismiss_ms: u64,
    pub sign_in_redirect_ms: u64,
    pub registration_redirect_ms: u64,
    pub password_reset_redirect_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Generate a username from the email when the page has no username field
    pub derive_username: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            login: "/api/login".to_string(),
            register: "/api/register".to_string(),
            reset_password: "/api/reset-password".to_string(),
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        let routes = Routes::default();

        Self {
            home: routes.home,
            login: routes.login,
            register: routes.register,
            forgot_password: routes.forgot_password,
            dashboard: routes.dashboard,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            message_dismiss_ms: 3000,
            sign_in_redirect_ms: 1500,
            registration_redirect_ms: 1500,
            password_reset_redirect_ms: 2000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(
            config::Config::builder()
                .add_source(config::File::with_name("config/default").required(false))
                .add_source(config::File::with_name("config/local").required(false))
                .add_source(
                    config::Environment::with_prefix("APP")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, config::ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.backend.timeout_ms)
    }

    pub fn message_dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.timing.message_dismiss_ms)
    }

    pub fn routes(&self) -> Routes {
        Routes {
            home: self.routes.home.clone(),
            login: self.routes.login.clone(),
            register: self.routes.register.clone(),
            forgot_password: self.routes.forgot_password.clone(),
            dashboard: self.routes.dashboard.clone(),
        }
    }

    pub fn sign_in_form(&self) -> SignInForm {
        SignInForm::new(&self.endpoints.login, &self.routes.dashboard)
            .with_redirect_delay(Duration::from_millis(self.timing.sign_in_redirect_ms))
    }

    pub fn registration_form(&self) -> RegistrationForm {
        RegistrationForm::new(&self.endpoints.register, &self.routes.dashboard)
            .with_redirect_delay(Duration::from_millis(self.timing.registration_redirect_ms))
            .with_derived_username(self.registration.derive_username)
    }

    pub fn password_reset_form(&self) -> PasswordResetForm {
        PasswordResetForm::new(&self.endpoints.reset_password, &self.routes.login)
            .with_redirect_delay(Duration::from_millis(self.timing.password_reset_redirect_ms))
    }
}
