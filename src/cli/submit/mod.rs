//! Form submission commands

use std::collections::HashMap;
use std::sync::Arc;

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{AuthForm, ControllerState, FormController, FormKind, FormPage};
use crate::infrastructure::{ConsolePage, HttpEndpoint};

/// Arguments for the sign-in command
#[derive(Args, Clone, Debug)]
pub struct SignInArgs {
    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    /// doctor or patient
    #[arg(long)]
    pub user_type: Option<String>,
}

/// Arguments for the register command
#[derive(Args, Clone, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub full_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Omit to have one derived from the email (when enabled in config)
    #[arg(long)]
    pub username: Option<String>,

    /// doctor or patient
    #[arg(long)]
    pub user_type: Option<String>,

    #[arg(long)]
    pub contact: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    #[arg(long)]
    pub confirm_password: Option<String>,
}

/// Arguments for the reset-password command
#[derive(Args, Clone, Debug)]
pub struct ResetPasswordArgs {
    #[arg(long)]
    pub new_password: Option<String>,

    #[arg(long)]
    pub confirm_password: Option<String>,
}

impl SignInArgs {
    fn into_fields(self) -> HashMap<String, String> {
        page_fields([
            ("username", self.username),
            ("password", self.password),
            ("userType", self.user_type),
        ])
    }
}

impl RegisterArgs {
    fn into_fields(self) -> HashMap<String, String> {
        page_fields([
            ("fullName", self.full_name),
            ("email", self.email),
            ("username", self.username),
            ("userType", self.user_type),
            ("contact", self.contact),
            ("password", self.password),
            ("confirmPassword", self.confirm_password),
        ])
    }
}

impl ResetPasswordArgs {
    fn into_fields(self) -> HashMap<String, String> {
        page_fields([
            ("newPassword", self.new_password),
            ("confirmPassword", self.confirm_password),
        ])
    }
}

/// Fields left out on the command line are absent from the page
fn page_fields<const N: usize>(values: [(&str, Option<String>); N]) -> HashMap<String, String> {
    values
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name.to_string(), value)))
        .collect()
}

pub async fn run_sign_in(args: SignInArgs, base_url: Option<String>) -> anyhow::Result<()> {
    let config = super::prepare(base_url);
    drive(&config, config.sign_in_form(), args.into_fields()).await
}

pub async fn run_register(args: RegisterArgs, base_url: Option<String>) -> anyhow::Result<()> {
    let config = super::prepare(base_url);
    drive(&config, config.registration_form(), args.into_fields()).await
}

pub async fn run_reset_password(
    args: ResetPasswordArgs,
    base_url: Option<String>,
) -> anyhow::Result<()> {
    let config = super::prepare(base_url);
    drive(&config, config.password_reset_form(), args.into_fields()).await
}

/// Submit `form` once and wait for its redirect
async fn drive<F: AuthForm>(
    config: &AppConfig,
    form: F,
    fields: HashMap<String, String>,
) -> anyhow::Result<()> {
    let kind = form.kind();
    let page = Arc::new(ConsolePage::new(fields));
    let endpoint = Arc::new(HttpEndpoint::with_timeout(
        &config.backend.base_url,
        config.submit_timeout(),
    )?);

    info!(form = %kind, backend = %endpoint.base_url(), "Submitting form");

    let mut controller = FormController::new(form, Arc::clone(&page), endpoint)
        .with_submit_timeout(config.submit_timeout())
        .with_dismiss_delay(config.message_dismiss_delay());

    if kind == FormKind::Registration {
        if let Some(password) = page.read_field("password") {
            controller.password_input(&password);
        }
    }

    match controller.submit().await {
        ControllerState::SuccessPendingRedirect => {
            controller.finish_redirect().await;
            Ok(())
        }
        state => anyhow::bail!("{} form was not accepted ({})", kind, state),
    }
}
