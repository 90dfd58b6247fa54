//! CLI module for Auth Forms
//!
//! Drives the form pages from a terminal against a real backend:
//! - `sign-in`: submit the sign-in form
//! - `register`: submit the registration form
//! - `reset-password`: submit the password reset form
//! - `link`: follow one of a page's auxiliary links

pub mod link;
pub mod submit;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Auth Forms - sign-in, registration and password reset clients
#[derive(Parser)]
#[command(name = "auth-forms")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Submit the sign-in form
    SignIn(submit::SignInArgs),

    /// Submit the registration form
    Register(submit::RegisterArgs),

    /// Submit the password reset form
    ResetPassword(submit::ResetPasswordArgs),

    /// Follow a link shown next to a form
    Link(link::LinkArgs),
}

/// Load configuration, apply command line overrides and start logging
pub(crate) fn prepare(base_url: Option<String>) -> AppConfig {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();
    if let Some(base_url) = base_url {
        config.backend.base_url = base_url;
    }

    logging::init_logging(&config.logging);
    config
}
