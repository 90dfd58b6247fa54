//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, BackendConfig, EndpointsConfig, LogFormat, LoggingConfig, RegistrationConfig,
    RoutesConfig, TimingConfig,
};
