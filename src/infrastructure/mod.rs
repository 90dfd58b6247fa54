//! Infrastructure layer - Page rendering, HTTP transport and logging

pub mod console;
pub mod http;
pub mod logging;

pub use console::{ConsolePage, Location};
pub use http::HttpEndpoint;
