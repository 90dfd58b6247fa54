//! HTTP transport for form submissions

mod endpoint;

pub use endpoint::HttpEndpoint;
