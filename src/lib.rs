//! Auth Forms
//!
//! Client-side controllers for the sign-in, registration and password
//! reset pages of a clinic portal:
//! - Local validation before anything goes over the wire
//! - One JSON submission per attempt, answered with `{success, message, redirect}`
//! - A self-dismissing status line and delayed redirects
//! - Navigation links between the pages

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
