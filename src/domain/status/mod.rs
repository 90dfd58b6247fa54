//! Status message domain
//!
//! A single transient status line per form, dismissed automatically.

mod messenger;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use messenger::{StatusMessenger, DEFAULT_DISMISS_DELAY};

/// Visual weight of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display state of the status line
///
/// Hiding only flips `visible`; text and severity stay in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
    pub visible: bool,
}

impl StatusMessage {
    pub fn visible(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
            visible: true,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
