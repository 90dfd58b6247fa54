//! Page capability used by form controllers
//!
//! Controllers never touch a real page directly. Everything they read or
//! change goes through [`FormPage`], so validation and submission logic can
//! run against a fake.

#[cfg(test)]
use mockall::automock;

use crate::domain::status::StatusMessage;

/// Enabled flag and label of a form's submit control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub enabled: bool,
    pub label: String,
}

impl ControlState {
    /// Enabled control showing its idle label
    pub fn ready(label: impl Into<String>) -> Self {
        Self {
            enabled: true,
            label: label.into(),
        }
    }

    /// Disabled control showing its in-progress label
    pub fn busy(label: impl Into<String>) -> Self {
        Self {
            enabled: false,
            label: label.into(),
        }
    }
}

/// Capabilities a page offers to its form controller
#[cfg_attr(test, automock)]
pub trait FormPage: Send + Sync {
    /// Current value of a field, `None` when the page has no such field
    fn read_field(&self, name: &str) -> Option<String>;

    fn clear_field(&self, name: &str);

    fn set_control_state(&self, state: &ControlState);

    /// Render the status line
    fn show_message(&self, message: &StatusMessage);

    /// Full-page navigation to `path`
    fn navigate(&self, path: &str);

    /// Navigate back in history
    fn history_back(&self);

    /// Mark the password requirement indicator as met or unmet
    fn set_requirement_met(&self, _met: bool) {}
}
