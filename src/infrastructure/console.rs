//! Terminal rendition of a form page
//!
//! Field values are supplied up front; everything the controller shows is
//! written as plain lines.

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Mutex, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::domain::{ControlState, FormPage, Severity, StatusMessage};

/// Where the page ended up after a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Path(String),
    Back,
}

/// [`FormPage`] that renders to a writer, stdout by default
pub struct ConsolePage {
    fields: RwLock<HashMap<String, String>>,
    location: RwLock<Option<Location>>,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsolePage {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self::with_writer(fields, Box::new(std::io::stdout()))
    }

    pub fn with_writer(fields: HashMap<String, String>, out: Box<dyn Write + Send>) -> Self {
        Self {
            fields: RwLock::new(fields),
            location: RwLock::new(None),
            out: Mutex::new(out),
        }
    }

    /// Last navigation performed, if any
    pub fn location(&self) -> Option<Location> {
        self.location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn line(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            warn!(error = %e, "Failed to write page output");
        }
    }

    fn set_location(&self, location: Location) {
        *self
            .location
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(location);
    }
}

impl FormPage for ConsolePage {
    fn read_field(&self, name: &str) -> Option<String> {
        self.fields
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn clear_field(&self, name: &str) {
        if let Some(value) = self
            .fields
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(name)
        {
            value.clear();
        }
    }

    fn set_control_state(&self, state: &ControlState) {
        debug!(enabled = state.enabled, label = %state.label, "Submit control updated");
    }

    fn show_message(&self, message: &StatusMessage) {
        if !message.visible {
            debug!("Status message dismissed");
            return;
        }

        let marker = match message.severity {
            Severity::Info => "..",
            Severity::Success => "ok",
            Severity::Error => "!!",
        };
        self.line(&format!("[{}] {}", marker, message.text));
    }

    fn navigate(&self, path: &str) {
        self.line(&format!("-> {}", path));
        self.set_location(Location::Path(path.to_string()));
    }

    fn history_back(&self) {
        self.line("<- back");
        self.set_location(Location::Back);
    }

    fn set_requirement_met(&self, met: bool) {
        let mark = if met { "x" } else { " " };
        self.line(&format!("[{}] At least 10 characters", mark));
    }
}

impl std::fmt::Debug for ConsolePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsolePage")
            .field("location", &self.location())
            .finish_non_exhaustive()
    }
}
