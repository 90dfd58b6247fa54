//! Status messenger with auto-dismiss

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

use super::{Severity, StatusMessage};
use crate::domain::page::FormPage;

/// How long a message stays visible unless superseded
pub const DEFAULT_DISMISS_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Default)]
struct Shared {
    message: StatusMessage,
    /// Bumped on every show/clear so a stale timer never hides a newer message
    generation: u64,
}

/// Renders a transient status line through the page
///
/// Each `show` supersedes the previous message and its auto-dismiss timer.
/// At most one timer is pending at any time.
pub struct StatusMessenger<P: FormPage + ?Sized + 'static> {
    page: Arc<P>,
    shared: Arc<Mutex<Shared>>,
    dismiss_delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl<P: FormPage + ?Sized + 'static> StatusMessenger<P> {
    pub fn new(page: Arc<P>) -> Self {
        Self::with_dismiss_delay(page, DEFAULT_DISMISS_DELAY)
    }

    pub fn with_dismiss_delay(page: Arc<P>, dismiss_delay: Duration) -> Self {
        Self {
            page,
            shared: Arc::new(Mutex::new(Shared::default())),
            dismiss_delay,
            pending: None,
        }
    }

    /// Show a message and restart the auto-dismiss timer
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&mut self, text: impl Into<String>, severity: Severity) {
        self.cancel_pending();

        let generation = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            shared.message = StatusMessage::visible(text, severity);
            self.page.show_message(&shared.message);
            shared.generation
        };

        let page = Arc::clone(&self.page);
        let shared = Arc::clone(&self.shared);
        let delay = self.dismiss_delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let mut shared = lock(&shared);
            if shared.generation != generation || !shared.message.visible {
                return;
            }
            shared.message.visible = false;
            page.show_message(&shared.message);
            trace!(generation, "Status message dismissed");
        }));
    }

    /// Hide the current message and drop any pending dismiss timer
    pub fn clear(&mut self) {
        self.cancel_pending();

        let mut shared = lock(&self.shared);
        shared.generation += 1;
        if shared.message.visible {
            shared.message.visible = false;
            self.page.show_message(&shared.message);
        }
    }

    /// Snapshot of the current message state
    pub fn current(&self) -> StatusMessage {
        lock(&self.shared).message.clone()
    }

    /// Whether an auto-dismiss timer is still waiting to fire
    pub fn has_pending_dismiss(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<P: FormPage + ?Sized + 'static> Drop for StatusMessenger<P> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

impl<P: FormPage + ?Sized + 'static> std::fmt::Debug for StatusMessenger<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusMessenger")
            .field("message", &self.current())
            .field("dismiss_delay", &self.dismiss_delay)
            .field("pending", &self.has_pending_dismiss())
            .finish()
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
