//! Form controller
//!
//! Coordinates validation, submission and status display for one form on
//! one page. The state machine is
//!
//! ```text
//! Idle -> Validating -> Idle                      (invalid input, message shown)
//!                    -> Submitting -> IdleError   (failure, control re-enabled)
//!                                  -> SuccessPendingRedirect -> page unload
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::form::{password_requirement_met, AuthForm, FormInput, TRANSPORT_FAILURE_TEXT};
use crate::domain::page::{ControlState, FormPage};
use crate::domain::status::{Severity, StatusMessage, StatusMessenger};
use crate::domain::submission::{SubmissionEndpoint, SubmissionOutcome, Submitter};
use crate::domain::SubmissionError;
use crate::domain::metrics::{record_submission, SubmissionResult};

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Validating,
    Submitting,
    /// A submission failed; the control is enabled again
    IdleError,
    /// Accepted; navigation happens once the redirect delay elapses
    SuccessPendingRedirect,
}

impl ControllerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::IdleError => "idle_error",
            Self::SuccessPendingRedirect => "success_pending_redirect",
        }
    }
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drives one form through validation, submission and redirect
///
/// One controller exists per page. All state it needs (status line, timers,
/// pending redirect) is owned here.
pub struct FormController<F, P, E>
where
    F: AuthForm,
    P: FormPage + ?Sized + 'static,
    E: SubmissionEndpoint + ?Sized,
{
    id: Uuid,
    form: F,
    page: Arc<P>,
    submitter: Submitter<E>,
    messenger: StatusMessenger<P>,
    state: ControllerState,
    pending_redirect: Option<JoinHandle<()>>,
}

impl<F, P, E> FormController<F, P, E>
where
    F: AuthForm,
    P: FormPage + ?Sized + 'static,
    E: SubmissionEndpoint + ?Sized,
{
    pub fn new(form: F, page: Arc<P>, endpoint: Arc<E>) -> Self {
        Self {
            id: Uuid::new_v4(),
            form,
            messenger: StatusMessenger::new(Arc::clone(&page)),
            page,
            submitter: Submitter::new(endpoint),
            state: ControllerState::Idle,
            pending_redirect: None,
        }
    }

    /// Bound each submission round trip
    pub fn with_submit_timeout(mut self, timeout: Duration) -> Self {
        self.submitter = Submitter::with_timeout(Arc::clone(self.submitter.endpoint()), timeout);
        self
    }

    /// Change how long status messages stay visible
    pub fn with_dismiss_delay(mut self, delay: Duration) -> Self {
        self.messenger = StatusMessenger::with_dismiss_delay(Arc::clone(&self.page), delay);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn status(&self) -> StatusMessage {
        self.messenger.current()
    }

    pub fn has_pending_dismiss(&self) -> bool {
        self.messenger.has_pending_dismiss()
    }

    pub fn has_pending_redirect(&self) -> bool {
        self.pending_redirect
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Handle one submit action from the user
    ///
    /// Makes at most one endpoint call. Returns the state the controller
    /// settles in.
    #[instrument(skip(self), fields(form = %self.form.kind(), controller_id = %self.id))]
    pub async fn submit(&mut self) -> ControllerState {
        self.messenger.clear();
        self.state = ControllerState::Validating;

        let input = FormInput::capture(self.page.as_ref(), self.form.fields());

        let request = match self.form.prepare(&input) {
            Ok(request) => request,
            Err(error) => {
                debug!(reason = ?error, "Form input rejected locally");
                record_submission(self.form.kind(), SubmissionResult::Invalid, None);

                let text = self.form.describe(&error);
                self.messenger.show(text, Severity::Error);
                self.state = ControllerState::Idle;
                return self.state;
            }
        };

        let texts = *self.form.texts();

        // The control must be disabled before the request goes out
        self.state = ControllerState::Submitting;
        self.page
            .set_control_state(&ControlState::busy(texts.busy_label));
        self.messenger.show(texts.busy_label, Severity::Info);

        let started = Instant::now();
        let result = match serde_json::to_value(&request) {
            Ok(body) => self.submitter.submit(self.form.endpoint(), &body).await,
            Err(e) => Err(SubmissionError::transport(format!(
                "Failed to encode request: {}",
                e
            ))),
        };
        let elapsed = started.elapsed();

        match result {
            Ok(SubmissionOutcome::Accepted { redirect }) => {
                let target = self.form.redirect_target(redirect.as_deref());
                info!(redirect = %target, "Form submission accepted");
                record_submission(self.form.kind(), SubmissionResult::Accepted, Some(elapsed));

                // The control stays disabled: the page is about to unload
                self.messenger.show(texts.success, Severity::Success);
                self.schedule_redirect(target);
                self.state = ControllerState::SuccessPendingRedirect;
            }
            Ok(SubmissionOutcome::Rejected { message }) => {
                info!(message = ?message, "Form submission rejected by server");
                record_submission(self.form.kind(), SubmissionResult::Rejected, Some(elapsed));

                let text = message.unwrap_or_else(|| texts.failure_fallback.to_string());
                self.restore(text);
            }
            Err(error) => {
                warn!(error = %error, kind = error.kind(), "Form submission failed");
                record_submission(self.form.kind(), SubmissionResult::Failed, Some(elapsed));

                self.restore(TRANSPORT_FAILURE_TEXT.to_string());
            }
        }

        self.state
    }

    /// Wait for a scheduled redirect to complete
    ///
    /// Returns `true` if a navigation was performed.
    pub async fn finish_redirect(&mut self) -> bool {
        match self.pending_redirect.take() {
            Some(handle) => handle.await.is_ok(),
            None => false,
        }
    }

    /// Update the password requirement indicator as the user types
    pub fn password_input(&self, value: &str) {
        self.page.set_requirement_met(password_requirement_met(value));
    }

    /// Show the failure, then give the user the control back
    fn restore(&mut self, text: String) {
        self.messenger.show(text, Severity::Error);
        self.page
            .set_control_state(&ControlState::ready(self.form.texts().idle_label));
        self.state = ControllerState::IdleError;
    }

    fn schedule_redirect(&mut self, target: String) {
        if let Some(handle) = self.pending_redirect.take() {
            handle.abort();
        }

        let page = Arc::clone(&self.page);
        let delay = self.form.redirect_delay();
        let cleared = self.form.fields_cleared_on_success().to_vec();

        self.pending_redirect = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            for field in cleared {
                page.clear_field(field);
            }
            page.navigate(&target);
        }));
    }
}

impl<F, P, E> Drop for FormController<F, P, E>
where
    F: AuthForm,
    P: FormPage + ?Sized + 'static,
    E: SubmissionEndpoint + ?Sized,
{
    fn drop(&mut self) {
        if let Some(handle) = self.pending_redirect.take() {
            handle.abort();
        }
    }
}

impl<F, P, E> fmt::Debug for FormController<F, P, E>
where
    F: AuthForm,
    P: FormPage + ?Sized + 'static,
    E: SubmissionEndpoint + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("id", &self.id)
            .field("form", &self.form.kind())
            .field("state", &self.state)
            .field("status", &self.messenger.current())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::{PasswordResetForm, RegistrationForm, SignInForm};
    use crate::domain::page::mock::{PageEvent, RecordingPage};
    use crate::domain::submission::mock::StubEndpoint;
    use crate::domain::submission::MockSubmissionEndpoint;
    use serde_json::json;

    fn sign_in_page(username: &str, password: &str) -> Arc<RecordingPage> {
        Arc::new(
            RecordingPage::new()
                .with_field("username", username)
                .with_field("password", password),
        )
    }

    fn registration_page(password: &str, confirm: &str) -> Arc<RecordingPage> {
        Arc::new(
            RecordingPage::new()
                .with_field("fullName", "Alice Liddell")
                .with_field("email", "alice@example.com")
                .with_field("username", "alice")
                .with_field("userType", "patient")
                .with_field("contact", "555-0100")
                .with_field("password", password)
                .with_field("confirmPassword", confirm),
        )
    }

    fn reset_page(new_password: &str, confirm: &str) -> Arc<RecordingPage> {
        Arc::new(
            RecordingPage::new()
                .with_field("newPassword", new_password)
                .with_field("confirmPassword", confirm),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_sign_in_success_redirects_after_delay() {
        let page = sign_in_page("alice", "secret123");
        let endpoint = Arc::new(
            StubEndpoint::new()
                .with_response("/api/login", json!({"success": true, "redirect": "/dashboard"}))
                .observed_by(Arc::clone(&page)),
        );
        let mut controller =
            FormController::new(SignInForm::default(), Arc::clone(&page), Arc::clone(&endpoint));

        let state = controller.submit().await;

        assert_eq!(state, ControllerState::SuccessPendingRedirect);
        assert_eq!(
            page.control_states(),
            vec![ControlState::busy("Signing in...")]
        );
        assert_eq!(
            page.last_message(),
            Some(StatusMessage::visible(
                "Login successful! Redirecting...",
                Severity::Success
            ))
        );
        assert_eq!(
            endpoint.calls(),
            vec![(
                "/api/login".to_string(),
                json!({"username": "alice", "password": "secret123"})
            )]
        );

        tokio::time::sleep(Duration::from_millis(1499)).await;
        assert!(page.navigations().is_empty());
        assert!(controller.has_pending_redirect());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(page.navigations(), vec!["/dashboard".to_string()]);
        assert!(controller.finish_redirect().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_control_disabled_before_dispatch() {
        let page = sign_in_page("alice", "secret1234");
        let endpoint = Arc::new(
            StubEndpoint::new()
                .with_response("/api/login", json!({"success": true}))
                .observed_by(Arc::clone(&page)),
        );
        let mut controller = FormController::new(SignInForm::default(), Arc::clone(&page), endpoint);

        controller.submit().await;

        let disabled = page
            .position(|e| matches!(e, PageEvent::ControlState(s) if !s.enabled))
            .unwrap();
        let dispatched = page
            .position(|e| matches!(e, PageEvent::Dispatched(_)))
            .unwrap();
        assert!(disabled < dispatched);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_message_shown_while_submitting() {
        let page = sign_in_page("alice", "secret1234");
        let endpoint =
            Arc::new(StubEndpoint::new().with_response("/api/login", json!({"success": false})));
        let mut controller = FormController::new(SignInForm::default(), Arc::clone(&page), endpoint);

        controller.submit().await;

        let messages = page.messages();
        assert_eq!(
            messages[0],
            StatusMessage::visible("Signing in...", Severity::Info)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_sign_in_uses_server_redirect() {
        let page = sign_in_page("bob", "secret1234");
        let endpoint = Arc::new(
            StubEndpoint::new()
                .with_response("/api/login", json!({"success": true, "redirect": "/doctor"})),
        );
        let mut controller = FormController::new(SignInForm::default(), Arc::clone(&page), endpoint);

        controller.submit().await;
        controller.finish_redirect().await;

        assert_eq!(page.navigations(), vec!["/doctor".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sign_in_transport_failure_restores_control() {
        let page = sign_in_page("alice", "secret1234");
        let endpoint = Arc::new(StubEndpoint::new().with_error("/api/login", "connection reset"));
        let mut controller = FormController::new(SignInForm::default(), Arc::clone(&page), endpoint);

        let state = controller.submit().await;

        assert_eq!(state, ControllerState::IdleError);
        assert_eq!(
            controller.status(),
            StatusMessage::visible("An error occurred. Please try again.", Severity::Error)
        );
        assert_eq!(
            page.control_states(),
            vec![
                ControlState::busy("Signing in..."),
                ControlState::ready("Sign in")
            ]
        );

        // Message update happens before the control is restored
        let error_shown = page
            .position(|e| matches!(e, PageEvent::Message(m) if m.is_error()))
            .unwrap();
        let restored = page
            .position(|e| matches!(e, PageEvent::ControlState(s) if s.enabled))
            .unwrap();
        assert!(error_shown < restored);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(page.navigations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_array_response_is_not_a_success() {
        let page = sign_in_page("alice", "secret1234");
        let endpoint = Arc::new(
            StubEndpoint::new().with_response("/api/login", json!([true, null, "/x"])),
        );
        let mut controller = FormController::new(SignInForm::default(), Arc::clone(&page), endpoint);

        let state = controller.submit().await;

        assert_eq!(state, ControllerState::IdleError);
        assert_eq!(
            controller.status(),
            StatusMessage::visible("An error occurred. Please try again.", Severity::Error)
        );

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(page.navigations().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sign_in_rejected_with_server_message() {
        let page = sign_in_page("alice", "wrongpassword");
        let endpoint = Arc::new(StubEndpoint::new().with_response(
            "/api/login",
            json!({"success": false, "message": "Invalid username or password"}),
        ));
        let mut controller = FormController::new(SignInForm::default(), Arc::clone(&page), endpoint);

        let state = controller.submit().await;

        assert_eq!(state, ControllerState::IdleError);
        assert_eq!(controller.status().text, "Invalid username or password");
        assert_eq!(
            page.control_states().last(),
            Some(&ControlState::ready("Sign in"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejection_without_message_uses_fallback() {
        let page = reset_page("abcdefghij", "abcdefghij");
        let endpoint = Arc::new(
            StubEndpoint::new().with_response("/api/reset-password", json!({"success": false})),
        );
        let mut controller =
            FormController::new(PasswordResetForm::default(), Arc::clone(&page), endpoint);

        controller.submit().await;

        assert_eq!(controller.status().text, "Password reset failed");
        assert_eq!(
            page.control_states().last(),
            Some(&ControlState::ready("Reset Password"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_takes_transport_failure_path() {
        let page = sign_in_page("alice", "secret1234");
        let endpoint = Arc::new(StubEndpoint::new().with_delayed_response(
            "/api/login",
            Duration::from_secs(120),
            json!({"success": true}),
        ));
        let mut controller = FormController::new(SignInForm::default(), Arc::clone(&page), endpoint)
            .with_submit_timeout(Duration::from_secs(3));

        let state = controller.submit().await;

        assert_eq!(state, ControllerState::IdleError);
        assert_eq!(controller.status().text, TRANSPORT_FAILURE_TEXT);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_fields_make_no_call() {
        let page = sign_in_page("alice", "");
        let mut endpoint = MockSubmissionEndpoint::new();
        endpoint.expect_post_json().times(0);
        let mut controller =
            FormController::new(SignInForm::default(), Arc::clone(&page), Arc::new(endpoint));

        let state = controller.submit().await;

        assert_eq!(state, ControllerState::Idle);
        assert_eq!(
            controller.status(),
            StatusMessage::visible("Please enter both username and password", Severity::Error)
        );
        assert!(page.control_states().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_password_reset_short_password() {
        let page = reset_page("short", "short");
        let endpoint = Arc::new(StubEndpoint::new());
        let mut controller = FormController::new(
            PasswordResetForm::default(),
            Arc::clone(&page),
            Arc::clone(&endpoint),
        );

        let state = controller.submit().await;

        assert_eq!(state, ControllerState::Idle);
        assert!(controller
            .status()
            .text
            .contains("at least 10 characters"));
        assert_eq!(endpoint.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_registration_mismatch() {
        let page = registration_page("abcdefghij", "abcdefghik");
        let endpoint = Arc::new(StubEndpoint::new());
        let mut controller = FormController::new(
            RegistrationForm::default(),
            Arc::clone(&page),
            Arc::clone(&endpoint),
        );

        let state = controller.submit().await;

        assert_eq!(state, ControllerState::Idle);
        assert_eq!(controller.status().text, "Passwords do not match");
        assert_eq!(endpoint.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_registration_success_goes_to_dashboard() {
        let page = registration_page("abcdefghij", "abcdefghij");
        let endpoint = Arc::new(StubEndpoint::new().with_response(
            "/api/register",
            json!({"success": true, "message": "Registration successful!"}),
        ));
        let mut controller = FormController::new(
            RegistrationForm::default(),
            Arc::clone(&page),
            Arc::clone(&endpoint),
        );

        controller.submit().await;

        assert_eq!(
            controller.status().text,
            "Registration successful! Redirecting to dashboard..."
        );
        assert_eq!(endpoint.calls()[0].1["userType"], "patient");

        tokio::time::sleep(Duration::from_millis(1501)).await;
        assert_eq!(page.navigations(), vec!["/dashboard".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_password_reset_success_clears_fields_then_navigates() {
        let page = reset_page("abcdefghij", "abcdefghij");
        let endpoint = Arc::new(
            StubEndpoint::new().with_response("/api/reset-password", json!({"success": true})),
        );
        let mut controller =
            FormController::new(PasswordResetForm::default(), Arc::clone(&page), endpoint);

        controller.submit().await;

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(page.navigations().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        let events = page.events();
        let tail = &events[events.len() - 3..];
        assert_eq!(
            tail,
            &[
                PageEvent::ClearField("newPassword".to_string()),
                PageEvent::ClearField("confirmPassword".to_string()),
                PageEvent::Navigate("/login".to_string()),
            ]
        );
        assert_eq!(page.read_field("newPassword"), Some(String::new()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_keeps_control_disabled() {
        let page = reset_page("abcdefghij", "abcdefghij");
        let endpoint = Arc::new(
            StubEndpoint::new().with_response("/api/reset-password", json!({"success": true})),
        );
        let mut controller =
            FormController::new(PasswordResetForm::default(), Arc::clone(&page), endpoint);

        controller.submit().await;
        controller.finish_redirect().await;

        assert!(page.control_states().iter().all(|s| !s.enabled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_failure() {
        let page = sign_in_page("alice", "wrong");
        let endpoint = Arc::new(StubEndpoint::new().with_response(
            "/api/login",
            json!({"success": false, "message": "Invalid username or password"}),
        ));
        let mut controller =
            FormController::new(SignInForm::default(), Arc::clone(&page), Arc::clone(&endpoint));

        assert_eq!(controller.submit().await, ControllerState::IdleError);

        page.set_field("password", "");
        assert_eq!(controller.submit().await, ControllerState::Idle);
        assert_eq!(endpoint.call_count(), 1);
        assert!(controller.has_pending_dismiss());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_submit_clears_previous_message() {
        let page = sign_in_page("alice", "");
        let endpoint = Arc::new(StubEndpoint::new());
        let mut controller = FormController::new(SignInForm::default(), Arc::clone(&page), endpoint);

        controller.submit().await;
        controller.submit().await;

        let messages = page.messages();
        assert_eq!(messages.len(), 3);
        assert!(!messages[1].visible);
        assert!(messages[2].visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_password_input_updates_requirement() {
        let page = Arc::new(RecordingPage::new());
        let controller = FormController::new(
            RegistrationForm::default(),
            Arc::clone(&page),
            Arc::new(StubEndpoint::new()),
        );

        controller.password_input("abc");
        controller.password_input("abcdefghij");

        assert_eq!(
            page.events(),
            vec![
                PageEvent::RequirementMet(false),
                PageEvent::RequirementMet(true)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_controllers() {
        let first = sign_in_page("alice", "");
        let second = sign_in_page("bob", "secret1234");
        let endpoint =
            Arc::new(StubEndpoint::new().with_response("/api/login", json!({"success": false})));

        let mut a =
            FormController::new(SignInForm::default(), Arc::clone(&first), Arc::clone(&endpoint));
        let mut b =
            FormController::new(SignInForm::default(), Arc::clone(&second), Arc::clone(&endpoint));

        a.submit().await;
        b.submit().await;

        assert_ne!(a.id(), b.id());
        assert_eq!(a.status().text, "Please enter both username and password");
        assert_eq!(b.status().text, "Login failed");
        assert_eq!(endpoint.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_auto_clears() {
        let page = sign_in_page("alice", "");
        let mut controller = FormController::new(
            SignInForm::default(),
            Arc::clone(&page),
            Arc::new(StubEndpoint::new()),
        )
        .with_dismiss_delay(Duration::from_millis(500));

        controller.submit().await;
        tokio::time::sleep(Duration::from_millis(501)).await;

        assert!(!controller.status().visible);
        assert!(!controller.has_pending_dismiss());
    }
}
