//! Submission metrics
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! embedding application installs a recorder.

use std::time::Duration;

use metrics::{counter, histogram};

use super::form::FormKind;

/// How a submission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionResult {
    Accepted,
    Rejected,
    Failed,
    Invalid,
}

impl SubmissionResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
            Self::Invalid => "invalid",
        }
    }
}

/// Record one form submission
pub fn record_submission(form: FormKind, result: SubmissionResult, duration: Option<Duration>) {
    let labels = [
        ("form", form.as_str().to_string()),
        ("outcome", result.as_str().to_string()),
    ];

    counter!("auth_form_submissions_total", &labels).increment(1);

    // Local rejections never reach the network
    if let Some(duration) = duration {
        histogram!("auth_form_submission_duration_seconds", &labels)
            .record(duration.as_secs_f64());
    }
}
