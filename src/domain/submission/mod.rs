//! Submission domain
//!
//! Posting a validated form to its endpoint and interpreting the answer.

mod endpoint;
mod outcome;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::debug;

pub use endpoint::SubmissionEndpoint;
pub use outcome::SubmissionOutcome;

#[cfg(test)]
pub use endpoint::mock;
#[cfg(test)]
pub use endpoint::MockSubmissionEndpoint;

use crate::domain::SubmissionError;

/// Upper bound on one submission round trip
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Issues exactly one endpoint call per submission, bounded by a timeout
#[derive(Debug)]
pub struct Submitter<E: SubmissionEndpoint + ?Sized> {
    endpoint: Arc<E>,
    timeout: Duration,
}

impl<E: SubmissionEndpoint + ?Sized> Clone for Submitter<E> {
    fn clone(&self) -> Self {
        Self {
            endpoint: Arc::clone(&self.endpoint),
            timeout: self.timeout,
        }
    }
}

impl<E: SubmissionEndpoint + ?Sized> Submitter<E> {
    pub fn new(endpoint: Arc<E>) -> Self {
        Self::with_timeout(endpoint, DEFAULT_SUBMIT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: Arc<E>, timeout: Duration) -> Self {
        Self { endpoint, timeout }
    }

    pub fn endpoint(&self) -> &Arc<E> {
        &self.endpoint
    }

    /// Post `body` to `path` and decode the outcome
    ///
    /// Expiry of the timeout is reported as [`SubmissionError::Timeout`].
    pub async fn submit(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        debug!(path, "Dispatching form submission");

        let response = match timeout(self.timeout, self.endpoint.post_json(path, body)).await {
            Ok(result) => result?,
            Err(_) => return Err(SubmissionError::Timeout(self.timeout)),
        };

        SubmissionOutcome::decode(response)
    }
}
