use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::SubmissionError;

/// Trait for posting a form body to its endpoint (for mocking)
///
/// Implementations return the decoded JSON body whatever the status code;
/// the body alone decides between success and failure.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SubmissionEndpoint: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, SubmissionError>;
}
