use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use crate::domain::{SubmissionEndpoint, SubmissionError};

/// Form endpoint reached over HTTP using reqwest
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpEndpoint {
    pub fn new(base_url: &str) -> Result<Self, SubmissionError> {
        Self::build(base_url, reqwest::Client::builder())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, SubmissionError> {
        Self::build(base_url, reqwest::Client::builder().timeout(timeout))
    }

    fn build(base_url: &str, builder: reqwest::ClientBuilder) -> Result<Self, SubmissionError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            SubmissionError::configuration(format!("Invalid base URL '{}': {}", base_url, e))
        })?;

        let client = builder.build().map_err(|e| {
            SubmissionError::configuration(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<Url, SubmissionError> {
        self.base_url.join(path).map_err(|e| {
            SubmissionError::configuration(format!("Invalid endpoint path '{}': {}", path, e))
        })
    }
}

#[async_trait]
impl SubmissionEndpoint for HttpEndpoint {
    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, SubmissionError> {
        let url = self.url_for(path)?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| SubmissionError::transport(format!("Request failed: {}", e)))?;

        // Error statuses still carry a `{success: false, message}` body
        let status = response.status();
        if !status.is_success() {
            debug!(status = %status, path, "Endpoint answered with an error status");
        }

        response.json().await.map_err(|e| {
            SubmissionError::decode(format!("Failed to parse response (HTTP {}): {}", status, e))
        })
    }
}
