use serde::Deserialize;

use crate::domain::SubmissionError;

/// Result reported by a form endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The server accepted the submission, optionally naming where to go next
    Accepted { redirect: Option<String> },
    /// The server rejected the submission, optionally explaining why
    Rejected { message: Option<String> },
}

/// Wire shape shared by every form endpoint
#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    redirect: Option<String>,
}

impl SubmissionOutcome {
    /// Decode an endpoint response
    ///
    /// A missing `success` counts as a rejection. Anything that is not a
    /// JSON object is a decode failure.
    pub fn decode(value: serde_json::Value) -> Result<Self, SubmissionError> {
        // serde also maps arrays onto struct fields by position
        if !value.is_object() {
            return Err(SubmissionError::decode(
                "Unexpected response shape: expected a JSON object",
            ));
        }

        let body: ResponseBody = serde_json::from_value(value)
            .map_err(|e| SubmissionError::decode(format!("Unexpected response shape: {}", e)))?;

        if body.success {
            Ok(Self::Accepted {
                redirect: non_empty(body.redirect),
            })
        } else {
            Ok(Self::Rejected {
                message: non_empty(body.message),
            })
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
