use reqwest::StatusCode;
use thiserror::Error;

/// Errors that occur while submitting documents to ZincSearch.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("zinc HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("zinc returned status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to decode zinc response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SubmitError {
    pub fn status(status: StatusCode, body: String) -> Self {
        SubmitError::Status { status, body }
    }

    /// Transport failures, throttling and server-side errors are worth another
    /// attempt; rejected credentials or malformed payloads are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            SubmitError::Http(_) => true,
            SubmitError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            SubmitError::Decode(_) => false,
        }
    }
}
