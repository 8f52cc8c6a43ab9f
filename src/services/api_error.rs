use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Failure of a backend API call, split by where it went wrong: the wire,
/// the response status, or the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// Non-2xx response carrying the backend's own `detail` message.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
    /// Non-2xx response without a usable error body.
    #[error("backend returned {status}")]
    Status { status: StatusCode },
    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Error body shape the backend uses for every non-2xx response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    /// Build an error from a non-success response, pulling the backend's
    /// `detail` message out of the body when there is one.
    pub async fn from_response(response: Response) -> Self {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(body) => ApiError::Rejected {
                status,
                detail: body.detail,
            },
            Err(_) => ApiError::Status { status },
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// Message to surface in the console: the backend's own words when it
    /// sent any, otherwise the caller's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self.detail() {
            Some(detail) => detail.to_string(),
            None => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e)
        } else {
            ApiError::Transport(e)
        }
    }
}
