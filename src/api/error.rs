use serde::Deserialize;
use thiserror::Error;

/// Errors returned by [`RevoltClient`](super::RevoltClient) calls.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Structured error object returned by the server, e.g.
    /// `{"type": "InvalidToken"}`. Displays as the bare type tag.
    #[error("{error_type}")]
    Typed { status: u16, error_type: String },
    #[error("API error (status {status}): {body}")]
    Status { status: u16, body: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid response: {0}")]
    Decode(String),
    #[error("Not logged in")]
    MissingSession,
}

impl ApiError {
    /// The server's error type tag, if this was a structured error.
    pub fn error_type(&self) -> Option<&str> {
        match self {
            Self::Typed { error_type, .. } => Some(error_type),
            _ => None,
        }
    }

    pub(crate) fn from_response_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => Self::Typed {
                status,
                error_type: parsed.error_type,
            },
            Err(_) => Self::Status {
                status,
                body: body.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    error_type: String,
}
