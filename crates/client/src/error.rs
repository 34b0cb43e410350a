//! Errors surfaced by the backend client.
//!
//! [`ClientError`] follows the backend's status codes: the list state and the form controller
//! turn every variant into a fixed user-facing message, so the variants only need to be precise
//! enough for logging and for callers that want to react to a missing session.
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid base_url: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// Maps a non-success status and the server message to an error.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status.as_u16() {
            401 => ClientError::Unauthorized,
            403 => ClientError::Forbidden,
            404 => ClientError::NotFound,
            400 | 422 => ClientError::Validation(message),
            409 => ClientError::Conflict(message),
            _ => ClientError::Server { status, message },
        }
    }

    /// `true` when the session token is missing, expired or rejected.
    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

/// Errors reading or writing the persisted session file.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
