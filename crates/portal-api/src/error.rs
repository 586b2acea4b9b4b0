//! API error types.

use thiserror::Error;

/// Error type for API requests.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response; `message` is the server's `detail` field when the
    /// body was JSON, otherwise the HTTP status text.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Transport-level failure (connect, timeout, body read, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// The HTTP status code, when the server produced a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) | ApiError::Decode(e) => e.status().map(|s| s.as_u16()),
        }
    }

    /// Human-readable message for display alongside the shared error field.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true if this error is transient and the request can be retried.
    ///
    /// Transient errors are connection failures, timeouts, and 5xx responses.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => *status >= 500,
            ApiError::Http(e) | ApiError::Decode(e) => {
                if e.is_connect() || e.is_timeout() {
                    return true;
                }
                if let Some(status) = e.status() {
                    return status.is_server_error();
                }
                false
            }
        }
    }
}

/// Result type alias using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;
