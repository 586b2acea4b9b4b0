//! Session error types.

use portal_api::ApiError;
use portal_storage::StorageError;
use thiserror::Error;

/// Error type for session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Remote authentication call failed; displays the server message verbatim
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Token store error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Invalid transition in the session status machine
    #[error("Invalid session state transition: {0}")]
    State(String),
}

impl SessionError {
    /// Human-readable message, as placed in the shared `AuthState.error` field.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Result type alias using SessionError.
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_is_verbatim() {
        let err = SessionError::Api(ApiError::Status {
            status: 401,
            message: "Invalid credentials".to_string(),
        });
        assert_eq!(err.message(), "Invalid credentials");
    }
}
