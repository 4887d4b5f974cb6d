//! Client error types

use thiserror::Error;

/// Client error type
///
/// Remote failures are terminal for the current operation: there is no
/// retry policy, callers surface the message and wait for the user to
/// resubmit.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failed (connection, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered non-2xx with an error body
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Authentication required or token rejected
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Local validation failed; no request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the server rejected the request as not-found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Keep the first field message; it is already user-presentable.
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        ClientError::Validation(message)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
