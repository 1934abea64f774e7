//! Client error types

use thiserror::Error;

/// Client error type
///
/// Conflicts are not errors: a conflicting assignment is an expected reply
/// and is reported through [`crate::AssignmentResult::Conflict`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection refused, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service understood the request and rejected it
    #[error("Service error: {0}")]
    Service(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Required remote settings are absent, the user must enter them first
    #[error("Missing settings: {}", .0.join(", "))]
    MissingSettings(Vec<&'static str>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem error (settings storage)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether this failure came from the transport rather than the caller
    ///
    /// Transport failures are surfaced once and never retried.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Http(_)
                | ClientError::Service(_)
                | ClientError::InvalidResponse(_)
                | ClientError::NotFound(_)
                | ClientError::Validation(_)
                | ClientError::Internal(_)
        )
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_settings_message_lists_fields() {
        let err = ClientError::MissingSettings(vec!["name", "home"]);
        assert_eq!(err.to_string(), "Missing settings: name, home");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_service_error_is_transport() {
        assert!(ClientError::Service("No such zone".into()).is_transport());
    }
}
