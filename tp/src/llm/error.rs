//! Completion error types

use thiserror::Error;

use crate::error::{ErrorKind, ServiceError};

/// Errors that can occur generating text
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Completion API key not configured")]
    MissingCredential,

    #[error("Received empty response from the completion service")]
    EmptyResponse,

    #[error("Completion service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Invalid completion configuration: {0}")]
    Config(String),
}

impl CompletionError {
    /// Classify for the user-facing taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompletionError::MissingCredential => ErrorKind::MissingCredential,
            CompletionError::EmptyResponse => ErrorKind::EmptyResponse,
            CompletionError::Service(_) => ErrorKind::ServiceError,
            CompletionError::Config(_) => ErrorKind::InvalidInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_kind() {
        assert_eq!(CompletionError::MissingCredential.kind(), ErrorKind::MissingCredential);
        assert_eq!(CompletionError::EmptyResponse.kind(), ErrorKind::EmptyResponse);
        assert_eq!(
            CompletionError::from(ServiceError::Timeout(Duration::from_secs(60))).kind(),
            ErrorKind::ServiceError
        );
    }

    #[test]
    fn test_service_message_is_wrapped() {
        let err = CompletionError::from(ServiceError::Status {
            status: 400,
            message: "API key not valid".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Completion service error: Service responded with status 400: API key not valid"
        );
    }
}
