//! Shared service error types
//!
//! Both hosted services (completion and flight data) fail the same ways at the
//! transport level, so they share `ServiceError`. Component errors wrap it and
//! classify themselves with `ErrorKind`.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// Longest service error body carried into an error message
const MAX_ERROR_BODY_CHARS: usize = 500;

/// User-facing error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required secret is absent; no network call was made
    MissingCredential,
    /// Transport failure or non-success HTTP status
    ServiceError,
    /// The service was reached but reported a domain error
    ApiError,
    /// The completion service answered without any text
    EmptyResponse,
    /// The flight-data service answered without any records
    NoResults,
    /// The request itself was rejected before any call
    InvalidInput,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MissingCredential => "MissingCredential",
            Self::ServiceError => "ServiceError",
            Self::ApiError => "ApiError",
            Self::EmptyResponse => "EmptyResponse",
            Self::NoResults => "NoResults",
            Self::InvalidInput => "InvalidInput",
        };
        write!(f, "{}", name)
    }
}

/// Transport-level failure talking to a hosted service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Service responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Classify a reqwest failure, folding timeouts into `Timeout`
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            debug!(?timeout, "ServiceError::from_reqwest: timeout");
            Self::Timeout(timeout)
        } else if err.is_decode() {
            debug!("ServiceError::from_reqwest: decode");
            Self::Decode(err.to_string())
        } else {
            debug!("ServiceError::from_reqwest: network");
            Self::Network(err)
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull a readable message out of a service error body
///
/// Looks for `error.info`, then `error.message`, then a bare string `error`,
/// and falls back to the (truncated) body text.
pub fn error_message_from_body(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let error = &value["error"];
        for key in ["info", "message"] {
            if let Some(text) = error[key].as_str()
                && !text.trim().is_empty()
            {
                return text.to_string();
            }
        }
        if let Some(text) = error.as_str() {
            return text.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    if trimmed.chars().count() > MAX_ERROR_BODY_CHARS {
        let head: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}...", head)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_info() {
        let body = r#"{"error": {"code": "invalid_access_key", "info": "You have not supplied a valid API Access Key.", "message": "other"}}"#;
        assert_eq!(
            error_message_from_body(body),
            "You have not supplied a valid API Access Key."
        );
    }

    #[test]
    fn test_error_message_falls_back_to_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message_from_body(body), "API key not valid");
    }

    #[test]
    fn test_error_message_plain_body() {
        assert_eq!(error_message_from_body("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(error_message_from_body(""), "empty response body");
    }

    #[test]
    fn test_error_message_truncates_long_body() {
        let body = "x".repeat(2000);
        let message = error_message_from_body(&body);
        assert!(message.ends_with("..."));
        assert_eq!(message.chars().count(), MAX_ERROR_BODY_CHARS + 3);
    }

    #[test]
    fn test_status_accessor() {
        let err = ServiceError::Status {
            status: 503,
            message: "down".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(ServiceError::Timeout(Duration::from_secs(1)).status(), None);
        assert_eq!(err.to_string(), "Service responded with status 503: down");
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::NoResults.to_string(), "NoResults");
        assert_eq!(ErrorKind::MissingCredential.to_string(), "MissingCredential");
    }
}
