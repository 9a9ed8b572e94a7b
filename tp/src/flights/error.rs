//! Flight lookup error types

use thiserror::Error;

use crate::error::{ErrorKind, ServiceError};

/// Errors that can occur looking up flights
#[derive(Debug, Error)]
pub enum FlightError {
    #[error("Flight-data API key not configured")]
    MissingCredential,

    #[error("Flight-data service error: {0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Api(String),

    #[error("No flights found for this route")]
    NoResults,
}

impl FlightError {
    /// Classify for the user-facing taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            FlightError::MissingCredential => ErrorKind::MissingCredential,
            FlightError::Service(_) => ErrorKind::ServiceError,
            FlightError::Api(_) => ErrorKind::ApiError,
            FlightError::NoResults => ErrorKind::NoResults,
        }
    }

    /// True when the route simply has no data, as opposed to a service or key problem
    pub fn is_no_data(&self) -> bool {
        matches!(self, FlightError::NoResults)
    }
}
