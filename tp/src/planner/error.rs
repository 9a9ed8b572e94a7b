//! Orchestrator error types

use thiserror::Error;

use crate::credentials::CredentialKind;
use crate::domain::TripValidationError;
use crate::error::ErrorKind;
use crate::llm::CompletionError;

/// Errors surfaced to the user when submitting a trip
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Missing {which}. Set it with `tp keys set` before planning a trip.")]
    MissingCredential { which: CredentialKind },

    #[error("Invalid trip: {0}")]
    InvalidTrip(#[from] TripValidationError),

    #[error("Failed to generate travel plan: {0}")]
    Completion(#[from] CompletionError),
}

impl PlanError {
    /// Classify for the user-facing taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlanError::MissingCredential { .. } => ErrorKind::MissingCredential,
            PlanError::InvalidTrip(_) => ErrorKind::InvalidInput,
            PlanError::Completion(e) => e.kind(),
        }
    }
}
