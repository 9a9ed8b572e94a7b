//! Trip request submitted from the trip form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Reasons a trip request is rejected before any service call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripValidationError {
    #[error("Source location is required")]
    MissingSource,

    #[error("Destination is required")]
    MissingDestination,

    #[error("Number of travelers must be at least 1")]
    NoTravelers,

    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// Structured trip form submission
///
/// Held by the orchestrator from submission until the next submission
/// replaces it; never mutated in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Origin, used verbatim in the prompt and as the departure route code
    pub source: String,

    /// Destination, used verbatim in the prompt and as the arrival route code
    pub destination: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Free-form budget text (e.g. "$3000")
    pub budget: String,

    pub traveler_count: u32,

    /// Free-form interests (e.g. "history, food")
    pub interests: String,
}

impl TripRequest {
    /// Create a request for one traveler with no budget or interests
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            start_date,
            end_date,
            budget: String::new(),
            traveler_count: 1,
            interests: String::new(),
        }
    }

    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = budget.into();
        self
    }

    pub fn with_travelers(mut self, traveler_count: u32) -> Self {
        self.traveler_count = traveler_count;
        self
    }

    pub fn with_interests(mut self, interests: impl Into<String>) -> Self {
        self.interests = interests.into();
        self
    }

    /// Check the request before it is submitted
    pub fn validate(&self) -> Result<(), TripValidationError> {
        debug!(source = %self.source, destination = %self.destination, "TripRequest::validate: called");
        if self.source.trim().is_empty() {
            return Err(TripValidationError::MissingSource);
        }
        if self.destination.trim().is_empty() {
            return Err(TripValidationError::MissingDestination);
        }
        if self.traveler_count < 1 {
            return Err(TripValidationError::NoTravelers);
        }
        if self.end_date < self.start_date {
            return Err(TripValidationError::EndBeforeStart {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Number of calendar days covered, counting both ends
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
