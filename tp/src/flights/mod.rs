//! Flight lookup module for TripPlanner
//!
//! Queries the flight-data service by origin/destination codes and tracks
//! the outcome as a display panel.

use serde::Serialize;
use tracing::debug;

mod client;
mod error;
mod types;

pub use client::{AviationStackClient, FlightLookup};
pub use error::FlightError;

#[cfg(test)]
pub use client::mock;

use crate::domain::FlightRecord;

/// Flight results as the presentation layer sees them
///
/// Keeps "no flights on this route" apart from "service or key problem".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum FlightPanel {
    /// Lookup still in flight
    Pending,
    /// At least one flight was found
    Loaded(Vec<FlightRecord>),
    /// The service answered but had no flights for the route
    NoData,
    /// The service or credential failed; carries a readable message
    Unavailable(String),
}

impl FlightPanel {
    pub fn flights(&self) -> &[FlightRecord] {
        match self {
            FlightPanel::Loaded(records) => records,
            _ => &[],
        }
    }
}

impl From<Result<Vec<FlightRecord>, FlightError>> for FlightPanel {
    fn from(result: Result<Vec<FlightRecord>, FlightError>) -> Self {
        match result {
            Ok(records) if records.is_empty() => FlightPanel::NoData,
            Ok(records) => FlightPanel::Loaded(records),
            Err(e) if e.is_no_data() => {
                debug!("FlightPanel::from: no data");
                FlightPanel::NoData
            }
            Err(e) => {
                debug!(error = %e, "FlightPanel::from: unavailable");
                FlightPanel::Unavailable(e.to_string())
            }
        }
    }
}
