//! Flight schedule record

use serde::{Deserialize, Serialize};

/// One scheduled flight as reported by the flight-data service
///
/// Read-only display data. Fields the service leaves out are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub airline: String,
    pub flight_number: String,
    pub departure_airport: String,
    /// Scheduled departure timestamp as sent by the service
    pub departure_time: String,
    pub arrival_airport: String,
    /// Scheduled arrival timestamp as sent by the service
    pub arrival_time: String,
    pub status: String,
}
