//! Flight-data service wire types

use serde::Deserialize;

use crate::domain::FlightRecord;

/// Top-level `/flights` response: either `error` or `data`
#[derive(Debug, Default, Deserialize)]
pub(super) struct FlightsResponse {
    pub error: Option<ApiErrorBody>,
    pub data: Option<Vec<WireFlight>>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ApiErrorBody {
    pub info: Option<String>,
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Service-provided error text, `info` preferred
    pub fn text(&self) -> String {
        self.info
            .as_deref()
            .or(self.message.as_deref())
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("Unknown flight-data service error")
            .to_string()
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct WireFlight {
    pub flight_status: Option<String>,
    pub departure: Option<WireEndpoint>,
    pub arrival: Option<WireEndpoint>,
    pub airline: Option<WireAirline>,
    pub flight: Option<WireFlightNumber>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct WireEndpoint {
    pub airport: Option<String>,
    pub iata: Option<String>,
    pub scheduled: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct WireAirline {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct WireFlightNumber {
    pub number: Option<String>,
    pub iata: Option<String>,
}

impl From<WireFlight> for FlightRecord {
    fn from(wire: WireFlight) -> Self {
        let departure = wire.departure.unwrap_or_default();
        let arrival = wire.arrival.unwrap_or_default();
        let flight = wire.flight.unwrap_or_default();

        FlightRecord {
            airline: wire.airline.and_then(|a| a.name).unwrap_or_default(),
            flight_number: flight.iata.or(flight.number).unwrap_or_default(),
            departure_airport: departure.airport.or(departure.iata).unwrap_or_default(),
            departure_time: departure.scheduled.unwrap_or_default(),
            arrival_airport: arrival.airport.or(arrival.iata).unwrap_or_default(),
            arrival_time: arrival.scheduled.unwrap_or_default(),
            status: wire.flight_status.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_flight_maps_to_record() {
        let json = r#"{
            "flight_date": "2025-06-01",
            "flight_status": "scheduled",
            "departure": {"airport": "John F Kennedy International", "iata": "JFK", "scheduled": "2025-06-01T18:30:00+00:00"},
            "arrival": {"airport": "Heathrow", "iata": "LHR", "scheduled": "2025-06-02T06:45:00+00:00"},
            "airline": {"name": "British Airways", "iata": "BA"},
            "flight": {"number": "178", "iata": "BA178"}
        }"#;
        let wire: WireFlight = serde_json::from_str(json).unwrap();
        let record = FlightRecord::from(wire);

        assert_eq!(record.airline, "British Airways");
        assert_eq!(record.flight_number, "BA178");
        assert_eq!(record.departure_airport, "John F Kennedy International");
        assert_eq!(record.departure_time, "2025-06-01T18:30:00+00:00");
        assert_eq!(record.arrival_airport, "Heathrow");
        assert_eq!(record.status, "scheduled");
    }

    #[test]
    fn test_wire_flight_tolerates_nulls() {
        let json = r#"{"flight_status": null, "departure": {"airport": null, "iata": "JFK"}, "airline": null, "flight": {"number": "178"}}"#;
        let record = FlightRecord::from(serde_json::from_str::<WireFlight>(json).unwrap());

        assert_eq!(record.airline, "");
        assert_eq!(record.flight_number, "178");
        assert_eq!(record.departure_airport, "JFK");
        assert_eq!(record.arrival_airport, "");
        assert_eq!(record.status, "");
    }

    #[test]
    fn test_error_body_text() {
        let body = ApiErrorBody {
            info: None,
            message: Some("Rate limit reached".to_string()),
        };
        assert_eq!(body.text(), "Rate limit reached");
        assert_eq!(ApiErrorBody::default().text(), "Unknown flight-data service error");
    }
}
