//! Flight lookup against the AviationStack `/flights` endpoint

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use super::FlightError;
use super::types::FlightsResponse;
use crate::config::FlightsConfig;
use crate::domain::FlightRecord;
use crate::error::{ServiceError, error_message_from_body};

/// Looks up scheduled flights for a route
///
/// One bounded request per call; no retries and no caching.
#[async_trait]
pub trait FlightLookup: Send + Sync {
    async fn lookup_flights(
        &self,
        origin: &str,
        destination: &str,
        credential: &str,
    ) -> Result<Vec<FlightRecord>, FlightError>;
}

/// AviationStack flight-data client
pub struct AviationStackClient {
    base_url: String,
    http: Client,
    timeout: Duration,
}

impl AviationStackClient {
    /// Create a new client from configuration
    pub fn from_config(config: &FlightsConfig) -> Result<Self, FlightError> {
        debug!(?config, "from_config: called");
        let timeout = Duration::from_millis(config.timeout_ms);

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FlightError::Service(ServiceError::Network(e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            timeout,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/flights", self.base_url)
    }
}

/// Normalize a route code for the query string
fn route_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[async_trait]
impl FlightLookup for AviationStackClient {
    async fn lookup_flights(
        &self,
        origin: &str,
        destination: &str,
        credential: &str,
    ) -> Result<Vec<FlightRecord>, FlightError> {
        debug!(%origin, %destination, "lookup_flights: called");
        if credential.trim().is_empty() {
            debug!("lookup_flights: no credential");
            return Err(FlightError::MissingCredential);
        }

        let response = self
            .http
            .get(self.endpoint())
            .header("accept", "application/json")
            .query(&[
                ("access_key", credential.to_string()),
                ("dep_iata", route_code(origin)),
                ("arr_iata", route_code(destination)),
            ])
            .send()
            .await
            .map_err(|e| ServiceError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::from_reqwest(e, self.timeout))?;

        if !status.is_success() {
            debug!(%status, "lookup_flights: non-success status");
            return Err(ServiceError::Status {
                status: status.as_u16(),
                message: error_message_from_body(&body),
            }
            .into());
        }

        let parsed: FlightsResponse =
            serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))?;

        if let Some(error) = parsed.error {
            let text = error.text();
            debug!(%text, "lookup_flights: service reported error");
            return Err(FlightError::Api(text));
        }

        let records: Vec<FlightRecord> = parsed
            .data
            .unwrap_or_default()
            .into_iter()
            .map(FlightRecord::from)
            .collect();

        if records.is_empty() {
            debug!("lookup_flights: no records");
            return Err(FlightError::NoResults);
        }

        info!(count = records.len(), %origin, %destination, "Found flights for route");
        Ok(records)
    }
}
