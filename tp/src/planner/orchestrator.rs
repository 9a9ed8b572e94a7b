//! Orchestrator - owns the planning session and sequences the clients
//!
//! All mutation happens through `&mut self`, so results from the completion
//! service and the flight-data service are applied one at a time. Each
//! result carries the version of the submission that requested it; results
//! for an older submission are dropped.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::PlanError;
use super::state::{PlannerEvent, PlannerState, reduce};
use crate::chat::{AskError, FollowUp, PendingTurn, TurnOutcome};
use crate::credentials::Credentials;
use crate::domain::{ChatMessage, FlightRecord, HotelRecord, Itinerary, TripRequest, placeholder_hotels};
use crate::flights::{FlightError, FlightLookup, FlightPanel};
use crate::llm::{CompletionClient, CompletionError};
use crate::prompts::itinerary_prompt;

/// An accepted trip submission awaiting its results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub version: u64,
    pub prompt: String,
    pub origin: String,
    pub destination: String,
}

/// Whether a result was applied or dropped as stale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Stale,
}

/// Top-level planning session
pub struct Orchestrator {
    completion: Arc<dyn CompletionClient>,
    flights: Arc<dyn FlightLookup>,
    credentials: Credentials,
    show_chat_errors: bool,
    state: PlannerState,
    version: u64,
    trip: Option<TripRequest>,
    flight_panel: Option<FlightPanel>,
    hotels: Vec<HotelRecord>,
    followup: Option<FollowUp>,
}

impl Orchestrator {
    /// Create a session with injected clients and credentials
    pub fn new(completion: Arc<dyn CompletionClient>, flights: Arc<dyn FlightLookup>, credentials: Credentials) -> Self {
        debug!(provider = %completion.provider(), ?credentials, "Orchestrator::new: called");
        Self {
            completion,
            flights,
            credentials,
            show_chat_errors: true,
            state: PlannerState::Idle,
            version: 0,
            trip: None,
            flight_panel: None,
            hotels: Vec::new(),
            followup: None,
        }
    }

    /// Choose whether failed follow-up turns appear in the conversation
    pub fn with_chat_errors_shown(mut self, show: bool) -> Self {
        self.show_chat_errors = show;
        self
    }

    /// Replace the credentials used for subsequent calls
    pub fn update_credentials(&mut self, credentials: Credentials) {
        debug!(?credentials, "update_credentials: called");
        self.credentials = credentials;
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn provider(&self) -> &str {
        self.completion.provider()
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Version of the most recent accepted submission
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn itinerary(&self) -> Option<&Itinerary> {
        self.state.itinerary()
    }

    pub fn trip(&self) -> Option<&TripRequest> {
        self.trip.as_ref()
    }

    /// Flight results; `None` until a trip has been submitted
    pub fn flight_panel(&self) -> Option<&FlightPanel> {
        self.flight_panel.as_ref()
    }

    pub fn hotels(&self) -> &[HotelRecord] {
        &self.hotels
    }

    pub fn followup(&self) -> Option<&FollowUp> {
        self.followup.as_ref()
    }

    /// Follow-up messages for the current itinerary
    pub fn messages(&self) -> &[ChatMessage] {
        self.followup.as_ref().map(|f| f.messages()).unwrap_or(&[])
    }

    /// Accept a trip form and prepare both requests
    ///
    /// Credentials are checked first; when either is missing nothing else
    /// changes and no request may be made.
    pub fn begin_submission(&mut self, trip: TripRequest) -> Result<Submission, PlanError> {
        debug!(source = %trip.source, destination = %trip.destination, "begin_submission: called");
        if let Some(which) = self.credentials.missing().into_iter().next() {
            warn!(%which, "Trip submission blocked by missing credential");
            return Err(PlanError::MissingCredential { which });
        }
        trip.validate()?;

        self.version += 1;
        let version = self.version;
        self.state = reduce(std::mem::take(&mut self.state), PlannerEvent::Submitted { version });

        let submission = Submission {
            version,
            prompt: itinerary_prompt(&trip),
            origin: trip.source.clone(),
            destination: trip.destination.clone(),
        };
        self.hotels = placeholder_hotels(&trip.destination);
        self.flight_panel = Some(FlightPanel::Pending);
        self.trip = Some(trip);

        info!(%version, "Trip submitted");
        Ok(submission)
    }

    /// Apply the completion result for a submission
    ///
    /// A new itinerary replaces the follow-up conversation. A failure keeps
    /// the previous itinerary on display and is returned to the caller.
    pub fn apply_itinerary(
        &mut self,
        version: u64,
        result: Result<String, CompletionError>,
    ) -> Result<ApplyOutcome, PlanError> {
        debug!(%version, current = %self.version, state = self.state.name(), "apply_itinerary: called");
        if !self.is_awaiting(version) {
            debug!("apply_itinerary: stale result");
            return Ok(ApplyOutcome::Stale);
        }

        match result {
            Ok(text) => {
                self.state = reduce(
                    std::mem::take(&mut self.state),
                    PlannerEvent::ItineraryGenerated {
                        version,
                        itinerary: Itinerary::new(text),
                    },
                );
                let PlannerState::ItineraryReady { itinerary, .. } = &self.state else {
                    return Ok(ApplyOutcome::Stale);
                };
                self.followup = Some(FollowUp::new(itinerary.clone(), version, self.show_chat_errors));
                info!(%version, "Itinerary ready");
                Ok(ApplyOutcome::Applied)
            }
            Err(e) => {
                warn!(%version, error = %e, kind = %e.kind(), "Itinerary generation failed");
                self.state = reduce(
                    std::mem::take(&mut self.state),
                    PlannerEvent::GenerationFailed {
                        version,
                        error: e.to_string(),
                    },
                );
                Err(PlanError::Completion(e))
            }
        }
    }

    /// True while the itinerary for `version` is still outstanding
    fn is_awaiting(&self, version: u64) -> bool {
        matches!(self.state, PlannerState::SubmittingItinerary { version: awaiting, .. } if awaiting == version)
    }

    /// Apply the flight lookup result for a submission
    pub fn apply_flights(&mut self, version: u64, result: Result<Vec<FlightRecord>, FlightError>) -> ApplyOutcome {
        debug!(%version, current = %self.version, "apply_flights: called");
        if version != self.version {
            debug!("apply_flights: stale result");
            return ApplyOutcome::Stale;
        }
        if let Err(e) = &result
            && !e.is_no_data()
        {
            warn!(error = %e, kind = %e.kind(), "Flight lookup failed");
        }
        self.flight_panel = Some(FlightPanel::from(result));
        ApplyOutcome::Applied
    }

    /// Submit a trip and wait for both results
    ///
    /// The completion request and the flight lookup run concurrently; the
    /// flight panel is filled in even when itinerary generation fails.
    pub async fn submit(&mut self, trip: TripRequest) -> Result<ApplyOutcome, PlanError> {
        let submission = self.begin_submission(trip)?;
        let completion = Arc::clone(&self.completion);
        let flights = Arc::clone(&self.flights);
        let completion_key = self.credentials.completion_key().unwrap_or_default().to_string();
        let flight_key = self.credentials.flight_key().unwrap_or_default().to_string();

        let (itinerary, flight_result) = tokio::join!(
            completion.generate(&completion_key, &submission.prompt),
            flights.lookup_flights(&submission.origin, &submission.destination, &flight_key),
        );

        self.apply_flights(submission.version, flight_result);
        self.apply_itinerary(submission.version, itinerary)
    }

    /// Record a follow-up question about the current itinerary
    pub fn begin_question(&mut self, question: &str) -> Result<PendingTurn, AskError> {
        debug!("begin_question: called");
        self.followup.as_mut().ok_or(AskError::NoItinerary)?.begin(question)
    }

    /// Apply a follow-up answer; answers for a replaced itinerary are dropped
    pub fn apply_chat_reply(&mut self, pending: &PendingTurn, result: Result<String, CompletionError>) -> TurnOutcome {
        debug!(version = pending.version, "apply_chat_reply: called");
        match self.followup.as_mut() {
            Some(followup) => followup.complete(pending, result),
            None => TurnOutcome::Stale,
        }
    }

    /// Ask a follow-up question and wait for the answer
    pub async fn ask(&mut self, question: &str) -> Result<TurnOutcome, AskError> {
        let pending = self.begin_question(question)?;
        let completion = Arc::clone(&self.completion);
        let key = self.credentials.completion_key().unwrap_or_default().to_string();
        let result = completion.generate(&key, &pending.prompt).await;
        Ok(self.apply_chat_reply(&pending, result))
    }
}
