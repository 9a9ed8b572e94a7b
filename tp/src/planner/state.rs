//! Planner state machine
//!
//! Pure transitions over (state, event). The orchestrator feeds events in;
//! nothing here performs I/O, so every transition is unit-testable.

use tracing::debug;

use crate::domain::Itinerary;

/// Top-level itinerary state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlannerState {
    /// Nothing submitted yet
    #[default]
    Idle,

    /// Waiting for the completion service
    SubmittingItinerary {
        version: u64,
        /// Itinerary from an earlier submission, still displayed
        previous: Option<Itinerary>,
    },

    /// The itinerary for `version` is available
    ItineraryReady { version: u64, itinerary: Itinerary },

    /// Generation for `version` failed
    ItineraryFailed {
        version: u64,
        error: String,
        previous: Option<Itinerary>,
    },
}

/// Inputs to the planner state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerEvent {
    /// A trip form was accepted and tagged with `version`
    Submitted { version: u64 },

    /// The completion service returned text for `version`
    ItineraryGenerated { version: u64, itinerary: Itinerary },

    /// The completion service failed for `version`
    GenerationFailed { version: u64, error: String },
}

impl PlannerState {
    /// True while an itinerary request is outstanding
    pub fn is_loading(&self) -> bool {
        matches!(self, PlannerState::SubmittingItinerary { .. })
    }

    /// Version of the submission this state belongs to (0 when idle)
    pub fn version(&self) -> u64 {
        match self {
            PlannerState::Idle => 0,
            PlannerState::SubmittingItinerary { version, .. }
            | PlannerState::ItineraryReady { version, .. }
            | PlannerState::ItineraryFailed { version, .. } => *version,
        }
    }

    /// The itinerary currently on display, if any
    pub fn itinerary(&self) -> Option<&Itinerary> {
        match self {
            PlannerState::Idle => None,
            PlannerState::ItineraryReady { itinerary, .. } => Some(itinerary),
            PlannerState::SubmittingItinerary { previous, .. } | PlannerState::ItineraryFailed { previous, .. } => {
                previous.as_ref()
            }
        }
    }

    /// Error text of the last failed generation
    pub fn error(&self) -> Option<&str> {
        match self {
            PlannerState::ItineraryFailed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Short state name for logs and status lines
    pub fn name(&self) -> &'static str {
        match self {
            PlannerState::Idle => "Idle",
            PlannerState::SubmittingItinerary { .. } => "SubmittingItinerary",
            PlannerState::ItineraryReady { .. } => "ItineraryReady",
            PlannerState::ItineraryFailed { .. } => "ItineraryFailed",
        }
    }
}

/// Apply one event to a state
///
/// Results tagged with a version other than the one being awaited leave the
/// state unchanged.
pub fn reduce(state: PlannerState, event: PlannerEvent) -> PlannerState {
    debug!(state = state.name(), ?event, "reduce: called");
    match event {
        PlannerEvent::Submitted { version } => {
            let previous = state.itinerary().cloned();
            PlannerState::SubmittingItinerary { version, previous }
        }
        PlannerEvent::ItineraryGenerated { version, itinerary } => match state {
            PlannerState::SubmittingItinerary { version: awaiting, .. } if awaiting == version => {
                PlannerState::ItineraryReady { version, itinerary }
            }
            other => {
                debug!(version, current = other.version(), "reduce: dropping stale itinerary");
                other
            }
        },
        PlannerEvent::GenerationFailed { version, error } => match state {
            PlannerState::SubmittingItinerary {
                version: awaiting,
                previous,
            } if awaiting == version => PlannerState::ItineraryFailed {
                version,
                error,
                previous,
            },
            other => {
                debug!(version, current = other.version(), "reduce: dropping stale failure");
                other
            }
        },
    }
}
