//! TripPlanner - travel planning assistant
//!
//! Collects trip parameters, asks a hosted completion service for an
//! itinerary, looks up flights for the route, and answers follow-up
//! questions about the itinerary.
//!
//! # Modules
//!
//! - [`prompts`] - Itinerary and follow-up prompt text
//! - [`llm`] - Completion client trait and provider implementations
//! - [`flights`] - Flight lookup client and flight panel state
//! - [`chat`] - Follow-up conversation about one itinerary
//! - [`planner`] - Planner state machine and orchestrator
//! - [`render`] - Terminal presentation
//! - [`config`] / [`credentials`] - Configuration and API keys
//! - [`cli`] / [`repl`] - Command-line interface and interactive session

pub mod chat;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod domain;
pub mod error;
pub mod flights;
pub mod llm;
pub mod planner;
pub mod prompts;
pub mod render;
pub mod repl;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use chat::{AskError, FollowUp, TurnOutcome};
pub use config::Config;
pub use credentials::{CredentialKind, CredentialStore, Credentials};
pub use domain::{ChatMessage, ChatRole, FlightRecord, HotelRecord, Itinerary, TripRequest};
pub use error::{ErrorKind, ServiceError};
pub use flights::{AviationStackClient, FlightError, FlightLookup, FlightPanel};
pub use llm::{CompletionClient, CompletionError, create_client};
pub use planner::{Orchestrator, PlanError, PlannerState};
