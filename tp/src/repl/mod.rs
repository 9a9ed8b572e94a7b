//! Interactive REPL for TripPlanner
//!
//! Collects a trip form, prints the plan, then answers follow-up questions
//! about the itinerary until the user quits.

mod session;

pub use session::{ReplSession, print_plan_error};

use eyre::Result;

use crate::planner::Orchestrator;

/// Run the interactive REPL
///
/// This is the main entry point for `tp repl`, and for `tp plan` once the
/// plan has been printed.
pub async fn run_interactive(orchestrator: Orchestrator) -> Result<()> {
    let mut session = ReplSession::new(orchestrator)?;
    session.run().await
}
