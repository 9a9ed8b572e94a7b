//! Planning session: state machine and orchestration

mod error;
mod orchestrator;
mod state;

pub use error::PlanError;
pub use orchestrator::{ApplyOutcome, Orchestrator, Submission};
pub use state::{PlannerEvent, PlannerState, reduce};
