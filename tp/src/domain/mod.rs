//! Domain types for trip planning
//!
//! Plain data shared by the prompt builder, the service clients, the
//! orchestrator and the terminal surface.

mod chat;
mod flight;
mod hotel;
mod itinerary;
mod trip;

pub use chat::{ChatMessage, ChatRole};
pub use flight::FlightRecord;
pub use hotel::{HotelRecord, placeholder_hotels};
pub use itinerary::{Itinerary, SECTION_SEPARATOR};
pub use trip::{TripRequest, TripValidationError};
