//! Terminal presentation of planning results
//!
//! Every function here returns a `String` and never fails; the REPL and the
//! one-shot commands decide where it goes. Itinerary text is printed
//! verbatim, only its styling changes.

use chrono::DateTime;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::domain::{ChatMessage, ChatRole, FlightRecord, HotelRecord, Itinerary, TripRequest};
use crate::flights::FlightPanel;
use crate::planner::Orchestrator;

/// Style for the `index`th itinerary section; styles alternate
fn section_style(index: usize, section: &str) -> ColoredString {
    if index % 2 == 0 {
        section.bright_white()
    } else {
        section.cyan()
    }
}

/// Rendered itinerary sections, one per blank-line-separated block
pub fn itinerary_sections(itinerary: &Itinerary) -> Vec<String> {
    itinerary
        .sections()
        .into_iter()
        .enumerate()
        .map(|(i, section)| section_style(i, section).to_string())
        .collect()
}

/// Whole itinerary with alternating section styles
pub fn render_itinerary(itinerary: &Itinerary) -> String {
    itinerary_sections(itinerary).join("\n\n")
}

/// Clock time of an RFC 3339 timestamp in its own offset, or the raw text
pub fn format_flight_time(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => ts.format("%H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn render_flight(flight: &FlightRecord) -> String {
    format!(
        "  {} {}\n    {} {}  ->  {} {}  [{}]",
        flight.flight_number.bold(),
        flight.airline,
        flight.departure_airport,
        format_flight_time(&flight.departure_time).yellow(),
        flight.arrival_airport,
        format_flight_time(&flight.arrival_time).yellow(),
        flight.status.dimmed(),
    )
}

/// Flight panel body
pub fn render_flight_panel(panel: &FlightPanel) -> String {
    let mut out = format!("{}\n", "Available Flights".bright_cyan().bold());
    match panel {
        FlightPanel::Pending => out.push_str(&format!("  {}", "Looking up flights...".dimmed())),
        FlightPanel::Loaded(flights) => {
            let lines: Vec<String> = flights.iter().map(render_flight).collect();
            out.push_str(&lines.join("\n"));
        }
        FlightPanel::NoData => out.push_str(&format!("  {}", "No flights found for this route.".dimmed())),
        FlightPanel::Unavailable(message) => {
            out.push_str(&format!("  {} {}", "Flight data unavailable:".yellow(), message));
        }
    }
    out
}

/// Hotel name padded to its column; padding goes inside the styling
fn hotel_name_cell(hotel: &HotelRecord) -> ColoredString {
    format!("{:16}", hotel.name).bold()
}

/// Hotel suggestions
pub fn render_hotels(hotels: &[HotelRecord]) -> String {
    let mut out = format!("{}\n", "Hotel Suggestions".bright_cyan().bold());
    let lines: Vec<String> = hotels
        .iter()
        .map(|h| {
            format!(
                "  {} {:12} {} {}",
                hotel_name_cell(h),
                h.price_per_night,
                format!("★ {}", h.rating).yellow(),
                h.location.dimmed()
            )
        })
        .collect();
    out.push_str(&lines.join("\n"));
    out
}

/// One chat message with a role label
pub fn render_message(message: &ChatMessage) -> String {
    let label = match message.role {
        ChatRole::User => "You:".bright_green(),
        ChatRole::Assistant => "Assistant:".bright_blue(),
        ChatRole::Error => "Error:".red(),
    };
    format!("{} {}", label, message.content)
}

/// Full plan view: flights, hotels, then the itinerary
pub fn render_plan(orch: &Orchestrator) -> String {
    let mut parts = Vec::new();
    if let Some(panel) = orch.flight_panel() {
        parts.push(render_flight_panel(panel));
    }
    if !orch.hotels().is_empty() {
        parts.push(render_hotels(orch.hotels()));
    }
    if let Some(itinerary) = orch.itinerary() {
        parts.push(format!("{}\n{}", "Travel Plan".bright_cyan().bold(), render_itinerary(itinerary)));
    }
    parts.join("\n\n")
}

/// Serializable view of a planning session, for `--format json`
#[derive(Debug, Clone, Serialize)]
pub struct PlanSnapshot {
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip: Option<TripRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<String>,
    pub sections: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flights: Option<FlightPanel>,
    pub hotels: Vec<HotelRecord>,
    pub messages: Vec<ChatMessage>,
}

impl PlanSnapshot {
    pub fn from_orchestrator(orch: &Orchestrator) -> Self {
        let itinerary = orch.itinerary();
        Self {
            state: orch.state().name(),
            trip: orch.trip().cloned(),
            itinerary: itinerary.map(|i| i.text().to_string()),
            sections: itinerary
                .map(|i| i.sections().into_iter().map(str::to_string).collect())
                .unwrap_or_default(),
            error: orch.state().error().map(str::to_string),
            flights: orch.flight_panel().cloned(),
            hotels: orch.hotels().to_vec(),
            messages: orch.messages().to_vec(),
        }
    }
}
