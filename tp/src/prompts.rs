//! Prompt construction
//!
//! Pure functions turning a trip request or a follow-up question into the
//! text sent to the completion service. Same input, same bytes out.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::TripRequest;

/// Calendar date format used inside prompts (e.g. 6/1/2025)
pub const PROMPT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Section headings the itinerary prompt asks the model to produce, in order
pub const ITINERARY_SECTIONS: [&str; 9] = [
    "Flight Details",
    "Transportation Recommendations",
    "Accommodation Suggestions",
    "Daily Activities and Attractions",
    "Dining Recommendations",
    "Estimated Costs Breakdown",
    "Local Tips and Cultural Considerations",
    "Weather and Packing Suggestions",
    "Safety Tips",
];

/// Format a date the way it is shown to the model
pub fn format_date(date: NaiveDate) -> String {
    date.format(PROMPT_DATE_FORMAT).to_string()
}

/// Build the itinerary-generation prompt for a trip
pub fn itinerary_prompt(trip: &TripRequest) -> String {
    debug!(source = %trip.source, destination = %trip.destination, "itinerary_prompt: called");
    format!(
        r#"As a travel planning expert, create a detailed travel itinerary for a trip. Format your response in clear sections with regular text (no asterisks or special characters). Include the following details:

Basic Trip Information:
From: {source}
To: {destination}
Dates: {start} to {end}
Budget: {budget}
Number of Travelers: {travelers}
Interests: {interests}

Please structure your response in the following sections:

{flights}:
[Provide recommended flight options with:
- Suggested airlines
- Estimated flight duration
- Potential layovers
- Price range for flights
- Best time to book
- Airport transfer information]

{transport}:
[Provide detailed transport options and suggestions]

{accommodation}:
[List recommended places to stay within the budget]

{activities}:
[Break down activities day by day]

{dining}:
[Suggest local restaurants and cuisine to try]

{costs}:
[Provide a detailed budget breakdown]

{tips}:
[Share important cultural information and local customs]

{weather}:
[Include weather forecast and packing recommendations]

{safety}:
[Provide relevant safety information]

Please ensure each section is separated by blank lines and avoid using any special characters or formatting symbols."#,
        source = trip.source,
        destination = trip.destination,
        start = format_date(trip.start_date),
        end = format_date(trip.end_date),
        budget = trip.budget,
        travelers = trip.traveler_count,
        interests = trip.interests,
        flights = ITINERARY_SECTIONS[0],
        transport = ITINERARY_SECTIONS[1],
        accommodation = ITINERARY_SECTIONS[2],
        activities = ITINERARY_SECTIONS[3],
        dining = ITINERARY_SECTIONS[4],
        costs = ITINERARY_SECTIONS[5],
        tips = ITINERARY_SECTIONS[6],
        weather = ITINERARY_SECTIONS[7],
        safety = ITINERARY_SECTIONS[8],
    )
}

/// Build the prompt for a follow-up question about an itinerary
pub fn followup_prompt(itinerary: &str, question: &str) -> String {
    debug!(itinerary_len = itinerary.len(), question_len = question.len(), "followup_prompt: called");
    format!(
        r#"Given this travel plan:
{itinerary}

User question: {question}

Please provide a helpful and concise response to the user's question about the travel plan. Focus on being informative and specific."#
    )
}
