//! Hotel suggestions
//!
//! There is no live hotel service behind these; the list is a fixed
//! placeholder keyed to the destination.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelRecord {
    pub name: String,
    pub price_per_night: String,
    pub rating: String,
    pub location: String,
}

impl HotelRecord {
    fn new(name: &str, price_per_night: &str, rating: &str, location: String) -> Self {
        Self {
            name: name.to_string(),
            price_per_night: price_per_night.to_string(),
            rating: rating.to_string(),
            location,
        }
    }
}

/// Placeholder hotel list for a destination
pub fn placeholder_hotels(destination: &str) -> Vec<HotelRecord> {
    debug!(%destination, "placeholder_hotels: called");
    vec![
        HotelRecord::new("Grand Hotel", "$200/night", "4.5", format!("{} City Center", destination)),
        HotelRecord::new("Seaside Resort", "$180/night", "4.2", format!("{} Beach Area", destination)),
        HotelRecord::new("Budget Stay", "$120/night", "3.8", format!("{} Downtown", destination)),
    ]
}
