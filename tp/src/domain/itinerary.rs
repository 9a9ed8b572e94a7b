//! Generated itinerary text

use serde::{Deserialize, Serialize};

/// Boundary between itinerary sections
pub const SECTION_SEPARATOR: &str = "\n\n";

/// Opaque itinerary text returned by the completion service
///
/// Never mutated; a new submission replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Itinerary {
    text: String,
}

impl Itinerary {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Split into display sections on blank-line boundaries
    ///
    /// Sections are returned verbatim, in order. Text without a boundary is a
    /// single section, and the empty string yields one empty section.
    pub fn sections(&self) -> Vec<&str> {
        self.text.split(SECTION_SEPARATOR).collect()
    }
}

impl From<String> for Itinerary {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
