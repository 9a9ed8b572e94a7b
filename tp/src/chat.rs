//! Follow-up conversation about a generated itinerary
//!
//! A `FollowUp` is scoped to one itinerary. Each question is sent together
//! with the full itinerary text; the conversation itself is display state
//! and is never replayed to the model.

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{ChatMessage, Itinerary};
use crate::llm::{CompletionClient, CompletionError};
use crate::prompts::followup_prompt;

/// Why a question was not sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AskError {
    #[error("Question is empty")]
    EmptyQuestion,

    #[error("Still waiting for the previous answer")]
    Busy,

    #[error("No itinerary to ask about yet")]
    NoItinerary,
}

/// A question that has been recorded and is awaiting its answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    /// Itinerary version the question was asked against
    pub version: u64,
    /// Sequence number of the turn within its conversation
    pub turn: u64,
    /// Prompt to send to the completion service
    pub prompt: String,
}

/// What happened to a completed turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Assistant reply appended
    Answered,
    /// The completion failed; an error message may have been appended
    Failed,
    /// The answer belonged to a conversation or turn that is no longer current
    Stale,
}

/// Linear follow-up chat bound to one itinerary
#[derive(Debug, Clone)]
pub struct FollowUp {
    itinerary: Itinerary,
    version: u64,
    messages: Vec<ChatMessage>,
    in_flight: Option<u64>,
    next_turn: u64,
    show_errors: bool,
}

impl FollowUp {
    /// Start an empty conversation about `itinerary`
    ///
    /// With `show_errors` a failed turn appends an error message; without it
    /// the turn is left unanswered and only logged.
    pub fn new(itinerary: Itinerary, version: u64, show_errors: bool) -> Self {
        debug!(%version, %show_errors, "FollowUp::new: called");
        Self {
            itinerary,
            version,
            messages: Vec::new(),
            in_flight: None,
            next_turn: 0,
            show_errors,
        }
    }

    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while a question is awaiting its answer
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Record a question and prepare its prompt
    ///
    /// The user message is appended immediately. Blank questions and
    /// questions asked while another is outstanding change nothing.
    pub fn begin(&mut self, question: &str) -> Result<PendingTurn, AskError> {
        debug!(question_len = question.len(), "FollowUp::begin: called");
        if question.trim().is_empty() {
            debug!("FollowUp::begin: empty question");
            return Err(AskError::EmptyQuestion);
        }
        if self.is_busy() {
            debug!("FollowUp::begin: busy");
            return Err(AskError::Busy);
        }

        let turn = self.next_turn;
        self.next_turn += 1;
        self.in_flight = Some(turn);
        self.messages.push(ChatMessage::user(question));

        Ok(PendingTurn {
            version: self.version,
            turn,
            prompt: followup_prompt(self.itinerary.text(), question),
        })
    }

    /// Apply the completion result for a pending turn
    pub fn complete(&mut self, pending: &PendingTurn, result: Result<String, CompletionError>) -> TurnOutcome {
        debug!(version = pending.version, turn = pending.turn, "FollowUp::complete: called");
        if pending.version != self.version || self.in_flight != Some(pending.turn) {
            debug!(current_version = self.version, in_flight = ?self.in_flight, "FollowUp::complete: stale turn");
            return TurnOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(answer) => {
                self.messages.push(ChatMessage::assistant(answer));
                TurnOutcome::Answered
            }
            Err(e) => {
                warn!(error = %e, kind = %e.kind(), "Follow-up question failed");
                if self.show_errors {
                    self.messages.push(ChatMessage::error(e.to_string()));
                }
                TurnOutcome::Failed
            }
        }
    }

    /// Ask a question and wait for the answer
    pub async fn ask(
        &mut self,
        question: &str,
        client: &dyn CompletionClient,
        api_key: &str,
    ) -> Result<TurnOutcome, AskError> {
        let pending = self.begin(question)?;
        let result = client.generate(api_key, &pending.prompt).await;
        Ok(self.complete(&pending, result))
    }
}
