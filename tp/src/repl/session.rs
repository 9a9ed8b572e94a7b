//! REPL session management

use chrono::NaiveDate;
use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use crate::chat::{AskError, TurnOutcome};
use crate::domain::{ChatRole, TripRequest};
use crate::planner::{Orchestrator, PlanError};
use crate::render;

/// Interactive planning session
pub struct ReplSession {
    orchestrator: Orchestrator,
    editor: DefaultEditor,
}

/// Outcome of reading one line
enum Input {
    Line(String),
    Cancelled,
    Eof,
}

impl ReplSession {
    /// Create a new REPL session around an orchestrator
    pub fn new(orchestrator: Orchestrator) -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
        Ok(Self { orchestrator, editor })
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Run the REPL main loop
    ///
    /// Starts with the trip form unless an itinerary is already loaded.
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        if self.orchestrator.itinerary().is_none() && !self.plan_new_trip().await? {
            println!("Goodbye!");
            return Ok(());
        }

        loop {
            let input = match self.read_line(&format!("{} ", ">".bright_green()))? {
                Input::Line(line) => line,
                Input::Cancelled => {
                    println!("^C");
                    continue;
                }
                Input::Eof => {
                    println!();
                    break;
                }
            };
            if input.is_empty() {
                continue;
            }

            if input.starts_with('/') {
                match self.handle_slash_command(&input).await? {
                    SlashResult::Continue => continue,
                    SlashResult::Quit => break,
                }
            } else {
                self.ask(&input).await;
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    let _ = self.editor.add_history_entry(&line);
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Cancelled),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(err) => Err(eyre::eyre!("Readline error: {}", err)),
        }
    }

    /// Print welcome message
    fn print_welcome(&self) {
        println!();
        println!("{}", "TripPlanner".bright_cyan().bold());
        println!("Completion provider: {}", self.orchestrator.provider());
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    /// Collect a trip form and submit it; false when the form was abandoned
    async fn plan_new_trip(&mut self) -> Result<bool> {
        let Some(trip) = self.read_trip_form()? else {
            return Ok(false);
        };
        self.submit(trip).await;
        Ok(true)
    }

    /// Prompt for each trip field; `None` on Ctrl+C or Ctrl+D
    fn read_trip_form(&mut self) -> Result<Option<TripRequest>> {
        println!("{}", "Plan a trip".bright_cyan());

        let Some(source) = self.read_field("From", parse_required)? else {
            return Ok(None);
        };
        let Some(destination) = self.read_field("To", parse_required)? else {
            return Ok(None);
        };
        let Some(start_date) = self.read_field("Start date (YYYY-MM-DD)", parse_date)? else {
            return Ok(None);
        };
        let Some(end_date) = self.read_field("End date (YYYY-MM-DD)", parse_date)? else {
            return Ok(None);
        };
        let Some(budget) = self.read_field("Budget", parse_optional)? else {
            return Ok(None);
        };
        let Some(travelers) = self.read_field("Travelers [1]", parse_travelers)? else {
            return Ok(None);
        };
        let Some(interests) = self.read_field("Interests", parse_optional)? else {
            return Ok(None);
        };

        Ok(Some(
            TripRequest::new(source, destination, start_date, end_date)
                .with_budget(budget)
                .with_travelers(travelers)
                .with_interests(interests),
        ))
    }

    /// Read one form field, re-prompting until it parses
    fn read_field<T>(&mut self, label: &str, parse: fn(&str) -> Result<T, String>) -> Result<Option<T>> {
        loop {
            match self.read_line(&format!("{} ", format!("{}:", label).bright_green()))? {
                Input::Line(line) => match parse(&line) {
                    Ok(value) => return Ok(Some(value)),
                    Err(msg) => println!("{} {}", "?".yellow(), msg),
                },
                Input::Cancelled | Input::Eof => {
                    println!();
                    return Ok(None);
                }
            }
        }
    }

    async fn submit(&mut self, trip: TripRequest) {
        info!(source = %trip.source, destination = %trip.destination, "REPL trip submitted");
        println!("{}", submit_banner(&trip).dimmed());

        let result = self.orchestrator.submit(trip).await;
        println!();
        let plan = render::render_plan(&self.orchestrator);
        if !plan.is_empty() {
            println!("{}", plan);
            println!();
        }
        if let Err(e) = result {
            print_plan_error(&e);
        } else {
            println!("Ask a question about this plan, or {} for a new trip.", "/new".yellow());
            println!();
        }
    }

    /// Send a follow-up question; no input is read until it resolves
    async fn ask(&mut self, question: &str) {
        debug!("ask: called");
        println!("{}", "Thinking...".dimmed());

        match self.orchestrator.ask(question).await {
            Ok(TurnOutcome::Answered | TurnOutcome::Failed) => {
                if let Some(last) = self.orchestrator.messages().last()
                    && last.role != ChatRole::User
                {
                    println!("{}", render::render_message(last));
                }
            }
            Ok(TurnOutcome::Stale) => {}
            Err(AskError::NoItinerary) => {
                println!("{} No itinerary yet. Use {} to plan a trip.", "?".yellow(), "/new".yellow());
            }
            Err(e) => println!("{} {}", "?".yellow(), e),
        }
        println!();
    }

    /// Handle slash commands
    async fn handle_slash_command(&mut self, input: &str) -> Result<SlashResult> {
        let cmd = input.split_whitespace().next().unwrap_or("");

        match cmd {
            "/help" | "/h" => self.print_help(),
            "/quit" | "/q" | "/exit" => return Ok(SlashResult::Quit),
            "/new" | "/n" => {
                self.plan_new_trip().await?;
            }
            "/itinerary" | "/i" => match self.orchestrator.itinerary() {
                Some(itinerary) => println!("{}\n", render::render_itinerary(itinerary)),
                None => println!("{}", "No itinerary yet.".dimmed()),
            },
            "/flights" | "/f" => match self.orchestrator.flight_panel() {
                Some(panel) => println!("{}\n", render::render_flight_panel(panel)),
                None => println!("{}", "No trip submitted yet.".dimmed()),
            },
            "/hotels" => {
                if self.orchestrator.hotels().is_empty() {
                    println!("{}", "No trip submitted yet.".dimmed());
                } else {
                    println!("{}\n", render::render_hotels(self.orchestrator.hotels()));
                }
            }
            "/history" => self.print_history(),
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
            }
        }
        Ok(SlashResult::Continue)
    }

    /// Print help message
    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:14} Show this help", "/help".yellow());
        println!("  {:14} Plan a new trip", "/new".yellow());
        println!("  {:14} Show the itinerary", "/itinerary".yellow());
        println!("  {:14} Show flights for the route", "/flights".yellow());
        println!("  {:14} Show hotel suggestions", "/hotels".yellow());
        println!("  {:14} Show the follow-up conversation", "/history".yellow());
        println!("  {:14} Exit the REPL", "/quit".yellow());
        println!();
        println!("Anything else is sent as a question about the current itinerary.");
        println!();
    }

    /// Print conversation history
    fn print_history(&self) {
        let messages = self.orchestrator.messages();
        if messages.is_empty() {
            println!("{}", "No conversation history.".dimmed());
            return;
        }

        println!();
        println!("{}", "Conversation History:".bright_cyan());
        for msg in messages {
            println!("  {}", render::render_message(msg));
        }
        println!();
    }
}

/// Print a blocking submission error
pub fn print_plan_error(err: &PlanError) {
    println!("{} {}", "Error:".red(), err);
    println!();
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    Quit,
}

/// Progress line shown while a trip is being planned
fn submit_banner(trip: &TripRequest) -> String {
    if trip.validate().is_ok() {
        format!("Generating your {}-day travel plan...", trip.duration_days())
    } else {
        "Generating your travel plan...".to_string()
    }
}

fn parse_required(input: &str) -> Result<String, String> {
    let value = input.trim();
    if value.is_empty() {
        Err("This field is required".to_string())
    } else {
        Ok(value.to_string())
    }
}

fn parse_optional(input: &str) -> Result<String, String> {
    Ok(input.trim().to_string())
}

fn parse_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| format!("Not a date: {:?} (use YYYY-MM-DD)", input))
}

fn parse_travelers(input: &str) -> Result<u32, String> {
    let value = input.trim();
    if value.is_empty() {
        return Ok(1);
    }
    match value.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err("Number of travelers must be a whole number of at least 1".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_required() {
        assert_eq!(parse_required("  JFK "), Ok("JFK".to_string()));
        assert!(parse_required("   ").is_err());
    }

    #[test]
    fn test_parse_optional_allows_empty() {
        assert_eq!(parse_optional(""), Ok(String::new()));
        assert_eq!(parse_optional(" $3000 "), Ok("$3000".to_string()));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-06-01"), Ok(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()));
        assert!(parse_date("06/01/2025").is_err());
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn test_submit_banner_counts_days_only_for_valid_trips() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

        let trip = TripRequest::new("JFK", "LHR", start, end);
        assert_eq!(submit_banner(&trip), "Generating your 10-day travel plan...");

        let reversed = TripRequest::new("JFK", "LHR", end, start);
        assert_eq!(submit_banner(&reversed), "Generating your travel plan...");
    }

    #[test]
    fn test_parse_travelers() {
        assert_eq!(parse_travelers(""), Ok(1));
        assert_eq!(parse_travelers("3"), Ok(3));
        assert!(parse_travelers("0").is_err());
        assert!(parse_travelers("-2").is_err());
        assert!(parse_travelers("two").is_err());
    }
}
