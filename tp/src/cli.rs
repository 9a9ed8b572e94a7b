//! CLI command definitions and subcommands

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::TripRequest;

/// TripPlanner - travel itineraries from the terminal
#[derive(Parser)]
#[command(
    name = "tp",
    about = "Plan a trip: itinerary, flights, hotels, and follow-up questions",
    version,
    after_help = "Logs are written to: ~/.local/share/tripplanner/logs/tripplanner.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Generate an itinerary for a trip, then chat about it
    Plan(PlanArgs),

    /// Look up scheduled flights for a route
    Flights {
        /// Departure airport code (e.g. JFK)
        origin: String,

        /// Arrival airport code (e.g. LHR)
        destination: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Interactive session: trip form, then follow-up chat
    Repl,

    /// Manage stored API keys
    Keys {
        #[command(subcommand)]
        command: KeysCommand,
    },
}

/// Trip form fields
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Where the trip starts
    #[arg(long = "from", value_name = "SOURCE")]
    pub source: String,

    /// Where the trip goes
    #[arg(long = "to", value_name = "DESTINATION")]
    pub destination: String,

    /// First day of the trip (YYYY-MM-DD)
    #[arg(long = "start", value_name = "DATE")]
    pub start_date: NaiveDate,

    /// Last day of the trip (YYYY-MM-DD)
    #[arg(long = "end", value_name = "DATE")]
    pub end_date: NaiveDate,

    /// Budget, free-form (e.g. "$3000")
    #[arg(long, default_value = "")]
    pub budget: String,

    /// Number of travelers
    #[arg(long, default_value = "1")]
    pub travelers: u32,

    /// Interests, free-form (e.g. "history, food")
    #[arg(long, default_value = "")]
    pub interests: String,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Exit after printing the plan instead of starting the chat
    #[arg(long)]
    pub no_chat: bool,
}

impl PlanArgs {
    pub fn to_trip(&self) -> TripRequest {
        TripRequest::new(&self.source, &self.destination, self.start_date, self.end_date)
            .with_budget(&self.budget)
            .with_travelers(self.travelers)
            .with_interests(&self.interests)
    }
}

/// Credential subcommands
#[derive(Subcommand, Debug)]
pub enum KeysCommand {
    /// Store one or both API keys
    Set {
        /// Completion service key, stored as GEMINI_API_KEY and used for
        /// whichever provider is configured (gemini or openai)
        #[arg(long)]
        completion: Option<String>,

        /// Flight-data service key (AVIATION_STACK_API_KEY)
        #[arg(long)]
        flights: Option<String>,
    },

    /// Show stored keys, masked
    Show,

    /// Delete the stored keys
    Clear,
}

/// Output format for plan/flights commands
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["tp"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_plan() {
        let cli = Cli::parse_from([
            "tp",
            "plan",
            "--from",
            "JFK",
            "--to",
            "LHR",
            "--start",
            "2025-06-01",
            "--end",
            "2025-06-10",
            "--budget",
            "$3000",
            "--travelers",
            "2",
            "--interests",
            "history",
        ]);
        let Some(Command::Plan(args)) = cli.command else {
            panic!("Expected Plan command");
        };
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.no_chat);

        let trip = args.to_trip();
        assert_eq!(trip.source, "JFK");
        assert_eq!(trip.destination, "LHR");
        assert_eq!(trip.start_date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(trip.end_date, NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert_eq!(trip.budget, "$3000");
        assert_eq!(trip.traveler_count, 2);
        assert_eq!(trip.interests, "history");
    }

    #[test]
    fn test_cli_parse_plan_defaults() {
        let cli = Cli::parse_from([
            "tp", "plan", "--from", "JFK", "--to", "CDG", "--start", "2025-06-01", "--end", "2025-06-02", "-f",
            "json", "--no-chat",
        ]);
        let Some(Command::Plan(args)) = cli.command else {
            panic!("Expected Plan command");
        };
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.no_chat);
        let trip = args.to_trip();
        assert_eq!(trip.traveler_count, 1);
        assert!(trip.budget.is_empty());
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        let result = Cli::try_parse_from([
            "tp", "plan", "--from", "JFK", "--to", "LHR", "--start", "June 1", "--end", "2025-06-10",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_flights() {
        let cli = Cli::parse_from(["tp", "flights", "JFK", "LHR"]);
        if let Some(Command::Flights {
            origin,
            destination,
            format,
        }) = cli.command
        {
            assert_eq!(origin, "JFK");
            assert_eq!(destination, "LHR");
            assert_eq!(format, OutputFormat::Text);
        } else {
            panic!("Expected Flights command");
        }
    }

    #[test]
    fn test_cli_parse_keys() {
        let cli = Cli::parse_from(["tp", "keys", "set", "--completion", "abc"]);
        assert!(matches!(
            cli.command,
            Some(Command::Keys {
                command: KeysCommand::Set { completion: Some(_), flights: None }
            })
        ));

        let cli = Cli::parse_from(["tp", "keys", "clear"]);
        assert!(matches!(
            cli.command,
            Some(Command::Keys {
                command: KeysCommand::Clear
            })
        ));
    }

    #[test]
    fn test_keys_set_help_names_shared_completion_slot() {
        use clap::CommandFactory;

        let cmd = Cli::command();
        let set = cmd
            .find_subcommand("keys")
            .and_then(|keys| keys.find_subcommand("set"))
            .unwrap();
        let arg = set.get_arguments().find(|a| a.get_id() == "completion").unwrap();
        let help = arg.get_help().unwrap().to_string();
        assert!(help.contains("GEMINI_API_KEY"));
        assert!(help.contains("openai"));
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("table".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_cli_with_global_flags() {
        let cli = Cli::parse_from(["tp", "-c", "/path/to/config.yml", "--log-level", "debug", "repl"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Some(Command::Repl)));
    }
}
