//! TripPlanner - travel itineraries from the terminal
//!
//! CLI entry point: one-shot planning and flight commands, key management,
//! and the interactive REPL.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{info, warn};

use tripplanner::cli::{Cli, Command, KeysCommand, OutputFormat, PlanArgs};
use tripplanner::config::Config;
use tripplanner::credentials::{COMPLETION_KEY_NAME, CredentialKind, CredentialStore, Credentials};
use tripplanner::flights::{AviationStackClient, FlightLookup, FlightPanel};
use tripplanner::llm::create_client;
use tripplanner::planner::{Orchestrator, PlanError};
use tripplanner::render::{self, PlanSnapshot};
use tripplanner::repl;

fn setup_logging(cli_level: Option<&str>, config_level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripplanner")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // CLI flag > config file > INFO
    let level = cli_level
        .or(config_level)
        .and_then(|l| l.parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::INFO);
    let log_file = fs::File::create(log_dir.join("tripplanner.log")).context("Failed to create log file")?;

    // Write to the log file, never to the terminal the REPL is using
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    info!(
        "TripPlanner loaded config: provider={}, flights={}",
        config.completion.provider, config.flights.base_url
    );

    let store = CredentialStore::new(config.storage.credentials_path());

    // Dispatch command
    match cli.command {
        Some(Command::Plan(args)) => cmd_plan(&config, &store, args).await,
        Some(Command::Flights {
            origin,
            destination,
            format,
        }) => cmd_flights(&config, &store, &origin, &destination, format).await,
        Some(Command::Repl) => cmd_repl(&config, &store).await,
        Some(Command::Keys { command }) => cmd_keys(&store, command),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Stored credentials, with environment variables filling any gaps
fn load_credentials(store: &CredentialStore) -> Result<Credentials> {
    let credentials = store
        .load()
        .context("Failed to load credentials")?
        .with_env_fallback();
    if !credentials.is_complete() {
        warn!(?credentials, "Credentials incomplete");
    }
    Ok(credentials)
}

fn build_orchestrator(config: &Config, credentials: Credentials) -> Result<Orchestrator> {
    let completion = create_client(&config.completion).context("Failed to create completion client")?;
    let flights: Arc<dyn FlightLookup> =
        Arc::new(AviationStackClient::from_config(&config.flights).context("Failed to create flight client")?);

    Ok(Orchestrator::new(completion, flights, credentials).with_chat_errors_shown(config.chat.show_errors))
}

/// Submit one trip and print the plan
async fn cmd_plan(config: &Config, store: &CredentialStore, args: PlanArgs) -> Result<()> {
    let credentials = load_credentials(store)?;
    let mut orchestrator = build_orchestrator(config, credentials)?;

    let result = orchestrator.submit(args.to_trip()).await;
    if let Err(e @ (PlanError::MissingCredential { .. } | PlanError::InvalidTrip(_))) = result {
        return Err(e.into());
    }

    match args.format {
        OutputFormat::Json => {
            let snapshot = PlanSnapshot::from_orchestrator(&orchestrator);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            result?;
            Ok(())
        }
        OutputFormat::Text => {
            let plan = render::render_plan(&orchestrator);
            if !plan.is_empty() {
                println!("{}", plan);
                println!();
            }
            result?;
            if args.no_chat {
                return Ok(());
            }
            repl::run_interactive(orchestrator).await
        }
    }
}

/// One-off flight lookup
async fn cmd_flights(
    config: &Config,
    store: &CredentialStore,
    origin: &str,
    destination: &str,
    format: OutputFormat,
) -> Result<()> {
    let credentials = load_credentials(store)?;
    let Some(key) = credentials.flight_key() else {
        return Err(eyre::eyre!(
            "Missing {}. Set it with `tp keys set --flights <KEY>`.",
            CredentialKind::Flights
        ));
    };

    let client = AviationStackClient::from_config(&config.flights).context("Failed to create flight client")?;
    let result = client.lookup_flights(origin, destination, key).await;
    let failed = matches!(&result, Err(e) if !e.is_no_data());
    let panel = FlightPanel::from(result);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&panel)?),
        OutputFormat::Text => println!("{}", render::render_flight_panel(&panel)),
    }

    if failed {
        return Err(eyre::eyre!("Flight lookup failed"));
    }
    Ok(())
}

/// Interactive trip planning
async fn cmd_repl(config: &Config, store: &CredentialStore) -> Result<()> {
    let credentials = load_credentials(store)?;
    for kind in credentials.missing() {
        println!("{} Missing {}. Set it with {}.", "!".yellow(), kind, "tp keys set".yellow());
    }
    let orchestrator = build_orchestrator(config, credentials)?;
    repl::run_interactive(orchestrator).await
}

/// Credential management
fn cmd_keys(store: &CredentialStore, command: KeysCommand) -> Result<()> {
    match command {
        KeysCommand::Set { completion, flights } => {
            if completion.is_none() && flights.is_none() {
                return Err(eyre::eyre!("Nothing to set. Pass --completion and/or --flights."));
            }
            let mut credentials = store.load().context("Failed to load credentials")?;
            if completion.is_some() {
                credentials.set(CredentialKind::Completion, completion);
            }
            if flights.is_some() {
                credentials.set(CredentialKind::Flights, flights);
            }
            store.save(&credentials).context("Failed to save credentials")?;
            println!("Saved credentials to {}", store.path().display());
            Ok(())
        }
        KeysCommand::Show => {
            let stored = store.load().context("Failed to load credentials")?;
            println!("Credentials file: {}", store.path().display());
            for kind in [CredentialKind::Completion, CredentialKind::Flights] {
                println!("  {:24} {}", kind.key_name(), stored.masked(kind));
            }
            println!(
                "{}",
                format!("  {} is used for the configured completion provider", COMPLETION_KEY_NAME).dimmed()
            );
            let effective = stored.with_env_fallback();
            for kind in effective.missing() {
                println!("{} Missing {}", "!".yellow(), kind);
            }
            Ok(())
        }
        KeysCommand::Clear => {
            store.clear().context("Failed to clear credentials")?;
            println!("Cleared credentials at {}", store.path().display());
            Ok(())
        }
    }
}
