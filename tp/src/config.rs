//! TripPlanner configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main TripPlanner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Completion (itinerary/chat) service configuration
    pub completion: CompletionConfig,

    /// Flight-data service configuration
    pub flights: FlightsConfig,

    /// Follow-up chat behaviour
    pub chat: ChatConfig,

    /// Where credentials are persisted
    pub storage: StorageConfig,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// An explicit path must load. Otherwise the first readable candidate
    /// from `candidate_paths` wins, and defaults apply when none does.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }
        Ok(Self::load_first(&Self::candidate_paths()))
    }

    /// `./.tripplanner.yml`, then `<config_dir>/tripplanner/tripplanner.yml`
    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".tripplanner.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("tripplanner").join("tripplanner.yml"));
        }
        paths
    }

    /// First candidate that exists and parses; unreadable files are skipped
    fn load_first(candidates: &[PathBuf]) -> Self {
        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable config"),
            }
        }
        tracing::info!("No config file found, using defaults");
        Self::default()
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }
}

/// Completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Provider name ("gemini" or "openai")
    pub provider: String,

    /// Model identifier; provider default when unset
    pub model: Option<String>,

    /// API base URL; provider default when unset
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: None,
            base_url: None,
            max_tokens: 8192,
            timeout_ms: 60_000,
        }
    }
}

/// Flight-data service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightsConfig {
    /// API base URL (the `/flights` path is appended)
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for FlightsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://api.aviationstack.com/v1".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Follow-up chat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Show failed turns as an error message in the conversation
    #[serde(rename = "show-errors")]
    pub show_errors: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { show_errors: true }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Credentials file; `~/.config/tripplanner/credentials.yml` when unset
    #[serde(rename = "credentials-file")]
    pub credentials_file: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the credentials file path
    pub fn credentials_path(&self) -> PathBuf {
        match &self.credentials_file {
            Some(path) => expand_home(path),
            None => dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("tripplanner")
                .join("credentials.yml"),
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir().map(|home| home.join(rest)).unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
