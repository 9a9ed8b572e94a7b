//! API credentials and their on-disk store
//!
//! Two secrets are kept in a small YAML file under fixed keys. The store is
//! read at startup and whenever the user updates a key; the resulting
//! `Credentials` value is handed to the orchestrator explicitly.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// File/environment key for the completion-service secret
///
/// One slot serves whichever provider `completion.provider` selects; the
/// name is kept for compatibility with existing credential files.
pub const COMPLETION_KEY_NAME: &str = "GEMINI_API_KEY";

/// File/environment key for the flight-data-service secret
pub const FLIGHT_KEY_NAME: &str = "AVIATION_STACK_API_KEY";

/// Errors reading or writing the credentials file
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Failed to access credentials file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse credentials file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize credentials: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Which credential is being referred to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    Completion,
    Flights,
}

impl CredentialKind {
    /// Storage key for this credential
    pub fn key_name(&self) -> &'static str {
        match self {
            Self::Completion => COMPLETION_KEY_NAME,
            Self::Flights => FLIGHT_KEY_NAME,
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completion => write!(
                f,
                "completion API key ({}, used by the configured provider)",
                COMPLETION_KEY_NAME
            ),
            Self::Flights => write!(f, "flight-data API key ({})", FLIGHT_KEY_NAME),
        }
    }
}

/// The two service secrets; blank values count as absent
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "GEMINI_API_KEY", default, skip_serializing_if = "Option::is_none")]
    completion: Option<String>,

    #[serde(rename = "AVIATION_STACK_API_KEY", default, skip_serializing_if = "Option::is_none")]
    flights: Option<String>,
}

impl Credentials {
    pub fn new(completion: Option<String>, flights: Option<String>) -> Self {
        Self {
            completion: normalize(completion),
            flights: normalize(flights),
        }
    }

    pub fn completion_key(&self) -> Option<&str> {
        self.completion.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn flight_key(&self) -> Option<&str> {
        self.flights.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn get(&self, kind: CredentialKind) -> Option<&str> {
        match kind {
            CredentialKind::Completion => self.completion_key(),
            CredentialKind::Flights => self.flight_key(),
        }
    }

    /// Set or clear one credential
    pub fn set(&mut self, kind: CredentialKind, value: Option<String>) {
        debug!(?kind, present = value.is_some(), "Credentials::set: called");
        let value = normalize(value);
        match kind {
            CredentialKind::Completion => self.completion = value,
            CredentialKind::Flights => self.flights = value,
        }
    }

    /// Credentials that are absent, in a stable order
    pub fn missing(&self) -> Vec<CredentialKind> {
        [CredentialKind::Completion, CredentialKind::Flights]
            .into_iter()
            .filter(|kind| self.get(*kind).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Fill absent keys from a lookup (normally the process environment)
    pub fn with_fallback<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for kind in [CredentialKind::Completion, CredentialKind::Flights] {
            if self.get(kind).is_none()
                && let Some(value) = lookup(kind.key_name())
            {
                debug!(key = kind.key_name(), "Credentials::with_fallback: filled from lookup");
                self.set(kind, Some(value));
            }
        }
        self
    }

    /// Fill absent keys from environment variables of the same names
    pub fn with_env_fallback(self) -> Self {
        self.with_fallback(|name| std::env::var(name).ok())
    }

    /// Masked form of a credential for display
    pub fn masked(&self, kind: CredentialKind) -> String {
        match self.get(kind) {
            Some(key) => mask(key),
            None => "(not set)".to_string(),
        }
    }
}

// Never print secrets through Debug
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("completion", &self.completion_key().map(mask))
            .field("flights", &self.flight_key().map(mask))
            .finish()
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}

/// YAML file holding the persisted credentials
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load credentials; a missing file yields empty credentials
    pub fn load(&self) -> Result<Credentials, CredentialError> {
        debug!(path = %self.path.display(), "CredentialStore::load: called");
        if !self.path.exists() {
            debug!("CredentialStore::load: no file, returning empty credentials");
            return Ok(Credentials::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| CredentialError::Io {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Credentials::default());
        }

        let stored: Credentials = serde_yaml::from_str(&content).map_err(|source| CredentialError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(Credentials::new(stored.completion, stored.flights))
    }

    /// Persist credentials, creating parent directories as needed
    pub fn save(&self, credentials: &Credentials) -> Result<(), CredentialError> {
        debug!(path = %self.path.display(), "CredentialStore::save: called");
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| CredentialError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_yaml::to_string(credentials)?;
        fs::write(&self.path, content).map_err(|source| CredentialError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), "Saved credentials");
        Ok(())
    }

    /// Remove the credentials file if present
    pub fn clear(&self) -> Result<(), CredentialError> {
        debug!(path = %self.path.display(), "CredentialStore::clear: called");
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CredentialError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
