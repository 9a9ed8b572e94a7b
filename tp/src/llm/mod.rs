//! Completion client module for TripPlanner
//!
//! Sends prompts to a hosted text-generation service and returns the text.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod gemini;
mod openai;

pub use client::CompletionClient;
pub use error::CompletionError;
pub use gemini::GeminiClient;
pub use openai::OpenAIClient;

use crate::config::CompletionConfig;

/// Create a completion client based on the provider specified in config
///
/// Supports "gemini" and "openai" providers.
pub fn create_client(config: &CompletionConfig) -> Result<Arc<dyn CompletionClient>, CompletionError> {
    debug!(provider = %config.provider, model = ?config.model, "create_client: called");
    match config.provider.as_str() {
        "gemini" => {
            debug!("create_client: creating Gemini client");
            Ok(Arc::new(GeminiClient::from_config(config)?))
        }
        "openai" => {
            debug!("create_client: creating OpenAI client");
            Ok(Arc::new(OpenAIClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(CompletionError::Config(format!(
                "Unknown completion provider: '{}'. Supported: gemini, openai",
                other
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_known_providers() {
        let gemini = create_client(&CompletionConfig::default()).unwrap();
        assert_eq!(gemini.provider(), "gemini");

        let config = CompletionConfig {
            provider: "openai".to_string(),
            ..Default::default()
        };
        assert_eq!(create_client(&config).unwrap().provider(), "openai");
    }

    #[test]
    fn test_create_client_unknown_provider() {
        let config = CompletionConfig {
            provider: "carrier-pigeon".to_string(),
            ..Default::default()
        };
        let err = create_client(&config).err().unwrap();
        assert!(err.to_string().contains("carrier-pigeon"));
    }
}
