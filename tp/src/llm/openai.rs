//! OpenAI API client implementation
//!
//! Implements the CompletionClient trait for OpenAI's Chat Completions API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{CompletionClient, CompletionError};
use crate::config::CompletionConfig;
use crate::error::{ServiceError, error_message_from_body};

/// Model used when the config leaves it unset
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// API base used when the config leaves it unset
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// OpenAI API client
pub struct OpenAIClient {
    model: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAIClient {
    /// Create a new client from configuration
    pub fn from_config(config: &CompletionConfig) -> Result<Self, CompletionError> {
        debug!(?config, "from_config: called");
        let timeout = Duration::from_millis(config.timeout_ms);

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Service(ServiceError::Network(e)))?;

        Ok(Self {
            model: config.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            http,
            max_tokens: config.max_tokens,
            timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the request body for the OpenAI API
    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        debug!(%self.model, prompt_len = prompt.len(), "build_request_body: called");

        // GPT-5.x and o1/o3 models use max_completion_tokens instead of max_tokens
        let uses_completion_tokens =
            self.model.starts_with("gpt-5") || self.model.starts_with("o1") || self.model.starts_with("o3");

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        if uses_completion_tokens {
            body["max_completion_tokens"] = serde_json::json!(self.max_tokens);
        } else {
            body["max_tokens"] = serde_json::json!(self.max_tokens);
        }

        body
    }
}

#[async_trait]
impl CompletionClient for OpenAIClient {
    fn provider(&self) -> &str {
        "openai"
    }

    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, CompletionError> {
        debug!(%self.model, prompt_len = prompt.len(), "generate: called");
        if api_key.trim().is_empty() {
            debug!("generate: no api key");
            return Err(CompletionError::MissingCredential);
        }

        let url = format!("{}/v1/chat/completions", self.base_url);
        let response = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .json(&self.build_request_body(prompt))
            .send()
            .await
            .map_err(|e| ServiceError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "generate: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                message: error_message_from_body(&text),
            }
            .into());
        }

        let api_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::from_reqwest(e, self.timeout))?;

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(CompletionError::EmptyResponse)
    }
}

// OpenAI API response types

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}
