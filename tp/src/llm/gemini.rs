//! Google Gemini API client implementation
//!
//! Implements the CompletionClient trait for the Generative Language
//! `generateContent` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{CompletionClient, CompletionError};
use crate::config::CompletionConfig;
use crate::error::{ServiceError, error_message_from_body};

/// Model used when the config leaves it unset
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";

/// API base used when the config leaves it unset
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini API client
pub struct GeminiClient {
    model: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
    timeout: Duration,
}

impl GeminiClient {
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

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Build the request body for the Gemini API
    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        debug!(%self.model, prompt_len = prompt.len(), "build_request_body: called");
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
            "generationConfig": {
                "maxOutputTokens": self.max_tokens,
            },
        })
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: GeminiResponse) -> Option<String> {
    let candidate = response.candidates.into_iter().next()?;
    let text: String = candidate
        .content?
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    if text.trim().is_empty() { None } else { Some(text) }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    fn provider(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, CompletionError> {
        debug!(%self.model, prompt_len = prompt.len(), "generate: called");
        if api_key.trim().is_empty() {
            debug!("generate: no api key");
            return Err(CompletionError::MissingCredential);
        }

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
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

        let api_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::from_reqwest(e, self.timeout))?;

        match extract_text(api_response) {
            Some(text) => {
                debug!(text_len = text.len(), "generate: success");
                Ok(text)
            }
            None => {
                debug!("generate: no text in response");
                Err(CompletionError::EmptyResponse)
            }
        }
    }
}

// Gemini API response types

#[derive(Debug, Default, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{closed_port, serve_once, serve_silent};

    fn config_for(base_url: &str) -> CompletionConfig {
        CompletionConfig {
            base_url: Some(base_url.to_string()),
            timeout_ms: 2_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let client = GeminiClient::from_config(&CompletionConfig::default()).unwrap();
        assert_eq!(client.model(), DEFAULT_MODEL);
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn test_build_request_body() {
        let client = GeminiClient::from_config(&CompletionConfig::default()).unwrap();
        let body = client.build_request_body("Plan my trip");

        assert_eq!(body["contents"][0]["parts"][0]["text"], "Plan my trip");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 8192);
    }

    #[tokio::test]
    async fn test_generate_returns_text() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Flight Details:\n"},{"text":"Fly BA."}]}}]}"#;
        let (base_url, server) = serve_once("200 OK", body).await;
        let client = GeminiClient::from_config(&config_for(&base_url)).unwrap();

        let text = client.generate("secret-key", "Plan my trip").await.unwrap();
        assert_eq!(text, "Flight Details:\nFly BA.");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1beta/models/gemini-1.5-pro:generateContent"));
        assert!(request.to_lowercase().contains("x-goog-api-key: secret-key"));
        assert!(request.contains("Plan my trip"));
    }

    #[tokio::test]
    async fn test_generate_missing_key_makes_no_call() {
        let base_url = closed_port().await;
        let client = GeminiClient::from_config(&config_for(&base_url)).unwrap();

        let err = client.generate("  ", "Plan my trip").await.unwrap_err();
        assert!(matches!(err, CompletionError::MissingCredential));
    }

    #[tokio::test]
    async fn test_generate_empty_candidates() {
        let (base_url, _server) = serve_once("200 OK", r#"{"candidates":[]}"#).await;
        let client = GeminiClient::from_config(&config_for(&base_url)).unwrap();

        let err = client.generate("key", "Plan").await.unwrap_err();
        assert!(matches!(err, CompletionError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_generate_api_error_status() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        let (base_url, _server) = serve_once("400 Bad Request", body).await;
        let client = GeminiClient::from_config(&config_for(&base_url)).unwrap();

        let err = client.generate("bad-key", "Plan").await.unwrap_err();
        match err {
            CompletionError::Service(ServiceError::Status { status, message }) => {
                assert_eq!(status, 400);
                assert!(message.starts_with("API key not valid"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_transport_failure() {
        let base_url = closed_port().await;
        let client = GeminiClient::from_config(&config_for(&base_url)).unwrap();

        let err = client.generate("key", "Plan").await.unwrap_err();
        assert!(matches!(err, CompletionError::Service(ServiceError::Network(_))));
    }

    #[tokio::test]
    async fn test_generate_times_out() {
        let (base_url, _server) = serve_silent(Duration::from_secs(5)).await;
        let config = CompletionConfig {
            base_url: Some(base_url),
            timeout_ms: 200,
            ..Default::default()
        };
        let client = GeminiClient::from_config(&config).unwrap();

        let err = client.generate("key", "Plan").await.unwrap_err();
        assert!(matches!(err, CompletionError::Service(ServiceError::Timeout(_))));
    }
}
