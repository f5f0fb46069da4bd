//! Generative text service client
//!
//! The analyzer only sees the [`TextGenerator`] trait, so tests can script
//! replies without a network. [`AnthropicClient`] speaks the Messages API.

use crate::config::AnalyzerConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Text service failures; all of them are recoverable per batch
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response contained no text content")]
    EmptyResponse,
}

/// Turns one prompt into one free-text reply
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Anthropic Messages API client
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    /// Builds a client for the configured base URL, model and timeout
    pub fn new(api_key: String, config: &AnalyzerConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/v1/messages", config.api_base_url.trim_end_matches('/')),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(
            "Calling {} with model {} ({} prompt chars)",
            self.endpoint,
            self.model,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: MessagesResponse = response.json().await?;

        reply
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}
