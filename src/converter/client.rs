use anyhow::{Context, Result};

use super::error::UpstreamError;
use super::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use super::Direction;
use crate::config::{ConverterConfig, MAX_TOKENS, TEMPERATURE};

/// Client for the Groq chat completions endpoint.
///
/// Holds one `reqwest::Client` so the connection pool is shared by every
/// request handler; cloning is cheap.
#[derive(Debug, Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    config: ConverterConfig,
}

impl GroqClient {
    pub fn new(config: ConverterConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Ask the model to rewrite `text` and return its trimmed answer.
    ///
    /// Exactly one outbound request is made; nothing is retried.
    pub async fn convert(&self, text: &str, direction: Direction) -> Result<String, UpstreamError> {
        let api_key = self.config.api_key().ok_or(UpstreamError::MissingApiKey)?;

        let payload = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage::user(direction.prompt(text))],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!("   POST {} (model: {})", self.config.api_url, self.config.model);

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("   Response status: {}", status);

        if !status.is_success() {
            let body = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("   Failed to read error body: {}", e);
                    format!("<unreadable body: {}>", e)
                }
            };
            return Err(UpstreamError::Status { status, body });
        }

        let body = response.bytes().await?;
        extract_content(&body)
    }
}

/// Pull `choices[0].message.content` out of a completion body, trimmed.
pub fn extract_content(body: &[u8]) -> Result<String, UpstreamError> {
    let completion: ChatCompletionResponse = serde_json::from_slice(body)
        .map_err(|e| UpstreamError::ResponseFormat(e.to_string()))?;

    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| UpstreamError::ResponseFormat("no choices returned".to_string()))?;

    let content = choice
        .message
        .content
        .ok_or_else(|| UpstreamError::ResponseFormat("missing message content".to_string()))?;

    Ok(content.trim().to_string())
}
