//! Active/passive voice conversion backed by a chat completion API.

pub mod client;
pub mod direction;
pub mod error;
pub mod models;

pub use client::GroqClient;
pub use direction::Direction;
pub use error::{ConvertError, UpstreamError};

use serde::Serialize;

/// A validated conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub text: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResponse {
    pub converted_text: String,
}

impl ConversionRequest {
    /// Validate raw caller input. Empty text is reported before a bad
    /// direction. The text itself is kept as given, untrimmed.
    pub fn new(text: impl Into<String>, direction: &str) -> Result<Self, ConvertError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ConvertError::InvalidInput("Text cannot be empty".to_string()));
        }

        let direction = direction
            .parse::<Direction>()
            .map_err(|e| ConvertError::InvalidInput(e.to_string()))?;

        Ok(Self { text, direction })
    }
}

/// Run one validated request through the client.
pub async fn convert(
    client: &GroqClient,
    request: &ConversionRequest,
) -> Result<ConversionResponse, ConvertError> {
    let converted_text = client.convert(&request.text, request.direction).await?;
    Ok(ConversionResponse { converted_text })
}
