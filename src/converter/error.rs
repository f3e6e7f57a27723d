use thiserror::Error;

/// Failures talking to the completion API. All of them surface to callers
/// as HTTP 500 with the message as detail.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Groq API key is not configured")]
    MissingApiKey,

    #[error("Groq API error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Groq API error: {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Unexpected API response format: {0}")]
    ResponseFormat(String),
}

/// Everything a conversion can fail with, from validation to upstream.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    MalformedBody(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}
