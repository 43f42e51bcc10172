use std::fmt;

use async_trait::async_trait;

use super::types::GeneratedImage;

/// Errors that can occur during provider operations.
/// Variants carry enough info to determine retryability (future use).
#[derive(Debug)]
pub enum GeneratorError {
    /// Provider misconfigured (missing API key, bad URL). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// API returned an error response. Retryable if status >= 500 or 429.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response. Not retryable.
    Parse(String),
    /// The service answered success-shaped but carried no image URL.
    /// The caller must treat this as a failure, never as a success.
    MissingUrl,
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::Config(msg) => write!(f, "config error: {msg}"),
            GeneratorError::Network(msg) => write!(f, "network error: {msg}"),
            GeneratorError::Api { status, message } => {
                write!(f, "generation failed (HTTP {status}): {message}")
            }
            GeneratorError::Parse(msg) => write!(f, "parse error: {msg}"),
            GeneratorError::MissingUrl => write!(f, "No image URL received"),
        }
    }
}

impl std::error::Error for GeneratorError {}

impl GeneratorError {
    /// Text shown to the user: the service's own words, verbatim, where
    /// it supplied any. The HTTP envelope stays in the logs.
    pub fn user_message(&self) -> String {
        match self {
            GeneratorError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Everything a provider needs to fulfill a generation request.
///
/// The prompt is passed through raw (untrimmed); validation that it is
/// non-empty happens before submission, at the UI boundary.
pub struct GenerateRequest<'a> {
    pub prompt: &'a str,
    pub model: &'a str,
    pub size: &'a str,
}

#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Requests one image for the given prompt and resolves with its URL.
    async fn generate(
        &self,
        request: GenerateRequest<'_>,
    ) -> Result<GeneratedImage, GeneratorError>;
}
