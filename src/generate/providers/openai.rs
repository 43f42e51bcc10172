//! OpenAI image provider using the Images API.
//!
//! POST /v1/images/generations with `response_format = "url"` so the
//! result is a hosted URL the preloader can fetch, not inline base64.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::generate::{GenerateRequest, GeneratedImage, GeneratorError, ImageProvider};

// ============================================================================
// Images API Types
// ============================================================================

/// The request body for the Images API.
#[derive(Serialize, Debug)]
struct ImagesRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    response_format: &'a str,
}

#[derive(Deserialize, Debug)]
struct ImagesResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize, Debug)]
struct ImageDatum {
    url: Option<String>,
    revised_prompt: Option<String>,
}

/// OpenAI wraps error responses as `{"error": {"message": ...}}`.
#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ApiErrorDetail {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ImageProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(
        &self,
        request: GenerateRequest<'_>,
    ) -> Result<GeneratedImage, GeneratorError> {
        let body = ImagesRequest {
            model: request.model,
            prompt: request.prompt,
            n: 1,
            size: request.size,
            response_format: "url",
        };

        info!(
            "OpenAI Images API request: model={}, size={}, prompt_len={}",
            request.model,
            request.size,
            request.prompt.len()
        );

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeneratorError::Network(e.to_string()))?;

        debug!("OpenAI response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("OpenAI API error: {} - {}", status, err_body);
            // Surface just the service's message when the body is the
            // standard error envelope; fall back to the raw body.
            let message = serde_json::from_str::<ApiErrorBody>(&err_body)
                .map(|b| b.error.message)
                .unwrap_or(err_body);
            return Err(GeneratorError::Api { status, message });
        }

        let parsed: ImagesResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::Parse(e.to_string()))?;

        let first = parsed
            .data
            .into_iter()
            .next()
            .ok_or(GeneratorError::MissingUrl)?;
        let url = first.url.ok_or(GeneratorError::MissingUrl)?;

        info!("OpenAI generated image: {url}");
        Ok(GeneratedImage {
            url,
            revised_prompt: first.revised_prompt,
        })
    }
}
