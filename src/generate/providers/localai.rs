//! LocalAI provider (OpenAI-compatible local inference server).
//!
//! Speaks the same `/v1/images/generations` endpoint as OpenAI but runs
//! on localhost without authentication. LocalAI ignores unknown request
//! fields, so the payload stays minimal.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::generate::{GenerateRequest, GeneratedImage, GeneratorError, ImageProvider};

#[derive(Serialize, Debug)]
struct ImagesRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
}

#[derive(Deserialize, Debug)]
struct ImagesResponse {
    data: Vec<ImageDatum>,
}

#[derive(Deserialize, Debug)]
struct ImageDatum {
    url: Option<String>,
}

pub struct LocalAiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl LocalAiProvider {
    pub fn new(base_url: Option<String>) -> Self {
        let env_url = std::env::var("LOCALAI_BASE_URL").ok();
        let final_url = base_url
            .or(env_url)
            .unwrap_or_else(|| "http://localhost:8080/v1".to_string());

        Self {
            base_url: final_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ImageProvider for LocalAiProvider {
    fn name(&self) -> &str {
        "localai"
    }

    async fn generate(
        &self,
        request: GenerateRequest<'_>,
    ) -> Result<GeneratedImage, GeneratorError> {
        let body = ImagesRequest {
            model: request.model,
            prompt: request.prompt,
            size: request.size,
        };

        info!(
            "LocalAI Images request: model={}, size={}, prompt_len={}",
            request.model,
            request.size,
            request.prompt.len()
        );

        // No auth for a local server
        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| GeneratorError::Network(e.to_string()))?;

        debug!("LocalAI response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("LocalAI API error: {} - {}", status, message);
            return Err(GeneratorError::Api { status, message });
        }

        let parsed: ImagesResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::Parse(e.to_string()))?;

        let url = parsed
            .data
            .into_iter()
            .next()
            .and_then(|d| d.url)
            .ok_or(GeneratorError::MissingUrl)?;

        info!("LocalAI generated image: {url}");
        Ok(GeneratedImage {
            url,
            revised_prompt: None,
        })
    }
}
