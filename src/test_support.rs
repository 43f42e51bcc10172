//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;
use std::sync::Arc;

use crate::generate::{GenerateRequest, GeneratedImage, GeneratorError, ImageProvider};

/// A canned provider for tests that don't need real API calls.
pub struct NoopGenerator;

#[async_trait]
impl ImageProvider for NoopGenerator {
    fn name(&self) -> &str {
        "noop"
    }

    async fn generate(
        &self,
        _request: GenerateRequest<'_>,
    ) -> Result<GeneratedImage, GeneratorError> {
        Ok(GeneratedImage {
            url: "http://localhost/test.png".to_string(),
            revised_prompt: None,
        })
    }
}

/// Creates a test App with a NoopGenerator.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(
        Arc::new(NoopGenerator),
        "test-model".to_string(),
        "1024x1024".to_string(),
    )
}
