//! The recommendation engine: prompt in, validated outcome out.

use std::sync::Arc;

use tracing::debug;

use super::parser::interpret_response;
use crate::backend::{GenerationRequest, TextGenerator};
use crate::config::BackendSettings;
use crate::error::BackendError;
use crate::models::RecommendationOutcome;

/// Sends prompts to a [`TextGenerator`] and interprets the responses.
///
/// Backend failures are returned as errors. Any text the backend does return
/// yields an outcome, falling back when it cannot be used.
#[derive(Clone)]
pub struct RecommendationEngine {
    generator: Arc<dyn TextGenerator>,
    model: String,
    temperature: f64,
}

impl RecommendationEngine {
    /// Creates an engine using the model and temperature from `settings`.
    pub fn new(generator: Arc<dyn TextGenerator>, settings: &BackendSettings) -> Self {
        Self {
            generator,
            model: settings.model.clone(),
            temperature: settings.temperature,
        }
    }

    /// The model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Requests a recommendation for a rendered prompt.
    pub async fn recommend(&self, prompt: &str) -> Result<RecommendationOutcome, BackendError> {
        let request = GenerationRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            temperature: self.temperature,
        };

        let raw = self.generator.generate(&request).await?;
        debug!(
            backend = self.generator.name(),
            response_len = raw.len(),
            "Received backend response"
        );

        Ok(interpret_response(&raw))
    }
}

impl std::fmt::Debug for RecommendationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationEngine")
            .field("backend", &self.generator.name())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}
