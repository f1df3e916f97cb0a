//! Text-generation backend.
//!
//! The recommendation engine treats the backend as a black box: a prompt goes
//! in, a single blob of text comes out. [`TextGenerator`] is that seam.
//! [`OpenAiClient`] speaks the OpenAI-compatible chat-completions protocol;
//! tests substitute scripted implementations.

mod openai;

use async_trait::async_trait;

use crate::error::BackendError;

pub use openai::OpenAiClient;

/// One generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Model identifier.
    pub model: String,
    /// The prompt, sent as a single user message.
    pub prompt: String,
    /// Sampling temperature.
    pub temperature: f64,
}

/// A backend that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Generates a completion for the request.
    ///
    /// # Returns
    /// * `Ok(text)` - The raw text returned by the model, unparsed
    /// * `Err(_)` - Transport, authentication, rate-limit or empty-content failure
    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError>;
}
