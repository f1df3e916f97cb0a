//! Application state for the Compensation Recommendation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::backend::TextGenerator;
use crate::batch::BatchRunner;
use crate::config::ConfigLoader;
use crate::models::BandPolicy;
use crate::recommendation::RecommendationEngine;

/// Shared application state.
///
/// Holds the loaded configuration, the batch runner built from it, and the
/// server's shutdown token. Batch requests run under a child of that token so
/// that shutting the server down cancels them.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
    /// The pipeline runner.
    runner: Arc<BatchRunner>,
    /// Cancelled when the server shuts down.
    shutdown: CancellationToken,
}

impl AppState {
    /// Creates the application state from a configuration and a backend.
    pub fn new(config: ConfigLoader, generator: Arc<dyn TextGenerator>) -> Self {
        let engine = RecommendationEngine::new(generator, &config.settings().backend);
        let bands: Arc<[BandPolicy]> = Arc::from(config.bands());
        let runner = BatchRunner::new(engine, bands, config.settings());

        Self {
            config: Arc::new(config),
            runner: Arc::new(runner),
            shutdown: CancellationToken::new(),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the pipeline runner.
    pub fn runner(&self) -> &BatchRunner {
        &self.runner
    }

    /// Returns the server's shutdown token.
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }
}
