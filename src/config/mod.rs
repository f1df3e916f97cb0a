//! Configuration loading and management for the recommendation engine.
//!
//! This module loads engine settings (backend, scoring, batch policy) and the
//! salary band reference data from YAML files. Configuration is loaded once
//! at startup and passed into the engine and batch runner constructors.
//!
//! # Example
//!
//! ```no_run
//! use compensation_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap();
//! println!("Model: {}", config.settings().backend.model);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BackendFailurePolicy, BackendSettings, BandsConfig, BatchSettings, EngineConfig,
    EngineSettings, ScoreAuthority, ScoreWeights, ScoringSettings,
};
