//! Configuration types for the recommendation engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every section has serde
//! defaults, so any key may be omitted from `settings.yaml`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::BandPolicy;

/// Weights applied to the four sub-ratings of the composite score.
///
/// The weights must sum to exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the manager evaluation.
    pub manager: Decimal,
    /// Weight of the peer evaluation.
    pub peer: Decimal,
    /// Weight of the client evaluation.
    pub client: Decimal,
    /// Weight of the self evaluation.
    #[serde(rename = "self")]
    pub self_eval: Decimal,
}

impl ScoreWeights {
    /// Sum of the four weights.
    pub fn total(&self) -> Decimal {
        self.manager + self.peer + self.client + self.self_eval
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            manager: Decimal::new(4, 1),
            peer: Decimal::new(3, 1),
            client: Decimal::new(2, 1),
            self_eval: Decimal::new(1, 1),
        }
    }
}

/// Which composite score is authoritative when an employee record already
/// carries one from the source system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreAuthority {
    /// The engine's score is authoritative; the supplied one is left intact.
    #[default]
    Computed,
    /// A supplied score is authoritative; the engine only fills gaps.
    Supplied,
    /// The engine's score is authoritative and replaces the supplied one.
    Overwrite,
}

/// `scoring` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringSettings {
    /// Sub-rating weights.
    #[serde(default)]
    pub weights: ScoreWeights,
    /// Score authority.
    #[serde(default)]
    pub authority: ScoreAuthority,
}

/// What a batch does when the backend itself fails (as opposed to answering
/// with unusable text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendFailurePolicy {
    /// Stop the run and return the error.
    #[default]
    Abort,
    /// Record a fallback row for the employee and continue.
    Degrade,
}

/// `batch` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Backend failure policy.
    #[serde(default)]
    pub on_backend_failure: BackendFailurePolicy,
}

/// `backend` section: how to reach the text-generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL of an OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Name of the env var holding the API key (never store the key itself).
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retries after the first attempt on transport errors, 429 and 5xx.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Initial backoff between retries, doubled on each retry.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f64 {
    0.2
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".into()
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_max_retries() -> u32 {
    2
}
fn default_retry_backoff_ms() -> u64 {
    1000
}

/// Engine settings from `settings.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Backend connection settings.
    #[serde(default)]
    pub backend: BackendSettings,
    /// Composite score settings.
    #[serde(default)]
    pub scoring: ScoringSettings,
    /// Batch behaviour.
    #[serde(default)]
    pub batch: BatchSettings,
}

/// Band reference file structure (`bands.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct BandsConfig {
    /// Band policies in stored order.
    pub bands: Vec<BandPolicy>,
}

/// The complete engine configuration loaded from YAML files.
///
/// Band order is preserved exactly as stored: band matching resolves ties
/// by position.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Engine settings.
    settings: EngineSettings,
    /// Band policies in stored order.
    bands: Vec<BandPolicy>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(settings: EngineSettings, bands: Vec<BandPolicy>) -> Self {
        Self { settings, bands }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns all band policies in stored order.
    pub fn bands(&self) -> &[BandPolicy] {
        &self.bands
    }
}
