//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings and band reference data from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::BandPolicy;

use super::types::{BandsConfig, EngineConfig, EngineSettings};

/// Upper bound for `retry_backoff_ms`.
const MAX_RETRY_BACKOFF_MS: u64 = 60_000;

/// Loads, validates and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/standard/
/// ├── settings.yaml   # Backend, scoring and batch settings
/// └── bands.yaml      # Salary band policies, in match-priority order
/// ```
///
/// # Example
///
/// ```no_run
/// use compensation_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard")?;
/// println!("Loaded {} bands", loader.bands().len());
/// # Ok::<(), compensation_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, contains invalid YAML, or
    /// holds values the engine cannot run with (weights not summing to 1,
    /// inverted ranges, an empty band list).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("settings.yaml"))?;
        let bands = Self::load_yaml::<BandsConfig>(&path.join("bands.yaml"))?;

        Self::from_parts(settings, bands.bands)
    }

    /// Builds a loader from already-parsed parts, applying the same
    /// validation as [`ConfigLoader::load`].
    pub fn from_parts(settings: EngineSettings, bands: Vec<BandPolicy>) -> EngineResult<Self> {
        validate_settings(&settings)?;
        validate_bands(&bands)?;

        Ok(Self {
            config: EngineConfig::new(settings, bands),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// Returns all band policies in stored order.
    pub fn bands(&self) -> &[BandPolicy] {
        self.config.bands()
    }

    /// Reads the backend credential from the environment variable named in
    /// the backend settings.
    pub fn api_key(&self) -> EngineResult<String> {
        let variable = &self.settings().backend.api_key_env;
        match std::env::var(variable) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(EngineError::MissingCredential {
                variable: variable.clone(),
            }),
        }
    }
}

fn validate_settings(settings: &EngineSettings) -> EngineResult<()> {
    let weights = &settings.scoring.weights;
    let all_weights = [
        weights.manager,
        weights.peer,
        weights.client,
        weights.self_eval,
    ];
    if all_weights.iter().any(|w| w.is_sign_negative()) {
        return Err(EngineError::InvalidConfig {
            message: "score weights must not be negative".to_string(),
        });
    }
    if weights.total() != Decimal::ONE {
        return Err(EngineError::InvalidConfig {
            message: format!("score weights must sum to 1, got {}", weights.total()),
        });
    }

    let backend = &settings.backend;
    if !(0.0..=2.0).contains(&backend.temperature) {
        return Err(EngineError::InvalidConfig {
            message: format!(
                "temperature must be between 0 and 2, got {}",
                backend.temperature
            ),
        });
    }
    if backend.timeout_secs == 0 {
        return Err(EngineError::InvalidConfig {
            message: "timeout_secs must be greater than 0".to_string(),
        });
    }
    if backend.retry_backoff_ms > MAX_RETRY_BACKOFF_MS {
        return Err(EngineError::InvalidConfig {
            message: format!(
                "retry_backoff_ms must be at most {}, got {}",
                MAX_RETRY_BACKOFF_MS, backend.retry_backoff_ms
            ),
        });
    }
    if backend.model.trim().is_empty() {
        return Err(EngineError::InvalidConfig {
            message: "model must not be empty".to_string(),
        });
    }

    Ok(())
}

fn validate_bands(bands: &[BandPolicy]) -> EngineResult<()> {
    if bands.is_empty() {
        return Err(EngineError::InvalidConfig {
            message: "no band policies found".to_string(),
        });
    }

    for (position, band) in bands.iter().enumerate() {
        if band.tenure_min > band.tenure_max {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "band #{} ({}) has tenure_min greater than tenure_max",
                    position + 1,
                    band.label()
                ),
            });
        }
        if let (Some(min), Some(max)) = (band.salary_range_min, band.salary_range_max) {
            if min > max {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "band #{} ({}) has salary_range_min greater than salary_range_max",
                        position + 1,
                        band.label()
                    ),
                });
            }
        }
        if let (Some(min), Some(max)) = (band.raise_policy_min, band.raise_policy_max) {
            if min > max {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "band #{} ({}) has raise_policy_min greater than raise_policy_max",
                        position + 1,
                        band.label()
                    ),
                });
            }
        }
    }

    Ok(())
}
