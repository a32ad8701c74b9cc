//! Configuration for the remote model client

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Remote model client configuration.
///
/// Loaded once at startup and treated as read-only for the lifetime of
/// the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Base URL of the model service
    pub base_url: String,

    /// Prediction endpoint path
    pub predict_path: String,

    /// Per-attempt timeout in seconds
    pub timeout_seconds: u64,

    /// Retries after the initial attempt
    pub max_retries: u32,

    /// Fixed delay between attempts in milliseconds
    pub retry_delay_ms: u64,

    /// Synthesize a local prediction when the model stays unreachable
    pub fallback_enabled: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: crate::DEFAULT_MODEL_URL.to_string(),
            predict_path: crate::DEFAULT_PREDICT_PATH.to_string(),
            timeout_seconds: crate::DEFAULT_TIMEOUT_SECONDS,
            max_retries: crate::DEFAULT_MAX_RETRIES,
            retry_delay_ms: crate::DEFAULT_RETRY_DELAY_MS,
            fallback_enabled: true,
        }
    }
}

impl ModelConfig {
    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;
        let config: ModelConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load defaults, then apply environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = ModelConfig::default();

        if let Ok(url) = std::env::var("SCORING_MODEL_URL") {
            config.base_url = url;
        }

        if let Ok(path) = std::env::var("SCORING_MODEL_PREDICT_PATH") {
            config.predict_path = path;
        }

        if let Ok(timeout) = std::env::var("SCORING_MODEL_TIMEOUT_SECONDS") {
            config.timeout_seconds = timeout
                .parse()
                .map_err(|_| Error::Config(format!("Invalid timeout: {}", timeout)))?;
        }

        if let Ok(retries) = std::env::var("SCORING_MODEL_MAX_RETRIES") {
            config.max_retries = retries
                .parse()
                .map_err(|_| Error::Config(format!("Invalid retry count: {}", retries)))?;
        }

        if let Ok(fallback) = std::env::var("SCORING_MODEL_FALLBACK_ENABLED") {
            config.fallback_enabled = fallback
                .parse()
                .map_err(|_| Error::Config(format!("Invalid fallback flag: {}", fallback)))?;
        }

        Ok(config)
    }

    /// Full prediction endpoint URL
    pub fn predict_url(&self) -> String {
        format!("{}{}", self.base_url, self.predict_path)
    }
}
