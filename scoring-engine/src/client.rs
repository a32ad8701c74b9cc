//! Resilient client for the remote prediction model

use crate::config::ModelConfig;
use crate::fallback;
use crate::types::{FeatureVector, PredictionResult};
use crate::{Error, Result};
use std::time::Duration;
use tracing::{info, warn};

/// Client for the remote prediction model.
///
/// Wraps the HTTP call with a per-attempt timeout, a fixed-delay retry
/// loop and the deterministic local fallback. Ordinary remote failures
/// never surface to the caller while fallback is enabled; only a client
/// rejection of the feature vector does, since retrying or masking a
/// structurally bad request cannot help.
pub struct ModelClient {
    config: ModelConfig,
    http: reqwest::Client,
}

// Per-attempt failure classification. Drives the retry-eligibility
// filter and the post-loop fallback branch.
enum AttemptError {
    // 4xx: the feature vector itself was rejected
    ClientRejection { status_code: u16, message: String },
    // 2xx with an unusable body
    Garbled(String),
    // Network failure, timeout or 5xx
    Retryable(String),
}

impl ModelClient {
    /// Create a new client from configuration
    pub fn new(config: ModelConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Configuration in effect for this client
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Obtain a prediction for the feature vector.
    ///
    /// Retries transient failures up to `max_retries` times with a fixed
    /// delay, then synthesizes a fallback prediction when enabled. Errors
    /// only on a client rejection, or on terminal failures when fallback
    /// is disabled.
    pub async fn predict(&self, features: &FeatureVector) -> Result<PredictionResult> {
        info!("Requesting prediction from model service");

        let total_attempts = self.config.max_retries + 1;
        let mut last_error = String::new();

        for attempt in 0..total_attempts {
            if attempt > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
            }

            match self.call_model(features).await {
                Ok(prediction) => {
                    info!(
                        score = prediction.predicted_score,
                        model = %prediction.model_version,
                        "Model prediction succeeded"
                    );
                    return Ok(prediction);
                }
                Err(AttemptError::ClientRejection {
                    status_code,
                    message,
                }) => {
                    warn!("Model rejected feature vector ({}): {}", status_code, message);
                    return Err(Error::MalformedRequest {
                        status_code,
                        message,
                    });
                }
                Err(AttemptError::Garbled(reason)) => {
                    warn!("Model returned unusable response: {}", reason);
                    if self.config.fallback_enabled {
                        return Ok(fallback::predict(features));
                    }
                    return Err(Error::ModelError(reason));
                }
                Err(AttemptError::Retryable(reason)) => {
                    warn!(
                        "Model call attempt {}/{} failed: {}",
                        attempt + 1,
                        total_attempts,
                        reason
                    );
                    last_error = reason;
                }
            }
        }

        if self.config.fallback_enabled {
            warn!(
                "Model unreachable after {} attempts, using fallback scoring",
                total_attempts
            );
            return Ok(fallback::predict(features));
        }

        Err(Error::ModelUnavailable {
            attempts: total_attempts,
            last_error,
        })
    }

    // Single POST to the predict endpoint, classified for the retry loop.
    async fn call_model(
        &self,
        features: &FeatureVector,
    ) -> std::result::Result<PredictionResult, AttemptError> {
        let response = self
            .http
            .post(self.config.predict_url())
            .json(features)
            .send()
            .await
            .map_err(|e| AttemptError::Retryable(e.to_string()))?;

        let status = response.status();

        if status.is_client_error() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AttemptError::ClientRejection {
                status_code: status.as_u16(),
                message,
            });
        }

        if !status.is_success() {
            return Err(AttemptError::Retryable(format!(
                "model service returned {}",
                status
            )));
        }

        let prediction: PredictionResult = response
            .json()
            .await
            .map_err(|e| AttemptError::Garbled(format!("undecodable response body: {}", e)))?;

        // Out-of-range payloads break the model contract the same way a
        // garbled body does.
        prediction.validate().map_err(AttemptError::Garbled)?;

        Ok(prediction)
    }
}
