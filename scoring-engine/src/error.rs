//! Error types for the scoring engine

use thiserror::Error;

/// Result type for scoring operations
pub type Result<T> = std::result::Result<T, Error>;

/// Scoring engine errors
#[derive(Error, Debug)]
pub enum Error {
    /// Caller supplied too few attributes for scoring
    #[error("Insufficient data for scoring: {0}")]
    InsufficientData(String),

    /// The remote model rejected our feature vector as malformed
    #[error("Model rejected request ({status_code}): {message}")]
    MalformedRequest {
        /// HTTP status code returned by the model service
        status_code: u16,
        /// Response body or error detail
        message: String,
    },

    /// Remote model unreachable after exhausting retries
    #[error("Model unavailable after {attempts} attempts: {last_error}")]
    ModelUnavailable {
        /// Total attempts made
        attempts: u32,
        /// Last error observed
        last_error: String,
    },

    /// Remote model returned a garbled or unusable response
    #[error("Model error: {0}")]
    ModelError(String),

    /// No stored score exists for the requested user
    #[error("No score found: {0}")]
    NotFound(String),

    /// Score store failure
    #[error("Score store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
