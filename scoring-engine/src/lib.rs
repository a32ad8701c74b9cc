//! # ScoreBridge Scoring Engine
//!
//! Computes the ScoreBridge Index (SBI), a 300-850 composite
//! creditworthiness number, from a small set of user-declared financial
//! attributes.
//!
//! # Pipeline
//!
//! 1. **Sufficiency gate**: cheap pre-flight check that the six required
//!    attributes are present
//! 2. **Feature transform**: rename/copy projection onto the remote
//!    model's feature vector
//! 3. **Prediction**: remote model call with bounded timeout, fixed-delay
//!    retries and a deterministic local fallback heuristic
//! 4. **Assembly**: risk classification, explanation and personalized
//!    recommendations
//! 5. **Persistence** (registered users only): append-only score history
//!    behind the [`store::ScoreStore`] seam
//!
//! # Example
//!
//! ```no_run
//! use scoring_engine::{ModelClient, ModelConfig, RawProfile, ScoringService};
//!
//! #[tokio::main]
//! async fn main() -> scoring_engine::Result<()> {
//!     let client = ModelClient::new(ModelConfig::default())?;
//!     let service = ScoringService::new(client);
//!
//!     let profile: RawProfile = serde_json::from_str(r#"{
//!         "age": 28, "annualIncome": 50000.0, "monthlySalary": 4167.0,
//!         "monthlyBalance": 2500.0, "numBankAccounts": 3, "numCreditCards": 2
//!     }"#).unwrap();
//!
//!     let report = service.compute(&profile).await?;
//!     println!("SBI {} ({})", report.sbi_score, report.score_category);
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod assembler;
pub mod client;
pub mod config;
pub mod error;
pub mod fallback;
pub mod features;
pub mod service;
pub mod store;
pub mod types;

pub use client::ModelClient;
pub use config::ModelConfig;
pub use error::{Error, Result};
pub use service::ScoringService;
pub use store::{MemoryScoreStore, ScoreStore};
pub use types::*;

/// Default remote model base URL
pub const DEFAULT_MODEL_URL: &str = "http://localhost:5000";

/// Default prediction endpoint path
pub const DEFAULT_PREDICT_PATH: &str = "/predict";

/// Default per-attempt timeout (seconds)
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Default retries after the initial attempt
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default fixed delay between attempts (milliseconds)
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
