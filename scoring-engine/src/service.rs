//! Scoring orchestrator

use crate::client::ModelClient;
use crate::store::ScoreStore;
use crate::types::{
    FeatureVector, InputSnapshot, PredictionResult, RawProfile, ScoreRecord, ScoreReport,
};
use crate::{assembler, features, Error, Result};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Orchestrates the scoring pipeline.
///
/// Sequences sufficiency gate, feature transform, model prediction and
/// report assembly; persists the result for registered users when a
/// score store is wired in. Each call is stateless and independent.
pub struct ScoringService {
    client: ModelClient,
    store: Option<Arc<dyn ScoreStore>>,
}

impl ScoringService {
    /// Create a service without persistence
    pub fn new(client: ModelClient) -> Self {
        Self {
            client,
            store: None,
        }
    }

    /// Create a service that persists scores for registered users
    pub fn with_store(client: ModelClient, store: Arc<dyn ScoreStore>) -> Self {
        Self {
            client,
            store: Some(store),
        }
    }

    /// Compute a score report for the profile.
    ///
    /// Persistence is attempted only when the profile carries a user id;
    /// a persistence failure degrades to `saved=false` instead of failing
    /// the computation.
    pub async fn compute(&self, profile: &RawProfile) -> Result<ScoreReport> {
        info!("Starting score calculation");

        if !features::has_sufficient_data(profile) {
            return Err(Error::InsufficientData(
                "age, income, salary, balance and account counts are required".to_string(),
            ));
        }

        let feature_vector = features::transform(profile)?;
        let prediction = self.client.predict(&feature_vector).await?;
        let mut report = assembler::assemble(&prediction, &feature_vector);

        if let Some(user_id) = profile.user_id {
            report.saved = self
                .persist(user_id, &prediction, &feature_vector, &report)
                .await;
        }

        info!(
            score = report.sbi_score,
            saved = report.saved,
            "Score calculation completed"
        );
        Ok(report)
    }

    /// All stored reports for a user, most recent first.
    ///
    /// Returns an empty sequence for users with no stored scores.
    pub async fn history(&self, user_id: Uuid) -> Result<Vec<ScoreReport>> {
        info!(%user_id, "Retrieving score history");

        let store = self.store()?;
        let records = store.find_history(user_id).await?;
        Ok(records.iter().map(report_from_record).collect())
    }

    /// Most recent stored report for a user
    pub async fn latest(&self, user_id: Uuid) -> Result<ScoreReport> {
        info!(%user_id, "Retrieving latest score");

        let store = self.store()?;
        match store.find_latest(user_id).await? {
            Some(record) => Ok(report_from_record(&record)),
            None => Err(Error::NotFound(format!(
                "no scores recorded for user {}",
                user_id
            ))),
        }
    }

    // Append the record; failures degrade to an unsaved report.
    async fn persist(
        &self,
        user_id: Uuid,
        prediction: &PredictionResult,
        feature_vector: &FeatureVector,
        report: &ScoreReport,
    ) -> bool {
        let store = match &self.store {
            Some(store) => store,
            None => {
                warn!(%user_id, "No score store configured, score not persisted");
                return false;
            }
        };

        let record = ScoreRecord {
            user_id,
            prediction: prediction.clone(),
            risk_level: report.risk_level,
            snapshot: InputSnapshot::from_features(feature_vector),
            calculated_at: report.calculated_at,
        };

        match store.save(&record).await {
            Ok(()) => {
                info!(%user_id, "Score saved");
                true
            }
            Err(e) => {
                warn!(%user_id, "Failed to save score: {}", e);
                false
            }
        }
    }

    fn store(&self) -> Result<&Arc<dyn ScoreStore>> {
        self.store
            .as_ref()
            .ok_or_else(|| Error::Store("no score store configured".to_string()))
    }
}

// Stored rows come back as reports without the presentational text, which
// is generated only at calculation time.
fn report_from_record(record: &ScoreRecord) -> ScoreReport {
    ScoreReport {
        sbi_score: record.prediction.predicted_score,
        score_category: record.prediction.score_category.clone(),
        components: record.prediction.components.clone(),
        risk_level: record.risk_level,
        explanation: None,
        recommendations: None,
        calculated_at: record.calculated_at,
        model_version: record.prediction.model_version.clone(),
        confidence_level: record.prediction.confidence_level,
        saved: true,
    }
}
