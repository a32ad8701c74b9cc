//! Deterministic local scoring heuristic.
//!
//! Used when the remote model stays unreachable after retries. No network
//! calls, no clock reads, no randomness: the same feature vector always
//! produces the same prediction.

use crate::types::{ComponentScores, FeatureVector, PredictionResult, ScoreCategory};
use tracing::info;

/// Weight applied to payment consistency (alpha)
pub const ALPHA_WEIGHT: f64 = 0.35;
/// Weight applied to income reliability (beta)
pub const BETA_WEIGHT: f64 = 0.25;
/// Weight applied to transaction patterns (gamma)
pub const GAMMA_WEIGHT: f64 = 0.20;
/// Weight applied to savings stability (delta)
pub const DELTA_WEIGHT: f64 = 0.20;

/// Version tag attached to fallback predictions. Ends with the fallback
/// marker so downstream consumers can tell which path produced a result.
pub const FALLBACK_MODEL_VERSION: &str = "v1.0-fallback";

/// Fixed confidence reported for fallback predictions
pub const FALLBACK_CONFIDENCE: f64 = 60.0;

/// Synthesize a prediction locally from the feature vector
pub fn predict(features: &FeatureVector) -> PredictionResult {
    info!("Synthesizing fallback prediction");

    let payment = payment_score(features);
    let income = income_score(features);
    let transaction = transaction_score(features);
    let savings = savings_score(features);

    let composite = ALPHA_WEIGHT * payment
        + BETA_WEIGHT * income
        + GAMMA_WEIGHT * transaction
        + DELTA_WEIGHT * savings;

    let index = index_from_composite(composite);

    PredictionResult {
        predicted_score: index,
        score_category: ScoreCategory::from_index(index).as_str().to_string(),
        components: ComponentScores {
            payment_consistency: payment,
            income_reliability: income,
            transaction_patterns: transaction,
            savings_stability: savings,
            alpha_weight: ALPHA_WEIGHT,
            beta_weight: BETA_WEIGHT,
            gamma_weight: GAMMA_WEIGHT,
            delta_weight: DELTA_WEIGHT,
        },
        model_version: FALLBACK_MODEL_VERSION.to_string(),
        confidence_level: FALLBACK_CONFIDENCE,
    }
}

/// Map a 0-100 composite onto the 300-850 index range
fn index_from_composite(composite: f64) -> u16 {
    let index = (300.0 + composite / 100.0 * 550.0).round();
    index.clamp(300.0, 850.0) as u16
}

// Fewer delays and delayed payments score higher.
fn payment_score(features: &FeatureVector) -> f64 {
    let delay_penalty = (f64::from(features.delay_from_due_date) * 2.0).min(30.0);
    let delayed_payment_penalty = (f64::from(features.num_of_delayed_payment) * 3.0).min(40.0);
    (100.0 - delay_penalty - delayed_payment_penalty).max(0.0)
}

// Income level plus a stability bonus when the declared salary tracks
// annual income.
fn income_score(features: &FeatureVector) -> f64 {
    let income_ratio = safe_ratio(
        features.monthly_inhand_salary,
        features.annual_income / 12.0,
    );
    let base_score = (features.annual_income / 100_000.0 * 50.0).min(50.0);
    let stability_bonus = if income_ratio > 0.7 { 30.0 } else { 10.0 };
    (base_score + stability_bonus + 20.0).min(100.0)
}

// Investment habits and EMI load relative to salary.
fn transaction_score(features: &FeatureVector) -> f64 {
    let invested_ratio = safe_ratio(
        features.amount_invested_monthly,
        features.monthly_inhand_salary,
    );
    let investment_score = (invested_ratio * 100.0).min(50.0);

    let emi_ratio = safe_ratio(features.total_emi_per_month, features.monthly_inhand_salary);
    let emi_score = if emi_ratio < 0.4 {
        30.0
    } else if emi_ratio < 0.6 {
        20.0
    } else {
        10.0
    };

    (investment_score + emi_score + 20.0).min(100.0)
}

// Balance buffer minus a penalty for utilization above 30%.
fn savings_score(features: &FeatureVector) -> f64 {
    let balance_ratio = safe_ratio(features.monthly_balance, features.monthly_inhand_salary);
    let balance_score = (balance_ratio * 50.0).min(50.0);
    let utilization_penalty = (features.credit_utilization_ratio - 30.0).max(0.0);
    (balance_score + 50.0 - utilization_penalty).clamp(0.0, 100.0)
}

// Zero or negative denominators contribute a zero ratio instead of
// NaN/Infinity.
pub(crate) fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
