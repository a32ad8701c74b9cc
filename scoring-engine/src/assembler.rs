//! Score assembly: risk classification, explanation and recommendations

use crate::fallback::safe_ratio;
use crate::types::{FeatureVector, PredictionResult, RiskLevel, ScoreReport};
use chrono::Utc;
use tracing::debug;

// Components below this threshold attract a recommendation.
const RECOMMENDATION_THRESHOLD: f64 = 70.0;

/// Classify the risk level for an index value
pub fn risk_level(index: u16) -> RiskLevel {
    RiskLevel::from_index(index)
}

/// Generate the user-facing explanation for a prediction.
///
/// Purely presentational: five wording bands matching the category
/// thresholds, no numeric side effects.
pub fn explanation(prediction: &PredictionResult) -> String {
    let score = prediction.predicted_score;
    let category = &prediction.score_category;

    if score >= 750 {
        format!(
            "Excellent! Your ScoreBridge Index of {} puts you in the '{}' category. \
             You demonstrate outstanding financial responsibility and have access to \
             the best credit options.",
            score, category
        )
    } else if score >= 700 {
        format!(
            "Great! Your ScoreBridge Index of {} is in the '{}' range. \
             You show strong financial habits and qualify for favorable credit terms.",
            score, category
        )
    } else if score >= 650 {
        format!(
            "Good! Your ScoreBridge Index of {} is '{}'. \
             You demonstrate reliable financial behavior with room for improvement.",
            score, category
        )
    } else if score >= 600 {
        format!(
            "Fair. Your ScoreBridge Index of {} is in the '{}' category. \
             There are opportunities to improve your financial standing.",
            score, category
        )
    } else {
        format!(
            "Your ScoreBridge Index of {} is in the '{}' range. \
             We recommend focusing on improving your financial habits for better \
             credit access.",
            score, category
        )
    }
}

/// Generate personalized recommendations for components below threshold.
///
/// Checks run in payment, income, transactions, savings order; the ratio
/// inputs come from the feature vector, which preserves the caller's raw
/// values verbatim.
pub fn recommendations(prediction: &PredictionResult, features: &FeatureVector) -> String {
    let mut recommendations = String::new();

    if prediction.components.payment_consistency < RECOMMENDATION_THRESHOLD {
        recommendations
            .push_str("• Improve payment consistency: Set up automatic payments to avoid delays. ");
    }

    if prediction.components.income_reliability < RECOMMENDATION_THRESHOLD {
        recommendations.push_str(
            "• Consider building more stable income sources or maintaining consistent \
             salary deposits. ",
        );
    }

    if prediction.components.transaction_patterns < RECOMMENDATION_THRESHOLD {
        let emi_ratio = safe_ratio(features.total_emi_per_month, features.monthly_inhand_salary);
        if emi_ratio > 0.4 {
            recommendations.push_str(
                "• Reduce EMI burden: Your EMI to salary ratio is high. Consider debt \
                 consolidation. ",
            );
        }

        let invested_ratio = safe_ratio(
            features.amount_invested_monthly,
            features.monthly_inhand_salary,
        );
        if invested_ratio < 0.1 {
            recommendations
                .push_str("• Increase monthly investments to demonstrate financial planning. ");
        }
    }

    if prediction.components.savings_stability < RECOMMENDATION_THRESHOLD {
        if features.credit_utilization_ratio > 30.0 {
            recommendations
                .push_str("• Lower credit utilization: Keep it below 30% for better scores. ");
        }

        let balance_ratio = safe_ratio(features.monthly_balance, features.monthly_inhand_salary);
        if balance_ratio < 0.5 {
            recommendations.push_str(
                "• Build emergency savings: Aim for at least 50% of monthly salary as buffer. ",
            );
        }
    }

    if recommendations.is_empty() {
        recommendations.push_str(
            "• Excellent! Maintain your current financial habits and continue monitoring \
             your score regularly.",
        );
    }

    recommendations.trim_end().to_string()
}

/// Turn a prediction into the user-facing report.
///
/// The report starts out unsaved; the orchestrator flips the flag after a
/// successful persistence attempt.
pub fn assemble(prediction: &PredictionResult, features: &FeatureVector) -> ScoreReport {
    let risk = risk_level(prediction.predicted_score);
    debug!(
        score = prediction.predicted_score,
        risk = %risk,
        "Assembling score report"
    );

    ScoreReport {
        sbi_score: prediction.predicted_score,
        score_category: prediction.score_category.clone(),
        components: prediction.components.clone(),
        risk_level: risk,
        explanation: Some(explanation(prediction)),
        recommendations: Some(recommendations(prediction, features)),
        calculated_at: Utc::now(),
        model_version: prediction.model_version.clone(),
        confidence_level: prediction.confidence_level,
        saved: false,
    }
}
