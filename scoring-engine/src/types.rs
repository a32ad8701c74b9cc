//! Core types for the scoring engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw financial attributes as declared by the caller.
///
/// The six fields checked by the sufficiency gate are optional; everything
/// else defaults to zero when absent. Bound checks (age ranges, percentage
/// caps) are enforced at the transport boundary, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    /// Age in years
    pub age: Option<u32>,

    /// Annual income
    pub annual_income: Option<f64>,

    /// Monthly in-hand salary
    pub monthly_salary: Option<f64>,

    /// Current monthly balance
    pub monthly_balance: Option<f64>,

    /// Number of bank accounts
    pub num_bank_accounts: Option<u32>,

    /// Number of credit cards
    pub num_credit_cards: Option<u32>,

    /// Interest rate on loans (%)
    #[serde(default)]
    pub interest_rate: f64,

    /// Number of active loans
    #[serde(default)]
    pub num_loans: u32,

    /// Average days of delay from due date
    #[serde(default)]
    pub delay_from_due_date: u32,

    /// Number of delayed payments in the last 12 months
    #[serde(default)]
    pub num_delayed_payments: u32,

    /// Number of credit inquiries in the last 6 months
    #[serde(default)]
    pub num_credit_inquiries: u32,

    /// Credit utilization ratio (%)
    #[serde(default)]
    pub credit_utilization_ratio: f64,

    /// Credit history age in months
    #[serde(default)]
    pub credit_history_age_months: u32,

    /// Total EMI per month
    #[serde(default)]
    pub total_emi_per_month: f64,

    /// Amount invested monthly
    #[serde(default)]
    pub amount_invested_monthly: f64,

    /// Outstanding debt
    #[serde(default)]
    pub outstanding_debt: f64,

    /// Present when a registered user wants the score persisted
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// Feature vector consumed by the remote model and the fallback heuristic.
///
/// Field-for-field projection of [`RawProfile`] in the model's expected
/// units; serialized names match the model's wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    /// Age in years
    pub age: u32,
    /// Annual income
    pub annual_income: f64,
    /// Monthly in-hand salary
    pub monthly_inhand_salary: f64,
    /// Current monthly balance
    pub monthly_balance: f64,
    /// Number of bank accounts
    pub num_bank_accounts: u32,
    /// Number of credit cards
    pub num_credit_card: u32,
    /// Interest rate on loans (%)
    pub interest_rate: f64,
    /// Number of active loans
    pub num_of_loan: u32,
    /// Average days of delay from due date
    pub delay_from_due_date: u32,
    /// Number of delayed payments
    pub num_of_delayed_payment: u32,
    /// Number of credit inquiries
    pub num_credit_inquiries: u32,
    /// Credit utilization ratio (%)
    pub credit_utilization_ratio: f64,
    /// Credit history age in months
    pub credit_history_age_months: u32,
    /// Total EMI per month
    pub total_emi_per_month: f64,
    /// Amount invested monthly
    pub amount_invested_monthly: f64,
    /// Outstanding debt
    pub outstanding_debt: f64,
}

/// Four component sub-scores with the weights applied to them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScores {
    /// Payment consistency (P), 0-100
    pub payment_consistency: f64,
    /// Income reliability (I), 0-100
    pub income_reliability: f64,
    /// Transaction patterns (T), 0-100
    pub transaction_patterns: f64,
    /// Savings stability (S), 0-100
    pub savings_stability: f64,
    /// Weight applied to P
    pub alpha_weight: f64,
    /// Weight applied to I
    pub beta_weight: f64,
    /// Weight applied to T
    pub gamma_weight: f64,
    /// Weight applied to S
    pub delta_weight: f64,
}

/// Prediction as produced by the remote model or the local fallback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// ScoreBridge Index, 300-850
    pub predicted_score: u16,

    /// Category label as reported by the producing model
    pub score_category: String,

    /// Component scores and weights
    #[serde(flatten)]
    pub components: ComponentScores,

    /// Version tag of the producing model
    pub model_version: String,

    /// Confidence percentage, 0-100
    pub confidence_level: f64,
}

impl PredictionResult {
    /// Check the range invariants the model contract promises.
    ///
    /// Returns the first violation found, if any. A response failing this
    /// check is treated as garbled by the client.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(300..=850).contains(&self.predicted_score) {
            return Err(format!(
                "predicted score {} outside [300, 850]",
                self.predicted_score
            ));
        }

        let components = [
            ("paymentConsistency", self.components.payment_consistency),
            ("incomeReliability", self.components.income_reliability),
            ("transactionPatterns", self.components.transaction_patterns),
            ("savingsStability", self.components.savings_stability),
        ];
        for (name, value) in components {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(format!("component {} = {} outside [0, 100]", name, value));
            }
        }

        if !self.confidence_level.is_finite()
            || !(0.0..=100.0).contains(&self.confidence_level)
        {
            return Err(format!(
                "confidence {} outside [0, 100]",
                self.confidence_level
            ));
        }

        Ok(())
    }
}

/// Score category bands on the ScoreBridge Index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreCategory {
    /// 750 and above
    Excellent,
    /// 700-749
    VeryGood,
    /// 650-699
    Good,
    /// 600-649
    Fair,
    /// Below 600
    Poor,
}

impl ScoreCategory {
    /// Classify an index value
    pub fn from_index(index: u16) -> Self {
        if index >= 750 {
            ScoreCategory::Excellent
        } else if index >= 700 {
            ScoreCategory::VeryGood
        } else if index >= 650 {
            ScoreCategory::Good
        } else if index >= 600 {
            ScoreCategory::Fair
        } else {
            ScoreCategory::Poor
        }
    }

    /// User-facing label
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreCategory::Excellent => "Excellent",
            ScoreCategory::VeryGood => "Very Good",
            ScoreCategory::Good => "Good",
            ScoreCategory::Fair => "Fair",
            ScoreCategory::Poor => "Poor",
        }
    }
}

impl std::fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk level derived from the ScoreBridge Index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Index 700 and above
    Low,
    /// Index 600-699
    Moderate,
    /// Index below 600
    High,
}

impl RiskLevel {
    /// Classify an index value
    pub fn from_index(index: u16) -> Self {
        if index >= 700 {
            RiskLevel::Low
        } else if index >= 600 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    /// User-facing label
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing scoring result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    /// ScoreBridge Index, 300-850
    pub sbi_score: u16,

    /// Category label
    pub score_category: String,

    /// Component scores and weights
    pub components: ComponentScores,

    /// Derived risk level
    pub risk_level: RiskLevel,

    /// Natural-language explanation (not reconstructed for stored scores)
    pub explanation: Option<String>,

    /// Personalized recommendations (not reconstructed for stored scores)
    pub recommendations: Option<String>,

    /// Calculation timestamp
    pub calculated_at: DateTime<Utc>,

    /// Version tag of the producing model
    pub model_version: String,

    /// Confidence percentage, 0-100
    pub confidence_level: f64,

    /// Whether the result was persisted
    pub saved: bool,
}

/// Subset of the input kept alongside a persisted score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputSnapshot {
    /// Annual income at calculation time
    pub annual_income: f64,
    /// Monthly balance at calculation time
    pub monthly_balance: f64,
    /// Outstanding debt at calculation time
    pub outstanding_debt: f64,
    /// Credit utilization (%) at calculation time
    pub credit_utilization_ratio: f64,
}

impl InputSnapshot {
    /// Capture the persisted fields from a feature vector
    pub fn from_features(features: &FeatureVector) -> Self {
        Self {
            annual_income: features.annual_income,
            monthly_balance: features.monthly_balance,
            outstanding_debt: features.outstanding_debt,
            credit_utilization_ratio: features.credit_utilization_ratio,
        }
    }
}

/// Append-only persistence row, keyed by (user id, timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    /// Owning user
    pub user_id: Uuid,

    /// Prediction as produced at calculation time
    pub prediction: PredictionResult,

    /// Risk level derived at calculation time
    pub risk_level: RiskLevel,

    /// Input snapshot
    pub snapshot: InputSnapshot,

    /// Calculation timestamp
    pub calculated_at: DateTime<Utc>,
}
