//! Feature engineering: raw profile to model feature vector

use crate::types::{FeatureVector, RawProfile};
use crate::{Error, Result};
use tracing::debug;

/// Check that the profile carries the minimum attribute set for scoring.
///
/// This is a cheap pre-flight gate over the six required fields, not full
/// validation; field-level bound checks happen at the transport boundary.
pub fn has_sufficient_data(profile: &RawProfile) -> bool {
    profile.age.is_some()
        && profile.annual_income.is_some()
        && profile.monthly_salary.is_some()
        && profile.monthly_balance.is_some()
        && profile.num_bank_accounts.is_some()
        && profile.num_credit_cards.is_some()
}

/// Project a raw profile onto the model's feature vector.
///
/// Field-for-field rename with no unit conversion; the inputs are already
/// in the units the model expects. Fails only when the sufficiency gate
/// would have failed.
pub fn transform(profile: &RawProfile) -> Result<FeatureVector> {
    debug!("Transforming raw profile to model features");

    let (age, annual_income, monthly_salary, monthly_balance, num_bank_accounts, num_credit_cards) =
        match (
            profile.age,
            profile.annual_income,
            profile.monthly_salary,
            profile.monthly_balance,
            profile.num_bank_accounts,
            profile.num_credit_cards,
        ) {
            (Some(a), Some(ai), Some(ms), Some(mb), Some(ba), Some(cc)) => {
                (a, ai, ms, mb, ba, cc)
            }
            _ => {
                return Err(Error::InsufficientData(
                    "age, income, salary, balance and account counts are required".to_string(),
                ))
            }
        };

    Ok(FeatureVector {
        age,
        annual_income,
        monthly_inhand_salary: monthly_salary,
        monthly_balance,
        num_bank_accounts,
        num_credit_card: num_credit_cards,
        interest_rate: profile.interest_rate,
        num_of_loan: profile.num_loans,
        delay_from_due_date: profile.delay_from_due_date,
        num_of_delayed_payment: profile.num_delayed_payments,
        num_credit_inquiries: profile.num_credit_inquiries,
        credit_utilization_ratio: profile.credit_utilization_ratio,
        credit_history_age_months: profile.credit_history_age_months,
        total_emi_per_month: profile.total_emi_per_month,
        amount_invested_monthly: profile.amount_invested_monthly,
        outstanding_debt: profile.outstanding_debt,
    })
}
