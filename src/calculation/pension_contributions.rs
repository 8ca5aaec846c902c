//! Unpaid employer pension contribution calculation.
//!
//! Contributions owed run from the date they were last paid up to termination
//! and are charged at the employer's contribution percentage of the wages
//! earned in that period. The whole amount is preferential.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::date_utils::days_between;
use super::pay_rates::{checked_product, daily_wage, out_of_range_warning};
use crate::models::{
    AuditStep, AuditWarning, ClaimAmounts, EmployeeFacts, PensionContributionClaim,
};

const ONE_HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

const STATUTORY_REF: &str = "PSA 1993 Sch 4 para 2";

/// The result of a pension contribution calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionContributionResult {
    /// The unrounded pension contribution claim.
    pub claim: PensionContributionClaim,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Warnings raised while calculating.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates unpaid employer pension contributions.
///
/// The claim is zero when the employee was not opted in, either date is
/// missing, contributions were paid up to termination, or there is no salary
/// or working week to derive wages from.
///
/// # Examples
///
/// ```
/// use entitlement_engine::calculation::calculate_pension_contributions;
/// use entitlement_engine::models::EmployeeFacts;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let facts = EmployeeFacts {
///     yearly_salary: Some(Decimal::from(26000)),
///     pension_opted_in: true,
///     employer_pension_percent: Decimal::from(3),
///     date_contributions_last_paid: NaiveDate::from_ymd_opt(2024, 1, 1),
///     end_date: NaiveDate::from_ymd_opt(2024, 1, 31),
///     ..EmployeeFacts::default()
/// };
///
/// let result = calculate_pension_contributions(&facts, 5);
/// assert_eq!(result.claim.days_owed, 30);
/// assert_eq!(result.claim.amounts.preferential, Decimal::from(90));
/// ```
pub fn calculate_pension_contributions(
    facts: &EmployeeFacts,
    step_number: u32,
) -> PensionContributionResult {
    let salary = facts.salary_or_zero();
    let input = serde_json::json!({
        "pension_opted_in": facts.pension_opted_in,
        "employer_pension_percent": facts.employer_pension_percent.normalize().to_string(),
        "date_contributions_last_paid": facts.date_contributions_last_paid.map(|d| d.to_string()),
        "end_date": facts.end_date.map(|d| d.to_string()),
        "yearly_salary": salary.normalize().to_string(),
        "work_days_per_week": facts.work_days_per_week
    });

    let not_owed = |reasoning: &str, warnings: Vec<AuditWarning>| PensionContributionResult {
        claim: PensionContributionClaim::default(),
        audit_step: AuditStep {
            step_number,
            rule_id: "pension_contributions".to_string(),
            rule_name: "Unpaid Pension Contributions".to_string(),
            statutory_ref: STATUTORY_REF.to_string(),
            input: input.clone(),
            output: serde_json::json!({ "computed": false }),
            reasoning: reasoning.to_string(),
        },
        warnings,
    };

    if !facts.pension_opted_in {
        return not_owed("No contributions owed - employee not opted in to the scheme", Vec::new());
    }

    let (Some(last_paid), Some(end)) = (facts.date_contributions_last_paid, facts.end_date) else {
        return not_owed(
            "No contributions computed - date contributions last paid or end date is missing",
            vec![AuditWarning::new(
                "CATEGORY_NOT_COMPUTED",
                "Pension contributions not computed: date contributions last paid or end date is missing",
                "medium",
            )],
        );
    };

    if last_paid >= end {
        return not_owed("No contributions owed - paid up to termination", Vec::new());
    }
    if salary.is_zero() || facts.work_days_per_week == 0 {
        return not_owed("No contributions owed - no salary or working week", Vec::new());
    }

    let days_owed = days_between(last_paid, end).max(0);
    let daily = daily_wage(salary, facts.work_days_per_week);
    let rate = facts.employer_pension_percent / ONE_HUNDRED;
    let wages_due = checked_product(&[Decimal::from(days_owed), daily]);

    let total = match wages_due {
        Some(wages) if facts.employer_pension_percent > Decimal::ZERO && wages > Decimal::ZERO => {
            wages.checked_mul(rate)
        }
        Some(_) => Some(Decimal::ZERO),
        None => None,
    };
    let (Some(wages_due), Some(total)) = (wages_due, total) else {
        return not_owed(
            "No contributions computed - the amount exceeds the supported range",
            vec![out_of_range_warning("Pension contributions")],
        );
    };

    let claim = PensionContributionClaim {
        amounts: ClaimAmounts::preferential(total),
        days_owed,
        wages_due_for_period: wages_due,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "pension_contributions".to_string(),
        rule_name: "Unpaid Pension Contributions".to_string(),
        statutory_ref: STATUTORY_REF.to_string(),
        input,
        output: serde_json::json!({
            "days_owed": days_owed,
            "daily_wage": daily.normalize().to_string(),
            "wages_due_for_period": wages_due.normalize().to_string(),
            "preferential": claim.amounts.preferential.normalize().to_string()
        }),
        reasoning: format!(
            "{} days x £{} = £{} wages; {}% employer contribution = £{}",
            days_owed,
            daily.round_dp(2),
            wages_due.round_dp(2),
            facts.employer_pension_percent.normalize(),
            total.round_dp(2)
        ),
    };

    PensionContributionResult {
        claim,
        audit_step,
        warnings: Vec::new(),
    }
}
