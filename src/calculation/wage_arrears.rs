//! Wage arrears calculation.
//!
//! Arrears run from the date wages were last paid up to termination. Arrears
//! are preferential up to a fixed ceiling per employee; anything above the
//! ceiling is an unsecured claim.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::date_utils::days_between;
use super::pay_rates::{checked_product, daily_wage, out_of_range_warning, weekly_wage};
use crate::models::{AuditStep, AuditWarning, ClaimAmounts, EmployeeFacts, WageArrearsClaim};

/// Maximum preferential claim for wage arrears per employee.
pub const WAGE_ARREARS_PREFERENTIAL_CEILING: Decimal = Decimal::from_parts(800, 0, 0, false, 0);

const STATUTORY_REF: &str = "IA 1986 Sch 6 para 9";

/// The result of a wage arrears calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageArrearsResult {
    /// The unrounded wage arrears claim.
    pub claim: WageArrearsClaim,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Warnings raised while calculating.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates arrears of pay owed at termination.
///
/// `arrears_days` is the whole number of days from `date_last_paid` to
/// `end_date`; it is zero when either date is missing or wages were paid up to
/// (or beyond) termination.
///
/// # Examples
///
/// ```
/// use entitlement_engine::calculation::calculate_wage_arrears;
/// use entitlement_engine::models::EmployeeFacts;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let facts = EmployeeFacts {
///     yearly_salary: Some(Decimal::from(26000)),
///     date_last_paid: NaiveDate::from_ymd_opt(2024, 1, 1),
///     end_date: NaiveDate::from_ymd_opt(2024, 1, 15),
///     ..EmployeeFacts::default()
/// };
///
/// let result = calculate_wage_arrears(&facts, 1);
/// assert_eq!(result.claim.arrears_days, 14);
/// assert_eq!(result.claim.amounts.preferential, Decimal::from(800));
/// assert_eq!(result.claim.amounts.unsecured, Decimal::from(600));
/// ```
pub fn calculate_wage_arrears(facts: &EmployeeFacts, step_number: u32) -> WageArrearsResult {
    let salary = facts.salary_or_zero();
    let weekly = weekly_wage(salary);
    let daily = daily_wage(salary, facts.work_days_per_week);
    let mut warnings = Vec::new();

    let arrears_days = match (facts.date_last_paid, facts.end_date) {
        (Some(last_paid), Some(end)) if last_paid < end => days_between(last_paid, end),
        (Some(_), Some(_)) => 0,
        _ => {
            warnings.push(AuditWarning::new(
                "CATEGORY_NOT_COMPUTED",
                "Wage arrears not computed: date last paid or end date is missing",
                "medium",
            ));
            0
        }
    };

    let total = match checked_product(&[Decimal::from(arrears_days), daily]) {
        Some(total) => total,
        None => {
            warnings.push(out_of_range_warning("Wage arrears"));
            Decimal::ZERO
        }
    };
    let amounts = ClaimAmounts::split_at_ceiling(total, WAGE_ARREARS_PREFERENTIAL_CEILING);

    let audit_step = AuditStep {
        step_number,
        rule_id: "wage_arrears".to_string(),
        rule_name: "Wage Arrears".to_string(),
        statutory_ref: STATUTORY_REF.to_string(),
        input: serde_json::json!({
            "yearly_salary": salary.normalize().to_string(),
            "work_days_per_week": facts.work_days_per_week,
            "date_last_paid": facts.date_last_paid.map(|d| d.to_string()),
            "end_date": facts.end_date.map(|d| d.to_string())
        }),
        output: serde_json::json!({
            "weekly_wage": weekly.normalize().to_string(),
            "daily_wage": daily.normalize().to_string(),
            "arrears_days": arrears_days,
            "preferential": amounts.preferential.normalize().to_string(),
            "unsecured": amounts.unsecured.normalize().to_string()
        }),
        reasoning: format!(
            "{} days x £{} = £{}; preferential up to £{}",
            arrears_days,
            daily.round_dp(2),
            amounts.total.round_dp(2),
            WAGE_ARREARS_PREFERENTIAL_CEILING
        ),
    };

    WageArrearsResult {
        claim: WageArrearsClaim {
            amounts,
            arrears_days,
            daily_wage: daily,
        },
        audit_step,
        warnings,
    }
}
