//! Claim aggregation.
//!
//! [`aggregate`] is the single entry point of the engine. It runs the five
//! category calculators independently, sums preferential and unsecured
//! amounts, and rounds every output figure to 2 decimal places.

use rust_decimal::Decimal;
use tracing::debug;

use super::holiday_pay::calculate_holiday_pay;
use super::notice_pay::calculate_notice_pay;
use super::pension_contributions::calculate_pension_contributions;
use super::redundancy_pay::calculate_redundancy_pay;
use super::wage_arrears::calculate_wage_arrears;
use crate::models::{
    AggregatedClaim, AuditTrace, AuditWarning, EmployeeFacts, PayType, StatutoryLimitEntry,
    round_2dp,
};

/// Computes the full claim for one employee.
///
/// A record without a yearly salary, start date or end date yields an all-zero
/// claim carrying an `INCOMPLETE_RECORD` warning. Otherwise each category is
/// computed on its own, so a missing input only zeroes the categories that
/// need it.
///
/// The function is pure: identical facts and limit table give an identical
/// claim.
///
/// # Examples
///
/// ```
/// use entitlement_engine::calculation::aggregate;
/// use entitlement_engine::models::EmployeeFacts;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let facts = EmployeeFacts {
///     yearly_salary: Some(Decimal::from(26000)),
///     start_date: NaiveDate::from_ymd_opt(2020, 1, 1),
///     end_date: NaiveDate::from_ymd_opt(2024, 1, 15),
///     date_last_paid: NaiveDate::from_ymd_opt(2024, 1, 1),
///     ..EmployeeFacts::default()
/// };
///
/// let claim = aggregate(&facts, &[]);
/// assert_eq!(claim.wage_arrears.amounts.preferential.to_string(), "800.00");
/// assert_eq!(claim.wage_arrears.amounts.unsecured.to_string(), "600.00");
/// ```
pub fn aggregate(facts: &EmployeeFacts, limits: &[StatutoryLimitEntry]) -> AggregatedClaim {
    if !facts.is_complete() {
        debug!(
            employee_id = %facts.employee_id,
            "Incomplete employee record, returning zero claim"
        );
        return incomplete_claim(facts);
    }

    let wage_arrears = calculate_wage_arrears(facts, 1);
    let holiday_pay = calculate_holiday_pay(facts, 2);
    let notice_pay = calculate_notice_pay(facts, 3);
    let redundancy_pay = calculate_redundancy_pay(facts, limits, 4);
    let pension = calculate_pension_contributions(facts, 5);

    let total_preferential = saturating_sum(&[
        wage_arrears.claim.amounts.preferential,
        holiday_pay.claim.amounts.preferential,
        notice_pay.claim.amounts.preferential,
        pension.claim.amounts.preferential,
    ]);

    let total_unsecured = saturating_sum(&[
        wage_arrears.claim.amounts.unsecured,
        holiday_pay.claim.amounts.unsecured,
        notice_pay.claim.amounts.unsecured,
        redundancy_pay.claim.amounts.unsecured,
        pension.claim.amounts.unsecured,
    ]);

    let mut warnings: Vec<AuditWarning> = Vec::new();
    if facts.pay_type == PayType::Variable && facts.average_weekly_pay_12_week.is_none() {
        warnings.push(AuditWarning::new(
            "AVERAGE_WEEKLY_PAY_MISSING",
            "Variable pay without a 12-week average; weekly pay taken as yearly salary / 52",
            "low",
        ));
    }
    warnings.extend(wage_arrears.warnings);
    warnings.extend(holiday_pay.warnings);
    warnings.extend(notice_pay.warnings);
    warnings.extend(redundancy_pay.warnings);
    warnings.extend(pension.warnings);

    let claim = AggregatedClaim {
        wage_arrears: wage_arrears.claim.rounded(),
        holiday_pay: holiday_pay.claim.rounded(),
        notice_pay: notice_pay.claim.rounded(),
        redundancy_pay: redundancy_pay.claim.rounded(),
        pension_contributions: pension.claim.rounded(),
        total_preferential_claim: round_2dp(total_preferential.max(Decimal::ZERO)),
        total_unsecured_claim: round_2dp(total_unsecured.max(Decimal::ZERO)),
        audit_trace: AuditTrace {
            steps: vec![
                wage_arrears.audit_step,
                holiday_pay.audit_step,
                notice_pay.audit_step,
                redundancy_pay.audit_step,
                pension.audit_step,
            ],
            warnings,
        },
    };

    debug!(
        employee_id = %facts.employee_id,
        total_preferential = %claim.total_preferential_claim,
        total_unsecured = %claim.total_unsecured_claim,
        warnings = claim.audit_trace.warnings.len(),
        "Claim aggregated"
    );

    claim
}

/// Sums category amounts, clamping at the `Decimal` range instead of overflowing.
fn saturating_sum(amounts: &[Decimal]) -> Decimal {
    amounts
        .iter()
        .fold(Decimal::ZERO, |acc, amount| acc.saturating_add(*amount))
}

fn incomplete_claim(facts: &EmployeeFacts) -> AggregatedClaim {
    let missing: Vec<&str> = [
        ("yearly_salary", facts.yearly_salary.is_none()),
        ("start_date", facts.start_date.is_none()),
        ("end_date", facts.end_date.is_none()),
    ]
    .into_iter()
    .filter_map(|(field, absent)| absent.then_some(field))
    .collect();

    let zero = AggregatedClaim::default();
    AggregatedClaim {
        wage_arrears: zero.wage_arrears.rounded(),
        holiday_pay: zero.holiday_pay.rounded(),
        notice_pay: zero.notice_pay.rounded(),
        redundancy_pay: zero.redundancy_pay.rounded(),
        pension_contributions: zero.pension_contributions.rounded(),
        total_preferential_claim: round_2dp(Decimal::ZERO),
        total_unsecured_claim: round_2dp(Decimal::ZERO),
        audit_trace: AuditTrace {
            steps: Vec::new(),
            warnings: vec![AuditWarning::new(
                "INCOMPLETE_RECORD",
                format!(
                    "Claim not computed: missing {}; review manually",
                    missing.join(", ")
                ),
                "high",
            )],
        },
    }
}
