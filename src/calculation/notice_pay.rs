//! Notice pay calculation.
//!
//! ## Statutory notice
//!
//! - Less than one month's service: no entitlement
//! - One month to under two years: 1 week
//! - Two years or more: 1 week per complete year, capped at 12 weeks
//!
//! ## Contractual notice
//!
//! The contractual notice figure is used directly as the week count and then
//! converted to months of salary. The record field is labelled in months, so
//! every contractual claim carries a `CONTRACTUAL_NOTICE_UNITS` warning until
//! the unit is confirmed.
//!
//! Notice pay is never preferential.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::date_utils::years_between;
use super::pay_rates::{out_of_range_warning, weekly_wage};
use crate::models::{AuditStep, AuditWarning, ClaimAmounts, ClaimType, EmployeeFacts, NoticePayClaim};

/// Maximum weeks of statutory notice.
pub const MAX_STATUTORY_NOTICE_WEEKS: u32 = 12;

/// Weeks per month used to convert contractual notice.
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

const STATUTORY_REF: &str = "ERA 1996 s.86";

/// The result of a notice pay calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticePayResult {
    /// The unrounded notice pay claim.
    pub claim: NoticePayClaim,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Warnings raised while calculating.
    pub warnings: Vec<AuditWarning>,
}

/// Returns the weeks of statutory notice owed for a length of service in years.
///
/// # Examples
///
/// ```
/// use entitlement_engine::calculation::statutory_notice_weeks;
/// use rust_decimal::Decimal;
///
/// assert_eq!(statutory_notice_weeks(Decimal::new(5, 2)), 0);
/// assert_eq!(statutory_notice_weeks(Decimal::new(15, 1)), 1);
/// assert_eq!(statutory_notice_weeks(Decimal::from(9)), 9);
/// assert_eq!(statutory_notice_weeks(Decimal::from(25)), 12);
/// ```
pub fn statutory_notice_weeks(years_of_service: Decimal) -> u32 {
    if years_of_service * MONTHS_PER_YEAR < Decimal::ONE {
        return 0;
    }
    let full_years = years_of_service.floor().to_u32().unwrap_or(0);
    if full_years >= 2 {
        full_years.min(MAX_STATUTORY_NOTICE_WEEKS)
    } else {
        1
    }
}

/// Calculates pay in lieu of notice.
///
/// Returns a zero claim when either the start or end date is missing.
///
/// # Examples
///
/// ```
/// use entitlement_engine::calculation::calculate_notice_pay;
/// use entitlement_engine::models::EmployeeFacts;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let facts = EmployeeFacts {
///     yearly_salary: Some(Decimal::from(26000)),
///     start_date: NaiveDate::from_ymd_opt(2015, 1, 1),
///     end_date: NaiveDate::from_ymd_opt(2024, 1, 2),
///     average_weekly_pay_12_week: Some(Decimal::from(500)),
///     ..EmployeeFacts::default()
/// };
///
/// let result = calculate_notice_pay(&facts, 3);
/// assert_eq!(result.claim.notice_weeks, Decimal::from(9));
/// assert_eq!(result.claim.amounts.unsecured, Decimal::from(4500));
/// assert_eq!(result.claim.amounts.preferential, Decimal::ZERO);
/// ```
pub fn calculate_notice_pay(facts: &EmployeeFacts, step_number: u32) -> NoticePayResult {
    let salary = facts.salary_or_zero();
    let input = serde_json::json!({
        "claim_type": facts.claim_type,
        "contractual_notice_period_months": facts.contractual_notice_period_months.map(|m| m.normalize().to_string()),
        "start_date": facts.start_date.map(|d| d.to_string()),
        "end_date": facts.end_date.map(|d| d.to_string()),
        "yearly_salary": salary.normalize().to_string(),
        "average_weekly_pay_12_week": facts.average_weekly_pay_12_week.map(|w| w.normalize().to_string())
    });

    let (Some(start), Some(end)) = (facts.start_date, facts.end_date) else {
        return NoticePayResult {
            claim: NoticePayClaim::default(),
            audit_step: AuditStep {
                step_number,
                rule_id: "notice_pay".to_string(),
                rule_name: "Notice Pay".to_string(),
                statutory_ref: STATUTORY_REF.to_string(),
                input,
                output: serde_json::json!({ "computed": false }),
                reasoning: "No notice pay computed - start or end date is missing".to_string(),
            },
            warnings: vec![AuditWarning::new(
                "CATEGORY_NOT_COMPUTED",
                "Notice pay not computed: start date or end date is missing",
                "medium",
            )],
        };
    };

    let years_of_service = years_between(start, end);
    let mut warnings = Vec::new();

    let (claim, rule_id, reasoning) = match (facts.claim_type, facts.contractual_notice_period_months) {
        (ClaimType::Contractual, Some(notice_period)) => {
            let notice_weeks = notice_period;
            let monthly_salary = salary / MONTHS_PER_YEAR;
            let weekly = monthly_salary / WEEKS_PER_MONTH;
            warnings.push(AuditWarning::new(
                "CONTRACTUAL_NOTICE_UNITS",
                format!(
                    "Contractual notice period of {} was applied as weeks; confirm the unit before submitting",
                    notice_period.normalize()
                ),
                "medium",
            ));
            let total = notice_weeks
                .checked_div(WEEKS_PER_MONTH)
                .and_then(|months| months.checked_mul(monthly_salary));
            match total {
                Some(total) => {
                    let claim = NoticePayClaim {
                        amounts: ClaimAmounts::unsecured(total),
                        notice_weeks,
                        weekly_wage: weekly,
                    };
                    let reasoning = format!(
                        "Contractual notice: {} weeks / {} x £{} monthly = £{}",
                        notice_weeks.normalize(),
                        WEEKS_PER_MONTH,
                        monthly_salary.round_dp(2),
                        total.round_dp(2)
                    );
                    (claim, "notice_pay_contractual", reasoning)
                }
                None => {
                    let (claim, reasoning) = out_of_range_claim(notice_weeks, weekly, &mut warnings);
                    (claim, "notice_pay_contractual", reasoning)
                }
            }
        }
        _ => {
            let weeks = statutory_notice_weeks(years_of_service);
            let weekly = facts
                .average_weekly_pay_12_week
                .unwrap_or_else(|| weekly_wage(salary));
            let notice_weeks = Decimal::from(weeks);
            match notice_weeks.checked_mul(weekly) {
                Some(total) => {
                    let claim = NoticePayClaim {
                        amounts: ClaimAmounts::unsecured(total),
                        notice_weeks,
                        weekly_wage: weekly,
                    };
                    let reasoning = if weeks == 0 {
                        format!(
                            "No statutory notice: {} years of service is under one month",
                            years_of_service.round_dp(2)
                        )
                    } else {
                        format!(
                            "Statutory notice for {} years of service: {} weeks x £{} = £{}",
                            years_of_service.round_dp(2),
                            weeks,
                            weekly.round_dp(2),
                            total.round_dp(2)
                        )
                    };
                    (claim, "notice_pay_statutory", reasoning)
                }
                None => {
                    let (claim, reasoning) = out_of_range_claim(notice_weeks, weekly, &mut warnings);
                    (claim, "notice_pay_statutory", reasoning)
                }
            }
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: "Notice Pay".to_string(),
        statutory_ref: STATUTORY_REF.to_string(),
        input,
        output: serde_json::json!({
            "years_of_service": years_of_service.round_dp(4).to_string(),
            "notice_weeks": claim.notice_weeks.normalize().to_string(),
            "unsecured": claim.amounts.unsecured.normalize().to_string()
        }),
        reasoning,
    };

    NoticePayResult {
        claim,
        audit_step,
        warnings,
    }
}

/// Zero claim for a notice pay amount that cannot be represented.
fn out_of_range_claim(
    notice_weeks: Decimal,
    weekly_wage: Decimal,
    warnings: &mut Vec<AuditWarning>,
) -> (NoticePayClaim, String) {
    warnings.push(out_of_range_warning("Notice pay"));
    let claim = NoticePayClaim {
        amounts: ClaimAmounts::default(),
        notice_weeks,
        weekly_wage,
    };
    (
        claim,
        "No notice pay computed - the amount exceeds the supported range".to_string(),
    )
}
