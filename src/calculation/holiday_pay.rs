//! Holiday pay calculation.
//!
//! Holiday accrues pro rata through the holiday year in force at termination.
//! Outstanding days (accrued plus carried forward, less days taken) are paid at
//! the employee's daily rate and rank as a preferential claim in full.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::date_utils::days_between;
use super::pay_rates::{daily_wage, out_of_range_warning};
use crate::models::{AuditStep, AuditWarning, ClaimAmounts, EmployeeFacts, HolidayPayClaim};

/// Days in a holiday year for pro-rata accrual.
pub const HOLIDAY_YEAR_DAYS: Decimal = Decimal::from_parts(365, 0, 0, false, 0);

const STATUTORY_REF: &str = "IA 1986 Sch 6 para 10";

/// The result of a holiday pay calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayPayResult {
    /// The unrounded holiday pay claim.
    pub claim: HolidayPayClaim,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Warnings raised while calculating.
    pub warnings: Vec<AuditWarning>,
}

/// Moves `date` into `year`, rolling 29 February over to 1 March when `year`
/// is not a leap year.
fn with_year_rolling(date: NaiveDate, year: i32) -> Option<NaiveDate> {
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// Returns the start of the holiday year in force on `end_date`.
///
/// The employer's holiday-year start is moved into `end_date`'s calendar year;
/// if that lands after `end_date`, the aligned date is moved back one year.
///
/// # Examples
///
/// ```
/// use entitlement_engine::calculation::current_holiday_year_start;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2019, 4, 1).unwrap();
/// assert_eq!(
///     current_holiday_year_start(start, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()),
///     NaiveDate::from_ymd_opt(2024, 4, 1)
/// );
/// assert_eq!(
///     current_holiday_year_start(start, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()),
///     NaiveDate::from_ymd_opt(2023, 4, 1)
/// );
/// ```
pub fn current_holiday_year_start(
    holiday_year_start: NaiveDate,
    end_date: NaiveDate,
) -> Option<NaiveDate> {
    let aligned = with_year_rolling(holiday_year_start, end_date.year())?;
    if aligned > end_date {
        with_year_rolling(aligned, aligned.year() - 1)
    } else {
        Some(aligned)
    }
}

/// Calculates accrued but untaken holiday pay at termination.
///
/// Returns a zero claim when the holiday-year start or the end date is missing,
/// or when the employee has taken at least as much holiday as they accrued.
///
/// # Examples
///
/// ```
/// use entitlement_engine::calculation::calculate_holiday_pay;
/// use entitlement_engine::models::EmployeeFacts;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let facts = EmployeeFacts {
///     yearly_salary: Some(Decimal::from(26000)),
///     holiday_year_start_date: NaiveDate::from_ymd_opt(2020, 1, 1),
///     end_date: NaiveDate::from_ymd_opt(2023, 12, 31),
///     holiday_days_taken: Decimal::from(20),
///     ..EmployeeFacts::default()
/// };
///
/// // 364/365 of 28 days accrued, 20 taken, paid at 100 a day.
/// let result = calculate_holiday_pay(&facts, 2);
/// assert!(result.claim.amounts.total > Decimal::from(790));
/// assert_eq!(result.claim.amounts.unsecured, Decimal::ZERO);
/// ```
pub fn calculate_holiday_pay(facts: &EmployeeFacts, step_number: u32) -> HolidayPayResult {
    let input = serde_json::json!({
        "holiday_entitlement_days_per_year": facts.holiday_entitlement_days_per_year.normalize().to_string(),
        "holiday_days_taken": facts.holiday_days_taken.normalize().to_string(),
        "holiday_days_carried_forward": facts.holiday_days_carried_forward.normalize().to_string(),
        "holiday_year_start_date": facts.holiday_year_start_date.map(|d| d.to_string()),
        "end_date": facts.end_date.map(|d| d.to_string()),
        "yearly_salary": facts.salary_or_zero().normalize().to_string(),
        "work_days_per_week": facts.work_days_per_week
    });

    let year_start = match (facts.holiday_year_start_date, facts.end_date) {
        (Some(start), Some(end)) => current_holiday_year_start(start, end).map(|s| (s, end)),
        _ => None,
    };

    let Some((year_start, end_date)) = year_start else {
        return HolidayPayResult {
            claim: HolidayPayClaim::default(),
            audit_step: AuditStep {
                step_number,
                rule_id: "holiday_pay".to_string(),
                rule_name: "Holiday Pay".to_string(),
                statutory_ref: STATUTORY_REF.to_string(),
                input,
                output: serde_json::json!({ "computed": false }),
                reasoning: "No holiday pay computed - holiday year start or end date is missing"
                    .to_string(),
            },
            warnings: vec![AuditWarning::new(
                "CATEGORY_NOT_COMPUTED",
                "Holiday pay not computed: holiday year start date or end date is missing",
                "medium",
            )],
        };
    };

    let days_elapsed = days_between(year_start, end_date).max(0);
    let accrued = (Decimal::from(days_elapsed) / HOLIDAY_YEAR_DAYS)
        .checked_mul(facts.holiday_entitlement_days_per_year)
        .and_then(|pro_rata| pro_rata.checked_add(facts.holiday_days_carried_forward));
    let outstanding = accrued.and_then(|a| a.checked_sub(facts.holiday_days_taken));
    let daily_rate = daily_wage(facts.salary_or_zero(), facts.work_days_per_week);
    let mut warnings = Vec::new();

    let total = match outstanding {
        Some(days) if days > Decimal::ZERO => days.checked_mul(daily_rate).ok_or(()),
        Some(_) => Ok(Decimal::ZERO),
        None => Err(()),
    };

    let (claim, reasoning) = match (outstanding, total) {
        (Some(outstanding), Ok(total)) if outstanding > Decimal::ZERO => {
            let claim = HolidayPayClaim {
                amounts: ClaimAmounts::preferential(total),
                days_elapsed,
                outstanding_days: outstanding,
                daily_rate,
            };
            let reasoning = format!(
                "{} of {} days into holiday year starting {}: {} days outstanding x £{} = £{}",
                days_elapsed,
                HOLIDAY_YEAR_DAYS,
                year_start,
                outstanding.round_dp(2),
                daily_rate.round_dp(2),
                total.round_dp(2)
            );
            (claim, reasoning)
        }
        (_, Ok(_)) => {
            let claim = HolidayPayClaim {
                days_elapsed,
                ..HolidayPayClaim::default()
            };
            let reasoning = format!(
                "No holiday outstanding: {} days accrued, {} taken",
                accrued.unwrap_or_default().round_dp(2),
                facts.holiday_days_taken.normalize()
            );
            (claim, reasoning)
        }
        (_, Err(())) => {
            warnings.push(out_of_range_warning("Holiday pay"));
            let claim = HolidayPayClaim {
                days_elapsed,
                ..HolidayPayClaim::default()
            };
            let reasoning =
                "No holiday pay computed - the amount exceeds the supported range".to_string();
            (claim, reasoning)
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "holiday_pay".to_string(),
        rule_name: "Holiday Pay".to_string(),
        statutory_ref: STATUTORY_REF.to_string(),
        input,
        output: serde_json::json!({
            "holiday_year_start": year_start.to_string(),
            "days_elapsed": days_elapsed,
            "accrued_days": accrued.map(|a| a.normalize().to_string()),
            "outstanding_days": claim.outstanding_days.normalize().to_string(),
            "preferential": claim.amounts.preferential.normalize().to_string()
        }),
        reasoning,
    };

    HolidayPayResult {
        claim,
        audit_step,
        warnings,
    }
}
