//! Statutory redundancy pay calculation.
//!
//! ## Age/service table
//!
//! Each complete year of service (counted back from dismissal, at most 20)
//! earns weeks of pay according to the employee's age in that year:
//!
//! | Age in year of service | Weeks |
//! |------------------------|-------|
//! | 41 and over            | 1.5   |
//! | 22 to 40               | 1.0   |
//! | 18 to 21               | 0.5   |
//! | under 18               | 0     |
//!
//! The weekly wage is capped at the statutory limit in force at termination.
//! Redundancy pay is never preferential.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::date_utils::years_between;
use super::pay_rates::{out_of_range_warning, weekly_wage};
use super::statutory_limit::lookup_weekly_cap;
use crate::models::{
    AuditStep, AuditWarning, ClaimAmounts, EmployeeFacts, RedundancyPayClaim, StatutoryLimitEntry,
};

/// Maximum years of service that count towards redundancy pay.
pub const MAX_SERVICE_YEARS: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Maximum weeks of redundancy pay.
pub const MAX_REDUNDANCY_WEEKS: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Minimum complete years of service for entitlement.
pub const MIN_QUALIFYING_SERVICE_YEARS: i64 = 2;

/// Minimum age at dismissal for entitlement.
pub const MIN_QUALIFYING_AGE: Decimal = Decimal::from_parts(18, 0, 0, false, 0);

const STATUTORY_REF: &str = "ERA 1996 s.162";

/// The result of a redundancy pay calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedundancyPayResult {
    /// The unrounded redundancy pay claim.
    pub claim: RedundancyPayClaim,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Warnings raised while calculating.
    pub warnings: Vec<AuditWarning>,
}

/// Weeks of pay earned for one year of service at the given age.
///
/// # Examples
///
/// ```
/// use entitlement_engine::calculation::weeks_for_age;
/// use rust_decimal::Decimal;
///
/// assert_eq!(weeks_for_age(41), Decimal::new(15, 1));
/// assert_eq!(weeks_for_age(40), Decimal::ONE);
/// assert_eq!(weeks_for_age(21), Decimal::new(5, 1));
/// assert_eq!(weeks_for_age(17), Decimal::ZERO);
/// ```
pub fn weeks_for_age(age: i64) -> Decimal {
    match age {
        41.. => Decimal::new(15, 1),
        22..=40 => Decimal::ONE,
        18..=21 => Decimal::new(5, 1),
        _ => Decimal::ZERO,
    }
}

/// Sums the age-tiered weeks for `full_service_years` complete years ending
/// at `age_at_dismissal` (already floored), capped at 30 weeks.
pub fn accumulate_redundancy_weeks(age_at_dismissal: i64, full_service_years: i64) -> Decimal {
    let accumulated: Decimal = (0..full_service_years)
        .map(|i| weeks_for_age(age_at_dismissal - (full_service_years - 1 - i)))
        .sum();
    accumulated.min(MAX_REDUNDANCY_WEEKS)
}

fn not_computed(
    step_number: u32,
    input: serde_json::Value,
    reasoning: &str,
    warning: Option<AuditWarning>,
) -> RedundancyPayResult {
    RedundancyPayResult {
        claim: RedundancyPayClaim::default(),
        audit_step: AuditStep {
            step_number,
            rule_id: "redundancy_pay".to_string(),
            rule_name: "Statutory Redundancy Pay".to_string(),
            statutory_ref: STATUTORY_REF.to_string(),
            input,
            output: serde_json::json!({ "eligible": false }),
            reasoning: reasoning.to_string(),
        },
        warnings: warning.into_iter().collect(),
    }
}

/// Calculates statutory redundancy pay.
///
/// Eligibility requires an age of at least 18 at dismissal and at least two
/// complete years of service. Missing start, end or birth dates give a zero
/// claim.
///
/// # Examples
///
/// ```
/// use entitlement_engine::calculation::calculate_redundancy_pay;
/// use entitlement_engine::models::{EmployeeFacts, StatutoryLimitEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let facts = EmployeeFacts {
///     yearly_salary: Some(Decimal::from(31200)),
///     date_of_birth: NaiveDate::from_ymd_opt(1979, 1, 1),
///     start_date: NaiveDate::from_ymd_opt(2019, 1, 1),
///     end_date: NaiveDate::from_ymd_opt(2024, 6, 1),
///     ..EmployeeFacts::default()
/// };
/// let limits = vec![StatutoryLimitEntry::new(
///     NaiveDate::from_ymd_opt(2024, 4, 6).unwrap(),
///     Decimal::from(700),
/// )];
///
/// let result = calculate_redundancy_pay(&facts, &limits, 4);
/// assert_eq!(result.claim.redundancy_weeks, Decimal::new(75, 1));
/// assert_eq!(result.claim.amounts.unsecured, Decimal::from(4500));
/// ```
pub fn calculate_redundancy_pay(
    facts: &EmployeeFacts,
    limits: &[StatutoryLimitEntry],
    step_number: u32,
) -> RedundancyPayResult {
    let salary = facts.salary_or_zero();
    let input = serde_json::json!({
        "date_of_birth": facts.date_of_birth.map(|d| d.to_string()),
        "start_date": facts.start_date.map(|d| d.to_string()),
        "end_date": facts.end_date.map(|d| d.to_string()),
        "yearly_salary": salary.normalize().to_string(),
        "average_weekly_pay_12_week": facts.average_weekly_pay_12_week.map(|w| w.normalize().to_string())
    });

    let (Some(start), Some(end), Some(birth)) =
        (facts.start_date, facts.end_date, facts.date_of_birth)
    else {
        return not_computed(
            step_number,
            input,
            "No redundancy pay computed - start, end or birth date is missing",
            Some(AuditWarning::new(
                "CATEGORY_NOT_COMPUTED",
                "Redundancy pay not computed: start date, end date or date of birth is missing",
                "medium",
            )),
        );
    };

    let age_at_dismissal = years_between(birth, end);
    let service_years = years_between(start, end).min(MAX_SERVICE_YEARS);
    let full_service_years = service_years.floor().to_i64().unwrap_or(0);

    if age_at_dismissal < MIN_QUALIFYING_AGE || full_service_years < MIN_QUALIFYING_SERVICE_YEARS {
        let reasoning = format!(
            "Not eligible: age {} at dismissal with {} complete years of service (needs 18+ and 2+)",
            age_at_dismissal.floor(),
            full_service_years
        );
        return not_computed(step_number, input, &reasoning, None);
    }

    let floored_age = age_at_dismissal.floor().to_i64().unwrap_or(0);
    let redundancy_weeks = accumulate_redundancy_weeks(floored_age, full_service_years);

    let weekly_cap = lookup_weekly_cap(limits, Some(end));
    let uncapped_weekly = facts
        .average_weekly_pay_12_week
        .unwrap_or_else(|| weekly_wage(salary));
    let weekly = uncapped_weekly.min(weekly_cap);
    let Some(total) = redundancy_weeks.checked_mul(weekly) else {
        return not_computed(
            step_number,
            input,
            "No redundancy pay computed - the amount exceeds the supported range",
            Some(out_of_range_warning("Redundancy pay")),
        );
    };

    let claim = RedundancyPayClaim {
        amounts: ClaimAmounts::unsecured(total),
        redundancy_weeks,
        weekly_wage: weekly,
        weekly_cap,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "redundancy_pay".to_string(),
        rule_name: "Statutory Redundancy Pay".to_string(),
        statutory_ref: STATUTORY_REF.to_string(),
        input,
        output: serde_json::json!({
            "eligible": true,
            "age_at_dismissal": floored_age,
            "full_service_years": full_service_years,
            "redundancy_weeks": redundancy_weeks.normalize().to_string(),
            "weekly_cap": weekly_cap.normalize().to_string(),
            "weekly_wage": weekly.normalize().to_string(),
            "unsecured": total.normalize().to_string()
        }),
        reasoning: format!(
            "{} complete years ending at age {}: {} weeks x £{} (cap £{} in force {}) = £{}",
            full_service_years,
            floored_age,
            redundancy_weeks.normalize(),
            weekly.round_dp(2),
            weekly_cap.normalize(),
            end,
            total.round_dp(2)
        ),
    };

    RedundancyPayResult {
        claim,
        audit_step,
        warnings: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::date_utils::DAYS_PER_YEAR;
    use chrono::{Duration, NaiveDate};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Date of birth that makes the employee just over `age` years old on
    /// `on_date` under the 365.25-day year rule.
    fn birth_date_for_age(age: i64, on_date: NaiveDate) -> NaiveDate {
        let days = (Decimal::from(age) * DAYS_PER_YEAR).ceil().to_i64().unwrap();
        on_date - Duration::days(days)
    }

    fn limits() -> Vec<StatutoryLimitEntry> {
        vec![
            StatutoryLimitEntry::new(date(2024, 4, 6), dec("700")),
            StatutoryLimitEntry::new(date(2025, 4, 6), dec("750")),
        ]
    }

    fn create_test_facts(birth: NaiveDate, start: NaiveDate, end: NaiveDate) -> EmployeeFacts {
        EmployeeFacts {
            employee_id: "emp_001".to_string(),
            yearly_salary: Some(dec("31200")),
            date_of_birth: Some(birth),
            start_date: Some(start),
            end_date: Some(end),
            ..EmployeeFacts::default()
        }
    }

    #[test]
    fn test_age_45_five_years_gives_seven_and_a_half_weeks() {
        let end = date(2024, 6, 1);
        let facts = create_test_facts(birth_date_for_age(45, end), date(2019, 1, 1), end);
        let result = calculate_redundancy_pay(&facts, &limits(), 4);

        assert_eq!(result.claim.redundancy_weeks, dec("7.5"));
        assert_eq!(result.claim.weekly_wage, dec("600"));
        assert_eq!(result.claim.weekly_cap, dec("700"));
        assert_eq!(result.claim.amounts.unsecured, dec("4500"));
        assert_eq!(result.claim.amounts.preferential, Decimal::ZERO);
    }

    #[test]
    fn test_one_year_364_days_not_eligible() {
        let facts = create_test_facts(date(1980, 1, 1), date(2022, 6, 2), date(2024, 6, 1));
        let result = calculate_redundancy_pay(&facts, &limits(), 4);

        assert_eq!(result.claim.redundancy_weeks, Decimal::ZERO);
        assert_eq!(result.claim.amounts, ClaimAmounts::default());
        assert!(result.audit_step.reasoning.contains("Not eligible"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_two_complete_years_eligible() {
        // 2022-06-01 -> 2024-06-01 spans 29 Feb 2024: 731 days, just over 2 years.
        let facts = create_test_facts(date(1980, 1, 1), date(2022, 6, 1), date(2024, 6, 1));
        let result = calculate_redundancy_pay(&facts, &limits(), 4);

        assert!(result.claim.redundancy_weeks > Decimal::ZERO);
        assert_eq!(result.claim.redundancy_weeks, dec("3"));
    }

    #[test]
    fn test_tier_boundary_41_and_40() {
        assert_eq!(accumulate_redundancy_weeks(41, 2), dec("2.5"));
        assert_eq!(accumulate_redundancy_weeks(42, 2), dec("3"));
        assert_eq!(accumulate_redundancy_weeks(40, 2), dec("2"));
    }

    #[test]
    fn test_tier_boundary_22_and_18() {
        assert_eq!(accumulate_redundancy_weeks(23, 2), dec("2"));
        assert_eq!(accumulate_redundancy_weeks(22, 2), dec("1.5"));
        assert_eq!(accumulate_redundancy_weeks(19, 2), dec("1"));
        assert_eq!(accumulate_redundancy_weeks(18, 2), dec("0.5"));
    }

    #[test]
    fn test_weeks_capped_at_thirty() {
        assert_eq!(accumulate_redundancy_weeks(64, 20), dec("30"));
        assert_eq!(accumulate_redundancy_weeks(64, 25), dec("30"));
    }

    #[test]
    fn test_service_capped_at_twenty_years() {
        let end = date(2024, 6, 1);
        let facts = create_test_facts(birth_date_for_age(50, end), date(1990, 1, 1), end);
        let result = calculate_redundancy_pay(&facts, &limits(), 4);

        // Ages 31..=50: 10 years at 1.0 and 10 at 1.5.
        assert_eq!(result.claim.redundancy_weeks, dec("25"));
    }

    #[test]
    fn test_under_18_not_eligible() {
        let end = date(2024, 6, 1);
        let facts = create_test_facts(birth_date_for_age(17, end), date(2021, 1, 1), end);
        let result = calculate_redundancy_pay(&facts, &limits(), 4);
        assert_eq!(result.claim.amounts.total, Decimal::ZERO);
    }

    #[test]
    fn test_weekly_wage_capped() {
        let end = date(2024, 6, 1);
        let mut facts = create_test_facts(birth_date_for_age(30, end), date(2020, 1, 1), end);
        facts.average_weekly_pay_12_week = Some(dec("950"));
        let result = calculate_redundancy_pay(&facts, &limits(), 4);

        assert_eq!(result.claim.weekly_wage, dec("700"));
        assert_eq!(result.claim.redundancy_weeks, dec("4"));
        assert_eq!(result.claim.amounts.unsecured, dec("2800"));
    }

    #[test]
    fn test_cap_revision_follows_end_date() {
        let mut facts = create_test_facts(date(1970, 1, 1), date(2015, 1, 1), date(2025, 4, 5));
        facts.average_weekly_pay_12_week = Some(dec("900"));
        let before = calculate_redundancy_pay(&facts, &limits(), 4);
        assert_eq!(before.claim.weekly_cap, dec("700"));

        facts.end_date = Some(date(2025, 4, 6));
        let after = calculate_redundancy_pay(&facts, &limits(), 4);
        assert_eq!(after.claim.weekly_cap, dec("750"));
        assert_eq!(after.claim.weekly_wage, dec("750"));
    }

    #[test]
    fn test_empty_limit_table_uses_fallback_cap() {
        let mut facts = create_test_facts(date(1970, 1, 1), date(2015, 1, 1), date(2025, 6, 1));
        facts.average_weekly_pay_12_week = Some(dec("900"));
        let result = calculate_redundancy_pay(&facts, &[], 4);
        assert_eq!(result.claim.weekly_cap, dec("700"));
    }

    #[test]
    fn test_missing_birth_date_zeroes_and_warns() {
        let mut facts = create_test_facts(date(1980, 1, 1), date(2015, 1, 1), date(2024, 6, 1));
        facts.date_of_birth = None;
        let result = calculate_redundancy_pay(&facts, &limits(), 4);

        assert_eq!(result.claim, RedundancyPayClaim::default());
        assert_eq!(result.warnings[0].code, "CATEGORY_NOT_COMPUTED");
    }

    #[test]
    fn test_unrepresentable_amount_zeroes_and_warns() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(28), 0);
        let mut facts = create_test_facts(date(1970, 1, 1), date(2000, 1, 1), date(2024, 6, 1));
        facts.average_weekly_pay_12_week = Some(huge);
        let limits = vec![StatutoryLimitEntry::new(date(2024, 4, 6), huge)];
        let result = calculate_redundancy_pay(&facts, &limits, 4);

        assert_eq!(result.claim, RedundancyPayClaim::default());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "CATEGORY_NOT_COMPUTED");
        assert!(result.audit_step.reasoning.contains("supported range"));
    }

    #[test]
    fn test_birth_date_helper_gives_exact_age() {
        let end = date(2024, 6, 1);
        let birth = birth_date_for_age(45, end);
        let age = years_between(birth, end);
        assert_eq!(age.floor(), dec("45"));
    }
}
