//! Weekly and daily pay derived from an annual salary.

use rust_decimal::Decimal;

use crate::models::AuditWarning;

/// Pay weeks per year.
pub const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

/// Weekly wage for an annual salary (`salary / 52`).
pub fn weekly_wage(yearly_salary: Decimal) -> Decimal {
    yearly_salary / WEEKS_PER_YEAR
}

/// Daily wage for an annual salary spread over `work_days_per_week`.
///
/// Zero working days yields a zero rate rather than a division by zero.
pub fn daily_wage(yearly_salary: Decimal, work_days_per_week: u8) -> Decimal {
    if work_days_per_week == 0 {
        return Decimal::ZERO;
    }
    weekly_wage(yearly_salary) / Decimal::from(work_days_per_week)
}

/// Multiplies `factors`, returning `None` when the product leaves the `Decimal` range.
pub(crate) fn checked_product(factors: &[Decimal]) -> Option<Decimal> {
    factors
        .iter()
        .try_fold(Decimal::ONE, |acc, factor| acc.checked_mul(*factor))
}

/// Warning attached when a category amount cannot be represented.
pub(crate) fn out_of_range_warning(category: &str) -> AuditWarning {
    AuditWarning::new(
        "CATEGORY_NOT_COMPUTED",
        format!("{} not computed: the amount exceeds the supported range", category),
        "medium",
    )
}
