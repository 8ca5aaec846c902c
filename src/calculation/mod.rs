//! Calculation logic for the Statutory Entitlement Engine.
//!
//! This module contains the date utilities, the statutory weekly-cap lookup,
//! one calculator per claim category (wage arrears, holiday pay, notice pay,
//! redundancy pay and pension contributions), and the aggregator that
//! combines them into a single claim.

mod aggregator;
mod date_utils;
mod holiday_pay;
mod notice_pay;
mod pay_rates;
mod pension_contributions;
mod redundancy_pay;
mod statutory_limit;
mod wage_arrears;

pub use aggregator::aggregate;
pub use date_utils::{DAYS_PER_YEAR, days_between, parse_calendar_date, years_between};
pub use holiday_pay::{
    HOLIDAY_YEAR_DAYS, HolidayPayResult, calculate_holiday_pay, current_holiday_year_start,
};
pub use notice_pay::{
    MAX_STATUTORY_NOTICE_WEEKS, NoticePayResult, WEEKS_PER_MONTH, calculate_notice_pay,
    statutory_notice_weeks,
};
pub use pay_rates::{WEEKS_PER_YEAR, daily_wage, weekly_wage};
pub use pension_contributions::{PensionContributionResult, calculate_pension_contributions};
pub use redundancy_pay::{
    MAX_REDUNDANCY_WEEKS, MAX_SERVICE_YEARS, MIN_QUALIFYING_AGE, MIN_QUALIFYING_SERVICE_YEARS,
    RedundancyPayResult, accumulate_redundancy_weeks, calculate_redundancy_pay, weeks_for_age,
};
pub use statutory_limit::{FALLBACK_WEEKLY_CAP, lookup_weekly_cap};
pub use wage_arrears::{
    WAGE_ARREARS_PREFERENTIAL_CEILING, WageArrearsResult, calculate_wage_arrears,
};
