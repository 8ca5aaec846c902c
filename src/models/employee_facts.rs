//! Employee facts model and related types.
//!
//! [`EmployeeFacts`] is the fully-typed, already-defaulted record the calculators
//! work from. Raw records are converted into it at the adapter boundary
//! (see [`crate::api::EmployeeRecordRequest`]).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default number of working days per week.
pub const DEFAULT_WORK_DAYS_PER_WEEK: u8 = 5;

/// Default statutory holiday entitlement in days per holiday year.
pub const DEFAULT_HOLIDAY_ENTITLEMENT_DAYS: Decimal = Decimal::from_parts(28, 0, 0, false, 0);

/// How the employee was paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayType {
    /// Fixed annual salary.
    #[default]
    Salaried,
    /// Pay varies week to week (hourly, commission, shifts).
    Variable,
}

/// The basis on which notice pay is claimed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimType {
    /// Statutory minimum notice.
    #[default]
    Statutory,
    /// Notice period written into the employment contract.
    Contractual,
}

/// The facts about one employee that drive every entitlement calculation.
///
/// Dates are `None` when the source record had no value or an unparsable one;
/// each calculator treats `None` as "cannot compute" and zeroes its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeFacts {
    /// Identifier used for audit and log correlation only.
    #[serde(default)]
    pub employee_id: String,
    /// Gross annual salary.
    pub yearly_salary: Option<Decimal>,
    /// How the employee was paid.
    #[serde(default)]
    pub pay_type: PayType,
    /// Contracted working days per week (1..=7).
    #[serde(default = "default_work_days")]
    pub work_days_per_week: u8,
    /// First day of employment.
    pub start_date: Option<NaiveDate>,
    /// Termination date.
    pub end_date: Option<NaiveDate>,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Last date up to which wages were paid.
    pub date_last_paid: Option<NaiveDate>,
    /// Holiday entitlement per holiday year, in days.
    #[serde(default = "default_holiday_entitlement")]
    pub holiday_entitlement_days_per_year: Decimal,
    /// Holiday days already taken this holiday year.
    #[serde(default)]
    pub holiday_days_taken: Decimal,
    /// Holiday days carried forward from the previous holiday year.
    #[serde(default)]
    pub holiday_days_carried_forward: Decimal,
    /// Any start date of the employer's holiday year (only day and month matter).
    pub holiday_year_start_date: Option<NaiveDate>,
    /// Basis of the notice pay claim.
    #[serde(default)]
    pub claim_type: ClaimType,
    /// Contractual notice period, used only for contractual claims.
    pub contractual_notice_period_months: Option<Decimal>,
    /// Average weekly pay over the last 12 weeks, from payroll averaging.
    pub average_weekly_pay_12_week: Option<Decimal>,
    /// Whether the employee was enrolled in the employer's pension scheme.
    #[serde(default)]
    pub pension_opted_in: bool,
    /// Employer pension contribution as a percentage of pay.
    #[serde(default)]
    pub employer_pension_percent: Decimal,
    /// Last date up to which employer pension contributions were paid.
    pub date_contributions_last_paid: Option<NaiveDate>,
}

fn default_work_days() -> u8 {
    DEFAULT_WORK_DAYS_PER_WEEK
}

fn default_holiday_entitlement() -> Decimal {
    DEFAULT_HOLIDAY_ENTITLEMENT_DAYS
}

impl Default for EmployeeFacts {
    fn default() -> Self {
        Self {
            employee_id: String::new(),
            yearly_salary: None,
            pay_type: PayType::Salaried,
            work_days_per_week: DEFAULT_WORK_DAYS_PER_WEEK,
            start_date: None,
            end_date: None,
            date_of_birth: None,
            date_last_paid: None,
            holiday_entitlement_days_per_year: DEFAULT_HOLIDAY_ENTITLEMENT_DAYS,
            holiday_days_taken: Decimal::ZERO,
            holiday_days_carried_forward: Decimal::ZERO,
            holiday_year_start_date: None,
            claim_type: ClaimType::Statutory,
            contractual_notice_period_months: None,
            average_weekly_pay_12_week: None,
            pension_opted_in: false,
            employer_pension_percent: Decimal::ZERO,
            date_contributions_last_paid: None,
        }
    }
}

impl EmployeeFacts {
    /// Returns the yearly salary, treating an absent salary as zero.
    pub fn salary_or_zero(&self) -> Decimal {
        self.yearly_salary.unwrap_or(Decimal::ZERO)
    }

    /// Returns true when the record has everything the aggregator requires:
    /// a salary, a start date and an end date.
    ///
    /// # Examples
    ///
    /// ```
    /// use entitlement_engine::models::EmployeeFacts;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut facts = EmployeeFacts::default();
    /// assert!(!facts.is_complete());
    ///
    /// facts.yearly_salary = Some(Decimal::from(26000));
    /// facts.start_date = NaiveDate::from_ymd_opt(2020, 1, 1);
    /// facts.end_date = NaiveDate::from_ymd_opt(2024, 1, 1);
    /// assert!(facts.is_complete());
    /// ```
    pub fn is_complete(&self) -> bool {
        self.yearly_salary.is_some() && self.start_date.is_some() && self.end_date.is_some()
    }
}
