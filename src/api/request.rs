//! Request types for the Statutory Entitlement Engine API.
//!
//! This module defines the JSON request structures for the `/calculate` and
//! `/calculate/batch` endpoints, and the conversion from a raw employee record
//! into the typed [`EmployeeFacts`] the calculators consume.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::parse_calendar_date;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ClaimType, DEFAULT_HOLIDAY_ENTITLEMENT_DAYS, DEFAULT_WORK_DAYS_PER_WEEK, EmployeeFacts, PayType,
};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRequest {
    /// The employee record to calculate entitlements for.
    pub employee: EmployeeRecordRequest,
}

/// Request body for the `/calculate/batch` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchClaimRequest {
    /// The employee records, calculated independently of each other.
    pub employees: Vec<EmployeeRecordRequest>,
}

/// A raw employee record as supplied by the case-management system.
///
/// Every field is optional. Dates are kept as strings and parsed leniently:
/// an unparsable date is treated the same as a missing one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeRecordRequest {
    /// Identifier used for audit and log correlation.
    pub employee_id: Option<String>,
    /// Gross annual salary.
    pub yearly_salary: Option<Decimal>,
    /// How the employee was paid.
    pub pay_type: Option<PayType>,
    /// Contracted working days per week.
    pub work_days_per_week: Option<i64>,
    /// First day of employment.
    pub start_date: Option<String>,
    /// Termination date.
    pub end_date: Option<String>,
    /// Date of birth.
    pub date_of_birth: Option<String>,
    /// Last date up to which wages were paid.
    pub date_last_paid: Option<String>,
    /// Holiday entitlement per holiday year, in days.
    pub holiday_entitlement_days_per_year: Option<Decimal>,
    /// Holiday days already taken this holiday year.
    pub holiday_days_taken: Option<Decimal>,
    /// Holiday days carried forward from the previous holiday year.
    pub holiday_days_carried_forward: Option<Decimal>,
    /// Start date of the employer's holiday year.
    pub holiday_year_start_date: Option<String>,
    /// Basis of the notice pay claim.
    pub claim_type: Option<ClaimType>,
    /// Contractual notice period in months.
    pub contractual_notice_period_months: Option<Decimal>,
    /// Average weekly pay over the last 12 weeks.
    pub average_weekly_pay_12_week: Option<Decimal>,
    /// Whether the employee was enrolled in the employer's pension scheme.
    pub pension_opted_in: Option<bool>,
    /// Employer pension contribution as a percentage of pay.
    pub employer_pension_percent: Option<Decimal>,
    /// Last date up to which employer pension contributions were paid.
    pub date_contributions_last_paid: Option<String>,
}

impl EmployeeRecordRequest {
    /// Converts the raw record into [`EmployeeFacts`], applying defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidEmployee`] if `work_days_per_week` is
    /// outside 1..=7 or any money or day value is negative.
    ///
    /// # Example
    ///
    /// ```
    /// use entitlement_engine::api::EmployeeRecordRequest;
    ///
    /// let record = EmployeeRecordRequest {
    ///     start_date: Some("2020-01-01".to_string()),
    ///     end_date: Some("not a date".to_string()),
    ///     ..Default::default()
    /// };
    /// let facts = record.into_facts().unwrap();
    /// assert!(facts.start_date.is_some());
    /// assert!(facts.end_date.is_none());
    /// assert_eq!(facts.work_days_per_week, 5);
    /// ```
    pub fn into_facts(self) -> EngineResult<EmployeeFacts> {
        let work_days_per_week = match self.work_days_per_week {
            None => DEFAULT_WORK_DAYS_PER_WEEK,
            Some(days @ 1..=7) => days as u8,
            Some(days) => {
                return Err(invalid(
                    "work_days_per_week",
                    format!("must be between 1 and 7, got {}", days),
                ));
            }
        };

        Ok(EmployeeFacts {
            employee_id: self.employee_id.unwrap_or_default(),
            yearly_salary: non_negative("yearly_salary", self.yearly_salary)?,
            pay_type: self.pay_type.unwrap_or_default(),
            work_days_per_week,
            start_date: parse_optional_date(self.start_date.as_deref()),
            end_date: parse_optional_date(self.end_date.as_deref()),
            date_of_birth: parse_optional_date(self.date_of_birth.as_deref()),
            date_last_paid: parse_optional_date(self.date_last_paid.as_deref()),
            holiday_entitlement_days_per_year: non_negative(
                "holiday_entitlement_days_per_year",
                self.holiday_entitlement_days_per_year,
            )?
            .unwrap_or(DEFAULT_HOLIDAY_ENTITLEMENT_DAYS),
            holiday_days_taken: non_negative("holiday_days_taken", self.holiday_days_taken)?
                .unwrap_or(Decimal::ZERO),
            holiday_days_carried_forward: non_negative(
                "holiday_days_carried_forward",
                self.holiday_days_carried_forward,
            )?
            .unwrap_or(Decimal::ZERO),
            holiday_year_start_date: parse_optional_date(self.holiday_year_start_date.as_deref()),
            claim_type: self.claim_type.unwrap_or_default(),
            contractual_notice_period_months: non_negative(
                "contractual_notice_period_months",
                self.contractual_notice_period_months,
            )?,
            average_weekly_pay_12_week: non_negative(
                "average_weekly_pay_12_week",
                self.average_weekly_pay_12_week,
            )?,
            pension_opted_in: self.pension_opted_in.unwrap_or(false),
            employer_pension_percent: non_negative(
                "employer_pension_percent",
                self.employer_pension_percent,
            )?
            .unwrap_or(Decimal::ZERO),
            date_contributions_last_paid: parse_optional_date(
                self.date_contributions_last_paid.as_deref(),
            ),
        })
    }
}

fn parse_optional_date(value: Option<&str>) -> Option<chrono::NaiveDate> {
    value.and_then(parse_calendar_date)
}

fn non_negative(field: &str, value: Option<Decimal>) -> EngineResult<Option<Decimal>> {
    match value {
        Some(v) if v.is_sign_negative() && !v.is_zero() => {
            Err(invalid(field, format!("must not be negative, got {}", v)))
        }
        other => Ok(other),
    }
}

fn invalid(field: &str, message: String) -> EngineError {
    EngineError::InvalidEmployee {
        field: field.to_string(),
        message,
    }
}
