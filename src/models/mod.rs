//! Core data models for the Statutory Entitlement Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod claim_result;
mod employee_facts;
mod statutory_limit;

pub use claim_result::{
    AggregatedClaim, AuditStep, AuditTrace, AuditWarning, ClaimAmounts, HolidayPayClaim,
    NoticePayClaim, PensionContributionClaim, RedundancyPayClaim, WageArrearsClaim, round_2dp,
};
pub use employee_facts::{
    ClaimType, DEFAULT_HOLIDAY_ENTITLEMENT_DAYS, DEFAULT_WORK_DAYS_PER_WEEK, EmployeeFacts, PayType,
};
pub use statutory_limit::StatutoryLimitEntry;
