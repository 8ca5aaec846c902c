//! Claim result models for the Statutory Entitlement Engine.
//!
//! This module contains the per-category claim types, the [`AggregatedClaim`]
//! returned by the aggregator, and the audit trace that records how every
//! figure was reached.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Rounds a value to 2 decimal places, half away from zero, with a fixed scale of 2.
///
/// # Example
///
/// ```
/// use entitlement_engine::models::round_2dp;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_2dp(Decimal::from_str("2.345").unwrap()).to_string(), "2.35");
/// assert_eq!(round_2dp(Decimal::from(1400)).to_string(), "1400.00");
/// ```
pub fn round_2dp(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// The preferential/unsecured split of a single claim category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimAmounts {
    /// Portion ranked as a preferential claim.
    pub preferential: Decimal,
    /// Portion ranked as an ordinary unsecured claim.
    pub unsecured: Decimal,
    /// Whole category amount (`preferential + unsecured`).
    pub total: Decimal,
}

impl ClaimAmounts {
    /// A claim that is preferential in full.
    pub fn preferential(total: Decimal) -> Self {
        let total = total.max(Decimal::ZERO);
        Self {
            preferential: total,
            unsecured: Decimal::ZERO,
            total,
        }
    }

    /// A claim that is unsecured in full.
    pub fn unsecured(total: Decimal) -> Self {
        let total = total.max(Decimal::ZERO);
        Self {
            preferential: Decimal::ZERO,
            unsecured: total,
            total,
        }
    }

    /// A claim that is preferential up to `ceiling` and unsecured above it.
    ///
    /// # Example
    ///
    /// ```
    /// use entitlement_engine::models::ClaimAmounts;
    /// use rust_decimal::Decimal;
    ///
    /// let split = ClaimAmounts::split_at_ceiling(Decimal::from(1000), Decimal::from(800));
    /// assert_eq!(split.preferential, Decimal::from(800));
    /// assert_eq!(split.unsecured, Decimal::from(200));
    /// ```
    pub fn split_at_ceiling(total: Decimal, ceiling: Decimal) -> Self {
        let total = total.max(Decimal::ZERO);
        Self {
            preferential: total.min(ceiling),
            unsecured: (total - ceiling).max(Decimal::ZERO),
            total,
        }
    }

    /// Returns a copy with every amount rounded to 2 decimal places.
    pub fn rounded(&self) -> Self {
        Self {
            preferential: round_2dp(self.preferential),
            unsecured: round_2dp(self.unsecured),
            total: round_2dp(self.total),
        }
    }
}

/// Arrears of ordinary pay between the last pay date and termination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageArrearsClaim {
    /// Preferential/unsecured split.
    #[serde(flatten)]
    pub amounts: ClaimAmounts,
    /// Whole days of unpaid wages.
    pub arrears_days: i64,
    /// Daily wage used for the calculation.
    pub daily_wage: Decimal,
}

/// Accrued but untaken holiday pay at termination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayPayClaim {
    /// Preferential/unsecured split.
    #[serde(flatten)]
    pub amounts: ClaimAmounts,
    /// Days from the start of the current holiday year to termination.
    pub days_elapsed: i64,
    /// Holiday days accrued but not taken.
    pub outstanding_days: Decimal,
    /// Daily rate of pay for a day of holiday.
    pub daily_rate: Decimal,
}

/// Pay in lieu of notice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticePayClaim {
    /// Preferential/unsecured split.
    #[serde(flatten)]
    pub amounts: ClaimAmounts,
    /// Weeks of notice owed.
    pub notice_weeks: Decimal,
    /// Weekly wage used for statutory notice.
    pub weekly_wage: Decimal,
}

/// Statutory redundancy pay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedundancyPayClaim {
    /// Preferential/unsecured split.
    #[serde(flatten)]
    pub amounts: ClaimAmounts,
    /// Weeks of pay owed under the age/service table.
    pub redundancy_weeks: Decimal,
    /// Weekly wage after applying the statutory cap.
    pub weekly_wage: Decimal,
    /// Statutory weekly cap in force at termination.
    pub weekly_cap: Decimal,
}

/// Unpaid employer pension contributions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionContributionClaim {
    /// Preferential/unsecured split.
    #[serde(flatten)]
    pub amounts: ClaimAmounts,
    /// Whole days since contributions were last paid.
    pub days_owed: i64,
    /// Wages earned over the unpaid period.
    pub wages_due_for_period: Decimal,
}

impl WageArrearsClaim {
    /// Returns a copy rounded for output.
    pub fn rounded(&self) -> Self {
        Self {
            amounts: self.amounts.rounded(),
            arrears_days: self.arrears_days,
            daily_wage: round_2dp(self.daily_wage),
        }
    }
}

impl HolidayPayClaim {
    /// Returns a copy rounded for output.
    pub fn rounded(&self) -> Self {
        Self {
            amounts: self.amounts.rounded(),
            days_elapsed: self.days_elapsed,
            outstanding_days: round_2dp(self.outstanding_days),
            daily_rate: round_2dp(self.daily_rate),
        }
    }
}

impl NoticePayClaim {
    /// Returns a copy rounded for output.
    pub fn rounded(&self) -> Self {
        Self {
            amounts: self.amounts.rounded(),
            notice_weeks: round_2dp(self.notice_weeks),
            weekly_wage: round_2dp(self.weekly_wage),
        }
    }
}

impl RedundancyPayClaim {
    /// Returns a copy rounded for output.
    pub fn rounded(&self) -> Self {
        Self {
            amounts: self.amounts.rounded(),
            redundancy_weeks: round_2dp(self.redundancy_weeks),
            weekly_wage: round_2dp(self.weekly_wage),
            weekly_cap: round_2dp(self.weekly_cap),
        }
    }
}

impl PensionContributionClaim {
    /// Returns a copy rounded for output.
    pub fn rounded(&self) -> Self {
        Self {
            amounts: self.amounts.rounded(),
            days_owed: self.days_owed,
            wages_due_for_period: round_2dp(self.wages_due_for_period),
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statutory provision behind this rule.
    pub statutory_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag figures that need a human to look at them, such as a category
/// that zeroed out because an input was missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium" or "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a claim calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns true if a warning with the given code was raised.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// The complete claim for one employee across all five categories.
///
/// All monetary fields are rounded to 2 decimal places. An all-zero claim is the
/// defined result for an incomplete record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedClaim {
    /// Arrears of pay.
    pub wage_arrears: WageArrearsClaim,
    /// Accrued holiday pay.
    pub holiday_pay: HolidayPayClaim,
    /// Pay in lieu of notice.
    pub notice_pay: NoticePayClaim,
    /// Statutory redundancy pay.
    pub redundancy_pay: RedundancyPayClaim,
    /// Unpaid employer pension contributions.
    pub pension_contributions: PensionContributionClaim,
    /// Sum of preferential amounts across all categories.
    pub total_preferential_claim: Decimal,
    /// Sum of unsecured amounts across all categories.
    pub total_unsecured_claim: Decimal,
    /// Record of how each figure was reached.
    pub audit_trace: AuditTrace,
}

impl AggregatedClaim {
    /// Returns the split of every category, in a fixed order: wage arrears,
    /// holiday pay, notice pay, redundancy pay, pension contributions.
    pub fn category_amounts(&self) -> [ClaimAmounts; 5] {
        [
            self.wage_arrears.amounts,
            self.holiday_pay.amounts,
            self.notice_pay.amounts,
            self.redundancy_pay.amounts,
            self.pension_contributions.amounts,
        ]
    }

    /// Grand total across both claim classes.
    pub fn grand_total(&self) -> Decimal {
        self.total_preferential_claim
            .saturating_add(self.total_unsecured_claim)
    }
}
