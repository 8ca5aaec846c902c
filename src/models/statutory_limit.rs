//! Statutory limit reference data.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A statutory weekly-pay cap and the date from which it applies.
///
/// Entries are read-only reference data. At most one entry is in force on any
/// date: the one with the latest `effective_date` on or before that date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryLimitEntry {
    /// First date on which this cap applies.
    pub effective_date: NaiveDate,
    /// Maximum weekly pay used for redundancy entitlements.
    pub weekly_cap: Decimal,
}

impl StatutoryLimitEntry {
    /// Creates a new entry.
    pub fn new(effective_date: NaiveDate, weekly_cap: Decimal) -> Self {
        Self {
            effective_date,
            weekly_cap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_entry() {
        let json = r#"{"effective_date": "2024-04-06", "weekly_cap": "700.00"}"#;
        let entry: StatutoryLimitEntry = serde_json::from_str(json).unwrap();
        assert_eq!(
            entry.effective_date,
            NaiveDate::from_ymd_opt(2024, 4, 6).unwrap()
        );
        assert_eq!(entry.weekly_cap, Decimal::new(70000, 2));
    }

    #[test]
    fn test_deserialize_entry_with_numeric_cap() {
        let json = r#"{"effective_date": "2025-04-06", "weekly_cap": 719}"#;
        let entry: StatutoryLimitEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.weekly_cap, Decimal::from(719));
    }
}
