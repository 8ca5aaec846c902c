//! Statutory weekly-cap lookup.
//!
//! The limit table is passed in explicitly so that calculations stay pure and
//! can be tested against synthetic tables.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::StatutoryLimitEntry;

/// Weekly cap used when the limit table is empty.
pub const FALLBACK_WEEKLY_CAP: Decimal = Decimal::from_parts(700, 0, 0, false, 0);

/// Returns the statutory weekly cap in force on `on_date`.
///
/// Entries may be supplied in any order. The rules are:
/// 1. the entry with the latest `effective_date` on or before `on_date` wins
/// 2. if `on_date` precedes every entry, the earliest entry is used
/// 3. if `on_date` is `None`, the most recent entry is used
/// 4. an empty table yields [`FALLBACK_WEEKLY_CAP`]
///
/// # Examples
///
/// ```
/// use entitlement_engine::calculation::lookup_weekly_cap;
/// use entitlement_engine::models::StatutoryLimitEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let table = vec![
///     StatutoryLimitEntry::new(NaiveDate::from_ymd_opt(2024, 4, 6).unwrap(), Decimal::from(700)),
///     StatutoryLimitEntry::new(NaiveDate::from_ymd_opt(2025, 4, 6).unwrap(), Decimal::from(750)),
/// ];
///
/// assert_eq!(lookup_weekly_cap(&table, NaiveDate::from_ymd_opt(2025, 4, 5)), Decimal::from(700));
/// assert_eq!(lookup_weekly_cap(&table, NaiveDate::from_ymd_opt(2025, 4, 6)), Decimal::from(750));
/// ```
pub fn lookup_weekly_cap(table: &[StatutoryLimitEntry], on_date: Option<NaiveDate>) -> Decimal {
    let mut descending: Vec<&StatutoryLimitEntry> = table.iter().collect();
    descending.sort_by(|a, b| b.effective_date.cmp(&a.effective_date));

    let Some(most_recent) = descending.first() else {
        return FALLBACK_WEEKLY_CAP;
    };

    let Some(on_date) = on_date else {
        return most_recent.weekly_cap;
    };

    descending
        .iter()
        .find(|entry| entry.effective_date <= on_date)
        .or(descending.last())
        .map(|entry| entry.weekly_cap)
        .unwrap_or(FALLBACK_WEEKLY_CAP)
}
