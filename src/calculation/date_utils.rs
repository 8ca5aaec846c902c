//! Calendar date parsing and interval arithmetic.
//!
//! Dates are handled as [`NaiveDate`] values, which behave as UTC midnight
//! instants: no timezone is ever attached, so intervals cannot drift by an hour
//! around daylight-saving changes.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Average days per year used for service and age calculations.
pub const DAYS_PER_YEAR: Decimal = Decimal::from_parts(36525, 0, 0, false, 2);

/// Parses a `YYYY-MM-DD` string into a calendar date.
///
/// A trailing time-of-day component (`2024-01-15T09:30:00Z` or
/// `2024-01-15 09:30`) is ignored. Any other shape, or a date that does not
/// exist, yields `None`.
///
/// # Examples
///
/// ```
/// use entitlement_engine::calculation::parse_calendar_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_calendar_date("2024-01-15T09:30:00Z"),
///     NaiveDate::from_ymd_opt(2024, 1, 15)
/// );
/// assert_eq!(parse_calendar_date("15/01/2024"), None);
/// assert_eq!(parse_calendar_date("2023-02-29"), None);
/// ```
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let bytes = s.as_bytes();
    if bytes.len() < 10 {
        return None;
    }

    let shaped = bytes[..10].iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shaped {
        return None;
    }

    // Only a time-of-day may follow the date.
    if let Some(&next) = bytes.get(10) {
        if next != b'T' && next != b't' && next != b' ' {
            return None;
        }
    }

    NaiveDate::parse_from_str(&s[..10], "%Y-%m-%d").ok()
}

/// Whole calendar days from `from` to `to`.
///
/// Negative when `to` is before `from`; callers check ordering first.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Years from `from` to `to`, as days divided by 365.25.
///
/// This is the standard statutory approximation and deliberately ignores
/// exact leap-year placement.
pub fn years_between(from: NaiveDate, to: NaiveDate) -> Decimal {
    Decimal::from(days_between(from, to)) / DAYS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_calendar_date("2024-01-15"), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_parse_ignores_time_of_day() {
        assert_eq!(
            parse_calendar_date("2024-01-15T23:59:59.999Z"),
            Some(date(2024, 1, 15))
        );
        assert_eq!(
            parse_calendar_date("2024-01-15T00:30:00+05:00"),
            Some(date(2024, 1, 15))
        );
        assert_eq!(
            parse_calendar_date("2024-01-15 10:30"),
            Some(date(2024, 1, 15))
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_calendar_date("  2024-03-01 "), Some(date(2024, 3, 1)));
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("15/01/2024"), None);
        assert_eq!(parse_calendar_date("2024-1-5"), None);
        assert_eq!(parse_calendar_date("20240115"), None);
        assert_eq!(parse_calendar_date("2024-01-15junk"), None);
        assert_eq!(parse_calendar_date("not a date"), None);
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert_eq!(parse_calendar_date("2024-02-30"), None);
        assert_eq!(parse_calendar_date("2023-02-29"), None);
        assert_eq!(parse_calendar_date("2024-13-01"), None);
        assert_eq!(parse_calendar_date("2024-02-29"), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 1, 15)), 14);
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 1, 1)), 0);
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
        assert_eq!(days_between(date(2024, 1, 15), date(2024, 1, 1)), -14);
    }

    #[test]
    fn test_days_between_across_dst_change() {
        // UK clocks go forward on 2024-03-31; the interval is still whole days.
        assert_eq!(days_between(date(2024, 3, 30), date(2024, 4, 1)), 2);
    }

    #[test]
    fn test_years_between_uses_365_25() {
        assert_eq!(
            years_between(date(2023, 1, 1), date(2025, 1, 1)),
            Decimal::from(731) / Decimal::from_str("365.25").unwrap()
        );
        assert!(years_between(date(2023, 1, 1), date(2025, 1, 1)) > Decimal::TWO);
        // Two calendar years without a leap day fall just short of 2.
        assert!(years_between(date(2022, 1, 1), date(2024, 1, 1)) < Decimal::TWO);
    }

    #[test]
    fn test_years_between_four_years_is_exact() {
        assert_eq!(
            years_between(date(2020, 1, 1), date(2024, 1, 1)),
            Decimal::from(4)
        );
    }
}
