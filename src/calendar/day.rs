//! Day identifiers: timezone-naive calendar dates.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Canonical text form of a day identifier
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// A calendar date with no time-of-day, serialized as `YYYY-MM-DD`.
///
/// Ordering is calendar order. All arithmetic moves in whole days, so month
/// and year rollover never depend on month length or daylight-saving offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayId(NaiveDate);

impl DayId {
    /// Build a day from year/month/day, or None for an invalid date
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today's date according to the local wall clock, time-of-day dropped
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Shift by a signed number of whole days, or None past chrono's date range
    pub fn checked_add_days(self, days: i64) -> Option<Self> {
        let magnitude = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            self.0.checked_add_days(magnitude)
        } else {
            self.0.checked_sub_days(magnitude)
        };
        shifted.map(Self)
    }

    /// Shift by a signed number of whole days.
    ///
    /// Returns `self` unchanged past chrono's date range (around year 262143);
    /// callers that must not collapse days use [`DayId::checked_add_days`].
    pub fn add_days(self, days: i64) -> Self {
        self.checked_add_days(days).unwrap_or(self)
    }

    /// The day after this one
    pub fn succ(self) -> Self {
        self.add_days(1)
    }

    /// Signed number of whole days from `self` to `other` (positive if `other` is later)
    pub fn days_until(self, other: DayId) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }
}

impl From<NaiveDate> for DayId {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for DayId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DAY_FORMAT)
            .map(Self)
            .map_err(|e| format!("Invalid day '{}': {}", s, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayId {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        let d = day("2024-02-29");
        assert_eq!(d.to_string(), "2024-02-29");
        assert_eq!((d.year(), d.month(), d.day()), (2024, 2, 29));
    }

    #[test]
    fn test_parse_rejects_invalid_dates() {
        assert!("2023-02-29".parse::<DayId>().is_err());
        assert!("2024-13-01".parse::<DayId>().is_err());
        assert!("not a day".parse::<DayId>().is_err());
    }

    #[test]
    fn test_add_days_crosses_month_and_year() {
        assert_eq!(day("2024-01-30").add_days(3), day("2024-02-02"));
        assert_eq!(day("2023-12-31").succ(), day("2024-01-01"));
        assert_eq!(day("2024-03-01").add_days(-1), day("2024-02-29"));
    }

    #[test]
    fn test_checked_add_days_stops_at_date_limit() {
        let last = DayId::from(NaiveDate::MAX);
        assert_eq!(last.checked_add_days(1), None);
        assert_eq!(last.add_days(1), last);
        assert_eq!(last.checked_add_days(-1), Some(DayId::from(NaiveDate::MAX.pred_opt().unwrap())));
    }

    #[test]
    fn test_days_until_is_signed() {
        assert_eq!(day("2024-01-30").days_until(day("2024-02-02")), 3);
        assert_eq!(day("2024-02-02").days_until(day("2024-01-30")), -3);
        assert_eq!(day("2024-05-05").days_until(day("2024-05-05")), 0);
    }

    #[test]
    fn test_ordering_is_calendar_order() {
        assert!(day("2023-12-31") < day("2024-01-01"));
        assert!(day("2024-02-10") > day("2024-02-09"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&day("2024-03-05")).unwrap();
        assert_eq!(json, "\"2024-03-05\"");
        let parsed: DayId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, day("2024-03-05"));
    }
}
