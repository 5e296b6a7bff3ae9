//! Month grid producer and the currently displayed month.

use bevy::prelude::*;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::day::DayId;
use crate::constants::DAYS_PER_WEEK;

/// First column of the calendar grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn label(self) -> &'static str {
        match self {
            WeekStart::Sunday => "Sunday",
            WeekStart::Monday => "Monday",
        }
    }

    /// Column index (0-based) of a weekday in a grid starting on this day
    pub fn column_of(self, weekday: Weekday) -> u32 {
        match self {
            WeekStart::Sunday => weekday.num_days_from_sunday(),
            WeekStart::Monday => weekday.num_days_from_monday(),
        }
    }

    /// Weekday header labels in column order
    pub fn weekday_labels(self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }
}

/// Number of days in a month, or None for an invalid year/month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    u32::try_from(next_first.signed_duration_since(first).num_days()).ok()
}

/// The ordered cells of one month's grid.
///
/// Yields `None` for each leading blank needed to align the 1st under its
/// weekday column, then `Some(day)` for every day of the month. The sequence
/// is finite and a pure function of (year, month, week start); build a new one
/// or clone an unstarted one to iterate again.
#[derive(Debug, Clone)]
pub struct MonthDays {
    first: Option<NaiveDate>,
    leading: u32,
    len: u32,
    pos: u32,
}

impl MonthDays {
    pub fn new(year: i32, month: u32, week_start: WeekStart) -> Self {
        let first = NaiveDate::from_ymd_opt(year, month, 1);
        let leading = first
            .map(|d| week_start.column_of(d.weekday()))
            .unwrap_or(0);
        let len = days_in_month(year, month).unwrap_or(0);
        Self {
            first,
            leading,
            len,
            pos: 0,
        }
    }

    /// Leading blank cells before the 1st
    pub fn leading_blanks(&self) -> u32 {
        self.leading
    }

    /// Number of real days in the month
    pub fn day_count(&self) -> u32 {
        self.len
    }

    /// Grid rows needed to show the month
    pub fn weeks(&self) -> u32 {
        (self.leading + self.len).div_ceil(DAYS_PER_WEEK)
    }
}

impl Iterator for MonthDays {
    type Item = Option<DayId>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.first?;
        if self.pos >= self.leading + self.len {
            return None;
        }
        let pos = self.pos;
        self.pos += 1;
        if pos < self.leading {
            return Some(None);
        }
        let offset = i64::from(pos - self.leading);
        Some(Some(DayId::from(first).add_days(offset)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.first.is_some() {
            (self.leading + self.len).saturating_sub(self.pos) as usize
        } else {
            0
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MonthDays {}

/// The month currently shown in the calendar grid
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleMonth {
    pub year: i32,
    pub month: u32,
}

impl Default for VisibleMonth {
    fn default() -> Self {
        Self::containing(DayId::today())
    }
}

impl VisibleMonth {
    pub fn containing(day: DayId) -> Self {
        Self {
            year: day.year(),
            month: day.month(),
        }
    }

    pub fn next(&mut self) {
        if self.month == 12 {
            self.year += 1;
            self.month = 1;
        } else {
            self.month += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.month == 1 {
            self.year -= 1;
            self.month = 12;
        } else {
            self.month -= 1;
        }
    }

    pub fn jump_to(&mut self, day: DayId) {
        *self = Self::containing(day);
    }

    pub fn days(&self, week_start: WeekStart) -> MonthDays {
        MonthDays::new(self.year, self.month, week_start)
    }

    /// Header title such as "March 2024"
    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn test_month_days_sunday_start_leading_blanks() {
        // 2024-03-01 is a Friday
        let cells: Vec<_> = MonthDays::new(2024, 3, WeekStart::Sunday).collect();
        assert_eq!(cells.len(), 5 + 31);
        assert!(cells[..5].iter().all(Option::is_none));
        assert_eq!(cells[5], DayId::from_ymd(2024, 3, 1));
        assert_eq!(cells.last().copied().flatten(), DayId::from_ymd(2024, 3, 31));
    }

    #[test]
    fn test_month_days_monday_start_leading_blanks() {
        let days = MonthDays::new(2024, 3, WeekStart::Monday);
        assert_eq!(days.leading_blanks(), 4);
        // 2024-04-01 is a Monday
        assert_eq!(MonthDays::new(2024, 4, WeekStart::Monday).leading_blanks(), 0);
    }

    #[test]
    fn test_month_days_is_restartable() {
        let fresh = MonthDays::new(2024, 2, WeekStart::Sunday);
        let first_pass: Vec<_> = fresh.clone().collect();
        let second_pass: Vec<_> = fresh.collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(
            first_pass,
            MonthDays::new(2024, 2, WeekStart::Sunday).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_month_days_exact_size() {
        let mut days = MonthDays::new(2024, 2, WeekStart::Sunday);
        assert_eq!(days.len(), 4 + 29);
        days.next();
        assert_eq!(days.len(), 4 + 28);
    }

    #[test]
    fn test_weeks_in_month() {
        // Feb 2015 starts on Sunday and has 28 days
        assert_eq!(MonthDays::new(2015, 2, WeekStart::Sunday).weeks(), 4);
        assert_eq!(MonthDays::new(2024, 3, WeekStart::Sunday).weeks(), 6);
    }

    #[test]
    fn test_invalid_month_yields_nothing() {
        assert_eq!(MonthDays::new(2024, 0, WeekStart::Sunday).count(), 0);
    }

    #[test]
    fn test_visible_month_navigation_rolls_years() {
        let mut month = VisibleMonth { year: 2024, month: 12 };
        month.next();
        assert_eq!(month, VisibleMonth { year: 2025, month: 1 });
        month.previous();
        month.previous();
        assert_eq!(month, VisibleMonth { year: 2024, month: 11 });
    }

    #[test]
    fn test_visible_month_title() {
        let month = VisibleMonth { year: 2024, month: 3 };
        assert_eq!(month.title(), "March 2024");
    }
}
