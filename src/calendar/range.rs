//! Inclusive day ranges normalized from an anchor and a cursor.

use super::day::DayId;

/// An inclusive span of consecutive days with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayRange {
    start: DayId,
    end: DayId,
}

impl DayRange {
    /// Order two possibly reversed endpoints into a range.
    ///
    /// Dragging from B back to A yields the same range as dragging from A to B.
    pub fn normalize(anchor: DayId, cursor: DayId) -> Self {
        if anchor <= cursor {
            Self {
                start: anchor,
                end: cursor,
            }
        } else {
            Self {
                start: cursor,
                end: anchor,
            }
        }
    }

    pub fn single(day: DayId) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> DayId {
        self.start
    }

    pub fn end(&self) -> DayId {
        self.end
    }

    /// Inclusive day count: `days_between(start, end) + 1`
    pub fn count(&self) -> usize {
        self.start.days_until(self.end) as usize + 1
    }

    pub fn contains(&self, day: DayId) -> bool {
        self.start <= day && day <= self.end
    }

    /// Every day of the range in calendar order
    pub fn days(&self) -> impl Iterator<Item = DayId> + use<> {
        let start = self.start;
        (0..self.count() as i64).map(move |offset| start.add_days(offset))
    }
}
