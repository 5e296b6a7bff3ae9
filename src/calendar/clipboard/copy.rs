//! Capturing a day range into the clipboard.

use super::types::ClipboardBuffer;
use crate::calendar::DayRange;
use crate::shifts::ShiftMap;

impl ClipboardBuffer {
    /// Snapshot the shift of every day in `range`, OFF where nothing is recorded.
    ///
    /// The result has exactly `range.count()` entries and entry `i` belongs to
    /// `range.start() + i` days. Reading never changes the map.
    pub fn capture(range: DayRange, shifts: &ShiftMap) -> Self {
        range.days().map(|day| shifts.get(day)).collect::<Vec<_>>().into()
    }
}
