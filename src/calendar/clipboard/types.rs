//! Clipboard data types.

use crate::shifts::ShiftType;

/// Shift values captured from a range, one per day in calendar order.
///
/// OFF entries mean the source day had nothing recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardBuffer {
    shifts: Vec<ShiftType>,
}

impl ClipboardBuffer {
    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    pub fn contains(&self, shift: &ShiftType) -> bool {
        self.shifts.contains(shift)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShiftType> {
        self.shifts.iter()
    }
}

impl From<Vec<ShiftType>> for ClipboardBuffer {
    fn from(shifts: Vec<ShiftType>) -> Self {
        Self { shifts }
    }
}
