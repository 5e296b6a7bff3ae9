//! Mapping a clipboard onto a target day.

use super::types::ClipboardBuffer;
use crate::calendar::{DayId, DayRange};
use crate::shifts::ShiftBatch;

/// The batch placing `buffer[i]` on `target + i` days.
///
/// OFF entries become clears. Returns None for an empty buffer. Entries that
/// would land past the last representable date are dropped, never stacked on
/// the same day.
pub fn build_paste_batch(buffer: &ClipboardBuffer, target: DayId) -> Option<ShiftBatch> {
    if buffer.is_empty() {
        return None;
    }
    let mut batch = ShiftBatch::new();
    for (offset, shift) in buffer.iter().enumerate() {
        let Some(day) = target.checked_add_days(offset as i64) else {
            break;
        };
        batch.set(day, shift.clone());
    }
    Some(batch)
}

/// The days a paste at `target` would overwrite
pub fn paste_span(buffer: &ClipboardBuffer, target: DayId) -> Option<DayRange> {
    let last = buffer.len().checked_sub(1)?;
    let end = target
        .checked_add_days(last as i64)
        .unwrap_or(DayId::from(chrono::NaiveDate::MAX));
    Some(DayRange::normalize(target, end))
}
