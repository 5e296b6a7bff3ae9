//! Unit tests for clipboard capture and paste mapping.

#![cfg(test)]

use crate::calendar::clipboard::{build_paste_batch, paste_span, ClipboardBuffer};
use crate::calendar::{DayId, DayRange};
use crate::shifts::{ShiftMap, ShiftType, ShiftUpdate};

fn day(s: &str) -> DayId {
    s.parse().unwrap()
}

fn stored() -> ShiftMap {
    [
        (day("2024-01-30"), ShiftType::Day),
        (day("2024-02-01"), ShiftType::Night),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_clipboard_default_is_empty() {
    let clipboard = ClipboardBuffer::default();
    assert!(clipboard.is_empty());
    assert_eq!(clipboard.len(), 0);
}

#[test]
fn test_capture_across_month_boundary() {
    let range = DayRange::normalize(day("2024-02-02"), day("2024-01-30"));
    let clipboard = ClipboardBuffer::capture(range, &stored());
    assert_eq!(
        clipboard,
        ClipboardBuffer::from(vec![ShiftType::Day, ShiftType::Off, ShiftType::Night, ShiftType::Off])
    );
}

#[test]
fn test_capture_length_matches_range_count() {
    let shifts = stored();
    for (a, b) in [
        ("2024-01-01", "2024-01-01"),
        ("2023-12-25", "2024-01-05"),
        ("2024-02-27", "2024-03-02"),
    ] {
        let range = DayRange::normalize(day(a), day(b));
        let clipboard = ClipboardBuffer::capture(range, &shifts);
        assert_eq!(clipboard.len(), range.count());
        assert_eq!(clipboard.len() as i64, range.start().days_until(range.end()) + 1);
    }
}

#[test]
fn test_capture_preserves_calendar_order() {
    let shifts = stored();
    let range = DayRange::normalize(day("2024-01-28"), day("2024-02-03"));
    let clipboard = ClipboardBuffer::capture(range, &shifts);
    for (i, shift) in clipboard.iter().enumerate() {
        assert_eq!(shift, &shifts.get(range.start().add_days(i as i64)));
    }
}

#[test]
fn test_capture_does_not_modify_map() {
    let shifts = stored();
    let _ = ClipboardBuffer::capture(DayRange::single(day("2024-01-30")), &shifts);
    assert_eq!(shifts, stored());
}

#[test]
fn test_paste_batch_matches_worked_scenario() {
    let clipboard = ClipboardBuffer::capture(
        DayRange::normalize(day("2024-02-02"), day("2024-01-30")),
        &stored(),
    );
    let batch = build_paste_batch(&clipboard, day("2024-03-05")).unwrap();

    assert_eq!(batch.len(), 4);
    assert_eq!(batch.get(day("2024-03-05")), Some(&ShiftUpdate::Set(ShiftType::Day)));
    assert_eq!(batch.get(day("2024-03-06")), Some(&ShiftUpdate::Clear));
    assert_eq!(batch.get(day("2024-03-07")), Some(&ShiftUpdate::Set(ShiftType::Night)));
    assert_eq!(batch.get(day("2024-03-08")), Some(&ShiftUpdate::Clear));
}

#[test]
fn test_paste_with_empty_clipboard_is_none() {
    assert!(build_paste_batch(&ClipboardBuffer::default(), day("2024-03-05")).is_none());
    assert!(paste_span(&ClipboardBuffer::default(), day("2024-03-05")).is_none());
}

#[test]
fn test_paste_back_onto_source_is_identity() {
    let shifts = stored();
    let range = DayRange::normalize(day("2024-01-29"), day("2024-02-03"));
    let clipboard = ClipboardBuffer::capture(range, &shifts);
    let batch = build_paste_batch(&clipboard, range.start()).unwrap();
    assert_eq!(shifts.with_batch(&batch), shifts);
}

#[test]
fn test_pasted_off_leaves_day_absent() {
    let clipboard = ClipboardBuffer::from(vec![ShiftType::Off, ShiftType::Evening]);
    let existing: ShiftMap = [(day("2024-06-01"), ShiftType::Night)].into_iter().collect();
    let batch = build_paste_batch(&clipboard, day("2024-06-01")).unwrap();
    let result = existing.with_batch(&batch);

    let expected: ShiftMap = [(day("2024-06-02"), ShiftType::Evening)].into_iter().collect();
    assert_eq!(result, expected);
    assert_eq!(result.len(), 1);
}

#[test]
fn test_paste_rolls_over_year_end() {
    let clipboard = ClipboardBuffer::from(vec![ShiftType::Day, ShiftType::Evening, ShiftType::Night]);
    let batch = build_paste_batch(&clipboard, day("2024-12-31")).unwrap();
    assert_eq!(batch.get(day("2025-01-02")), Some(&ShiftUpdate::Set(ShiftType::Night)));
    assert_eq!(
        paste_span(&clipboard, day("2024-12-31")),
        Some(DayRange::normalize(day("2024-12-31"), day("2025-01-02")))
    );
}

#[test]
fn test_paste_at_date_limit_drops_overflowing_entries() {
    let last = DayId::from(chrono::NaiveDate::MAX);
    let clipboard = ClipboardBuffer::from(vec![ShiftType::Day, ShiftType::Evening, ShiftType::Night]);
    let batch = build_paste_batch(&clipboard, last).unwrap();

    assert_eq!(batch.len(), 1);
    assert_eq!(batch.get(last), Some(&ShiftUpdate::Set(ShiftType::Day)));
    assert_eq!(paste_span(&clipboard, last), Some(DayRange::single(last)));
}
