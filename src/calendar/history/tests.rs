//! Unit tests for undo/redo history.

use super::*;
use crate::calendar::DayId;
use crate::shifts::{MemoryShiftStore, ShiftBatch, ShiftMap, ShiftStore, ShiftType};

fn day(s: &str) -> DayId {
    s.parse().unwrap()
}

fn command(label: &'static str) -> BatchCommand {
    BatchCommand {
        label,
        forward: ShiftBatch::new(),
        inverse: ShiftBatch::new(),
    }
}

struct FailingStore(ShiftMap);

impl ShiftStore for FailingStore {
    fn read(&self) -> &ShiftMap {
        &self.0
    }

    fn apply_batch(&mut self, _batch: &ShiftBatch) -> Result<(), String> {
        Err("disk full".to_string())
    }
}

#[test]
fn test_command_history_default() {
    let history = CommandHistory::default();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.undo_count(), 0);
}

#[test]
fn test_push_clears_redo_stack() {
    let mut history = CommandHistory::default();
    history.push(command("a"));
    let undone = history.pop_undo().unwrap();
    history.push_redo(undone);
    assert!(history.can_redo());

    history.push(command("b"));
    assert!(!history.can_redo());
    assert_eq!(history.next_undo_label(), Some("b"));
}

#[test]
fn test_history_is_capped() {
    let mut history = CommandHistory::default();
    for _ in 0..MAX_HISTORY_SIZE + 10 {
        history.push(command("edit"));
    }
    assert_eq!(history.undo_count(), MAX_HISTORY_SIZE);
}

#[test]
fn test_recording_store_records_inverse() {
    let mut store = MemoryShiftStore::new([(day("2024-01-01"), ShiftType::Day)].into_iter().collect());
    let mut history = CommandHistory::default();

    let mut batch = ShiftBatch::new();
    batch.set(day("2024-01-01"), ShiftType::Night);
    batch.set(day("2024-01-02"), ShiftType::Evening);
    RecordingStore::new(&mut store, &mut history, "Paste")
        .apply_batch(&batch)
        .unwrap();

    let recorded = history.pop_undo().unwrap();
    assert_eq!(recorded.label, "Paste");
    assert_eq!(recorded.forward, batch);

    store.apply_batch(&recorded.inverse).unwrap();
    assert_eq!(store.read().get(day("2024-01-01")), ShiftType::Day);
    assert_eq!(store.read().get(day("2024-01-02")), ShiftType::Off);
}

#[test]
fn test_recording_store_skips_no_op_writes() {
    let mut store = MemoryShiftStore::new([(day("2024-01-01"), ShiftType::Day)].into_iter().collect());
    let mut history = CommandHistory::default();

    let mut batch = ShiftBatch::new();
    batch.set(day("2024-01-01"), ShiftType::Day);
    RecordingStore::new(&mut store, &mut history, "Edit")
        .apply_batch(&batch)
        .unwrap();
    assert!(!history.can_undo());
}

#[test]
fn test_recording_store_ignores_failed_writes() {
    let mut store = FailingStore(ShiftMap::new());
    let mut history = CommandHistory::default();

    let mut batch = ShiftBatch::new();
    batch.set(day("2024-01-01"), ShiftType::Night);
    let result = RecordingStore::new(&mut store, &mut history, "Paste").apply_batch(&batch);
    assert_eq!(result, Err("disk full".to_string()));
    assert!(!history.can_undo());
}

#[test]
fn test_forget_shift_drops_commands_on_both_stacks() {
    let custom = ShiftType::from_key("CUSTOM_77");
    let mut writes_custom = ShiftBatch::new();
    writes_custom.set(day("2024-03-05"), custom.clone());
    let mut clears = ShiftBatch::new();
    clears.clear(day("2024-03-05"));

    let mut history = CommandHistory::default();
    history.push(command("Leave"));
    history.push(BatchCommand {
        label: "Edit day",
        forward: writes_custom.clone(),
        inverse: clears.clone(),
    });
    history.push_redo(BatchCommand {
        label: "Paste",
        forward: clears,
        inverse: writes_custom,
    });

    assert_eq!(history.forget_shift(&custom), 2);
    assert_eq!(history.undo_count(), 1);
    assert_eq!(history.next_undo_label(), Some("Leave"));
    assert!(!history.can_redo());
}
