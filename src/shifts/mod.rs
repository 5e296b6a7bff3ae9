//! Shift data: types, the day-to-shift map, the store that persists it, and
//! the collaborators around it (type registry, leave records, backups).
//!
//! ## Module Structure
//!
//! - [`shift_type`] - ShiftType tags (built-ins plus custom keys)
//! - [`shift_map`] - ShiftMap, ShiftBatch and ShiftUpdate
//! - [`store`] - ShiftStore trait, memory and file stores, ShiftBook resource
//! - [`registry`] - Label and color per shift type
//! - [`leave`] - Leave records
//! - [`backup`] - Full-data backup bundle
//!
//! Every change to shift data goes through [`ShiftStore::apply_batch`]; the
//! systems here translate UI requests into batches and persist the
//! registry and leave records alongside.

mod backup;
mod leave;
mod registry;
mod shift_map;
mod shift_type;
mod store;

pub use backup::BackupData;
pub use leave::{LeaveRecord, LeaveRecords};
pub use registry::{ColorTheme, ShiftConfig, ShiftRegistry};
pub use shift_map::{ShiftBatch, ShiftMap, ShiftUpdate};
pub use shift_type::ShiftType;
pub use store::{FileShiftStore, MemoryShiftStore, ShiftBook, ShiftStore};

use std::path::{Path, PathBuf};

use bevy::prelude::*;

use crate::calendar::history::{CommandHistory, RecordingStore};
use crate::calendar::selection::{ModeChanged, SelectionController};
use crate::calendar::DayId;
use crate::config::ConfigLoaded;
use crate::paths;

/// Resource holding the last failed write, shown in an error dialog
#[derive(Resource, Default)]
pub struct StoreWriteError {
    pub message: Option<String>,
}

/// Resource listing data files that could not be loaded at startup
#[derive(Resource, Default)]
pub struct DataLoadNotification {
    pub show: bool,
    pub reasons: Vec<String>,
}

/// Resource for the result message of a finished backup export or import
#[derive(Resource, Default)]
pub struct BackupNotice {
    pub message: Option<String>,
}

/// Message to set (or clear with OFF) the shift of one day
#[derive(Message)]
pub struct SetDayShiftRequest {
    pub day: DayId,
    pub shift: ShiftType,
}

/// Message to record a leave and write its type across its range
#[derive(Message)]
pub struct AddLeaveRequest {
    pub record: LeaveRecord,
}

/// Message to delete a leave record (shifts stay as they are)
#[derive(Message)]
pub struct DeleteLeaveRequest {
    pub id: String,
}

/// Message to register a new custom shift type
#[derive(Message)]
pub struct AddShiftTypeRequest {
    pub config: ShiftConfig,
}

/// Message to change a shift type's label or color
#[derive(Message)]
pub struct UpdateShiftTypeRequest {
    pub shift: ShiftType,
    pub config: ShiftConfig,
}

/// Message to restore a built-in type's default label and color
#[derive(Message)]
pub struct ResetShiftTypeRequest {
    pub shift: ShiftType,
}

/// Message to delete a custom type and clear every day using it
#[derive(Message)]
pub struct DeleteShiftTypeRequest {
    pub shift: ShiftType,
}

/// Message to write a backup file
#[derive(Message)]
pub struct ExportBackupRequest {
    pub path: PathBuf,
}

/// Message to restore everything from a backup file
#[derive(Message)]
pub struct ImportBackupRequest {
    pub path: PathBuf,
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Keep a copy of an unreadable data file before it gets overwritten
fn preserve_unreadable_file(path: &Path) {
    let backup = path.with_extension("json.corrupt");
    match std::fs::copy(path, &backup) {
        Ok(_) => warn!("Copied unreadable data file to {:?}", backup),
        Err(e) => warn!("Could not preserve unreadable data file {:?}: {}", path, e),
    }
}

fn report_write_error(write_error: &mut StoreWriteError, message: String) {
    error!("{}", message);
    write_error.message = Some(message);
}

fn save_registry(registry: &ShiftRegistry, write_error: &mut StoreWriteError) {
    if let Err(e) = registry.save(&paths::shift_types_file()) {
        report_write_error(write_error, e);
    }
}

fn save_leaves(leaves: &LeaveRecords, write_error: &mut StoreWriteError) {
    if let Err(e) = leaves.save(&paths::leaves_file()) {
        report_write_error(write_error, e);
    }
}

/// Startup system to open the shift store and load the registry and leaves
fn load_shift_data(
    mut book: ResMut<ShiftBook>,
    mut registry: ResMut<ShiftRegistry>,
    mut leaves: ResMut<LeaveRecords>,
    mut notification: ResMut<DataLoadNotification>,
) {
    let shifts_path = paths::shifts_file();
    match FileShiftStore::open(&shifts_path) {
        Ok(store) => {
            info!("Loaded {} shift(s) from {:?}", store.read().len(), store.path());
            book.replace(store);
        }
        Err(e) => {
            warn!("{}", e);
            preserve_unreadable_file(&shifts_path);
            notification.reasons.push(e);
            book.replace(FileShiftStore::empty_at(&shifts_path));
        }
    }

    let types_path = paths::shift_types_file();
    if types_path.exists() {
        match ShiftRegistry::load(&types_path) {
            Ok(loaded) => *registry = loaded,
            Err(e) => {
                warn!("{}", e);
                preserve_unreadable_file(&types_path);
                notification.reasons.push(e);
            }
        }
    }

    let leaves_path = paths::leaves_file();
    if leaves_path.exists() {
        match LeaveRecords::load(&leaves_path) {
            Ok(loaded) => {
                info!("Loaded {} leave record(s)", loaded.len());
                *leaves = loaded;
            }
            Err(e) => {
                warn!("{}", e);
                preserve_unreadable_file(&leaves_path);
                notification.reasons.push(e);
            }
        }
    }

    notification.show = !notification.reasons.is_empty();
}

/// System to apply single-day edits from the day picker
fn handle_set_day_shift(
    mut events: MessageReader<SetDayShiftRequest>,
    mut book: ResMut<ShiftBook>,
    mut history: ResMut<CommandHistory>,
    mut write_error: ResMut<StoreWriteError>,
) {
    for event in events.read() {
        let mut batch = ShiftBatch::new();
        batch.set(event.day, event.shift.clone());
        let mut store = RecordingStore::new(&mut *book, &mut history, "Edit day");
        match store.apply_batch(&batch) {
            Ok(()) => info!("Set {} to {}", event.day, event.shift),
            Err(e) => report_write_error(&mut write_error, e),
        }
    }
}

/// System to record leaves and write them into the calendar
fn handle_add_leave(
    mut events: MessageReader<AddLeaveRequest>,
    mut book: ResMut<ShiftBook>,
    mut history: ResMut<CommandHistory>,
    mut leaves: ResMut<LeaveRecords>,
    mut write_error: ResMut<StoreWriteError>,
) {
    for event in events.read() {
        let mut store = RecordingStore::new(&mut *book, &mut history, "Leave");
        if let Err(e) = store.apply_batch(&event.record.batch()) {
            report_write_error(&mut write_error, e);
            continue;
        }
        info!(
            "Recorded {} leave {} ({} day(s))",
            event.record.shift_type,
            event.record.range_label(),
            event.record.duration
        );
        leaves.add(event.record.clone());
        save_leaves(&leaves, &mut write_error);
    }
}

/// System to delete leave records
fn handle_delete_leave(
    mut events: MessageReader<DeleteLeaveRequest>,
    mut leaves: ResMut<LeaveRecords>,
    mut write_error: ResMut<StoreWriteError>,
) {
    for event in events.read() {
        if leaves.remove(&event.id).is_some() {
            info!("Deleted leave record {}", event.id);
            save_leaves(&leaves, &mut write_error);
        }
    }
}

/// System to register custom shift types
fn handle_add_shift_type(
    mut events: MessageReader<AddShiftTypeRequest>,
    mut registry: ResMut<ShiftRegistry>,
    mut write_error: ResMut<StoreWriteError>,
) {
    for event in events.read() {
        let shift = registry.add_custom(event.config.clone(), now_millis());
        info!("Added shift type {} ({})", shift, event.config.label);
        save_registry(&registry, &mut write_error);
    }
}

/// System to edit shift type labels and colors
fn handle_update_shift_type(
    mut events: MessageReader<UpdateShiftTypeRequest>,
    mut registry: ResMut<ShiftRegistry>,
    mut write_error: ResMut<StoreWriteError>,
) {
    for event in events.read() {
        registry.update(event.shift.clone(), event.config.clone());
        save_registry(&registry, &mut write_error);
    }
}

/// System to reset built-in shift types to their defaults
fn handle_reset_shift_type(
    mut events: MessageReader<ResetShiftTypeRequest>,
    mut registry: ResMut<ShiftRegistry>,
    mut write_error: ResMut<StoreWriteError>,
) {
    for event in events.read() {
        if registry.reset(&event.shift) {
            save_registry(&registry, &mut write_error);
        }
    }
}

/// Remove a custom type everywhere it could come back from: the days holding
/// it, the undo/redo stacks and a clipboard captured before the deletion.
/// Returns the number of days cleared.
fn purge_shift_type(
    shift: &ShiftType,
    registry: &mut ShiftRegistry,
    store: &mut dyn ShiftStore,
    history: &mut CommandHistory,
    controller: &mut SelectionController,
) -> Result<usize, String> {
    let batch = registry.removal_batch(shift, store.read())?;
    store.apply_batch(&batch)?;
    registry.remove(shift);

    let forgotten = history.forget_shift(shift);
    if forgotten > 0 {
        debug!("Dropped {} history entries writing {}", forgotten, shift);
    }
    if controller.forget_shift(shift) {
        debug!("Cancelled selection holding {}", shift);
    }
    Ok(batch.len())
}

/// System to delete custom shift types, clearing the days that used them first
#[allow(clippy::too_many_arguments)]
fn handle_delete_shift_type(
    mut events: MessageReader<DeleteShiftTypeRequest>,
    mut registry: ResMut<ShiftRegistry>,
    mut book: ResMut<ShiftBook>,
    mut history: ResMut<CommandHistory>,
    mut controller: ResMut<SelectionController>,
    mut mode_changed: MessageWriter<ModeChanged>,
    mut write_error: ResMut<StoreWriteError>,
) {
    for event in events.read() {
        let from = controller.mode();
        match purge_shift_type(
            &event.shift,
            &mut registry,
            &mut *book,
            &mut history,
            &mut controller,
        ) {
            Ok(cleared) => {
                info!("Deleted shift type {} and cleared {} day(s)", event.shift, cleared);
                save_registry(&registry, &mut write_error);
            }
            Err(e) => report_write_error(&mut write_error, e),
        }
        let to = controller.mode();
        if from != to {
            mode_changed.write(ModeChanged { from, to });
        }
    }
}

/// System to export a backup file
fn handle_export_backup(
    mut events: MessageReader<ExportBackupRequest>,
    book: Res<ShiftBook>,
    registry: Res<ShiftRegistry>,
    leaves: Res<LeaveRecords>,
    mut notice: ResMut<BackupNotice>,
    mut write_error: ResMut<StoreWriteError>,
) {
    for event in events.read() {
        let data = BackupData::new(
            book.read().clone(),
            registry.clone(),
            leaves.clone(),
            now_millis(),
        );
        match data.write(&event.path) {
            Ok(()) => {
                info!("Exported backup to {:?}", event.path);
                notice.message = Some(format!(
                    "Exported {} shift(s) and {} leave record(s).",
                    data.shifts.len(),
                    data.leaves.len()
                ));
            }
            Err(e) => report_write_error(&mut write_error, e),
        }
    }
}

/// System to restore shifts, types and leaves from a backup file
#[allow(clippy::too_many_arguments)]
fn handle_import_backup(
    mut events: MessageReader<ImportBackupRequest>,
    mut book: ResMut<ShiftBook>,
    mut registry: ResMut<ShiftRegistry>,
    mut leaves: ResMut<LeaveRecords>,
    mut history: ResMut<CommandHistory>,
    mut notice: ResMut<BackupNotice>,
    mut write_error: ResMut<StoreWriteError>,
) {
    for event in events.read() {
        let data = match BackupData::read(&event.path) {
            Ok(data) => data,
            Err(e) => {
                report_write_error(&mut write_error, e);
                continue;
            }
        };

        let batch = book.read().diff_to(&data.shifts);
        if let Err(e) = book.apply_batch(&batch) {
            report_write_error(&mut write_error, e);
            continue;
        }

        registry.restore(data.configs);
        *leaves = data.leaves;
        history.clear();
        save_registry(&registry, &mut write_error);
        save_leaves(&leaves, &mut write_error);

        info!("Restored backup from {:?}", event.path);
        notice.message = Some(format!(
            "Restored {} shift(s) and {} leave record(s).",
            data.shifts.len(),
            leaves.len()
        ));
    }
}

pub struct ShiftsPlugin;

impl Plugin for ShiftsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ShiftBook>()
            .init_resource::<ShiftRegistry>()
            .init_resource::<LeaveRecords>()
            .init_resource::<StoreWriteError>()
            .init_resource::<DataLoadNotification>()
            .init_resource::<BackupNotice>()
            .add_message::<SetDayShiftRequest>()
            .add_message::<AddLeaveRequest>()
            .add_message::<DeleteLeaveRequest>()
            .add_message::<AddShiftTypeRequest>()
            .add_message::<UpdateShiftTypeRequest>()
            .add_message::<ResetShiftTypeRequest>()
            .add_message::<DeleteShiftTypeRequest>()
            .add_message::<ExportBackupRequest>()
            .add_message::<ImportBackupRequest>()
            .add_systems(Startup, load_shift_data.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    handle_set_day_shift.run_if(on_message::<SetDayShiftRequest>),
                    handle_add_leave.run_if(on_message::<AddLeaveRequest>),
                    handle_delete_leave.run_if(on_message::<DeleteLeaveRequest>),
                    handle_add_shift_type.run_if(on_message::<AddShiftTypeRequest>),
                    handle_update_shift_type.run_if(on_message::<UpdateShiftTypeRequest>),
                    handle_reset_shift_type.run_if(on_message::<ResetShiftTypeRequest>),
                    handle_delete_shift_type.run_if(on_message::<DeleteShiftTypeRequest>),
                    handle_export_backup.run_if(on_message::<ExportBackupRequest>),
                    handle_import_backup.run_if(on_message::<ImportBackupRequest>),
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::selection::Mode;

    fn day(s: &str) -> DayId {
        s.parse().unwrap()
    }

    fn registry_with_custom() -> (ShiftRegistry, ShiftType) {
        let mut registry = ShiftRegistry::default();
        let custom = registry.add_custom(ShiftConfig::new("Course", ColorTheme::Teal), 77);
        (registry, custom)
    }

    fn set_recorded(
        store: &mut MemoryShiftStore,
        history: &mut CommandHistory,
        target: DayId,
        shift: ShiftType,
    ) {
        let mut batch = ShiftBatch::new();
        batch.set(target, shift);
        RecordingStore::new(store, history, "Edit day")
            .apply_batch(&batch)
            .unwrap();
    }

    #[test]
    fn test_purge_clears_days_and_registry() {
        let (mut registry, custom) = registry_with_custom();
        let mut store = MemoryShiftStore::new(
            [(day("2024-03-05"), custom.clone()), (day("2024-03-06"), ShiftType::Day)]
                .into_iter()
                .collect(),
        );
        let mut history = CommandHistory::default();
        let mut controller = SelectionController::default();

        let cleared =
            purge_shift_type(&custom, &mut registry, &mut store, &mut history, &mut controller)
                .unwrap();

        assert_eq!(cleared, 1);
        assert!(registry.get(&custom).is_none());
        assert_eq!(store.read().get(day("2024-03-05")), ShiftType::Off);
        assert_eq!(store.read().get(day("2024-03-06")), ShiftType::Day);
    }

    #[test]
    fn test_redo_cannot_restore_deleted_type() {
        let (mut registry, custom) = registry_with_custom();
        let mut store = MemoryShiftStore::default();
        let mut history = CommandHistory::default();
        let mut controller = SelectionController::default();

        set_recorded(&mut store, &mut history, day("2024-03-05"), ShiftType::Day);
        set_recorded(&mut store, &mut history, day("2024-03-05"), custom.clone());
        set_recorded(&mut store, &mut history, day("2024-03-07"), ShiftType::Night);
        assert_eq!(history.undo_count(), 3);

        purge_shift_type(&custom, &mut registry, &mut store, &mut history, &mut controller)
            .unwrap();

        // Both commands that could write the custom type back are gone
        assert_eq!(history.undo_count(), 2);
        while let Some(command) = history.pop_undo() {
            assert!(!command.mentions(&custom));
            store.apply_batch(&command.inverse).unwrap();
            history.push_redo(command);
        }
        while let Some(command) = history.pop_redo() {
            assert!(!command.mentions(&custom));
            store.apply_batch(&command.forward).unwrap();
        }
        assert!(store.read().days_with(&custom).is_empty());
    }

    #[test]
    fn test_purge_cancels_clipboard_holding_deleted_type() {
        let (mut registry, custom) = registry_with_custom();
        let shifts: ShiftMap = [(day("2024-03-05"), custom.clone())].into_iter().collect();
        let mut store = MemoryShiftStore::new(shifts.clone());
        let mut history = CommandHistory::default();
        let mut controller = SelectionController::default();

        controller.start_copy();
        controller.pointer_down(day("2024-03-05"));
        controller.pointer_move(Some(day("2024-03-06")));
        controller.release();
        controller.confirm_copy(&shifts);
        controller.tap(day("2024-03-10"));
        assert_eq!(controller.mode(), Mode::PasteTarget);

        purge_shift_type(&custom, &mut registry, &mut store, &mut history, &mut controller)
            .unwrap();

        assert_eq!(controller.mode(), Mode::View);
        assert!(controller.clipboard().is_empty());
    }

    #[test]
    fn test_purge_keeps_unrelated_clipboard() {
        let (mut registry, custom) = registry_with_custom();
        let shifts: ShiftMap = [(day("2024-03-05"), ShiftType::Night)].into_iter().collect();
        let mut store = MemoryShiftStore::new(shifts.clone());
        let mut history = CommandHistory::default();
        let mut controller = SelectionController::default();

        controller.start_copy();
        controller.pointer_down(day("2024-03-05"));
        controller.release();
        controller.confirm_copy(&shifts);

        purge_shift_type(&custom, &mut registry, &mut store, &mut history, &mut controller)
            .unwrap();

        assert_eq!(controller.mode(), Mode::PasteTarget);
        assert!(controller.clipboard().contains(&ShiftType::Night));
        assert_eq!(controller.clipboard().len(), 1);
    }

    #[test]
    fn test_purge_rejects_built_in_type() {
        let mut registry = ShiftRegistry::default();
        let mut store = MemoryShiftStore::new(
            [(day("2024-03-05"), ShiftType::Day)].into_iter().collect(),
        );
        let mut history = CommandHistory::default();
        let mut controller = SelectionController::default();

        let result = purge_shift_type(
            &ShiftType::Day,
            &mut registry,
            &mut store,
            &mut history,
            &mut controller,
        );

        assert!(result.is_err());
        assert_eq!(store.read().get(day("2024-03-05")), ShiftType::Day);
        assert!(registry.get(&ShiftType::Day).is_some());
    }
}
