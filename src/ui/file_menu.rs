use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{egui, EguiContexts};
use futures_lite::future;
use std::path::PathBuf;

use crate::calendar::DayId;
use crate::config::{AppConfig, ConfigResetNotification, SetBackupDirectoryRequest};
use crate::paths;
use crate::shifts::{
    BackupData, BackupNotice, DataLoadNotification, ExportBackupRequest, ImportBackupRequest,
    StoreWriteError,
};

#[derive(Resource, Default)]
pub struct FileMenuState {
    /// Pending async save dialog for a backup export
    pub pending_export: Option<Task<Option<PathBuf>>>,
    /// Pending async open dialog for a backup import
    pub pending_import: Option<Task<Option<PathBuf>>>,
    /// Picked backup file waiting for the user to confirm the overwrite
    pub confirm_import: Option<PathBuf>,
}

impl FileMenuState {
    pub fn any_file_dialog_pending(&self) -> bool {
        self.pending_export.is_some() || self.pending_import.is_some()
    }
}

fn backup_start_dir(config: &AppConfig) -> Option<PathBuf> {
    config
        .data
        .backup_directory
        .clone()
        .filter(|dir| dir.is_dir())
        .or_else(paths::default_backup_dir)
}

/// Contents of the File menu (rendered inside the toolbar's menu button)
pub fn file_menu_contents(ui: &mut egui::Ui, state: &mut FileMenuState, config: &AppConfig) {
    let idle = !state.any_file_dialog_pending();

    if ui
        .add_enabled(idle, egui::Button::new("Export backup..."))
        .clicked()
    {
        let start_dir = backup_start_dir(config);
        let file_name = BackupData::default_file_name(DayId::today());
        let task_pool = AsyncComputeTaskPool::get();
        state.pending_export = Some(task_pool.spawn(async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .set_title("Export Backup")
                .add_filter("JSON", &["json"])
                .set_file_name(file_name);
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            dialog.save_file().await.map(|h| h.path().to_path_buf())
        }));
        ui.close();
    }

    if ui
        .add_enabled(idle, egui::Button::new("Import backup..."))
        .clicked()
    {
        let start_dir = backup_start_dir(config);
        let task_pool = AsyncComputeTaskPool::get();
        state.pending_import = Some(task_pool.spawn(async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .set_title("Import Backup")
                .add_filter("JSON", &["json"]);
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            dialog.pick_file().await.map(|h| h.path().to_path_buf())
        }));
        ui.close();
    }
}

/// System to poll the backup file dialogs and forward picked paths
pub fn poll_backup_dialogs(
    mut state: ResMut<FileMenuState>,
    mut export_events: MessageWriter<ExportBackupRequest>,
    mut directory_events: MessageWriter<SetBackupDirectoryRequest>,
) {
    if let Some(ref mut task) = state.pending_export
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        state.pending_export = None;
        if let Some(path) = result {
            directory_events.write(SetBackupDirectoryRequest { path: path.clone() });
            export_events.write(ExportBackupRequest { path });
        }
    }

    if let Some(ref mut task) = state.pending_import
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        state.pending_import = None;
        if let Some(path) = result {
            state.confirm_import = Some(path);
        }
    }
}

/// Renders the confirmation shown before a backup replaces all data
pub fn import_confirmation_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<FileMenuState>,
    mut import_events: MessageWriter<ImportBackupRequest>,
    mut directory_events: MessageWriter<SetBackupDirectoryRequest>,
) -> Result {
    let Some(path) = state.confirm_import.clone() else {
        return Ok(());
    };

    egui::Window::new("Import Backup")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Replace all shifts, shift types and leave records with this backup?");
            ui.add_space(5.0);
            let path_str = path.to_string_lossy();
            ui.label(egui::RichText::new(path_str.as_ref()).weak());
            ui.label(egui::RichText::new("Undo history will be cleared.").small());
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui.button("Import").clicked() {
                    directory_events.write(SetBackupDirectoryRequest { path: path.clone() });
                    import_events.write(ImportBackupRequest { path: path.clone() });
                    state.confirm_import = None;
                }
                if ui.button("Cancel").clicked() {
                    state.confirm_import = None;
                }
            });
        });

    Ok(())
}

/// Renders the error dialog for failed writes
pub fn store_write_error_ui(
    mut contexts: EguiContexts,
    mut write_error: ResMut<StoreWriteError>,
) -> Result {
    let Some(message) = write_error.message.clone() else {
        return Ok(());
    };

    egui::Window::new("Save Error")
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your change could not be saved. The calendar shows the last saved state.");
            ui.add_space(5.0);
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(egui::Color32::RED, message.as_str());
            });
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                write_error.message = None;
            }
        });

    Ok(())
}

/// Renders the notice listing data files that failed to load at startup
pub fn data_load_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<DataLoadNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Data Not Loaded")
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Some data files could not be read and were started fresh.");
            ui.label(
                egui::RichText::new("A copy of each unreadable file was kept next to it.")
                    .weak(),
            );
            ui.add_space(5.0);
            for reason in &notification.reasons {
                ui.label(egui::RichText::new(reason.as_str()).small());
            }
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notification.show = false;
            }
        });

    Ok(())
}

/// Renders the notice shown when the config file was reset to defaults
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be loaded and were reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.add_space(5.0);
                ui.label(egui::RichText::new(reason.as_str()).weak().small());
            }
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notification.show = false;
            }
        });

    Ok(())
}

/// Renders the result of a finished backup export or import
pub fn backup_notice_ui(mut contexts: EguiContexts, mut notice: ResMut<BackupNotice>) -> Result {
    let Some(message) = notice.message.clone() else {
        return Ok(());
    };

    egui::Window::new("Backup")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(message.as_str());
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notice.message = None;
            }
        });

    Ok(())
}
