mod action_bar;
mod calendar_grid;
mod day_picker;
pub mod file_menu;
mod leave_dialog;
mod settings_dialog;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::calendar::selection::ModeChanged;
use crate::config::ConfigResetNotification;
use crate::shifts::{BackupNotice, DataLoadNotification, StoreWriteError};
use crate::theme;

/// Resource that tracks whether any modal dialog is currently open.
/// Calendar input handlers should check this to avoid processing input
/// when the user is interacting with a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block calendar input
    pub any_modal_open: bool,
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
#[allow(clippy::too_many_arguments)]
fn update_dialog_state(
    file_menu: Res<file_menu::FileMenuState>,
    day_picker: Res<day_picker::DayPickerState>,
    leave_dialog: Res<leave_dialog::LeaveDialogState>,
    settings: Res<settings_dialog::SettingsDialogState>,
    config_reset: Res<ConfigResetNotification>,
    data_load: Res<DataLoadNotification>,
    write_error: Res<StoreWriteError>,
    backup_notice: Res<BackupNotice>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = day_picker.day.is_some()
        || leave_dialog.is_open
        || settings.is_open
        || file_menu.confirm_import.is_some()
        || file_menu.any_file_dialog_pending()
        || config_reset.show
        || data_load.show
        || write_error.message.is_some()
        || backup_notice.message.is_some();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<file_menu::FileMenuState>()
            .init_resource::<day_picker::DayPickerState>()
            .init_resource::<leave_dialog::LeaveDialogState>()
            .init_resource::<settings_dialog::SettingsDialogState>()
            .insert_resource(ClearColor(theme::WINDOW_BACKGROUND))
            .add_systems(Startup, spawn_camera)
            // Panels must render before the central grid so it fills the space left over
            // Use chain() to enforce ordering
            .add_systems(
                EguiPrimaryContextPass,
                (
                    toolbar::toolbar_ui,
                    action_bar::action_bar_ui,
                    calendar_grid::calendar_grid_ui,
                )
                    .chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Last: dialogs/overlays
                    day_picker::day_picker_ui,
                    leave_dialog::leave_dialog_ui,
                    settings_dialog::settings_dialog_ui,
                    file_menu::import_confirmation_ui,
                    file_menu::store_write_error_ui,
                    file_menu::data_load_notification_ui,
                    file_menu::config_reset_notification_ui,
                    file_menu::backup_notice_ui,
                )
                    .after(calendar_grid::calendar_grid_ui),
            )
            .add_systems(
                Update,
                (
                    day_picker::open_day_picker,
                    day_picker::close_day_picker_on_mode_change
                        .run_if(on_message::<ModeChanged>),
                    file_menu::poll_backup_dialogs,
                ),
            )
            // Update dialog state at the start of each frame
            .add_systems(First, update_dialog_state);
    }
}
