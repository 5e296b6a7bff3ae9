use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::file_menu::{self, FileMenuState};
use super::leave_dialog::LeaveDialogState;
use super::settings_dialog::SettingsDialogState;
use crate::calendar::history::{CommandHistory, RedoRequest, UndoRequest};
use crate::calendar::selection::{Mode, SelectionCommand, SelectionController};
use crate::calendar::{DayId, VisibleMonth};
use crate::config::AppConfig;

/// Main toolbar: month navigation, copy, undo/redo, and the dialogs
#[allow(clippy::too_many_arguments)]
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut visible: ResMut<VisibleMonth>,
    controller: Res<SelectionController>,
    history: Res<CommandHistory>,
    config: Res<AppConfig>,
    mut file_menu: ResMut<FileMenuState>,
    mut leave_dialog: ResMut<LeaveDialogState>,
    mut settings: ResMut<SettingsDialogState>,
    mut selection_commands: MessageWriter<SelectionCommand>,
    mut undo_events: MessageWriter<UndoRequest>,
    mut redo_events: MessageWriter<RedoRequest>,
) -> Result {
    let in_view = controller.mode() == Mode::View;

    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                ui.menu_button("File", |ui| {
                    file_menu::file_menu_contents(ui, &mut file_menu, &config);
                });

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                if ui.button("‹").on_hover_text("Previous month").clicked() {
                    visible.previous();
                }
                ui.label(egui::RichText::new(visible.title()).size(18.0).strong());
                if ui.button("›").on_hover_text("Next month").clicked() {
                    visible.next();
                }
                if ui.button("Today").clicked() {
                    visible.jump_to(DayId::today());
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                let copy_button = egui::Button::new(egui::RichText::new("Copy range").strong())
                    .min_size(egui::vec2(0.0, 24.0))
                    .selected(!in_view);
                if ui
                    .add_enabled(in_view, copy_button)
                    .on_hover_text("Drag across days to copy their shifts (Ctrl+C)")
                    .clicked()
                {
                    selection_commands.write(SelectionCommand::StartCopy);
                }

                let undo_hover = history
                    .next_undo_label()
                    .map(|label| format!("Undo {} (Ctrl+Z)", label.to_lowercase()))
                    .unwrap_or_else(|| "Nothing to undo".to_string());
                if ui
                    .add_enabled(history.can_undo(), egui::Button::new("Undo"))
                    .on_hover_text(undo_hover)
                    .clicked()
                {
                    undo_events.write(UndoRequest);
                }

                let redo_hover = history
                    .next_redo_label()
                    .map(|label| format!("Redo {} (Ctrl+Y)", label.to_lowercase()))
                    .unwrap_or_else(|| "Nothing to redo".to_string());
                if ui
                    .add_enabled(history.can_redo(), egui::Button::new("Redo"))
                    .on_hover_text(redo_hover)
                    .clicked()
                {
                    redo_events.write(RedoRequest);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Settings").clicked() {
                        settings.open();
                    }
                    if ui.button("Leaves").clicked() {
                        leave_dialog.open();
                    }
                });
            });
        });
    Ok(())
}
