use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::calendar::WeekStart;
use crate::config::{AppConfig, SaveConfigRequest, SetWeekStartRequest};
use crate::shifts::{
    AddShiftTypeRequest, ColorTheme, DeleteShiftTypeRequest, ResetShiftTypeRequest, ShiftConfig,
    ShiftRegistry, ShiftType, UpdateShiftTypeRequest,
};
use crate::theme;

/// Which shift type the editor form is working on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeEditTarget {
    Existing(ShiftType),
    New,
}

/// State for the settings dialog
#[derive(Resource, Default)]
pub struct SettingsDialogState {
    /// Whether the dialog is open
    pub is_open: bool,
    /// Type currently being edited, if any
    pub editing: Option<TypeEditTarget>,
    /// Edited label
    pub label: String,
    /// Edited color
    pub color: ColorTheme,
    /// Validation error for the editor form
    pub error: Option<String>,
    /// Custom type waiting for delete confirmation
    pub pending_delete: Option<ShiftType>,
}

impl SettingsDialogState {
    pub fn open(&mut self) {
        self.is_open = true;
        self.editing = None;
        self.error = None;
        self.pending_delete = None;
    }

    /// Load a type into the editor form
    pub fn edit(&mut self, shift: &ShiftType, registry: &ShiftRegistry) {
        self.editing = Some(TypeEditTarget::Existing(shift.clone()));
        self.label = registry.label(shift).to_string();
        self.color = registry.color(shift);
        self.error = None;
    }

    pub fn edit_new(&mut self) {
        self.editing = Some(TypeEditTarget::New);
        self.label.clear();
        self.color = ColorTheme::default();
        self.error = None;
    }

    /// Validate the editor form
    pub fn form_config(&self) -> Result<ShiftConfig, String> {
        let label = self.label.trim();
        if label.is_empty() {
            return Err("Name cannot be empty".to_string());
        }
        Ok(ShiftConfig::new(label, self.color))
    }
}

fn color_swatch(ui: &mut egui::Ui, color: ColorTheme) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, 3, theme::shift_fill(color));
}

/// Returns true when the confirm-deletions preference was toggled
fn general_section(ui: &mut egui::Ui, config: &mut AppConfig, week_start: &mut WeekStart) -> bool {
    ui.group(|ui| {
        ui.label(egui::RichText::new("General").strong());
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Week starts on:");
            egui::ComboBox::from_id_salt("week_start_select")
                .selected_text(week_start.label())
                .show_ui(ui, |ui| {
                    for option in [WeekStart::Sunday, WeekStart::Monday] {
                        ui.selectable_value(week_start, option, option.label());
                    }
                });
        });

        let changed = ui
            .checkbox(
                &mut config.data.confirm_deletions,
                "Ask before deleting shift types and leave records",
            )
            .changed();
        if changed {
            config.dirty = true;
        }
        changed
    })
    .inner
}

/// Renders the settings dialog
#[allow(clippy::too_many_arguments)]
pub fn settings_dialog_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<SettingsDialogState>,
    mut config: ResMut<AppConfig>,
    registry: Res<ShiftRegistry>,
    mut week_start_events: MessageWriter<SetWeekStartRequest>,
    mut save_events: MessageWriter<SaveConfigRequest>,
    mut add_events: MessageWriter<AddShiftTypeRequest>,
    mut update_events: MessageWriter<UpdateShiftTypeRequest>,
    mut reset_events: MessageWriter<ResetShiftTypeRequest>,
    mut delete_events: MessageWriter<DeleteShiftTypeRequest>,
) -> Result {
    if !state.is_open {
        return Ok(());
    }

    let mut is_open = true;
    let mut week_start = config.data.week_start;
    let confirm_deletions = config.data.confirm_deletions;
    let mut preferences_changed = false;

    egui::Window::new("Settings")
        .open(&mut is_open)
        .collapsible(false)
        .resizable(true)
        .min_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            preferences_changed = general_section(ui, &mut config, &mut week_start);
            ui.add_space(12.0);

            ui.group(|ui| {
                ui.label(egui::RichText::new("Shift Types").strong());
                ui.add_space(8.0);

                egui::Grid::new("shift_type_list")
                    .num_columns(3)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        for (shift, type_config) in registry.assignable() {
                            ui.horizontal(|ui| {
                                color_swatch(ui, type_config.color);
                                ui.label(type_config.label.as_str());
                            });
                            ui.label(egui::RichText::new(type_config.color.name()).weak());
                            ui.horizontal(|ui| {
                                if ui.small_button("Edit").clicked() {
                                    state.edit(shift, &registry);
                                }
                                if shift.is_custom() {
                                    if ui.small_button("Delete").clicked() {
                                        if confirm_deletions {
                                            state.pending_delete = Some(shift.clone());
                                        } else {
                                            delete_events.write(DeleteShiftTypeRequest {
                                                shift: shift.clone(),
                                            });
                                        }
                                    }
                                } else if ShiftConfig::default_for(shift).as_ref()
                                    != Some(type_config)
                                    && ui.small_button("Reset").clicked()
                                {
                                    reset_events.write(ResetShiftTypeRequest {
                                        shift: shift.clone(),
                                    });
                                }
                            });
                            ui.end_row();
                        }
                    });

                ui.add_space(6.0);
                if ui.button("Add custom type").clicked() {
                    state.edit_new();
                }
            });

            let Some(target) = state.editing.clone() else {
                return;
            };

            ui.add_space(12.0);
            ui.group(|ui| {
                let title = match &target {
                    TypeEditTarget::Existing(shift) => format!("Edit {}", registry.label(shift)),
                    TypeEditTarget::New => "New shift type".to_string(),
                };
                ui.label(egui::RichText::new(title).strong());
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label("Name:");
                    ui.text_edit_singleline(&mut state.label);
                });
                ui.horizontal_wrapped(|ui| {
                    ui.label("Color:");
                    for color in ColorTheme::ALL {
                        let button = egui::Button::new("")
                            .fill(theme::shift_fill(color))
                            .min_size(egui::vec2(20.0, 20.0))
                            .selected(state.color == color);
                        if ui.add(button).on_hover_text(color.name()).clicked() {
                            state.color = color;
                        }
                    }
                });

                if let Some(error) = &state.error {
                    ui.colored_label(egui::Color32::RED, error.as_str());
                }

                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        match state.form_config() {
                            Ok(type_config) => {
                                match target {
                                    TypeEditTarget::Existing(shift) => {
                                        update_events.write(UpdateShiftTypeRequest {
                                            shift,
                                            config: type_config,
                                        });
                                    }
                                    TypeEditTarget::New => {
                                        add_events.write(AddShiftTypeRequest {
                                            config: type_config,
                                        });
                                    }
                                }
                                state.editing = None;
                            }
                            Err(e) => state.error = Some(e),
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        state.editing = None;
                    }
                });
            });
        });

    if week_start != config.data.week_start {
        week_start_events.write(SetWeekStartRequest { week_start });
    }
    if preferences_changed {
        save_events.write(SaveConfigRequest);
    }
    if !is_open {
        state.is_open = false;
    }

    if let Some(shift) = state.pending_delete.clone() {
        let label = registry.label(&shift).to_string();
        egui::Window::new("Delete Shift Type")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(contexts.ctx_mut()?, |ui| {
                ui.label(format!(
                    "Delete \"{}\"? Every day using it will be cleared.",
                    label
                ));
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        delete_events.write(DeleteShiftTypeRequest {
                            shift: shift.clone(),
                        });
                        state.pending_delete = None;
                    }
                    if ui.button("Cancel").clicked() {
                        state.pending_delete = None;
                    }
                });
            });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_rejects_blank_label() {
        let state = SettingsDialogState {
            label: "   ".to_string(),
            ..Default::default()
        };
        assert!(state.form_config().is_err());
    }

    #[test]
    fn test_edit_loads_registry_values() {
        let registry = ShiftRegistry::default();
        let mut state = SettingsDialogState::default();
        state.edit(&ShiftType::Night, &registry);
        assert_eq!(
            state.editing,
            Some(TypeEditTarget::Existing(ShiftType::Night))
        );
        assert_eq!(state.label, registry.label(&ShiftType::Night));
        assert_eq!(state.color, registry.color(&ShiftType::Night));
    }

    #[test]
    fn test_form_trims_label() {
        let mut state = SettingsDialogState::default();
        state.edit_new();
        state.label = " Training ".to_string();
        state.color = ColorTheme::Orange;
        let config = state.form_config().unwrap();
        assert_eq!(config, ShiftConfig::new("Training", ColorTheme::Orange));
    }
}
