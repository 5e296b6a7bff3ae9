use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::calendar::DayId;
use crate::config::AppConfig;
use crate::shifts::{
    AddLeaveRequest, DeleteLeaveRequest, LeaveRecord, LeaveRecords, ShiftRegistry, ShiftType,
};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaveTab {
    #[default]
    Apply,
    History,
}

/// State for the leave manager dialog
#[derive(Resource)]
pub struct LeaveDialogState {
    pub is_open: bool,
    pub tab: LeaveTab,
    pub shift_type: ShiftType,
    /// Start and end dates as typed (YYYY-MM-DD)
    pub start: String,
    pub end: String,
    pub note: String,
    /// Validation error for the apply form
    pub error: Option<String>,
    /// Record waiting for delete confirmation
    pub pending_delete: Option<String>,
}

impl Default for LeaveDialogState {
    fn default() -> Self {
        let today = DayId::today().to_string();
        Self {
            is_open: false,
            tab: LeaveTab::Apply,
            shift_type: ShiftType::AnnualLeave,
            start: today.clone(),
            end: today,
            note: String::new(),
            error: None,
            pending_delete: None,
        }
    }
}

impl LeaveDialogState {
    pub fn open(&mut self) {
        self.is_open = true;
        self.error = None;
        self.pending_delete = None;
    }

    /// Validate the form into a leave record
    pub fn build_record(&self, created_at: i64) -> Result<LeaveRecord, String> {
        let start: DayId = self.start.parse()?;
        let end: DayId = self.end.parse()?;
        LeaveRecord::new(
            self.shift_type.clone(),
            start,
            end,
            self.note.trim(),
            created_at,
        )
    }
}

/// Types offered in the leave form: leave categories plus custom types
fn leave_types(registry: &ShiftRegistry) -> Vec<ShiftType> {
    registry
        .assignable()
        .map(|(shift, _)| shift.clone())
        .filter(|shift| shift.is_leave() || shift.is_custom())
        .collect()
}

fn apply_tab(
    ui: &mut egui::Ui,
    state: &mut LeaveDialogState,
    registry: &ShiftRegistry,
    add_events: &mut MessageWriter<AddLeaveRequest>,
) {
    egui::Grid::new("leave_form")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("Type:");
            egui::ComboBox::from_id_salt("leave_type_select")
                .selected_text(registry.label(&state.shift_type).to_string())
                .show_ui(ui, |ui| {
                    for shift in leave_types(registry) {
                        let label = registry.label(&shift).to_string();
                        ui.selectable_value(&mut state.shift_type, shift, label);
                    }
                });
            ui.end_row();

            ui.label("From:");
            ui.text_edit_singleline(&mut state.start);
            ui.end_row();

            ui.label("To:");
            ui.text_edit_singleline(&mut state.end);
            ui.end_row();

            ui.label("Note:");
            ui.text_edit_singleline(&mut state.note);
            ui.end_row();
        });

    if let Ok(record) = state.build_record(0) {
        ui.label(egui::RichText::new(format!("{} day(s)", record.duration)).weak());
    }

    if let Some(error) = &state.error {
        ui.colored_label(egui::Color32::RED, error.as_str());
    }

    ui.add_space(6.0);
    if ui.button(egui::RichText::new("Apply leave").strong()).clicked() {
        match state.build_record(chrono::Utc::now().timestamp_millis()) {
            Ok(record) => {
                add_events.write(AddLeaveRequest { record });
                state.error = None;
                state.note.clear();
                state.tab = LeaveTab::History;
            }
            Err(e) => state.error = Some(e),
        }
    }
}

fn history_tab(
    ui: &mut egui::Ui,
    state: &mut LeaveDialogState,
    leaves: &LeaveRecords,
    registry: &ShiftRegistry,
    confirm_deletions: bool,
    delete_events: &mut MessageWriter<DeleteLeaveRequest>,
) {
    if leaves.is_empty() {
        ui.label(egui::RichText::new("No leave recorded yet.").weak());
        return;
    }

    ui.horizontal_wrapped(|ui| {
        for shift in leave_types(registry) {
            let total = leaves.total_days(&shift);
            if total > 0 {
                ui.label(format!("{}: {} day(s)", registry.label(&shift), total));
            }
        }
    });
    ui.separator();

    egui::ScrollArea::vertical().max_height(280.0).show(ui, |ui| {
        for record in leaves.iter() {
            ui.horizontal(|ui| {
                let color = registry.color(&record.shift_type);
                ui.label(
                    egui::RichText::new(registry.label(&record.shift_type))
                        .color(theme::shift_fill(color))
                        .strong(),
                );
                ui.label(record.range_label());
                ui.label(egui::RichText::new(format!("{} day(s)", record.duration)).weak());
                if !record.note.is_empty() {
                    ui.label(egui::RichText::new(&record.note).italics());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Delete").clicked() {
                        if confirm_deletions {
                            state.pending_delete = Some(record.id.clone());
                        } else {
                            delete_events.write(DeleteLeaveRequest {
                                id: record.id.clone(),
                            });
                        }
                    }
                });
            });
        }
    });
}

/// Renders the leave manager dialog
pub fn leave_dialog_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<LeaveDialogState>,
    leaves: Res<LeaveRecords>,
    registry: Res<ShiftRegistry>,
    config: Res<AppConfig>,
    mut add_events: MessageWriter<AddLeaveRequest>,
    mut delete_events: MessageWriter<DeleteLeaveRequest>,
) -> Result {
    if !state.is_open {
        return Ok(());
    }

    let mut is_open = true;
    egui::Window::new("Leave")
        .open(&mut is_open)
        .collapsible(false)
        .resizable(true)
        .min_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut state.tab, LeaveTab::Apply, "Apply");
                ui.selectable_value(&mut state.tab, LeaveTab::History, "History");
            });
            ui.separator();

            match state.tab {
                LeaveTab::Apply => apply_tab(ui, &mut state, &registry, &mut add_events),
                LeaveTab::History => history_tab(
                    ui,
                    &mut state,
                    &leaves,
                    &registry,
                    config.data.confirm_deletions,
                    &mut delete_events,
                ),
            }
        });
    if !is_open {
        state.is_open = false;
    }

    if let Some(id) = state.pending_delete.clone() {
        egui::Window::new("Delete Leave Record")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(contexts.ctx_mut()?, |ui| {
                ui.label("Delete this leave record? Shifts already on the calendar stay.");
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        delete_events.write(DeleteLeaveRequest { id: id.clone() });
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
    fn test_build_record_from_form() {
        let state = LeaveDialogState {
            start: "2024-01-30".to_string(),
            end: "2024-02-02".to_string(),
            note: "  trip ".to_string(),
            ..Default::default()
        };
        let record = state.build_record(42).unwrap();
        assert_eq!(record.duration, 4);
        assert_eq!(record.note, "trip");
        assert_eq!(record.shift_type, ShiftType::AnnualLeave);
    }

    #[test]
    fn test_build_record_rejects_bad_dates() {
        let state = LeaveDialogState {
            start: "2024-02-30".to_string(),
            ..Default::default()
        };
        assert!(state.build_record(1).is_err());
    }

    #[test]
    fn test_leave_types_include_custom() {
        let mut registry = ShiftRegistry::default();
        let custom = registry.add_custom(
            crate::shifts::ShiftConfig::new("Training", crate::shifts::ColorTheme::Orange),
            3,
        );
        let types = leave_types(&registry);
        assert!(types.contains(&ShiftType::SickLeave));
        assert!(types.contains(&custom));
        assert!(!types.contains(&ShiftType::Day));
    }
}
