use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::calendar::selection::{Mode, ModeChanged, OpenDayPickerRequest};
use crate::calendar::DayId;
use crate::shifts::{SetDayShiftRequest, ShiftBook, ShiftRegistry, ShiftStore, ShiftType};
use crate::theme;

/// State for the single-day shift picker
#[derive(Resource, Default)]
pub struct DayPickerState {
    /// Day being edited; the picker is open while this is set
    pub day: Option<DayId>,
}

/// System to open the picker for a tapped day
pub fn open_day_picker(
    mut events: MessageReader<OpenDayPickerRequest>,
    mut state: ResMut<DayPickerState>,
) {
    if let Some(event) = events.read().last() {
        state.day = Some(event.day);
    }
}

/// System to close the picker once a copy starts
pub fn close_day_picker_on_mode_change(
    mut events: MessageReader<ModeChanged>,
    mut state: ResMut<DayPickerState>,
) {
    if events.read().any(|change| change.to != Mode::View) {
        state.day = None;
    }
}

/// Renders the shift picker for one day
pub fn day_picker_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<DayPickerState>,
    registry: Res<ShiftRegistry>,
    book: Res<ShiftBook>,
    mut set_events: MessageWriter<SetDayShiftRequest>,
) -> Result {
    let Some(day) = state.day else {
        return Ok(());
    };
    let current = book.read().get(day);
    let mut chosen: Option<ShiftType> = None;
    let mut should_close = false;

    egui::Window::new(format!("Shift for {}", day))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(format!("Current: {}", registry.label(&current)));
            ui.add_space(6.0);

            egui::Grid::new("day_picker_grid")
                .num_columns(3)
                .spacing([6.0, 6.0])
                .show(ui, |ui| {
                    for (index, (shift, config)) in registry.assignable().enumerate() {
                        let button = egui::Button::new(
                            egui::RichText::new(&config.label).color(theme::shift_text(config.color)),
                        )
                        .fill(theme::shift_fill(config.color))
                        .min_size(egui::vec2(110.0, 36.0))
                        .selected(*shift == current);
                        if ui.add(button).clicked() {
                            chosen = Some(shift.clone());
                        }
                        if index % 3 == 2 {
                            ui.end_row();
                        }
                    }
                });

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!current.is_off(), egui::Button::new("Clear"))
                    .clicked()
                {
                    chosen = Some(ShiftType::Off);
                }
                if ui.button("Cancel").clicked() {
                    should_close = true;
                }
            });
        });

    if let Some(shift) = chosen {
        if shift != current {
            set_events.write(SetDayShiftRequest { day, shift });
        }
        should_close = true;
    }
    if should_close {
        state.day = None;
    }

    Ok(())
}
