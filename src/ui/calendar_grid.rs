//! The month grid: draws day cells and turns pointer input on them into
//! selection input.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::DialogState;
use crate::calendar::selection::{Mode, PointerInput, RenderedGrid, SelectionController};
use crate::calendar::{DayId, VisibleMonth};
use crate::config::AppConfig;
use crate::constants::{
    CELL_CORNER_RADIUS, CELL_SPACING, DAYS_PER_WEEK, MIN_CELL_SIZE, WEEKDAY_HEADER_HEIGHT,
};
use crate::shifts::{ShiftBook, ShiftRegistry, ShiftStore};
use crate::theme;

fn to_bevy_rect(rect: egui::Rect) -> Rect {
    Rect::new(rect.min.x, rect.min.y, rect.max.x, rect.max.y)
}

/// Overlay a day cell gets from the current selection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellHighlight {
    None,
    Selected,
    CopySource,
    PasteTarget,
}

fn highlight_for(controller: &SelectionController, day: DayId) -> CellHighlight {
    match controller.mode() {
        Mode::Selecting | Mode::ConfirmCopy
            if controller.selection().is_some_and(|r| r.contains(day)) =>
        {
            CellHighlight::Selected
        }
        Mode::PasteTarget => {
            if controller.paste_preview().is_some_and(|r| r.contains(day)) {
                CellHighlight::PasteTarget
            } else if controller.selection().is_some_and(|r| r.contains(day)) {
                CellHighlight::CopySource
            } else {
                CellHighlight::None
            }
        }
        _ => CellHighlight::None,
    }
}

fn paint_cell(
    painter: &egui::Painter,
    rect: egui::Rect,
    day: DayId,
    label: Option<(&str, egui::Color32, egui::Color32)>,
    is_today: bool,
    highlight: CellHighlight,
) {
    let fill = label.map(|(_, fill, _)| fill).unwrap_or(theme::EMPTY_CELL_FILL);
    painter.rect_filled(rect, CELL_CORNER_RADIUS, fill);

    let number_color = label
        .map(|(_, _, text)| text)
        .unwrap_or(theme::DAY_NUMBER_TEXT);
    painter.text(
        rect.left_top() + egui::vec2(6.0, 4.0),
        egui::Align2::LEFT_TOP,
        day.day(),
        egui::FontId::proportional(13.0),
        number_color,
    );

    if let Some((text, _, text_color)) = label {
        painter.text(
            rect.center_bottom() - egui::vec2(0.0, 6.0),
            egui::Align2::CENTER_BOTTOM,
            text,
            egui::FontId::proportional(12.0),
            text_color,
        );
    }

    match highlight {
        CellHighlight::Selected => {
            painter.rect_filled(rect, CELL_CORNER_RADIUS, theme::SELECTION_FILL);
            painter.rect_stroke(
                rect,
                CELL_CORNER_RADIUS,
                egui::Stroke::new(2.0, theme::SELECTION_COLOR),
                egui::StrokeKind::Inside,
            );
        }
        CellHighlight::CopySource => {
            painter.rect_stroke(
                rect,
                CELL_CORNER_RADIUS,
                egui::Stroke::new(1.5, theme::COPY_SOURCE_OUTLINE),
                egui::StrokeKind::Inside,
            );
        }
        CellHighlight::PasteTarget => {
            painter.rect_filled(rect, CELL_CORNER_RADIUS, theme::PASTE_PREVIEW_FILL);
            painter.rect_stroke(
                rect,
                CELL_CORNER_RADIUS,
                egui::Stroke::new(2.0, theme::PASTE_PREVIEW_COLOR),
                egui::StrokeKind::Inside,
            );
        }
        CellHighlight::None => {}
    }

    if is_today {
        painter.rect_stroke(
            rect.shrink(3.0),
            CELL_CORNER_RADIUS,
            egui::Stroke::new(1.0, theme::TODAY_OUTLINE),
            egui::StrokeKind::Inside,
        );
    }
}

/// Translate this frame's egui pointer state into selection input
fn emit_pointer_input(
    ui: &egui::Ui,
    grid: &RenderedGrid,
    controller: &SelectionController,
    pointer: &mut MessageWriter<PointerInput>,
) {
    let (pressed, down, released, clicked, pos) = ui.ctx().input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
            i.pointer.primary_clicked(),
            i.pointer.interact_pos(),
        )
    });

    // Only cells on this panel's layer count; windows above it swallow input
    let over_grid = pos.is_some_and(|p| ui.ctx().layer_id_at(p) == Some(ui.layer_id()));
    let day_under = pos
        .filter(|_| over_grid)
        .and_then(|p| grid.day_at(Vec2::new(p.x, p.y)));

    match controller.mode() {
        Mode::SelectStart | Mode::ConfirmCopy => {
            if pressed && let Some(day) = day_under {
                pointer.write(PointerInput::Down(day));
            }
        }
        Mode::Selecting => {
            if down && controller.is_dragging() {
                pointer.write(PointerInput::Move(day_under));
            }
            if released {
                pointer.write(PointerInput::Up);
            }
        }
        Mode::View | Mode::PasteTarget => {
            if clicked && let Some(day) = day_under {
                pointer.write(PointerInput::Tap(day));
            }
        }
    }
}

/// Central panel with the weekday header and the day cells of the visible month
#[allow(clippy::too_many_arguments)]
pub fn calendar_grid_ui(
    mut contexts: EguiContexts,
    visible: Res<VisibleMonth>,
    config: Res<AppConfig>,
    book: Res<ShiftBook>,
    registry: Res<ShiftRegistry>,
    controller: Res<SelectionController>,
    dialog_state: Res<DialogState>,
    mut grid: ResMut<RenderedGrid>,
    mut pointer: MessageWriter<PointerInput>,
) -> Result {
    let week_start = config.data.week_start;
    let month = visible.days(week_start);
    let today = DayId::today();
    let shifts = book.read();

    grid.clear();

    egui::CentralPanel::default().show(contexts.ctx_mut()?, |ui| {
        let area = ui.available_rect_before_wrap();
        let columns = DAYS_PER_WEEK as f32;
        let rows = month.weeks().max(1) as f32;
        let cell_width =
            ((area.width() - CELL_SPACING * (columns - 1.0)) / columns).max(MIN_CELL_SIZE);
        let cell_height = ((area.height() - WEEKDAY_HEADER_HEIGHT - CELL_SPACING * rows) / rows)
            .max(MIN_CELL_SIZE);
        let painter = ui.painter().clone();

        for (column, name) in week_start.weekday_labels().iter().enumerate() {
            let x = area.min.x + column as f32 * (cell_width + CELL_SPACING) + cell_width / 2.0;
            let color = if *name == "Sat" || *name == "Sun" {
                theme::WEEKEND_HEADER_TEXT
            } else {
                theme::WEEKDAY_HEADER_TEXT
            };
            painter.text(
                egui::pos2(x, area.min.y + WEEKDAY_HEADER_HEIGHT / 2.0),
                egui::Align2::CENTER_CENTER,
                name,
                egui::FontId::proportional(13.0),
                color,
            );
        }

        let columns = DAYS_PER_WEEK as usize;
        for (index, cell) in month.enumerate() {
            let Some(day) = cell else {
                continue;
            };
            let (row, column) = (index / columns, index % columns);
            let min = area.min
                + egui::vec2(
                    column as f32 * (cell_width + CELL_SPACING),
                    WEEKDAY_HEADER_HEIGHT + CELL_SPACING + row as f32 * (cell_height + CELL_SPACING),
                );
            let rect = egui::Rect::from_min_size(min, egui::vec2(cell_width, cell_height));

            let shift = shifts.get(day);
            let color = registry.color(&shift);
            let label = if shift.is_off() {
                None
            } else {
                Some((
                    registry.label(&shift),
                    theme::shift_fill(color),
                    theme::shift_text(color),
                ))
            };

            paint_cell(
                &painter,
                rect,
                day,
                label,
                day == today,
                highlight_for(&controller, day),
            );
            grid.push(to_bevy_rect(rect), day);
        }

        ui.allocate_rect(area, egui::Sense::hover());

        if !dialog_state.any_modal_open && !grid.is_empty() {
            emit_pointer_input(ui, &grid, &controller, &mut pointer);
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayId {
        s.parse().unwrap()
    }

    #[test]
    fn test_no_highlight_in_view() {
        let controller = SelectionController::default();
        assert_eq!(highlight_for(&controller, day("2024-03-01")), CellHighlight::None);
    }

    #[test]
    fn test_selected_days_highlight_while_dragging() {
        let mut controller = SelectionController::default();
        controller.start_copy();
        controller.pointer_down(day("2024-03-03"));
        controller.pointer_move(Some(day("2024-03-01")));

        assert_eq!(highlight_for(&controller, day("2024-03-02")), CellHighlight::Selected);
        assert_eq!(highlight_for(&controller, day("2024-03-04")), CellHighlight::None);
    }

    #[test]
    fn test_paste_preview_wins_over_copy_source() {
        let mut controller = SelectionController::default();
        controller.start_copy();
        controller.pointer_down(day("2024-03-01"));
        controller.pointer_move(Some(day("2024-03-03")));
        controller.release();
        controller.confirm_copy(&Default::default());
        controller.tap(day("2024-03-03"));

        assert_eq!(highlight_for(&controller, day("2024-03-01")), CellHighlight::CopySource);
        assert_eq!(highlight_for(&controller, day("2024-03-03")), CellHighlight::PasteTarget);
        assert_eq!(highlight_for(&controller, day("2024-03-05")), CellHighlight::PasteTarget);
        assert_eq!(highlight_for(&controller, day("2024-03-06")), CellHighlight::None);
    }

    #[test]
    fn test_bevy_rect_conversion_keeps_bounds() {
        let rect = egui::Rect::from_min_max(egui::pos2(1.0, 2.0), egui::pos2(30.0, 40.0));
        let converted = to_bevy_rect(rect);
        assert_eq!(converted.min, Vec2::new(1.0, 2.0));
        assert_eq!(converted.max, Vec2::new(30.0, 40.0));
    }
}
