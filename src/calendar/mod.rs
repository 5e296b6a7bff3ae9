//! Calendar core: day arithmetic, month grids, range selection, clipboard and history.

pub mod clipboard;
pub mod conditions;
mod day;
pub mod history;
mod month;
mod range;
pub mod selection;

pub use day::DayId;
pub use month::{MonthDays, VisibleMonth, WeekStart};
pub use range::DayRange;

use bevy::prelude::*;

use conditions::{no_dialog_open, selection_is};
use selection::Mode;

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<selection::SelectionController>()
            .init_resource::<selection::RenderedGrid>()
            .init_resource::<VisibleMonth>()
            .init_resource::<history::CommandHistory>()
            .add_message::<selection::PointerInput>()
            .add_message::<selection::SelectionCommand>()
            .add_message::<selection::ModeChanged>()
            .add_message::<selection::OpenDayPickerRequest>()
            .add_message::<history::UndoRequest>()
            .add_message::<history::RedoRequest>()
            .add_systems(
                Update,
                (
                    selection::selection_shortcuts.run_if(no_dialog_open),
                    selection::release_on_global_pointer_up
                        .run_if(selection_is(Mode::Selecting)),
                    selection::drive_selection,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (history::handle_undo, history::handle_redo)
                    .run_if(no_dialog_open)
                    .after(selection::drive_selection),
            );
    }
}
