//! Run conditions for controlling when calendar systems execute.

use bevy::prelude::*;

use super::selection::{Mode, SelectionController};
use crate::ui::DialogState;

/// Run condition: returns true when the selection controller is in `mode`.
///
/// Usage: `.run_if(selection_is(Mode::Selecting))`
pub fn selection_is(mode: Mode) -> impl FnMut(Res<SelectionController>) -> bool + Clone {
    move |controller: Res<SelectionController>| controller.mode() == mode
}

/// Run condition: returns true when no modal dialog is open.
///
/// Usage: `.run_if(no_dialog_open)`
pub fn no_dialog_open(dialog_state: Res<DialogState>) -> bool {
    !dialog_state.any_modal_open
}
