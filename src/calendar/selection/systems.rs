//! Systems feeding input into the selection controller.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use super::controller::{Mode, SelectionController, TapOutcome};
use crate::calendar::history::{CommandHistory, RecordingStore};
use crate::calendar::DayId;
use crate::shifts::{ShiftBook, ShiftStore, StoreWriteError};

/// Pointer input resolved against the rendered grid
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerInput {
    /// Press on a day cell
    Down(DayId),
    /// Pointer moved while pressed; None when it is over no cell
    Move(Option<DayId>),
    /// Press released (inside the grid or anywhere else)
    Up,
    /// Click without drag on a day cell
    Tap(DayId),
}

/// Button and shortcut commands
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCommand {
    StartCopy,
    Reselect,
    Confirm,
    Paste,
    End,
    Cancel,
}

/// Written for every mode transition
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChanged {
    pub from: Mode,
    pub to: Mode,
}

/// A tap in VIEW asks for the single-day shift picker
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenDayPickerRequest {
    pub day: DayId,
}

fn apply_pointer(
    controller: &mut SelectionController,
    input: PointerInput,
    picker: &mut MessageWriter<OpenDayPickerRequest>,
) {
    match input {
        PointerInput::Down(day) => {
            controller.pointer_down(day);
        }
        PointerInput::Move(day) => {
            controller.pointer_move(day);
        }
        PointerInput::Up => {
            controller.release();
        }
        PointerInput::Tap(day) => match controller.tap(day) {
            TapOutcome::OpenPicker(day) => {
                picker.write(OpenDayPickerRequest { day });
            }
            TapOutcome::TargetSet(day) => debug!("Paste target set to {}", day),
            TapOutcome::Ignored => {}
        },
    }
}

fn apply_command(
    controller: &mut SelectionController,
    command: SelectionCommand,
    book: &mut ShiftBook,
    history: &mut CommandHistory,
    write_error: &mut StoreWriteError,
) {
    match command {
        SelectionCommand::StartCopy => {
            controller.start_copy();
        }
        SelectionCommand::Reselect => {
            controller.reselect();
        }
        SelectionCommand::Confirm => {
            if controller.confirm_copy(book.read()) {
                info!("Copied {} day(s) to the clipboard", controller.clipboard().len());
            }
        }
        SelectionCommand::Paste => {
            let target = controller.paste_target();
            let mut store = RecordingStore::new(book, history, "Paste");
            match controller.paste(&mut store) {
                Ok(true) => {
                    if let Some(target) = target {
                        info!(
                            "Pasted {} day(s) starting {}",
                            controller.clipboard().len(),
                            target
                        );
                    }
                }
                Ok(false) => debug!("Paste ignored: nothing to paste"),
                Err(e) => {
                    warn!("Paste failed: {}", e);
                    write_error.message = Some(e);
                }
            }
        }
        SelectionCommand::End => {
            controller.end();
        }
        SelectionCommand::Cancel => {
            controller.cancel();
        }
    }
}

fn note_transition(last: &mut Mode, now: Mode, transitions: &mut Vec<ModeChanged>) {
    if now != *last {
        transitions.push(ModeChanged { from: *last, to: now });
        *last = now;
    }
}

/// Applies this frame's pointer input and commands in arrival order.
///
/// A cancel anywhere in the frame wins: pending pointer input is dropped and
/// the controller returns to VIEW.
#[allow(clippy::too_many_arguments)]
pub fn drive_selection(
    mut pointer: MessageReader<PointerInput>,
    mut commands: MessageReader<SelectionCommand>,
    mut controller: ResMut<SelectionController>,
    mut book: ResMut<ShiftBook>,
    mut history: ResMut<CommandHistory>,
    mut write_error: ResMut<StoreWriteError>,
    mut mode_changed: MessageWriter<ModeChanged>,
    mut picker: MessageWriter<OpenDayPickerRequest>,
) {
    let requested: Vec<SelectionCommand> = commands.read().copied().collect();
    let mut transitions = Vec::new();
    let mut last = controller.mode();

    if requested.contains(&SelectionCommand::Cancel) {
        pointer.clear();
        controller.cancel();
        note_transition(&mut last, controller.mode(), &mut transitions);
    } else {
        for input in pointer.read() {
            apply_pointer(&mut controller, *input, &mut picker);
            note_transition(&mut last, controller.mode(), &mut transitions);
        }
        for command in requested {
            apply_command(
                &mut controller,
                command,
                &mut book,
                &mut history,
                &mut write_error,
            );
            note_transition(&mut last, controller.mode(), &mut transitions);
        }
    }

    for change in transitions {
        debug!("Selection mode {:?} -> {:?}", change.from, change.to);
        mode_changed.write(change);
    }
}

/// Ends a drag on any primary release in the window, even outside the grid.
///
/// Scheduled only while the mode is SELECTING. Also ends the drag if nothing
/// is held any more, so a release the window never saw cannot strand it.
pub fn release_on_global_pointer_up(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    controller: Res<SelectionController>,
    mut pointer: MessageWriter<PointerInput>,
) {
    let released = mouse.just_released(MouseButton::Left)
        || touches.any_just_released()
        || touches.any_just_canceled();
    let nothing_held = !mouse.pressed(MouseButton::Left) && touches.iter().next().is_none();

    if controller.is_dragging() && (released || nothing_held) {
        pointer.write(PointerInput::Up);
    }
}

/// Keyboard shortcuts: Ctrl+C starts a copy, Enter confirms or pastes, Escape cancels
pub fn selection_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    controller: Res<SelectionController>,
    mut contexts: EguiContexts,
    mut commands: MessageWriter<SelectionCommand>,
) {
    // Don't trigger if typing in UI
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let mode = controller.mode();

    if keyboard.just_pressed(KeyCode::Escape) && mode != Mode::View {
        commands.write(SelectionCommand::Cancel);
        return;
    }

    if ctrl && keyboard.just_pressed(KeyCode::KeyC) && mode == Mode::View {
        commands.write(SelectionCommand::StartCopy);
    }

    if keyboard.just_pressed(KeyCode::Enter) {
        match mode {
            Mode::ConfirmCopy => {
                commands.write(SelectionCommand::Confirm);
            }
            Mode::PasteTarget if controller.paste_target().is_some() => {
                commands.write(SelectionCommand::Paste);
            }
            _ => {}
        }
    }
}
