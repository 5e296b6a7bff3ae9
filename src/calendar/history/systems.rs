//! Bevy systems for undo/redo shortcuts and requests.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use super::command_history::CommandHistory;
use crate::shifts::{ShiftBook, ShiftStore, StoreWriteError};

/// Message to undo the last edit (toolbar button)
#[derive(Message)]
pub struct UndoRequest;

/// Message to redo the last undone edit (toolbar button)
#[derive(Message)]
pub struct RedoRequest;

fn keyboard_blocked(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_keyboard_input())
        .unwrap_or(false)
}

/// System to handle undo (Ctrl+Z or UndoRequest)
pub fn handle_undo(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut requests: MessageReader<UndoRequest>,
    mut contexts: EguiContexts,
    mut history: ResMut<CommandHistory>,
    mut book: ResMut<ShiftBook>,
    mut write_error: ResMut<StoreWriteError>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    let shortcut = ctrl && !shift && keyboard.just_pressed(KeyCode::KeyZ);
    let requested = requests.read().count() > 0;
    if !requested && (!shortcut || keyboard_blocked(&mut contexts)) {
        return;
    }

    let Some(command) = history.pop_undo() else {
        return;
    };
    match book.apply_batch(&command.inverse) {
        Ok(()) => {
            info!("Undid {} ({} day(s))", command.label, command.inverse.len());
            history.push_redo(command);
        }
        Err(e) => {
            warn!("Undo failed: {}", e);
            write_error.message = Some(e);
            history.push_undo(command);
        }
    }
}

/// System to handle redo (Ctrl+Y, Ctrl+Shift+Z or RedoRequest)
pub fn handle_redo(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut requests: MessageReader<RedoRequest>,
    mut contexts: EguiContexts,
    mut history: ResMut<CommandHistory>,
    mut book: ResMut<ShiftBook>,
    mut write_error: ResMut<StoreWriteError>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    let shortcut = (ctrl && keyboard.just_pressed(KeyCode::KeyY))
        || (ctrl && shift && keyboard.just_pressed(KeyCode::KeyZ));
    let requested = requests.read().count() > 0;
    if !requested && (!shortcut || keyboard_blocked(&mut contexts)) {
        return;
    }

    let Some(command) = history.pop_redo() else {
        return;
    };
    match book.apply_batch(&command.forward) {
        Ok(()) => {
            info!("Redid {} ({} day(s))", command.label, command.forward.len());
            history.push_undo(command);
        }
        Err(e) => {
            warn!("Redo failed: {}", e);
            write_error.message = Some(e);
            history.push_redo(command);
        }
    }
}
