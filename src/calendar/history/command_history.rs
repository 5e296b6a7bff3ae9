//! Command history resource for tracking undo/redo state.

use bevy::prelude::*;

use super::MAX_HISTORY_SIZE;
use crate::shifts::{ShiftBatch, ShiftType};

/// A recorded write and the batch that reverses it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchCommand {
    /// Short description for menus ("Paste", "Leave", ...)
    pub label: &'static str,
    pub forward: ShiftBatch,
    pub inverse: ShiftBatch,
}

impl BatchCommand {
    /// Whether undoing or redoing this command would write `shift`
    pub fn mentions(&self, shift: &ShiftType) -> bool {
        self.forward.mentions(shift) || self.inverse.mentions(shift)
    }
}

/// Resource tracking command history for undo/redo
#[derive(Resource, Default)]
pub struct CommandHistory {
    /// Stack of commands that can be undone (most recent last)
    undo_stack: Vec<BatchCommand>,
    /// Stack of commands that can be redone (most recent last)
    redo_stack: Vec<BatchCommand>,
}

impl CommandHistory {
    /// Push a new command to the history
    pub fn push(&mut self, command: BatchCommand) {
        // A new edit invalidates anything that was undone
        self.redo_stack.clear();

        self.undo_stack.push(command);

        while self.undo_stack.len() > MAX_HISTORY_SIZE {
            self.undo_stack.remove(0);
        }
    }

    pub fn pop_undo(&mut self) -> Option<BatchCommand> {
        self.undo_stack.pop()
    }

    pub fn pop_redo(&mut self) -> Option<BatchCommand> {
        self.redo_stack.pop()
    }

    /// Push a command to the redo stack (used after undo)
    pub fn push_redo(&mut self, command: BatchCommand) {
        self.redo_stack.push(command);
    }

    /// Push a command to the undo stack (used after redo)
    pub fn push_undo(&mut self, command: BatchCommand) {
        self.undo_stack.push(command);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Label of the command the next undo would revert
    pub fn next_undo_label(&self) -> Option<&'static str> {
        self.undo_stack.last().map(|c| c.label)
    }

    /// Label of the command the next redo would reapply
    pub fn next_redo_label(&self) -> Option<&'static str> {
        self.redo_stack.last().map(|c| c.label)
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop every command that would write `shift` back (the type was deleted).
    /// Returns how many were dropped.
    pub fn forget_shift(&mut self, shift: &ShiftType) -> usize {
        let before = self.undo_stack.len() + self.redo_stack.len();
        self.undo_stack.retain(|c| !c.mentions(shift));
        self.redo_stack.retain(|c| !c.mentions(shift));
        before - self.undo_stack.len() - self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
