//! Undo/Redo for shift edits.
//!
//! Every successful batch write made through a [`RecordingStore`] is recorded
//! together with the batch that reverses it, computed from the shift map just
//! before the write. Undo and redo replay those batches through the same
//! single write path as any other edit.
//!
//! ## Usage
//!
//! - **Ctrl+Z**: Undo the last edit
//! - **Ctrl+Y** or **Ctrl+Shift+Z**: Redo the last undone edit
//!
//! ## Module Structure
//!
//! - [`command_history`] - CommandHistory resource and BatchCommand
//! - [`recording`] - ShiftStore decorator that records writes
//! - [`systems`] - Keyboard shortcuts and undo/redo requests

mod command_history;
mod recording;
mod systems;

#[cfg(test)]
mod tests;

pub use command_history::{BatchCommand, CommandHistory};
pub use recording::RecordingStore;
pub use systems::{handle_redo, handle_undo, RedoRequest, UndoRequest};

/// Maximum number of commands to keep in history
pub(crate) const MAX_HISTORY_SIZE: usize = 100;
