//! A shift store wrapper that records successful writes into the history.

use super::command_history::{BatchCommand, CommandHistory};
use crate::shifts::{ShiftBatch, ShiftMap, ShiftStore};

/// Delegates to an inner store and pushes every successful batch onto the
/// undo stack. Failed writes leave the history untouched.
pub struct RecordingStore<'a> {
    inner: &'a mut dyn ShiftStore,
    history: &'a mut CommandHistory,
    label: &'static str,
}

impl<'a> RecordingStore<'a> {
    pub fn new(
        inner: &'a mut dyn ShiftStore,
        history: &'a mut CommandHistory,
        label: &'static str,
    ) -> Self {
        Self {
            inner,
            history,
            label,
        }
    }
}

impl ShiftStore for RecordingStore<'_> {
    fn read(&self) -> &ShiftMap {
        self.inner.read()
    }

    fn apply_batch(&mut self, batch: &ShiftBatch) -> Result<(), String> {
        let inverse = self.inner.read().inverse_of(batch);
        self.inner.apply_batch(batch)?;
        if inverse != *batch {
            self.history.push(BatchCommand {
                label: self.label,
                forward: batch.clone(),
                inverse,
            });
        }
        Ok(())
    }
}
