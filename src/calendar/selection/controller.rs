//! The selection mode machine.

use bevy::prelude::*;

use crate::calendar::clipboard::{build_paste_batch, paste_span, ClipboardBuffer};
use crate::calendar::{DayId, DayRange};
use crate::shifts::{ShiftMap, ShiftStore, ShiftType};

/// Interaction mode. Exactly one is active and it decides which input matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Browsing; tapping a day opens the shift picker
    #[default]
    View,
    /// Copy requested, waiting for a press on the first day
    SelectStart,
    /// Drag in progress; the cursor follows the pointer
    Selecting,
    /// Drag released, waiting for confirm or reselect
    ConfirmCopy,
    /// Clipboard captured; taps pick the paste target
    PasteTarget,
}

impl Mode {
    pub fn hint(self) -> &'static str {
        match self {
            Mode::View => "Tap a day to set its shift",
            Mode::SelectStart => "Press on the first day and drag to the last",
            Mode::Selecting => "Release to finish the selection",
            Mode::ConfirmCopy => "Copy these days?",
            Mode::PasteTarget => "Tap the day where the pattern should start",
        }
    }
}

/// What a tap on a day did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    OpenPicker(DayId),
    TargetSet(DayId),
    Ignored,
}

/// Resource holding the mode and every piece of transient selection state.
///
/// Anchor and cursor describe the live range; the anchor is fixed when a drag
/// starts and only the cursor moves. Clipboard and paste target exist only in
/// paste targeting. `cancel` clears all of it in one step.
#[derive(Resource, Debug, Default)]
pub struct SelectionController {
    mode: Mode,
    anchor: Option<DayId>,
    cursor: Option<DayId>,
    dragging: bool,
    clipboard: ClipboardBuffer,
    paste_target: Option<DayId>,
}

impl SelectionController {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn anchor(&self) -> Option<DayId> {
        self.anchor
    }

    pub fn cursor(&self) -> Option<DayId> {
        self.cursor
    }

    /// The normalized live range, if both endpoints are recorded
    pub fn selection(&self) -> Option<DayRange> {
        Some(DayRange::normalize(self.anchor?, self.cursor?))
    }

    pub fn selected_count(&self) -> usize {
        self.selection().map(|r| r.count()).unwrap_or(0)
    }

    pub fn clipboard(&self) -> &ClipboardBuffer {
        &self.clipboard
    }

    pub fn paste_target(&self) -> Option<DayId> {
        self.paste_target
    }

    /// Days the next paste would overwrite
    pub fn paste_preview(&self) -> Option<DayRange> {
        paste_span(&self.clipboard, self.paste_target?)
    }

    /// VIEW -> SELECT_START
    pub fn start_copy(&mut self) -> bool {
        if self.mode != Mode::View {
            return false;
        }
        self.reset();
        self.mode = Mode::SelectStart;
        true
    }

    /// Press on a day. Starts a drag from SELECT_START, or restarts one from
    /// CONFIRM_COPY.
    pub fn pointer_down(&mut self, day: DayId) -> bool {
        if !matches!(self.mode, Mode::SelectStart | Mode::ConfirmCopy) {
            return false;
        }
        self.mode = Mode::Selecting;
        self.dragging = true;
        self.anchor = Some(day);
        self.cursor = Some(day);
        true
    }

    /// Pointer moved over `day` (None when over no cell).
    ///
    /// Only moves the cursor during an active drag, and only if it changed.
    pub fn pointer_move(&mut self, day: Option<DayId>) -> bool {
        if self.mode != Mode::Selecting || !self.dragging {
            return false;
        }
        match day {
            Some(day) if self.cursor != Some(day) => {
                self.cursor = Some(day);
                true
            }
            _ => false,
        }
    }

    /// Pointer released anywhere. Ends an active drag: SELECTING -> CONFIRM_COPY.
    pub fn release(&mut self) -> bool {
        if self.mode != Mode::Selecting || !self.dragging {
            return false;
        }
        self.dragging = false;
        self.mode = Mode::ConfirmCopy;
        true
    }

    /// Tap (click without drag) on a day
    pub fn tap(&mut self, day: DayId) -> TapOutcome {
        match self.mode {
            Mode::View => TapOutcome::OpenPicker(day),
            Mode::PasteTarget => {
                self.paste_target = Some(day);
                TapOutcome::TargetSet(day)
            }
            _ => TapOutcome::Ignored,
        }
    }

    /// CONFIRM_COPY -> SELECT_START, dropping the range
    pub fn reselect(&mut self) -> bool {
        if self.mode != Mode::ConfirmCopy {
            return false;
        }
        self.anchor = None;
        self.cursor = None;
        self.dragging = false;
        self.mode = Mode::SelectStart;
        true
    }

    /// CONFIRM_COPY -> PASTE_TARGET, capturing the range into the clipboard.
    ///
    /// Rejected unless a drag recorded both endpoints.
    pub fn confirm_copy(&mut self, shifts: &ShiftMap) -> bool {
        if self.mode != Mode::ConfirmCopy {
            return false;
        }
        let Some(range) = self.selection() else {
            return false;
        };
        self.clipboard = ClipboardBuffer::capture(range, shifts);
        self.paste_target = None;
        self.mode = Mode::PasteTarget;
        true
    }

    /// Write the clipboard at the paste target as one batch.
    ///
    /// Returns `Ok(false)` when there is nothing to paste. On success the
    /// target is cleared and the mode stays PASTE_TARGET so the pattern can be
    /// pasted again. On a store failure the clipboard and target are kept.
    pub fn paste(&mut self, store: &mut dyn ShiftStore) -> Result<bool, String> {
        if self.mode != Mode::PasteTarget {
            return Ok(false);
        }
        let Some(target) = self.paste_target else {
            return Ok(false);
        };
        let Some(batch) = build_paste_batch(&self.clipboard, target) else {
            return Ok(false);
        };
        store.apply_batch(&batch)?;
        self.paste_target = None;
        Ok(true)
    }

    /// PASTE_TARGET -> VIEW
    pub fn end(&mut self) -> bool {
        if self.mode != Mode::PasteTarget {
            return false;
        }
        self.reset();
        true
    }

    /// Cancel back to VIEW if the clipboard holds `shift`, so a deleted type
    /// can never be pasted back.
    pub fn forget_shift(&mut self, shift: &ShiftType) -> bool {
        if self.clipboard.contains(shift) {
            self.cancel()
        } else {
            false
        }
    }

    /// Any mode -> VIEW, discarding drag, range, clipboard and target together
    pub fn cancel(&mut self) -> bool {
        let was_active = self.mode != Mode::View;
        self.reset();
        was_active
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
