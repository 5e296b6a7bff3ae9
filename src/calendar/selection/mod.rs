//! Range selection and the copy/paste mode machine.
//!
//! The [`SelectionController`] turns pointer and button input into a
//! normalized day range, captures that range's shift pattern and replays it
//! onto target days. Input reaches it as messages written by the calendar
//! grid and the action bar, so every transition happens in one system,
//! [`drive_selection`], in the order the input arrived.
//!
//! ## Module Structure
//!
//! - [`controller`] - Mode enum and SelectionController resource
//! - [`hit_testing`] - RenderedGrid: pointer position to day lookup
//! - [`systems`] - Input messages, the driving system, global release and shortcuts
//!
//! ## Key Types
//!
//! - [`Mode`]: VIEW, SELECT_START, SELECTING, CONFIRM_COPY, PASTE_TARGET
//! - [`SelectionController`]: Mode plus anchor, cursor, clipboard and paste target
//! - [`PointerInput`] / [`SelectionCommand`]: Input messages
//! - [`ModeChanged`]: Emitted for every transition

mod controller;
mod hit_testing;
mod systems;


pub use controller::{Mode, SelectionController, TapOutcome};
pub use hit_testing::RenderedGrid;
pub use systems::{
    drive_selection, release_on_global_pointer_up, selection_shortcuts, ModeChanged,
    OpenDayPickerRequest, PointerInput, SelectionCommand,
};
