//! Positional clipboard for shift patterns.
//!
//! A copy captures the shift of every day in a normalized range, in calendar
//! order, into a [`ClipboardBuffer`]. A paste replays that buffer onto a target
//! day: position `i` lands on `target + i` days. OFF positions become clears
//! so the shift map stays sparse.
//!
//! ## Module Structure
//!
//! - [`types`] - ClipboardBuffer
//! - [`copy`] - Capturing a range from the shift map
//! - [`paste`] - Building the paste batch and its preview span
//!
//! ## Key Types
//!
//! - [`ClipboardBuffer`]: Ordered shift values sized to the copied range

mod copy;
mod paste;
mod tests;
mod types;

pub use paste::{build_paste_batch, paste_span};
pub use types::ClipboardBuffer;
