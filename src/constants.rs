//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 960.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 820.0;

/// Columns in the calendar grid
pub const DAYS_PER_WEEK: u32 = 7;

/// Gap between calendar cells in points
pub const CELL_SPACING: f32 = 4.0;

/// Smallest cell edge the grid will shrink to
pub const MIN_CELL_SIZE: f32 = 36.0;

/// Height of the weekday header row
pub const WEEKDAY_HEADER_HEIGHT: f32 = 22.0;

/// Corner radius of calendar cells
pub const CELL_CORNER_RADIUS: u8 = 6;
