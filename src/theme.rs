//! Centralized color theme for the application.
//!
//! This module provides all colors used by the calendar UI.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

use crate::shifts::ColorTheme;

// ============================================================================
// Window
// ============================================================================

/// Clear color behind the egui panels
pub const WINDOW_BACKGROUND: Color = Color::srgb(0.11, 0.11, 0.13);

// ============================================================================
// Calendar Cells
// ============================================================================

/// Fill for days with no shift recorded
pub const EMPTY_CELL_FILL: egui::Color32 = egui::Color32::from_rgb(44, 46, 52);

/// Day number text color
pub const DAY_NUMBER_TEXT: egui::Color32 = egui::Color32::from_rgb(220, 220, 225);

/// Outline marking today
pub const TODAY_OUTLINE: egui::Color32 = egui::Color32::from_rgb(250, 250, 250);

/// Weekday header text for Saturday and Sunday
pub const WEEKEND_HEADER_TEXT: egui::Color32 = egui::Color32::from_rgb(239, 110, 110);

/// Weekday header text for working days
pub const WEEKDAY_HEADER_TEXT: egui::Color32 = egui::Color32::from_rgb(160, 160, 170);

// ============================================================================
// Selection Colors
// ============================================================================

/// Outline and tint for days inside the live selection
pub const SELECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(51, 153, 255);

/// Translucent overlay on selected days
pub const SELECTION_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(20, 60, 100, 90);

/// Outline for the copied source range while choosing a paste target
pub const COPY_SOURCE_OUTLINE: egui::Color32 = egui::Color32::from_rgb(120, 170, 220);

/// Outline on the days a paste would overwrite
pub const PASTE_PREVIEW_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 179, 51);

/// Translucent overlay on the paste preview span
pub const PASTE_PREVIEW_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(100, 70, 20, 90);

// ============================================================================
// Shift Colors
// ============================================================================

/// Cell fill for a shift color theme
pub fn shift_fill(theme: ColorTheme) -> egui::Color32 {
    match theme {
        ColorTheme::Amber => egui::Color32::from_rgb(180, 120, 20),
        ColorTheme::Blue => egui::Color32::from_rgb(37, 99, 200),
        ColorTheme::Purple => egui::Color32::from_rgb(120, 60, 190),
        ColorTheme::Emerald => egui::Color32::from_rgb(16, 150, 110),
        ColorTheme::Pink => egui::Color32::from_rgb(200, 60, 130),
        ColorTheme::Red => egui::Color32::from_rgb(200, 50, 50),
        ColorTheme::Teal => egui::Color32::from_rgb(20, 140, 150),
        ColorTheme::Gray => egui::Color32::from_rgb(100, 104, 112),
        ColorTheme::Orange => egui::Color32::from_rgb(220, 110, 30),
        ColorTheme::Indigo => egui::Color32::from_rgb(75, 70, 200),
    }
}

/// Label text drawn on top of a shift fill
pub fn shift_text(theme: ColorTheme) -> egui::Color32 {
    match theme {
        ColorTheme::Amber | ColorTheme::Orange => egui::Color32::from_rgb(30, 20, 5),
        _ => egui::Color32::WHITE,
    }
}
