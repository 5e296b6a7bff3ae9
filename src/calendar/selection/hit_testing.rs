//! Pointer position to day lookup against the cells drawn last frame.

use bevy::prelude::*;

use crate::calendar::DayId;

/// Screen rectangles of the day cells in the most recently rendered grid.
///
/// The grid repopulates this every frame, so lookups follow whatever layout
/// and cell size were actually drawn.
#[derive(Resource, Debug, Default)]
pub struct RenderedGrid {
    cells: Vec<(Rect, DayId)>,
}

impl RenderedGrid {
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn push(&mut self, rect: Rect, day: DayId) {
        self.cells.push((rect, day));
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The day whose cell contains `pos`, if any
    pub fn day_at(&self, pos: Vec2) -> Option<DayId> {
        self.cells
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, day)| *day)
    }
}
