//! Sparse day-to-shift mapping and the batches that change it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::shift_type::ShiftType;
use crate::calendar::{DayId, DayRange};

/// One entry of a batch write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftUpdate {
    Set(ShiftType),
    /// Remove the day's entry (the day reads as OFF afterwards)
    Clear,
}

impl ShiftUpdate {
    /// OFF is expressed as a clear so the map stays sparse
    pub fn from_shift(shift: ShiftType) -> Self {
        if shift.is_off() {
            ShiftUpdate::Clear
        } else {
            ShiftUpdate::Set(shift)
        }
    }

    /// The value a day reads as after this update
    pub fn resulting_shift(&self) -> ShiftType {
        match self {
            ShiftUpdate::Set(shift) => shift.clone(),
            ShiftUpdate::Clear => ShiftType::Off,
        }
    }
}

/// A set of independent per-day writes applied together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftBatch {
    updates: BTreeMap<DayId, ShiftUpdate>,
}

impl ShiftBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a shift for a day. Setting OFF queues a clear.
    pub fn set(&mut self, day: DayId, shift: ShiftType) {
        self.updates.insert(day, ShiftUpdate::from_shift(shift));
    }

    pub fn clear(&mut self, day: DayId) {
        self.updates.insert(day, ShiftUpdate::Clear);
    }

    /// Write one shift across every day of a range
    pub fn fill(range: DayRange, shift: &ShiftType) -> Self {
        let mut batch = Self::new();
        for day in range.days() {
            batch.set(day, shift.clone());
        }
        batch
    }

    pub fn get(&self, day: DayId) -> Option<&ShiftUpdate> {
        self.updates.get(&day)
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DayId, &ShiftUpdate)> {
        self.updates.iter()
    }

    /// Whether any update in the batch writes `shift`
    pub fn mentions(&self, shift: &ShiftType) -> bool {
        self.updates
            .values()
            .any(|update| matches!(update, ShiftUpdate::Set(s) if s == shift))
    }
}

impl FromIterator<(DayId, ShiftUpdate)> for ShiftBatch {
    fn from_iter<I: IntoIterator<Item = (DayId, ShiftUpdate)>>(iter: I) -> Self {
        let mut batch = Self::new();
        for (day, update) in iter {
            match update {
                ShiftUpdate::Set(shift) => batch.set(day, shift),
                ShiftUpdate::Clear => batch.clear(day),
            }
        }
        batch
    }
}

/// Day to shift mapping. Absent days read as OFF; OFF is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<DayId, ShiftType>",
    into = "BTreeMap<DayId, ShiftType>"
)]
pub struct ShiftMap {
    entries: BTreeMap<DayId, ShiftType>,
}

impl ShiftMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shift recorded for a day, OFF when absent
    pub fn get(&self, day: DayId) -> ShiftType {
        self.entries.get(&day).cloned().unwrap_or(ShiftType::Off)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DayId, &ShiftType)> {
        self.entries.iter()
    }

    /// A new map equal to this one with the batch applied
    pub fn with_batch(&self, batch: &ShiftBatch) -> ShiftMap {
        let mut entries = self.entries.clone();
        for (day, update) in batch.iter() {
            match update {
                ShiftUpdate::Set(shift) if !shift.is_off() => {
                    entries.insert(*day, shift.clone());
                }
                _ => {
                    entries.remove(day);
                }
            }
        }
        ShiftMap { entries }
    }

    /// The batch that restores this map's values for every day the given batch touches
    pub fn inverse_of(&self, batch: &ShiftBatch) -> ShiftBatch {
        batch
            .iter()
            .map(|(day, _)| (*day, ShiftUpdate::from_shift(self.get(*day))))
            .collect()
    }

    /// The smallest batch that turns this map into `target`
    pub fn diff_to(&self, target: &ShiftMap) -> ShiftBatch {
        let mut batch = ShiftBatch::new();
        for (day, shift) in self.entries.iter() {
            if target.entries.get(day) != Some(shift) {
                batch.set(*day, target.get(*day));
            }
        }
        for (day, shift) in target.entries.iter() {
            if !self.entries.contains_key(day) {
                batch.set(*day, shift.clone());
            }
        }
        batch
    }

    /// Days currently holding the given shift type
    pub fn days_with(&self, shift: &ShiftType) -> Vec<DayId> {
        self.entries
            .iter()
            .filter(|(_, s)| *s == shift)
            .map(|(day, _)| *day)
            .collect()
    }
}

impl FromIterator<(DayId, ShiftType)> for ShiftMap {
    fn from_iter<I: IntoIterator<Item = (DayId, ShiftType)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .filter(|(_, shift)| !shift.is_off())
            .collect();
        ShiftMap { entries }
    }
}

impl From<BTreeMap<DayId, ShiftType>> for ShiftMap {
    fn from(entries: BTreeMap<DayId, ShiftType>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<ShiftMap> for BTreeMap<DayId, ShiftType> {
    fn from(map: ShiftMap) -> Self {
        map.entries
    }
}
