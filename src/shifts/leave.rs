//! Leave records: named leave applications spanning a range of days.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::shift_map::ShiftBatch;
use super::shift_type::ShiftType;
use crate::calendar::{DayId, DayRange};

/// A leave application over an inclusive range of days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
    pub start_date: DayId,
    pub end_date: DayId,
    /// Inclusive day count
    pub duration: usize,
    #[serde(default)]
    pub note: String,
    /// Creation time in milliseconds since the Unix epoch
    pub created_at: i64,
}

impl LeaveRecord {
    pub fn new(
        shift_type: ShiftType,
        start_date: DayId,
        end_date: DayId,
        note: impl Into<String>,
        created_at: i64,
    ) -> Result<Self, String> {
        if start_date > end_date {
            return Err("End date cannot be earlier than start date".to_string());
        }
        if shift_type.is_off() {
            return Err("A leave record needs a shift type".to_string());
        }
        let range = DayRange::normalize(start_date, end_date);
        Ok(Self {
            id: created_at.to_string(),
            shift_type,
            start_date,
            end_date,
            duration: range.count(),
            note: note.into(),
            created_at,
        })
    }

    pub fn range(&self) -> DayRange {
        DayRange::normalize(self.start_date, self.end_date)
    }

    /// The batch writing this leave's type across its whole range
    pub fn batch(&self) -> ShiftBatch {
        ShiftBatch::fill(self.range(), &self.shift_type)
    }

    /// "2024-01-30" for single days, "2024-01-30 ~ 2024-02-02" otherwise
    pub fn range_label(&self) -> String {
        if self.start_date == self.end_date {
            self.start_date.to_string()
        } else {
            format!("{} ~ {}", self.start_date, self.end_date)
        }
    }
}

/// All recorded leave applications, newest first
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaveRecords {
    records: Vec<LeaveRecord>,
}

impl LeaveRecords {
    pub fn add(&mut self, mut record: LeaveRecord) {
        while self.records.iter().any(|r| r.id == record.id) {
            record.id.push('_');
        }
        self.records.insert(0, record);
    }

    /// Remove a record. Shifts it wrote are left in place.
    pub fn remove(&mut self, id: &str) -> Option<LeaveRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LeaveRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total leave days per type
    pub fn total_days(&self, shift_type: &ShiftType) -> usize {
        self.records
            .iter()
            .filter(|r| &r.shift_type == shift_type)
            .map(|r| r.duration)
            .sum()
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read leave records: {}", e))?;
        serde_json::from_str(&json).map_err(|e| format!("Failed to parse leave records: {}", e))
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize leave records: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write leave records: {}", e))
    }
}
