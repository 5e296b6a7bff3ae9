//! Full-data backup bundles exported to and restored from JSON files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::leave::LeaveRecords;
use super::registry::ShiftRegistry;
use super::shift_map::ShiftMap;

/// Backup format version written by this build
pub const BACKUP_VERSION: &str = "1.0";

/// Everything needed to restore the calendar on another machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupData {
    pub version: String,
    /// Export time in milliseconds since the Unix epoch
    pub timestamp: i64,
    pub shifts: ShiftMap,
    #[serde(default)]
    pub configs: ShiftRegistry,
    #[serde(default)]
    pub leaves: LeaveRecords,
}

impl BackupData {
    pub fn new(
        shifts: ShiftMap,
        configs: ShiftRegistry,
        leaves: LeaveRecords,
        timestamp: i64,
    ) -> Self {
        Self {
            version: BACKUP_VERSION.to_string(),
            timestamp,
            shifts,
            configs,
            leaves,
        }
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize backup: {}", e))
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let data: BackupData =
            serde_json::from_str(json).map_err(|e| format!("Invalid backup file: {}", e))?;
        let major = data.version.split('.').next().unwrap_or_default();
        if major != "1" {
            return Err(format!("Unsupported backup version {}", data.version));
        }
        Ok(data)
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write backup: {}", e))
    }

    pub fn read(path: &Path) -> Result<Self, String> {
        let json =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read backup: {}", e))?;
        Self::from_json(&json)
    }

    /// Suggested file name such as `shiftmaster-backup-2024-03-05.json`
    pub fn default_file_name(today: crate::calendar::DayId) -> String {
        format!("shiftmaster-backup-{}.json", today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DayId;
    use crate::shifts::{ColorTheme, LeaveRecord, ShiftConfig, ShiftType};

    fn day(s: &str) -> DayId {
        s.parse().unwrap()
    }

    fn sample() -> BackupData {
        let mut configs = ShiftRegistry::default();
        let custom = configs.add_custom(ShiftConfig::new("Course", ColorTheme::Teal), 77);
        let shifts: ShiftMap = [
            (day("2024-03-05"), ShiftType::Day),
            (day("2024-03-06"), custom),
        ]
        .into_iter()
        .collect();
        let mut leaves = LeaveRecords::default();
        leaves.add(
            LeaveRecord::new(ShiftType::AnnualLeave, day("2024-04-01"), day("2024-04-03"), "", 5)
                .unwrap(),
        );
        BackupData::new(shifts, configs, leaves, 1_710_000_000_000)
    }

    #[test]
    fn test_backup_survives_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");
        let data = sample();
        data.write(&path).unwrap();
        let restored = BackupData::read(&path).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn test_rejects_future_major_version() {
        let mut data = sample();
        data.version = "2.0".to_string();
        let json = data.to_json().unwrap();
        assert!(BackupData::from_json(&json).unwrap_err().contains("Unsupported"));
    }

    #[test]
    fn test_minimal_backup_defaults_optional_sections() {
        let json = r#"{"version":"1.0","timestamp":1,"shifts":{"2024-01-01":"NIGHT"}}"#;
        let data = BackupData::from_json(json).unwrap();
        assert_eq!(data.shifts.get(day("2024-01-01")), ShiftType::Night);
        assert!(data.leaves.is_empty());
        assert_eq!(data.configs, ShiftRegistry::default());
    }

    #[test]
    fn test_backup_shift_count_ignores_off_entries() {
        let json = r#"{"version":"1.0","timestamp":1,"shifts":{"2024-01-01":"NIGHT","2024-01-02":"OFF"}}"#;
        let data = BackupData::from_json(json).unwrap();
        assert_eq!(data.shifts.len(), 1);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(BackupData::from_json("[]").is_err());
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(
            BackupData::default_file_name(day("2024-03-05")),
            "shiftmaster-backup-2024-03-05.json"
        );
    }
}
