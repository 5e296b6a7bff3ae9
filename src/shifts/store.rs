//! The shift store: the single write path for shift data.

use std::path::{Path, PathBuf};

use bevy::prelude::*;

use super::shift_map::{ShiftBatch, ShiftMap};

/// Read access to the current shift map plus atomic whole-batch writes.
///
/// `apply_batch` either lands every entry of the batch or none of them; a
/// successful call is visible to the very next `read`.
pub trait ShiftStore {
    fn read(&self) -> &ShiftMap;

    fn apply_batch(&mut self, batch: &ShiftBatch) -> Result<(), String>;
}

/// In-memory store with no backing file
#[derive(Debug, Default, Clone)]
pub struct MemoryShiftStore {
    map: ShiftMap,
}

impl MemoryShiftStore {
    pub fn new(map: ShiftMap) -> Self {
        Self { map }
    }
}

impl ShiftStore for MemoryShiftStore {
    fn read(&self) -> &ShiftMap {
        &self.map
    }

    fn apply_batch(&mut self, batch: &ShiftBatch) -> Result<(), String> {
        self.map = self.map.with_batch(batch);
        Ok(())
    }
}

/// Store persisted as a JSON object of `"YYYY-MM-DD": "SHIFT_KEY"` entries.
///
/// Each batch is written to a sibling temp file which then replaces the data
/// file. The in-memory map only changes once that write has succeeded.
#[derive(Debug)]
pub struct FileShiftStore {
    map: ShiftMap,
    path: PathBuf,
}

impl FileShiftStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, String> {
        let path = path.into();
        let map = if path.exists() {
            read_shift_file(&path)?
        } else {
            ShiftMap::new()
        };
        Ok(Self { map, path })
    }

    /// Store at `path` starting from an empty map, without touching the file
    pub fn empty_at(path: impl Into<PathBuf>) -> Self {
        Self {
            map: ShiftMap::new(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ShiftStore for FileShiftStore {
    fn read(&self) -> &ShiftMap {
        &self.map
    }

    fn apply_batch(&mut self, batch: &ShiftBatch) -> Result<(), String> {
        let next = self.map.with_batch(batch);
        write_shift_file(&self.path, &next)?;
        self.map = next;
        Ok(())
    }
}

fn read_shift_file(path: &Path) -> Result<ShiftMap, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read shift data: {}", e))?;
    serde_json::from_str(&json).map_err(|e| format!("Failed to parse shift data: {}", e))
}

fn write_shift_file(path: &Path, map: &ShiftMap) -> Result<(), String> {
    let json = serde_json::to_string_pretty(map)
        .map_err(|e| format!("Failed to serialize shift data: {}", e))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create data directory: {}", e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, json)
        .map_err(|e| format!("Failed to write shift data: {}", e))?;
    std::fs::rename(&temp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        format!("Failed to replace shift data file: {}", e)
    })
}

/// Resource owning the active shift store
#[derive(Resource)]
pub struct ShiftBook {
    store: Box<dyn ShiftStore + Send + Sync>,
}

impl Default for ShiftBook {
    fn default() -> Self {
        Self::new(MemoryShiftStore::default())
    }
}

impl ShiftBook {
    pub fn new(store: impl ShiftStore + Send + Sync + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub fn replace(&mut self, store: impl ShiftStore + Send + Sync + 'static) {
        self.store = Box::new(store);
    }
}

impl ShiftStore for ShiftBook {
    fn read(&self) -> &ShiftMap {
        self.store.read()
    }

    fn apply_batch(&mut self, batch: &ShiftBatch) -> Result<(), String> {
        if batch.is_empty() {
            return Ok(());
        }
        self.store.apply_batch(batch)?;
        debug!("Applied shift batch of {} day(s)", batch.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::DayId;
    use crate::shifts::ShiftType;

    fn day(s: &str) -> DayId {
        s.parse().unwrap()
    }

    #[test]
    fn test_memory_store_applies_batch() {
        let mut store = MemoryShiftStore::default();
        let mut batch = ShiftBatch::new();
        batch.set(day("2024-01-01"), ShiftType::Day);
        store.apply_batch(&batch).unwrap();
        assert_eq!(store.read().get(day("2024-01-01")), ShiftType::Day);
    }

    #[test]
    fn test_file_store_persists_and_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shifts.json");

        let mut store = FileShiftStore::open(&path).unwrap();
        assert!(store.read().is_empty());

        let mut batch = ShiftBatch::new();
        batch.set(day("2024-03-05"), ShiftType::Night);
        batch.set(day("2024-03-06"), ShiftType::from_key("CUSTOM_1"));
        store.apply_batch(&batch).unwrap();

        let reopened = FileShiftStore::open(&path).unwrap();
        assert_eq!(reopened.read(), store.read());
        assert_eq!(reopened.read().len(), 2);
    }

    #[test]
    fn test_file_store_keeps_map_when_write_fails() {
        // A directory where the data file should be makes the rename fail
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shifts.json");
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let mut store = FileShiftStore::empty_at(&path);
        let mut batch = ShiftBatch::new();
        batch.set(day("2024-03-05"), ShiftType::Night);

        assert!(store.apply_batch(&batch).is_err());
        assert!(store.read().is_empty());
    }

    #[test]
    fn test_open_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shifts.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = FileShiftStore::open(&path);
        assert!(result.unwrap_err().contains("Failed to parse"));
    }

    #[test]
    fn test_shift_book_skips_empty_batches() {
        let mut book = ShiftBook::default();
        book.apply_batch(&ShiftBatch::new()).unwrap();
        assert!(book.read().is_empty());
    }
}
