//! Display configuration (label and color) for each shift type.

use std::collections::BTreeMap;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::shift_map::{ShiftBatch, ShiftMap};
use super::shift_type::ShiftType;

/// Named color palette entries a shift type can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    Amber,
    #[default]
    Blue,
    Purple,
    Emerald,
    Pink,
    Red,
    Teal,
    Gray,
    Orange,
    Indigo,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 10] = [
        ColorTheme::Amber,
        ColorTheme::Blue,
        ColorTheme::Purple,
        ColorTheme::Emerald,
        ColorTheme::Pink,
        ColorTheme::Red,
        ColorTheme::Teal,
        ColorTheme::Gray,
        ColorTheme::Orange,
        ColorTheme::Indigo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Amber => "Amber",
            ColorTheme::Blue => "Blue",
            ColorTheme::Purple => "Purple",
            ColorTheme::Emerald => "Emerald",
            ColorTheme::Pink => "Pink",
            ColorTheme::Red => "Red",
            ColorTheme::Teal => "Teal",
            ColorTheme::Gray => "Gray",
            ColorTheme::Orange => "Orange",
            ColorTheme::Indigo => "Indigo",
        }
    }
}

/// Presentation data for one shift type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftConfig {
    pub label: String,
    pub color: ColorTheme,
}

impl ShiftConfig {
    pub fn new(label: impl Into<String>, color: ColorTheme) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }

    /// Factory default for a built-in type, None for custom types
    pub fn default_for(shift: &ShiftType) -> Option<Self> {
        let config = match shift {
            ShiftType::Day => Self::new("Day", ColorTheme::Amber),
            ShiftType::Evening => Self::new("Evening", ColorTheme::Blue),
            ShiftType::Night => Self::new("Night", ColorTheme::Purple),
            ShiftType::CompLeave => Self::new("Comp leave", ColorTheme::Emerald),
            ShiftType::AnnualLeave => Self::new("Annual leave", ColorTheme::Pink),
            ShiftType::SickLeave => Self::new("Sick leave", ColorTheme::Red),
            ShiftType::PersonalLeave => Self::new("Personal leave", ColorTheme::Teal),
            ShiftType::Off => Self::new("Clear", ColorTheme::Gray),
            ShiftType::Custom(_) => return None,
        };
        Some(config)
    }
}

/// Registry of shift type configurations, keyed by shift type.
///
/// Built-in types are always present. Custom types can be added and removed;
/// a type without an entry resolves to its raw key in gray.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftRegistry {
    configs: BTreeMap<ShiftType, ShiftConfig>,
}

impl Default for ShiftRegistry {
    fn default() -> Self {
        let configs = ShiftType::BUILT_IN
            .iter()
            .filter_map(|shift| ShiftConfig::default_for(shift).map(|c| (shift.clone(), c)))
            .collect();
        Self { configs }
    }
}

impl ShiftRegistry {
    pub fn get(&self, shift: &ShiftType) -> Option<&ShiftConfig> {
        self.configs.get(shift)
    }

    pub fn label<'a>(&'a self, shift: &'a ShiftType) -> &'a str {
        self.configs
            .get(shift)
            .map(|c| c.label.as_str())
            .unwrap_or_else(|| shift.key())
    }

    pub fn color(&self, shift: &ShiftType) -> ColorTheme {
        self.configs
            .get(shift)
            .map(|c| c.color)
            .unwrap_or(ColorTheme::Gray)
    }

    /// Every assignable type (everything except OFF) in display order
    pub fn assignable(&self) -> impl Iterator<Item = (&ShiftType, &ShiftConfig)> {
        self.configs.iter().filter(|(shift, _)| !shift.is_off())
    }

    /// Register a new custom type and return its key
    pub fn add_custom(&mut self, config: ShiftConfig, timestamp_millis: i64) -> ShiftType {
        let mut stamp = timestamp_millis;
        let mut shift = ShiftType::new_custom(stamp);
        while self.configs.contains_key(&shift) {
            stamp += 1;
            shift = ShiftType::new_custom(stamp);
        }
        self.configs.insert(shift.clone(), config);
        shift
    }

    pub fn update(&mut self, shift: ShiftType, config: ShiftConfig) {
        self.configs.insert(shift, config);
    }

    /// Restore a built-in type's factory label and color
    pub fn reset(&mut self, shift: &ShiftType) -> bool {
        match ShiftConfig::default_for(shift) {
            Some(config) => {
                self.configs.insert(shift.clone(), config);
                true
            }
            None => false,
        }
    }

    /// The batch that clears every day using a custom type about to be removed
    pub fn removal_batch(&self, shift: &ShiftType, shifts: &ShiftMap) -> Result<ShiftBatch, String> {
        if !shift.is_custom() {
            return Err(format!("Built-in shift type {} cannot be deleted", shift));
        }
        if !self.configs.contains_key(shift) {
            return Err(format!("Unknown shift type {}", shift));
        }
        let mut batch = ShiftBatch::new();
        for day in shifts.days_with(shift) {
            batch.clear(day);
        }
        Ok(batch)
    }

    pub fn remove(&mut self, shift: &ShiftType) -> Option<ShiftConfig> {
        if shift.is_custom() {
            self.configs.remove(shift)
        } else {
            None
        }
    }

    /// Fill in any built-in types missing from a loaded registry
    fn with_missing_defaults(mut self) -> Self {
        for (shift, config) in ShiftRegistry::default().configs {
            self.configs.entry(shift).or_insert(config);
        }
        self
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read shift types: {}", e))?;
        let registry: ShiftRegistry = serde_json::from_str(&json)
            .map_err(|e| format!("Failed to parse shift types: {}", e))?;
        Ok(registry.with_missing_defaults())
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize shift types: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write shift types: {}", e))
    }

    /// Replace the whole registry (backup restore), keeping built-ins present
    pub fn restore(&mut self, other: ShiftRegistry) {
        *self = other.with_missing_defaults();
    }
}
