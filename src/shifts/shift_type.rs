//! Shift type tags.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Prefix for user-defined shift type keys
pub const CUSTOM_PREFIX: &str = "CUSTOM_";

/// What occupies a day: a work shift, a leave category, or nothing.
///
/// Built-in variants are a closed set; `Custom` carries the opaque key of a
/// user-defined type whose label and color live in the registry. Serialized
/// as its string key (`"DAY"`, `"CUSTOM_1712345678901"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShiftType {
    Day,
    Evening,
    Night,
    CompLeave,
    AnnualLeave,
    SickLeave,
    PersonalLeave,
    /// No shift recorded. Never stored in a shift map.
    Off,
    Custom(String),
}

impl ShiftType {
    /// All built-in variants in display order
    pub const BUILT_IN: [ShiftType; 8] = [
        ShiftType::Day,
        ShiftType::Evening,
        ShiftType::Night,
        ShiftType::CompLeave,
        ShiftType::AnnualLeave,
        ShiftType::SickLeave,
        ShiftType::PersonalLeave,
        ShiftType::Off,
    ];

    pub fn key(&self) -> &str {
        match self {
            ShiftType::Day => "DAY",
            ShiftType::Evening => "EVENING",
            ShiftType::Night => "NIGHT",
            ShiftType::CompLeave => "COMP_LEAVE",
            ShiftType::AnnualLeave => "ANNUAL_LEAVE",
            ShiftType::SickLeave => "SICK_LEAVE",
            ShiftType::PersonalLeave => "PERSONAL_LEAVE",
            ShiftType::Off => "OFF",
            ShiftType::Custom(key) => key,
        }
    }

    /// Resolve a key; anything that is not a built-in key becomes `Custom`
    pub fn from_key(key: &str) -> Self {
        Self::BUILT_IN
            .iter()
            .find(|t| t.key() == key)
            .cloned()
            .unwrap_or_else(|| ShiftType::Custom(key.to_string()))
    }

    /// A fresh custom key derived from a millisecond timestamp
    pub fn new_custom(timestamp_millis: i64) -> Self {
        ShiftType::Custom(format!("{}{}", CUSTOM_PREFIX, timestamp_millis))
    }

    pub fn is_off(&self) -> bool {
        matches!(self, ShiftType::Off)
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ShiftType::Custom(_))
    }

    /// Leave categories offered by the leave manager
    pub fn is_leave(&self) -> bool {
        matches!(
            self,
            ShiftType::CompLeave
                | ShiftType::AnnualLeave
                | ShiftType::SickLeave
                | ShiftType::PersonalLeave
        )
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for ShiftType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for ShiftType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(ShiftType::from_key(&key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_keys_round_trip() {
        for shift in ShiftType::BUILT_IN.iter() {
            assert_eq!(&ShiftType::from_key(shift.key()), shift);
        }
    }

    #[test]
    fn test_unknown_key_is_custom() {
        let shift = ShiftType::from_key("CUSTOM_42");
        assert_eq!(shift, ShiftType::Custom("CUSTOM_42".to_string()));
        assert!(shift.is_custom());
        assert!(!shift.is_off());
    }

    #[test]
    fn test_new_custom_uses_prefix() {
        assert_eq!(ShiftType::new_custom(1700000000000).key(), "CUSTOM_1700000000000");
    }

    #[test]
    fn test_serializes_as_key_string() {
        let json = serde_json::to_string(&vec![ShiftType::Night, ShiftType::from_key("CUSTOM_7")])
            .unwrap();
        assert_eq!(json, r#"["NIGHT","CUSTOM_7"]"#);
        let parsed: Vec<ShiftType> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![ShiftType::Night, ShiftType::from_key("CUSTOM_7")]);
    }

    #[test]
    fn test_leave_categories() {
        assert!(ShiftType::SickLeave.is_leave());
        assert!(!ShiftType::Day.is_leave());
        assert!(!ShiftType::Off.is_leave());
    }
}
