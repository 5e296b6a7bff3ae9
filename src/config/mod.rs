use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::calendar::WeekStart;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

fn default_true() -> bool {
    true
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigData {
    /// First column of the calendar grid
    #[serde(default)]
    pub week_start: WeekStart,

    /// Directory the backup file dialogs open in (remembered from the last export/import)
    #[serde(default)]
    pub backup_directory: Option<PathBuf>,

    /// Ask before deleting custom shift types and leave records
    #[serde(default = "default_true")]
    pub confirm_deletions: bool,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            week_start: WeekStart::default(),
            backup_directory: None,
            confirm_deletions: true,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: get_config_path(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to change the first day of the week
#[derive(Message)]
pub struct SetWeekStartRequest {
    pub week_start: WeekStart,
}

/// Message to remember the directory of the last backup file
#[derive(Message)]
pub struct SetBackupDirectoryRequest {
    pub path: PathBuf,
}

fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Result of loading config from disk
struct LoadConfigResult {
    data: AppConfigData,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Parse config file contents, falling back to defaults on error
fn parse_config(json: &str) -> LoadConfigResult {
    match serde_json::from_str(json) {
        Ok(data) => LoadConfigResult {
            data,
            reset_reason: None,
        },
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            LoadConfigResult {
                data: AppConfigData::default(),
                reset_reason: Some(format!("Configuration file was corrupted: {}", e)),
            }
        }
    }
}

/// Load configuration from disk
fn load_config(config_path: &std::path::Path) -> LoadConfigResult {
    if !config_path.exists() {
        info!("No config file found, using defaults");
        return LoadConfigResult {
            data: AppConfigData::default(),
            reset_reason: None,
        };
    }

    match std::fs::read_to_string(config_path) {
        Ok(json) => {
            let result = parse_config(&json);
            if result.reset_reason.is_none() {
                info!("Loaded config from {:?}", config_path);
            }
            result
        }
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            LoadConfigResult {
                data: AppConfigData::default(),
                reset_reason: Some(format!("Could not read configuration file: {}", e)),
            }
        }
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let config_path = get_config_path();
    let result = load_config(&config_path);
    config.data = result.data;
    config.config_path = config_path;
    config.dirty = false;

    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to change the first day of the week
fn set_week_start_system(
    mut events: MessageReader<SetWeekStartRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.week_start != event.week_start {
            config.data.week_start = event.week_start;
            config.dirty = true;
            save_events.write(SaveConfigRequest);
            info!("Week now starts on {}", event.week_start.label());
        }
    }
}

/// System to remember the backup directory
fn set_backup_directory_system(
    mut events: MessageReader<SetBackupDirectoryRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        let dir = if event.path.is_dir() {
            Some(event.path.clone())
        } else {
            event.path.parent().map(|p| p.to_path_buf())
        };
        if dir.is_some() && config.data.backup_directory != dir {
            config.data.backup_directory = dir;
            config.dirty = true;
            save_events.write(SaveConfigRequest);
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<SetWeekStartRequest>()
            .add_message::<SetBackupDirectoryRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    set_week_start_system.run_if(on_message::<SetWeekStartRequest>),
                    set_backup_directory_system.run_if(on_message::<SetBackupDirectoryRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert_eq!(data.week_start, WeekStart::Sunday);
        assert!(data.backup_directory.is_none());
        assert!(data.confirm_deletions);
    }

    #[test]
    fn test_app_config_data_serialization() {
        let data = AppConfigData {
            week_start: WeekStart::Monday,
            backup_directory: Some(PathBuf::from("/path/to/backups")),
            confirm_deletions: false,
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.week_start, data.week_start);
        assert_eq!(parsed.backup_directory, data.backup_directory);
        assert_eq!(parsed.confirm_deletions, data.confirm_deletions);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let result = parse_config("{}");
        assert!(result.reset_reason.is_none());
        assert_eq!(result.data.week_start, WeekStart::Sunday);
        assert!(result.data.confirm_deletions);
    }

    #[test]
    fn test_corrupt_config_resets_with_reason() {
        let result = parse_config("{ week_start: ");
        assert!(result.reset_reason.unwrap().contains("corrupted"));
        assert_eq!(result.data.week_start, WeekStart::Sunday);
    }

    #[test]
    fn test_config_reset_notification_default() {
        let notification = ConfigResetNotification::default();
        assert!(!notification.show);
        assert!(notification.reason.is_none());
    }
}
