//! Centralized path resolution for platform-appropriate user data directories.
//!
//! In development mode (cargo run), paths resolve to a local `.shiftmaster-dev/` directory.
//! In installed mode, paths resolve to platform-specific locations:
//! - Windows: `%APPDATA%\Shiftmaster\`
//! - macOS: `~/Library/Application Support/Shiftmaster/`
//! - Linux: `~/.config/shiftmaster/` (config), `~/.local/share/shiftmaster/` (data)

use std::path::PathBuf;

/// Local directory used instead of the platform directories during development
const DEV_DIR: &str = ".shiftmaster-dev";

/// Returns true when running in development mode (cargo run).
///
/// Detection methods:
/// - `CARGO` env var is set (cargo run sets this)
/// - Debug assertions enabled (debug builds)
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Platform-appropriate config directory.
///
/// - Dev mode: `./.shiftmaster-dev/`
/// - Linux: `~/.config/shiftmaster/`
/// - Windows/macOS: same as data_dir
pub fn config_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from(DEV_DIR));
    }

    #[cfg(target_os = "linux")]
    {
        dirs::config_dir().map(|p| p.join("shiftmaster"))
    }

    #[cfg(not(target_os = "linux"))]
    {
        data_dir()
    }
}

/// Platform-appropriate data directory.
///
/// - Dev mode: `./.shiftmaster-dev/`
/// - Windows: `%APPDATA%\Shiftmaster\`
/// - macOS: `~/Library/Application Support/Shiftmaster/`
/// - Linux: `~/.local/share/shiftmaster/`
pub fn data_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from(DEV_DIR));
    }

    #[cfg(target_os = "linux")]
    {
        dirs::data_dir().map(|p| p.join("shiftmaster"))
    }

    #[cfg(not(target_os = "linux"))]
    {
        dirs::data_dir().map(|p| p.join("Shiftmaster"))
    }
}

/// Path to the config file: `{config_dir}/config.json`
pub fn config_file() -> PathBuf {
    config_dir()
        .map(|p| p.join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}

fn data_file(name: &str) -> PathBuf {
    data_dir()
        .map(|p| p.join(name))
        .unwrap_or_else(|| PathBuf::from(name))
}

/// Path to the shift map: `{data_dir}/shifts.json`
pub fn shifts_file() -> PathBuf {
    data_file("shifts.json")
}

/// Path to the shift type registry: `{data_dir}/shift_types.json`
pub fn shift_types_file() -> PathBuf {
    data_file("shift_types.json")
}

/// Path to the leave records: `{data_dir}/leaves.json`
pub fn leaves_file() -> PathBuf {
    data_file("leaves.json")
}

/// Path to the logs directory: `{data_dir}/logs/`
pub fn logs_dir() -> PathBuf {
    data_dir()
        .map(|p| p.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Default directory for backup file dialogs
pub fn default_backup_dir() -> Option<PathBuf> {
    dirs::document_dir().or_else(dirs::home_dir)
}

/// Ensure all required directories exist.
///
/// Called early in startup, before logging and config loading.
pub fn ensure_directories() -> std::io::Result<()> {
    if let Some(config) = config_dir() {
        std::fs::create_dir_all(&config)?;
    }
    if let Some(data) = data_dir() {
        std::fs::create_dir_all(&data)?;
    }
    std::fs::create_dir_all(logs_dir())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_not_none() {
        // In test mode (debug), should return Some
        assert!(config_dir().is_some());
    }

    #[test]
    fn test_data_dir_not_none() {
        assert!(data_dir().is_some());
    }

    #[test]
    fn test_config_file_has_json_extension() {
        let path = config_file();
        assert!(path.to_string_lossy().ends_with("config.json"));
    }

    #[test]
    fn test_dev_mode_returns_local_paths() {
        // In tests, is_dev_mode() should be true due to debug_assertions
        assert!(is_dev_mode());
        assert_eq!(config_dir(), Some(PathBuf::from(DEV_DIR)));
        assert_eq!(data_dir(), Some(PathBuf::from(DEV_DIR)));
    }

    #[test]
    fn test_data_files_live_in_data_dir() {
        let data = data_dir().unwrap();
        assert_eq!(shifts_file(), data.join("shifts.json"));
        assert_eq!(shift_types_file(), data.join("shift_types.json"));
        assert_eq!(leaves_file(), data.join("leaves.json"));
        assert_eq!(logs_dir(), data.join("logs"));
    }
}
