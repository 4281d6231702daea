//! # Settings
//!
//! User settings live in `stride.toml` inside the data directory:
//!
//! ```toml
//! distance_unit = "mile"
//! analytics_enabled = false
//! ```
//!
//! The data directory is resolved in this order: an explicit override,
//! the `STRIDE_DATA_DIR` environment variable, the platform data directory,
//! then `./.stride`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::units::DistanceUnit;

/// Settings file name inside the data directory
pub const SETTINGS_FILE: &str = "stride.toml";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "STRIDE_DATA_DIR";

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("run", "Stride", "stride"));

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Unit the pace calculator starts in
    pub distance_unit: DistanceUnit,

    /// Send analytics events to the log sink
    pub analytics_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            distance_unit: DistanceUnit::Km,
            analytics_enabled: true,
        }
    }
}

impl Settings {
    /// Load `stride.toml` from `data_dir`.
    ///
    /// An absent or unreadable file yields the defaults. Only a file that
    /// was read but does not parse is a `CalcError::ConfigError`.
    pub fn load(data_dir: &Path) -> CalcResult<Self> {
        let path = data_dir.join(SETTINGS_FILE);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "settings unreadable, using defaults");
                return Ok(Settings::default());
            }
        };
        Self::from_toml(&contents).map_err(|reason| CalcError::ConfigError {
            path: path.display().to_string(),
            reason,
        })
    }

    /// Parse settings from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    /// Write settings to `stride.toml` in `data_dir`.
    pub fn save(&self, data_dir: &Path) -> CalcResult<()> {
        let path = data_dir.join(SETTINGS_FILE);
        let contents = toml::to_string_pretty(self).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        fs::create_dir_all(data_dir)
            .and_then(|_| fs::write(&path, contents))
            .map_err(|e| CalcError::ConfigError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }
}

/// Resolve the data directory.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    PROJECT_DIRS
        .as_ref()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".stride"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.distance_unit, DistanceUnit::Km);
        assert!(settings.analytics_enabled);
    }

    #[test]
    fn test_partial_toml() {
        let settings = Settings::from_toml("distance_unit = \"mile\"").unwrap();
        assert_eq!(settings.distance_unit, DistanceUnit::Mile);
        assert!(settings.analytics_enabled);
    }

    #[test]
    fn test_malformed_toml() {
        assert!(Settings::from_toml("distance_unit = \"league\"").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load(dir.path()).unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            distance_unit: DistanceUnit::Mile,
            analytics_enabled: false,
        };
        settings.save(dir.path()).unwrap();
        assert_eq!(Settings::load(dir.path()).unwrap(), settings);
    }

    #[test]
    fn test_bad_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "analytics_enabled = 3").unwrap();
        assert_eq!(Settings::load(dir.path()).unwrap_err().error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_unreadable_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(Settings::load(dir.path()).unwrap(), Settings::default());
    }

    #[test]
    fn test_data_dir_under_a_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        assert_eq!(Settings::load(&blocker.join("sub")).unwrap(), Settings::default());
    }

    #[test]
    fn test_explicit_override_wins() {
        let dir = Path::new("/tmp/stride-override");
        assert_eq!(resolve_data_dir(Some(dir)), dir.to_path_buf());
    }
}
