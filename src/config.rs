//! JSON configuration for the platform layer.
//!
//! Missing fields fall back to their defaults, so a partial file (or none at
//! all, through [`PlatformConfig::load_or_default`]) is always usable.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PlatformResult;
use crate::window::{FSize, Point, Size, WindowInfo};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
    /// Directory for the rolling log file. Logs go to stderr when unset.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: String::from("strata=info"),
            directory: None,
            file_prefix: String::from("strata.log"),
        }
    }
}

/// A display exposed by the headless backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    pub name: String,
    pub position: Point,
    /// Millimetres.
    pub physical_size: Size,
    pub resolution: Size,
    pub work_area: Size,
    pub content_scale: FSize,
    pub refresh_rate: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            name: String::from("Headless Display"),
            position: Point::new(0, 0),
            physical_size: Size::new(527, 296),
            resolution: Size::new(1920, 1080),
            work_area: Size::new(1920, 1040),
            content_scale: FSize::new(1.0, 1.0),
            refresh_rate: 60,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlatformConfig {
    pub logging: LoggingConfig,
    /// Window created by default.
    pub window: WindowInfo,
    /// The first entry is the primary monitor.
    pub monitors: Vec<MonitorConfig>,
    /// Scancode to key name, used for layout-aware key translation.
    pub key_names: BTreeMap<i32, String>,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            window: WindowInfo::default(),
            monitors: vec![MonitorConfig::default()],
            key_names: BTreeMap::new(),
        }
    }
}

impl PlatformConfig {
    pub fn load(path: &Path) -> PlatformResult<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Like [`load`](Self::load), but a missing file is `Ok(None)` rather
    /// than an error.
    pub fn try_load(path: &Path) -> PlatformResult<Option<Self>> {
        match Self::load(path) {
            Ok(config) => Ok(Some(config)),
            Err(crate::PlatformError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Loads `path`, returning defaults if it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                Self::default()
            }
        }
    }

    /// Writes pretty JSON to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> PlatformResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_one_primary_monitor() {
        let config = PlatformConfig::default();
        assert_eq!(config.monitors.len(), 1);
        assert_eq!(config.monitors[0].resolution, Size::new(1920, 1080));
    }

    #[test]
    fn key_names_use_string_keys_in_json() {
        let mut config = PlatformConfig::default();
        config.key_names.insert(38, "q".into());
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""38":"q""#));
        let back: PlatformConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.key_names.get(&38).map(String::as_str), Some("q"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: PlatformConfig =
            serde_json::from_str(r#"{"logging":{"filter":"debug"}}"#).unwrap();
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.logging.file_prefix, "strata.log");
        assert_eq!(config.window, WindowInfo::default());
    }
}
