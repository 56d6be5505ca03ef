//! Configuration management
//!
//! Config file is stored next to the executable as `config.toml` unless a
//! path is given explicitly. Every section and field is optional; anything
//! missing falls back to its default.

use crate::codec::{FrameLayout, Integrity};
use crate::constants::{DEFAULT_BAUD_RATE, DEFAULT_WINDOW};
use crate::error::{GrapherError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Application Configuration
// =============================================================================

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub serial: SerialConfig,
    pub frame: FrameConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Serial port name (empty = must be given on the command line)
    pub port: String,
    /// Line speed; the port is always opened 8N1
    pub baud_rate: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Secondary field width, must match the device firmware
    pub layout: FrameLayout,
    /// Integrity check applied before a frame is accepted
    pub integrity: Integrity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Samples kept per channel
    pub window: usize,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}

impl Config {
    /// Check values serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.display.window == 0 {
            return Err(GrapherError::ConfigValidation {
                field: "display.window",
                reason: "must be at least 1".into(),
            });
        }
        if self.serial.baud_rate == 0 {
            return Err(GrapherError::ConfigValidation {
                field: "serial.baud_rate",
                reason: "must be greater than 0".into(),
            });
        }
        Ok(())
    }

    /// Configured port, if any
    pub fn port(&self) -> Option<&str> {
        let port = self.serial.port.trim();
        (!port.is_empty()).then_some(port)
    }
}

/// Default config file path (next to the executable)
pub fn default_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| GrapherError::Io {
        path: PathBuf::from("executable"),
        source: e,
    })?;
    let exe_dir = exe.parent().ok_or_else(|| GrapherError::ConfigValidation {
        field: "exe_path",
        reason: "no parent directory".into(),
    })?;
    Ok(exe_dir.join(CONFIG_FILE_NAME))
}

/// Load config from `path` strictly
///
/// A missing file yields defaults; read, parse and validation failures are
/// returned as errors.
pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|e| GrapherError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| GrapherError::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    config.validate()?;
    Ok(config)
}

/// Load the config file next to the executable, falling back to defaults
/// on any error
pub fn load() -> Config {
    match default_path() {
        Ok(path) => load_lenient(&path),
        Err(e) => {
            warn!("Failed to determine config path: {}, using defaults", e);
            Config::default()
        }
    }
}

/// Load the config for a run
///
/// A path given by the user is loaded strictly so a broken file is reported
/// instead of being replaced by defaults. Without one, the implicit file next
/// to the executable is loaded leniently.
pub fn resolve(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_from(path),
        None => Ok(load()),
    }
}

fn load_lenient(path: &Path) -> Config {
    match load_from(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}, using defaults", e);
            Config::default()
        }
    }
}

/// Save config to file
pub fn save_to(path: &Path, config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config).map_err(|e| GrapherError::ConfigValidation {
        field: "config",
        reason: e.to_string(),
    })?;
    fs::write(path, content).map_err(|e| GrapherError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "sensor-grapher-{}-{}.toml",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.serial.port, "");
        assert_eq!(config.serial.baud_rate, 115_200);
        assert_eq!(config.frame.layout, FrameLayout::U16);
        assert_eq!(config.frame.integrity, Integrity::None);
        assert_eq!(config.display.window, 1000);
        assert!(config.port().is_none());
    }

    #[test]
    fn test_config_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_partial_section() {
        let partial_toml = r#"
[frame]
layout = "u32"

[display]
window = 250
"#;

        let config: Config = toml::from_str(partial_toml).unwrap();

        assert_eq!(config.frame.layout, FrameLayout::U32);
        assert_eq!(config.display.window, 250);
        // Rest should be defaults
        assert_eq!(config.frame.integrity, Integrity::None);
        assert_eq!(config.serial.baud_rate, DEFAULT_BAUD_RATE);
    }

    #[test]
    fn test_config_serialize_deserialize_roundtrip() {
        let config = Config {
            serial: SerialConfig {
                port: "/dev/ttyACM1".to_string(),
                baud_rate: 230_400,
            },
            frame: FrameConfig {
                layout: FrameLayout::U32,
                integrity: Integrity::Crc16Modbus,
            },
            display: DisplayConfig { window: 500 },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let restored: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(restored, config);
        assert!(toml_str.contains("integrity = \"crc16-modbus\""));
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let mut config = Config::default();
        config.display.window = 0;
        assert!(matches!(
            config.validate(),
            Err(GrapherError::ConfigValidation {
                field: "display.window",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_baud() {
        let mut config = Config::default();
        config.serial.baud_rate = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_port_trims_whitespace() {
        let mut config = Config::default();
        config.serial.port = "  COM3 ".to_string();
        assert_eq!(config.port(), Some("COM3"));
        config.serial.port = "   ".to_string();
        assert_eq!(config.port(), None);
    }

    #[test]
    fn test_load_from_missing_file_defaults() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        assert_eq!(load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("save");
        let mut config = Config::default();
        config.serial.port = "COM7".to_string();
        config.frame.integrity = Integrity::Crc16Ccitt;

        save_to(&path, &config).unwrap();
        let loaded = load_from(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_toml() {
        let path = temp_path("invalid");
        fs::write(&path, "[display]\nwindow = \"many\"\n").unwrap();

        let strict = load_from(&path);
        let lenient = load_lenient(&path);
        let _ = fs::remove_file(&path);

        assert!(matches!(strict, Err(GrapherError::ConfigParse { .. })));
        assert_eq!(lenient, Config::default());
    }

    #[test]
    fn test_resolve_explicit_broken_file_is_error() {
        let path = temp_path("explicit-broken");
        let original = "[serial]\nport = \"/dev/ttyACM1\"\nbaud_rate = 230400\n\n[display]\nwindow = \"500\"\n";
        fs::write(&path, original).unwrap();

        let result = resolve(Some(&path));
        let on_disk = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(GrapherError::ConfigParse { .. })));
        // Nothing was loaded, so nothing can be written back over the file
        assert_eq!(on_disk, original);
    }

    #[test]
    fn test_resolve_explicit_valid_file() {
        let path = temp_path("explicit-valid");
        fs::write(&path, "[serial]\nport = \"/dev/ttyACM1\"\nbaud_rate = 230400\n").unwrap();

        let config = resolve(Some(&path)).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.port(), Some("/dev/ttyACM1"));
        assert_eq!(config.serial.baud_rate, 230_400);
    }

    #[test]
    fn test_resolve_explicit_missing_file_defaults() {
        let path = temp_path("explicit-missing");
        let _ = fs::remove_file(&path);
        assert_eq!(resolve(Some(&path)).unwrap(), Config::default());
    }
}
