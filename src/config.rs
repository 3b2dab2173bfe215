//! Configuration file for the host binary.
//!
//! YAML with every key optional. Values seed a [`FrameInput`]; command line
//! flags applied afterwards take precedence.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::network::AUTO_INTERFACE;
use crate::engine::SortKey;
use crate::error::{MonitorError, Result};
use crate::frame::FrameInput;
use crate::layout::BorderStyle;
use crate::theme::{Theme, THEME_NAMES};

/// Global configuration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Refresh interval in milliseconds, used when snapshots carry no
    /// timestamps.
    #[serde(default = "default_update_ms")]
    pub update_ms: u64,

    /// Border glyph style.
    #[serde(default)]
    pub border_style: BorderStyle,
}

fn default_update_ms() -> u64 {
    1000
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self { update_ms: default_update_ms(), border_style: BorderStyle::default() }
    }
}

/// Process table settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessConfig {
    /// Sort column.
    #[serde(default)]
    pub sort: SortKey,

    /// Flip the column's natural order.
    #[serde(default)]
    pub reversed: bool,

    /// Initial filter.
    #[serde(default)]
    pub filter: String,
}

/// Network panel settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Primary interface name, or `auto`.
    #[serde(default = "default_interface")]
    pub interface: String,
}

fn default_interface() -> String {
    AUTO_INTERFACE.to_string()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { interface: default_interface() }
    }
}

/// Disk panel settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskConfig {
    /// Substring a mount point or device must contain to be shown.
    #[serde(default)]
    pub filter: String,
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Global settings.
    #[serde(default)]
    pub global: GlobalConfig,

    /// Theme name.
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Process table.
    #[serde(default)]
    pub process: ProcessConfig,

    /// Network panel.
    #[serde(default)]
    pub network: NetworkConfig,

    /// Disk panel.
    #[serde(default)]
    pub disk: DiskConfig,
}

fn default_version() -> u32 {
    1
}
fn default_theme() -> String {
    "default".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            global: GlobalConfig::default(),
            theme: default_theme(),
            process: ProcessConfig::default(),
            network: NetworkConfig::default(),
            disk: DiskConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location: `<config dir>/tmon/config.yaml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tmon").join("config.yaml"))
    }

    /// Loads and validates configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| MonitorError::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses and validates configuration from a YAML string.
    ///
    /// Parse errors carry the 1-indexed line number.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            MonitorError::ConfigParse { line, message: e.to_string() }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Checks values serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.global.update_ms == 0 {
            return Err(MonitorError::ConfigInvalid {
                key: "global.update_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if !Theme::is_known(&self.theme) {
            return Err(MonitorError::ConfigInvalid {
                key: "theme".to_string(),
                message: format!("unknown theme '{}' (expected one of {})", self.theme, THEME_NAMES.join(", ")),
            });
        }
        if self.network.interface.trim().is_empty() {
            return Err(MonitorError::ConfigInvalid {
                key: "network.interface".to_string(),
                message: format!("must be an interface name or '{AUTO_INTERFACE}'"),
            });
        }
        Ok(())
    }

    /// Returns the update interval as a Duration.
    #[must_use]
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.global.update_ms)
    }

    /// Copies the configured settings into `input`.
    pub fn apply(&self, input: &mut FrameInput) {
        input.theme.clone_from(&self.theme);
        input.border_style = self.global.border_style;
        input.interval_ms = self.global.update_ms;
        input.sort_key = self.process.sort;
        input.sort_reversed = self.process.reversed;
        input.process_filter.clone_from(&self.process.filter);
        input.preferred_net_interface.clone_from(&self.network.interface);
        input.disk_filter.clone_from(&self.disk.filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::new();

        assert_eq!(config.version, 1);
        assert_eq!(config.global.update_ms, 1000);
        assert_eq!(config.global.border_style, BorderStyle::Rounded);
        assert_eq!(config.network.interface, "auto");
        assert_eq!(config.process.sort, SortKey::Cpu);
    }

    #[test]
    fn test_config_parse_minimal() {
        let config = Config::parse("version: 1").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_config_parse_full() {
        let yaml = r#"
version: 1
global:
  update_ms: 500
  border_style: heavy
theme: dracula
process:
  sort: mem
  reversed: true
  filter: postgres
network:
  interface: wlan0
disk:
  filter: nvme
"#;

        let config = Config::parse(yaml).unwrap();

        assert_eq!(config.update_interval(), Duration::from_millis(500));
        assert_eq!(config.global.border_style, BorderStyle::Heavy);
        assert_eq!(config.theme, "dracula");
        assert_eq!(config.process.sort, SortKey::Mem);
        assert!(config.process.reversed);
        assert_eq!(config.network.interface, "wlan0");
        assert_eq!(config.disk.filter, "nvme");
    }

    #[test]
    fn test_config_parse_error_includes_line() {
        let yaml = r#"
version: 1
global:
  update_ms: not_a_number
"#;

        let err = Config::parse(yaml).unwrap_err();
        match &err {
            MonitorError::ConfigParse { line, .. } => assert_eq!(*line, 4, "{err}"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn test_config_invalid_values() {
        let err = Config::parse("theme: solarized").unwrap_err();
        assert!(matches!(err, MonitorError::ConfigInvalid { ref key, .. } if key == "theme"), "{err}");

        let err = Config::parse("global:\n  update_ms: 0").unwrap_err();
        assert!(matches!(err, MonitorError::ConfigInvalid { ref key, .. } if key == "global.update_ms"));

        assert!(Config::parse("process:\n  sort: size").is_err());
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme: nord\nglobal:\n  update_ms: 2000").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.theme, "nord");
        assert_eq!(config.global.update_ms, 2000);
    }

    #[test]
    fn test_config_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        assert!(matches!(Config::load(&path), Err(MonitorError::ConfigNotFound(_))));
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn test_apply_seeds_frame_input() {
        let config = Config::parse("theme: gruvbox\nprocess:\n  sort: pid\ndisk:\n  filter: sd").unwrap();
        let mut input = FrameInput::default();
        config.apply(&mut input);

        assert_eq!(input.theme, "gruvbox");
        assert_eq!(input.sort_key, SortKey::Pid);
        assert_eq!(input.disk_filter, "sd");
        assert_eq!(input.preferred_net_interface, "auto");
        assert_eq!(input.interval_ms, 1000);
    }

    #[test]
    fn test_default_path_is_under_tmon() {
        if let Some(path) = Config::default_path() {
            assert!(path.ends_with("tmon/config.yaml"));
        }
    }
}
