/// User configuration, read from `<config dir>/spacescope/config.toml`.
///
/// Every field has a default; a missing file means all defaults.
use crate::deletion::DeleteMode;
use crate::engine::ScanOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_true")]
    pub skip_hidden: bool,
    #[serde(default = "default_listing_depth")]
    pub listing_depth: usize,
    /// Unlimited when absent.
    #[serde(default)]
    pub scan_depth: Option<usize>,
    #[serde(default = "default_progress_interval")]
    pub progress_interval_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_listing_depth() -> usize {
    3
}

fn default_progress_interval() -> u64 {
    100
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            skip_hidden: true,
            listing_depth: default_listing_depth(),
            scan_depth: None,
            progress_interval_ms: default_progress_interval(),
        }
    }
}

impl ScanConfig {
    pub fn to_options(&self) -> ScanOptions {
        ScanOptions {
            skip_hidden: self.skip_hidden,
            listing_depth: self.listing_depth,
            scan_depth: self.scan_depth,
            progress_interval: Duration::from_millis(self.progress_interval_ms.max(1)),
            ..ScanOptions::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_delete_mode")]
    pub default_delete_mode: DeleteMode,
    #[serde(default = "default_notification_seconds")]
    pub notification_seconds: u64,
}

fn default_delete_mode() -> DeleteMode {
    DeleteMode::Trash
}

fn default_notification_seconds() -> u64 {
    4
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_delete_mode: default_delete_mode(),
            notification_seconds: default_notification_seconds(),
        }
    }
}

impl UiConfig {
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl LoggingConfig {
    /// The configured level, `INFO` when it does not parse.
    pub fn tracing_level(&self) -> tracing::Level {
        self.level.parse().unwrap_or(tracing::Level::INFO)
    }
}

impl Config {
    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("spacescope")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.scan.skip_hidden);
        assert_eq!(config.scan.listing_depth, 3);
        assert_eq!(config.scan.scan_depth, None);
        assert_eq!(config.ui.default_delete_mode, DeleteMode::Trash);
        assert_eq!(config.ui.notification_ttl(), Duration::from_secs(4));
        assert_eq!(config.logging.tracing_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [scan]
            scan_depth = 6
            [ui]
            default_delete_mode = "permanent"
            "#,
        )
        .unwrap();
        assert_eq!(config.scan.scan_depth, Some(6));
        assert_eq!(config.scan.listing_depth, 3);
        assert_eq!(config.ui.default_delete_mode, DeleteMode::Permanent);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[scan\nskip_hidden = maybe").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_serialized_defaults_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.logging.level = "debug".into();
        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.logging.tracing_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_scan_options_conversion() {
        let scan = ScanConfig {
            skip_hidden: false,
            listing_depth: 1,
            scan_depth: Some(2),
            progress_interval_ms: 0,
        };
        let options = scan.to_options();
        assert!(!options.skip_hidden);
        assert_eq!(options.scan_depth, Some(2));
        assert_eq!(options.progress_interval, Duration::from_millis(1));
    }
}
