//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::reference::ReferenceSource;

/// Smallest window the layout supports, as `[width, height]`.
pub const MIN_WINDOW_SIZE: [f32; 2] = [900.0, 600.0];

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub reference: ReferenceConfig,
    pub ui: UiConfig,
}

/// Where the employee snapshot and logs live.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Data directory; the platform data directory when unset.
    pub data_dir: Option<PathBuf>,
}

/// Reference list sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceConfig {
    #[serde(default)]
    pub states: ReferenceSource,
    #[serde(default)]
    pub departments: ReferenceSource,
    /// HTTP timeout for URL sources in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

/// Window preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub window_width: f32,
    pub window_height: f32,
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.storage.data_dir
            && dir.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation("Data directory cannot be empty".to_string()));
        }
        self.reference.states.validate("states")?;
        self.reference.departments.validate("departments")?;
        if self.reference.timeout_secs < 1 {
            return Err(ConfigError::Validation(
                "Reference timeout must be at least 1 second".to_string(),
            ));
        }
        let [min_width, min_height] = MIN_WINDOW_SIZE;
        if self.ui.window_width < min_width || self.ui.window_height < min_height {
            return Err(ConfigError::Validation(format!(
                "Window size must be at least {min_width}x{min_height}"
            )));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl StorageConfig {
    /// Configured data directory, or the platform default.
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

/// Platform data directory, falling back to `./data`.
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "WealthHealth", "HRnet")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

impl ReferenceSource {
    fn validate(&self, what: &str) -> Result<(), ConfigError> {
        match self {
            ReferenceSource::Bundled => Ok(()),
            ReferenceSource::Path(path) if path.as_os_str().is_empty() => Err(ConfigError::Validation(
                format!("Reference path for {what} cannot be empty"),
            )),
            ReferenceSource::Path(_) => Ok(()),
            ReferenceSource::Url(url) if !url.starts_with("http") => Err(ConfigError::Validation(format!(
                "Reference URL for {what} must start with http:// or https://"
            ))),
            ReferenceSource::Url(_) => Ok(()),
        }
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            states: ReferenceSource::Bundled,
            departments: ReferenceSource::Bundled,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_reference_sources() {
        let content = r#"
            [storage]
            data_dir = "/var/lib/hrnet"

            [reference]
            states = "bundled"
            departments = { url = "https://example.com/departments.json" }
            timeout_secs = 5
        "#;
        let config: AppConfig = toml::from_str(content).unwrap();

        assert_eq!(config.storage.resolve_data_dir(), PathBuf::from("/var/lib/hrnet"));
        assert_eq!(config.reference.states, ReferenceSource::Bundled);
        assert_eq!(
            config.reference.departments,
            ReferenceSource::Url("https://example.com/departments.json".to_string())
        );
        assert_eq!(config.ui.window_width, 1200.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_reference_url() {
        let mut config = AppConfig::default();
        config.reference.states = ReferenceSource::Url("ftp://invalid".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_paths() {
        let mut config = AppConfig::default();
        config.reference.departments = ReferenceSource::Path(PathBuf::new());
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.storage.data_dir = Some(PathBuf::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_window_bounds() {
        let mut config = AppConfig::default();
        config.ui.window_width = 100.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.ui.window_width = MIN_WINDOW_SIZE[0] - 1.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.ui.window_width = MIN_WINDOW_SIZE[0];
        config.ui.window_height = MIN_WINDOW_SIZE[1];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_try_load_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));

        std::fs::write(&path, "[reference]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(
            AppConfig::try_load(&path),
            ConfigLoadResult::Invalid(ConfigError::Validation(_))
        ));

        std::fs::write(&path, "not = [toml").unwrap();
        assert!(matches!(
            AppConfig::try_load(&path),
            ConfigLoadResult::Invalid(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = AppConfig::default();
        config.reference.states = ReferenceSource::Path(PathBuf::from("states.json"));
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => {
                assert_eq!(loaded.reference.states, ReferenceSource::Path(PathBuf::from("states.json")));
            }
            other => panic!("expected loaded config, got {other:?}"),
        }
    }
}
