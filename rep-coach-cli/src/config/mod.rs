use anyhow::{Context, Result};
use rep_coach::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// CSV file receiving one row per completed repetition
    #[serde(default = "default_log_path")]
    pub path: PathBuf,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub color: bool,

    /// Include the driving joint angle in status lines
    #[serde(default = "default_true")]
    pub show_angles: bool,
}

// Default value functions
fn default_log_path() -> PathBuf {
    PathBuf::from("workout_log.csv")
}

fn default_true() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: default_log_path(),
            enabled: default_true(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: default_true(),
            show_angles: default_true(),
        }
    }
}

impl Config {
    /// Get config directory path (~/.rep-coach/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".rep-coach"))
    }

    /// Get config file path (~/.rep-coach/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolve an explicit path, falling back to the default location
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_file(),
        }
    }

    /// Load configuration from `path`, or the default location
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_file = Self::resolve_path(path)?;

        if !config_file.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_file).context("Failed to read config file")?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file {}", config_file.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Failed to parse config file")?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`, or the default location
    pub fn save_to(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_file = Self::resolve_path(path)?;
        if let Some(dir) = config_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_file, contents).context("Failed to write config file")?;

        Ok(config_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rep_coach::LowConfidencePolicy;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log.path, PathBuf::from("workout_log.csv"));
        assert!(config.log.enabled);
        assert!(config.ui.color);
        assert_eq!(config.engine.squat.down_below, 70.0);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized = Config::from_toml_str(&serialized).unwrap();

        assert_eq!(config.log.path, deserialized.log.path);
        assert_eq!(config.engine, deserialized.engine);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml_str(
            r#"
            [engine]
            low_confidence = "hold"

            [engine.lunge]
            down_below = 85.0
            up_above = 150.0

            [log]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.low_confidence, LowConfidencePolicy::Hold);
        assert_eq!(config.engine.lunge.down_below, 85.0);
        assert_eq!(config.engine.squat.down_below, 70.0);
        assert!(!config.log.enabled);
        assert_eq!(config.log.path, PathBuf::from("workout_log.csv"));
    }

    #[test]
    fn test_invalid_engine_config_rejected() {
        let result = Config::from_toml_str(
            r#"
            [engine.squat]
            down_below = 170.0
            up_above = 100.0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.ui.show_angles = false;
        config.save_to(Some(&path)).unwrap();

        let loaded = Config::load_from(Some(&path)).unwrap();
        assert!(!loaded.ui.show_angles);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(config.log.enabled);
    }
}
