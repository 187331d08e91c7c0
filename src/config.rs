//! Emonav configuration (`config.toml`)
//!
//! Looked up at `--config <path>` or `<config_dir>/emonav/config.toml`.
//! A missing file means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "emonav";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmonavConfig {
    /// Directory holding the persisted session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,

    /// Replacement dataset (YAML); the built-in table is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,

    /// Default tracing level for the `emonav` target
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// How many emotions `random` shows by default
    #[serde(default = "default_random_count")]
    pub random_count: usize,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_random_count() -> usize {
    5
}

impl Default for EmonavConfig {
    fn default() -> Self {
        Self {
            state_dir: None,
            dataset: None,
            log_level: default_log_level(),
            random_count: default_random_count(),
        }
    }
}

impl EmonavConfig {
    /// `<config_dir>/emonav/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: EmonavConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Load from the explicit path if given, else from the default location
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) => Self::load(&path),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Effective session directory
    ///
    /// Configured value, else `<data_local_dir>/emonav`, else `./.emonav`.
    pub fn resolve_state_dir(&self) -> PathBuf {
        if let Some(dir) = &self.state_dir {
            return dir.clone();
        }

        dirs::data_local_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(".emonav"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = EmonavConfig::load(&temp.path().join("config.toml")).unwrap();

        assert_eq!(config, EmonavConfig::default());
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.random_count, 5);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "random_count = 3\n").unwrap();

        let config = EmonavConfig::load(&path).unwrap();

        assert_eq!(config.random_count, 3);
        assert_eq!(config.log_level, "warn");
        assert!(config.state_dir.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");

        let config = EmonavConfig {
            state_dir: Some(temp.path().join("state")),
            dataset: Some(PathBuf::from("custom.yaml")),
            log_level: "debug".to_string(),
            random_count: 8,
        };
        config.save(&path).unwrap();

        assert_eq!(EmonavConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "random_count = \"many\"").unwrap();

        assert!(EmonavConfig::load(&path).is_err());
    }

    #[test]
    fn test_resolve_state_dir_prefers_configured() {
        let config = EmonavConfig {
            state_dir: Some(PathBuf::from("/tmp/emonav-test")),
            ..EmonavConfig::default()
        };
        assert_eq!(config.resolve_state_dir(), PathBuf::from("/tmp/emonav-test"));
    }
}
