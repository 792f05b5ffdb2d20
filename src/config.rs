//! User configuration loaded from `config.toml`.

use crate::calculator::AngleUnit;
use crate::error::ConfigError;
use crate::history::JsonFileStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Display colour scheme. Purely cosmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Blue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub angle_unit: AngleUnit,
    pub theme: Theme,
    /// Where history is saved; `None` uses the platform data directory.
    pub history_file: Option<PathBuf>,
    pub persist_history: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            angle_unit: AngleUnit::default(),
            theme: Theme::default(),
            history_file: None,
            persist_history: true,
        }
    }
}

impl Config {
    /// `<config_dir>/scicalc/config.toml`, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scicalc").join("config.toml"))
    }

    /// Read and parse the config file at `path`. A missing file yields the
    /// defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`Config::from_file`], but falls back to the defaults on any error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        Self::from_file(path).unwrap_or_else(|error| {
            warn!(%error, "ignoring config file");
            Self::default()
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn history_path(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(JsonFileStore::default_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            angle_unit = "degrees"
            theme = "blue"
            history_file = "/tmp/calc.json"
            persist_history = false
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            Config {
                angle_unit: AngleUnit::Degrees,
                theme: Theme::Blue,
                history_file: Some(PathBuf::from("/tmp/calc.json")),
                persist_history: false,
            }
        );
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = Config::parse("theme = \"light\"").unwrap();
        assert_eq!(config.angle_unit, AngleUnit::Radians);
        assert_eq!(config.theme, Theme::Light);
        assert!(config.persist_history);
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        assert!(Config::parse("angle_unit = \"gradians\"").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config = Config::from_file(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_broken_file_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "angle_unit = [").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(Config::load_or_default(Some(&path)), Config::default());
    }

    #[test]
    fn test_history_path_override() {
        let config = Config {
            history_file: Some(PathBuf::from("h.json")),
            ..Config::default()
        };
        assert_eq!(config.history_path(), PathBuf::from("h.json"));
    }
}
