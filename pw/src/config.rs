//! Configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::{DEFAULT_LINE_EXTENSION, DEFAULT_TABLE_EXTENSION};
use crate::table::DEFAULT_DELIMITER;

/// Project-local config file name
pub const LOCAL_CONFIG: &str = "promptwild.yml";

/// Main promptwild configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory holding the line-list and table sources
    #[serde(rename = "data-dir")]
    pub data_dir: PathBuf,

    /// Extension of table sources (without the dot)
    #[serde(rename = "table-extension")]
    pub table_extension: String,

    /// Extension of line-list sources (without the dot)
    #[serde(rename = "line-extension")]
    pub line_extension: String,

    /// Field delimiter of table sources
    pub delimiter: char,
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptwild")
        .join("data")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            table_extension: DEFAULT_TABLE_EXTENSION.to_string(),
            line_extension: DEFAULT_LINE_EXTENSION.to_string(),
            delimiter: DEFAULT_DELIMITER as char,
        }
    }
}

impl Config {
    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.table_extension.trim().is_empty() {
            return Err(eyre::eyre!("table-extension must not be empty"));
        }
        if self.line_extension.trim().is_empty() {
            return Err(eyre::eyre!("line-extension must not be empty"));
        }
        if self.table_extension == self.line_extension {
            return Err(eyre::eyre!(
                "table-extension and line-extension must differ (both are '{}')",
                self.table_extension
            ));
        }
        if !self.delimiter.is_ascii() || self.delimiter == '\n' || self.delimiter == '\r' {
            return Err(eyre::eyre!("delimiter must be a single ASCII character other than a newline"));
        }
        Ok(())
    }

    /// Delimiter as the byte the table reader expects
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            DEFAULT_DELIMITER
        }
    }

    /// Load configuration with fallback chain
    ///
    /// An explicit path must load. Otherwise `./promptwild.yml`, then
    /// `<config_dir>/promptwild/promptwild.yml`, then defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("promptwild").join(LOCAL_CONFIG);
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        tracing::debug!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.table_extension, "csv");
        assert_eq!(config.line_extension, "txt");
        assert_eq!(config.delimiter, ',');
        assert!(config.data_dir.ends_with("promptwild/data"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_yaml() {
        let yaml = r#"
data-dir: /srv/wildcards
delimiter: ";"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/wildcards"));
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.delimiter_byte(), b';');
        assert_eq!(config.table_extension, "csv");
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yml");
        fs::write(&path, "data-dir: /tmp/words\nline-extension: list\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/words"));
        assert_eq!(config.line_extension, "list");
    }

    #[test]
    fn test_load_explicit_missing_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.yml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.yml"));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yml");
        fs::write(&path, "table-extension: txt\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());

        fs::write(&path, "delimiter: \"é\"\n").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_yaml_round_trip_keys() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert!(yaml.contains("data-dir"));
        assert!(yaml.contains("table-extension"));
        assert!(yaml.contains("line-extension"));
    }
}
