//! Configuration file handling.
//!
//! This module handles loading and validating configuration from
//! `.borough_complaints.toml` files.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".borough_complaints.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input column positions.
    #[serde(default)]
    pub columns: ColumnsConfig,
}

/// Zero-indexed positions of the columns the report reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnsConfig {
    /// Creation date column.
    #[serde(default = "default_creation_date")]
    pub creation_date: usize,

    /// Complaint type column.
    #[serde(default = "default_complaint_type")]
    pub complaint_type: usize,

    /// Borough column.
    #[serde(default = "default_borough")]
    pub borough: usize,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            creation_date: default_creation_date(),
            complaint_type: default_complaint_type(),
            borough: default_borough(),
        }
    }
}

fn default_creation_date() -> usize {
    1
}

fn default_complaint_type() -> usize {
    5
}

fn default_borough() -> usize {
    23
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load configuration from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Check that the column positions don't overlap.
    pub fn validate(&self) -> Result<()> {
        let c = &self.columns;
        if c.creation_date == c.complaint_type
            || c.creation_date == c.borough
            || c.complaint_type == c.borough
        {
            bail!(
                "Column positions must be distinct (creation_date={}, complaint_type={}, borough={})",
                c.creation_date,
                c.complaint_type,
                c.borough
            );
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.columns.creation_date, 1);
        assert_eq!(config.columns.complaint_type, 5);
        assert_eq!(config.columns.borough, 23);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[columns]
creation_date = 0
borough = 2
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.columns.creation_date, 0);
        assert_eq!(config.columns.complaint_type, 5);
        assert_eq!(config.columns.borough, 2);
    }

    #[test]
    fn test_overlapping_columns_rejected() {
        let mut config = Config::default();
        config.columns.borough = config.columns.complaint_type;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[columns]\ncomplaint_type = 4\n",
        )
        .unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.columns.complaint_type, 4);
    }

    #[test]
    fn test_load_rejects_bad_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[columns]\ncreation_date = 5\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("distinct"));
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[columns]"));
        assert!(toml_str.contains("borough = 23"));
    }
}
