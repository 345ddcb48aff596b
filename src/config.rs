//! Configuration management for gharama-checker
//!
//! Config stored at: ~/.config/gharama-checker/config.json

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::error::{Error, Result};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Default CRSP reference file, used when --crsp is not given
    #[serde(default)]
    pub crsp_path: Option<PathBuf>,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            crsp_path: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("no config directory on this platform".to_string()))?
            .join("gharama-checker");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the data directory used for calculation history
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| Error::Config("no data directory on this platform".to_string()))?
            .join("gharama-checker");
        Ok(data_dir)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Gharama Checker Configuration")?;
        writeln!(f, "=============================")?;
        writeln!(f)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(
            f,
            "CRSP file:      {}",
            self.crsp_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not set)".to_string())
        )?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let reloaded: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.output_format, OutputFormat::Table);
        assert!(reloaded.crsp_path.is_none());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.output_format, OutputFormat::Table);
    }
}
