use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::track::WallClock;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid utc_offset: {0}")]
    InvalidOffset(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    pub tracks: TracksConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TracksConfig {
    pub base_folder: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    /// Offset the samples were recorded in, e.g. `+08:00`. Host zone if unset.
    #[serde(default)]
    pub utc_offset: Option<String>,
}

impl ExportConfig {
    pub fn clock(&self) -> Result<WallClock, ConfigError> {
        match &self.utc_offset {
            None => Ok(WallClock::Local),
            Some(offset) => WallClock::from_offset(offset)
                .ok_or_else(|| ConfigError::InvalidOffset(offset.clone())),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        config.export.clock()?;
        Ok(config)
    }
}
