//! CLI configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Get the configuration directory path
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("reqlens")
    }

    #[cfg(not(target_os = "windows"))]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".reqlens")
    }
}

/// Get the config file path
pub fn config_file() -> PathBuf {
    config_dir().join("config.yml")
}

/// Ensure the config directory exists
pub fn ensure_dirs() -> Result<()> {
    fs::create_dir_all(config_dir()).context("Failed to create config directory")?;
    Ok(())
}

/// Main configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Capture backend URL
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// How many requests to fetch per list refresh
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_limit() -> usize {
    200
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            limit: default_limit(),
        }
    }
}

impl Config {
    /// Load config from file
    pub fn load() -> Result<Self> {
        let path = config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Config =
            serde_yaml::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        ensure_dirs()?;
        let path = config_file();
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        fs::write(&path, content).context("Failed to write config file")?;
        Ok(())
    }
}
