//! Runtime configuration.
//!
//! Built in three layers, later ones winning: built-in defaults, an optional
//! `config.yaml` in the data directory, then `BABY_TRACKER_*` environment
//! variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const DATA_DIR_VAR: &str = "BABY_TRACKER_DATA_DIR";
pub const BIND_ADDR_VAR: &str = "BABY_TRACKER_BIND_ADDR";
pub const CORS_ORIGIN_VAR: &str = "BABY_TRACKER_CORS_ORIGIN";

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub data_directory: PathBuf,
    pub bind_address: String,
    pub cors_origin: String,
}

/// Optional overrides read from `config.yaml`
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    data_directory: Option<PathBuf>,
    bind_address: Option<String>,
    cors_origin: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            data_directory: base.join("BabyTracker"),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

impl BackendConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration, reading variables through `env`
    pub fn load_with<F>(env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // The data directory decides where config.yaml lives
        if let Some(dir) = env(DATA_DIR_VAR) {
            config.data_directory = PathBuf::from(dir);
        }

        let config_path = config.data_directory.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            config.apply_file(&config_path)?;
        }

        if let Some(dir) = env(DATA_DIR_VAR) {
            config.data_directory = PathBuf::from(dir);
        }
        if let Some(addr) = env(BIND_ADDR_VAR) {
            config.bind_address = addr;
        }
        if let Some(origin) = env(CORS_ORIGIN_VAR) {
            config.cors_origin = origin;
        }

        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let file: ConfigFile = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Invalid config file {:?}", path))?;
        info!("Loaded configuration overrides from {:?}", path);

        if let Some(dir) = file.data_directory {
            self.data_directory = dir;
        }
        if let Some(addr) = file.bind_address {
            self.bind_address = addr;
        }
        if let Some(origin) = file.cors_origin {
            self.cors_origin = origin;
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.bind_address))
    }
}
