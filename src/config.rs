//! Process configuration
//!
//! All credentials come from a single JSON file read once at startup.
//! A load failure is fatal; there is no partial-startup mode.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Startup configuration: the transport token plus the catalog's
/// key/secret/user-id triple. The bot authenticates against the catalog
/// as one fixed account regardless of which chat is talking to it.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    pub bot_token: String,
    pub catalog_key: String,
    pub catalog_secret: String,
    pub catalog_user_id: String,
    /// Override for the catalog endpoint (tests, gateways)
    #[serde(default)]
    pub catalog_base_url: Option<String>,
    /// Override for the chat transport endpoint
    #[serde(default)]
    pub transport_base_url: Option<String>,
}

impl BotConfig {
    /// Read and decode the config file at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Config file location: `SHELFBOT_CONFIG`, or `./config.json`
    pub fn path_from_env() -> String {
        std::env::var("SHELFBOT_CONFIG").unwrap_or_else(|_| "./config.json".to_string())
    }
}
