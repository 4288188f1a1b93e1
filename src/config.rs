use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::storage::SESSION_KEY;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub combat: CombatConfig,
    pub data: DataConfig,
}

/// Combat tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Persist the session after every mutating operation.
    pub autosave: bool,
    /// Storage key the session document is written under.
    pub storage_key: String,
}

/// Data directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            data: DataConfig::default(),
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            autosave: true,
            storage_key: SESSION_KEY.to_string(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { data_dir: None }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/redscreen/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e} — using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {} — using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data
            .data_dir
            .clone()
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .map(|d| d.join("redscreen"))
                    .unwrap_or_else(|| PathBuf::from("data"))
            })
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("redscreen").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
