//! Configuration management for Vireo.
//!
//! Loads configuration from ${VIREO_HOME}/config.toml with sensible defaults.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Which chain network the wallet connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chain network to operate on.
    pub network: Network,

    /// Default log filter (overridable via VIREO_LOG).
    pub log_level: String,

    /// Peer addresses to connect to instead of DNS discovery.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub peers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::default(),
            log_level: "info".to_string(),
            peers: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }
}

pub mod paths {
    //! Path resolution for Vireo configuration and data directories.
    //!
    //! VIREO_HOME resolution order:
    //! 1. VIREO_HOME environment variable (if set)
    //! 2. ~/.vireo (default)

    use std::path::PathBuf;

    /// Returns the Vireo home directory.
    ///
    /// Checks VIREO_HOME env var first, falls back to ~/.vireo
    pub fn vireo_home() -> PathBuf {
        if let Ok(home) = std::env::var("VIREO_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".vireo"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        vireo_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn log_dir() -> PathBuf {
        vireo_home().join("logs")
    }
}
