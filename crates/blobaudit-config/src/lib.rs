use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment key holding the audit store connection string
pub const CONNECTION_STRING_ENV: &str = "SQLConnectionString";

/// Configuration for blobaudit
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
}

/// Audit store connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub connection_string: Option<String>,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            connection_string: None,
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_connect_timeout() -> u64 {
    30
}

impl StoreConfig {
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: Some(connection_string.into()),
            ..Self::default()
        }
    }

    /// Read the connection string from the process environment
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Take the connection string from the environment if it is set
    pub fn apply_env(&mut self) {
        if let Ok(value) = std::env::var(CONNECTION_STRING_ENV) {
            if !value.trim().is_empty() {
                self.connection_string = Some(value);
            }
        }
    }

    /// The configured connection string, treating blank values as absent
    pub fn connection_string(&self) -> Option<&str> {
        self.connection_string
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config and overlay the connection string from the environment
    pub fn load_with_env() -> anyhow::Result<Self> {
        let mut config = Self::load()?;
        config.store.apply_env();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "blobaudit", "blobaudit") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.blobaudit/config.toml")
        }
    }
}
