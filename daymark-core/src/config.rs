//! Global daymark configuration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{DaymarkError, DaymarkResult};

static DEFAULT_PROVIDER: &str = "local";

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

/// Host-specific parameters, passed along with every provider request.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ProviderConfig(pub HashMap<String, toml::Value>);

impl From<&ProviderConfig> for serde_json::Map<String, serde_json::Value> {
    fn from(config: &ProviderConfig) -> Self {
        config
            .0
            .iter()
            .filter_map(|(k, v)| serde_json::to_value(v).ok().map(|v| (k.clone(), v)))
            .collect()
    }
}

/// Global configuration at ~/.config/daymark/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DaymarkConfig {
    /// Host binary suffix: `daymark-provider-{provider}`
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Skip creating a placeholder on a day that already has one
    #[serde(default)]
    pub prevent_duplicates: bool,

    #[serde(default)]
    pub provider_config: ProviderConfig,
}

impl Default for DaymarkConfig {
    fn default() -> Self {
        DaymarkConfig {
            provider: default_provider(),
            prevent_duplicates: false,
            provider_config: ProviderConfig::default(),
        }
    }
}

impl DaymarkConfig {
    pub fn config_path() -> DaymarkResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaymarkError::Config("Could not determine config directory".into()))?
            .join("daymark");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/daymark/config.toml, creating a commented default on first run.
    pub fn load() -> DaymarkResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> DaymarkResult<Self> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .build()
            .map_err(|e| DaymarkError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DaymarkError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DaymarkResult<()> {
        let contents = format!(
            "\
# daymark configuration

# Calendar host binary (daymark-provider-<name>):
# provider = \"{}\"

# Don't create a second placeholder on a day that already has one:
# prevent_duplicates = false

# Passed to the provider with every request:
# [provider_config]
# local_dir = \"~/calendar\"
",
            DEFAULT_PROVIDER
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaymarkError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DaymarkError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
