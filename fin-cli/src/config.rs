//! `fincalc.toml` loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fin_core::Currency;
use fin_core::db::DbConfig;
use serde::{Deserialize, Deserializer};
use tracing::debug;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "fincalc.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Denomination of amounts entered on the command line.
    #[serde(deserialize_with = "deserialize_currency")]
    pub currency: Currency,
    pub database: DbConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Accepts currency codes in any case.
fn deserialize_currency<'de, D>(deserializer: D) -> Result<Currency, D::Error>
where
    D: Deserializer<'de>,
{
    let code = String::deserialize(deserializer)?;
    code.parse().map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config TOML")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Loads `explicit` if given, else [`DEFAULT_CONFIG_FILE`] when it
    /// exists in `dir`, else the built-in defaults.
    pub fn resolve(
        explicit: Option<&Path>,
        dir: &Path,
    ) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let fallback = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            debug!(path = %fallback.display(), "using config from working directory");
            return Self::load(&fallback);
        }

        debug!("no config file; using defaults");
        Ok(Self::default())
    }
}
