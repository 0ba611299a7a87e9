//! Runtime configuration.
//!
//! Layering, lowest to highest: built-in defaults, a TOML file, then overrides
//! supplied by the binary (environment variables and CLI flags, resolved by clap).

use crate::{api, fred};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// World Bank API root, e.g. `https://api.worldbank.org/v2`.
    pub world_bank_url: String,
    /// FRED `series/observations` endpoint.
    pub fred_url: String,
    /// Required by `get_us_inflation` only.
    pub fred_api_key: Option<String>,
    /// Per-request HTTP timeout.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world_bank_url: api::DEFAULT_BASE_URL.to_string(),
            fred_url: fred::DEFAULT_OBSERVATIONS_URL.to_string(),
            fred_api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// Keeps the API key out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("world_bank_url", &self.world_bank_url)
            .field("fred_url", &self.fred_url)
            .field("fred_api_key", &self.fred_api_key.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Values that take precedence over the file. `None` leaves the lower layer untouched.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub world_bank_url: Option<String>,
    pub fred_url: Option<String>,
    pub fred_api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// `{config_dir}/econ-mcp/config.toml`, e.g. `~/.config/econ-mcp/config.toml` on Linux.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("econ-mcp").join("config.toml"))
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parse config")
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Load from `path` if given (must exist), else from [`default_path`] if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => match default_path().filter(|p| p.is_file()) {
                Some(p) => {
                    log::debug!("using config file {}", p.display());
                    Self::from_file(p)
                }
                None => Ok(Self::default()),
            },
        }
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(v) = overrides.world_bank_url {
            self.world_bank_url = v;
        }
        if let Some(v) = overrides.fred_url {
            self.fred_url = v;
        }
        if let Some(v) = overrides.fred_api_key {
            self.fred_api_key = Some(v);
        }
        if let Some(v) = overrides.timeout_secs {
            self.timeout_secs = v;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}
