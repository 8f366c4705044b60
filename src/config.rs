//! Run configuration loaded from TOML
//!
//! Looked up at `--config <FILE>` or `~/.price-scraper/config.toml`; a file
//! that is missing or does not parse yields the defaults.

use crate::error::{Result, ScraperError};
use crate::extract::ExtractorConfig;
use crate::fetch::{DEFAULT_SOURCE_URL, DEFAULT_TIMEOUT_SECS};
use crate::fx::RateTable;
use crate::pipeline::{DEFAULT_MAX_PRODUCTS, DEFAULT_TARGET_CURRENCY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source_url: String,
    pub target_currency: String,
    pub max_products: usize,
    pub output_dir: PathBuf,
    pub timeout_secs: u64,
    pub write_files: bool,
    pub render_chart: bool,
    /// Entries added to, or replacing, the reference rate table
    pub rates: BTreeMap<String, f64>,
    pub selectors: ExtractorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            target_currency: DEFAULT_TARGET_CURRENCY.to_string(),
            max_products: DEFAULT_MAX_PRODUCTS,
            output_dir: PathBuf::from("."),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            write_files: true,
            render_chart: true,
            rates: BTreeMap::new(),
            selectors: ExtractorConfig::default(),
        }
    }
}

impl Config {
    /// `~/.price-scraper/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".price-scraper").join("config.toml"))
    }

    /// Parse a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ScraperError::Config(e.to_string()))
    }

    /// Load from `path`, or from the default location when `path` is `None`
    ///
    /// Read or parse failures are logged and the defaults are returned.
    pub fn load(path: Option<&Path>) -> Self {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Self::default(),
            },
        };

        if !path.exists() {
            if explicit {
                log::warn!("Config file {} not found, using defaults", path.display());
            }
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Failed to parse config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reference rate table with the configured overrides applied
    pub fn rate_table(&self) -> Result<RateTable> {
        RateTable::reference_with(self.rates.iter().map(|(code, rate)| (code.as_str(), *rate)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
