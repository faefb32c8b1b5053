//! Configuration loading from TOML.
//!
//! Every section is optional; a missing file or section falls back to
//! the built-in defaults: the plain comma-separated market file and
//! strict quoting.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::QuotePolicy;
use crate::market::csv::{CsvFormat, DEFAULT_DELIMITER, DEFAULT_HEADER};

/// Config file picked up from the working directory when no explicit
/// path is given.
pub const DEFAULT_CONFIG_FILE: &str = "loanquote.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LOANQUOTE_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub market: MarketConfig,
    pub quote: QuoteConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MarketConfig {
    pub delimiter: char,
    pub header: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            header: DEFAULT_HEADER.to_string(),
        }
    }
}

impl MarketConfig {
    pub fn csv_format(&self) -> CsvFormat {
        CsvFormat {
            delimiter: self.delimiter,
            header: self.header.clone(),
        }
    }
}

/// Quote checks for the command line. Unlike [`QuotePolicy::default`],
/// both default to on.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct QuoteConfig {
    pub reject_negative_rates: bool,
    pub reject_non_positive_amount: bool,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            reject_negative_rates: true,
            reject_non_positive_amount: true,
        }
    }
}

impl QuoteConfig {
    pub fn policy(&self) -> QuotePolicy {
        QuotePolicy {
            reject_negative_rates: self.reject_negative_rates,
            reject_non_positive_amount: self.reject_non_positive_amount,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Decimal places shown for the percentage rate.
    pub rate_decimals: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            rate_decimals: 1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for the `loanquote` target when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Resolve the config for the binary: the path in `LOANQUOTE_CONFIG`
    /// if set, else `loanquote.toml` in the working directory, else the
    /// defaults.
    pub fn load_or_default() -> Result<Self> {
        Self::discover(std::env::var_os(CONFIG_ENV).map(PathBuf::from), Path::new("."))
    }

    /// An explicit path must exist and parse. Without one, only
    /// `loanquote.toml` inside `dir` is considered.
    pub fn discover(explicit: Option<PathBuf>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.exists() {
            return Self::load(candidate);
        }
        Ok(Self::default())
    }
}
