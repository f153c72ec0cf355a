//! TOML configuration for the generators.
//!
//! Every field defaults to the built-in data set, so an absent file or an
//! empty one reproduces the stock outputs. Command-line flags are applied on
//! top of the loaded values by the binary.

use crate::common::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Registrations of the stock fleet, in sheet order.
pub const DEFAULT_AIRCRAFT: [&str; 12] = [
    "3C-OA", "3C-OB", "3C-OC", "3C-OD", "3C-OE", "3C-OH", "3C-OI", "3C-OJ", "3C-OK", "3C-OL",
    "RES1", "RES2",
];

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fleet: FleetConfig,
    pub inflation: InflationConfig,
    pub assets: AssetsConfig,
    pub names: NamesConfig,
}

/// Fleet-tracking workbook settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Aircraft registrations; each gets its own log sheet
    pub aircraft: Vec<String>,
    /// Document title
    pub title: String,
    /// Generator string written to `meta.xml`
    pub generator: String,
    /// Output file
    pub output: PathBuf,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            aircraft: DEFAULT_AIRCRAFT.iter().map(|s| s.to_string()).collect(),
            title: "KIOWA Flottensteuerung".to_string(),
            generator: "KIOWA Generator V47".to_string(),
            output: PathBuf::from("KIOWA_V47.ods"),
        }
    }
}

/// Inflation calculator defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InflationConfig {
    /// Year the base amount refers to
    pub base_year: u16,
    /// Amount in the base year
    pub base_amount: f64,
    /// Year the amount is projected to
    pub target_year: u16,
    /// Output file
    pub output: PathBuf,
}

impl Default for InflationConfig {
    fn default() -> Self {
        Self {
            base_year: 2014,
            base_amount: 400.0,
            target_year: 2026,
            output: PathBuf::from("Inflationsrechner.ods"),
        }
    }
}

/// Placeholder asset settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory receiving the PNG files
    pub directory: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("assets"),
        }
    }
}

/// Attendance list settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NamesConfig {
    /// Title of the single worksheet
    pub sheet_title: String,
    /// Output file
    pub output: PathBuf,
}

impl Default for NamesConfig {
    fn default() -> Self {
        Self {
            sheet_title: "Namensliste".to_string(),
            output: PathBuf::from("Namensliste.xlsx"),
        }
    }
}

impl Config {
    /// Load the configuration from `path`, or the defaults when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or is not valid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.fleet.aircraft.is_empty() {
            return Err(Error::Config("fleet.aircraft must not be empty".to_string()));
        }
        Ok(config)
    }
}
