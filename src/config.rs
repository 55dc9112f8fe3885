//! Scanner configuration, read from TOML.
//!
//! ```toml
//! dimensions = ["ElectricFieldStrength", "Temperature"]
//! bare_values = false
//! to_standard = true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScannerConfig {
    /// Names of the dimensions to report, as registered. Empty reports every dimension.
    pub dimensions: Vec<String>,
    /// Report numbers that have no unit after them as dimensionless measurements.
    pub bare_values: bool,
    /// Convert each measurement to the standard unit of its dimension, where one is registered.
    pub to_standard: bool,
}

impl ScannerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
