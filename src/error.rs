//! Error types.

use thiserror::Error;

use crate::dimension::Dimension;

/// Errors from resolving, registering, or converting units.
#[derive(Debug, Clone, Error)]
pub enum UnitError {
    #[error("Unrecognised unit {0:?}")]
    UnknownUnit(String),
    #[error("Empty unit string")]
    EmptyUnit,
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        expected: Dimension,
        found: Dimension,
    },
    #[error("Quantity has no value")]
    MissingValue,
    #[error("Quantity has no unit")]
    MissingUnit,
    #[error("Expected a single value, found a range")]
    NotSingleValue,
    #[error("Invalid unit pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Unknown dimension {0:?}")]
    UnknownDimension(String),
    #[error("A different standard unit is already set for {0}")]
    DuplicateStandardUnit(String),
}

/// Errors from loading a [`crate::config::ScannerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Unit(#[from] UnitError),
}
