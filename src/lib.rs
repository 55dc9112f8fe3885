//! Dimensioned quantities, units, and the text patterns that spell them, for pulling measurements
//! like `2.5 kV/cm` or `300-350 K` out of scientific prose.

#[macro_use]
pub mod unit;

pub mod algebra;
pub mod config;
pub mod dimension;
pub mod error;
pub mod model;
pub mod parsing;
pub mod prefix;
pub mod quantities;
pub mod registry;
pub mod scan;
pub mod units;

pub use config::ScannerConfig;
pub use dimension::{Dimension, NamedDimension};
pub use error::{ConfigError, UnitError};
pub use model::{Measurement, QuantityModel, QuantityValue};
pub use registry::{RegistryBuilder, UnitRegistry};
pub use scan::Scanner;
pub use unit::{Unit, UnitDefinition, UnitOf};
