//! Electric field strength: electric potential per unit length.
//!
//! The standard unit is [`EFS`], volts per metre. Field strengths in the literature are written in
//! a handful of fixed spellings (`V/m`, `kV/cm`, `mV/mm`, ...), which [`EFS_PATTERN`] recognizes as
//! a whole rather than as a quotient of a potential and a length, so the magnitude comes from
//! [`EFS::magnitude_of`].

use crate::dimension::{Dimension, NamedDimension};
use crate::error::UnitError;
use crate::model::QuantityModel;
use crate::prefix;
use crate::registry::RegistryBuilder;
use crate::unit::{Unit, UnitDefinition, UnitOf};

use super::electric_potential::ElectricPotential;
use super::length::Length;

/// Electric field strength, `ElectricPotential / Length`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ElectricFieldStrength;

impl NamedDimension for ElectricFieldStrength {
    const NAME: &'static str = "ElectricFieldStrength";

    fn dimension() -> Dimension {
        ElectricPotential::dimension() / Length::dimension()
    }
}

/// A measured electric field strength.
pub type ElectricFieldStrengthModel = QuantityModel<ElectricFieldStrength>;

/// A unit of electric field strength.
pub type ElectricFieldStrengthUnit = UnitOf<ElectricFieldStrength>;

/// Volts per metre. Being the standard unit, all four conversions are the identity.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct EFS;

impl UnitDefinition for EFS {
    fn name(&self) -> &'static str {
        "EFS"
    }

    fn symbol(&self) -> &'static str {
        "V/m"
    }

    fn dimension(&self) -> Dimension {
        ElectricFieldStrength::dimension()
    }

    fn convert_value_to_standard(&self, value: f64) -> f64 {
        value
    }

    fn convert_value_from_standard(&self, value: f64) -> f64 {
        value
    }

    fn convert_error_to_standard(&self, error: f64) -> f64 {
        error
    }

    fn convert_error_from_standard(&self, error: f64) -> f64 {
        error
    }

    /// The potential prefix minus the length prefix: `kV/cm` is `10^(3 - (-2))` V/m.
    fn magnitude_of(&self, spelling: &str) -> Option<i32> {
        let (num, den) = spelling.split_once('/')?;
        let num = prefix::exponent_of(num.strip_suffix('V')?)?;
        let den = prefix::exponent_of(den.strip_suffix('m')?)?;
        Some(num - den)
    }
}

/// Spellings of field-strength units.
///
/// The whole alternation is optional, so this also matches the empty string. Resolution never
/// looks up an empty unit string, so the empty match can't produce an [`EFS`].
pub const EFS_PATTERN: &str =
    "((mV/m)|(V/m)|(kV/m)|(mV/cm)|(mV/mm)|(V/cm)|(V/mm)|(kV/cm)|(kV/mm))?";

/// Adds [`EFS_PATTERN`] and makes [`EFS`] the standard unit.
pub fn register(builder: &mut RegistryBuilder) -> Result<(), UnitError> {
    builder
        .register::<ElectricFieldStrength>(EFS_PATTERN, &EFS)?
        .set_standard::<ElectricFieldStrength>(Unit::new(&EFS))?;
    Ok(())
}
