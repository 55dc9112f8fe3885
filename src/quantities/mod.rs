//! The built-in quantities. Each module declares a dimension marker, the unit definitions for that
//! dimension, a model alias, and a `register` function that adds its patterns to a
//! [`RegistryBuilder`].

pub mod electric_field_strength;
pub mod electric_potential;
pub mod electrocaloric_strength;
pub mod energy;
pub mod length;
pub mod temperature;

use crate::error::UnitError;
use crate::registry::RegistryBuilder;

/// Registers every built-in quantity. Order matters where spellings overlap: `EV` is read as an
/// electronvolt rather than an exavolt because energy is registered before potential.
pub fn register_all(builder: &mut RegistryBuilder) -> Result<(), UnitError> {
    length::register(builder)?;
    temperature::register(builder)?;
    energy::register(builder)?;
    electric_potential::register(builder)?;
    electric_field_strength::register(builder)?;
    electrocaloric_strength::register(builder)?;
    Ok(())
}
