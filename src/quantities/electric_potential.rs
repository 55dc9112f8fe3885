//! Electric potential.

use crate::dimension::{BaseDimension, Dimension, NamedDimension};
use crate::error::UnitError;
use crate::model::QuantityModel;
use crate::registry::RegistryBuilder;
use crate::unit::{Unit, UnitOf};

/// Electric potential, M·L²·T⁻³·I⁻¹.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ElectricPotential;

impl NamedDimension for ElectricPotential {
    const NAME: &'static str = "ElectricPotential";

    fn dimension() -> Dimension {
        Dimension::from_powers([
            (BaseDimension::Mass, 1),
            (BaseDimension::Length, 2),
            (BaseDimension::Time, -3),
            (BaseDimension::Current, -1),
        ])
    }
}

pub type ElectricPotentialModel = QuantityModel<ElectricPotential>;
pub type ElectricPotentialUnit = UnitOf<ElectricPotential>;

linear_unit!(
    /// The volt. Standard unit of electric potential.
    Volt,
    "V",
    ElectricPotential,
    1.0
);

pub fn register(builder: &mut RegistryBuilder) -> Result<(), UnitError> {
    builder
        .register_prefixed::<ElectricPotential>("V", &Volt)?
        .register::<ElectricPotential>("(V|v)olts?", &Volt)?
        .set_standard::<ElectricPotential>(Unit::new(&Volt))?;
    Ok(())
}
