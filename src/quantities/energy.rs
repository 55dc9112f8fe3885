//! Energy.

use crate::dimension::{BaseDimension, Dimension, NamedDimension};
use crate::error::UnitError;
use crate::model::QuantityModel;
use crate::registry::RegistryBuilder;
use crate::unit::{Unit, UnitOf};

/// Energy, M·L²·T⁻².
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Energy;

impl NamedDimension for Energy {
    const NAME: &'static str = "Energy";

    fn dimension() -> Dimension {
        Dimension::from_powers([
            (BaseDimension::Mass, 1),
            (BaseDimension::Length, 2),
            (BaseDimension::Time, -2),
        ])
    }
}

pub type EnergyModel = QuantityModel<Energy>;
pub type EnergyUnit = UnitOf<Energy>;

/// Joules per electronvolt (CODATA 2014).
pub const JOULES_PER_ELECTRONVOLT: f64 = 1.6021766208e-19;

linear_unit!(
    /// The joule. Standard unit of energy.
    Joule,
    "J",
    Energy,
    1.0
);

linear_unit!(ElectronVolt, "eV", Energy, JOULES_PER_ELECTRONVOLT);

linear_unit!(Erg, "erg", Energy, 1e-7);

pub fn register(builder: &mut RegistryBuilder) -> Result<(), UnitError> {
    builder
        .register::<Energy>("(J|j)(oule(s)?)?", &Joule)?
        .register_prefixed::<Energy>("J", &Joule)?
        .register::<Energy>("(E|e)(lectron)?( )?(V|v)(olts)?", &ElectronVolt)?
        .register_prefixed::<Energy>("eV", &ElectronVolt)?
        .register::<Energy>("(E|e)rgs?", &Erg)?
        .set_standard::<Energy>(Unit::new(&Joule))?;
    Ok(())
}
