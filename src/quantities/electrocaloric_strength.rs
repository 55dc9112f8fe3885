//! Electrocaloric strength: the temperature change of a material per unit applied field, so
//! temperature × length / potential.

use crate::dimension::{Dimension, NamedDimension};
use crate::error::UnitError;
use crate::model::QuantityModel;
use crate::registry::RegistryBuilder;
use crate::unit::{Unit, UnitOf};

use super::electric_potential::ElectricPotential;
use super::length::Length;
use super::temperature::Temperature;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ElectrocaloricStrength;

impl NamedDimension for ElectrocaloricStrength {
    const NAME: &'static str = "ElectrocaloricStrength";

    fn dimension() -> Dimension {
        Temperature::dimension() * Length::dimension() / ElectricPotential::dimension()
    }
}

pub type ElectrocaloricStrengthModel = QuantityModel<ElectrocaloricStrength>;
pub type ElectrocaloricStrengthUnit = UnitOf<ElectrocaloricStrength>;

linear_unit!(
    /// Kelvin metres per volt. Standard unit of electrocaloric strength.
    KelvinMeterPerVolt,
    "K·m/V",
    ElectrocaloricStrength,
    1.0
);

pub fn register(builder: &mut RegistryBuilder) -> Result<(), UnitError> {
    builder
        .register::<ElectrocaloricStrength>("K( |·|\\*)?m/V", &KelvinMeterPerVolt)?
        .set_standard::<ElectrocaloricStrength>(Unit::new(&KelvinMeterPerVolt))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::UnitRegistry;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spellings() {
        let reg = UnitRegistry::standard().unwrap();
        assert_eq!(reg.resolve("K·m/V").unwrap(), Unit::new(&KelvinMeterPerVolt));
        assert_eq!(reg.resolve("Km/V").unwrap(), Unit::new(&KelvinMeterPerVolt));

        // Not registered as a whole, but composes to the same dimension.
        let k_cm_per_kv = reg.resolve("K·cm/kV").unwrap();
        assert_eq!(k_cm_per_kv.dimension(), &ElectrocaloricStrength::dimension());
        let standard = reg
            .standard_unit(&ElectrocaloricStrength::dimension())
            .unwrap();
        assert_relative_eq!(
            k_cm_per_kv.convert_value(1.0, standard).unwrap(),
            1e-5,
            max_relative = 1e-12
        );
    }
}
