//! Interop with `uom`, for handing extracted values to code that checks dimensions at compile time.

use std::ops::Div;

use uom::si::electric_potential::volt;
use uom::si::energy::joule;
pub use uom::si::f64 as si;
use uom::si::length::meter;

use crate::dimension::NamedDimension;
use crate::error::UnitError;
use crate::model::QuantityModel;
use crate::quantities::electric_field_strength::ElectricFieldStrength;
use crate::quantities::electric_potential::ElectricPotential;
use crate::quantities::energy::Energy;
use crate::quantities::length::Length;

/// A dimension with a matching `uom` quantity. The standard unit of the dimension must be the
/// SI coherent unit.
pub trait UomQuantity: NamedDimension {
    type Quantity;

    fn from_standard_value(value: f64) -> Self::Quantity;
}

impl UomQuantity for Length {
    type Quantity = si::Length;

    fn from_standard_value(value: f64) -> si::Length {
        si::Length::new::<meter>(value)
    }
}

impl UomQuantity for ElectricPotential {
    type Quantity = si::ElectricPotential;

    fn from_standard_value(value: f64) -> si::ElectricPotential {
        si::ElectricPotential::new::<volt>(value)
    }
}

impl UomQuantity for Energy {
    type Quantity = si::Energy;

    fn from_standard_value(value: f64) -> si::Energy {
        si::Energy::new::<joule>(value)
    }
}

impl UomQuantity for ElectricFieldStrength {
    type Quantity = <si::ElectricPotential as Div<si::Length>>::Output;

    fn from_standard_value(value: f64) -> Self::Quantity {
        si::ElectricPotential::new::<volt>(value) / si::Length::new::<meter>(1.0)
    }
}

impl<D: UomQuantity> QuantityModel<D> {
    /// The value as a `uom` quantity. Ranges have no single value to convert.
    pub fn to_uom(&self) -> Result<D::Quantity, UnitError> {
        let value = self
            .value()
            .ok_or(UnitError::MissingValue)?
            .as_single()
            .ok_or(UnitError::NotSingleValue)?;
        let unit = self.unit().ok_or(UnitError::MissingUnit)?;
        Ok(D::from_standard_value(unit.convert_value_to_standard(value)))
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_relative_eq, assert_ulps_eq};
    use uom::si::electric_potential::kilovolt;
    use uom::si::energy::electronvolt;
    use uom::si::length::{angstrom, centimeter};

    use super::*;
    use crate::model::QuantityValue;
    use crate::quantities::electric_field_strength::ElectricFieldStrengthModel;
    use crate::quantities::energy::EnergyModel;
    use crate::quantities::length::LengthModel;
    use crate::registry::UnitRegistry;

    #[test]
    fn test_angstrom() {
        let registry = UnitRegistry::standard().unwrap();
        let model = LengthModel::new()
            .with_value(QuantityValue::Single(3.0))
            .with_unit(registry.resolve("Å").unwrap())
            .unwrap();
        let ours = model.to_uom().unwrap();
        assert_ulps_eq!(ours.get::<angstrom>(), 3.0, max_ulps = 4);
        assert_ulps_eq!(ours.get::<meter>(), si::Length::new::<angstrom>(3.0).get::<meter>());
    }

    #[test]
    fn test_kilovolt_per_centimeter() {
        let registry = UnitRegistry::standard().unwrap();
        let model = ElectricFieldStrengthModel::new()
            .with_value(QuantityValue::Single(2.5))
            .with_unit(registry.resolve("kV/cm").unwrap())
            .unwrap();
        let expected =
            si::ElectricPotential::new::<kilovolt>(2.5) / si::Length::new::<centimeter>(1.0);
        assert_relative_eq!(model.to_uom().unwrap().value, expected.value, max_relative = 1e-12);
        assert_relative_eq!(expected.value, 2.5e5, max_relative = 1e-12);
    }

    #[test]
    fn test_electronvolt() {
        let registry = UnitRegistry::standard().unwrap();
        let model = EnergyModel::new()
            .with_value(QuantityValue::Single(1.0))
            .with_unit(registry.resolve("eV").unwrap())
            .unwrap();
        // uom uses the exact 2019 value; ours is CODATA 2014.
        assert_relative_eq!(
            model.to_uom().unwrap().get::<electronvolt>(),
            1.0,
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_to_uom_errors() {
        let registry = UnitRegistry::standard().unwrap();
        let unit = registry.resolve("V/m").unwrap();

        let model = ElectricFieldStrengthModel::new().with_unit(unit.clone()).unwrap();
        assert!(matches!(model.to_uom(), Err(UnitError::MissingValue)));

        let model = ElectricFieldStrengthModel::new().with_value(QuantityValue::Single(1.0));
        assert!(matches!(model.to_uom(), Err(UnitError::MissingUnit)));

        let model = ElectricFieldStrengthModel::new()
            .with_value(QuantityValue::range(1.0, 2.0))
            .with_unit(unit)
            .unwrap();
        assert!(matches!(model.to_uom(), Err(UnitError::NotSingleValue)));
    }
}
