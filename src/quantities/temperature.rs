//! Temperature. Celsius and Fahrenheit are offset from kelvin, so they implement
//! [`UnitDefinition`] by hand.

use crate::dimension::{BaseDimension, Dimension, NamedDimension};
use crate::error::UnitError;
use crate::model::QuantityModel;
use crate::registry::RegistryBuilder;
use crate::unit::{Unit, UnitDefinition, UnitOf};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Temperature;

impl NamedDimension for Temperature {
    const NAME: &'static str = "Temperature";

    fn dimension() -> Dimension {
        Dimension::base(BaseDimension::Temperature)
    }
}

pub type TemperatureModel = QuantityModel<Temperature>;
pub type TemperatureUnit = UnitOf<Temperature>;

const ZERO_CELSIUS: f64 = 273.15;

linear_unit!(
    /// The kelvin. Standard unit of temperature.
    Kelvin,
    "K",
    Temperature,
    1.0
);

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Celsius;

impl UnitDefinition for Celsius {
    fn name(&self) -> &'static str {
        "Celsius"
    }

    fn symbol(&self) -> &'static str {
        "°C"
    }

    fn dimension(&self) -> Dimension {
        Temperature::dimension()
    }

    fn convert_value_to_standard(&self, value: f64) -> f64 {
        value + ZERO_CELSIUS
    }

    fn convert_value_from_standard(&self, value: f64) -> f64 {
        value - ZERO_CELSIUS
    }

    fn convert_error_to_standard(&self, error: f64) -> f64 {
        error
    }

    fn convert_error_from_standard(&self, error: f64) -> f64 {
        error
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Fahrenheit;

impl UnitDefinition for Fahrenheit {
    fn name(&self) -> &'static str {
        "Fahrenheit"
    }

    fn symbol(&self) -> &'static str {
        "°F"
    }

    fn dimension(&self) -> Dimension {
        Temperature::dimension()
    }

    fn convert_value_to_standard(&self, value: f64) -> f64 {
        (value - 32.0) * 5.0 / 9.0 + ZERO_CELSIUS
    }

    fn convert_value_from_standard(&self, value: f64) -> f64 {
        (value - ZERO_CELSIUS) * 9.0 / 5.0 + 32.0
    }

    fn convert_error_to_standard(&self, error: f64) -> f64 {
        error * 5.0 / 9.0
    }

    fn convert_error_from_standard(&self, error: f64) -> f64 {
        error * 9.0 / 5.0
    }
}

pub fn register(builder: &mut RegistryBuilder) -> Result<(), UnitError> {
    builder
        .register_prefixed::<Temperature>("K", &Kelvin)?
        .register::<Temperature>("(K|k)elvins?", &Kelvin)?
        .register::<Temperature>("°C|℃|degC|oC|(C|c)elsius", &Celsius)?
        .register::<Temperature>("°F|℉|degF|(F|f)ahrenheit", &Fahrenheit)?
        .set_standard::<Temperature>(Unit::new(&Kelvin))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fahrenheit_roundtrip() {
        let f = Unit::new(&Fahrenheit);
        assert_relative_eq!(f.convert_value_to_standard(212.0), 373.15, epsilon = 1e-9);
        assert_relative_eq!(f.convert_value_from_standard(273.15), 32.0, epsilon = 1e-9);
        assert_relative_eq!(f.convert_error_to_standard(9.0), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_offset_dropped_in_composites() {
        // A temperature difference per metre: °C/m must scale like K/m.
        let per_m = Unit::new(&crate::quantities::length::Meter).powi(-1);
        let c_per_m = &Unit::new(&Celsius) * &per_m;
        assert_relative_eq!(c_per_m.convert_value_to_standard(2.0), 2.0, epsilon = 1e-9);
        assert_relative_eq!(Celsius.scale(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(Fahrenheit.scale(), 5.0 / 9.0, epsilon = 1e-12);
    }
}
