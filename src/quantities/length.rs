//! Length.

use crate::dimension::{BaseDimension, Dimension, NamedDimension};
use crate::error::UnitError;
use crate::model::QuantityModel;
use crate::registry::RegistryBuilder;
use crate::unit::{Unit, UnitOf};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Length;

impl NamedDimension for Length {
    const NAME: &'static str = "Length";

    fn dimension() -> Dimension {
        Dimension::base(BaseDimension::Length)
    }
}

pub type LengthModel = QuantityModel<Length>;
pub type LengthUnit = UnitOf<Length>;

linear_unit!(
    /// The metre. Standard unit of length.
    Meter,
    "m",
    Length,
    1.0
);

linear_unit!(Angstrom, "Å", Length, 1e-10);

pub fn register(builder: &mut RegistryBuilder) -> Result<(), UnitError> {
    builder
        .register_prefixed::<Length>("m", &Meter)?
        .register::<Length>("(metre|meter)s?", &Meter)?
        .register::<Length>("\u{00C5}|\u{212B}|A\u{030A}|(A|a)ngstroms?", &Angstrom)?
        .set_standard::<Length>(Unit::new(&Meter))?;
    Ok(())
}
