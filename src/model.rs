//! Quantity models: extracted values tagged with a dimension and, usually, a unit.
//!
//! [`Measurement`] is untyped and is what the scanner produces. [`QuantityModel`] is the same data
//! typed by a [`NamedDimension`], so downstream code can't mix up a length and a field strength.

use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::ops::{Div, Mul, Range};

use serde::{Deserialize, Serialize};

use crate::dimension::{Dimension, NamedDimension};
use crate::error::UnitError;
use crate::registry::UnitRegistry;
use crate::unit::Unit;

/// A single value or a range of values, e.g. `300 K` or `300-350 K`. Ranges are always stored with
/// the lower bound first.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityValue {
    Single(f64),
    Range(f64, f64),
}

impl QuantityValue {
    /// A range, sorted so that the lower bound comes first.
    pub fn range(a: f64, b: f64) -> Self {
        if b < a {
            Self::Range(b, a)
        } else {
            Self::Range(a, b)
        }
    }

    /// Applies `f` to every number. Ranges are re-sorted, since `f` may be decreasing.
    pub fn map<F: Fn(f64) -> f64>(self, f: F) -> Self {
        match self {
            Self::Single(v) => Self::Single(f(v)),
            Self::Range(a, b) => Self::range(f(a), f(b)),
        }
    }

    pub fn powi(self, n: i32) -> Self {
        self.map(|v| v.powi(n))
    }

    /// The value, if it isn't a range.
    pub fn as_single(&self) -> Option<f64> {
        match self {
            Self::Single(v) => Some(*v),
            Self::Range(..) => None,
        }
    }

    /// Lower and upper bound. Both are the value itself for a single value.
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Self::Single(v) => (*v, *v),
            Self::Range(a, b) => (*a, *b),
        }
    }
}

/// Range × range multiplies the ends, which always covers the whole product range because both
/// operands are sorted.
impl Mul for QuantityValue {
    type Output = QuantityValue;

    fn mul(self, rhs: QuantityValue) -> QuantityValue {
        match (self, rhs) {
            (Self::Single(a), Self::Single(b)) => Self::Single(a * b),
            (Self::Range(a1, a2), Self::Range(b1, b2)) => Self::range(a1 * b1, a2 * b2),
            (Self::Range(a1, a2), Self::Single(b)) | (Self::Single(b), Self::Range(a1, a2)) => {
                Self::range(a1 * b, a2 * b)
            }
        }
    }
}

impl Display for QuantityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(v) => write!(f, "{}", v),
            Self::Range(a, b) => write!(f, "{}–{}", a, b),
        }
    }
}

/// A measurement of some dimension, typically found in text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    /// Name of the registered dimension, if it has one.
    pub quantity: Option<&'static str>,
    pub dimension: Dimension,
    pub value: Option<QuantityValue>,
    pub error: Option<f64>,
    pub unit: Option<Unit>,
    pub raw_value: Option<String>,
    pub raw_units: Option<String>,
    /// Byte offsets into the scanned text.
    pub span: Option<Range<usize>>,
}

impl Measurement {
    pub fn new(dimension: Dimension) -> Self {
        Self {
            quantity: None,
            dimension,
            value: None,
            error: None,
            unit: None,
            raw_value: None,
            raw_units: None,
            span: None,
        }
    }

    pub fn with_value(mut self, value: QuantityValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_error(mut self, error: f64) -> Self {
        self.error = Some(error);
        self
    }

    /// Sets the unit, which must have this measurement's dimension.
    pub fn with_unit(mut self, unit: Unit) -> Result<Self, UnitError> {
        if *unit.dimension() != self.dimension {
            return Err(UnitError::DimensionMismatch {
                expected: self.dimension.clone(),
                found: unit.dimension().clone(),
            });
        }
        self.unit = Some(unit);
        Ok(self)
    }

    /// Converts the value from the current unit into `to`.
    pub fn convert_to(&self, to: &Unit) -> Result<QuantityValue, UnitError> {
        let from = self.unit.as_ref().ok_or(UnitError::MissingUnit)?;
        self.convert(from, to)
    }

    /// Converts the value as if it were in `from`, into `to`.
    pub fn convert(&self, from: &Unit, to: &Unit) -> Result<QuantityValue, UnitError> {
        let value = self.value.ok_or(UnitError::MissingValue)?;
        to.check_same_dimension(from)?;
        Ok(value.map(|v| to.convert_value_from_standard(from.convert_value_to_standard(v))))
    }

    /// Converts the error into `to`. `Ok(None)` if there is no error.
    pub fn convert_error_to(&self, to: &Unit) -> Result<Option<f64>, UnitError> {
        let from = self.unit.as_ref().ok_or(UnitError::MissingUnit)?;
        self.error.map(|e| from.convert_error(e, to)).transpose()
    }

    /// A copy of this measurement expressed in the registry's standard unit for its dimension.
    pub fn to_standard(&self, registry: &UnitRegistry) -> Result<Measurement, UnitError> {
        let standard = registry
            .standard_unit(&self.dimension)
            .ok_or_else(|| UnitError::UnknownDimension(self.dimension.to_string()))?;
        Ok(Measurement {
            value: Some(self.convert_to(standard)?),
            error: self.convert_error_to(standard)?,
            unit: Some(standard.clone()),
            ..self.clone()
        })
    }

    /// Raises value, unit and dimension to the `n`th power. The error is dropped.
    pub fn powi(&self, n: i32) -> Measurement {
        Measurement {
            dimension: self.dimension.powi(n),
            value: self.value.map(|v| v.powi(n)),
            unit: self.unit.as_ref().map(|u| u.powi(n)),
            ..Measurement::new(Dimension::dimensionless())
        }
    }
}

/// Multiplies dimensions, values, and units. Values and units are only kept when both sides have
/// them. Errors are dropped.
impl Mul for &Measurement {
    type Output = Measurement;

    fn mul(self, rhs: &Measurement) -> Measurement {
        let value = match (self.value, rhs.value) {
            (Some(a), Some(b)) => Some(a * b),
            _ => None,
        };
        let unit = match (&self.unit, &rhs.unit) {
            (Some(a), Some(b)) => Some(a * b),
            _ => None,
        };
        Measurement {
            value,
            unit,
            ..Measurement::new(&self.dimension * &rhs.dimension)
        }
    }
}

impl Div for &Measurement {
    type Output = Measurement;

    fn div(self, rhs: &Measurement) -> Measurement {
        self * &rhs.powi(-1)
    }
}

impl Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{}", v)?,
            None => write!(f, "?")?,
        }
        if let Some(e) = self.error {
            write!(f, " ± {}", e)?;
        }
        if let Some(u) = &self.unit {
            write!(f, " {}", u)?;
        }
        Ok(())
    }
}

/// A measurement of the dimension `D`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QuantityModel<D: NamedDimension> {
    inner: Measurement,
    #[serde(skip)]
    _dimension: PhantomData<D>,
}

impl<D: NamedDimension> Default for QuantityModel<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: NamedDimension> QuantityModel<D> {
    pub fn new() -> Self {
        let mut inner = Measurement::new(D::dimension());
        inner.quantity = Some(D::NAME);
        Self {
            inner,
            _dimension: PhantomData,
        }
    }

    pub fn with_value(mut self, value: QuantityValue) -> Self {
        self.inner.value = Some(value);
        self
    }

    pub fn with_error(mut self, error: f64) -> Self {
        self.inner.error = Some(error);
        self
    }

    /// Sets the unit. A unit of another dimension is rejected and the model is left unchanged.
    pub fn set_unit(&mut self, unit: Unit) -> Result<(), UnitError> {
        let expected = D::dimension();
        if *unit.dimension() != expected {
            return Err(UnitError::DimensionMismatch {
                expected,
                found: unit.dimension().clone(),
            });
        }
        self.inner.unit = Some(unit);
        Ok(())
    }

    pub fn with_unit(mut self, unit: Unit) -> Result<Self, UnitError> {
        self.set_unit(unit)?;
        Ok(self)
    }

    pub fn value(&self) -> Option<QuantityValue> {
        self.inner.value
    }

    pub fn error(&self) -> Option<f64> {
        self.inner.error
    }

    pub fn unit(&self) -> Option<&Unit> {
        self.inner.unit.as_ref()
    }

    pub fn convert_to(&self, to: &Unit) -> Result<QuantityValue, UnitError> {
        self.inner.convert_to(to)
    }

    pub fn convert_error_to(&self, to: &Unit) -> Result<Option<f64>, UnitError> {
        self.inner.convert_error_to(to)
    }

    /// The value in the registry's standard unit for `D`.
    pub fn convert_to_standard(&self, registry: &UnitRegistry) -> Result<QuantityValue, UnitError> {
        let standard = registry
            .standard_unit(&D::dimension())
            .ok_or_else(|| UnitError::UnknownDimension(D::NAME.to_string()))?;
        self.convert_to(standard)
    }

    pub fn measurement(&self) -> &Measurement {
        &self.inner
    }

    pub fn into_measurement(self) -> Measurement {
        self.inner
    }
}

impl<D: NamedDimension> TryFrom<Measurement> for QuantityModel<D> {
    type Error = UnitError;

    fn try_from(mut m: Measurement) -> Result<Self, Self::Error> {
        let expected = D::dimension();
        if m.dimension != expected {
            return Err(UnitError::DimensionMismatch {
                expected,
                found: m.dimension,
            });
        }
        m.quantity = Some(D::NAME);
        Ok(Self {
            inner: m,
            _dimension: PhantomData,
        })
    }
}

impl<D: NamedDimension> From<QuantityModel<D>> for Measurement {
    fn from(model: QuantityModel<D>) -> Self {
        model.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantities::electric_field_strength::{ElectricFieldStrength, EFS};
    use crate::quantities::electric_potential::{ElectricPotentialModel, Volt};
    use crate::quantities::length::{LengthModel, Meter};
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_range_is_sorted() {
        assert_eq!(QuantityValue::range(5.0, 2.0), QuantityValue::Range(2.0, 5.0));
        assert_eq!(
            QuantityValue::range(1.0, 2.0).map(|v| -v),
            QuantityValue::Range(-2.0, -1.0)
        );
    }

    #[test]
    fn test_value_products() {
        let r = QuantityValue::range(1.0, 2.0);
        assert_eq!(r * QuantityValue::Single(3.0), QuantityValue::Range(3.0, 6.0));
        assert_eq!(
            QuantityValue::Single(-1.0) * r,
            QuantityValue::Range(-2.0, -1.0)
        );
        assert_eq!(r * r, QuantityValue::Range(1.0, 4.0));
    }

    #[test]
    fn test_model_rejects_wrong_unit() {
        let mut model = LengthModel::new();
        assert!(model.set_unit(Unit::new(&Volt)).is_err());
        assert!(model.unit().is_none());
        model.set_unit(Unit::new(&Meter).with_magnitude(-2)).unwrap();
        assert!(model.unit().is_some());
    }

    #[test]
    fn test_convert_requires_value_and_unit() {
        let model = LengthModel::new();
        assert!(matches!(
            model.convert_to(&Unit::new(&Meter)),
            Err(UnitError::MissingUnit)
        ));
        let model = model.with_unit(Unit::new(&Meter)).unwrap();
        assert!(matches!(
            model.convert_to(&Unit::new(&Meter)),
            Err(UnitError::MissingValue)
        ));
    }

    #[test]
    fn test_divide_models() {
        let potential = ElectricPotentialModel::new()
            .with_value(QuantityValue::Single(3.0))
            .with_unit(Unit::new(&Volt).with_magnitude(3))
            .unwrap();
        let gap = LengthModel::new()
            .with_value(QuantityValue::range(1.0, 2.0))
            .with_unit(Unit::new(&Meter).with_magnitude(-2))
            .unwrap();

        let field = potential.measurement() / gap.measurement();
        assert_eq!(field.dimension, ElectricFieldStrength::dimension());
        assert_eq!(field.value, Some(QuantityValue::Range(1.5, 3.0)));

        let in_efs = field.convert_to(&Unit::new(&EFS)).unwrap();
        let (lo, hi) = in_efs.bounds();
        assert_relative_eq!(lo, 1.5e5, max_relative = 1e-12);
        assert_relative_eq!(hi, 3.0e5, max_relative = 1e-12);

        let typed = crate::quantities::electric_field_strength::ElectricFieldStrengthModel::try_from(field)
            .unwrap();
        assert!(typed.unit().is_some());
    }

    #[test]
    fn test_error_conversion() {
        let m = LengthModel::new()
            .with_value(QuantityValue::Single(2.0))
            .with_error(0.1)
            .with_unit(Unit::new(&Meter).with_magnitude(3))
            .unwrap();
        let err = m.convert_error_to(&Unit::new(&Meter)).unwrap().unwrap();
        assert_relative_eq!(err, 100.0, max_relative = 1e-12);
    }
}
