//! Units: concrete ways of measuring a dimension. A [`UnitDefinition`] describes how one named unit
//! converts to the standard unit of its dimension. A [`Unit`] is what text resolves to: one or
//! more definitions raised to integer powers, times a power of ten from any SI prefixes.

use std::fmt::{self, Debug, Display};
use std::marker::PhantomData;
use std::ops::{Div, Mul};

use serde::{Serialize, Serializer};

use crate::algebra::Group;
use crate::dimension::{Dimension, DimensionGroup, NamedDimension};
use crate::error::UnitError;

/// How a single named unit converts to and from its dimension's standard unit. Implemented by
/// zero-sized types, which are then referred to as `&'static dyn UnitDefinition`.
pub trait UnitDefinition: Debug + Send + Sync {
    /// Unique name, used for equality of units.
    fn name(&self) -> &'static str;

    /// Short symbol for display.
    fn symbol(&self) -> &'static str;

    fn dimension(&self) -> Dimension;

    fn convert_value_to_standard(&self, value: f64) -> f64;

    fn convert_value_from_standard(&self, value: f64) -> f64;

    /// Errors are differences, so unlike values they never pick up an offset.
    fn convert_error_to_standard(&self, error: f64) -> f64;

    fn convert_error_from_standard(&self, error: f64) -> f64;

    /// The size of one of this unit in standard units, ignoring any offset. Used when the
    /// definition appears inside a composite unit.
    fn scale(&self) -> f64 {
        self.convert_value_to_standard(1.0) - self.convert_value_to_standard(0.0)
    }

    /// The decimal magnitude implied by a spelling of this unit that matched one of its patterns,
    /// e.g. 3 for `kJ`. `None` if the spelling can't be interpreted.
    fn magnitude_of(&self, _spelling: &str) -> Option<i32> {
        Some(0)
    }
}

/// Defines a zero-sized [`UnitDefinition`] that is a fixed multiple of the standard unit.
macro_rules! linear_unit {
    ($(#[$meta:meta])* $i:ident, $sym:literal, $dim:ty, $factor:expr) => {
        $(#[$meta])*
        #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
        pub struct $i;

        impl $crate::unit::UnitDefinition for $i {
            fn name(&self) -> &'static str {
                stringify!($i)
            }

            fn symbol(&self) -> &'static str {
                $sym
            }

            fn dimension(&self) -> $crate::dimension::Dimension {
                <$dim as $crate::dimension::NamedDimension>::dimension()
            }

            fn convert_value_to_standard(&self, value: f64) -> f64 {
                value * $factor
            }

            fn convert_value_from_standard(&self, value: f64) -> f64 {
                value / $factor
            }

            fn convert_error_to_standard(&self, error: f64) -> f64 {
                error * $factor
            }

            fn convert_error_from_standard(&self, error: f64) -> f64 {
                error / $factor
            }
        }
    };
}

/// A unit as it appears in text: definitions raised to powers, times `10^magnitude`.
#[derive(Debug, Clone)]
pub struct Unit {
    dimension: Dimension,
    magnitude: i32,
    /// Sorted by definition name, no zero powers, no repeated names.
    factors: Vec<(&'static dyn UnitDefinition, i32)>,
}

impl Unit {
    /// A single definition with no prefix.
    pub fn new(definition: &'static dyn UnitDefinition) -> Self {
        Self {
            dimension: definition.dimension(),
            magnitude: 0,
            factors: vec![(definition, 1)],
        }
    }

    /// The unit of pure numbers.
    pub fn dimensionless() -> Self {
        Self {
            dimension: Dimension::dimensionless(),
            magnitude: 0,
            factors: vec![],
        }
    }

    /// Sets the decimal magnitude, e.g. 3 turns volts into kilovolts.
    pub fn with_magnitude(mut self, magnitude: i32) -> Self {
        self.magnitude = magnitude;
        self
    }

    fn from_factors<T>(magnitude: i32, factors: T) -> Self
    where
        T: IntoIterator<Item = (&'static dyn UnitDefinition, i32)>,
    {
        let mut merged: Vec<(&'static dyn UnitDefinition, i32)> = vec![];
        for (def, power) in factors {
            match merged.iter_mut().find(|(d, _)| d.name() == def.name()) {
                Some((_, p)) => *p = p.saturating_add(power),
                None => merged.push((def, power)),
            }
        }
        merged.retain(|(_, p)| *p != 0);
        merged.sort_by_key(|(d, _)| d.name());

        let powers: Vec<Dimension> = merged.iter().map(|(d, p)| d.dimension().powi(*p)).collect();
        let dimension = DimensionGroup.reduce(&powers);

        Self {
            dimension,
            magnitude,
            factors: merged,
        }
    }

    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    pub fn magnitude(&self) -> i32 {
        self.magnitude
    }

    pub fn factors(&self) -> impl Iterator<Item = (&'static dyn UnitDefinition, i32)> + '_ {
        self.factors.iter().copied()
    }

    /// The definition, if this is a single definition to the first power.
    pub fn definition(&self) -> Option<&'static dyn UnitDefinition> {
        match self.factors.as_slice() {
            [(def, 1)] => Some(*def),
            _ => None,
        }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.factors.is_empty()
    }

    /// Raises the unit to the `n`th power. Magnitude and powers saturate at the bounds of `i32`.
    pub fn powi(&self, n: i32) -> Self {
        Self::from_factors(
            self.magnitude.saturating_mul(n),
            self.factors.iter().map(|(d, p)| (*d, p.saturating_mul(n))),
        )
    }

    fn composite_scale(&self) -> f64 {
        self.factors
            .iter()
            .map(|(d, p)| d.scale().powi(*p))
            .product()
    }

    fn ten_to_magnitude(&self) -> f64 {
        10f64.powi(self.magnitude)
    }

    pub fn convert_value_to_standard(&self, value: f64) -> f64 {
        let value = value * self.ten_to_magnitude();
        match self.definition() {
            Some(def) => def.convert_value_to_standard(value),
            None => value * self.composite_scale(),
        }
    }

    pub fn convert_value_from_standard(&self, value: f64) -> f64 {
        let value = match self.definition() {
            Some(def) => def.convert_value_from_standard(value),
            None => value / self.composite_scale(),
        };
        value / self.ten_to_magnitude()
    }

    pub fn convert_error_to_standard(&self, error: f64) -> f64 {
        let error = error * self.ten_to_magnitude();
        match self.definition() {
            Some(def) => def.convert_error_to_standard(error),
            None => error * self.composite_scale(),
        }
    }

    pub fn convert_error_from_standard(&self, error: f64) -> f64 {
        let error = match self.definition() {
            Some(def) => def.convert_error_from_standard(error),
            None => error / self.composite_scale(),
        };
        error / self.ten_to_magnitude()
    }

    /// Checks that `other` measures the same dimension.
    pub fn check_same_dimension(&self, other: &Unit) -> Result<(), UnitError> {
        if self.dimension == other.dimension {
            Ok(())
        } else {
            Err(UnitError::DimensionMismatch {
                expected: self.dimension.clone(),
                found: other.dimension.clone(),
            })
        }
    }

    /// Converts a value in this unit into `to`.
    pub fn convert_value(&self, value: f64, to: &Unit) -> Result<f64, UnitError> {
        to.check_same_dimension(self)?;
        Ok(to.convert_value_from_standard(self.convert_value_to_standard(value)))
    }

    /// Converts an error in this unit into `to`.
    pub fn convert_error(&self, error: f64, to: &Unit) -> Result<f64, UnitError> {
        to.check_same_dimension(self)?;
        Ok(to.convert_error_from_standard(self.convert_error_to_standard(error)))
    }
}

impl From<&'static dyn UnitDefinition> for Unit {
    fn from(def: &'static dyn UnitDefinition) -> Self {
        Unit::new(def)
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.magnitude == other.magnitude
            && self.factors.len() == other.factors.len()
            && self
                .factors
                .iter()
                .zip(&other.factors)
                .all(|((d1, p1), (d2, p2))| d1.name() == d2.name() && p1 == p2)
    }
}

impl Mul for &Unit {
    type Output = Unit;

    fn mul(self, rhs: &Unit) -> Unit {
        Unit::from_factors(
            self.magnitude.saturating_add(rhs.magnitude),
            self.factors().chain(rhs.factors()),
        )
    }
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        &self * &rhs
    }
}

impl Div for &Unit {
    type Output = Unit;

    fn div(self, rhs: &Unit) -> Unit {
        self * &rhs.powi(-1)
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        &self / &rhs
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<'a>(parts: impl Iterator<Item = (&'a dyn UnitDefinition, i32)>) -> String {
            parts
                .map(|(d, p)| {
                    if p == 1 {
                        d.symbol().to_string()
                    } else {
                        format!("{}^{}", d.symbol(), p)
                    }
                })
                .collect::<Vec<_>>()
                .join("·")
        }

        if self.magnitude != 0 {
            write!(f, "10^{}·", self.magnitude)?;
        }

        let num = join(self.factors().filter(|(_, p)| *p > 0));
        let den = join(self.factors().filter(|(_, p)| *p < 0).map(|(d, p)| (d, -p)));

        match (num.is_empty(), den.is_empty()) {
            (true, true) => write!(f, "1"),
            (false, true) => write!(f, "{}", num),
            (true, false) => write!(f, "1/{}", den),
            (false, false) => write!(f, "{}/{}", num, den),
        }
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A [`Unit`] known to measure the dimension `D`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitOf<D: NamedDimension> {
    unit: Unit,
    _dimension: PhantomData<D>,
}

impl<D: NamedDimension> UnitOf<D> {
    /// `definition` scaled by `10^magnitude`. Fails if the definition measures something else.
    pub fn new(definition: &'static dyn UnitDefinition, magnitude: i32) -> Result<Self, UnitError> {
        Self::try_from(Unit::new(definition).with_magnitude(magnitude))
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn into_unit(self) -> Unit {
        self.unit
    }
}

impl<D: NamedDimension> TryFrom<Unit> for UnitOf<D> {
    type Error = UnitError;

    fn try_from(unit: Unit) -> Result<Self, Self::Error> {
        let expected = D::dimension();
        if *unit.dimension() == expected {
            Ok(Self {
                unit,
                _dimension: PhantomData,
            })
        } else {
            Err(UnitError::DimensionMismatch {
                expected,
                found: unit.dimension().clone(),
            })
        }
    }
}

impl<D: NamedDimension> From<UnitOf<D>> for Unit {
    fn from(unit: UnitOf<D>) -> Self {
        unit.unit
    }
}

impl<D: NamedDimension> Display for UnitOf<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.unit, f)
    }
}
