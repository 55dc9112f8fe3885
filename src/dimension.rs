//! Physical dimensions and their algebra. A [`Dimension`] is a product of powers of the SI base
//! quantities, so composing dimensions is just adding exponents.

use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display};
use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

use crate::algebra::Group;

/// The seven SI base quantities. Every other dimension is built from these.
#[derive(
    Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum BaseDimension {
    Length,
    Mass,
    Time,
    Temperature,
    Current,
    Amount,
    Luminosity,
}

impl BaseDimension {
    pub const ALL: [BaseDimension; 7] = [
        Self::Length,
        Self::Mass,
        Self::Time,
        Self::Temperature,
        Self::Current,
        Self::Amount,
        Self::Luminosity,
    ];

    /// The conventional one-letter symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Length => "L",
            Self::Mass => "M",
            Self::Time => "T",
            Self::Temperature => "Θ",
            Self::Current => "I",
            Self::Amount => "N",
            Self::Luminosity => "J",
        }
    }
}

/// A physical dimension: base quantities raised to non-zero integer powers. The empty product is
/// [`Dimension::dimensionless`].
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    powers: BTreeMap<BaseDimension, i32>,
}

impl Dimension {
    /// The dimension of pure numbers.
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// A single base quantity to the first power.
    pub fn base(base: BaseDimension) -> Self {
        Self::from_powers([(base, 1)])
    }

    /// Builds a dimension from `(base, power)` pairs. Repeated bases are combined and zero powers
    /// are dropped. Powers saturate at the bounds of `i32`.
    pub fn from_powers<T: IntoIterator<Item = (BaseDimension, i32)>>(powers: T) -> Self {
        let mut out = BTreeMap::new();
        for (base, power) in powers {
            let p = out.entry(base).or_insert(0i32);
            *p = p.saturating_add(power);
        }
        out.retain(|_, p| *p != 0);
        Self { powers: out }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.powers.is_empty()
    }

    /// The power of a base quantity, zero if absent.
    pub fn power_of(&self, base: BaseDimension) -> i32 {
        self.powers.get(&base).copied().unwrap_or(0)
    }

    pub fn powers(&self) -> impl Iterator<Item = (BaseDimension, i32)> + '_ {
        self.powers.iter().map(|(b, p)| (*b, *p))
    }

    /// Raises every exponent to the `n`th power. `powi(0)` is dimensionless.
    pub fn powi(&self, n: i32) -> Self {
        Self::from_powers(self.powers().map(|(b, p)| (b, p.saturating_mul(n))))
    }

    pub fn inv(&self) -> Self {
        self.powi(-1)
    }
}

impl Mul for &Dimension {
    type Output = Dimension;

    fn mul(self, rhs: &Dimension) -> Dimension {
        Dimension::from_powers(self.powers().chain(rhs.powers()))
    }
}

impl Mul for Dimension {
    type Output = Dimension;

    fn mul(self, rhs: Dimension) -> Dimension {
        &self * &rhs
    }
}

impl Div for &Dimension {
    type Output = Dimension;

    fn div(self, rhs: &Dimension) -> Dimension {
        self * &rhs.inv()
    }
}

impl Div for Dimension {
    type Output = Dimension;

    fn div(self, rhs: Dimension) -> Dimension {
        &self / &rhs
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }
        let parts: Vec<String> = self
            .powers()
            .map(|(b, p)| {
                if p == 1 {
                    b.symbol().to_string()
                } else {
                    format!("{}^{}", b.symbol(), p)
                }
            })
            .collect();
        write!(f, "{}", parts.join("·"))
    }
}

/// A dimension with a name, like `Length` or `ElectricFieldStrength`. Implemented by zero-sized
/// markers so quantity models can be typed by their dimension.
pub trait NamedDimension: Debug + Copy + Default + Send + Sync + 'static {
    const NAME: &'static str;

    fn dimension() -> Dimension;
}

/// Dimensions under multiplication. The free abelian group on the seven base quantities.
#[derive(Debug, Default, Copy, Clone)]
pub struct DimensionGroup;

impl Group<Dimension> for DimensionGroup {
    fn identity(&self) -> Dimension {
        Dimension::dimensionless()
    }

    fn inv(&self, element: &Dimension) -> Dimension {
        element.inv()
    }

    fn compose(&self, a: &Dimension, b: &Dimension) -> Dimension {
        a * b
    }

    fn equiv(&self, a: &Dimension, b: &Dimension) -> bool {
        a == b
    }

    fn pow(&self, a: &Dimension, n: i32) -> Dimension {
        a.powi(n)
    }
}
