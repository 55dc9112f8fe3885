//! The unit registry: which spellings mean which units, and which unit is standard for each
//! dimension. Built once with a [`RegistryBuilder`] and immutable afterwards, so it can be shared
//! freely between scanners and threads.

use std::collections::HashMap;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::dimension::{Dimension, NamedDimension};
use crate::error::UnitError;
use crate::prefix;
use crate::quantities;
use crate::unit::{Unit, UnitDefinition};

/// Largest power, either sign, accepted on a factor of a composite unit.
pub const MAX_UNIT_POWER: i32 = 64;

/// How the decimal magnitude of a match is found.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PatternKind {
    /// The pattern is the whole spelling. The definition works out any magnitude itself.
    Exact,
    /// The pattern may be preceded by an SI prefix symbol.
    Prefixed,
}

/// A registered pattern.
#[derive(Debug, Clone)]
pub struct UnitPattern {
    quantity: &'static str,
    dimension: Dimension,
    pattern: String,
    kind: PatternKind,
    anchored: Regex,
    definition: &'static dyn UnitDefinition,
}

impl UnitPattern {
    pub fn quantity(&self) -> &'static str {
        self.quantity
    }

    pub fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    /// The pattern as registered, before anchoring or prefixing.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn definition(&self) -> &'static dyn UnitDefinition {
        self.definition
    }

    /// Whether the whole of `text` is a spelling of this pattern.
    pub fn is_full_match(&self, text: &str) -> bool {
        self.anchored.is_match(text)
    }

    /// Resolves `text` against this pattern alone.
    fn resolve(&self, text: &str) -> Option<Unit> {
        let caps = self.anchored.captures(text)?;
        let magnitude = match self.kind {
            PatternKind::Exact => self.definition.magnitude_of(text)?,
            PatternKind::Prefixed => {
                prefix::exponent_of(caps.name("prefix").map_or("", |m| m.as_str()))?
            }
        };
        Some(Unit::new(self.definition).with_magnitude(magnitude))
    }
}

/// Collects patterns and standard units, then freezes them into a [`UnitRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    patterns: Vec<UnitPattern>,
    standards: HashMap<Dimension, Unit>,
    names: HashMap<Dimension, &'static str>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push<D: NamedDimension>(
        &mut self,
        pattern: &str,
        kind: PatternKind,
        definition: &'static dyn UnitDefinition,
    ) -> Result<&mut Self, UnitError> {
        let expected = D::dimension();
        if definition.dimension() != expected {
            return Err(UnitError::DimensionMismatch {
                expected,
                found: definition.dimension(),
            });
        }

        let duplicate = self.patterns.iter().any(|p| {
            p.pattern == pattern && p.kind == kind && p.definition.name() == definition.name()
        });
        if duplicate {
            warn!(
                quantity = D::NAME,
                pattern, "unit pattern registered twice, ignoring"
            );
            return Ok(self);
        }

        let anchored_src = match kind {
            PatternKind::Exact => format!("^(?:{})$", pattern),
            PatternKind::Prefixed => format!(
                "^(?:(?P<prefix>{})?(?:{}))$",
                prefix::symbol_alternation(),
                pattern
            ),
        };
        let anchored = Regex::new(&anchored_src).map_err(|source| UnitError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        debug!(
            quantity = D::NAME,
            pattern,
            unit = definition.name(),
            ?kind,
            "registered unit pattern"
        );
        self.names.insert(expected.clone(), D::NAME);
        self.patterns.push(UnitPattern {
            quantity: D::NAME,
            dimension: expected,
            pattern: pattern.to_string(),
            kind,
            anchored,
            definition,
        });
        Ok(self)
    }

    /// Registers a pattern whose matches are spellings of `definition`.
    pub fn register<D: NamedDimension>(
        &mut self,
        pattern: &str,
        definition: &'static dyn UnitDefinition,
    ) -> Result<&mut Self, UnitError> {
        self.push::<D>(pattern, PatternKind::Exact, definition)
    }

    /// Registers a pattern that may carry any SI prefix, e.g. `V` also matches `kV` and `µV`.
    pub fn register_prefixed<D: NamedDimension>(
        &mut self,
        pattern: &str,
        definition: &'static dyn UnitDefinition,
    ) -> Result<&mut Self, UnitError> {
        self.push::<D>(pattern, PatternKind::Prefixed, definition)
    }

    /// Sets the standard unit of `D`. Setting the same unit again is allowed, a different one is
    /// not.
    pub fn set_standard<D: NamedDimension>(&mut self, unit: Unit) -> Result<&mut Self, UnitError> {
        let expected = D::dimension();
        if *unit.dimension() != expected {
            return Err(UnitError::DimensionMismatch {
                expected,
                found: unit.dimension().clone(),
            });
        }
        match self.standards.get(&expected) {
            Some(existing) if *existing == unit => Ok(self),
            Some(_) => Err(UnitError::DuplicateStandardUnit(D::NAME.to_string())),
            None => {
                debug!(quantity = D::NAME, %unit, "set standard unit");
                self.names.insert(expected.clone(), D::NAME);
                self.standards.insert(expected, unit);
                Ok(self)
            }
        }
    }

    pub fn build(self) -> UnitRegistry {
        info!(
            patterns = self.patterns.len(),
            dimensions = self.names.len(),
            "built unit registry"
        );
        UnitRegistry {
            patterns: self.patterns,
            standards: self.standards,
            names: self.names,
        }
    }
}

/// An immutable set of unit patterns and standard units.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    patterns: Vec<UnitPattern>,
    standards: HashMap<Dimension, Unit>,
    names: HashMap<Dimension, &'static str>,
}

impl UnitRegistry {
    /// A registry with every built-in quantity.
    pub fn standard() -> Result<Self, UnitError> {
        let mut builder = RegistryBuilder::new();
        quantities::register_all(&mut builder)?;
        Ok(builder.build())
    }

    pub fn patterns(&self) -> &[UnitPattern] {
        &self.patterns
    }

    pub fn standard_unit(&self, dimension: &Dimension) -> Option<&Unit> {
        self.standards.get(dimension)
    }

    pub fn dimension_name(&self, dimension: &Dimension) -> Option<&'static str> {
        self.names.get(dimension).copied()
    }

    /// Looks up a dimension by its registered name.
    pub fn dimension_named(&self, name: &str) -> Option<&Dimension> {
        self.names
            .iter()
            .find(|(_, n)| **n == name)
            .map(|(d, _)| d)
    }

    /// Resolves a unit string. Registered patterns are tried in order, anchored to the whole
    /// string, and the first match wins. Failing that, the string is read as a product and
    /// quotient of registered units, like `kJ/mol` or `K·m^2`.
    pub fn resolve(&self, text: &str) -> Result<Unit, UnitError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(UnitError::EmptyUnit);
        }
        self.resolve_single(text)
            .or_else(|| self.resolve_composite(text))
            .ok_or_else(|| UnitError::UnknownUnit(text.to_string()))
    }

    fn resolve_single(&self, text: &str) -> Option<Unit> {
        self.patterns.iter().find_map(|p| p.resolve(text))
    }

    fn resolve_composite(&self, text: &str) -> Option<Unit> {
        let (num, den) = match text.split_once('/') {
            Some((n, d)) => (n, Some(d)),
            None => (text, None),
        };
        if den.is_none() && !num.contains(['·', '*']) {
            return None;
        }

        let mut unit = self.resolve_product(num)?;
        if let Some(den) = den {
            unit = &unit / &self.resolve_product(den)?;
        }
        Some(unit)
    }

    /// Resolves factors separated by `·` or `*`, each optionally raised to `^n` with
    /// `|n| <= MAX_UNIT_POWER`. A bare `1` is allowed, as in `1/s`.
    fn resolve_product(&self, text: &str) -> Option<Unit> {
        let mut unit = Unit::dimensionless();
        for factor in text.split(['·', '*']) {
            let factor = factor.trim();
            if factor.is_empty() {
                return None;
            }
            if factor == "1" {
                continue;
            }
            let (base, power) = match factor.split_once('^') {
                Some((b, p)) => (b, p.trim_start_matches('(').trim_end_matches(')').parse().ok()?),
                None => (factor, 1),
            };
            if !(-MAX_UNIT_POWER..=MAX_UNIT_POWER).contains(&power) {
                return None;
            }
            unit = &unit * &self.resolve_single(base)?.powi(power);
        }
        Some(unit)
    }
}
