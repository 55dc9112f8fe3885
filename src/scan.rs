//! Finding measurements in free text.

use std::ops::Range;

use tracing::trace;

use crate::config::ScannerConfig;
use crate::dimension::Dimension;
use crate::error::UnitError;
use crate::model::Measurement;
use crate::parsing::{self, RawMeasurement};
use crate::registry::UnitRegistry;

/// Scans text for measurements whose units resolve against a registry.
#[derive(Debug, Clone)]
pub struct Scanner<'r> {
    registry: &'r UnitRegistry,
    config: ScannerConfig,
    /// Dimensions named in the config. Empty allows everything.
    allowed: Vec<Dimension>,
}

impl<'r> Scanner<'r> {
    /// Fails if the config names a dimension the registry doesn't know.
    pub fn new(registry: &'r UnitRegistry, config: ScannerConfig) -> Result<Self, UnitError> {
        let allowed = config
            .dimensions
            .iter()
            .map(|name| {
                registry
                    .dimension_named(name)
                    .cloned()
                    .ok_or_else(|| UnitError::UnknownDimension(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            registry,
            config,
            allowed,
        })
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Every measurement in `text`, in order of appearance. Spans are byte offsets into `text`.
    pub fn scan(&self, text: &str) -> Vec<Measurement> {
        let mut found = vec![];
        let mut pos = 0;
        while let Some(c) = text[pos..].chars().next() {
            if is_start(text, pos) {
                if let Ok((rest, raw)) = parsing::measurement(&text[pos..]) {
                    let end = text.len() - rest.len();
                    if let Some(m) = self.interpret(raw, pos..end) {
                        found.push(m);
                    }
                    // A number that didn't resolve is skipped whole, so its tail isn't read as
                    // another number.
                    pos = end;
                    continue;
                }
            }
            pos += c.len_utf8();
        }
        found
    }

    fn interpret(&self, raw: RawMeasurement<'_>, span: Range<usize>) -> Option<Measurement> {
        let unit = if raw.unit.is_empty() {
            if !self.config.bare_values {
                return None;
            }
            None
        } else {
            match self.registry.resolve(raw.unit) {
                Ok(unit) => Some(unit),
                Err(e) => {
                    trace!("skipping {:?} at {:?}: {}", raw.raw_value, span, e);
                    return None;
                }
            }
        };

        let dimension = unit
            .as_ref()
            .map_or_else(Dimension::dimensionless, |u| u.dimension().clone());
        if !self.allowed.is_empty() && !self.allowed.contains(&dimension) {
            trace!("filtered out {} measurement at {:?}", dimension, span);
            return None;
        }

        let measurement = Measurement {
            quantity: self.registry.dimension_name(&dimension),
            value: Some(raw.value),
            error: raw.error,
            unit,
            raw_value: Some(raw.raw_value.to_string()),
            raw_units: (!raw.unit.is_empty()).then(|| raw.unit.to_string()),
            span: Some(span),
            ..Measurement::new(dimension)
        };
        trace!("found {}", measurement);

        if self.config.to_standard && measurement.unit.is_some() {
            // Dimensions without a registered standard unit are left as written.
            return Some(
                measurement
                    .to_standard(self.registry)
                    .unwrap_or(measurement),
            );
        }
        Some(measurement)
    }
}

/// A measurement can start at a digit, or at a sign or decimal point followed by one, as long as
/// it isn't in the middle of a word, another number, or an exponent like `^-3`.
fn is_start(text: &str, pos: usize) -> bool {
    let mut chars = text[pos..].chars();
    let starts_number = match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some(c) if is_sign(c) || c == '.' => chars.next().is_some_and(|n| n.is_ascii_digit()),
        _ => false,
    };
    if !starts_number {
        return false;
    }

    let mut before = text[..pos].chars().rev();
    match before.next() {
        None => true,
        // A digit after a sign belongs to whatever the sign is attached to.
        Some(p) if is_sign(p) => before.next().map_or(true, |q| !is_word_char(q)),
        Some(p) => !is_word_char(p),
    }
}

fn is_sign(c: char) -> bool {
    c == '+' || "-﹣－−".contains(c)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '.' || c == '_' || c == '^'
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::model::QuantityValue;
    use crate::quantities::electric_field_strength::EFS;
    use crate::unit::Unit;

    fn registry() -> UnitRegistry {
        UnitRegistry::standard().unwrap()
    }

    #[test]
    fn test_scan_field() {
        let registry = registry();
        let scanner = Scanner::new(&registry, ScannerConfig::default()).unwrap();
        let text = "A field of 2.5 kV/cm was applied.";
        let found = scanner.scan(text);
        assert_eq!(found.len(), 1);
        let m = &found[0];
        assert_eq!(m.quantity, Some("ElectricFieldStrength"));
        assert_eq!(m.value, Some(QuantityValue::Single(2.5)));
        assert_eq!(m.unit, Some(Unit::new(&EFS).with_magnitude(5)));
        assert_eq!(m.raw_units.as_deref(), Some("kV/cm"));
        assert_eq!(&text[m.span.clone().unwrap()], "2.5 kV/cm");
    }

    #[test]
    fn test_word_boundaries() {
        let registry = registry();
        let scanner = Scanner::new(&registry, ScannerConfig::default()).unwrap();
        assert!(scanner.scan("sample B12 K").is_empty());
        assert!(scanner.scan("x5 V/m").is_empty());
        assert_eq!(scanner.scan("(5 V/m)").len(), 1);
    }

    #[test]
    fn test_unresolved_skipped_whole() {
        let registry = registry();
        let scanner = Scanner::new(&registry, ScannerConfig::default()).unwrap();
        // "10 foo" must not be found again after "5-10 foo" fails to resolve.
        let found = scanner.scan("5-10 foo and 3 K");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].raw_value.as_deref(), Some("3"));
    }

    #[test]
    fn test_bare_values() {
        let registry = registry();
        let text = "There were 42 samples at 300 K.";

        let scanner = Scanner::new(&registry, ScannerConfig::default()).unwrap();
        assert_eq!(scanner.scan(text).len(), 1);

        let config = ScannerConfig {
            bare_values: true,
            ..Default::default()
        };
        let scanner = Scanner::new(&registry, config).unwrap();
        let found = scanner.scan(text);
        // "42 samples" has a unit token that doesn't resolve, so it's still skipped.
        assert_eq!(found.len(), 1);

        let found = scanner.scan("a ratio of 0.5, at 300 K");
        assert_eq!(found.len(), 2);
        assert!(found[0].dimension.is_dimensionless());
        assert_eq!(found[0].unit, None);
        assert_eq!(found[0].raw_units, None);
    }

    #[test]
    fn test_dimension_filter() {
        let registry = registry();
        let config = ScannerConfig {
            dimensions: vec!["Temperature".to_string()],
            ..Default::default()
        };
        let scanner = Scanner::new(&registry, config).unwrap();
        let found = scanner.scan("2 kV/mm at 300-350 K");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, Some(QuantityValue::Range(300.0, 350.0)));

        let config = ScannerConfig {
            dimensions: vec!["Pressure".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            Scanner::new(&registry, config),
            Err(UnitError::UnknownDimension(name)) if name == "Pressure"
        ));
    }

    #[test]
    fn test_to_standard() {
        let registry = registry();
        let config = ScannerConfig {
            to_standard: true,
            ..Default::default()
        };
        let scanner = Scanner::new(&registry, config).unwrap();
        let found = scanner.scan("3 ± 1 kV/m");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, Some(QuantityValue::Single(3000.0)));
        assert_eq!(found[0].error, Some(1000.0));
        assert_eq!(found[0].unit, Some(Unit::new(&EFS)));
        assert_eq!(found[0].raw_units.as_deref(), Some("kV/m"));
    }

    #[test]
    fn test_multibyte_text() {
        let registry = registry();
        let scanner = Scanner::new(&registry, ScannerConfig::default()).unwrap();
        let text = "Δ = −5 °C, then 10 Å";
        let found = scanner.scan(text);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].value, Some(QuantityValue::Single(-5.0)));
        assert_eq!(&text[found[1].span.clone().unwrap()], "10 Å");
    }

    #[test]
    fn test_exponents_are_not_measurements() {
        let registry = registry();
        let scanner = Scanner::new(&registry, ScannerConfig::default()).unwrap();
        assert!(scanner.scan("the m^-3 K term").is_empty());
        assert!(scanner.scan("type B-5 K").is_empty());
        assert_eq!(scanner.scan("at -5 K").len(), 1);
    }

    #[test]
    fn test_extreme_numbers() {
        let registry = registry();
        let scanner = Scanner::new(&registry, ScannerConfig::default()).unwrap();

        let found = scanner.scan("1 x 10^-2147483648 K and 2 x 10^3 K");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, Some(QuantityValue::Single(2000.0)));

        assert!(scanner.scan("5 V/km^2000000000").is_empty());
        assert!(scanner.scan("5 1/km^-2147483648").is_empty());

        let found = scanner.scan("1e999 V/m");
        assert_eq!(found[0].value, Some(QuantityValue::Single(f64::INFINITY)));
    }

    /// Fragments that exercise numbers, multipliers, powers, and units when glued together.
    const FRAGMENTS: &[&str] = &[
        "1", "2.5", ".7", "-", "\u{2212}", "+", "9999999999", "2147483648", "-2147483648",
        "1e308", "e-400", " ", " x 10^", "×10", "10^", "**", "^", "^-2147483648", "^2000000000",
        "^64", "^(", ")", "/", "·", "*", "±", "+/-", " to ", "~", "K", "V/m", "kV/cm", "km",
        "eV", "°C", "Å", "⁻⁹", "⁹⁹⁹⁹", "1/", "m", "V",
    ];

    fn lenient_config() -> ScannerConfig {
        ScannerConfig {
            bare_values: true,
            to_standard: true,
            ..Default::default()
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn test_scan_any_text(text in ".*") {
            let registry = registry();
            let scanner = Scanner::new(&registry, lenient_config()).unwrap();
            for m in scanner.scan(&text) {
                let span = m.span.unwrap();
                prop_assert!(text.get(span).is_some());
            }
        }

        #[test]
        fn test_scan_numeric_fragments(
            parts in prop::collection::vec(prop::sample::select(FRAGMENTS.to_vec()), 0..16)
        ) {
            let text = parts.concat();
            let registry = registry();
            for config in [ScannerConfig::default(), lenient_config()] {
                let scanner = Scanner::new(&registry, config).unwrap();
                let mut last_end = 0;
                for m in scanner.scan(&text) {
                    let span = m.span.unwrap();
                    prop_assert!(span.start >= last_end);
                    prop_assert!(text.get(span.clone()).is_some());
                    last_end = span.end;
                }
            }
        }

        #[test]
        fn test_resolve_any_unit_token(
            parts in prop::collection::vec(prop::sample::select(FRAGMENTS.to_vec()), 1..8)
        ) {
            let registry = registry();
            let _ = registry.resolve(&parts.concat());
        }
    }
}
