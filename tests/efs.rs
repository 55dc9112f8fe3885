use dimtext::quantities::electric_field_strength::{ElectricFieldStrength, EFS, EFS_PATTERN};
use dimtext::quantities::electric_potential::ElectricPotential;
use dimtext::quantities::length::Length;
use dimtext::registry::PatternKind;
use dimtext::{NamedDimension, Unit, UnitRegistry};
use pretty_assertions::assert_eq;

#[test]
fn test_dimension_is_potential_over_length() {
    assert_eq!(
        ElectricFieldStrength::dimension(),
        ElectricPotential::dimension() / Length::dimension()
    );
}

#[test]
fn test_registered_pattern() {
    let registry = UnitRegistry::standard().unwrap();
    let efs: Vec<_> = registry
        .patterns()
        .iter()
        .filter(|p| p.quantity() == "ElectricFieldStrength")
        .collect();
    assert_eq!(efs.len(), 1);
    assert_eq!(efs[0].pattern(), EFS_PATTERN);
    assert_eq!(efs[0].kind(), PatternKind::Exact);
    assert_eq!(efs[0].definition().name(), "EFS");

    for spelling in ["mV/m", "V/m", "kV/m", "mV/cm", "mV/mm", "V/cm", "V/mm", "kV/cm", "kV/mm"] {
        assert!(efs[0].is_full_match(spelling), "{spelling}");
        assert_eq!(
            registry.resolve(spelling).unwrap().dimension(),
            &ElectricFieldStrength::dimension()
        );
    }
    assert!(!efs[0].is_full_match("kg/m"));
    // The pattern is optional as a whole, so it also matches nothing at all. Resolution rejects
    // empty unit strings before any pattern is tried.
    assert!(efs[0].is_full_match(""));
    assert!(registry.resolve("").is_err());
}

#[test]
fn test_standard_unit() {
    let registry = UnitRegistry::standard().unwrap();
    assert_eq!(
        registry.standard_unit(&ElectricFieldStrength::dimension()),
        Some(&Unit::new(&EFS))
    );
}

#[test]
fn test_convert_between_spellings() {
    let registry = UnitRegistry::standard().unwrap();
    let from = registry.resolve("kV/cm").unwrap();
    let to = registry.resolve("mV/mm").unwrap();
    assert_eq!(from.convert_value(1.0, &to).unwrap(), 1e5);
}
