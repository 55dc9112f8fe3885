//! SI prefixes. The tables are generated by `codegen/build.rs` from `data/si_prefixes.csv`.

include!(concat!(env!("OUT_DIR"), "/si_prefixes.rs"));

/// The decimal exponent of a prefix symbol such as `k` or `µ`. The empty string is the unit
/// prefix, exponent 0.
pub fn exponent_of(symbol: &str) -> Option<i32> {
    if symbol.is_empty() {
        Some(0)
    } else {
        PREFIX_SYMBOLS.get(symbol).copied()
    }
}

/// The decimal exponent of a spelled-out prefix such as `kilo`.
pub fn exponent_of_name(name: &str) -> Option<i32> {
    PREFIX_NAMES.get(name).copied()
}

/// A regex alternation of every prefix symbol. Longer symbols come first, so `da` is preferred
/// over `d` when both could match.
pub fn symbol_alternation() -> String {
    let mut symbols: Vec<&str> = PREFIX_SYMBOLS.keys().copied().collect();
    symbols.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    symbols
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_symbols() {
        assert_eq!(exponent_of(""), Some(0));
        assert_eq!(exponent_of("k"), Some(3));
        assert_eq!(exponent_of("c"), Some(-2));
        assert_eq!(exponent_of("m"), Some(-3));
        assert_eq!(exponent_of("µ"), exponent_of("μ"));
        assert_eq!(exponent_of("u"), Some(-6));
        assert_eq!(exponent_of("da"), Some(1));
        assert_eq!(exponent_of("q"), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(exponent_of_name("kilo"), Some(3));
        assert_eq!(exponent_of_name("micro"), Some(-6));
        assert_eq!(exponent_of_name("kV"), None);
    }

    #[test]
    fn test_alternation_prefers_long_symbols() {
        let alt = symbol_alternation();
        assert!(alt.starts_with("da|"));
        assert!(alt.split('|').any(|s| s == "k"));
    }
}
