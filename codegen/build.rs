// Generates the SI prefix tables from the CSV file.

use std::collections::BTreeMap;
use std::env;
use std::error::Error as StdError;
use std::path::Path;

use serde::Deserialize;

/// One row of `data/si_prefixes.csv`. Micro is listed once per spelling of its symbol.
#[derive(Debug, Deserialize)]
struct PrefixRow {
    name: String,
    symbol: String,
    exponent: i32,
}

/// Renders a `phf_map!` literal from string keys to exponents. Keys are sorted so the generated
/// file is stable between builds.
fn render_map(static_name: &str, doc: &str, entries: &BTreeMap<String, i32>) -> String {
    let body: Vec<String> = entries
        .iter()
        .map(|(k, v)| format!("    {:?} => {},", k, v))
        .collect();
    format!(
        r#"
/// {doc}
pub static {static_name}: phf::Map<&'static str, i32> = phf::phf_map! {{
{}
}};
"#,
        body.join("\n")
    )
}

fn main() -> Result<(), Box<dyn StdError>> {
    let out_dir = env::var_os("OUT_DIR").ok_or(env::VarError::NotPresent)?;
    let manifest_dir = env::var_os("CARGO_MANIFEST_DIR").ok_or(env::VarError::NotPresent)?;
    let csv_path = Path::new(&manifest_dir).join("data/si_prefixes.csv");

    let mut reader = csv::Reader::from_path(&csv_path)?;
    let mut symbols = BTreeMap::new();
    let mut names = BTreeMap::new();
    for row in reader.deserialize() {
        let row: PrefixRow = row?;
        if let Some(prev) = symbols.insert(row.symbol.clone(), row.exponent) {
            if prev != row.exponent {
                return Err(format!("prefix symbol {} listed with two exponents", row.symbol).into());
            }
        }
        names.insert(row.name, row.exponent);
    }

    let generated = format!(
        "{}{}",
        render_map(
            "PREFIX_SYMBOLS",
            "SI prefix symbols mapped to their decimal exponent.",
            &symbols
        ),
        render_map(
            "PREFIX_NAMES",
            "SI prefix names mapped to their decimal exponent.",
            &names
        ),
    );

    let dest_path = Path::new(&out_dir).join("si_prefixes.rs");
    std::fs::write(dest_path, generated)?;

    println!("cargo:rerun-if-changed=data/si_prefixes.csv");
    println!("cargo:rerun-if-changed=codegen/build.rs");

    Ok(())
}
