//! Command-line access to the unit registry and the measurement scanner.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dimtext::{Measurement, Scanner, ScannerConfig, UnitRegistry};
use tabled::{Table, Tabled};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
#[command(name = "dimtext", version, about = "Find dimensioned measurements in text")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List the registered unit patterns.
    Units {
        /// Only show patterns for this dimension.
        #[arg(short, long)]
        dimension: Option<String>,
    },
    /// Resolve a unit string and show its dimension and standard unit.
    Resolve { unit: String },
    /// Convert a value between two units of the same dimension.
    Convert {
        #[arg(allow_hyphen_values = true)]
        value: f64,
        from: String,
        to: String,
    },
    /// Find measurements in a file, or in stdin if no file is given.
    Scan {
        file: Option<PathBuf>,
        /// TOML scanner config.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Only report this dimension. Can be repeated; adds to the config's list.
        #[arg(short, long = "dimension")]
        dimensions: Vec<String>,
        /// Convert measurements to standard units.
        #[arg(short, long)]
        standard: bool,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Tabled)]
struct PatternRow {
    dimension: &'static str,
    unit: &'static str,
    kind: String,
    pattern: String,
}

#[derive(Tabled)]
struct MeasurementRow {
    span: String,
    quantity: String,
    value: String,
    error: String,
    unit: String,
    text: String,
}

impl MeasurementRow {
    fn new(text: &str, m: &Measurement) -> Self {
        let span = m.span.clone().unwrap_or_default();
        Self {
            span: format!("{}..{}", span.start, span.end),
            quantity: m.quantity.unwrap_or("-").to_string(),
            value: m.value.map_or_else(|| "-".to_string(), |v| v.to_string()),
            error: m.error.map_or_else(|| "-".to_string(), |e| e.to_string()),
            unit: m.unit.as_ref().map_or_else(|| "-".to_string(), |u| u.to_string()),
            text: text.get(span).unwrap_or_default().to_string(),
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = UnitRegistry::standard().context("building unit registry")?;

    match cli.command {
        Commands::Units { dimension } => {
            let rows: Vec<PatternRow> = registry
                .patterns()
                .iter()
                .filter(|p| dimension.as_deref().map_or(true, |d| p.quantity() == d))
                .map(|p| PatternRow {
                    dimension: p.quantity(),
                    unit: p.definition().name(),
                    kind: format!("{:?}", p.kind()),
                    pattern: p.pattern().to_string(),
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        Commands::Resolve { unit } => {
            let resolved = registry.resolve(&unit)?;
            let dimension = resolved.dimension();
            println!("unit:      {}", resolved);
            println!("dimension: {}", dimension);
            if let Some(name) = registry.dimension_name(dimension) {
                println!("quantity:  {}", name);
            }
            if let Some(standard) = registry.standard_unit(dimension) {
                println!(
                    "standard:  1 {} = {} {}",
                    unit.trim(),
                    resolved.convert_value(1.0, standard)?,
                    standard
                );
            }
        }
        Commands::Convert { value, from, to } => {
            let from = registry.resolve(&from)?;
            let to = registry.resolve(&to)?;
            println!("{} {}", from.convert_value(value, &to)?, to);
        }
        Commands::Scan {
            file,
            config,
            dimensions,
            standard,
            json,
        } => {
            let mut config = match config {
                Some(path) => ScannerConfig::from_path(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => ScannerConfig::default(),
            };
            config.dimensions.extend(dimensions);
            config.to_standard |= standard;
            debug!(?config, "scanner config");

            let text = match file {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut text = String::new();
                    io::stdin().read_to_string(&mut text)?;
                    text
                }
            };

            let scanner = Scanner::new(&registry, config)?;
            let found = scanner.scan(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                let rows: Vec<_> = found.iter().map(|m| MeasurementRow::new(&text, m)).collect();
                println!("{}", Table::new(rows));
            }
        }
    }
    Ok(())
}
