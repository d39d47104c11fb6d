//! Business Statistics - command-line entry point
//!
//! Loads a company dataset export and prints a JSON report with:
//! 1. Per-country [t-statistic, distance] pairs
//! 2. Per-category entity rankings with profit change percentages
//!
//! Usage:
//!   cargo run --release -- data.csv
//!   cargo run --release -- data.csv --exponent 2 --pretty --output report.json
//!
//! Environment:
//!   BIZSTATS_CONFIG - path to an analysis.toml (also read from .env)
//!   RUST_LOG        - log filter (default: info)

use std::fs;
use std::path::PathBuf;
use std::process;

use bizstats_service::config::{load_config_or_default, AnalysisConfig};
use bizstats_service::report::{run_file, ReportError};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "bizstats", version, about = "Distance, significance and ranking analyses over a company dataset")]
struct Args {
    /// Comma-delimited dataset with a header row
    input: PathBuf,

    /// Analysis config file (defaults to $BIZSTATS_CONFIG, then ./analysis.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the distance exponent p
    #[arg(long)]
    exponent: Option<f64>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Write the report here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    eprintln!("📊 Business Statistics");
    eprintln!("======================\n");

    let config = match load_settings(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            process::exit(1);
        }
    };
    eprintln!("⚙️  Distance exponent: {}", config.minkowski_exponent);

    eprintln!("📋 Analysing {}...", args.input.display());
    let report = match run_file(&args.input, &config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("\n❌ Analysis failed: {}\n", e);
            process::exit(1);
        }
    };
    eprintln!(
        "✓ {} groups, {} categories ({} + {} rows skipped)\n",
        report.composite.len(),
        report.categories.len(),
        report.skipped.significance_rows,
        report.skipped.ranking_rows,
    );

    let json = match report.to_json(args.pretty) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("❌ {}", e);
            process::exit(1);
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, json) {
                eprintln!("❌ Failed to write {}: {}", path.display(), e);
                process::exit(1);
            }
            eprintln!("✓ Report written to {}", path.display());
        }
        None => println!("{}", json),
    }
}

fn load_settings(args: &Args) -> Result<AnalysisConfig, ReportError> {
    let mut config = load_config_or_default(args.config.as_deref())?;
    if let Some(p) = args.exponent {
        config.minkowski_exponent = p;
        config.validate()?;
    }
    Ok(config)
}
