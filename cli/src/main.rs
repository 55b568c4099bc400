//! Healthport CLI
//!
//! Converts an unpacked Samsung Health export into Garmin Connect import files.
//!
//! # Usage
//!
//! ```bash
//! healthport --help
//! healthport exercises --export-dir ./samsunghealth_export
//! healthport all --export-dir ./samsunghealth_export --output-dir ./garmin
//! ```

#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::body::convert_weight;
use shared::config::ConvertConfig;
use shared::daily::convert_daily;
use shared::export::ExportDir;
use shared::models::{BODY_MEASUREMENT_COLUMNS, DAILY_SUMMARY_COLUMNS};
use shared::output::{ChunkedCsvWriter, TcxDirectorySink};
use shared::pipeline::convert_exercises;
use std::path::PathBuf;

/// Healthport CLI - Samsung Health to Garmin Connect converter
#[derive(Parser)]
#[command(name = "healthport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory of the unpacked Samsung Health export
    #[arg(short, long, env = "HEALTHPORT_EXPORT_DIR")]
    export_dir: Option<PathBuf>,

    /// Directory the generated files are written to
    #[arg(short, long, env = "HEALTHPORT_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert exercise sessions into TCX files
    Exercises,
    /// Convert daily steps, floors and calories into activities CSV files
    Activity,
    /// Convert weight measurements into body CSV files
    Weight,
    /// Run all conversions
    All,
}

impl Cli {
    /// Applies the command line overrides to the environment configuration.
    fn config(&self) -> Result<ConvertConfig> {
        let mut config = ConvertConfig::from_env().context("Failed to load configuration")?;
        if let Some(dir) = &self.export_dir {
            config.export_dir.clone_from(dir);
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        Ok(config)
    }
}

fn run_exercises(config: &ConvertConfig) -> Result<()> {
    let export = ExportDir::new(&config.export_dir);
    let mut sink = TcxDirectorySink::new(&config.output_dir);

    let report = convert_exercises(&export, &mut sink)?;
    println!(
        "Wrote {} TCX files to {} ({} sessions skipped)",
        report.converted.len(),
        config.output_dir.display(),
        report.failed.len()
    );
    for failure in &report.failed {
        println!("  {}: {}", failure.datauuid, failure.error);
    }
    Ok(())
}

fn run_activity(config: &ConvertConfig) -> Result<()> {
    let days = convert_daily(&ExportDir::new(&config.export_dir))?;
    let rows: Vec<Vec<String>> = days.iter().map(|day| day.to_record()).collect();

    let writer = ChunkedCsvWriter::new(
        &config.output_dir,
        "activities-export",
        "Activities",
        &DAILY_SUMMARY_COLUMNS,
        config.activity_lines_per_file,
    )?;
    let written = writer.write_all(&rows)?;
    println!("Wrote {} days into {} activities files", rows.len(), written.len());
    Ok(())
}

fn run_weight(config: &ConvertConfig) -> Result<()> {
    let measurements = convert_weight(&ExportDir::new(&config.export_dir))?;
    let rows: Vec<Vec<String>> = measurements.iter().map(|m| m.to_record()).collect();

    let writer = ChunkedCsvWriter::new(
        &config.output_dir,
        "weight-export",
        "Body",
        &BODY_MEASUREMENT_COLUMNS,
        config.weight_lines_per_file,
    )?;
    let written = writer.write_all(&rows)?;
    println!(
        "Wrote {} measurements into {} weight files",
        rows.len(),
        written.len()
    );
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let Some(command) = &cli.command else {
        println!("Healthport CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = cli.config()?;
    tracing::info!(
        export_dir = %config.export_dir.display(),
        output_dir = %config.output_dir.display(),
        "Starting conversion"
    );

    match command {
        Commands::Exercises => run_exercises(&config)?,
        Commands::Activity => run_activity(&config)?,
        Commands::Weight => run_weight(&config)?,
        Commands::All => {
            run_exercises(&config)?;
            run_activity(&config)?;
            run_weight(&config)?;
        }
    }

    Ok(())
}
