#![warn(missing_docs)]
//! # safestep binary
//!
//! CLI entry point: loads a hazard catalog, reads a detection report and an
//! impairment profile, and prints the assessed risk report as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use safestep_app::{
    AppError, assess, load_catalog_from_csv_paths, load_catalog_from_json_path,
    load_detections_from_path, load_profile_from_path, report_to_json,
};
use safestep_catalog::HazardCatalog;

#[derive(Parser)]
#[command(name = "safestep")]
#[command(version = safestep_app::APP_VERSION)]
#[command(about = "Home fall-hazard risk assessment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess detections against a profile and print the risk report.
    Assess {
        /// Consolidated JSON catalog file.
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Legacy risk matrix CSV (with --mapping and --thresholds).
        #[arg(long, requires = "mapping", requires = "thresholds")]
        matrix: Option<PathBuf>,
        /// Legacy detection mapping CSV.
        #[arg(long)]
        mapping: Option<PathBuf>,
        /// Legacy risk threshold CSV.
        #[arg(long)]
        thresholds: Option<PathBuf>,
        /// Detection report JSON file.
        #[arg(long)]
        detections: PathBuf,
        /// Impairment profile JSON file.
        #[arg(long)]
        profile: PathBuf,
    },
    /// Classify a numeric score into the configured risk bands.
    Classify {
        /// Consolidated JSON catalog file.
        #[arg(long)]
        catalog: PathBuf,
        /// Score to classify.
        #[arg(long)]
        score: f64,
    },
    /// Load a catalog and print its summary counts.
    Validate {
        /// Consolidated JSON catalog file.
        #[arg(long)]
        catalog: PathBuf,
    },
}

fn main() {
    safestep_app::logging::init_tracing();

    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("safestep: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Assess {
            catalog,
            matrix,
            mapping,
            thresholds,
            detections,
            profile,
        } => {
            let catalog = resolve_catalog(catalog, matrix, mapping, thresholds)?;
            let report = assess(
                &load_detections_from_path(&detections)?.detections,
                &load_profile_from_path(&profile)?,
                &catalog,
            )?;
            println!("{}", report_to_json(&report)?);
            Ok(())
        }
        Commands::Classify { catalog, score } => {
            let catalog = load_catalog_from_json_path(&catalog)?;
            let band = catalog.classify(score);
            println!("{} ({})", band.label, band.color);
            Ok(())
        }
        Commands::Validate { catalog } => {
            let catalog = load_catalog_from_json_path(&catalog)?;
            println!(
                "catalog ok: {} hazards, {} mappings, {} bands",
                catalog.hazard_count(),
                catalog.mapping_count(),
                catalog.thresholds().len()
            );
            Ok(())
        }
    }
}

fn resolve_catalog(
    catalog: Option<PathBuf>,
    matrix: Option<PathBuf>,
    mapping: Option<PathBuf>,
    thresholds: Option<PathBuf>,
) -> Result<HazardCatalog, AppError> {
    match (catalog, matrix, mapping, thresholds) {
        (Some(path), None, None, None) => load_catalog_from_json_path(&path),
        (None, Some(matrix), Some(mapping), Some(thresholds)) => {
            load_catalog_from_csv_paths(&matrix, &mapping, &thresholds)
        }
        _ => Err(AppError::InvalidArguments(
            "pass --catalog, or all of --matrix, --mapping, --thresholds".to_string(),
        )),
    }
}
