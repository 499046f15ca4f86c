#![warn(missing_docs)]
//! # safestep-app
//!
//! ## Purpose
//! Orchestrates catalog loading, detection parsing, profile validation, and
//! scoring into one assessment pipeline.
//!
//! ## Responsibilities
//! - Load the hazard catalog from either supported ingestion format.
//! - Read detection reports and profile documents from disk.
//! - Run map-then-score and encode the resulting report.
//! - Initialize process-wide tracing.
//!
//! ## Data flow
//! Config source -> catalog; detector JSON + profile JSON -> [`assess`] ->
//! [`RiskReport`] -> JSON output.
//!
//! ## Ownership and lifetimes
//! The catalog is built once and passed by reference into each assessment;
//! per-request values are owned by the call and dropped with the report.
//!
//! ## Error model
//! Subsystem failures are wrapped in [`AppError`] and surfaced at the CLI
//! boundary; there is no partially-assessed output shape.

pub mod logging;

use std::fs;
use std::path::Path;

use safestep_catalog::{CatalogError, HazardCatalog, legacy_csv};
use safestep_detection_contract::{
    Detection, DetectionContractError, DetectionReport, parse_detection_report,
};
use safestep_profile::{ImpairmentProfile, ProfileError, parse_profile_document};
use safestep_scoring::{RiskReport, ScoringError, map_detections_to_hazards, score_hazards};
use thiserror::Error;

/// Build-time application version loaded from the root `VERSION` file.
pub const APP_VERSION: &str = env!("SAFESTEP_VERSION");

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Runs the full assessment pipeline for one request.
///
/// # Errors
/// Returns [`AppError::Scoring`] when the matched hazards violate scoring
/// invariants.
pub fn assess(
    detections: &[Detection],
    profile: &ImpairmentProfile,
    catalog: &HazardCatalog,
) -> Result<RiskReport, AppError> {
    let matched = map_detections_to_hazards(detections, catalog);
    let report = score_hazards(&matched, profile, catalog)?;

    tracing::info!(
        detections = detections.len(),
        matched = matched.len(),
        total_score = report.total_score,
        risk_level = %report.risk_level,
        "assessment complete"
    );

    Ok(report)
}

/// Loads and validates a consolidated JSON catalog file.
///
/// # Errors
/// Returns [`AppError::Io`] for unreadable files and [`AppError::Catalog`]
/// for invalid documents.
pub fn load_catalog_from_json_path(path: &Path) -> Result<HazardCatalog, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(HazardCatalog::from_json_str(&raw)?)
}

/// Loads and validates a catalog from the legacy CSV triplet.
///
/// # Errors
/// Returns [`AppError::Io`] for unreadable files and [`AppError::Catalog`]
/// for rows or cross-references the validator rejects.
pub fn load_catalog_from_csv_paths(
    matrix: &Path,
    mappings: &Path,
    thresholds: &Path,
) -> Result<HazardCatalog, AppError> {
    let document = legacy_csv::document_from_csv_readers(
        fs::File::open(matrix)?,
        fs::File::open(mappings)?,
        fs::File::open(thresholds)?,
    )?;
    Ok(HazardCatalog::from_document(document)?)
}

/// Reads and validates a detection report file.
///
/// # Errors
/// Returns [`AppError::Io`] or [`AppError::Detection`].
pub fn load_detections_from_path(path: &Path) -> Result<DetectionReport, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(parse_detection_report(&raw)?)
}

/// Reads a profile document file through the range policy.
///
/// # Errors
/// Returns [`AppError::Io`] or [`AppError::Profile`].
pub fn load_profile_from_path(path: &Path) -> Result<ImpairmentProfile, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(parse_profile_document(&raw)?)
}

/// Encodes a risk report as pretty-printed JSON for CLI output.
///
/// # Errors
/// Returns [`AppError::Encode`] when serialization fails.
pub fn report_to_json(report: &RiskReport) -> Result<String, AppError> {
    serde_json::to_string_pretty(report).map_err(AppError::Encode)
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog load or validation error.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    /// Detection contract error.
    #[error("detection error: {0}")]
    Detection(#[from] DetectionContractError),
    /// Profile validation error.
    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),
    /// Scoring invariant violation.
    #[error("scoring error: {0}")]
    Scoring(#[from] ScoringError),
    /// File read failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Report encode failure.
    #[error("report encode failure: {0}")]
    Encode(serde_json::Error),
    /// CLI arguments do not select a usable catalog source.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}
