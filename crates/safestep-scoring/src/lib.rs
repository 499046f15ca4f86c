#![warn(missing_docs)]
//! # safestep-scoring
//!
//! ## Purpose
//! Turns raw detections plus an impairment profile into a classified fall
//! risk report.
//!
//! ## Responsibilities
//! - Join detections against the catalog's object mappings.
//! - Compute personalized per-hazard scores with a bounded amplification.
//! - Aggregate, classify, and explain the overall score.
//!
//! ## Data flow
//! Detections -> [`map_detections_to_hazards`] -> [`MatchedHazard`] list ->
//! [`score_hazards`] -> [`RiskReport`].
//!
//! ## Ownership and lifetimes
//! Matched hazards and reports are created fresh per scoring call and owned
//! by the caller; nothing is retained between calls. Scoring is a pure
//! transform, so identical inputs always produce identical reports.
//!
//! ## Error model
//! A matched hazard whose id no longer resolves in the catalog is a fatal
//! [`ScoringError`] (it indicates a lookup bug, not missing data). Unmapped
//! detection objects are a designed no-op, never an error.
//!
//! ## Example
//! ```rust
//! use safestep_catalog::HazardCatalog;
//! use safestep_detection_contract::Detection;
//! use safestep_profile::ImpairmentProfile;
//! use safestep_scoring::{map_detections_to_hazards, score_hazards};
//!
//! let catalog = HazardCatalog::from_json_str(r#"{
//!     "hazards": [{
//!         "id": "loose_rugs",
//!         "display_name": "Loose Rugs",
//!         "weights": {"mobility": 2, "vision": 1, "cognition": 1},
//!         "base_score": 10,
//!         "description": "Rugs that can slip or bunch up"
//!     }],
//!     "detection_mappings": [{"object": "rug", "hazard_id": "loose_rugs"}],
//!     "risk_thresholds": [
//!         {"label": "Low", "min_score": 0, "max_score": 100, "color": "green"}
//!     ]
//! }"#).expect("catalog should load");
//!
//! let detections = vec![Detection::new("rug", "bedroom")];
//! let profile = ImpairmentProfile::new(1.0, 0.0, 0.0).expect("profile should build");
//!
//! let matched = map_detections_to_hazards(&detections, &catalog);
//! let report = score_hazards(&matched, &profile, &catalog).expect("scoring should succeed");
//! assert_eq!(report.total_score, 16.7);
//! ```

use safestep_catalog::{HazardCatalog, HazardWeights};
use safestep_detection_contract::Detection;
use safestep_profile::ImpairmentProfile;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Risk level reported when no hazards were matched.
pub const RISK_LEVEL_NONE: &str = "None";

/// Display color reported when no hazards were matched.
pub const RISK_COLOR_NONE: &str = "green";

/// Advisory text for an assessment that matched no hazards.
pub const NO_HAZARDS_RECOMMENDATION: &str =
    "No hazards detected. Consider scheduling a follow-up scan in 6 months.";

/// Advisory text for an assessment that matched at least one hazard.
pub const REMEDIATION_RECOMMENDATION: &str =
    "Remove identified hazards and re-scan in 30 days";

/// Location recorded for detections that did not carry one.
pub const UNKNOWN_LOCATION: &str = "unknown";

/// Upper clamp applied to each per-hazard score.
pub const MAX_HAZARD_SCORE: f64 = 100.0;

/// One detection joined against the catalog, alive for a single request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedHazard {
    /// Resolved hazard id.
    pub hazard_id: String,
    /// Hazard display name.
    pub hazard_name: String,
    /// Detected object label that matched.
    pub object: String,
    /// Room the object was found in.
    pub location: String,
    /// Unweighted severity copied from the catalog.
    pub base_score: f64,
    /// Severity multipliers copied from the catalog.
    pub weights: HazardWeights,
}

/// Per-hazard score breakdown included in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardDetail {
    /// Resolved hazard id.
    pub hazard_id: String,
    /// Hazard display name.
    pub hazard_name: String,
    /// Detected object label.
    pub object: String,
    /// Room the object was found in.
    pub location: String,
    /// Unweighted severity.
    pub base_score: f64,
    /// Personalized score, clamped and rounded to one decimal.
    pub score: f64,
    /// Which impairment dimensions drove the score up.
    pub reason: String,
}

/// Complete assessment output for one scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Aggregate score in `[0, 100]`, rounded to one decimal.
    pub total_score: f64,
    /// Risk band label, or `"None"` when nothing was matched.
    pub risk_level: String,
    /// Display color for the risk level.
    pub color: String,
    /// Per-hazard breakdowns, ordered like the scored input.
    pub hazard_details: Vec<HazardDetail>,
    /// Static advisory text selected by whether hazards were found.
    pub recommendation: String,
}

/// Joins detections against the catalog's object mappings.
///
/// Output order matches input order, and one detection yields at most one
/// matched hazard. Detections whose object has no mapping are dropped
/// silently: an unmapped label means missing detector coverage, not a
/// user-facing risk signal. Repeated objects stay independent entries; no
/// deduplication or merging happens here.
pub fn map_detections_to_hazards(
    detections: &[Detection],
    catalog: &HazardCatalog,
) -> Vec<MatchedHazard> {
    let mut matched = Vec::with_capacity(detections.len());
    for detection in detections {
        let Some(hazard) = catalog.get_hazard_for_object(&detection.object) else {
            tracing::debug!(object = %detection.object, "detection object has no hazard mapping");
            continue;
        };

        matched.push(MatchedHazard {
            hazard_id: hazard.id.clone(),
            hazard_name: hazard.display_name.clone(),
            object: detection.object.clone(),
            location: detection
                .location
                .clone()
                .unwrap_or_else(|| UNKNOWN_LOCATION.to_string()),
            base_score: hazard.base_score,
            weights: hazard.weights,
        });
    }
    matched
}

/// Scores matched hazards against a profile and classifies the aggregate.
///
/// # Semantics
/// Each hazard score is `base_score * (1 + mean(weighted impairments))`,
/// clamped into `[0, 100]`. The total is the arithmetic mean (not the sum)
/// of the clamped scores, keeping the scale bounded regardless of hazard
/// count. Aggregation runs over unrounded values; each displayed number is
/// rounded to one decimal exactly once.
///
/// An empty hazard list returns the distinct clear report ("nothing to act
/// on") rather than a zero score classified into the lowest band.
///
/// # Errors
/// Returns [`ScoringError`] when a matched hazard carries a blank id or an
/// id the catalog no longer resolves.
pub fn score_hazards(
    hazards: &[MatchedHazard],
    profile: &ImpairmentProfile,
    catalog: &HazardCatalog,
) -> Result<RiskReport, ScoringError> {
    if hazards.is_empty() {
        return Ok(RiskReport {
            total_score: 0.0,
            risk_level: RISK_LEVEL_NONE.to_string(),
            color: RISK_COLOR_NONE.to_string(),
            hazard_details: Vec::new(),
            recommendation: NO_HAZARDS_RECOMMENDATION.to_string(),
        });
    }

    let mut details = Vec::with_capacity(hazards.len());
    let mut score_sum = 0.0;

    for hazard in hazards {
        check_hazard_resolves(hazard, catalog)?;

        let mobility_impact = profile.mobility * hazard.weights.mobility;
        let vision_impact = profile.vision * hazard.weights.vision;
        let cognition_impact = profile.cognition * hazard.weights.cognition;

        let amplification = 1.0 + (mobility_impact + vision_impact + cognition_impact) / 3.0;
        let score = (hazard.base_score * amplification).clamp(0.0, MAX_HAZARD_SCORE);
        score_sum += score;

        details.push(HazardDetail {
            hazard_id: hazard.hazard_id.clone(),
            hazard_name: hazard.hazard_name.clone(),
            object: hazard.object.clone(),
            location: hazard.location.clone(),
            base_score: hazard.base_score,
            score: round_one_decimal(score),
            reason: build_reason(mobility_impact, vision_impact, cognition_impact),
        });
    }

    let total_score = round_one_decimal(score_sum / hazards.len() as f64);
    let band = catalog.classify(total_score);

    Ok(RiskReport {
        total_score,
        risk_level: band.label.clone(),
        color: band.color.clone(),
        hazard_details: details,
        recommendation: REMEDIATION_RECOMMENDATION.to_string(),
    })
}

/// Matched hazards come from catalog lookups, so a dangling id here means a
/// catalog/lookup bug rather than missing data.
fn check_hazard_resolves(
    hazard: &MatchedHazard,
    catalog: &HazardCatalog,
) -> Result<(), ScoringError> {
    if hazard.hazard_id.trim().is_empty() {
        tracing::error!(object = %hazard.object, "matched hazard carries a blank hazard id");
        return Err(ScoringError::BlankHazardId);
    }

    if catalog.get_hazard(&hazard.hazard_id).is_none() {
        tracing::error!(hazard_id = %hazard.hazard_id, "matched hazard no longer resolves in catalog");
        return Err(ScoringError::UnknownHazardId(hazard.hazard_id.clone()));
    }

    Ok(())
}

fn build_reason(mobility_impact: f64, vision_impact: f64, cognition_impact: f64) -> String {
    let contributing: Vec<&str> = [
        ("Mobility", mobility_impact),
        ("Vision", vision_impact),
        ("Cognition", cognition_impact),
    ]
    .iter()
    .filter(|(_, impact)| *impact > 0.0)
    .map(|(dimension, _)| *dimension)
    .collect();

    match contributing.len() {
        0 => "Base risk".to_string(),
        1 => format!("{} increases risk", contributing[0]),
        _ => format!("{} increase risk", contributing.join(" and ")),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Scoring invariant violations.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// A matched hazard carried a blank hazard id.
    #[error("matched hazard carries a blank hazard id")]
    BlankHazardId,
    /// A matched hazard id is absent from the catalog.
    #[error("matched hazard references unknown hazard id: {0}")]
    UnknownHazardId(String),
}
