#![warn(missing_docs)]
//! # safestep-catalog
//!
//! ## Purpose
//! Loads, validates, and indexes the hazard taxonomy used by the `safestep`
//! scoring pipeline.
//!
//! ## Responsibilities
//! - Represent hazard definitions, detection mappings, and risk thresholds.
//! - Parse the consolidated JSON catalog document with eager validation.
//! - Ingest the legacy CSV-triplet catalog format through one adapter.
//! - Resolve detected object labels to hazard definitions.
//! - Classify aggregate scores into configured risk bands.
//!
//! ## Data flow
//! Config source -> [`parse_catalog_document`] (or [`legacy_csv`]) ->
//! [`HazardCatalog::from_document`] -> read-only lookups during scoring.
//!
//! ## Ownership and lifetimes
//! The catalog is built once at startup and holds owned, immutable data.
//! Only `&self` accessors exist after construction, so one catalog handle can
//! be shared across concurrent scoring requests without locks.
//!
//! ## Error model
//! Structural problems (missing sections, duplicate keys, dangling hazard
//! references, malformed definitions) fail the load with a [`CatalogError`];
//! callers must never proceed with a partially-valid catalog.
//!
//! ## Example
//! ```rust
//! use safestep_catalog::HazardCatalog;
//!
//! let raw = r#"{
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
//! }"#;
//!
//! let catalog = HazardCatalog::from_json_str(raw).expect("catalog should load");
//! assert_eq!(catalog.get_hazard_for_object("rug").unwrap().id, "loose_rugs");
//! assert_eq!(catalog.classify(12.0).label, "Low");
//! ```

pub mod legacy_csv;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Section names every catalog document must carry.
pub const REQUIRED_SECTIONS: [&str; 3] = ["hazards", "detection_mappings", "risk_thresholds"];

fn default_weight() -> f64 {
    1.0
}

/// Per-dimension severity multipliers for one hazard.
///
/// Omitted dimensions default to `1.0`, so a hazard that names only the
/// dimensions it amplifies still scores neutrally on the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardWeights {
    /// Multiplier applied to the mobility impairment score.
    #[serde(default = "default_weight")]
    pub mobility: f64,
    /// Multiplier applied to the vision impairment score.
    #[serde(default = "default_weight")]
    pub vision: f64,
    /// Multiplier applied to the cognition impairment score.
    #[serde(default = "default_weight")]
    pub cognition: f64,
}

impl Default for HazardWeights {
    fn default() -> Self {
        Self {
            mobility: 1.0,
            vision: 1.0,
            cognition: 1.0,
        }
    }
}

/// One hazard category in the taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardDefinition {
    /// Stable identifier, unique across the catalog.
    pub id: String,
    /// Human-readable label shown in reports.
    pub display_name: String,
    /// Per-dimension severity multipliers.
    #[serde(default)]
    pub weights: HazardWeights,
    /// Unweighted severity of the hazard.
    pub base_score: f64,
    /// Free-text description for caregivers.
    #[serde(default)]
    pub description: String,
}

/// Lookup row from a detector object label to a hazard id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionMapping {
    /// Object label exactly as emitted by the detector.
    pub object: String,
    /// Referenced hazard id; must resolve within the catalog.
    pub hazard_id: String,
    /// Free-text example of the mapped object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Free-text notes for catalog maintainers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One labeled score band with an inclusive `[min_score, max_score]` range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskThreshold {
    /// Band label, for example `Low` or `High`.
    pub label: String,
    /// Inclusive lower bound.
    pub min_score: f64,
    /// Inclusive upper bound.
    pub max_score: f64,
    /// Display color associated with the band.
    pub color: String,
}

impl RiskThreshold {
    /// Returns `true` when `score` falls inside the inclusive band range.
    pub fn contains(&self, score: f64) -> bool {
        self.min_score <= score && score <= self.max_score
    }
}

/// Raw catalog document before index construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Catalog version string.
    #[serde(default)]
    pub version: String,
    /// Date the catalog was last edited.
    #[serde(default)]
    pub last_updated: String,
    /// Free-text description of the catalog.
    #[serde(default)]
    pub description: String,
    /// Hazard taxonomy section.
    pub hazards: Vec<HazardDefinition>,
    /// Detector-label mapping section.
    pub detection_mappings: Vec<DetectionMapping>,
    /// Ordered risk band section.
    pub risk_thresholds: Vec<RiskThreshold>,
}

/// Parses a consolidated JSON catalog document.
///
/// The structural pass runs first so a document missing several sections
/// reports all of them in one [`CatalogError::MissingSections`] instead of
/// failing on the first absent field.
///
/// # Errors
/// Returns [`CatalogError::MissingSections`] when any required section is
/// absent and [`CatalogError::Decode`] for malformed JSON or field types.
pub fn parse_catalog_document(raw: &str) -> Result<CatalogDocument, CatalogError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;

    let missing: Vec<&str> = REQUIRED_SECTIONS
        .iter()
        .copied()
        .filter(|section| value.get(section).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(CatalogError::MissingSections(missing.join(", ")));
    }

    serde_json::from_value(value).map_err(CatalogError::Decode)
}

/// Validated, indexed hazard catalog shared read-only across requests.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardCatalog {
    version: String,
    hazard_by_id: HashMap<String, HazardDefinition>,
    hazard_id_by_object: HashMap<String, String>,
    risk_thresholds: Vec<RiskThreshold>,
}

impl HazardCatalog {
    /// Parses and validates a catalog from a JSON document string.
    ///
    /// # Errors
    /// Propagates [`parse_catalog_document`] and
    /// [`HazardCatalog::from_document`] failures.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        Self::from_document(parse_catalog_document(raw)?)
    }

    /// Builds the indexed catalog from a parsed document.
    ///
    /// Duplicate hazard ids, duplicate object mappings, and mappings that
    /// reference an unknown hazard id are rejected outright rather than
    /// resolved by last-write-wins.
    ///
    /// # Errors
    /// Returns the specific [`CatalogError`] variant for the first structural
    /// violation encountered.
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        let mut hazard_by_id = HashMap::with_capacity(document.hazards.len());
        for hazard in document.hazards {
            validate_hazard(&hazard)?;
            let id = hazard.id.clone();
            if hazard_by_id.insert(id.clone(), hazard).is_some() {
                return Err(CatalogError::DuplicateHazardId(id));
            }
        }

        let mut hazard_id_by_object = HashMap::with_capacity(document.detection_mappings.len());
        for mapping in document.detection_mappings {
            if mapping.object.trim().is_empty() {
                return Err(CatalogError::InvalidMapping(
                    "object label is blank".to_string(),
                ));
            }
            if !hazard_by_id.contains_key(&mapping.hazard_id) {
                return Err(CatalogError::UnknownHazardReference {
                    object: mapping.object,
                    hazard_id: mapping.hazard_id,
                });
            }
            if hazard_id_by_object
                .insert(mapping.object.clone(), mapping.hazard_id)
                .is_some()
            {
                return Err(CatalogError::DuplicateObjectMapping(mapping.object));
            }
        }

        if document.risk_thresholds.is_empty() {
            return Err(CatalogError::EmptyThresholds);
        }
        for threshold in &document.risk_thresholds {
            validate_threshold(threshold)?;
        }

        tracing::info!(
            hazards = hazard_by_id.len(),
            mappings = hazard_id_by_object.len(),
            bands = document.risk_thresholds.len(),
            version = %document.version,
            "hazard catalog loaded"
        );

        Ok(Self {
            version: document.version,
            hazard_by_id,
            hazard_id_by_object,
            risk_thresholds: document.risk_thresholds,
        })
    }

    /// Returns the hazard definition for `hazard_id`, if configured.
    pub fn get_hazard(&self, hazard_id: &str) -> Option<&HazardDefinition> {
        self.hazard_by_id.get(hazard_id)
    }

    /// Resolves a detector object label to its hazard definition.
    ///
    /// Two-hop lookup: object -> hazard id -> definition. Returns `None` for
    /// labels the catalog does not map; callers treat that as a designed
    /// no-op, not an error.
    pub fn get_hazard_for_object(&self, object: &str) -> Option<&HazardDefinition> {
        let hazard_id = self.hazard_id_by_object.get(object)?;
        self.hazard_by_id.get(hazard_id)
    }

    /// Classifies an aggregate score into a risk band.
    ///
    /// Bands are scanned in document order and matched inclusively. A score
    /// outside every configured band falls back to the last band, so an
    /// unclassifiable score surfaces as the highest configured risk instead
    /// of an invisible "unknown".
    pub fn classify(&self, score: f64) -> &RiskThreshold {
        match self
            .risk_thresholds
            .iter()
            .find(|band| band.contains(score))
        {
            Some(band) => band,
            None => {
                tracing::warn!(score, "score outside configured bands, using highest band");
                // Invariant: construction rejects empty threshold lists.
                &self.risk_thresholds[self.risk_thresholds.len() - 1]
            }
        }
    }

    /// Returns the catalog version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the number of configured hazards.
    pub fn hazard_count(&self) -> usize {
        self.hazard_by_id.len()
    }

    /// Returns the number of configured object mappings.
    pub fn mapping_count(&self) -> usize {
        self.hazard_id_by_object.len()
    }

    /// Returns the configured risk bands in document order.
    pub fn thresholds(&self) -> &[RiskThreshold] {
        &self.risk_thresholds
    }
}

fn validate_hazard(hazard: &HazardDefinition) -> Result<(), CatalogError> {
    if hazard.id.trim().is_empty() {
        return Err(CatalogError::InvalidHazard {
            id: hazard.id.clone(),
            reason: "id is blank".to_string(),
        });
    }

    if !hazard.base_score.is_finite() || hazard.base_score < 0.0 {
        return Err(CatalogError::InvalidHazard {
            id: hazard.id.clone(),
            reason: format!("base_score must be finite and >= 0, got {}", hazard.base_score),
        });
    }

    for (dimension, weight) in [
        ("mobility", hazard.weights.mobility),
        ("vision", hazard.weights.vision),
        ("cognition", hazard.weights.cognition),
    ] {
        if !weight.is_finite() || weight < 0.0 {
            return Err(CatalogError::InvalidHazard {
                id: hazard.id.clone(),
                reason: format!("{dimension} weight must be finite and >= 0, got {weight}"),
            });
        }
    }

    Ok(())
}

fn validate_threshold(threshold: &RiskThreshold) -> Result<(), CatalogError> {
    if threshold.label.trim().is_empty() {
        return Err(CatalogError::InvalidThreshold {
            label: threshold.label.clone(),
            reason: "label is blank".to_string(),
        });
    }

    if !threshold.min_score.is_finite() || !threshold.max_score.is_finite() {
        return Err(CatalogError::InvalidThreshold {
            label: threshold.label.clone(),
            reason: "band bounds must be finite".to_string(),
        });
    }

    if threshold.min_score > threshold.max_score {
        return Err(CatalogError::InvalidThreshold {
            label: threshold.label.clone(),
            reason: format!(
                "min_score {} exceeds max_score {}",
                threshold.min_score, threshold.max_score
            ),
        });
    }

    Ok(())
}

/// Catalog load and validation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// JSON decode failure.
    #[error("catalog decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// One or more required sections are absent.
    #[error("catalog document is missing required sections: {0}")]
    MissingSections(String),
    /// Two hazards share one id.
    #[error("duplicate hazard id: {0}")]
    DuplicateHazardId(String),
    /// Two mappings share one object label.
    #[error("duplicate detection mapping for object: {0}")]
    DuplicateObjectMapping(String),
    /// A mapping references a hazard id absent from the hazard table.
    #[error("mapping for object {object} references unknown hazard id: {hazard_id}")]
    UnknownHazardReference {
        /// Object label carried by the offending mapping.
        object: String,
        /// Unresolvable hazard id.
        hazard_id: String,
    },
    /// A hazard definition violates field constraints.
    #[error("invalid hazard {id}: {reason}")]
    InvalidHazard {
        /// Hazard id as written in the document.
        id: String,
        /// Violated constraint.
        reason: String,
    },
    /// A detection mapping violates field constraints.
    #[error("invalid detection mapping: {0}")]
    InvalidMapping(String),
    /// The document configures no risk bands.
    #[error("risk threshold list is empty")]
    EmptyThresholds,
    /// A risk band violates field constraints.
    #[error("invalid risk threshold {label}: {reason}")]
    InvalidThreshold {
        /// Band label as written in the document.
        label: String,
        /// Violated constraint.
        reason: String,
    },
    /// Legacy CSV row decode failure.
    #[error("legacy csv decode failure: {0}")]
    LegacyCsv(#[from] csv::Error),
}
