//! Shared fixtures for app integration tests.

use safestep_catalog::HazardCatalog;
use safestep_detection_contract::Detection;
use safestep_profile::ImpairmentProfile;

/// Consolidated catalog document used across integration tests.
#[allow(dead_code)]
pub const CATALOG_JSON: &str = r#"{
    "version": "1.0.0",
    "last_updated": "2025-07-14",
    "description": "Integration test catalog",
    "hazards": [
        {
            "id": "loose_rugs",
            "display_name": "Loose Rugs",
            "weights": {"mobility": 2, "vision": 1, "cognition": 1},
            "base_score": 10,
            "description": "Rugs that can slip or bunch up"
        },
        {
            "id": "poor_lighting",
            "display_name": "Poor Lighting",
            "weights": {"mobility": 1, "vision": 2, "cognition": 1},
            "base_score": 8,
            "description": "Insufficient lighting"
        },
        {
            "id": "steps_or_thresholds",
            "display_name": "Steps/Thresholds",
            "weights": {"mobility": 2, "vision": 1, "cognition": 2},
            "base_score": 12,
            "description": "Raised surfaces"
        }
    ],
    "detection_mappings": [
        {"object": "rug", "hazard_id": "loose_rugs"},
        {"object": "light_bulb_out", "hazard_id": "poor_lighting"},
        {"object": "threshold", "hazard_id": "steps_or_thresholds"}
    ],
    "risk_thresholds": [
        {"label": "Low", "min_score": 0, "max_score": 33, "color": "green"},
        {"label": "Medium", "min_score": 34, "max_score": 66, "color": "yellow"},
        {"label": "High", "min_score": 67, "max_score": 100, "color": "red"}
    ]
}"#;

/// Builds the shared integration catalog.
#[allow(dead_code)]
pub fn fixture_catalog() -> HazardCatalog {
    HazardCatalog::from_json_str(CATALOG_JSON).expect("fixture catalog should load")
}

/// Detections covering every mapped object plus one unmapped label.
#[allow(dead_code)]
pub fn fixture_detections() -> Vec<Detection> {
    vec![
        Detection::new("rug", "living room"),
        Detection::new("light_bulb_out", "hallway"),
        Detection::new("threshold", "bathroom"),
        Detection::new("unknown_object", "kitchen"),
    ]
}

/// Profile with maximal mobility impairment only.
#[allow(dead_code)]
pub fn mobility_profile() -> ImpairmentProfile {
    ImpairmentProfile::new(1.0, 0.0, 0.0).expect("fixture profile should build")
}
