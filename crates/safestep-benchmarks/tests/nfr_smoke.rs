//! Benchmark smoke test for the deterministic map-then-score loop.

use std::time::Instant;

use safestep_catalog::{
    CatalogDocument, DetectionMapping, HazardCatalog, HazardDefinition, HazardWeights,
    RiskThreshold,
};
use safestep_detection_contract::Detection;
use safestep_profile::ImpairmentProfile;
use safestep_scoring::{map_detections_to_hazards, score_hazards};

fn synthetic_catalog(hazard_count: usize) -> HazardCatalog {
    let hazards = (0..hazard_count)
        .map(|index| HazardDefinition {
            id: format!("hazard-{index}"),
            display_name: format!("Hazard {index}"),
            weights: HazardWeights {
                mobility: (index % 3) as f64,
                vision: ((index + 1) % 3) as f64,
                cognition: ((index + 2) % 3) as f64,
            },
            base_score: (index % 20) as f64,
            description: String::new(),
        })
        .collect();

    let detection_mappings = (0..hazard_count)
        .map(|index| DetectionMapping {
            object: format!("object-{index}"),
            hazard_id: format!("hazard-{index}"),
            example: None,
            notes: None,
        })
        .collect();

    let document = CatalogDocument {
        version: "bench".to_string(),
        last_updated: String::new(),
        description: String::new(),
        hazards,
        detection_mappings,
        risk_thresholds: vec![
            RiskThreshold {
                label: "Low".to_string(),
                min_score: 0.0,
                max_score: 33.0,
                color: "green".to_string(),
            },
            RiskThreshold {
                label: "Medium".to_string(),
                min_score: 34.0,
                max_score: 66.0,
                color: "yellow".to_string(),
            },
            RiskThreshold {
                label: "High".to_string(),
                min_score: 67.0,
                max_score: 100.0,
                color: "red".to_string(),
            },
        ],
    };

    HazardCatalog::from_document(document).expect("synthetic catalog should build")
}

#[test]
fn benchmark_assessment_smoke_prints_latency() {
    let catalog = synthetic_catalog(50);
    let profile = ImpairmentProfile::new(0.6, 0.3, 0.4).expect("profile should build");

    let detections: Vec<Detection> = (0..500)
        .map(|index| Detection::new(format!("object-{}", index % 60), format!("room-{}", index % 5)))
        .collect();

    let start = Instant::now();
    let mut detail_total = 0usize;

    for _ in 0..100 {
        let matched = map_detections_to_hazards(&detections, &catalog);
        let report = score_hazards(&matched, &profile, &catalog).expect("scoring should succeed");
        detail_total += report.hazard_details.len();
    }

    let elapsed_ms = start.elapsed().as_millis();
    println!("benchmark_assessment_elapsed_ms={elapsed_ms}");
    println!("benchmark_assessment_detail_total={detail_total}");

    // This is a lightweight guardrail; strict NFR checks are environment-specific.
    assert!(
        elapsed_ms < 5_000,
        "assessment smoke benchmark should stay bounded"
    );
}
