//! Integration tests for the map-then-score assessment pipeline.

mod common;

use safestep_app::assess;
use safestep_detection_contract::Detection;

#[test]
fn assess_pipeline_tests_scores_the_worked_example() {
    let catalog = common::fixture_catalog();
    let detections = vec![Detection::new("rug", "bedroom")];

    let report = assess(&detections, &common::mobility_profile(), &catalog)
        .expect("assessment should succeed");

    assert_eq!(report.total_score, 16.7);
    assert_eq!(report.risk_level, "Low");
    assert_eq!(report.color, "green");
    assert_eq!(report.hazard_details.len(), 1);
    assert_eq!(report.hazard_details[0].hazard_name, "Loose Rugs");
    assert_eq!(report.hazard_details[0].location, "bedroom");
    assert_eq!(report.hazard_details[0].reason, "Mobility increases risk");
}

#[test]
fn assess_pipeline_tests_drops_only_unmapped_detections() {
    let catalog = common::fixture_catalog();
    let detections = common::fixture_detections();

    let report = assess(&detections, &common::mobility_profile(), &catalog)
        .expect("assessment should succeed");

    assert_eq!(report.hazard_details.len(), 3);
    let ids: Vec<&str> = report
        .hazard_details
        .iter()
        .map(|detail| detail.hazard_id.as_str())
        .collect();
    assert_eq!(ids, ["loose_rugs", "poor_lighting", "steps_or_thresholds"]);
}

#[test]
fn assess_pipeline_tests_is_deterministic_across_calls() {
    let catalog = common::fixture_catalog();
    let detections = common::fixture_detections();

    let first = assess(&detections, &common::mobility_profile(), &catalog)
        .expect("assessment should succeed");
    let second = assess(&detections, &common::mobility_profile(), &catalog)
        .expect("assessment should succeed");

    assert_eq!(first, second);
}
