//! Integration tests for the distinct no-hazards report path.

mod common;

use safestep_app::assess;
use safestep_detection_contract::Detection;
use safestep_profile::ImpairmentProfile;
use safestep_scoring::{NO_HAZARDS_RECOMMENDATION, RISK_COLOR_NONE, RISK_LEVEL_NONE};

#[test]
fn clear_report_tests_unmapped_objects_yield_the_fixed_clear_report() {
    let catalog = common::fixture_catalog();
    let detections = vec![Detection::new("unknown_widget", "kitchen")];

    let report = assess(&detections, &common::mobility_profile(), &catalog)
        .expect("assessment should succeed");

    assert_eq!(report.total_score, 0.0);
    assert_eq!(report.risk_level, RISK_LEVEL_NONE);
    assert_eq!(report.color, RISK_COLOR_NONE);
    assert!(report.hazard_details.is_empty());
    assert_eq!(report.recommendation, NO_HAZARDS_RECOMMENDATION);
}

#[test]
fn clear_report_tests_profile_content_does_not_change_the_clear_report() {
    let catalog = common::fixture_catalog();
    let severe = ImpairmentProfile::new(1.0, 1.0, 1.0).expect("profile should build");

    let report = assess(&[], &severe, &catalog).expect("assessment should succeed");

    assert_eq!(report.total_score, 0.0);
    assert_eq!(report.risk_level, RISK_LEVEL_NONE);
}
