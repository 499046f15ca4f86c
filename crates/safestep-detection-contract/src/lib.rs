#![warn(missing_docs)]
//! # safestep-detection-contract
//!
//! ## Purpose
//! Defines the detector output schema consumed by the `safestep` scoring
//! pipeline.
//!
//! ## Responsibilities
//! - Parse versioned detection report payloads.
//! - Validate mandatory contract fields.
//! - Carry confidence and bounding-box data without interpreting it.
//!
//! ## Data flow
//! Raw detector JSON -> [`parse_detection_report`] -> detection list handed
//! to hazard mapping.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs to avoid borrowing from transient upload
//! or subprocess buffers.
//!
//! ## Error model
//! Invalid JSON or blank mandatory fields return [`DetectionContractError`].
//!
//! ## Notes
//! The object-detection model itself lives outside this workspace. This crate
//! is deliberately agnostic to detector internals: unknown payload fields are
//! ignored, and object labels with no catalog mapping are a concern for the
//! scorer, not the contract.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical schema version for detection report payloads.
pub const DETECTION_SCHEMA_VERSION_V1: &str = "v1";

/// Versioned detection report emitted by the detector subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Report schema version.
    pub schema_version: String,
    /// Request identifier for traceability.
    pub request_id: String,
    /// Individual object detections in detector emission order.
    #[serde(default)]
    pub detections: Vec<Detection>,
}

/// One recognized physical object and where it was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Object label exactly as emitted by the detector.
    pub object: String,
    /// Room name the object was found in, when the detector knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Detector confidence in `[0.0, 1.0]`; carried but never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Bounding box as `[x, y, width, height]`; carried but never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
}

impl Detection {
    /// Creates a detection with only the fields the scorer reads.
    pub fn new(object: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            location: Some(location.into()),
            confidence: None,
            bbox: None,
        }
    }
}

/// Parses raw JSON into a validated detection report.
///
/// # Errors
/// Returns [`DetectionContractError::Decode`] for invalid JSON.
/// Returns [`DetectionContractError::InvalidContract`] when mandatory
/// contract fields are blank.
pub fn parse_detection_report(raw: &str) -> Result<DetectionReport, DetectionContractError> {
    let parsed: DetectionReport =
        serde_json::from_str(raw).map_err(DetectionContractError::Decode)?;

    if parsed.schema_version.trim().is_empty() {
        return Err(DetectionContractError::InvalidContract(
            "schema_version is empty".to_string(),
        ));
    }

    if parsed.request_id.trim().is_empty() {
        return Err(DetectionContractError::InvalidContract(
            "request_id is empty".to_string(),
        ));
    }

    Ok(parsed)
}

/// Detection contract errors.
#[derive(Debug, Error)]
pub enum DetectionContractError {
    /// JSON decode failure.
    #[error("detection report decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// Parsed payload violates contract invariants.
    #[error("detection contract violation: {0}")]
    InvalidContract(String),
}

#[cfg(test)]
mod tests {
    //! Unit tests for report parsing.

    use super::*;

    #[test]
    fn parses_report_with_optional_fields_absent() {
        let raw = r#"{
            "schema_version": "v1",
            "request_id": "req-1",
            "detections": [
                {"object": "rug", "location": "bedroom"},
                {"object": "cord"}
            ]
        }"#;

        let report = parse_detection_report(raw).expect("report should parse");
        assert_eq!(report.detections.len(), 2);
        assert_eq!(report.detections[0].location.as_deref(), Some("bedroom"));
        assert_eq!(report.detections[1].location, None);
        assert_eq!(report.detections[1].confidence, None);
    }

    #[test]
    fn carries_confidence_and_bbox_without_interpreting() {
        let raw = r#"{
            "schema_version": "v1",
            "request_id": "req-2",
            "detections": [
                {"object": "rug", "location": "hallway", "confidence": 0.91,
                 "bbox": [10.0, 20.0, 64.0, 48.0]}
            ]
        }"#;

        let report = parse_detection_report(raw).expect("report should parse");
        assert_eq!(report.detections[0].confidence, Some(0.91));
        assert_eq!(report.detections[0].bbox, Some([10.0, 20.0, 64.0, 48.0]));
    }

    #[test]
    fn rejects_blank_contract_fields() {
        let raw = r#"{"schema_version": " ", "request_id": "req-3"}"#;
        assert!(matches!(
            parse_detection_report(raw),
            Err(DetectionContractError::InvalidContract(_))
        ));
    }

    #[test]
    fn ignores_unknown_payload_fields() {
        let raw = r#"{
            "schema_version": "v1",
            "request_id": "req-4",
            "model": "yolo-v8n",
            "detections": [{"object": "rug", "frame_index": 3}]
        }"#;

        let report = parse_detection_report(raw).expect("report should parse");
        assert_eq!(report.detections[0].object, "rug");
    }
}
