//! Legacy CSV-triplet catalog ingestion.
//!
//! The first catalog generation shipped as three CSV files (risk matrix,
//! detection mapping, score thresholds). This adapter converts that triplet
//! into a [`CatalogDocument`] so both generations flow through the same
//! [`crate::HazardCatalog::from_document`] validation path.
//!
//! Field normalization matches the consolidated-format migration: hazard
//! names become snake_case ids, display names are title-cased, and band
//! colors are lowercased. Rows with a blank key column are skipped, matching
//! the tolerant legacy loaders.

use std::io::Read;

use serde::Deserialize;

use crate::{
    CatalogDocument, CatalogError, DetectionMapping, HazardDefinition, HazardWeights,
    RiskThreshold,
};

/// Legacy risk matrix header: `hazard,base_score,weight_mobility,weight_vision,weight_cognition`.
#[derive(Debug, Deserialize)]
struct MatrixRow {
    hazard: String,
    base_score: String,
    weight_mobility: String,
    weight_vision: String,
    weight_cognition: String,
}

/// Legacy mapping header: `object,hazard,example,notes`.
#[derive(Debug, Deserialize)]
struct MappingRow {
    object: String,
    hazard: String,
    #[serde(default)]
    example: String,
    #[serde(default)]
    notes: String,
}

/// Legacy threshold header: `label,min_score,max_score,color`.
#[derive(Debug, Deserialize)]
struct ThresholdRow {
    label: String,
    min_score: String,
    max_score: String,
    color: String,
}

/// Builds a catalog document from the three legacy CSV sources.
///
/// # Errors
/// Returns [`CatalogError::LegacyCsv`] for unreadable rows and
/// [`CatalogError::InvalidHazard`] / [`CatalogError::InvalidThreshold`] for
/// non-numeric score columns.
pub fn document_from_csv_readers<M, P, T>(
    matrix: M,
    mappings: P,
    thresholds: T,
) -> Result<CatalogDocument, CatalogError>
where
    M: Read,
    P: Read,
    T: Read,
{
    let mut hazards = Vec::new();
    let mut matrix_reader = csv::Reader::from_reader(matrix);
    for row in matrix_reader.deserialize() {
        let row: MatrixRow = row?;
        if row.hazard.trim().is_empty() {
            continue;
        }

        let id = hazard_id_from_name(&row.hazard);
        hazards.push(HazardDefinition {
            display_name: display_name_from_name(&row.hazard),
            weights: HazardWeights {
                mobility: parse_score(&id, "weight_mobility", &row.weight_mobility)?,
                vision: parse_score(&id, "weight_vision", &row.weight_vision)?,
                cognition: parse_score(&id, "weight_cognition", &row.weight_cognition)?,
            },
            base_score: parse_score(&id, "base_score", &row.base_score)?,
            description: format!(
                "Hazard related to {}",
                row.hazard.trim().replace('_', " ").to_lowercase()
            ),
            id,
        });
    }

    let mut detection_mappings = Vec::new();
    let mut mapping_reader = csv::Reader::from_reader(mappings);
    for row in mapping_reader.deserialize() {
        let row: MappingRow = row?;
        if row.object.trim().is_empty() || row.hazard.trim().is_empty() {
            continue;
        }

        detection_mappings.push(DetectionMapping {
            object: row.object.trim().to_string(),
            hazard_id: hazard_id_from_name(&row.hazard),
            example: non_blank(row.example),
            notes: non_blank(row.notes),
        });
    }

    let mut risk_thresholds = Vec::new();
    let mut threshold_reader = csv::Reader::from_reader(thresholds);
    for row in threshold_reader.deserialize() {
        let row: ThresholdRow = row?;
        if row.label.trim().is_empty() {
            continue;
        }

        risk_thresholds.push(RiskThreshold {
            min_score: parse_band_bound(&row.label, "min_score", &row.min_score)?,
            max_score: parse_band_bound(&row.label, "max_score", &row.max_score)?,
            color: row.color.trim().to_lowercase(),
            label: row.label.trim().to_string(),
        });
    }

    tracing::debug!(
        hazards = hazards.len(),
        mappings = detection_mappings.len(),
        bands = risk_thresholds.len(),
        "legacy csv catalog converted"
    );

    Ok(CatalogDocument {
        version: String::new(),
        last_updated: String::new(),
        description: "Converted from legacy CSV catalog".to_string(),
        hazards,
        detection_mappings,
        risk_thresholds,
    })
}

fn hazard_id_from_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

fn display_name_from_name(name: &str) -> String {
    let spaced = name.trim().replace('_', " ");
    spaced
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_score(id: &str, column: &str, value: &str) -> Result<f64, CatalogError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| CatalogError::InvalidHazard {
            id: id.to_string(),
            reason: format!("non-numeric {column}: {value:?}"),
        })
}

fn parse_band_bound(label: &str, column: &str, value: &str) -> Result<f64, CatalogError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| CatalogError::InvalidThreshold {
            label: label.to_string(),
            reason: format!("non-numeric {column}: {value:?}"),
        })
}

#[cfg(test)]
mod tests {
    //! Unit tests for legacy CSV conversion.

    use super::*;
    use crate::HazardCatalog;

    const MATRIX_CSV: &str = "\
hazard,base_score,weight_mobility,weight_vision,weight_cognition
loose_rugs,10,2,1,1
Poor Lighting,8,1,2,1
,,,,
";

    const MAPPING_CSV: &str = "\
object,hazard,example,notes
rug,loose_rugs,Small throw rug,Can slip or bunch up
light_bulb_out,Poor Lighting,,
";

    const THRESHOLD_CSV: &str = "\
label,min_score,max_score,color
Low,0,33,GREEN
Medium,34,66,Yellow
High,67,100,red
";

    #[test]
    fn converts_triplet_with_field_normalization() {
        let document = document_from_csv_readers(
            MATRIX_CSV.as_bytes(),
            MAPPING_CSV.as_bytes(),
            THRESHOLD_CSV.as_bytes(),
        )
        .expect("conversion should succeed");

        assert_eq!(document.hazards.len(), 2);
        assert_eq!(document.hazards[0].id, "loose_rugs");
        assert_eq!(document.hazards[0].display_name, "Loose Rugs");
        assert_eq!(document.hazards[1].id, "poor_lighting");
        assert_eq!(document.hazards[1].display_name, "Poor Lighting");

        assert_eq!(document.detection_mappings.len(), 2);
        assert_eq!(document.detection_mappings[1].hazard_id, "poor_lighting");
        assert_eq!(document.detection_mappings[1].example, None);

        assert_eq!(document.risk_thresholds.len(), 3);
        assert_eq!(document.risk_thresholds[0].color, "green");
    }

    #[test]
    fn converted_document_builds_a_catalog() {
        let document = document_from_csv_readers(
            MATRIX_CSV.as_bytes(),
            MAPPING_CSV.as_bytes(),
            THRESHOLD_CSV.as_bytes(),
        )
        .expect("conversion should succeed");

        let catalog = HazardCatalog::from_document(document).expect("catalog builds");
        assert_eq!(
            catalog.get_hazard_for_object("light_bulb_out").unwrap().id,
            "poor_lighting"
        );
    }

    #[test]
    fn rejects_non_numeric_base_score() {
        let matrix = "\
hazard,base_score,weight_mobility,weight_vision,weight_cognition
loose_rugs,high,2,1,1
";
        let error = document_from_csv_readers(
            matrix.as_bytes(),
            MAPPING_CSV.as_bytes(),
            THRESHOLD_CSV.as_bytes(),
        )
        .unwrap_err();

        assert!(matches!(
            error,
            CatalogError::InvalidHazard { id, .. } if id == "loose_rugs"
        ));
    }
}
