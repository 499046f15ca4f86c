#![warn(missing_docs)]
//! # safestep-profile
//!
//! ## Purpose
//! Models the per-user impairment profile used to personalize hazard scores.
//!
//! ## Responsibilities
//! - Represent normalized mobility, vision, and cognition scores.
//! - Own the range policy for out-of-bounds inputs.
//! - Parse profile documents through that same policy.
//!
//! ## Data flow
//! Profile source JSON -> [`parse_profile_document`] ->
//! [`ImpairmentProfile`] consumed read-only by the scorer.
//!
//! ## Error model
//! Non-finite inputs return [`ProfileError`]; finite out-of-range inputs are
//! clamped, never rejected.
//!
//! ## Range policy
//! Every dimension is normalized into `[0.0, 1.0]` (0 = no impairment,
//! 1 = maximal). [`ImpairmentProfile::new`] clamps finite out-of-range
//! values so a misbehaving upstream profile source degrades to the nearest
//! valid assessment instead of inflating scores or losing the report.
//! NaN and infinity cannot be ordered into the range and are rejected.

use serde::Deserialize;
use thiserror::Error;

/// Normalized per-user impairment scores.
///
/// Values are guaranteed to be finite and within `[0.0, 1.0]` by
/// construction; the scorer relies on that invariant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpairmentProfile {
    /// Mobility impairment in `[0.0, 1.0]`.
    pub mobility: f64,
    /// Vision impairment in `[0.0, 1.0]`.
    pub vision: f64,
    /// Cognition impairment in `[0.0, 1.0]`.
    pub cognition: f64,
}

impl ImpairmentProfile {
    /// Creates a validated profile, clamping finite values into `[0.0, 1.0]`.
    ///
    /// # Errors
    /// Returns [`ProfileError::NotFinite`] when any dimension is NaN or
    /// infinite.
    pub fn new(mobility: f64, vision: f64, cognition: f64) -> Result<Self, ProfileError> {
        for (dimension, value) in [
            ("mobility", mobility),
            ("vision", vision),
            ("cognition", cognition),
        ] {
            if !value.is_finite() {
                return Err(ProfileError::NotFinite {
                    dimension: dimension.to_string(),
                });
            }
        }

        Ok(Self {
            mobility: mobility.clamp(0.0, 1.0),
            vision: vision.clamp(0.0, 1.0),
            cognition: cognition.clamp(0.0, 1.0),
        })
    }

    /// Returns the profile of a user with no recorded impairments.
    pub fn none() -> Self {
        Self {
            mobility: 0.0,
            vision: 0.0,
            cognition: 0.0,
        }
    }
}

/// Raw profile document shape; omitted dimensions read as no impairment.
#[derive(Debug, Deserialize)]
struct ProfileDocument {
    #[serde(default)]
    mobility: f64,
    #[serde(default)]
    vision: f64,
    #[serde(default)]
    cognition: f64,
}

/// Parses a profile JSON document through the range policy.
///
/// # Errors
/// Returns [`ProfileError::Decode`] for invalid JSON and
/// [`ProfileError::NotFinite`] for NaN/infinite dimensions.
pub fn parse_profile_document(raw: &str) -> Result<ImpairmentProfile, ProfileError> {
    let document: ProfileDocument = serde_json::from_str(raw)?;
    ImpairmentProfile::new(document.mobility, document.vision, document.cognition)
}

/// Profile validation and decode errors.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// JSON decode failure.
    #[error("profile decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// A dimension is NaN or infinite.
    #[error("profile {dimension} is not a finite number")]
    NotFinite {
        /// Offending dimension name.
        dimension: String,
    },
}
