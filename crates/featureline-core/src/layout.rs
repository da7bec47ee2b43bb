//! Engine façade: raw features in, positioned layout out.
//!
//! [`build_layout`] runs the whole pipeline — build the scale, assign x
//! coordinates, resolve card collisions, derive the date range — from an
//! immutable snapshot of the feature list. A new list means a full rebuild;
//! nothing is patched incrementally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collision::assign_slots;
use crate::error::{EngineError, Result};
use crate::feature::{Feature, PositionedFeature, ScaledFeature};
use crate::scale::{ScaleStrategy, TimeScale};

/// Default horizontal density of the linear axis.
pub const DEFAULT_PX_PER_DAY: f64 = 12.0;

/// Layout tuning knobs. All values must be positive; run
/// [`LayoutConfig::validate`] at the boundary before handing a caller-built
/// config to the engine — degenerate values are not silently corrected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub px_per_day: f64,
    /// Minimum horizontal distance between two cards sharing a hemisphere
    /// and slot; also the per-card width floor for adaptive month bands.
    pub min_card_spacing: f64,
    /// Vertical distance from the axis to slot 0.
    pub base_y_offset: f64,
    /// Vertical distance between consecutive slots.
    pub slot_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            px_per_day: DEFAULT_PX_PER_DAY,
            min_card_spacing: 200.0,
            base_y_offset: 100.0,
            slot_height: 120.0,
        }
    }
}

impl LayoutConfig {
    /// Reject non-positive or non-finite values.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("px_per_day", self.px_per_day),
            ("min_card_spacing", self.min_card_spacing),
            ("base_y_offset", self.base_y_offset),
            ("slot_height", self.slot_height),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("must be a positive number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Everything the rendering layer needs: positioned cards, the date range
/// they span, and the scale that produced their coordinates.
#[derive(Debug, Clone)]
pub struct Layout {
    pub features: Vec<PositionedFeature>,
    pub min_date: DateTime<Utc>,
    pub max_date: DateTime<Utc>,
    pub scale: TimeScale,
}

/// Compute the full layout for a feature snapshot.
///
/// Zero features is valid and yields an empty layout with
/// `min_date == max_date == today` and a linear scale.
pub fn build_layout(
    features: &[Feature],
    today: DateTime<Utc>,
    strategy: ScaleStrategy,
    config: &LayoutConfig,
) -> Layout {
    if features.is_empty() {
        return Layout {
            features: Vec::new(),
            min_date: today,
            max_date: today,
            scale: TimeScale::linear(today, config.px_per_day),
        };
    }

    let scale = match strategy {
        ScaleStrategy::Linear => TimeScale::linear(today, config.px_per_day),
        ScaleStrategy::Adaptive => {
            TimeScale::adaptive(features, today, config.px_per_day, config.min_card_spacing)
        }
    };

    let mut scaled: Vec<ScaledFeature> = features
        .iter()
        .map(|f| ScaledFeature {
            x: scale.date_to_x_for(f.release_date, Some(&f.id)),
            is_past: f.is_past(today),
            feature: f.clone(),
        })
        .collect();
    scaled.sort_by(|a, b| a.feature.release_date.cmp(&b.feature.release_date));

    // Non-empty by the guard above.
    let min_date = scaled[0].feature.release_date;
    let max_date = scaled[scaled.len() - 1].feature.release_date;

    Layout {
        features: assign_slots(&scaled, config),
        min_date,
        max_date,
        scale,
    }
}

/// Deserialize a JSON feature array, rejecting malformed records before
/// they enter the engine.
pub fn parse_features(json: &str) -> Result<Vec<Feature>> {
    Ok(serde_json::from_str(json)?)
}
