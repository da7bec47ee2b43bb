//! Date <-> coordinate mapping for the timeline axis.
//!
//! This module provides:
//! - [`LinearScale`]: constant pixels-per-day, unbounded extent
//! - [`AdaptiveScale`]: per-month widths, widened for event-dense months
//! - [`TimeScale`]: the strategy-agnostic wrapper callers work with
//!
//! Both strategies anchor `today` at x = 0 exactly, so card coordinates,
//! axis ticks, and pan bounds all agree on where "now" sits. A scale is
//! built once per feature set and is immutable afterwards; changing the
//! feature set, `today`, or `px_per_day` means rebuilding it.

mod adaptive;
mod linear;

pub use adaptive::AdaptiveScale;
pub use linear::LinearScale;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feature::Feature;

/// Milliseconds in a day; fractional days are computed from ms deltas so
/// sub-day precision survives round-trips.
pub(crate) const MS_PER_DAY: f64 = 86_400_000.0;

/// Which mapping strategy [`crate::build_layout`] should construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleStrategy {
    /// Constant pixels per day. Simple and right for sparse data.
    #[default]
    Linear,
    /// Month widths stretched so dense months still fit their cards, at the
    /// cost of a non-uniform date axis. The axis is a navigation aid, not a
    /// ruler.
    Adaptive,
}

/// A date <-> x mapping plus its derived total width.
///
/// Callers never need to know which variant is active; every consumer
/// (cards, ticks, viewport bounds) derives its coordinates from the same
/// value.
#[derive(Debug, Clone)]
pub enum TimeScale {
    Linear(LinearScale),
    Adaptive(AdaptiveScale),
}

impl TimeScale {
    /// Build a linear scale anchored at `today`.
    pub fn linear(today: DateTime<Utc>, px_per_day: f64) -> Self {
        TimeScale::Linear(LinearScale::new(today, px_per_day))
    }

    /// Build a density-adaptive scale from the full feature set.
    ///
    /// Degrades to linear when the feature set is empty or when today's
    /// month falls outside the generated band range.
    pub fn adaptive(
        features: &[Feature],
        today: DateTime<Utc>,
        px_per_day: f64,
        min_card_spacing: f64,
    ) -> Self {
        match AdaptiveScale::build(features, today, px_per_day, min_card_spacing) {
            Some(scale) => TimeScale::Adaptive(scale),
            None => TimeScale::Linear(LinearScale::new(today, px_per_day)),
        }
    }

    /// Map a date to its logical x coordinate (today = 0).
    pub fn date_to_x(&self, date: DateTime<Utc>) -> f64 {
        self.date_to_x_for(date, None)
    }

    /// Map a date to x, spreading same-month features when a feature id is
    /// supplied (adaptive strategy only; linear ignores the id).
    pub fn date_to_x_for(&self, date: DateTime<Utc>, feature_id: Option<&str>) -> f64 {
        match self {
            TimeScale::Linear(scale) => scale.date_to_x(date),
            TimeScale::Adaptive(scale) => scale.date_to_x(date, feature_id),
        }
    }

    /// Invert the mapping: which date sits at logical coordinate `x`.
    pub fn x_to_date(&self, x: f64) -> DateTime<Utc> {
        match self {
            TimeScale::Linear(scale) => scale.x_to_date(x),
            TimeScale::Adaptive(scale) => scale.x_to_date(x),
        }
    }

    /// Total laid-out width. Zero for the linear strategy, whose extent is
    /// unbounded; callers derive margins from the event range instead.
    pub fn total_width(&self) -> f64 {
        match self {
            TimeScale::Linear(_) => 0.0,
            TimeScale::Adaptive(scale) => scale.total_width(),
        }
    }
}
