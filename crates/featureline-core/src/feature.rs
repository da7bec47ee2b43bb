//! Feature records and their layout stages.
//!
//! A [`Feature`] is the immutable input record. The engine enriches it in
//! two passes: [`ScaledFeature`] adds the logical x coordinate, and
//! [`PositionedFeature`] adds the hemisphere/slot placement produced by
//! collision avoidance. Earlier stages are never mutated.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::EngineError;

/// Release status of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureStatus {
    Released,
    Beta,
    Planned,
}

/// A dated feature as supplied by the caller.
///
/// Wire shape is camelCase JSON with an ISO-8601 `releaseDate`. Media and
/// tag fields are opaque payload for the renderer; the engine never
/// interprets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Unique identifier; also the stable key for in-month distribution.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Parsed release instant. Accepts RFC 3339 or a plain `YYYY-MM-DD`
    /// (taken as midnight UTC) on deserialization.
    #[serde(deserialize_with = "deserialize_release_date")]
    pub release_date: DateTime<Utc>,
    pub status: FeatureStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
}

impl Feature {
    /// Whether this feature's release date is at or before `today`.
    pub fn is_past(&self, today: DateTime<Utc>) -> bool {
        self.release_date <= today
    }

    /// Human-readable framing of the release date for card display.
    ///
    /// Released features read as shipped, betas as betas; planned features
    /// more than six months out collapse to a quarter, nearer ones to a
    /// month.
    pub fn release_label(&self, today: DateTime<Utc>) -> String {
        let formatted = self.release_date.format("%b %Y");
        match self.status {
            FeatureStatus::Released => format!("Shipped {formatted}"),
            FeatureStatus::Beta => format!("Beta {formatted}"),
            FeatureStatus::Planned => {
                let months_away = (self.release_date.year() - today.year()) * 12
                    + self.release_date.month() as i32
                    - today.month() as i32;
                if months_away > 6 {
                    let quarter = self.release_date.month0() / 3 + 1;
                    format!("Planned Q{} {}", quarter, self.release_date.year())
                } else {
                    format!("Coming {formatted}")
                }
            }
        }
    }
}

/// Which hemisphere a card occupies relative to the timeline axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Above,
    Below,
}

impl Side {
    /// Sign of the vertical direction: above is negative (screen y grows
    /// downward).
    pub fn direction(self) -> f64 {
        match self {
            Side::Above => -1.0,
            Side::Below => 1.0,
        }
    }
}

/// A feature with its logical x coordinate assigned (today = 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledFeature {
    #[serde(flatten)]
    pub feature: Feature,
    /// Logical coordinate along the axis; distinct from screen position.
    pub x: f64,
    pub is_past: bool,
}

/// The final layout record consumed by rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedFeature {
    #[serde(flatten)]
    pub feature: Feature,
    pub x: f64,
    pub is_past: bool,
    pub side: Side,
    /// Stacking rank within the hemisphere, increasing away from the axis.
    pub slot: u32,
    /// `direction * (base_y_offset + slot * slot_height)`.
    pub y_offset: f64,
}

/// Parse an ISO-8601 release date string.
///
/// Accepts a full RFC 3339 instant or a plain calendar date, which is taken
/// as midnight UTC. This is the boundary where malformed input is rejected;
/// past this point the engine assumes valid dates.
pub fn parse_release_date(value: &str) -> Result<DateTime<Utc>, EngineError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))),
        Err(err) => Err(EngineError::InvalidDate {
            value: value.to_string(),
            message: err.to_string(),
        }),
    }
}

fn deserialize_release_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_release_date(&raw).map_err(serde::de::Error::custom)
}
