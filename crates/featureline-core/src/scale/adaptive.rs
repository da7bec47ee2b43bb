//! Density-adaptive month-band mapping.
//!
//! The event range (padded by one month on each side) is partitioned into
//! calendar months. Each month is allotted the wider of its proportional
//! day width and the spacing its own events need, so a dense month can
//! never be too narrow for its cards. Band positions are a prefix sum
//! anchored so today's intra-month position lands at x = 0 exactly.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use super::linear::days_between;
use super::MS_PER_DAY;
use crate::feature::Feature;

/// Horizontal inset from a band's edges when spreading multiple cards
/// evenly across one month.
const MONTH_EDGE_PADDING: f64 = 20.0;

/// A calendar month, the unit the adaptive axis is partitioned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MonthKey {
    year: i32,
    /// 1-based calendar month.
    month: u32,
}

impl MonthKey {
    fn of(date: DateTime<Utc>) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("month key holds a valid calendar month")
    }

    /// Midnight UTC on the first of the month.
    fn start(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.first_day().and_time(NaiveTime::MIN))
    }

    fn days(self) -> f64 {
        (self.next().first_day() - self.first_day()).num_days() as f64
    }
}

/// One month's horizontal band on the axis.
#[derive(Debug, Clone)]
struct MonthBand {
    key: MonthKey,
    start_x: f64,
    width: f64,
}

/// Stable per-month card ordering, keyed by hashed feature id.
#[derive(Debug, Clone, Default)]
struct MonthOccupants {
    count: usize,
    index_by_id: HashMap<u64, usize>,
}

/// Variable-month-width date <-> x mapping built once from the full
/// feature set.
#[derive(Debug, Clone)]
pub struct AdaptiveScale {
    today: DateTime<Utc>,
    px_per_day: f64,
    bands: Vec<MonthBand>,
    /// Owned by this scale value and rebuilt with it; never a process-wide
    /// cache, so repeated builds from the same set stay idempotent.
    occupants: HashMap<MonthKey, MonthOccupants>,
}

impl AdaptiveScale {
    /// Build the band layout, or `None` when it cannot anchor today
    /// (empty feature set, or today's month outside the padded range).
    pub(crate) fn build(
        features: &[Feature],
        today: DateTime<Utc>,
        px_per_day: f64,
        min_card_spacing: f64,
    ) -> Option<Self> {
        let first_release = features.iter().map(|f| f.release_date).min()?;
        let last_release = features.iter().map(|f| f.release_date).max()?;

        // Stable index per (month, feature id), assigned at first encounter.
        let mut occupants: HashMap<MonthKey, MonthOccupants> = HashMap::new();
        for f in features {
            let entry = occupants.entry(MonthKey::of(f.release_date)).or_default();
            let next_index = entry.index_by_id.len();
            entry.index_by_id.entry(hash_id(&f.id)).or_insert(next_index);
            entry.count = entry.index_by_id.len();
        }

        // One month of padding on each side of the event range.
        let first = MonthKey::of(first_release).prev();
        let last = MonthKey::of(last_release).next();
        let mut bands = Vec::new();
        let mut key = first;
        loop {
            let base_width = key.days() * px_per_day;
            let card_width =
                occupants.get(&key).map_or(0, |m| m.count) as f64 * min_card_spacing;
            bands.push(MonthBand {
                key,
                start_x: 0.0,
                width: base_width.max(card_width),
            });
            if key == last {
                break;
            }
            key = key.next();
        }

        // Anchor today's month so date_to_x(today) == 0, then prefix-sum
        // outward in both directions.
        let today_key = MonthKey::of(today);
        let today_index = bands.iter().position(|b| b.key == today_key)?;
        bands[today_index].start_x = -month_fraction(today, today_key) * bands[today_index].width;
        for i in (0..today_index).rev() {
            bands[i].start_x = bands[i + 1].start_x - bands[i].width;
        }
        for i in today_index + 1..bands.len() {
            bands[i].start_x = bands[i - 1].start_x + bands[i - 1].width;
        }

        Some(Self {
            today,
            px_per_day,
            bands,
            occupants,
        })
    }

    pub fn date_to_x(&self, date: DateTime<Utc>, feature_id: Option<&str>) -> f64 {
        let key = MonthKey::of(date);
        let Some(band) = self.band(key) else {
            // Outside every band; fall back to the linear formula.
            return days_between(self.today, date) * self.px_per_day;
        };

        // Months holding several cards spread them evenly across the
        // band's interior instead of stacking them on shared dates.
        if let (Some(id), Some(month)) = (feature_id, self.occupants.get(&key)) {
            if month.count > 1 {
                if let Some(&index) = month.index_by_id.get(&hash_id(id)) {
                    let inner = (band.width - 2.0 * MONTH_EDGE_PADDING).max(0.0);
                    let step = inner / (month.count - 1) as f64;
                    return band.start_x + MONTH_EDGE_PADDING + step * index as f64;
                }
            }
        }

        band.start_x + month_fraction(date, key) * band.width
    }

    pub fn x_to_date(&self, x: f64) -> DateTime<Utc> {
        for band in &self.bands {
            if x >= band.start_x && x < band.start_x + band.width {
                let fraction = (x - band.start_x) / band.width;
                let ms = fraction * band.key.days() * MS_PER_DAY;
                return band.key.start() + Duration::milliseconds(ms.round() as i64);
            }
        }
        // Outside every band; invert the linear fallback.
        self.today + Duration::milliseconds((x / self.px_per_day * MS_PER_DAY).round() as i64)
    }

    /// Distance from the first band's start to the last band's end.
    pub fn total_width(&self) -> f64 {
        match (self.bands.first(), self.bands.last()) {
            (Some(first), Some(last)) => last.start_x + last.width - first.start_x,
            _ => 0.0,
        }
    }

    fn band(&self, key: MonthKey) -> Option<&MonthBand> {
        self.bands.iter().find(|b| b.key == key)
    }
}

/// Fraction of the month elapsed at `date`, including time of day. At
/// midnight this is `(day_of_month - 1) / days_in_month`.
fn month_fraction(date: DateTime<Utc>, key: MonthKey) -> f64 {
    let elapsed = (date - key.start()).num_milliseconds() as f64;
    elapsed / (key.days() * MS_PER_DAY)
}

fn hash_id(id: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    hasher.finish()
}
