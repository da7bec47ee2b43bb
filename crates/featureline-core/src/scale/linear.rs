//! Constant pixels-per-day mapping.

use chrono::{DateTime, Duration, Utc};

use super::MS_PER_DAY;

/// Linear date <-> x mapping: `x = days_from_today * px_per_day`.
///
/// Exactly invertible (to millisecond precision) and unbounded; callers
/// supply their own margins around the event range.
#[derive(Debug, Clone)]
pub struct LinearScale {
    today: DateTime<Utc>,
    px_per_day: f64,
}

impl LinearScale {
    pub fn new(today: DateTime<Utc>, px_per_day: f64) -> Self {
        Self { today, px_per_day }
    }

    pub fn date_to_x(&self, date: DateTime<Utc>) -> f64 {
        days_between(self.today, date) * self.px_per_day
    }

    pub fn x_to_date(&self, x: f64) -> DateTime<Utc> {
        let ms = x / self.px_per_day * MS_PER_DAY;
        self.today + Duration::milliseconds(ms.round() as i64)
    }
}

/// Signed fractional days from `from` to `to`.
pub(crate) fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_DAY
}
