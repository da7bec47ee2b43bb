//! Axis tick generation.
//!
//! Ticks are derived from the same [`TimeScale`] as the cards, so labels
//! stay aligned with card positions under either mapping strategy.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::scale::TimeScale;

/// Granularity of axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickInterval {
    Month,
    Quarter,
    Year,
}

impl TickInterval {
    fn months(self) -> u32 {
        match self {
            TickInterval::Month => 1,
            TickInterval::Quarter => 3,
            TickInterval::Year => 12,
        }
    }
}

/// One axis label: a coordinate, the boundary date it marks, and its text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tick {
    pub x: f64,
    pub date: DateTime<Utc>,
    pub label: String,
}

/// Generate ticks covering `[min_date, max_date]`.
///
/// The first tick sits on the interval boundary at or before `min_date`
/// (month start, quarter start, or Jan 1); subsequent ticks step forward by
/// the interval until past `max_date`. Empty when `min_date > max_date`.
pub fn generate_ticks(
    min_date: DateTime<Utc>,
    max_date: DateTime<Utc>,
    scale: &TimeScale,
    interval: TickInterval,
) -> Vec<Tick> {
    let mut ticks = Vec::new();
    if min_date > max_date {
        return ticks;
    }

    let mut current = align_to_interval(min_date, interval);
    while current <= max_date {
        ticks.push(Tick {
            x: scale.date_to_x(current),
            date: current,
            label: format_tick_label(current, interval),
        });
        current = current + Months::new(interval.months());
    }
    ticks
}

/// Snap down to the interval boundary at or before `date`.
fn align_to_interval(date: DateTime<Utc>, interval: TickInterval) -> DateTime<Utc> {
    let month = match interval {
        TickInterval::Month => date.month(),
        TickInterval::Quarter => date.month0() / 3 * 3 + 1,
        TickInterval::Year => 1,
    };
    let first = NaiveDate::from_ymd_opt(date.year(), month, 1)
        .expect("aligned month is a valid calendar month");
    Utc.from_utc_datetime(&first.and_time(NaiveTime::MIN))
}

fn format_tick_label(date: DateTime<Utc>, interval: TickInterval) -> String {
    match interval {
        TickInterval::Year => date.year().to_string(),
        TickInterval::Quarter => format!("Q{} {}", date.month0() / 3 + 1, date.year()),
        TickInterval::Month => date.format("%b %y").to_string(),
    }
}
