//! Property tests for the engine's layout invariants.
//!
//! These pin down the contract the rendering layer relies on: today anchors
//! at zero, the linear mapping round-trips, cards never overlap within a
//! hemisphere slot, dense months stay wide enough, and the pan offset can
//! never escape its bounds.

use chrono::{DateTime, Duration, TimeZone, Utc};
use featureline_core::{
    assign_slots, build_layout, Feature, FeatureStatus, LayoutConfig, ScaleStrategy, ScaledFeature,
    TimeScale, ViewportConfig, ViewportController,
};
use proptest::prelude::*;

fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap()
}

fn feature(id: String, release_date: DateTime<Utc>) -> Feature {
    Feature {
        id,
        title: String::new(),
        description: String::new(),
        release_date,
        status: FeatureStatus::Planned,
        screenshots: None,
        videos: None,
        tags: None,
        highlight: None,
    }
}

/// Feature sets with release dates within ~3 years of the base date.
fn arb_features() -> impl Strategy<Value = Vec<Feature>> {
    prop::collection::vec(-1000i64..1000, 0..40).prop_map(|day_offsets| {
        day_offsets
            .into_iter()
            .enumerate()
            .map(|(i, days)| feature(format!("f{i}"), base_date() + Duration::days(days)))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_today_anchors_at_zero(features in arb_features(), today_offset in -400i64..400) {
        let today = base_date() + Duration::days(today_offset);
        let config = LayoutConfig::default();
        for strategy in [ScaleStrategy::Linear, ScaleStrategy::Adaptive] {
            let layout = build_layout(&features, today, strategy, &config);
            prop_assert_eq!(layout.scale.date_to_x(today), 0.0);
        }
    }

    #[test]
    fn prop_linear_round_trip(x in -100_000.0f64..100_000.0) {
        let scale = TimeScale::linear(base_date(), 12.0);
        let back = scale.date_to_x(scale.x_to_date(x));
        // Inversion rounds to whole milliseconds.
        prop_assert!((back - x).abs() <= 1e-3);
    }

    #[test]
    fn prop_no_overlap_within_hemisphere_slot(xs in prop::collection::vec(-5_000.0f64..5_000.0, 0..50)) {
        let config = LayoutConfig::default();
        let scaled: Vec<ScaledFeature> = xs
            .iter()
            .enumerate()
            .map(|(i, &x)| ScaledFeature {
                feature: feature(format!("f{i}"), base_date()),
                x,
                is_past: false,
            })
            .collect();
        let positioned = assign_slots(&scaled, &config);
        prop_assert_eq!(positioned.len(), scaled.len());
        for (i, a) in positioned.iter().enumerate() {
            for b in &positioned[i + 1..] {
                if a.side == b.side && a.slot == b.slot {
                    prop_assert!((a.x - b.x).abs() >= config.min_card_spacing);
                }
            }
        }
    }

    #[test]
    fn prop_dense_month_width_covers_its_cards(count in 1usize..30) {
        // Releases clustered within a few weeks: the bands holding them
        // must fit every card at minimum spacing.
        let config = LayoutConfig::default();
        let features: Vec<Feature> = (0..count)
            .map(|i| feature(format!("f{i}"), base_date() + Duration::days((i % 28) as i64)))
            .collect();
        let scale = TimeScale::adaptive(&features, base_date(), config.px_per_day, config.min_card_spacing);
        prop_assert!(scale.total_width() >= count as f64 * config.min_card_spacing);
    }

    #[test]
    fn prop_drag_never_escapes_bounds(deltas in prop::collection::vec(-3_000.0f64..3_000.0, 1..80)) {
        let features: Vec<Feature> = [-300i64, -40, 5, 90, 400]
            .iter()
            .enumerate()
            .map(|(i, &days)| feature(format!("f{i}"), base_date() + Duration::days(days)))
            .collect();
        let layout = build_layout(&features, base_date(), ScaleStrategy::Linear, &LayoutConfig::default());

        let mut viewport = ViewportController::new(ViewportConfig::default());
        viewport.set_layout(&layout.features, 1000.0);
        for delta in deltas {
            viewport.on_drag(delta);
            let bounds = viewport.bounds();
            prop_assert!(bounds.left <= viewport.raw_offset());
            prop_assert!(viewport.raw_offset() <= bounds.right);
        }
    }

    #[test]
    fn prop_adaptive_spread_is_stable(count in 2usize..12) {
        // Same-month cards keep their x across rebuilds from the same set.
        let config = LayoutConfig::default();
        let features: Vec<Feature> = (0..count)
            .map(|i| feature(format!("f{i}"), base_date() + Duration::days(3)))
            .collect();
        let first = TimeScale::adaptive(&features, base_date(), config.px_per_day, config.min_card_spacing);
        let second = TimeScale::adaptive(&features, base_date(), config.px_per_day, config.min_card_spacing);
        for f in &features {
            prop_assert_eq!(
                first.date_to_x_for(f.release_date, Some(&f.id)),
                second.date_to_x_for(f.release_date, Some(&f.id))
            );
        }
    }
}
