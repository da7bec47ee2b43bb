//! Collision avoidance for timeline cards.
//!
//! Cards already carry an x coordinate; this pass assigns each a hemisphere
//! (above/below the axis) and an integer slot so that no two cards in the
//! same hemisphere and slot sit closer than the minimum horizontal spacing.
//!
//! The pass is greedy and deterministic: one left-to-right sweep over the
//! cards sorted by x (ties keep input order), always taking the lowest free
//! slot and the less crowded hemisphere.

use crate::feature::{PositionedFeature, ScaledFeature, Side};
use crate::layout::LayoutConfig;

/// A placed card, as seen by later placement decisions.
struct SlotOccupant {
    x: f64,
    slot: u32,
}

/// Assign hemisphere, slot, and vertical offset to every scaled feature.
///
/// Hemisphere choice: the side offering the strictly lower slot wins (cards
/// stay close to the axis); on a tie, the side currently holding fewer
/// cards; still tied, above.
pub fn assign_slots(scaled: &[ScaledFeature], config: &LayoutConfig) -> Vec<PositionedFeature> {
    let mut order: Vec<usize> = (0..scaled.len()).collect();
    order.sort_by(|&a, &b| scaled[a].x.total_cmp(&scaled[b].x));

    let mut above: Vec<SlotOccupant> = Vec::new();
    let mut below: Vec<SlotOccupant> = Vec::new();
    let mut positioned = Vec::with_capacity(scaled.len());

    for &i in &order {
        let card = &scaled[i];
        let slot_above = lowest_free_slot(&above, card.x, config.min_card_spacing);
        let slot_below = lowest_free_slot(&below, card.x, config.min_card_spacing);

        let side = if slot_above < slot_below {
            Side::Above
        } else if slot_below < slot_above {
            Side::Below
        } else if above.len() <= below.len() {
            Side::Above
        } else {
            Side::Below
        };
        let (slot, occupants) = match side {
            Side::Above => (slot_above, &mut above),
            Side::Below => (slot_below, &mut below),
        };
        occupants.push(SlotOccupant { x: card.x, slot });

        positioned.push(PositionedFeature {
            feature: card.feature.clone(),
            x: card.x,
            is_past: card.is_past,
            side,
            slot,
            y_offset: side.direction() * (config.base_y_offset + slot as f64 * config.slot_height),
        });
    }

    positioned
}

/// Lowest slot in one hemisphere with no occupant within `min_spacing` of
/// `x`.
fn lowest_free_slot(occupants: &[SlotOccupant], x: f64, min_spacing: f64) -> u32 {
    let mut slot = 0;
    while occupants
        .iter()
        .any(|occ| occ.slot == slot && (occ.x - x).abs() < min_spacing)
    {
        slot += 1;
    }
    slot
}
