//! Pan-offset state for the timeline viewport.
//!
//! [`ViewportController`] is a small caller-driven state machine. The raw
//! offset is authoritative: drag input and programmatic navigation mutate
//! it synchronously, clamped to data-derived bounds, and bounds/focus are
//! always computed from it. The smoothed offset is a spring that trails the
//! raw value for presentation only; the caller advances it with
//! [`ViewportController::step`] at whatever frame rate it likes.

use serde::{Deserialize, Serialize};

use crate::feature::PositionedFeature;

/// Spring constants for the smoothed offset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 200.0,
            damping: 30.0,
        }
    }
}

/// Viewport tuning knobs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Extra pannable space beyond the first/last card, in pixels.
    pub margin: f64,
    /// How far from today (in pixels of raw offset) counts as "away",
    /// gating the return-to-today affordance.
    pub away_threshold: f64,
    pub spring: SpringConfig,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            margin: 300.0,
            away_threshold: 50.0,
            spring: SpringConfig::default(),
        }
    }
}

/// Inclusive pan-offset bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
}

impl Bounds {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.left, self.right)
    }
}

/// The card data focus detection needs; positions are copied out of the
/// layout so the controller holds no borrow on it.
#[derive(Debug, Clone)]
struct CardRef {
    id: String,
    x: f64,
}

/// Owns the pan offset, its bounds, spring smoothing, and the focused card.
#[derive(Debug, Clone)]
pub struct ViewportController {
    config: ViewportConfig,
    cards: Vec<CardRef>,
    container_width: f64,
    bounds: Bounds,
    raw_offset: f64,
    smoothed_offset: f64,
    velocity: f64,
    focused: Option<String>,
}

impl ViewportController {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            cards: Vec::new(),
            container_width: 0.0,
            bounds: Bounds { left: 0.0, right: 0.0 },
            raw_offset: 0.0,
            smoothed_offset: 0.0,
            velocity: 0.0,
            focused: None,
        }
    }

    /// Install a new positioned layout and container width: recomputes
    /// bounds, re-clamps the offset, and recomputes focus.
    pub fn set_layout(&mut self, features: &[PositionedFeature], container_width: f64) {
        self.cards = features
            .iter()
            .map(|f| CardRef {
                id: f.feature.id.clone(),
                x: f.x,
            })
            .collect();
        self.container_width = container_width;
        self.recompute_bounds();
        self.raw_offset = self.bounds.clamp(self.raw_offset);
        self.refocus();
    }

    /// Apply one incremental pointer movement. Clamping happens on every
    /// increment, so the viewport never exceeds its bounds mid-gesture.
    pub fn on_drag(&mut self, delta: f64) {
        self.raw_offset = self.bounds.clamp(self.raw_offset + delta);
        self.refocus();
    }

    /// Jump so the given card lands at the viewport center. The spring
    /// animates the visual catch-up.
    pub fn jump_to(&mut self, feature: &PositionedFeature) {
        self.raw_offset = self.bounds.clamp(-feature.x);
        self.refocus();
    }

    /// Return to today (x = 0) at the viewport center.
    pub fn reset_to_today(&mut self) {
        self.raw_offset = self.bounds.clamp(0.0);
        self.refocus();
    }

    /// Advance the smoothing spring by `dt` seconds and return the new
    /// smoothed offset. Never affects bounds or focus.
    pub fn step(&mut self, dt: f64) -> f64 {
        let spring = self.config.spring;
        let accel = spring.stiffness * (self.raw_offset - self.smoothed_offset)
            - spring.damping * self.velocity;
        self.velocity += accel * dt;
        self.smoothed_offset += self.velocity * dt;
        self.smoothed_offset
    }

    pub fn raw_offset(&self) -> f64 {
        self.raw_offset
    }

    pub fn smoothed_offset(&self) -> f64 {
        self.smoothed_offset
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Id of the card nearest the viewport center, if any.
    pub fn focused_feature_id(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Whether the viewport has wandered far enough from today to offer a
    /// return affordance.
    pub fn is_away_from_today(&self) -> bool {
        self.raw_offset.abs() > self.config.away_threshold
    }

    fn recompute_bounds(&mut self) {
        if self.cards.is_empty() {
            self.bounds = Bounds { left: 0.0, right: 0.0 };
            return;
        }
        let min_x = self.cards.iter().map(|c| c.x).fold(f64::INFINITY, f64::min);
        let max_x = self.cards.iter().map(|c| c.x).fold(f64::NEG_INFINITY, f64::max);
        let half = self.container_width / 2.0;
        let mut left = -(max_x - half + self.config.margin);
        let mut right = -(min_x + half - self.config.margin);
        if left > right {
            // Data span narrower than the viewport: collapse to the
            // midpoint so the clamp range stays well-formed.
            let mid = (left + right) / 2.0;
            left = mid;
            right = mid;
        }
        self.bounds = Bounds { left, right };
    }

    fn refocus(&mut self) {
        let center = self.container_width / 2.0;
        let mut best: Option<(&str, f64)> = None;
        for card in &self.cards {
            let screen_x = logical_to_screen_x(card.x, self.raw_offset, self.container_width);
            let distance = (screen_x - center).abs();
            // Strict less-than keeps the first-encountered card on ties.
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((&card.id, distance));
            }
        }
        self.focused = best.map(|(id, _)| id.to_string());
    }
}

/// Convert a logical coordinate to an on-screen x position.
pub fn logical_to_screen_x(logical_x: f64, viewport_offset_x: f64, container_width: f64) -> f64 {
    container_width / 2.0 + logical_x + viewport_offset_x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{Feature, FeatureStatus, Side};

    fn positioned(id: &str, x: f64) -> PositionedFeature {
        PositionedFeature {
            feature: Feature {
                id: id.to_string(),
                title: id.to_string(),
                description: String::new(),
                release_date: crate::feature::parse_release_date("2025-03-10").unwrap(),
                status: FeatureStatus::Planned,
                screenshots: None,
                videos: None,
                tags: None,
                highlight: None,
            },
            x,
            is_past: false,
            side: Side::Above,
            slot: 0,
            y_offset: -100.0,
        }
    }

    fn controller_with(cards: &[PositionedFeature], width: f64) -> ViewportController {
        let mut vc = ViewportController::new(ViewportConfig::default());
        vc.set_layout(cards, width);
        vc
    }

    #[test]
    fn test_bounds_formula_for_wide_span() {
        let cards = [positioned("a", -2000.0), positioned("b", 3000.0)];
        let vc = controller_with(&cards, 1000.0);
        // left = -(3000 - 500 + 300), right = -(-2000 + 500 - 300)
        assert_eq!(vc.bounds(), Bounds { left: -2800.0, right: 1800.0 });
    }

    #[test]
    fn test_narrow_span_collapses_bounds() {
        let cards = [positioned("a", 0.0)];
        let vc = controller_with(&cards, 1000.0);
        assert_eq!(vc.bounds(), Bounds { left: 0.0, right: 0.0 });
        assert_eq!(vc.raw_offset(), 0.0);
    }

    #[test]
    fn test_no_cards_no_focus() {
        let vc = controller_with(&[], 1000.0);
        assert_eq!(vc.focused_feature_id(), None);
        assert_eq!(vc.bounds(), Bounds { left: 0.0, right: 0.0 });
    }

    #[test]
    fn test_focus_card_at_center() {
        let cards = [positioned("a", 0.0)];
        let vc = controller_with(&cards, 1000.0);
        assert_eq!(vc.focused_feature_id(), Some("a"));
    }

    #[test]
    fn test_drag_clamps_every_increment() {
        let cards = [positioned("a", -2000.0), positioned("b", 3000.0)];
        let mut vc = controller_with(&cards, 1000.0);
        for _ in 0..100 {
            vc.on_drag(100.0);
            assert!(vc.raw_offset() <= vc.bounds().right);
        }
        assert_eq!(vc.raw_offset(), vc.bounds().right);
    }

    #[test]
    fn test_drag_moves_focus() {
        let cards = [positioned("a", 0.0), positioned("b", 600.0)];
        let mut vc = controller_with(&cards, 1000.0);
        assert_eq!(vc.focused_feature_id(), Some("a"));
        vc.on_drag(-600.0);
        assert_eq!(vc.focused_feature_id(), Some("b"));
    }

    #[test]
    fn test_jump_to_centers_card() {
        let cards = [positioned("a", -2000.0), positioned("b", 3000.0)];
        let mut vc = controller_with(&cards, 1000.0);
        let target = cards[0].clone();
        vc.jump_to(&target);
        // -(-2000) exceeds the right bound, so the jump clamps there.
        assert_eq!(vc.raw_offset(), vc.bounds().right);
        assert_eq!(vc.focused_feature_id(), Some("a"));
    }

    #[test]
    fn test_reset_to_today() {
        let cards = [positioned("a", -2000.0), positioned("b", 3000.0)];
        let mut vc = controller_with(&cards, 1000.0);
        vc.on_drag(1500.0);
        assert!(vc.is_away_from_today());
        vc.reset_to_today();
        assert_eq!(vc.raw_offset(), 0.0);
        assert!(!vc.is_away_from_today());
    }

    #[test]
    fn test_focus_tie_keeps_first_encountered() {
        let cards = [positioned("a", -100.0), positioned("b", 100.0)];
        let vc = controller_with(&cards, 1000.0);
        assert_eq!(vc.focused_feature_id(), Some("a"));
    }

    #[test]
    fn test_spring_converges_to_raw_offset() {
        let cards = [positioned("a", -2000.0), positioned("b", 3000.0)];
        let mut vc = controller_with(&cards, 1000.0);
        vc.on_drag(800.0);
        let mut last = 0.0;
        for _ in 0..600 {
            last = vc.step(1.0 / 60.0);
        }
        assert!((last - vc.raw_offset()).abs() < 1.0);
    }

    #[test]
    fn test_step_does_not_touch_raw_state() {
        let cards = [positioned("a", 0.0), positioned("b", 600.0)];
        let mut vc = controller_with(&cards, 1000.0);
        vc.on_drag(-100.0);
        let raw = vc.raw_offset();
        let focused = vc.focused_feature_id().map(str::to_string);
        vc.step(0.016);
        assert_eq!(vc.raw_offset(), raw);
        assert_eq!(vc.focused_feature_id(), focused.as_deref());
    }

    #[test]
    fn test_logical_to_screen_x() {
        assert_eq!(logical_to_screen_x(0.0, 0.0, 1000.0), 500.0);
        assert_eq!(logical_to_screen_x(120.0, -20.0, 1000.0), 600.0);
    }
}
