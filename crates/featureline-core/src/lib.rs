//! # Featureline Core Library
//!
//! This library provides the layout and navigation engine for Featureline,
//! a pannable horizontal timeline of dated product features centered on
//! "today". The engine is pure computation: the rendering layer feeds it a
//! deserialized feature list and a reference date, and consumes positioned
//! cards, axis ticks, and a clamped pan offset in return. It performs no
//! I/O and owns no visual styling.
//!
//! ## Architecture
//!
//! - **Scale**: date <-> coordinate mapping with two interchangeable
//!   strategies (constant pixels-per-day, or density-adaptive month widths),
//!   both anchored so that today maps to x = 0
//! - **Collision**: greedy slot assignment that staggers cards vertically
//!   so no two cards in the same hemisphere overlap horizontally
//! - **Ticks**: axis labels derived from the same mapping as the cards
//! - **Viewport**: a caller-driven state machine owning the pan offset,
//!   its data-derived bounds, spring smoothing, and focus detection
//!
//! ## Key Components
//!
//! - [`build_layout`]: raw features in, positioned layout out
//! - [`TimeScale`]: the date <-> x mapping plus its derived total width
//! - [`ViewportController`]: pan offset, bounds, smoothing, focused card
//! - [`generate_ticks`]: axis tick descriptors for a date range

pub mod collision;
pub mod error;
pub mod feature;
pub mod layout;
pub mod scale;
pub mod ticks;
pub mod viewport;

pub use collision::assign_slots;
pub use error::{EngineError, Result};
pub use feature::{parse_release_date, Feature, FeatureStatus, PositionedFeature, ScaledFeature, Side};
pub use layout::{build_layout, parse_features, Layout, LayoutConfig, DEFAULT_PX_PER_DAY};
pub use scale::{AdaptiveScale, LinearScale, ScaleStrategy, TimeScale};
pub use ticks::{generate_ticks, Tick, TickInterval};
pub use viewport::{
    logical_to_screen_x, Bounds, SpringConfig, ViewportConfig, ViewportController,
};
