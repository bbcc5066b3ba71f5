// Career timeline layout: date ranges → proportional bars on a shared track,
// with label overflow avoidance against measured text widths.
// Every calculator here is a pure function of (items, now, viewport).

pub mod bounds;
pub mod engine;
pub mod font_metrics;
pub mod geometry;
pub mod handlers;
pub mod labels;
pub mod session;
pub mod viewport;

// Re-export the public API consumed by state, handlers and main.
pub use engine::{EngineSettings, TimelineEngine, TimelineLayout};
pub use font_metrics::MetricTableMeasurer;
pub use labels::{LabelFont, LabelStyles};
pub use viewport::Viewport;
