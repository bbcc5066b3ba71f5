//! Timeline layout engine: composes bounds, bar geometry and label placement
//! into the full render model for a career history.
//!
//! Rows are stacked vertically in input order, one per item; overlapping
//! periods are told apart by row, never by horizontal offset.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::career::{CareerItem, YearMonth};
use crate::timeline::bounds::{compute_timeline_bounds, TimelineBounds};
use crate::timeline::geometry::{compute_bar_geometry, BarGeometry};
use crate::timeline::labels::{LabelAdjuster, LabelPlacement, LabelStyles, TextMeasurer};
use crate::timeline::viewport::Viewport;

pub const ROW_HEIGHT_PX: f64 = 90.0;
pub const ROW_OFFSET_PX: f64 = 10.0;
pub const TRACK_PADDING_PX: f64 = 40.0;
pub const LABEL_TOP_DESKTOP_PX: f64 = 48.0;
pub const LABEL_TOP_MOBILE_PX: f64 = 36.0;
/// The row's arrow button sits this far inside the bar's right edge.
pub const ARROW_INSET_PX: f64 = 28.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub index: usize,
    /// Row caption shown beside the track on desktop, e.g. "職歴1".
    pub row_caption: String,
    pub top_px: f64,
    pub geometry: BarGeometry,
    /// Bars are capped at the track's right edge on mobile.
    pub max_width_percent: Option<f64>,
    pub arrow_left_px: f64,
    pub org_text: String,
    pub period_text: String,
    pub label: LabelPlacement,
    pub label_top_px: f64,
    pub label_max_width_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub now: YearMonth,
    pub bounds: TimelineBounds,
    pub is_mobile: bool,
    pub is_empty: bool,
    pub show_row_captions: bool,
    pub track_height_px: f64,
    pub container_width_px: f64,
    pub bars: Vec<BarLayout>,
}

/// Layout settings that stay fixed for the life of the service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub label_styles: LabelStyles,
    pub right_margin_px: f64,
    pub mobile_breakpoint_px: f64,
}

#[derive(Clone)]
pub struct TimelineEngine {
    measurer: Arc<dyn TextMeasurer>,
    settings: EngineSettings,
}

impl TimelineEngine {
    pub fn new(measurer: Arc<dyn TextMeasurer>, settings: EngineSettings) -> Self {
        Self { measurer, settings }
    }

    /// Lays out `items` for the given evaluation month and viewport.
    pub fn layout(&self, items: &[CareerItem], now: YearMonth, viewport: &Viewport) -> TimelineLayout {
        let bounds = compute_timeline_bounds(items, now);
        let is_mobile = viewport.is_mobile(self.settings.mobile_breakpoint_px);
        let container_width = viewport.container_width_px;
        let adjuster = LabelAdjuster::new(
            self.measurer.as_ref(),
            self.settings.label_styles,
            self.settings.right_margin_px,
        );

        let bars: Vec<BarLayout> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let geometry = compute_bar_geometry(item, &bounds, now);
                let org_text = item.display_label();
                let period_text = item.period_label(now);
                let label = adjuster.adjust(&geometry, &org_text, &period_text, container_width);

                BarLayout {
                    index,
                    row_caption: format!("職歴{}", index + 1),
                    top_px: index as f64 * ROW_HEIGHT_PX + ROW_OFFSET_PX,
                    max_width_percent: is_mobile.then(|| 100.0 - geometry.left_percent),
                    arrow_left_px: geometry.right_percent() / 100.0 * container_width
                        - ARROW_INSET_PX,
                    label_top_px: if is_mobile {
                        LABEL_TOP_MOBILE_PX
                    } else {
                        LABEL_TOP_DESKTOP_PX
                    },
                    label_max_width_px: (container_width
                        * (1.0 - label.adjusted_left_percent / 100.0)
                        - self.settings.right_margin_px)
                        .max(0.0),
                    geometry,
                    org_text,
                    period_text,
                    label,
                }
            })
            .collect();

        let shifted = bars.iter().filter(|b| b.label.shifted).count();
        debug!(
            items = items.len(),
            shifted,
            min_total_months = bounds.min_total_months,
            max_total_months = bounds.max_total_months,
            is_mobile,
            "Timeline laid out"
        );

        TimelineLayout {
            now,
            is_mobile,
            is_empty: items.is_empty(),
            show_row_captions: !is_mobile,
            track_height_px: items.len() as f64 * ROW_HEIGHT_PX + TRACK_PADDING_PX,
            container_width_px: container_width,
            bounds,
            bars,
        }
    }
}
