//! Label overflow adjustment.
//!
//! Each bar carries a two-line label (organization, period) anchored at the
//! bar's left edge. When the wider of the two lines would run past the right
//! edge of the track (minus a fixed margin), the label slides left by exactly
//! the overflow, never past 0%.
//!
//! Text width depends on font metrics, so measurement is injected through
//! `TextMeasurer`. A measurer that cannot answer leaves the label where it is.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::timeline::geometry::BarGeometry;

pub const DEFAULT_RIGHT_MARGIN_PX: f64 = 20.0;

// ────────────────────────────────────────────────────────────────────────────
// Font styles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelFont {
    SansSerif,
    Monospace,
}

impl std::str::FromStr for LabelFont {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sans-serif" | "sans" => Ok(LabelFont::SansSerif),
            "monospace" | "mono" => Ok(LabelFont::Monospace),
            other => Err(format!("unknown label font '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Regular,
    Bold,
}

/// The computed style a label line is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    pub family: LabelFont,
    pub size_px: f64,
    pub weight: FontWeight,
}

/// Styles for the two stacked label lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelStyles {
    pub organization: FontStyle,
    pub period: FontStyle,
}

impl LabelStyles {
    pub fn new(family: LabelFont, organization_px: f64, period_px: f64) -> Self {
        Self {
            organization: FontStyle {
                family,
                size_px: organization_px,
                weight: FontWeight::Bold,
            },
            period: FontStyle {
                family,
                size_px: period_px,
                weight: FontWeight::Regular,
            },
        }
    }
}

impl Default for LabelStyles {
    fn default() -> Self {
        Self::new(LabelFont::SansSerif, 14.0, 12.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Measurement capability
// ────────────────────────────────────────────────────────────────────────────

/// Returns the rendered pixel width of `text` in `style`, or `None` when the
/// environment cannot measure text.
pub trait TextMeasurer: Send + Sync {
    fn measure(&self, text: &str, style: &FontStyle) -> Option<f64>;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, &FontStyle) -> Option<f64> + Send + Sync,
{
    fn measure(&self, text: &str, style: &FontStyle) -> Option<f64> {
        self(text, style)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Placement
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    pub adjusted_left_percent: f64,
    /// Width of the wider label line, when it could be measured.
    pub text_width_px: Option<f64>,
    pub shifted: bool,
}

impl LabelPlacement {
    fn unshifted(left_percent: f64, text_width_px: Option<f64>) -> Self {
        Self {
            adjusted_left_percent: left_percent,
            text_width_px,
            shifted: false,
        }
    }
}

/// Core shift rule, independent of measurement.
///
/// Returns `label_left_percent` unchanged when the text fits in the space
/// between the label's left edge and `container_width_px - right_margin_px`.
pub fn shifted_label_left(
    label_left_percent: f64,
    text_width_px: f64,
    container_width_px: f64,
    right_margin_px: f64,
) -> f64 {
    let label_left_px = (label_left_percent / 100.0) * container_width_px;
    let max_right_px = container_width_px - right_margin_px;
    let available_px = max_right_px - label_left_px;

    if text_width_px > available_px {
        let overflow_px = text_width_px - available_px;
        let shift_percent = (overflow_px / container_width_px) * 100.0;
        (label_left_percent - shift_percent).max(0.0)
    } else {
        label_left_percent
    }
}

fn usable_width(width: Option<f64>) -> Option<f64> {
    width.filter(|w| w.is_finite() && *w >= 0.0)
}

/// Measures label text and applies `shifted_label_left`.
pub struct LabelAdjuster<'a> {
    measurer: &'a dyn TextMeasurer,
    styles: LabelStyles,
    right_margin_px: f64,
}

impl fmt::Debug for LabelAdjuster<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelAdjuster")
            .field("styles", &self.styles)
            .field("right_margin_px", &self.right_margin_px)
            .finish_non_exhaustive()
    }
}

impl<'a> LabelAdjuster<'a> {
    pub fn new(measurer: &'a dyn TextMeasurer, styles: LabelStyles, right_margin_px: f64) -> Self {
        Self {
            measurer,
            styles,
            right_margin_px,
        }
    }

    /// Width of the wider of the two stacked lines, if both can be measured.
    pub fn text_width(&self, org_text: &str, period_text: &str) -> Option<f64> {
        let org = usable_width(self.measurer.measure(org_text, &self.styles.organization))?;
        let period = usable_width(self.measurer.measure(period_text, &self.styles.period))?;
        Some(org.max(period))
    }

    pub fn adjust(
        &self,
        geometry: &BarGeometry,
        org_text: &str,
        period_text: &str,
        container_width_px: f64,
    ) -> LabelPlacement {
        let label_left = geometry.left_percent;

        if !(container_width_px.is_finite() && container_width_px > 0.0) {
            return LabelPlacement::unshifted(label_left, None);
        }

        let Some(text_width) = self.text_width(org_text, period_text) else {
            debug!(org_text, "text measurement unavailable; label left in place");
            return LabelPlacement::unshifted(label_left, None);
        };

        let adjusted = shifted_label_left(
            label_left,
            text_width,
            container_width_px,
            self.right_margin_px,
        );

        LabelPlacement {
            adjusted_left_percent: adjusted,
            text_width_px: Some(text_width),
            shifted: adjusted < label_left,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
