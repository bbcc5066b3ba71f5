//! Static font-metric tables used to measure timeline labels server-side.
//!
//! Widths are in em units (relative to font size) for ASCII 0x20..=0x7E,
//! index = (char as usize) - 32. Labels are mostly Japanese, so full-width
//! characters (CJK ideographs, kana, full-width forms) measure a full em and
//! anything else non-ASCII falls back to the table's average width.
//!
//! This is an approximation of what a browser would report. Callers with
//! access to real font layout should supply their own `TextMeasurer`.

use crate::timeline::labels::{FontStyle, FontWeight, LabelFont, TextMeasurer};

/// Bold glyphs are drawn this much wider than regular ones.
const BOLD_WIDTH_FACTOR: f64 = 1.06;

pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters that are not full-width.
    pub average_char_width: f32,
}

impl FontMetricTable {
    fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else if is_full_width(c) {
            1.0
        } else {
            self.average_char_width
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_em(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }
}

/// East Asian wide/full-width ranges that matter for career labels.
fn is_full_width(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F      // Hangul Jamo
        | 0x2E80..=0x303E    // CJK radicals, punctuation (「」〜)
        | 0x3040..=0x30FF    // Hiragana, Katakana
        | 0x3100..=0x33FF    // Bopomofo .. CJK compatibility
        | 0x3400..=0x4DBF    // CJK Extension A
        | 0x4E00..=0x9FFF    // CJK Unified Ideographs
        | 0xAC00..=0xD7A3    // Hangul syllables
        | 0xF900..=0xFAFF    // CJK compatibility ideographs
        | 0xFF00..=0xFF60    // Full-width forms (／, ＡＢＣ)
        | 0xFFE0..=0xFFE6)
}

/// Measures text with the static tables. Always answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricTableMeasurer;

impl TextMeasurer for MetricTableMeasurer {
    fn measure(&self, text: &str, style: &FontStyle) -> Option<f64> {
        let em = f64::from(get_metrics(style.family).measure_em(text));
        let weight = match style.weight {
            FontWeight::Regular => 1.0,
            FontWeight::Bold => BOLD_WIDTH_FACTOR,
        };
        Some(em * style.size_px * weight)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica/Arial-class sans-serif, the browser default for the career sheet.
static SANS_SERIF_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.55,
};

/// Fixed-pitch fallback.
static MONOSPACE_TABLE: FontMetricTable = FontMetricTable {
    widths: [0.6; 95],
    average_char_width: 0.6,
};

/// Returns the static metric table for a label font.
pub fn get_metrics(font: LabelFont) -> &'static FontMetricTable {
    match font {
        LabelFont::SansSerif => &SANS_SERIF_TABLE,
        LabelFont::Monospace => &MONOSPACE_TABLE,
    }
}
