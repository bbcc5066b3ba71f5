//! Bar geometry: maps one career item onto the 0–100% track.

use serde::{Deserialize, Serialize};

use crate::models::career::{CareerItem, YearMonth};
use crate::timeline::bounds::TimelineBounds;

/// Floor applied to every bar width so inverted or tiny ranges stay visible.
pub const MIN_WIDTH_PERCENT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub left_percent: f64,
    pub width_percent: f64,
}

impl BarGeometry {
    pub fn right_percent(&self) -> f64 {
        self.left_percent + self.width_percent
    }
}

/// Positions `item` relative to `bounds`.
///
/// Both ends are inclusive months, so a same-month item spans one month. An end
/// before the start is not an error: the width falls to `MIN_WIDTH_PERCENT`.
pub fn compute_bar_geometry(
    item: &CareerItem,
    bounds: &TimelineBounds,
    now: YearMonth,
) -> BarGeometry {
    let start_total = item.start_total_months();
    let end_total = item.end_total_months(now);
    let span = bounds.span_months() as f64;

    let left = ((start_total - bounds.min_total_months) as f64 / span) * 100.0;
    let width = ((end_total - start_total + 1) as f64 / span) * 100.0;

    BarGeometry {
        left_percent: left.max(0.0),
        width_percent: width.max(MIN_WIDTH_PERCENT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::career::test_support::career;
    use crate::timeline::bounds::compute_timeline_bounds;

    const NOW: YearMonth = YearMonth {
        year: 2024,
        month: 6,
    };
    const EPS: f64 = 1e-9;

    #[test]
    fn test_single_item_fills_track() {
        let items = [career("A", (2020, 4), Some((2022, 3)), false)];
        let bounds = compute_timeline_bounds(&items, NOW);
        let geo = compute_bar_geometry(&items[0], &bounds, NOW);
        assert_eq!(geo.left_percent, 0.0);
        assert!((geo.width_percent - 100.0).abs() < EPS, "{geo:?}");
    }

    #[test]
    fn test_current_item_reaches_right_edge() {
        let items = [
            career("A", (2018, 1), Some((2020, 1)), false),
            career("B", (2020, 1), None, true),
        ];
        let bounds = compute_timeline_bounds(&items, NOW);
        let a = compute_bar_geometry(&items[0], &bounds, NOW);
        let b = compute_bar_geometry(&items[1], &bounds, NOW);

        assert_eq!(a.left_percent, 0.0);
        // 2018-01..=2024-06 is 78 months; A covers 25 of them.
        assert!((a.width_percent - 25.0 / 78.0 * 100.0).abs() < EPS);
        assert!((b.right_percent() - 100.0).abs() < EPS, "{b:?}");
    }

    #[test]
    fn test_inverted_range_clamps_width_to_floor() {
        let items = [
            career("A", (2015, 1), Some((2024, 1)), false),
            career("Broken", (2020, 6), Some((2019, 1)), false),
        ];
        let bounds = compute_timeline_bounds(&items, NOW);
        let geo = compute_bar_geometry(&items[1], &bounds, NOW);
        assert_eq!(geo.width_percent, MIN_WIDTH_PERCENT);
        assert!(geo.left_percent > 0.0);
    }

    #[test]
    fn test_same_month_item_is_one_month_wide() {
        let items = [
            career("Long", (2014, 1), Some((2023, 12)), false),
            career("Blip", (2018, 5), Some((2018, 5)), false),
        ];
        let bounds = compute_timeline_bounds(&items, NOW);
        let geo = compute_bar_geometry(&items[1], &bounds, NOW);
        assert_eq!(geo.width_percent, MIN_WIDTH_PERCENT.max(100.0 / 120.0));
    }

    #[test]
    fn test_empty_bounds_do_not_divide_by_zero() {
        let bounds = compute_timeline_bounds(&[], NOW);
        let item = career("Orphan", (2024, 6), Some((2024, 6)), false);
        let geo = compute_bar_geometry(&item, &bounds, NOW);
        assert!(geo.left_percent.is_finite());
        assert!((geo.width_percent - 100.0).abs() < EPS);
    }

    #[test]
    fn test_well_ordered_bars_stay_inside_track() {
        let items = [
            career("A", (2009, 4), Some((2012, 3)), false),
            career("B", (2012, 4), Some((2016, 9)), false),
            career("C", (2016, 10), Some((2016, 10)), false),
            career("D", (2017, 1), None, true),
            career("E", (2010, 7), Some((2021, 2)), false),
        ];
        let bounds = compute_timeline_bounds(&items, NOW);
        for item in &items {
            let geo = compute_bar_geometry(item, &bounds, NOW);
            assert!(geo.left_percent >= 0.0 && geo.left_percent < 100.0);
            assert!(geo.width_percent >= MIN_WIDTH_PERCENT);
            assert!(geo.right_percent() <= 100.0 + EPS, "{geo:?}");
        }
    }

    #[test]
    fn test_geometry_is_bit_identical_across_calls() {
        let items = [
            career("A", (2011, 3), Some((2013, 7)), false),
            career("B", (2013, 8), None, true),
        ];
        let bounds = compute_timeline_bounds(&items, NOW);
        let first = compute_bar_geometry(&items[1], &bounds, NOW);
        let second = compute_bar_geometry(&items[1], &bounds, NOW);
        assert_eq!(first.left_percent.to_bits(), second.left_percent.to_bits());
        assert_eq!(first.width_percent.to_bits(), second.width_percent.to_bits());
    }
}
