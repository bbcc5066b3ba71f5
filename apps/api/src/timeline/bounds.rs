//! Timeline bounds: the shared month window every bar is normalized against.
//!
//! Pure function of `(items, now)`. An empty history collapses both bounds to
//! "now"; the geometry calculator widens the span to at least one month.

use serde::{Deserialize, Serialize};

use crate::models::career::{CareerItem, YearMonth};

/// The shared timeline window plus the year ruler drawn above the bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineBounds {
    /// Earliest effective start across all items, as an absolute month index.
    pub min_total_months: i64,
    /// Latest effective end across all items, as an absolute month index.
    pub max_total_months: i64,
    pub min_year: i32,
    pub max_year: i32,
    /// Every second year from `min_year`, always ending with `max_year`.
    pub year_labels: Vec<i32>,
}

impl TimelineBounds {
    /// Number of months covered by the track, never less than one.
    pub fn span_months(&self) -> i64 {
        (self.max_total_months - self.min_total_months + 1).max(1)
    }
}

pub fn compute_timeline_bounds(items: &[CareerItem], now: YearMonth) -> TimelineBounds {
    let (min_total_months, max_total_months, min_year, max_year) = if items.is_empty() {
        let here = now.absolute_months();
        (here, here, now.year.saturating_sub(1), now.year)
    } else {
        let min_total = items
            .iter()
            .map(CareerItem::start_total_months)
            .min()
            .unwrap_or_default();
        let max_total = items
            .iter()
            .map(|item| item.end_total_months(now))
            .max()
            .unwrap_or_default();
        let min_year = items
            .iter()
            .map(|item| item.start_year)
            .min()
            .unwrap_or(now.year.saturating_sub(1));
        let max_year = items
            .iter()
            .map(|item| item.effective_end_year(now))
            .max()
            .unwrap_or(now.year);
        (min_total, max_total, min_year, max_year)
    };

    TimelineBounds {
        min_total_months,
        max_total_months,
        min_year,
        max_year,
        year_labels: year_labels(min_year, max_year),
    }
}

/// Two-year stride from `min_year` up to `max_year`, closing on `max_year`.
///
/// When `max_year < min_year` (inconsistent end dates) the ruler is just `[max_year]`.
pub fn year_labels(min_year: i32, max_year: i32) -> Vec<i32> {
    let mut years: Vec<i32> = (min_year..=max_year).step_by(2).collect();
    if years.last() != Some(&max_year) {
        years.push(max_year);
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::career::absolute_months;
    use crate::models::career::test_support::career;

    const NOW: YearMonth = YearMonth {
        year: 2024,
        month: 6,
    };

    #[test]
    fn test_empty_items_collapse_to_now() {
        let bounds = compute_timeline_bounds(&[], NOW);
        assert_eq!(bounds.min_total_months, absolute_months(2024, 6));
        assert_eq!(bounds.max_total_months, absolute_months(2024, 6));
        assert_eq!(bounds.span_months(), 1);
        assert_eq!(bounds.year_labels, vec![2023, 2024]);
    }

    #[test]
    fn test_empty_items_at_extreme_year_do_not_overflow() {
        let now = YearMonth::new(i32::MIN, 1);
        let bounds = compute_timeline_bounds(&[], now);
        assert_eq!(bounds.min_year, i32::MIN);
        assert_eq!(bounds.year_labels, vec![i32::MIN]);
        assert_eq!(bounds.span_months(), 1);
    }

    #[test]
    fn test_single_item_bounds_match_its_range() {
        let items = [career("A", (2020, 4), Some((2022, 3)), false)];
        let bounds = compute_timeline_bounds(&items, NOW);
        assert_eq!(bounds.min_total_months, absolute_months(2020, 4));
        assert_eq!(bounds.max_total_months, absolute_months(2022, 3));
        assert_eq!(bounds.year_labels, vec![2020, 2022]);
    }

    #[test]
    fn test_current_item_extends_bounds_to_now() {
        let items = [
            career("A", (2018, 1), Some((2020, 1)), false),
            career("B", (2020, 1), None, true),
        ];
        let bounds = compute_timeline_bounds(&items, NOW);
        assert_eq!(bounds.min_total_months, absolute_months(2018, 1));
        assert_eq!(bounds.max_total_months, absolute_months(2024, 6));
        assert_eq!(bounds.min_year, 2018);
        assert_eq!(bounds.max_year, 2024);
        assert_eq!(bounds.year_labels, vec![2018, 2020, 2022, 2024]);
    }

    #[test]
    fn test_bounds_contain_every_item() {
        let items = [
            career("A", (2015, 11), Some((2017, 2)), false),
            career("B", (2012, 5), Some((2013, 8)), false),
            career("C", (2019, 3), None, true),
            career("D", (2016, 1), Some((2023, 12)), false),
        ];
        let bounds = compute_timeline_bounds(&items, NOW);
        for item in &items {
            assert!(bounds.min_total_months <= item.start_total_months());
            assert!(bounds.max_total_months >= item.end_total_months(NOW));
        }
    }

    #[test]
    fn test_year_labels_append_odd_max_year() {
        assert_eq!(year_labels(2015, 2020), vec![2015, 2017, 2019, 2020]);
        assert_eq!(year_labels(2015, 2019), vec![2015, 2017, 2019]);
        assert_eq!(year_labels(2020, 2020), vec![2020]);
    }

    #[test]
    fn test_year_labels_strictly_ascending_and_end_with_max() {
        for min in 2000..2010 {
            for max in (min - 2)..2020 {
                let labels = year_labels(min, max);
                assert_eq!(labels.last(), Some(&max));
                assert!(labels.windows(2).all(|w| w[0] < w[1]), "{labels:?}");
            }
        }
    }

    #[test]
    fn test_bounds_are_deterministic() {
        let items = [
            career("A", (2018, 1), Some((2020, 1)), false),
            career("B", (2020, 1), None, true),
        ];
        assert_eq!(
            compute_timeline_bounds(&items, NOW),
            compute_timeline_bounds(&items, NOW)
        );
    }
}
