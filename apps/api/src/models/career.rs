use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Years accepted from clients, both for stored items and ad-hoc layouts.
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 9999;

/// Converts a calendar year/month into a single comparable month index.
///
/// Computed in `i64` so out-of-range months (0, 13, ...) from hand-edited data
/// still produce a value instead of underflowing.
pub fn absolute_months(year: i32, month: u32) -> i64 {
    i64::from(year) * 12 + (i64::from(month) - 1)
}

/// A calendar month used as the evaluation "now" for timeline layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Reads the wall clock. Only the HTTP layer calls this; the layout engine
    /// always receives "now" as a parameter.
    pub fn now() -> Self {
        let today = Utc::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn absolute_months(&self) -> i64 {
        absolute_months(self.year, self.month)
    }
}

/// One employment period on a career sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerItem {
    pub start_year: i32,
    /// 1-12, defaults to 1 when absent.
    #[serde(default)]
    pub start_month: Option<u32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    /// 1-12, defaults to 1 when absent.
    #[serde(default)]
    pub end_month: Option<u32>,
    pub organization: String,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub medical_field: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// When set, the end bound is "now" and any stored end date is ignored.
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub work_type: Option<String>,
    #[serde(default)]
    pub experience_detail: Option<String>,
    /// Older sheets split the detail into what was done and what was learned.
    #[serde(default)]
    pub what_did: Option<String>,
    #[serde(default)]
    pub what_learned: Option<String>,
}

impl CareerItem {
    pub fn effective_start_month(&self) -> u32 {
        self.start_month.unwrap_or(1)
    }

    pub fn effective_end_year(&self, now: YearMonth) -> i32 {
        if self.is_current {
            now.year
        } else {
            self.end_year.unwrap_or(self.start_year)
        }
    }

    pub fn effective_end_month(&self, now: YearMonth) -> u32 {
        if self.is_current {
            now.month
        } else {
            self.end_month.unwrap_or(1)
        }
    }

    pub fn start_total_months(&self) -> i64 {
        absolute_months(self.start_year, self.effective_start_month())
    }

    pub fn end_total_months(&self, now: YearMonth) -> i64 {
        absolute_months(self.effective_end_year(now), self.effective_end_month(now))
    }

    /// Ordering key for a career history. Histories are kept ascending by it.
    pub fn sort_key(&self) -> i64 {
        i64::from(self.start_year) * 12 + i64::from(self.effective_start_month())
    }

    /// Organization line of the timeline label: the organization followed by
    /// each present descriptive field, joined with a full-width slash.
    pub fn display_label(&self) -> String {
        let mut label = self.organization.clone();
        for part in [&self.service_type, &self.medical_field, &self.department]
            .into_iter()
            .flatten()
        {
            if !part.is_empty() {
                label.push('／');
                label.push_str(part);
            }
        }
        label
    }

    /// Period line of the timeline label, e.g. `2020年4月〜2022年3月`.
    pub fn period_label(&self, now: YearMonth) -> String {
        let start = format!("{}年{}月", self.start_year, self.effective_start_month());
        if self.is_current {
            format!("{start}〜在籍中")
        } else {
            format!(
                "{start}〜{}年{}月",
                self.effective_end_year(now),
                self.effective_end_month(now)
            )
        }
    }

    /// Rejects start or end years outside `MIN_YEAR..=MAX_YEAR`.
    pub fn check_years(&self) -> Result<(), String> {
        for (field, year) in [("start_year", Some(self.start_year)), ("end_year", self.end_year)] {
            if let Some(year) = year {
                if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                    return Err(format!(
                        "{field} must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
                    ));
                }
            }
        }
        Ok(())
    }

    /// Pulls the end date forward so it never precedes the start date.
    ///
    /// Current items drop their stored end date entirely.
    pub fn clamp_date_order(&mut self) {
        if self.is_current {
            self.end_year = None;
            self.end_month = None;
            return;
        }

        let start_month = self.effective_start_month();
        if let Some(end_year) = self.end_year {
            if end_year < self.start_year {
                self.end_year = Some(self.start_year);
            }
        }
        if self.end_year == Some(self.start_year) {
            if let Some(end_month) = self.end_month {
                if end_month < start_month {
                    self.end_month = Some(start_month);
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::career;
    use super::*;

    #[test]
    fn test_absolute_months_january_is_year_times_twelve() {
        assert_eq!(absolute_months(2020, 1), 2020 * 12);
        assert_eq!(absolute_months(2020, 12), 2020 * 12 + 11);
    }

    #[test]
    fn test_absolute_months_month_zero_does_not_underflow() {
        assert_eq!(absolute_months(2020, 0), 2020 * 12 - 1);
    }

    #[test]
    fn test_effective_end_uses_now_for_current_items() {
        let now = YearMonth::new(2024, 6);
        let mut item = career("Clinic", (2020, 1), Some((2021, 3)), true);
        assert_eq!(item.effective_end_year(now), 2024);
        assert_eq!(item.effective_end_month(now), 6);

        item.is_current = false;
        assert_eq!(item.effective_end_year(now), 2021);
        assert_eq!(item.effective_end_month(now), 3);
    }

    #[test]
    fn test_effective_end_defaults_to_start_year_january() {
        let now = YearMonth::new(2024, 6);
        let mut item = career("Clinic", (2019, 7), None, false);
        item.start_month = None;
        assert_eq!(item.effective_start_month(), 1);
        assert_eq!(item.effective_end_year(now), 2019);
        assert_eq!(item.effective_end_month(now), 1);
    }

    #[test]
    fn test_display_label_joins_present_fields() {
        let mut item = career("Sakura Hospital", (2020, 1), None, true);
        item.service_type = Some("急性期".to_string());
        item.department = Some("内科".to_string());
        item.medical_field = Some(String::new());
        assert_eq!(item.display_label(), "Sakura Hospital／急性期／内科");
    }

    #[test]
    fn test_period_label_formats_current_and_closed_ranges() {
        let now = YearMonth::new(2024, 6);
        let closed = career("A", (2020, 4), Some((2022, 3)), false);
        assert_eq!(closed.period_label(now), "2020年4月〜2022年3月");

        let current = career("B", (2022, 4), None, true);
        assert_eq!(current.period_label(now), "2022年4月〜在籍中");
    }

    #[test]
    fn test_clamp_date_order_moves_end_year_forward() {
        let mut item = career("A", (2020, 4), Some((2018, 2)), false);
        item.clamp_date_order();
        assert_eq!(item.end_year, Some(2020));
        assert_eq!(item.end_month, Some(4));
    }

    #[test]
    fn test_clamp_date_order_same_year_end_month_clamped() {
        let mut item = career("A", (2020, 9), Some((2020, 3)), false);
        item.clamp_date_order();
        assert_eq!(item.end_month, Some(9));
    }

    #[test]
    fn test_clamp_date_order_current_clears_end() {
        let mut item = career("A", (2020, 9), Some((2021, 3)), true);
        item.clamp_date_order();
        assert_eq!(item.end_year, None);
        assert_eq!(item.end_month, None);
    }

    #[test]
    fn test_clamp_date_order_leaves_valid_range_alone() {
        let mut item = career("A", (2020, 9), Some((2021, 3)), false);
        let before = item.clone();
        item.clamp_date_order();
        assert_eq!(item, before);
    }

    #[test]
    fn test_check_years_bounds() {
        assert!(career("A", (1900, 1), Some((9999, 12)), false).check_years().is_ok());
        assert!(career("A", (1899, 1), None, true).check_years().is_err());
        let err = career("A", (2020, 1), Some((200_000_000, 1)), false)
            .check_years()
            .unwrap_err();
        assert!(err.contains("end_year"), "{err}");
    }

    #[test]
    fn test_deserialize_minimal_item() {
        let item: CareerItem =
            serde_json::from_str(r#"{"start_year": 2019, "organization": "Clinic"}"#).unwrap();
        assert_eq!(item.start_year, 2019);
        assert!(!item.is_current);
        assert!(item.end_year.is_none());
    }
}
