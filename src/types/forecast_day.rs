//! Defines the forecast days a regional dataset may be published for, and how each
//! day maps onto dataset file names and date labels.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three days a regional dataset can be published for.
///
/// `Day1` is today's observation, `Day2` and `Day3` are the next two days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastDay {
    /// Today.
    Day1,
    /// Tomorrow.
    Day2,
    /// The day after tomorrow.
    Day3,
}

impl ForecastDay {
    /// All forecast days, in publication order.
    pub const ALL: [ForecastDay; 3] = [ForecastDay::Day1, ForecastDay::Day2, ForecastDay::Day3];

    pub(crate) fn path_segment(&self) -> &'static str {
        match self {
            ForecastDay::Day1 => "day1",
            ForecastDay::Day2 => "day2",
            ForecastDay::Day3 => "day3",
        }
    }

    /// Number of days after today this forecast day refers to.
    pub fn offset_days(&self) -> u64 {
        match self {
            ForecastDay::Day1 => 0,
            ForecastDay::Day2 => 1,
            ForecastDay::Day3 => 2,
        }
    }

    /// The calendar date of this forecast day relative to `today`.
    pub fn date_from(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(self.offset_days()))
            .unwrap_or(today)
    }

    /// Human-readable label for this forecast day, e.g. `Oct 17, 2026`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use laps::ForecastDay;
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    /// assert_eq!(ForecastDay::Day1.date_label(today), "Oct 16, 2026");
    /// assert_eq!(ForecastDay::Day3.date_label(today), "Oct 18, 2026");
    /// ```
    pub fn date_label(&self, today: NaiveDate) -> String {
        self.date_from(today).format("%b %-d, %Y").to_string()
    }

    pub(crate) fn file_name(&self, region: &str) -> String {
        format!("{}-{}.csv", region, self.path_segment())
    }
}

/// Formats a `ForecastDay` using its file path segment.
///
/// # Examples
///
/// ```
/// use laps::ForecastDay;
///
/// assert_eq!(ForecastDay::Day2.to_string(), "day2");
/// ```
impl fmt::Display for ForecastDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}
