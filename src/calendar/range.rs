//! Month range resolution.
//!
//! This module turns a reference (year, month) into the concrete dates a
//! calendar needs: the first and last day of the month and the number of
//! blank cells that precede day 1 in a 7-column grid.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// A validated calendar month.
///
/// The first and last day are resolved on construction, so a `YearMonth`
/// always names a month chrono can represent.
///
/// # Example
///
/// ```
/// use bizdash::calendar::YearMonth;
///
/// let month = YearMonth::new(2024, 12).unwrap();
/// assert_eq!(month.next().to_string(), "2025-01");
/// assert!(YearMonth::new(2024, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth", into = "RawYearMonth")]
pub struct YearMonth {
    first_day: NaiveDate,
    last_day: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = DashboardError;

    fn try_from(raw: RawYearMonth) -> Result<Self, Self::Error> {
        YearMonth::new(raw.year, raw.month)
    }
}

impl From<YearMonth> for RawYearMonth {
    fn from(month: YearMonth) -> Self {
        RawYearMonth {
            year: month.year(),
            month: month.month(),
        }
    }
}

impl YearMonth {
    /// Creates a month, rejecting month numbers outside 1-12 and years
    /// chrono cannot represent.
    ///
    /// The last day is the day before the first of the following month.
    pub fn new(year: i32, month: u32) -> DashboardResult<Self> {
        let invalid = || DashboardError::InvalidMonth { year, month };

        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let (next_year, next_month) = if month == 12 {
            (year.checked_add(1).ok_or_else(invalid)?, 1)
        } else {
            (year, month + 1)
        };
        let last_day = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|next_first| next_first.pred_opt())
            .ok_or_else(invalid)?;

        Ok(YearMonth {
            first_day,
            last_day,
        })
    }

    /// Returns the month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        let first_day = date.with_day(1).unwrap_or(date);
        let last_day = first_day
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next_first| next_first.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        YearMonth {
            first_day,
            last_day,
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The month number, 1-12.
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// The following month, wrapping into the next year after December.
    ///
    /// Saturates at the last representable month.
    pub fn next(&self) -> Self {
        match self.last_day.succ_opt() {
            Some(next_first) => YearMonth::of(next_first),
            None => *self,
        }
    }

    /// The preceding month, wrapping into the previous year before January.
    ///
    /// Saturates at the first representable month.
    pub fn previous(&self) -> Self {
        match self.first_day.pred_opt() {
            Some(previous_last) => YearMonth::of(previous_last),
            None => *self,
        }
    }

    /// Resolves the month into grid coordinates for a week starting on
    /// `week_start`.
    ///
    /// # Example
    ///
    /// ```
    /// use bizdash::calendar::YearMonth;
    /// use chrono::Weekday;
    ///
    /// // 2024-03-01 is a Friday.
    /// let range = YearMonth::new(2024, 3).unwrap().resolve(Weekday::Sun);
    /// assert_eq!(range.offset, 5);
    /// assert_eq!(range.days_in_month(), 31);
    ///
    /// let monday_first = YearMonth::new(2024, 3).unwrap().resolve(Weekday::Mon);
    /// assert_eq!(monday_first.offset, 4);
    /// ```
    pub fn resolve(&self, week_start: Weekday) -> MonthRange {
        let first = self.first_day.weekday().num_days_from_sunday();
        let start = week_start.num_days_from_sunday();
        MonthRange {
            month: *self,
            first_day: self.first_day,
            last_day: self.last_day,
            offset: (first + 7 - start) % 7,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// The resolved dates of a displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRange {
    /// The month this range covers.
    pub month: YearMonth,
    /// Day 1 of the month.
    pub first_day: NaiveDate,
    /// The last day of the month.
    pub last_day: NaiveDate,
    /// Blank cells before day 1, always in 0..7.
    pub offset: u32,
}

impl MonthRange {
    /// Number of days in the month.
    pub fn days_in_month(&self) -> u32 {
        self.last_day.day()
    }

    /// Returns the date of `day` in this month, if the day exists.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.days_in_month() {
            return None;
        }
        self.first_day
            .checked_add_signed(Duration::days(i64::from(day) - 1))
    }

    /// Iterates every date of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let first_day = self.first_day;
        let last_day = self.last_day;
        first_day.iter_days().take_while(move |date| *date <= last_day)
    }

    /// Returns true if `date` falls within the month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first_day <= date && date <= self.last_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_last_day_of_each_month_2024() {
        let expected = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (index, days) in expected.iter().enumerate() {
            let range = YearMonth::new(2024, index as u32 + 1)
                .unwrap()
                .resolve(Weekday::Sun);
            assert_eq!(range.days_in_month(), *days, "month {}", index + 1);
        }
    }

    #[test]
    fn test_february_non_leap_year() {
        let range = YearMonth::new(2023, 2).unwrap().resolve(Weekday::Sun);
        assert_eq!(range.last_day, date(2023, 2, 28));
    }

    #[test]
    fn test_december_last_day() {
        let range = YearMonth::new(2024, 12).unwrap().resolve(Weekday::Sun);
        assert_eq!(range.first_day, date(2024, 12, 1));
        assert_eq!(range.last_day, date(2024, 12, 31));
    }

    #[test]
    fn test_invalid_month_numbers() {
        assert!(matches!(
            YearMonth::new(2024, 0),
            Err(DashboardError::InvalidMonth { year: 2024, month: 0 })
        ));
        assert!(YearMonth::new(2024, 13).is_err());
    }

    #[test]
    fn test_unrepresentable_year() {
        assert!(YearMonth::new(i32::MAX, 1).is_err());
    }

    #[test]
    fn test_offset_sunday_start() {
        // 2024-09-01 is a Sunday.
        let range = YearMonth::new(2024, 9).unwrap().resolve(Weekday::Sun);
        assert_eq!(range.offset, 0);

        // 2024-06-01 is a Saturday.
        let range = YearMonth::new(2024, 6).unwrap().resolve(Weekday::Sun);
        assert_eq!(range.offset, 6);
    }

    #[test]
    fn test_offset_monday_start() {
        // 2024-09-01 is a Sunday, the last column of a Monday-first week.
        let range = YearMonth::new(2024, 9).unwrap().resolve(Weekday::Mon);
        assert_eq!(range.offset, 6);

        // 2024-04-01 is a Monday.
        let range = YearMonth::new(2024, 4).unwrap().resolve(Weekday::Mon);
        assert_eq!(range.offset, 0);
    }

    #[test]
    fn test_navigation_wraps_years() {
        let december = YearMonth::new(2024, 12).unwrap();
        assert_eq!(december.next(), YearMonth::new(2025, 1).unwrap());

        let january = YearMonth::new(2024, 1).unwrap();
        assert_eq!(january.previous(), YearMonth::new(2023, 12).unwrap());
    }

    #[test]
    fn test_of_date() {
        let month = YearMonth::of(date(2024, 2, 29));
        assert_eq!(month, YearMonth::new(2024, 2).unwrap());
    }

    #[test]
    fn test_date_lookup() {
        let range = YearMonth::new(2024, 2).unwrap().resolve(Weekday::Sun);
        assert_eq!(range.date(29), Some(date(2024, 2, 29)));
        assert_eq!(range.date(30), None);
        assert_eq!(range.date(0), None);
    }

    #[test]
    fn test_days_iterates_whole_month() {
        let range = YearMonth::new(2024, 4).unwrap().resolve(Weekday::Sun);
        let days: Vec<NaiveDate> = range.days().collect();
        assert_eq!(days.len(), 30);
        assert_eq!(days[0], date(2024, 4, 1));
        assert_eq!(days[29], date(2024, 4, 30));
        assert!(range.contains(date(2024, 4, 15)));
        assert!(!range.contains(date(2024, 5, 1)));
    }

    #[test]
    fn test_display_and_serde() {
        let month = YearMonth::new(2024, 3).unwrap();
        assert_eq!(month.to_string(), "2024-03");

        let json = serde_json::to_value(month).unwrap();
        assert_eq!(json, serde_json::json!({"year": 2024, "month": 3}));

        let bad: Result<YearMonth, _> =
            serde_json::from_value(serde_json::json!({"year": 2024, "month": 14}));
        assert!(bad.is_err());
    }
}
