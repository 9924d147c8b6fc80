//! The module contains `YearMonth`, the calendar scope of a budget.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 3000;

/// A validated (year, month) pair.
///
/// Ordering follows the calendar, so `2024-12 < 2025-01`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> ResultEngine<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(EngineError::InvalidYear(year));
        }
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// Month of the current UTC wall clock.
    pub fn current() -> ResultEngine<Self> {
        Self::from_timestamp(Utc::now())
    }

    pub fn from_timestamp(timestamp: DateTime<Utc>) -> ResultEngine<Self> {
        Self::new(timestamp.year(), timestamp.month())
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    #[must_use]
    pub fn first_day_of_month(&self) -> NaiveDate {
        first_day(self.year, self.month)
    }

    #[must_use]
    pub fn last_day_of_month(&self) -> NaiveDate {
        let (year, month) = self.following();
        first_day(year, month).pred_opt().unwrap_or(NaiveDate::MIN)
    }

    /// Next calendar month, failing past year 3000.
    pub fn next_month(&self) -> ResultEngine<Self> {
        let (year, month) = self.following();
        Self::new(year, month)
    }

    /// Previous calendar month, failing before year 1900.
    pub fn previous_month(&self) -> ResultEngine<Self> {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// Half-open UTC interval `[start, end)` covering the whole month.
    #[must_use]
    pub fn utc_bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let (year, month) = self.following();
        (
            midnight_utc(self.first_day_of_month()),
            midnight_utc(first_day(year, month)),
        )
    }

    /// Returns `true` if `timestamp` falls inside this month (UTC).
    #[must_use]
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp.year() == self.year && timestamp.month() == self.month
    }

    // Unchecked rollover; year 3001 is still a valid chrono date.
    fn following(&self) -> (i32, u32) {
        if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        }
    }
}

fn first_day(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| EngineError::InvalidMonth(0))?;
        let year: i32 = year
            .parse()
            .map_err(|_| EngineError::InvalidYear(0))?;
        let month: u32 = month
            .parse()
            .map_err(|_| EngineError::InvalidMonth(0))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(YearMonth::new(1899, 5), Err(EngineError::InvalidYear(1899)));
        assert_eq!(YearMonth::new(3001, 1), Err(EngineError::InvalidYear(3001)));
        assert_eq!(YearMonth::new(2024, 0), Err(EngineError::InvalidMonth(0)));
        assert_eq!(YearMonth::new(2024, 13), Err(EngineError::InvalidMonth(13)));
    }

    #[test]
    fn last_day_is_calendar_correct() {
        assert_eq!(ym(2024, 2).last_day_of_month().day(), 29);
        assert_eq!(ym(2023, 2).last_day_of_month().day(), 28);
        assert_eq!(ym(2024, 4).last_day_of_month().day(), 30);
        assert_eq!(ym(2024, 12).last_day_of_month().day(), 31);
        assert_eq!(ym(3000, 12).last_day_of_month().day(), 31);
    }

    #[test]
    fn stepping_rolls_over_years() {
        assert_eq!(ym(2024, 12).next_month().unwrap(), ym(2025, 1));
        assert_eq!(ym(2024, 1).previous_month().unwrap(), ym(2023, 12));
        assert_eq!(ym(2024, 6).next_month().unwrap(), ym(2024, 7));
    }

    #[test]
    fn stepping_outside_range_fails() {
        assert_eq!(
            ym(3000, 12).next_month(),
            Err(EngineError::InvalidYear(3001))
        );
        assert_eq!(
            ym(1900, 1).previous_month(),
            Err(EngineError::InvalidYear(1899))
        );
    }

    #[test]
    fn bounds_are_half_open() {
        let month = ym(2024, 3);
        let (start, end) = month.utc_bounds();

        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
        assert!(month.contains(Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap()));
        assert!(!month.contains(end));
    }

    #[test]
    fn display_and_parse() {
        assert_eq!(ym(2024, 3).to_string(), "2024-03");
        assert_eq!("2025-11".parse::<YearMonth>().unwrap(), ym(2025, 11));
        assert!("2025".parse::<YearMonth>().is_err());
        assert!("2025-13".parse::<YearMonth>().is_err());
    }

    #[test]
    fn ordering_follows_calendar() {
        assert!(ym(2024, 12) < ym(2025, 1));
    }
}
