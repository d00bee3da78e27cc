//! Calendar periods used to scope aggregation
//!
//! Flow totals are "this calendar month", matched by month and year equality,
//! never a rolling window.

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Three-letter abbreviation for a 1-based month number
pub fn month_abbreviation(month: u32) -> &'static str {
    MONTH_ABBREVIATIONS[(month.clamp(1, 12) - 1) as usize]
}

/// A calendar month of a particular year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthPeriod {
    year: i32,
    /// 1-based
    month: u32,
}

impl MonthPeriod {
    /// Returns `None` for a month outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current calendar month in local time
    pub fn current() -> Self {
        Self::containing(today())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Month and year equality
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Parse a period string relative to `today`
    ///
    /// Accepts "YYYY-MM", "current"/"this", and "last"/"previous".
    pub fn parse_relative(s: &str, today: NaiveDate) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "current" | "this" => return Ok(Self::containing(today)),
            "last" | "previous" | "prev" => return Ok(Self::containing(today).prev()),
            _ => {}
        }
        s.parse()
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthPeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PeriodParseError(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

/// Error returned for an unparseable period string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParseError(pub String);

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid period '{}'. Use YYYY-MM, 'current' or 'last'", self.0)
    }
}

impl std::error::Error for PeriodParseError {}

/// Resolution of the spending-over-time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One point per day of the current month
    #[default]
    Month,
    /// One point per month of the current year
    Year,
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month" | "daily" => Ok(Self::Month),
            "year" | "monthly" => Ok(Self::Year),
            other => Err(format!("Unknown granularity '{}'. Use month or year", other)),
        }
    }
}
