//! Validated Gregorian calendar dates and weekdays.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimeError;
use crate::julian::{calendar_to_jd, jd_to_calendar};

/// Day of the week, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

/// All weekdays in order (Sunday = 0).
pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

impl Weekday {
    /// 0-based index, Sunday = 0.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    /// Weekday of the civil day containing `jd` (counted from 0h UT).
    pub fn from_jd(jd: f64) -> Self {
        let idx = ((jd + 1.5).floor() as i64).rem_euclid(7) as usize;
        ALL_WEEKDAYS[idx]
    }
}

/// Number of days in a Gregorian month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// A validated Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CivilDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CivilDate {
    /// Build a date, rejecting out-of-range fields.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        if !(1..=12).contains(&month) {
            return Err(TimeError::InvalidDate("month must be in 1..=12"));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(TimeError::InvalidDate("day out of range for month"));
        }
        Ok(Self { year, month, day })
    }

    /// Fields already checked by a caller in this crate.
    pub(crate) const fn from_validated(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Date of the civil day containing `jd`.
    pub fn from_jd(jd: f64) -> Self {
        let (year, month, day_frac) = jd_to_calendar(jd);
        Self {
            year,
            month,
            day: day_frac.floor() as u32,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Julian Date at 0h UT of this date.
    pub fn jd_midnight(&self) -> f64 {
        calendar_to_jd(self.year, self.month, self.day as f64)
    }

    pub fn weekday(&self) -> Weekday {
        Weekday::from_jd(self.jd_midnight())
    }

    /// Date `days` after (or before, if negative) this one.
    pub fn add_days(&self, days: i64) -> Self {
        Self::from_jd(self.jd_midnight() + days as f64 + 0.25)
    }

    /// Dates from January 1 to December 31 of `year`.
    pub fn days_of_year(year: i32) -> impl Iterator<Item = CivilDate> {
        let first = CivilDate {
            year,
            month: 1,
            day: 1,
        };
        let count = if is_leap_year(year) { 366 } else { 365 };
        (0..count).map(move |i| first.add_days(i))
    }
}

impl Display for CivilDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CivilDate {
    type Err = TimeError;

    /// Parse `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 3 {
            return Err(TimeError::Parse(format!("expected YYYY-MM-DD, got '{s}'")));
        }
        let year = parts[0]
            .parse::<i32>()
            .map_err(|e| TimeError::Parse(format!("year '{}': {e}", parts[0])))?;
        let month = parts[1]
            .parse::<u32>()
            .map_err(|e| TimeError::Parse(format!("month '{}': {e}", parts[1])))?;
        let day = parts[2]
            .parse::<u32>()
            .map_err(|e| TimeError::Parse(format!("day '{}': {e}", parts[2])))?;
        Self::new(year, month, day)
    }
}

impl TryFrom<String> for CivilDate {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CivilDate> for String {
    fn from(value: CivilDate) -> Self {
        value.to_string()
    }
}
