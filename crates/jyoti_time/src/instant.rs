//! UTC instants with sub-second precision.
//!
//! `Instant` is the canonical timestamp handed to every calculation. Its
//! Julian Day (UT) and Terrestrial Time JD are derived once at construction
//! so repeated queries never redo the calendar arithmetic.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::civil::{CivilDate, days_in_month};
use crate::delta_t::delta_t_seconds;
use crate::error::TimeError;
use crate::julian::{SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar};

/// A validated UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Instant {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: f64,
    jd_ut: f64,
    jd_tt: f64,
}

impl Instant {
    /// Build an instant from UTC calendar fields.
    ///
    /// `second` may be fractional and may reach 60.x during a leap second.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, TimeError> {
        if !(1..=12).contains(&month) {
            return Err(TimeError::InvalidDate("month must be in 1..=12"));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(TimeError::InvalidDate("day out of range for month"));
        }
        if hour > 23 {
            return Err(TimeError::InvalidTime("hour must be < 24"));
        }
        if minute > 59 {
            return Err(TimeError::InvalidTime("minute must be < 60"));
        }
        if !second.is_finite() || !(0.0..61.0).contains(&second) {
            return Err(TimeError::InvalidTime("second must be finite and in [0, 61)"));
        }

        let day_frac = day as f64
            + hour as f64 / 24.0
            + minute as f64 / 1440.0
            + second / SECONDS_PER_DAY;
        let jd_ut = calendar_to_jd(year, month, day_frac);
        let decimal_year = year as f64 + (month as f64 - 0.5) / 12.0;
        let jd_tt = jd_ut + delta_t_seconds(decimal_year) / SECONDS_PER_DAY;

        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            jd_ut,
            jd_tt,
        })
    }

    /// Instant at a UT Julian Date, rounded to the microsecond.
    pub fn from_jd_ut(jd_ut: f64) -> Result<Self, TimeError> {
        if !jd_ut.is_finite() {
            return Err(TimeError::InvalidTime("julian day must be finite"));
        }
        let (year, month, day_frac) = jd_to_calendar(jd_ut);
        let day = day_frac.floor() as u32;
        let micros = (day_frac.fract() * SECONDS_PER_DAY * 1e6).round() as u64;
        // Rounding can land exactly on the next midnight.
        if micros >= 86_400_000_000 {
            let next = CivilDate::new(year, month, day)?.add_days(1);
            return Self::new(next.year(), next.month(), next.day(), 0, 0, 0.0);
        }
        let hour = (micros / 3_600_000_000) as u32;
        let minute = ((micros % 3_600_000_000) / 60_000_000) as u32;
        let second = (micros % 60_000_000) as f64 / 1e6;
        Self::new(year, month, day, hour, minute, second)
    }

    /// Midnight UTC at the start of a civil date.
    pub fn at_midnight(date: CivilDate) -> Self {
        let jd_ut = date.jd_midnight();
        let decimal_year = date.year() as f64 + (date.month() as f64 - 0.5) / 12.0;
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            hour: 0,
            minute: 0,
            second: 0.0,
            jd_ut,
            jd_tt: jd_ut + delta_t_seconds(decimal_year) / SECONDS_PER_DAY,
        }
    }

    /// Julian Day in UT.
    pub fn jd_ut(&self) -> f64 {
        self.jd_ut
    }

    /// Julian Day in Terrestrial Time (UT + ΔT).
    pub fn jd_tt(&self) -> f64 {
        self.jd_tt
    }

    /// Civil date component.
    pub fn date(&self) -> CivilDate {
        CivilDate::from_validated(self.year, self.month, self.day)
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

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> f64 {
        self.second
    }

    /// Instant shifted by a number of (possibly fractional) days.
    pub fn add_days(&self, days: f64) -> Result<Self, TimeError> {
        Self::from_jd_ut(self.jd_ut + days)
    }

    /// Bit pattern of the UT Julian Day, for hashing and equality in keys.
    pub fn key_bits(&self) -> u64 {
        self.jd_ut.to_bits()
    }
}

impl Display for Instant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let whole = self.second.trunc() as u32;
        let frac = self.second - whole as f64;
        if frac.abs() < 1e-9 {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
                self.year, self.month, self.day, self.hour, self.minute, whole
            )
        } else {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:09.6}Z",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            )
        }
    }
}

impl FromStr for Instant {
    type Err = TimeError;

    /// Parse `YYYY-MM-DDTHH:MM:SS[.fff]Z` (a trailing `Z` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_suffix('Z').unwrap_or(s);
        let (date_part, time_part) = s
            .split_once('T')
            .ok_or_else(|| TimeError::Parse(format!("missing 'T' separator in '{s}'")))?;
        let date: CivilDate = date_part.parse()?;

        let fields: Vec<&str> = time_part.split(':').collect();
        if fields.len() != 3 {
            return Err(TimeError::Parse(format!("expected HH:MM:SS, got '{time_part}'")));
        }
        let hour = fields[0]
            .parse::<u32>()
            .map_err(|e| TimeError::Parse(format!("hour '{}': {e}", fields[0])))?;
        let minute = fields[1]
            .parse::<u32>()
            .map_err(|e| TimeError::Parse(format!("minute '{}': {e}", fields[1])))?;
        let second = fields[2]
            .parse::<f64>()
            .map_err(|e| TimeError::Parse(format!("second '{}': {e}", fields[2])))?;

        Self::new(date.year(), date.month(), date.day(), hour, minute, second)
    }
}

impl TryFrom<String> for Instant {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Instant> for String {
    fn from(value: Instant) -> Self {
        value.to_string()
    }
}
