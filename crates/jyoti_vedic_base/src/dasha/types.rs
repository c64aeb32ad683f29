//! Core types for Vimshottari dasha (planetary period) calculations.

use jyoti_time::Instant;
use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::graha::Graha;

/// Maximum dasha depth. Levels 0-4 supported.
pub const MAX_DASHA_LEVEL: u8 = 4;

/// Default max level for queries (keeps output manageable).
pub const DEFAULT_DASHA_LEVEL: u8 = 2;

/// 5 hierarchical dasha levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DashaLevel {
    Mahadasha = 0,
    Antardasha = 1,
    Pratyantardasha = 2,
    Sookshmadasha = 3,
    Pranadasha = 4,
}

impl DashaLevel {
    /// Create from raw u8 value.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Mahadasha),
            1 => Some(Self::Antardasha),
            2 => Some(Self::Pratyantardasha),
            3 => Some(Self::Sookshmadasha),
            4 => Some(Self::Pranadasha),
            _ => None,
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
            Self::Sookshmadasha => "Sookshmadasha",
            Self::Pranadasha => "Pranadasha",
        }
    }

    /// Next deeper level, if any.
    pub const fn child_level(self) -> Option<Self> {
        match self {
            Self::Mahadasha => Some(Self::Antardasha),
            Self::Antardasha => Some(Self::Pratyantardasha),
            Self::Pratyantardasha => Some(Self::Sookshmadasha),
            Self::Sookshmadasha => Some(Self::Pranadasha),
            Self::Pranadasha => None,
        }
    }
}

/// Length of the dasha year in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DashaYear {
    /// 365.256363 days.
    #[default]
    Sidereal,
    /// 365.25 days.
    Julian,
    /// 360 days.
    Savana,
}

impl DashaYear {
    pub const fn days(self) -> f64 {
        match self {
            Self::Sidereal => 365.256_363,
            Self::Julian => 365.25,
            Self::Savana => 360.0,
        }
    }
}

/// A single dasha period.
///
/// `start_jd..end_jd` is the span actually lived. The nominal span is where
/// the period would sit if it ran in full; it differs only for the birth
/// period (which started before birth) and the closing period of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashaPeriod {
    pub lord: Graha,
    pub level: DashaLevel,
    /// JD UT, inclusive.
    pub start_jd: f64,
    /// JD UT, exclusive.
    pub end_jd: f64,
    pub nominal_start_jd: f64,
    pub nominal_end_jd: f64,
    /// 1-indexed position among siblings.
    pub order: u16,
    /// Index into parent level's array (0 for level 0).
    pub parent_idx: u32,
}

impl DashaPeriod {
    /// Duration of the period in days.
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }

    pub fn duration_years(&self, year: DashaYear) -> f64 {
        self.duration_days() / year.days()
    }

    pub fn nominal_duration_days(&self) -> f64 {
        self.nominal_end_jd - self.nominal_start_jd
    }

    /// Whether the lived span was cut short on either side.
    pub fn is_clipped(&self) -> bool {
        self.start_jd > self.nominal_start_jd || self.end_jd < self.nominal_end_jd
    }

    pub fn contains(&self, jd: f64) -> bool {
        jd >= self.start_jd && jd < self.end_jd
    }

    pub fn start_instant(&self) -> Result<Instant, VedicError> {
        Ok(Instant::from_jd_ut(self.start_jd)?)
    }

    pub fn end_instant(&self) -> Result<Instant, VedicError> {
        Ok(Instant::from_jd_ut(self.end_jd)?)
    }
}

/// Active periods at a specific date (one per requested level).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaSnapshot {
    /// The queried JD UT.
    pub query_jd: f64,
    /// Active periods: periods[0]=active mahadasha, [1]=active antardasha, etc.
    pub periods: Vec<DashaPeriod>,
}

impl DashaSnapshot {
    pub fn mahadasha(&self) -> Option<&DashaPeriod> {
        self.periods.first()
    }

    pub fn at_level(&self, level: DashaLevel) -> Option<&DashaPeriod> {
        self.periods.get(level as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dasha_level_from_u8() {
        assert_eq!(DashaLevel::from_u8(0), Some(DashaLevel::Mahadasha));
        assert_eq!(DashaLevel::from_u8(4), Some(DashaLevel::Pranadasha));
        assert_eq!(DashaLevel::from_u8(5), None);
    }

    #[test]
    fn child_level_chain() {
        let mut level = DashaLevel::Mahadasha;
        let mut depth = 0;
        while let Some(next) = level.child_level() {
            level = next;
            depth += 1;
        }
        assert_eq!(depth, MAX_DASHA_LEVEL);
    }

    #[test]
    fn year_lengths() {
        assert_eq!(DashaYear::default(), DashaYear::Sidereal);
        assert!((DashaYear::Sidereal.days() - 365.256363).abs() < 1e-12);
        assert_eq!(DashaYear::Savana.days(), 360.0);
    }

    #[test]
    fn clipped_detection() {
        let p = DashaPeriod {
            lord: Graha::Ketu,
            level: DashaLevel::Mahadasha,
            start_jd: 10.0,
            end_jd: 20.0,
            nominal_start_jd: 5.0,
            nominal_end_jd: 20.0,
            order: 1,
            parent_idx: 0,
        };
        assert!(p.is_clipped());
        assert!(p.contains(10.0));
        assert!(!p.contains(20.0));
        assert_eq!(p.duration_days(), 10.0);
    }
}
