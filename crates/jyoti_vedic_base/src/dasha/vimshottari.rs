//! Vimshottari dasha: the 120-year nakshatra-based period system.
//!
//! The first mahadasha belongs to the lord of the Moon's birth nakshatra
//! and runs only for the part of its period not yet "used up" by the Moon's
//! progress through that nakshatra. Eight full periods follow in the fixed
//! lord order, and a closing period of the birth lord returns the used-up
//! part, so one cycle from birth always lasts exactly 120 years.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::balance::{BirthBalance, birth_balance};
use super::subperiod::{find_active_period, proportional_children};
use super::types::{
    DEFAULT_DASHA_LEVEL, DashaLevel, DashaPeriod, DashaSnapshot, DashaYear, MAX_DASHA_LEVEL,
};
use crate::error::VedicError;
use crate::graha::Graha;
use crate::nakshatra::NAKSHATRA_LORD_CYCLE;

/// Total length of one Vimshottari cycle in years.
pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;

/// Lords and their full periods in years, in dasha order.
pub const VIMSHOTTARI_SEQUENCE: [(Graha, f64); 9] = [
    (Graha::Ketu, 7.0),
    (Graha::Shukra, 20.0),
    (Graha::Surya, 6.0),
    (Graha::Chandra, 10.0),
    (Graha::Mangal, 7.0),
    (Graha::Rahu, 18.0),
    (Graha::Guru, 16.0),
    (Graha::Shani, 19.0),
    (Graha::Buddh, 17.0),
];

/// Full mahadasha length of `graha` in years.
pub fn vimshottari_years(graha: Graha) -> f64 {
    VIMSHOTTARI_SEQUENCE
        .iter()
        .find(|(g, _)| *g == graha)
        .map_or(0.0, |(_, y)| *y)
}

/// Dasha generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DashaConfig {
    pub year: DashaYear,
    /// Deepest level stored in the timeline (0 = mahadashas only).
    pub max_level: u8,
}

impl Default for DashaConfig {
    fn default() -> Self {
        Self {
            year: DashaYear::default(),
            max_level: DEFAULT_DASHA_LEVEL,
        }
    }
}

impl DashaConfig {
    pub fn validate(&self) -> Result<(), VedicError> {
        if self.max_level > MAX_DASHA_LEVEL {
            return Err(VedicError::Validation(format!(
                "dasha level {} exceeds maximum {MAX_DASHA_LEVEL}",
                self.max_level
            )));
        }
        Ok(())
    }
}

/// One Vimshottari cycle from birth, with sub-periods down to `max_level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaTimeline {
    pub birth_jd: f64,
    pub balance: BirthBalance,
    pub year: DashaYear,
    /// levels[0] = mahadashas, levels[1] = antardashas, ...
    pub levels: Vec<Vec<DashaPeriod>>,
}

impl DashaTimeline {
    pub fn mahadashas(&self) -> &[DashaPeriod] {
        self.levels.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// End of the cycle (birth + 120 years).
    pub fn end_jd(&self) -> f64 {
        self.mahadashas()
            .last()
            .map_or(self.birth_jd, |p| p.end_jd)
    }

    pub fn total_days(&self) -> f64 {
        self.end_jd() - self.birth_jd
    }

    /// Periods active at `query_jd`, from the mahadasha down to `depth`.
    ///
    /// Levels beyond those stored are generated on the fly for the active
    /// branch only.
    pub fn current_period(&self, query_jd: f64, depth: u8) -> Result<DashaSnapshot, VedicError> {
        if !query_jd.is_finite() {
            return Err(VedicError::Validation("query JD must be finite".into()));
        }
        if depth > MAX_DASHA_LEVEL {
            return Err(VedicError::Validation(format!(
                "dasha level {depth} exceeds maximum {MAX_DASHA_LEVEL}"
            )));
        }
        if query_jd < self.birth_jd {
            return Err(VedicError::Validation(format!(
                "query JD {query_jd} precedes birth JD {}",
                self.birth_jd
            )));
        }
        let level0 = self.mahadashas();
        let Some(idx) = find_active_period(level0, query_jd) else {
            return Err(VedicError::Validation(format!(
                "query JD {query_jd} lies beyond the 120-year cycle ending at {}",
                self.end_jd()
            )));
        };

        let mut periods = Vec::with_capacity(depth as usize + 1);
        periods.push(level0[idx]);
        let mut parent = level0[idx];
        for d in 1..=depth {
            let stored = self.levels.get(d as usize);
            let found = match stored {
                Some(level) => find_active_period(level, query_jd).map(|i| level[i]),
                None => {
                    let children = vimshottari_children(&parent, 0);
                    find_active_period(&children, query_jd).map(|i| children[i])
                }
            };
            match found {
                Some(p) => {
                    periods.push(p);
                    parent = p;
                }
                None => break,
            }
        }

        Ok(DashaSnapshot { query_jd, periods })
    }
}

/// The mahadasha sequence for one cycle from birth.
pub fn vimshottari_mahadashas(
    birth_jd: f64,
    balance: &BirthBalance,
    year: DashaYear,
) -> Vec<DashaPeriod> {
    let days = year.days();
    let full = |g: Graha| vimshottari_years(g) * days;
    let mut periods = Vec::with_capacity(10);

    let birth_full = full(balance.lord);
    let first_end = birth_jd + birth_full * balance.remaining_fraction();
    periods.push(DashaPeriod {
        lord: balance.lord,
        level: DashaLevel::Mahadasha,
        start_jd: birth_jd,
        end_jd: first_end,
        nominal_start_jd: birth_jd - birth_full * balance.elapsed_fraction,
        nominal_end_jd: first_end,
        order: 1,
        parent_idx: 0,
    });

    let start = NAKSHATRA_LORD_CYCLE
        .iter()
        .position(|g| *g == balance.lord)
        .unwrap_or(0);
    let mut cursor = first_end;
    for k in 1..9 {
        let lord = NAKSHATRA_LORD_CYCLE[(start + k) % 9];
        let end = cursor + full(lord);
        periods.push(DashaPeriod {
            lord,
            level: DashaLevel::Mahadasha,
            start_jd: cursor,
            end_jd: end,
            nominal_start_jd: cursor,
            nominal_end_jd: end,
            order: k as u16 + 1,
            parent_idx: 0,
        });
        cursor = end;
    }

    let closing = birth_full * balance.elapsed_fraction;
    if closing > 0.0 {
        periods.push(DashaPeriod {
            lord: balance.lord,
            level: DashaLevel::Mahadasha,
            start_jd: cursor,
            end_jd: cursor + closing,
            nominal_start_jd: cursor,
            nominal_end_jd: cursor + birth_full,
            order: 10,
            parent_idx: 0,
        });
    }
    periods
}

/// Sub-periods of one Vimshottari period.
pub fn vimshottari_children(parent: &DashaPeriod, parent_idx: u32) -> Vec<DashaPeriod> {
    match parent.level.child_level() {
        Some(level) => proportional_children(
            parent,
            &VIMSHOTTARI_SEQUENCE,
            VIMSHOTTARI_TOTAL_YEARS,
            level,
            parent_idx,
        ),
        None => Vec::new(),
    }
}

/// Build the timeline from the birth JD (UT) and the Moon's sidereal longitude.
pub fn vimshottari(
    birth_jd: f64,
    moon_sidereal_lon: f64,
    config: &DashaConfig,
) -> Result<DashaTimeline, VedicError> {
    config.validate()?;
    if !birth_jd.is_finite() {
        return Err(VedicError::Validation("birth JD must be finite".into()));
    }
    let balance = birth_balance(moon_sidereal_lon)?;
    let mut levels = vec![vimshottari_mahadashas(birth_jd, &balance, config.year)];

    for depth in 1..=config.max_level as usize {
        let parents = &levels[depth - 1];
        let mut next = Vec::with_capacity(parents.len() * 9);
        for (i, p) in parents.iter().enumerate() {
            next.extend(vimshottari_children(p, i as u32));
        }
        levels.push(next);
    }

    debug!(
        nakshatra = balance.nakshatra.name(),
        elapsed = balance.elapsed_fraction,
        levels = levels.len(),
        "vimshottari timeline built"
    );

    Ok(DashaTimeline {
        birth_jd,
        balance,
        year: config.year,
        levels,
    })
}
