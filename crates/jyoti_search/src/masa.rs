//! Lunar months (masa) with adhika detection.
//!
//! Amanta: a month runs new moon to new moon and takes the name of the
//! Sun's sidereal rashi at its closing new moon (Mesha → Chaitra). When no
//! sankranti falls inside the lunation the Sun is in the same rashi at both
//! new moons; that month is adhika and is named for the following rashi,
//! so it shares its name with the nija month after it.

use serde::{Deserialize, Serialize};

use jyoti_vedic_base::{ALL_RASHIS, Masa, Paksha, RASHI_SPAN, Rashi};

use crate::context::SearchContext;
use crate::error::SearchError;
use crate::lunar_phase::{next_amavasya, prev_amavasya};

/// Month-boundary convention of a regional calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MonthScheme {
    /// New moon to new moon.
    #[default]
    Amanta,
    /// Full moon to full moon; the krishna paksha belongs to the next
    /// amanta month's name.
    Purnimanta,
}

impl MonthScheme {
    /// Month name under this scheme for a day in amanta month `amanta` and
    /// paksha `paksha`.
    pub const fn month_name(self, amanta: Masa, paksha: Paksha) -> Masa {
        match (self, paksha) {
            (Self::Purnimanta, Paksha::Krishna) => amanta.next(),
            _ => amanta,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Amanta => "amanta",
            Self::Purnimanta => "purnimanta",
        }
    }
}

/// One amanta lunation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lunation {
    /// Opening new moon (JD UT).
    pub start_jd: f64,
    /// Closing new moon (JD UT).
    pub end_jd: f64,
    pub masa: Masa,
    pub adhika: bool,
}

impl Lunation {
    pub fn contains(&self, jd_ut: f64) -> bool {
        jd_ut >= self.start_jd && jd_ut < self.end_jd
    }

    /// "Adhika Shravana", "Chaitra", ...
    pub fn label(&self) -> String {
        if self.adhika {
            format!("Adhika {}", self.masa.name())
        } else {
            self.masa.name().to_string()
        }
    }
}

fn sun_rashi(ctx: &SearchContext<'_>, jd_ut: f64) -> Result<Rashi, SearchError> {
    let sid = ctx.sun_sidereal_at(jd_ut)?;
    Ok(ALL_RASHIS[((sid / RASHI_SPAN) as usize).min(11)])
}

fn name_lunation(at_start: Rashi, at_end: Rashi) -> (Masa, bool) {
    if at_start == at_end {
        (Masa::from_sun_rashi(at_end.offset(1)), true)
    } else {
        (Masa::from_sun_rashi(at_end), false)
    }
}

/// Lunation containing `jd_ut`.
pub fn lunation_containing(ctx: &SearchContext<'_>, jd_ut: f64) -> Result<Lunation, SearchError> {
    let start = prev_amavasya(ctx, jd_ut)?.jd_ut;
    let end = next_amavasya(ctx, jd_ut)?.jd_ut;
    let (masa, adhika) = name_lunation(sun_rashi(ctx, start)?, sun_rashi(ctx, end)?);
    Ok(Lunation {
        start_jd: start,
        end_jd: end,
        masa,
        adhika,
    })
}

/// Consecutive lunations covering `[start_jd, end_jd]`.
pub fn lunations_between(
    ctx: &SearchContext<'_>,
    start_jd: f64,
    end_jd: f64,
) -> Result<Vec<Lunation>, SearchError> {
    if !(end_jd >= start_jd) {
        return Err(SearchError::Validation(format!(
            "empty range [{start_jd}, {end_jd}]"
        )));
    }
    let mut out = Vec::new();
    let mut nm = prev_amavasya(ctx, start_jd)?.jd_ut;
    let mut rashi = sun_rashi(ctx, nm)?;
    while nm <= end_jd {
        let next = next_amavasya(ctx, nm + 1.0)?.jd_ut;
        let next_rashi = sun_rashi(ctx, next)?;
        let (masa, adhika) = name_lunation(rashi, next_rashi);
        out.push(Lunation {
            start_jd: nm,
            end_jd: next,
            masa,
            adhika,
        });
        nm = next;
        rashi = next_rashi;
    }
    Ok(out)
}

/// Lunation in a sorted, contiguous list that contains `jd_ut`.
pub(crate) fn find_lunation(lunations: &[Lunation], jd_ut: f64) -> Option<&Lunation> {
    let i = lunations.partition_point(|l| l.end_jd <= jd_ut);
    lunations.get(i).filter(|l| l.contains(jd_ut))
}
