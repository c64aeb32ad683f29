//! New and full moon search.
//!
//! Amavasya is the instant the Moon−Sun elongation crosses 0°, Purnima the
//! instant it crosses 180°. The elongation grows ~12.2°/day, so a one-day
//! scan step brackets each event with room to spare.

use serde::{Deserialize, Serialize};

use crate::context::SearchContext;
use crate::error::SearchError;
use crate::search_util::{find_zero_crossing, normalize_to_pm180};

/// A synodic month is at most ~29.8 days.
const MAX_SCAN_DAYS: usize = 35;
const SCAN_STEP_DAYS: f64 = 1.0;
const BISECT_ITERATIONS: usize = 50;
const TOLERANCE_DAYS: f64 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LunarPhase {
    Amavasya,
    Purnima,
}

impl LunarPhase {
    pub const fn elongation_deg(self) -> f64 {
        match self {
            Self::Amavasya => 0.0,
            Self::Purnima => 180.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Amavasya => "Amavasya",
            Self::Purnima => "Purnima",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarPhaseEvent {
    pub phase: LunarPhase,
    pub jd_ut: f64,
}

fn find_phase(
    ctx: &SearchContext<'_>,
    phase: LunarPhase,
    jd_ut: f64,
    step: f64,
) -> Result<LunarPhaseEvent, SearchError> {
    let target = phase.elongation_deg();
    let f = |t: f64| -> Result<f64, SearchError> {
        Ok(normalize_to_pm180(ctx.elongation_at(t)? - target))
    };
    let jd = find_zero_crossing(
        &f,
        jd_ut,
        step,
        MAX_SCAN_DAYS,
        BISECT_ITERATIONS,
        TOLERANCE_DAYS,
    )?
    .ok_or(SearchError::NoConvergence("lunar phase not bracketed"))?;
    Ok(LunarPhaseEvent { phase, jd_ut: jd })
}

/// First new moon after `jd_ut`.
pub fn next_amavasya(ctx: &SearchContext<'_>, jd_ut: f64) -> Result<LunarPhaseEvent, SearchError> {
    find_phase(ctx, LunarPhase::Amavasya, jd_ut, SCAN_STEP_DAYS)
}

/// Last new moon at or before `jd_ut`.
pub fn prev_amavasya(ctx: &SearchContext<'_>, jd_ut: f64) -> Result<LunarPhaseEvent, SearchError> {
    find_phase(ctx, LunarPhase::Amavasya, jd_ut, -SCAN_STEP_DAYS)
}

/// First full moon after `jd_ut`.
pub fn next_purnima(ctx: &SearchContext<'_>, jd_ut: f64) -> Result<LunarPhaseEvent, SearchError> {
    find_phase(ctx, LunarPhase::Purnima, jd_ut, SCAN_STEP_DAYS)
}

/// Last full moon at or before `jd_ut`.
pub fn prev_purnima(ctx: &SearchContext<'_>, jd_ut: f64) -> Result<LunarPhaseEvent, SearchError> {
    find_phase(ctx, LunarPhase::Purnima, jd_ut, -SCAN_STEP_DAYS)
}

/// All events of `phase` in `[start_jd, end_jd)`, in time order.
pub fn search_lunar_phases(
    ctx: &SearchContext<'_>,
    phase: LunarPhase,
    start_jd: f64,
    end_jd: f64,
) -> Result<Vec<LunarPhaseEvent>, SearchError> {
    if !(end_jd > start_jd) {
        return Err(SearchError::Validation(format!(
            "empty range [{start_jd}, {end_jd})"
        )));
    }
    let mut out = Vec::new();
    let mut t = start_jd;
    loop {
        let ev = find_phase(ctx, phase, t, SCAN_STEP_DAYS)?;
        if ev.jd_ut >= end_jd {
            break;
        }
        if ev.jd_ut >= start_jd {
            out.push(ev);
        }
        // Skip past the root so the scan does not land on it again
        t = ev.jd_ut + 1.0;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jyoti_core::AnalyticSource;
    use jyoti_time::calendar_to_jd;
    use jyoti_vedic_base::AyanamshaSystem;

    #[test]
    fn new_moon_april_2024() {
        // Total solar eclipse, 2024-04-08 18:21 UT
        let src = AnalyticSource::default();
        let ctx = SearchContext::new(&src, AyanamshaSystem::Lahiri);
        let start = calendar_to_jd(2024, 4, 1.0);
        let nm = next_amavasya(&ctx, start).unwrap();
        let expected = calendar_to_jd(2024, 4, 8.0 + 18.35 / 24.0);
        assert!((nm.jd_ut - expected).abs() < 0.05, "{}", nm.jd_ut - expected);
        let prev = prev_amavasya(&ctx, nm.jd_ut + 3.0).unwrap();
        assert!((prev.jd_ut - nm.jd_ut).abs() < 1e-5);
    }

    #[test]
    fn full_moons_in_2024() {
        let src = AnalyticSource::default();
        let ctx = SearchContext::new(&src, AyanamshaSystem::Lahiri);
        let fm = search_lunar_phases(
            &ctx,
            LunarPhase::Purnima,
            calendar_to_jd(2024, 1, 1.0),
            calendar_to_jd(2025, 1, 1.0),
        )
        .unwrap();
        assert_eq!(fm.len(), 12);
        for w in fm.windows(2) {
            let gap = w[1].jd_ut - w[0].jd_ut;
            assert!((29.1..30.0).contains(&gap), "gap {gap}");
        }
        let e = ctx.elongation_at(fm[0].jd_ut).unwrap();
        assert!((e - 180.0).abs() < 1e-4, "{e}");
    }

    #[test]
    fn empty_range_rejected() {
        let src = AnalyticSource::default();
        let ctx = SearchContext::new(&src, AyanamshaSystem::Lahiri);
        assert!(search_lunar_phases(&ctx, LunarPhase::Amavasya, 10.0, 10.0).is_err());
    }
}
