//! Sankranti search: the Sun's sidereal ingress into a rashi.

use serde::{Deserialize, Serialize};

use jyoti_vedic_base::{ALL_RASHIS, RASHI_SPAN, Rashi};

use crate::context::SearchContext;
use crate::error::SearchError;
use crate::search_util::{find_zero_crossing, normalize_to_pm180};

const BISECT_ITERATIONS: usize = 50;
const TOLERANCE_DAYS: f64 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SankrantiEvent {
    /// Rashi the Sun enters.
    pub rashi: Rashi,
    pub jd_ut: f64,
    /// Sun's sidereal longitude at the event (≈ rashi start).
    pub sun_sidereal_deg: f64,
}

fn find_ingress(
    ctx: &SearchContext<'_>,
    rashi: Rashi,
    jd_ut: f64,
    step: f64,
    max_steps: usize,
) -> Result<SankrantiEvent, SearchError> {
    let target = f64::from(rashi.index()) * RASHI_SPAN;
    let f = |t: f64| -> Result<f64, SearchError> {
        Ok(normalize_to_pm180(ctx.sun_sidereal_at(t)? - target))
    };
    let jd = find_zero_crossing(&f, jd_ut, step, max_steps, BISECT_ITERATIONS, TOLERANCE_DAYS)?
        .ok_or(SearchError::NoConvergence("sankranti not bracketed"))?;
    Ok(SankrantiEvent {
        rashi,
        jd_ut: jd,
        sun_sidereal_deg: ctx.sun_sidereal_at(jd)?,
    })
}

fn current_rashi(ctx: &SearchContext<'_>, jd_ut: f64) -> Result<Rashi, SearchError> {
    let sid = ctx.sun_sidereal_at(jd_ut)?;
    Ok(ALL_RASHIS[((sid / RASHI_SPAN) as usize).min(11)])
}

/// Next ingress of the Sun into any rashi.
pub fn next_sankranti(ctx: &SearchContext<'_>, jd_ut: f64) -> Result<SankrantiEvent, SearchError> {
    let next = current_rashi(ctx, jd_ut)?.offset(1);
    // One rashi takes at most ~31.5 days
    find_ingress(ctx, next, jd_ut, 1.0, 35)
}

/// Ingress into the rashi the Sun occupies at `jd_ut`.
pub fn prev_sankranti(ctx: &SearchContext<'_>, jd_ut: f64) -> Result<SankrantiEvent, SearchError> {
    let cur = current_rashi(ctx, jd_ut)?;
    find_ingress(ctx, cur, jd_ut, -1.0, 35)
}

/// Next ingress into a specific rashi (within about a year).
pub fn next_specific_sankranti(
    ctx: &SearchContext<'_>,
    jd_ut: f64,
    rashi: Rashi,
) -> Result<SankrantiEvent, SearchError> {
    find_ingress(ctx, rashi, jd_ut, 5.0, 80)
}

/// Last ingress into a specific rashi before `jd_ut`.
pub fn prev_specific_sankranti(
    ctx: &SearchContext<'_>,
    jd_ut: f64,
    rashi: Rashi,
) -> Result<SankrantiEvent, SearchError> {
    find_ingress(ctx, rashi, jd_ut, -5.0, 80)
}

/// All sankrantis in `[start_jd, end_jd)`.
pub fn search_sankrantis(
    ctx: &SearchContext<'_>,
    start_jd: f64,
    end_jd: f64,
) -> Result<Vec<SankrantiEvent>, SearchError> {
    if !(end_jd > start_jd) {
        return Err(SearchError::Validation(format!(
            "empty range [{start_jd}, {end_jd})"
        )));
    }
    let mut out = Vec::new();
    let mut t = start_jd;
    loop {
        let ev = next_sankranti(ctx, t)?;
        if ev.jd_ut >= end_jd {
            break;
        }
        out.push(ev);
        t = ev.jd_ut + 1.0;
    }
    Ok(out)
}
