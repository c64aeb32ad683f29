//! Panchang of a civil day: tithi, nakshatra, yoga, karana, masa, rise and
//! set times, muhurta windows and festivals.
//!
//! Every element is the one prevailing at local sunrise. End instants come
//! from a forward scan-and-bisect on the element's angle.

use jyoti_core::GeoLocation;
use jyoti_time::CivilDate;
use jyoti_vedic_base::{
    KARANA_SEGMENT_DEG, NAKSHATRA_SPAN_27, TITHI_SEGMENT_DEG, VedicError, YOGA_SEGMENT_DEG,
    day_windows,
    karana_from_elongation, moon_events, nakshatra_from_longitude, sun_events,
    tithi_from_elongation, yoga_from_sum,
};
use tracing::debug;

use crate::context::SearchContext;
use crate::error::SearchError;
use crate::festival::festivals_on_day;
use crate::festival_types::{CalendarVariant, FestivalRule};
use crate::masa::{MonthScheme, lunation_containing};
use crate::panchang_types::{
    CalendarDay, KaranaInfo, MasaInfo, PanchangNakshatraInfo, TithiInfo, YogaInfo,
};
use crate::search_util::{find_zero_crossing, normalize_to_pm180};

/// Boundary scans cover 20 steps: 5 days for tithi, yoga and karana,
/// 10 days for nakshatra.
const BOUNDARY_STEPS: usize = 20;
const BISECT_ITERATIONS: usize = 50;
const TOLERANCE_DAYS: f64 = 1e-7;

/// Instant after `jd_ut` where `f` reaches `target_deg`.
fn find_angle_boundary(
    f: &dyn Fn(f64) -> Result<f64, SearchError>,
    jd_ut: f64,
    target_deg: f64,
    step: f64,
) -> Result<Option<f64>, SearchError> {
    let wrapped = |t: f64| -> Result<f64, SearchError> {
        Ok(normalize_to_pm180(f(t)? - target_deg))
    };
    let found = find_zero_crossing(
        &wrapped,
        jd_ut,
        step,
        BOUNDARY_STEPS,
        BISECT_ITERATIONS,
        TOLERANCE_DAYS,
    )?;
    if found.is_none() {
        debug!(jd_ut, target_deg, "element boundary not bracketed");
    }
    Ok(found)
}

/// Tithi prevailing at `jd_ut`.
pub fn tithi_at(ctx: &SearchContext<'_>, jd_ut: f64) -> Result<TithiInfo, SearchError> {
    let pos = tithi_from_elongation(ctx.elongation_at(jd_ut)?)?;
    let end_target = f64::from(pos.tithi_index + 1) * TITHI_SEGMENT_DEG;
    // Relative motion ~12 deg/day, so a tithi lasts about a day
    let f = |t: f64| ctx.elongation_at(t);
    let end_jd = find_angle_boundary(&f, jd_ut, end_target, 0.25)?;
    Ok(TithiInfo {
        tithi: pos.tithi,
        tithi_index: pos.tithi_index,
        paksha: pos.paksha,
        tithi_in_paksha: pos.tithi_in_paksha,
        end_jd,
    })
}

/// Moon's nakshatra and pada at `jd_ut`.
pub fn nakshatra_at(
    ctx: &SearchContext<'_>,
    jd_ut: f64,
) -> Result<PanchangNakshatraInfo, SearchError> {
    let pos = nakshatra_from_longitude(ctx.moon_sidereal_at(jd_ut)?)?;
    let end_target = f64::from(pos.nakshatra.index() + 1) * NAKSHATRA_SPAN_27;
    let f = |t: f64| ctx.moon_sidereal_at(t);
    let end_jd = find_angle_boundary(&f, jd_ut, end_target, 0.5)?;
    Ok(PanchangNakshatraInfo {
        nakshatra: pos.nakshatra,
        pada: pos.pada,
        end_jd,
    })
}

/// Yoga prevailing at `jd_ut`.
pub fn yoga_at(ctx: &SearchContext<'_>, jd_ut: f64) -> Result<YogaInfo, SearchError> {
    let pos = yoga_from_sum(ctx.sidereal_sum_at(jd_ut)?)?;
    let end_target = f64::from(pos.yoga_index + 1) * YOGA_SEGMENT_DEG;
    let f = |t: f64| ctx.sidereal_sum_at(t);
    let end_jd = find_angle_boundary(&f, jd_ut, end_target, 0.25)?;
    Ok(YogaInfo {
        yoga: pos.yoga,
        yoga_index: pos.yoga_index,
        end_jd,
    })
}

/// Karana prevailing at `jd_ut`.
pub fn karana_at(ctx: &SearchContext<'_>, jd_ut: f64) -> Result<KaranaInfo, SearchError> {
    let pos = karana_from_elongation(ctx.elongation_at(jd_ut)?)?;
    let end_target = f64::from(pos.karana_index + 1) * KARANA_SEGMENT_DEG;
    let f = |t: f64| ctx.elongation_at(t);
    let end_jd = find_angle_boundary(&f, jd_ut, end_target, 0.25)?;
    Ok(KaranaInfo {
        karana: pos.karana,
        karana_index: pos.karana_index,
        end_jd,
    })
}

/// Lunar month at `jd_ut`, named under `scheme`.
pub fn masa_at(
    ctx: &SearchContext<'_>,
    jd_ut: f64,
    scheme: MonthScheme,
) -> Result<MasaInfo, SearchError> {
    let lunation = lunation_containing(ctx, jd_ut)?;
    let paksha = tithi_from_elongation(ctx.elongation_at(jd_ut)?)?.paksha;
    Ok(MasaInfo {
        amanta: lunation.masa,
        masa: scheme.month_name(lunation.masa, paksha),
        scheme,
        adhika: lunation.adhika,
        lunation_start_jd: lunation.start_jd,
        lunation_end_jd: lunation.end_jd,
    })
}

/// Sunrise and sunset of `date`; polar days and nights have no panchang.
pub(crate) fn sunrise_sunset(
    ctx: &SearchContext<'_>,
    location: &GeoLocation,
    date: CivilDate,
) -> Result<(f64, f64), SearchError> {
    let ev = sun_events(ctx.source, location, date, &ctx.riseset)?;
    match (ev.sunrise.jd_ut(), ev.sunset.jd_ut()) {
        (Some(rise), Some(set)) => Ok((rise, set)),
        _ => Err(VedicError::PolarUndefined {
            system: "Sunrise",
            latitude_deg: location.latitude_deg,
        }
        .into()),
    }
}

/// Full panchang of `date` at `location`.
///
/// `variant` picks the month naming and the festival tie-break; `rules`
/// are evaluated for this day only.
pub fn calendar_day(
    ctx: &SearchContext<'_>,
    date: CivilDate,
    location: &GeoLocation,
    variant: &CalendarVariant,
    rules: &[FestivalRule],
) -> Result<CalendarDay, SearchError> {
    let location = location.validated()?;
    let (sunrise, sunset) = sunrise_sunset(ctx, &location, date)?;
    let moon = moon_events(ctx.source, &location, date, &ctx.riseset)?;
    let weekday = date.weekday();

    let tithi = tithi_at(ctx, sunrise)?;
    let masa = masa_at(ctx, sunrise, variant.scheme)?;
    let festivals = festivals_on_day(ctx, date, &location, variant, rules)?
        .into_iter()
        .map(|o| o.name)
        .collect();

    debug!(%date, tithi = tithi.tithi.name(), masa = masa.masa.name(), "calendar day");

    Ok(CalendarDay {
        date,
        weekday,
        sunrise_jd: sunrise,
        sunset_jd: sunset,
        moonrise_jd: moon.moonrise.jd_ut(),
        moonset_jd: moon.moonset.jd_ut(),
        tithi,
        nakshatra: nakshatra_at(ctx, sunrise)?,
        yoga: yoga_at(ctx, sunrise)?,
        karana: karana_at(ctx, sunrise)?,
        masa,
        windows: day_windows(sunrise, sunset, weekday)?,
        festivals,
    })
}
