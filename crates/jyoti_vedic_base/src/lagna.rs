//! Lagna (Ascendant), MC, Vertex and equatorial ascendant.
//!
//! All angles derive from the right ascension of the meridian (ARMC, the
//! apparent local sidereal time in degrees), the geographic latitude and the
//! true obliquity of date.
//!
//! The ascendant uses the quadrant-stable two-step form (`asc1`/`asc2`):
//! `atan(sin x / (cos ε cos x − tan φ sin ε))` evaluated in the first
//! quadrant and reflected, which stays continuous where the single
//! `atan2` form flips by 180° at high latitudes.
//!
//! Sources: Meeus, "Astronomical Algorithms" (2nd ed), Chapter 13;
//! Montenbruck & Pfleger, "Astronomy on the Personal Computer".

use jyoti_core::GeoLocation;
use jyoti_frames::{normalize_deg, nutation, true_obliquity_deg};
use jyoti_time::{Instant, apparent_sidereal_time_rad, jd_to_centuries, local_sidereal_time_rad};
use serde::{Deserialize, Serialize};

use crate::error::VedicError;

const VERY_SMALL: f64 = 1e-10;

/// Latitudes closer than this to a pole have no defined ascendant.
pub const POLAR_EPSILON_DEG: f64 = 1e-6;

/// The four angles plus the inputs they were computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSet {
    /// Right ascension of the meridian (apparent LST) in degrees.
    pub armc_deg: f64,
    pub latitude_deg: f64,
    /// True obliquity of date.
    pub obliquity_deg: f64,
    pub ascendant_deg: f64,
    pub mc_deg: f64,
    pub vertex_deg: f64,
    /// Ecliptic point rising on the equator (East point).
    pub equatorial_ascendant_deg: f64,
}

/// Apparent local sidereal time in degrees for an instant and east longitude.
///
/// GMST plus the equation of the equinoxes (Δψ cos ε), plus longitude.
pub fn local_sidereal_time_deg(instant: &Instant, longitude_east_deg: f64) -> f64 {
    let t = jd_to_centuries(instant.jd_tt());
    let eps = true_obliquity_deg(t);
    let dpsi = nutation(t).longitude_deg;
    let gast = apparent_sidereal_time_rad(instant.jd_ut(), dpsi.to_radians(), eps.to_radians());
    normalize_deg(local_sidereal_time_rad(gast, longitude_east_deg.to_radians()).to_degrees())
}

/// True obliquity at an instant.
pub fn obliquity_at(instant: &Instant) -> f64 {
    true_obliquity_deg(jd_to_centuries(instant.jd_tt()))
}

fn asc2(x: f64, f: f64, sine: f64, cose: f64) -> f64 {
    let mut ass = -f.to_radians().tan() * sine + cose * x.to_radians().cos();
    if ass.abs() < VERY_SMALL {
        ass = 0.0;
    }
    let mut sinx = x.to_radians().sin();
    if sinx.abs() < VERY_SMALL {
        sinx = 0.0;
    }
    let mut a = if sinx == 0.0 {
        if ass < 0.0 { -VERY_SMALL } else { VERY_SMALL }
    } else if ass == 0.0 {
        if sinx < 0.0 { -90.0 } else { 90.0 }
    } else {
        (sinx / ass).atan().to_degrees()
    };
    if a < 0.0 {
        a += 180.0;
    }
    a
}

/// Ecliptic longitude rising on the horizon of a pole at height `f`, for
/// the equator point `x1` degrees east of the meridian's RA plus 90.
pub(crate) fn asc1(x1: f64, f: f64, obliquity_deg: f64) -> f64 {
    let (sine, cose) = obliquity_deg.to_radians().sin_cos();
    let x1 = normalize_deg(x1);
    if (90.0 - f).abs() < VERY_SMALL {
        return 180.0;
    }
    if (90.0 + f).abs() < VERY_SMALL {
        return 0.0;
    }
    let a = match (x1 / 90.0) as u8 {
        0 => asc2(x1, f, sine, cose),
        1 => 180.0 - asc2(180.0 - x1, -f, sine, cose),
        2 => 180.0 + asc2(x1 - 180.0, -f, sine, cose),
        _ => 360.0 - asc2(360.0 - x1, f, sine, cose),
    };
    normalize_deg(a)
}

/// Ascendant for a meridian RA and pole height.
pub fn ascendant_deg(armc_deg: f64, latitude_deg: f64, obliquity_deg: f64) -> f64 {
    asc1(armc_deg + 90.0, latitude_deg, obliquity_deg)
}

/// Ecliptic longitude on the meridian: `atan2(sin RA, cos RA cos ε)`.
///
/// Also converts any equator RA to the ecliptic along its hour circle.
pub fn mc_deg(armc_deg: f64, obliquity_deg: f64) -> f64 {
    let (s, c) = armc_deg.to_radians().sin_cos();
    normalize_deg(s.atan2(c * obliquity_deg.to_radians().cos()).to_degrees())
}

/// Western intersection of the prime vertical with the ecliptic.
pub fn vertex_deg(armc_deg: f64, latitude_deg: f64, obliquity_deg: f64) -> f64 {
    let mc = mc_deg(armc_deg, obliquity_deg);
    let v = ascendant_deg(armc_deg + 180.0, 90.0 - latitude_deg, obliquity_deg);
    if normalize_deg(v - mc) < 180.0 {
        normalize_deg(v + 180.0)
    } else {
        v
    }
}

/// Ascendant for an observer on the equator with the same ARMC.
pub fn equatorial_ascendant_deg(armc_deg: f64, obliquity_deg: f64) -> f64 {
    ascendant_deg(armc_deg, 0.0, obliquity_deg)
}

pub(crate) fn check_latitude(system: &'static str, latitude_deg: f64) -> Result<(), VedicError> {
    if !latitude_deg.is_finite() || latitude_deg.abs() > 90.0 {
        return Err(VedicError::Validation(format!(
            "latitude must be within [-90, 90], got {latitude_deg}"
        )));
    }
    if latitude_deg.abs() >= 90.0 - POLAR_EPSILON_DEG {
        return Err(VedicError::PolarUndefined {
            system,
            latitude_deg,
        });
    }
    Ok(())
}

/// All angles for a given ARMC, latitude and obliquity.
pub fn angles_from_armc(
    armc_deg: f64,
    latitude_deg: f64,
    obliquity_deg: f64,
) -> Result<AngleSet, VedicError> {
    if !armc_deg.is_finite() || !obliquity_deg.is_finite() {
        return Err(VedicError::Validation(
            "ARMC and obliquity must be finite".into(),
        ));
    }
    check_latitude("Ascendant", latitude_deg)?;
    let armc = normalize_deg(armc_deg);
    Ok(AngleSet {
        armc_deg: armc,
        latitude_deg,
        obliquity_deg,
        ascendant_deg: ascendant_deg(armc, latitude_deg, obliquity_deg),
        mc_deg: mc_deg(armc, obliquity_deg),
        vertex_deg: vertex_deg(armc, latitude_deg, obliquity_deg),
        equatorial_ascendant_deg: equatorial_ascendant_deg(armc, obliquity_deg),
    })
}

/// All angles for an observer at an instant (tropical, of date).
pub fn angles(instant: &Instant, location: &GeoLocation) -> Result<AngleSet, VedicError> {
    location.validate()?;
    let armc = local_sidereal_time_deg(instant, location.longitude_deg);
    angles_from_armc(armc, location.latitude_deg, obliquity_at(instant))
}
