//! Low-precision solar theory.
//!
//! Geometric mean longitude, mean anomaly and equation of centre from
//! Meeus, *Astronomical Algorithms*, 2nd ed., ch. 25. Good to ~0.01°.

use jyoti_frames::{SphericalCoords, normalize_deg};

/// Constant of aberration in degrees (20.4898″ at 1 AU).
const ABERRATION_DEG: f64 = 20.4898 / 3600.0;

/// Geometric geocentric Sun, true equinox of date, without nutation.
///
/// Latitude is taken as zero (the real value stays under 1.2″).
pub fn geometric(t: f64) -> SphericalCoords {
    let t2 = t * t;
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t2;
    let m = 357.52911 + 35999.05029 * t - 0.0001537 * t2;
    let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t2;

    let mr = m.to_radians();
    let c = (1.914602 - 0.004817 * t - 0.000014 * t2) * mr.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * mr).sin()
        + 0.000289 * (3.0 * mr).sin();

    let true_lon = l0 + c;
    let nu = (m + c).to_radians();
    let r = 1.000001018 * (1.0 - e * e) / (1.0 + e * nu.cos());

    SphericalCoords {
        lon_deg: normalize_deg(true_lon),
        lat_deg: 0.0,
        distance: r,
    }
}

/// Annual aberration in longitude for the Sun at distance `r_au`.
pub fn aberration_deg(r_au: f64) -> f64 {
    -ABERRATION_DEG / r_au
}
