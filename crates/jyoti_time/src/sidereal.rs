//! Earth Rotation Angle, Greenwich sidereal time and local sidereal time.
//!
//! All functions take UT Julian Dates; the engine treats UTC as UT1
//! (|UT1 − UTC| < 0.9 s, i.e. < 0.004° of sidereal rotation).
//!
//! Sources:
//! - ERA: IERS Conventions 2010, Eq. 5.15.
//! - GMST polynomial: Capitaine et al. 2003, Table 2.

use std::f64::consts::{PI, TAU};

use crate::julian::{DAYS_PER_JULIAN_CENTURY, J2000_JD};

/// Arcseconds to radians: 1″ = π / (180 × 3600).
const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Earth Rotation Angle at a UT Julian Date, radians in [0, 2π).
///
/// θ = 2π × (0.7790572732640 + 1.00273781191135448 × Du), Du = JD − 2451545.0.
pub fn earth_rotation_angle_rad(jd_ut: f64) -> f64 {
    let du = jd_ut - J2000_JD;
    let theta = TAU * (0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du);
    theta.rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time at a UT Julian Date, radians in [0, 2π).
///
/// GMST = ERA + polynomial(T), with the polynomial in arcseconds:
///   0.014506 + 4612.156534·T + 1.3915817·T² − 0.00000044·T³
///   − 0.000029956·T⁴ − 0.0000000368·T⁵
pub fn gmst_rad(jd_ut: f64) -> f64 {
    let era = earth_rotation_angle_rad(jd_ut);
    let t = (jd_ut - J2000_JD) / DAYS_PER_JULIAN_CENTURY;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t2
        - 0.00000044 * t3
        - 0.000029956 * t4
        - 0.0000000368 * t5;

    (era + poly_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU)
}

/// Greenwich apparent sidereal time: GMST + equation of the equinoxes.
///
/// `nutation_longitude_rad` is Δψ and `true_obliquity_rad` is ε; the
/// equation of the equinoxes is Δψ·cos ε.
pub fn apparent_sidereal_time_rad(
    jd_ut: f64,
    nutation_longitude_rad: f64,
    true_obliquity_rad: f64,
) -> f64 {
    (gmst_rad(jd_ut) + nutation_longitude_rad * true_obliquity_rad.cos()).rem_euclid(TAU)
}

/// Local sidereal time from a Greenwich sidereal time and east longitude.
pub fn local_sidereal_time_rad(greenwich_rad: f64, longitude_east_rad: f64) -> f64 {
    (greenwich_rad + longitude_east_rad).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_at_j2000_noon() {
        let theta_deg = earth_rotation_angle_rad(J2000_JD).to_degrees();
        assert!((theta_deg - 280.46).abs() < 0.1, "ERA = {theta_deg}");
    }

    #[test]
    fn gmst_at_j2000_noon() {
        // GMST at J2000.0 ≈ 18h 41m 50.5s = 280.4606°
        let gmst_deg = gmst_rad(J2000_JD).to_degrees();
        assert!((gmst_deg - 280.4606).abs() < 0.01, "GMST = {gmst_deg}");
    }

    #[test]
    fn gmst_meeus_example_12a() {
        // 1987 Apr 10 0h UT → GMST 13h 10m 46.3668s = 197.693195°
        let gmst_deg = gmst_rad(2_446_895.5).to_degrees();
        assert!((gmst_deg - 197.693195).abs() < 0.001, "GMST = {gmst_deg}");
    }

    #[test]
    fn equation_of_equinoxes_is_small() {
        let dpsi = (-14.0_f64 / 3600.0).to_radians();
        let eps = 23.44_f64.to_radians();
        let gast = apparent_sidereal_time_rad(J2000_JD, dpsi, eps);
        let diff = (gast - gmst_rad(J2000_JD)).to_degrees() * 3600.0;
        assert!((diff + 12.84).abs() < 0.1, "eq. of equinoxes = {diff}″");
    }

    #[test]
    fn lst_wraps() {
        let lst = local_sidereal_time_rad(6.0, 1.0);
        assert!((0.0..TAU).contains(&lst));
        assert!((lst - (7.0 - TAU)).abs() < 1e-12);
    }
}
