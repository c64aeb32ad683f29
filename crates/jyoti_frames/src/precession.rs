//! IAU 2006 general precession in ecliptic longitude.
//!
//! p_A is the accumulated westward drift of the equinox along the ecliptic
//! since J2000.0. Every ayanamsha model in this workspace is a J2000
//! reference offset plus p_A.
//!
//! Source: Capitaine, Wallace & Chapront 2003, A&A 412, 567 (Table 1).

/// General precession in longitude p_A, in arcseconds.
///
/// `t` is Julian centuries of TT since J2000.0. The leading term is
/// ~5028.80″/century ≈ 1.3969°/century.
pub fn general_precession_longitude_arcsec(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    5028.796195 * t + 1.1054348 * t2 + 0.00007964 * t3 - 0.000023857 * t4 - 0.0000000383 * t5
}

/// General precession in longitude p_A, in degrees.
pub fn general_precession_longitude_deg(t: f64) -> f64 {
    general_precession_longitude_arcsec(t) / 3600.0
}

/// Carry a J2000 ecliptic longitude to the mean equinox of date.
///
/// First-order: adds p_A and ignores the small ecliptic-pole motion, which
/// is below 0.01° for latitudes under 20° within a few centuries of J2000.
pub fn precess_longitude_from_j2000_deg(lon_j2000_deg: f64, t: f64) -> f64 {
    (lon_j2000_deg + general_precession_longitude_deg(t)).rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_at_j2000() {
        assert_eq!(general_precession_longitude_arcsec(0.0), 0.0);
    }

    #[test]
    fn annual_rate() {
        let p = general_precession_longitude_arcsec(0.01);
        assert!((p - 50.29).abs() < 0.1, "p_A(1 yr) = {p}″");
    }

    #[test]
    fn century_in_degrees() {
        let p = general_precession_longitude_deg(1.0);
        assert!((p - 1.3972).abs() < 0.001, "p_A(1 cy) = {p}°");
    }

    #[test]
    fn sign_follows_time() {
        assert!(general_precession_longitude_arcsec(-1.0) < 0.0);
    }

    #[test]
    fn precessed_longitude_wraps() {
        let lon = precess_longitude_from_j2000_deg(359.99, 0.5);
        assert!((lon - (359.99 + 0.6985 - 360.0)).abs() < 0.001, "lon = {lon}");
    }
}
