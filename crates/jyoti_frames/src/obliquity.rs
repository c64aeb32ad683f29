//! Obliquity of the ecliptic.
//!
//! Mean obliquity from the IAU 2006 polynomial (Hilton et al. 2006); true
//! obliquity adds nutation in obliquity Δε.

use crate::nutation::nutation;

/// Mean obliquity of the ecliptic in degrees at `t` Julian centuries (TT).
pub fn mean_obliquity_deg(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    let arcsec = 84381.406 - 46.836769 * t - 0.0001831 * t2 + 0.00200340 * t3
        - 0.000000576 * t4
        - 0.0000000434 * t5;
    arcsec / 3600.0
}

/// True obliquity ε = ε₀ + Δε in degrees.
pub fn true_obliquity_deg(t: f64) -> f64 {
    mean_obliquity_deg(t) + nutation(t).obliquity_deg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_value() {
        // 23°26′21.406″
        assert!((mean_obliquity_deg(0.0) - 23.439_279_4).abs() < 1e-6);
    }

    #[test]
    fn decreasing_over_century() {
        let d = mean_obliquity_deg(1.0) - mean_obliquity_deg(0.0);
        assert!((d * 3600.0 + 46.84).abs() < 0.01, "Δε₀ = {}″", d * 3600.0);
    }

    #[test]
    fn true_differs_by_nutation_only() {
        let diff = (true_obliquity_deg(0.0) - mean_obliquity_deg(0.0)) * 3600.0;
        assert!(diff.abs() < 10.0, "Δε = {diff}″");
    }
}
