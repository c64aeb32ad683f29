//! Short-period nutation in longitude and obliquity.
//!
//! Four-term series (lunar node and twice the mean longitudes of Sun and
//! Moon), accurate to ~0.5″ in Δψ and ~0.1″ in Δε.
//!
//! Source: Meeus, *Astronomical Algorithms*, 2nd ed., ch. 22.

/// Nutation components in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    /// Δψ, nutation in longitude.
    pub longitude_deg: f64,
    /// Δε, nutation in obliquity.
    pub obliquity_deg: f64,
}

/// Nutation at `t` Julian centuries (TT) from J2000.0.
pub fn nutation(t: f64) -> Nutation {
    let omega = (125.04452 - 1934.136261 * t).to_radians();
    let l_sun = (280.4665 + 36000.7698 * t).to_radians();
    let l_moon = (218.3165 + 481267.8813 * t).to_radians();

    let dpsi_arcsec = -17.20 * omega.sin() - 1.32 * (2.0 * l_sun).sin()
        - 0.23 * (2.0 * l_moon).sin()
        + 0.21 * (2.0 * omega).sin();
    let deps_arcsec = 9.20 * omega.cos()
        + 0.57 * (2.0 * l_sun).cos()
        + 0.10 * (2.0 * l_moon).cos()
        - 0.09 * (2.0 * omega).cos();

    Nutation {
        longitude_deg: dpsi_arcsec / 3600.0,
        obliquity_deg: deps_arcsec / 3600.0,
    }
}
