//! Spherical ↔ Cartesian conversion and ecliptic ↔ equatorial rotation.
//!
//! Angles are in degrees; distances keep whatever unit the caller uses.

/// Spherical coordinates: longitude, latitude, distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoords {
    /// Longitude in degrees, [0, 360), measured from +x toward +y.
    pub lon_deg: f64,
    /// Latitude in degrees, [-90, 90], elevation above the x-y plane.
    pub lat_deg: f64,
    /// Distance from the origin.
    pub distance: f64,
}

/// Normalize an angle to [0, 360).
pub fn normalize_deg(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Shortest signed arc from `from` to `to` in degrees, in (-180, 180].
pub fn signed_arc_deg(from: f64, to: f64) -> f64 {
    let d = normalize_deg(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Convert Cartesian `[x, y, z]` to spherical coordinates.
pub fn cartesian_to_spherical(xyz: &[f64; 3]) -> SphericalCoords {
    let [x, y, z] = *xyz;
    let r = (x * x + y * y + z * z).sqrt();
    if r == 0.0 {
        return SphericalCoords {
            lon_deg: 0.0,
            lat_deg: 0.0,
            distance: 0.0,
        };
    }
    SphericalCoords {
        lon_deg: normalize_deg(y.atan2(x).to_degrees()),
        lat_deg: (z / r).asin().to_degrees(),
        distance: r,
    }
}

/// Convert spherical coordinates to Cartesian `[x, y, z]`.
pub fn spherical_to_cartesian(s: &SphericalCoords) -> [f64; 3] {
    let lon = s.lon_deg.to_radians();
    let lat = s.lat_deg.to_radians();
    [
        s.distance * lat.cos() * lon.cos(),
        s.distance * lat.cos() * lon.sin(),
        s.distance * lat.sin(),
    ]
}

/// Ecliptic (λ, β) to equatorial (α, δ) for obliquity ε, all in degrees.
pub fn ecliptic_to_equatorial(lon_deg: f64, lat_deg: f64, obliquity_deg: f64) -> (f64, f64) {
    let (sl, cl) = lon_deg.to_radians().sin_cos();
    let (sb, cb) = lat_deg.to_radians().sin_cos();
    let (se, ce) = obliquity_deg.to_radians().sin_cos();

    let ra = (sl * ce - (sb / cb) * se).atan2(cl);
    let dec = (sb * ce + cb * se * sl).clamp(-1.0, 1.0).asin();
    (normalize_deg(ra.to_degrees()), dec.to_degrees())
}

/// Equatorial (α, δ) to ecliptic (λ, β) for obliquity ε, all in degrees.
pub fn equatorial_to_ecliptic(ra_deg: f64, dec_deg: f64, obliquity_deg: f64) -> (f64, f64) {
    let (sa, ca) = ra_deg.to_radians().sin_cos();
    let (sd, cd) = dec_deg.to_radians().sin_cos();
    let (se, ce) = obliquity_deg.to_radians().sin_cos();

    let lon = (sa * ce + (sd / cd) * se).atan2(ca);
    let lat = (sd * ce - cd * se * sa).clamp(-1.0, 1.0).asin();
    (normalize_deg(lon.to_degrees()), lat.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 23.439_279;

    #[test]
    fn normalize_handles_negatives() {
        assert_eq!(normalize_deg(-30.0), 330.0);
        assert_eq!(normalize_deg(720.0), 0.0);
        assert!(normalize_deg(-1e-15) < 360.0);
    }

    #[test]
    fn signed_arc_direction() {
        assert!((signed_arc_deg(350.0, 10.0) - 20.0).abs() < 1e-12);
        assert!((signed_arc_deg(10.0, 350.0) + 20.0).abs() < 1e-12);
    }

    #[test]
    fn cartesian_roundtrip() {
        let s = SphericalCoords {
            lon_deg: 123.4,
            lat_deg: -5.6,
            distance: 2.5,
        };
        let back = cartesian_to_spherical(&spherical_to_cartesian(&s));
        assert!((back.lon_deg - s.lon_deg).abs() < 1e-10);
        assert!((back.lat_deg - s.lat_deg).abs() < 1e-10);
        assert!((back.distance - s.distance).abs() < 1e-12);
    }

    #[test]
    fn solstice_point() {
        // λ = 90°, β = 0 → α = 90°, δ = ε
        let (ra, dec) = ecliptic_to_equatorial(90.0, 0.0, EPS);
        assert!((ra - 90.0).abs() < 1e-10);
        assert!((dec - EPS).abs() < 1e-10);
    }

    #[test]
    fn meeus_example_13a() {
        // Pollux: α = 116.328942°, δ = 28.026183° → λ = 113.215630°, β = 6.684170°
        let (lon, lat) = equatorial_to_ecliptic(116.328942, 28.026183, 23.4392911);
        assert!((lon - 113.215630).abs() < 1e-5, "λ = {lon}");
        assert!((lat - 6.684170).abs() < 1e-5, "β = {lat}");
    }

    #[test]
    fn rotation_roundtrip() {
        for &(l, b) in &[(0.0, 0.0), (45.0, 5.0), (200.0, -3.0), (359.0, 1.2)] {
            let (ra, dec) = ecliptic_to_equatorial(l, b, EPS);
            let (l2, b2) = equatorial_to_ecliptic(ra, dec, EPS);
            assert!(signed_arc_deg(l, l2).abs() < 1e-9, "λ {l} → {l2}");
            assert!((b - b2).abs() < 1e-9);
        }
    }
}
