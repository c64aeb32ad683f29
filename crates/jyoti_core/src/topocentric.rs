//! Diurnal parallax: geocentric to topocentric ecliptic coordinates.
//!
//! The body is rotated into the true equator of date, the observer's
//! geocentric vector (WGS84 ellipsoid) is subtracted, and the result is
//! rotated back. Speeds keep their geocentric value.

use jyoti_frames::{
    SphericalCoords, cartesian_to_spherical, ecliptic_to_equatorial, equatorial_to_ecliptic,
    nutation, spherical_to_cartesian, true_obliquity_deg,
};
use jyoti_time::{Instant, apparent_sidereal_time_rad, jd_to_centuries, local_sidereal_time_rad};

use crate::analytic::moon::AU_KM;
use crate::error::CalculationError;
use crate::location::GeoLocation;
use crate::position::BodyPosition;

/// WGS84 equatorial radius in km.
const EARTH_RADIUS_KM: f64 = 6378.137;
/// WGS84 flattening.
const FLATTENING: f64 = 1.0 / 298.257_223_563;

/// Observer's geocentric position in Earth radii: (ρ cos φ′, ρ sin φ′).
fn observer_terms(loc: &GeoLocation) -> (f64, f64) {
    let phi = loc.latitude_rad();
    let u = ((1.0 - FLATTENING) * phi.tan()).atan();
    let h = loc.altitude_m / (EARTH_RADIUS_KM * 1000.0);
    let rho_cos = u.cos() + h * phi.cos();
    let rho_sin = (1.0 - FLATTENING) * u.sin() + h * phi.sin();
    (rho_cos, rho_sin)
}

/// Shift a geocentric position to the observer's viewpoint.
///
/// Nodes (zero distance) are returned unchanged.
pub fn to_topocentric(
    pos: BodyPosition,
    instant: &Instant,
    loc: &GeoLocation,
) -> Result<BodyPosition, CalculationError> {
    if !pos.body.has_distance() || pos.distance_au <= 0.0 {
        return Ok(pos);
    }
    let t = jd_to_centuries(instant.jd_tt());
    let eps = true_obliquity_deg(t);
    let dpsi = nutation(t).longitude_deg;
    let gast = apparent_sidereal_time_rad(instant.jd_ut(), dpsi.to_radians(), eps.to_radians());
    let lst = local_sidereal_time_rad(gast, loc.longitude_rad());

    let (ra, dec) = ecliptic_to_equatorial(pos.longitude_deg, pos.latitude_deg, eps);
    let earth_radii = pos.distance_au * AU_KM / EARTH_RADIUS_KM;
    let body = spherical_to_cartesian(&SphericalCoords {
        lon_deg: ra,
        lat_deg: dec,
        distance: earth_radii,
    });

    let (rho_cos, rho_sin) = observer_terms(loc);
    let observer = [rho_cos * lst.cos(), rho_cos * lst.sin(), rho_sin];
    let topo = cartesian_to_spherical(&[
        body[0] - observer[0],
        body[1] - observer[1],
        body[2] - observer[2],
    ]);
    if !(topo.distance.is_finite() && topo.distance > 0.0) {
        return Err(CalculationError::Failed(format!(
            "topocentric reduction degenerate for {}",
            pos.body
        )));
    }

    let (lon, lat) = equatorial_to_ecliptic(topo.lon_deg, topo.lat_deg, eps);
    Ok(BodyPosition {
        longitude_deg: lon,
        latitude_deg: lat,
        distance_au: topo.distance * EARTH_RADIUS_KM / AU_KM,
        ..pos
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
    use crate::position::PositionTier;

    fn moon_at(lon: f64) -> BodyPosition {
        BodyPosition {
            body: Body::Moon,
            longitude_deg: lon,
            latitude_deg: 0.0,
            distance_au: 385_000.0 / AU_KM,
            speed_deg_per_day: 13.2,
            tier: PositionTier::Fallback,
        }
    }

    #[test]
    fn moon_parallax_is_bounded_by_horizontal_parallax() {
        let instant = Instant::new(2000, 1, 1, 12, 0, 0.0).unwrap();
        let loc = GeoLocation::new(28.6139, 77.2090, 216.0);
        for lon in [0.0, 90.0, 180.0, 270.0] {
            let topo = to_topocentric(moon_at(lon), &instant, &loc).unwrap();
            let shift = jyoti_frames::signed_arc_deg(lon, topo.longitude_deg).abs();
            // horizontal parallax at 385 000 km is ~0.95°
            assert!(shift < 1.0, "shift {shift}");
            assert_eq!(topo.speed_deg_per_day, 13.2);
        }
    }

    #[test]
    fn geocenter_sees_no_shift_for_distant_bodies() {
        let instant = Instant::new(2010, 6, 1, 0, 0, 0.0).unwrap();
        let loc = GeoLocation::new(0.0, 0.0, 0.0);
        let saturn = BodyPosition {
            body: Body::Saturn,
            longitude_deg: 170.0,
            latitude_deg: 2.0,
            distance_au: 9.0,
            speed_deg_per_day: 0.03,
            tier: PositionTier::Precise,
        };
        let topo = to_topocentric(saturn, &instant, &loc).unwrap();
        assert!((topo.longitude_deg - 170.0).abs() < 0.001);
    }

    #[test]
    fn nodes_pass_through() {
        let instant = Instant::new(2010, 6, 1, 0, 0, 0.0).unwrap();
        let rahu = BodyPosition {
            body: Body::Rahu,
            longitude_deg: 280.0,
            latitude_deg: 0.0,
            distance_au: 0.0,
            speed_deg_per_day: -0.05,
            tier: PositionTier::Fallback,
        };
        let out = to_topocentric(rahu, &instant, &GeoLocation::new(45.0, 10.0, 0.0)).unwrap();
        assert_eq!(out, rahu);
    }
}
