//! Built-in analytic ephemeris used when no precise provider is available.
//!
//! Documented tolerances against a modern numerical ephemeris, for dates
//! within a few centuries of J2000:
//!
//! | Body               | Longitude |
//! |--------------------|-----------|
//! | Sun                | ≤ 0.01°   |
//! | Moon               | ≤ 0.05°   |
//! | Mercury–Mars       | ≤ 0.1°    |
//! | Jupiter–Neptune    | ≤ 0.3°    |
//! | Pluto              | ≤ 1°      |

pub mod moon;
pub mod nodes;
pub mod planets;
pub mod sun;

use jyoti_frames::{SphericalCoords, normalize_deg, nutation, signed_arc_deg};
use jyoti_time::{Instant, jd_to_centuries};

use crate::body::{Body, NodeMode};
use crate::error::CalculationError;
use crate::location::GeoLocation;
use crate::position::{BodyPosition, PositionTier};
use crate::source::{PositionOptions, PositionSource};
use crate::topocentric::to_topocentric;

/// Half-width of the central difference used for speeds, in days.
const SPEED_STEP_DAYS: f64 = 1.0 / 24.0;

/// Closed-form position source. Never fails for a valid instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticSource {
    options: PositionOptions,
}

impl AnalyticSource {
    pub fn new(options: PositionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> PositionOptions {
        self.options
    }

    /// Apparent geocentric ecliptic coordinates of date at a TT Julian Date.
    ///
    /// Longitude includes nutation; the Sun also includes aberration.
    pub fn apparent_at(&self, body: Body, jd_tt: f64) -> SphericalCoords {
        let t = jd_to_centuries(jd_tt);
        let dpsi = nutation(t).longitude_deg;
        let mut p = match body {
            Body::Sun => {
                let mut s = sun::geometric(t);
                s.lon_deg += sun::aberration_deg(s.distance);
                s
            }
            Body::Moon => moon::geometric(t),
            Body::Rahu | Body::Ketu => {
                let node = match self.options.node_mode {
                    NodeMode::Mean => nodes::mean_node_deg(t),
                    NodeMode::True => nodes::true_node_deg(t),
                };
                let lon = if body == Body::Ketu { node + 180.0 } else { node };
                SphericalCoords {
                    lon_deg: lon,
                    lat_deg: 0.0,
                    distance: 0.0,
                }
            }
            _ => planets::geocentric(body, jd_tt).unwrap_or(SphericalCoords {
                lon_deg: 0.0,
                lat_deg: 0.0,
                distance: 0.0,
            }),
        };
        p.lon_deg = normalize_deg(p.lon_deg + dpsi);
        p
    }

    /// Longitude speed in degrees per day by central difference.
    pub fn speed_at(&self, body: Body, jd_tt: f64) -> f64 {
        let before = self.apparent_at(body, jd_tt - SPEED_STEP_DAYS).lon_deg;
        let after = self.apparent_at(body, jd_tt + SPEED_STEP_DAYS).lon_deg;
        signed_arc_deg(before, after) / (2.0 * SPEED_STEP_DAYS)
    }
}

impl PositionSource for AnalyticSource {
    fn position(
        &self,
        body: Body,
        instant: &Instant,
        location: Option<&GeoLocation>,
    ) -> Result<BodyPosition, CalculationError> {
        let jd_tt = instant.jd_tt();
        let p = self.apparent_at(body, jd_tt);
        let geocentric = BodyPosition {
            body,
            longitude_deg: p.lon_deg,
            latitude_deg: p.lat_deg,
            distance_au: p.distance,
            speed_deg_per_day: self.speed_at(body, jd_tt),
            tier: PositionTier::Fallback,
        };
        match location {
            Some(loc) if self.options.topocentric => {
                to_topocentric(geocentric, instant, &loc.validated()?)
            }
            _ => Ok(geocentric),
        }
    }

    fn tier(&self) -> PositionTier {
        PositionTier::Fallback
    }

    fn name(&self) -> &'static str {
        "analytic"
    }
}
