//! Types for sunrise/sunset and moonrise/moonset calculations.

use std::f64::consts::PI;

use jyoti_core::Body;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (IAU nominal, for geometric dip).
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Rise/set event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiseSetEvent {
    /// Upper limb of the Sun at the horizon, refraction included.
    Sunrise,
    Sunset,
    /// Upper limb of the Moon at the horizon, parallax and refraction
    /// included.
    Moonrise,
    Moonset,
}

impl RiseSetEvent {
    pub fn body(self) -> Body {
        match self {
            Self::Sunrise | Self::Sunset => Body::Sun,
            Self::Moonrise | Self::Moonset => Body::Moon,
        }
    }

    /// Whether this is a rising (eastern horizon) event.
    pub fn is_rising(self) -> bool {
        matches!(self, Self::Sunrise | Self::Moonrise)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sunrise => "sunrise",
            Self::Sunset => "sunset",
            Self::Moonrise => "moonrise",
            Self::Moonset => "moonset",
        }
    }
}

/// Configurable parameters for rise/set computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiseSetConfig {
    /// Atmospheric refraction at the horizon in arcminutes. Default: 34.0.
    pub refraction_arcmin: f64,
    /// Solar angular semi-diameter in arcminutes. Default: 16.0.
    pub semidiameter_arcmin: f64,
    /// Apply the geometric dip for observer altitude,
    /// approximated as `sqrt(2h/R)` radians. Default: true.
    pub altitude_correction: bool,
}

impl Default for RiseSetConfig {
    fn default() -> Self {
        Self {
            refraction_arcmin: 34.0,
            semidiameter_arcmin: 16.0,
            altitude_correction: true,
        }
    }
}

impl RiseSetConfig {
    fn dip_deg(&self, altitude_m: f64) -> f64 {
        if self.altitude_correction && altitude_m > 0.0 {
            (2.0 * altitude_m / EARTH_RADIUS_M).sqrt() * (180.0 / PI)
        } else {
            0.0
        }
    }

    /// Sun horizon depression in degrees: `(refraction + semidiameter) / 60 + dip`.
    ///
    /// 50′ at sea level with the defaults.
    pub fn horizon_depression_deg(&self, altitude_m: f64) -> f64 {
        (self.refraction_arcmin + self.semidiameter_arcmin) / 60.0 + self.dip_deg(altitude_m)
    }

    /// Target altitude of the Moon's centre in degrees for a horizontal
    /// parallax `parallax_deg`.
    ///
    /// `h0 = 0.7275 π − refraction − dip`; the 0.7275 factor folds the
    /// lunar semidiameter into the parallax term.
    pub fn moon_target_altitude_deg(&self, parallax_deg: f64, altitude_m: f64) -> f64 {
        0.7275 * parallax_deg - self.refraction_arcmin / 60.0 - self.dip_deg(altitude_m)
    }
}

/// Result of a rise/set computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RiseSetResult {
    /// Event occurs at the given Julian Date (UT).
    Event { jd_ut: f64, event: RiseSetEvent },
    /// Body stays below the horizon all day.
    NeverRises,
    /// Body stays above the horizon all day.
    NeverSets,
    /// The body crosses the horizon, but not within this local day.
    /// Happens roughly once a month for moonrise and moonset.
    NoEventOnDay,
}

impl RiseSetResult {
    pub fn jd_ut(&self) -> Option<f64> {
        match self {
            Self::Event { jd_ut, .. } => Some(*jd_ut),
            _ => None,
        }
    }

    pub fn is_event(&self) -> bool {
        matches!(self, Self::Event { .. })
    }
}

/// Sunrise and sunset for one civil date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunEvents {
    pub sunrise: RiseSetResult,
    pub sunset: RiseSetResult,
}

/// Moonrise and moonset for one civil date; either may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonEvents {
    pub moonrise: RiseSetResult,
    pub moonset: RiseSetResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depression_sea_level() {
        let c = RiseSetConfig::default();
        let d = c.horizon_depression_deg(0.0);
        assert!((d - 50.0 / 60.0).abs() < 1e-12, "sea level: {d}");
    }

    #[test]
    fn depression_1000m() {
        let c = RiseSetConfig::default();
        let d = c.horizon_depression_deg(1000.0);
        let base = 50.0 / 60.0;
        // sqrt(2*1000/6371000) rad ≈ 1.015 deg
        assert!(d > base + 0.9 && d < base + 1.2, "1000m depression {d}");
    }

    #[test]
    fn depression_no_altitude_correction() {
        let c = RiseSetConfig {
            altitude_correction: false,
            ..Default::default()
        };
        assert!((c.horizon_depression_deg(10_000.0) - 50.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn moon_target_altitude_mean_distance() {
        // Mean horizontal parallax ~57′ gives h0 ≈ +0.125°
        let c = RiseSetConfig::default();
        let h0 = c.moon_target_altitude_deg(57.0 / 60.0, 0.0);
        assert!((h0 - 0.1245).abs() < 0.01, "h0 = {h0}");
    }

    #[test]
    fn event_bodies() {
        assert_eq!(RiseSetEvent::Sunrise.body(), Body::Sun);
        assert_eq!(RiseSetEvent::Moonset.body(), Body::Moon);
        assert!(RiseSetEvent::Moonrise.is_rising());
        assert!(!RiseSetEvent::Sunset.is_rising());
    }

    #[test]
    fn result_accessors() {
        let e = RiseSetResult::Event {
            jd_ut: 2_451_545.2,
            event: RiseSetEvent::Sunrise,
        };
        assert_eq!(e.jd_ut(), Some(2_451_545.2));
        assert!(RiseSetResult::NoEventOnDay.jd_ut().is_none());
        assert!(!RiseSetResult::NeverSets.is_event());
    }
}
