//! Computed body positions.

use serde::{Deserialize, Serialize};

use crate::body::Body;

/// Which tier of source produced a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionTier {
    /// The injected precise provider answered.
    Precise,
    /// The built-in analytic model answered.
    Fallback,
}

/// Apparent ecliptic position of a body, tropical, of date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    /// Ecliptic longitude in degrees, [0, 360).
    pub longitude_deg: f64,
    /// Ecliptic latitude in degrees.
    pub latitude_deg: f64,
    /// Distance in AU. Zero for the lunar nodes.
    pub distance_au: f64,
    /// Longitude speed in degrees per day.
    pub speed_deg_per_day: f64,
    pub tier: PositionTier,
}

impl BodyPosition {
    /// Apparent backward motion in longitude.
    pub fn is_retrograde(&self) -> bool {
        self.speed_deg_per_day < 0.0
    }

    /// Same position re-tagged as coming from another tier.
    pub fn with_tier(self, tier: PositionTier) -> Self {
        Self { tier, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retrograde_follows_speed_sign() {
        let mut p = BodyPosition {
            body: Body::Mercury,
            longitude_deg: 10.0,
            latitude_deg: 0.5,
            distance_au: 0.8,
            speed_deg_per_day: -0.3,
            tier: PositionTier::Precise,
        };
        assert!(p.is_retrograde());
        p.speed_deg_per_day = 1.2;
        assert!(!p.is_retrograde());
        assert_eq!(p.with_tier(PositionTier::Fallback).tier, PositionTier::Fallback);
    }
}
