//! Natal chart values assembled by the facade.

use jyoti_core::{Body, BodyPosition, GeoLocation, PositionTier};
use jyoti_time::Instant;
use jyoti_vedic_base::{AyanamshaSystem, Classification, HouseSet, MoonChart, VedicError, classify};
use serde::Serialize;

/// One body in the sidereal zodiac.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// Tropical position as the source produced it.
    pub position: BodyPosition,
    pub sidereal_longitude_deg: f64,
    pub classification: Classification,
}

impl Placement {
    pub fn body(&self) -> Body {
        self.position.body
    }

    pub fn tier(&self) -> PositionTier {
        self.position.tier
    }

    pub fn is_retrograde(&self) -> bool {
        self.position.is_retrograde()
    }
}

/// Sidereal placements of every body plus the sidereal houses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub instant: Instant,
    pub location: GeoLocation,
    pub ayanamsha: AyanamshaSystem,
    pub ayanamsha_deg: f64,
    pub placements: Vec<Placement>,
    pub houses: HouseSet,
}

impl Chart {
    pub fn placement(&self, body: Body) -> Option<&Placement> {
        self.placements.iter().find(|p| p.body() == body)
    }

    /// House (1-12) occupied by `body`.
    pub fn house_of(&self, body: Body) -> Option<u8> {
        self.placement(body)
            .map(|p| self.houses.house_of(p.sidereal_longitude_deg))
    }

    /// Rashi, nakshatra and pada of the sidereal ascendant.
    pub fn lagna(&self) -> Result<Classification, VedicError> {
        classify(self.houses.ascendant_deg)
    }

    pub fn moon_chart(&self) -> Option<MoonChart> {
        let moon = self.placement(Body::Moon)?;
        MoonChart::new(
            moon.classification.rashi.rashi,
            moon.classification.nakshatra.nakshatra,
            moon.classification.nakshatra.pada,
        )
        .ok()
    }

    /// `Fallback` if any placement came from the analytic model.
    pub fn tier(&self) -> PositionTier {
        if self
            .placements
            .iter()
            .any(|p| p.tier() == PositionTier::Fallback)
        {
            PositionTier::Fallback
        } else {
            PositionTier::Precise
        }
    }
}
