//! Observer location on the Earth's surface.

use serde::{Deserialize, Serialize};

use crate::error::CalculationError;

/// Geographic location, geodetic latitude and east-positive longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
    /// Altitude above mean sea level in meters.
    pub altitude_m: f64,
}

impl GeoLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
        }
    }

    /// Return the location if every field is finite and in range.
    pub fn validated(self) -> Result<Self, CalculationError> {
        self.validate()?;
        Ok(self)
    }

    /// Check ranges and finiteness.
    pub fn validate(&self) -> Result<(), CalculationError> {
        if !self.latitude_deg.is_finite() || !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(CalculationError::Validation(format!(
                "latitude {} outside [-90, 90]",
                self.latitude_deg
            )));
        }
        if !self.longitude_deg.is_finite() || !(-180.0..=180.0).contains(&self.longitude_deg) {
            return Err(CalculationError::Validation(format!(
                "longitude {} outside [-180, 180]",
                self.longitude_deg
            )));
        }
        if !self.altitude_m.is_finite() || !(-500.0..=10_000.0).contains(&self.altitude_m) {
            return Err(CalculationError::Validation(format!(
                "altitude {} m outside [-500, 10000]",
                self.altitude_m
            )));
        }
        Ok(())
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    /// Bit patterns of the three fields, for cache keys.
    pub fn key_bits(&self) -> [u64; 3] {
        [
            self.latitude_deg.to_bits(),
            self.longitude_deg.to_bits(),
            self.altitude_m.to_bits(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_sites() {
        assert!(GeoLocation::new(28.6139, 77.2090, 216.0).validate().is_ok());
        assert!(GeoLocation::new(-90.0, 180.0, 0.0).validate().is_ok());
        let loc = GeoLocation::new(51.5, -0.1, 11.0).validated().unwrap();
        assert_eq!(loc.longitude_deg, -0.1);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(GeoLocation::new(91.0, 0.0, 0.0).validate().is_err());
        assert!(GeoLocation::new(0.0, -181.0, 0.0).validate().is_err());
        assert!(GeoLocation::new(f64::NAN, 0.0, 0.0).validate().is_err());
        assert!(GeoLocation::new(0.0, 0.0, 20_000.0).validate().is_err());
    }
}
