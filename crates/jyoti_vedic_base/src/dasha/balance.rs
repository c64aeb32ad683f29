//! Birth balance: how much of the birth nakshatra's period remains.

use serde::{Deserialize, Serialize};

use crate::classify::nakshatra_from_longitude;
use crate::error::VedicError;
use crate::graha::Graha;
use crate::nakshatra::Nakshatra;

/// Where the Moon stood inside its nakshatra at birth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthBalance {
    pub nakshatra: Nakshatra,
    /// Lord of the birth nakshatra, which rules the first mahadasha.
    pub lord: Graha,
    /// Fraction of the nakshatra already traversed, [0, 1).
    pub elapsed_fraction: f64,
}

impl BirthBalance {
    /// Fraction of the birth lord's period still to run.
    pub fn remaining_fraction(&self) -> f64 {
        1.0 - self.elapsed_fraction
    }
}

/// Birth balance from the Moon's sidereal longitude.
pub fn birth_balance(moon_sidereal_lon: f64) -> Result<BirthBalance, VedicError> {
    let info = nakshatra_from_longitude(moon_sidereal_lon)?;
    Ok(BirthBalance {
        nakshatra: info.nakshatra,
        lord: info.nakshatra.lord(),
        elapsed_fraction: info.elapsed_fraction(),
    })
}
