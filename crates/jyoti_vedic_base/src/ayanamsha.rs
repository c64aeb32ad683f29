//! Ayanamsha computation for 16 sidereal reference systems.
//!
//! The ayanamsha is the angular offset between the tropical zodiac (defined
//! by the vernal equinox) and a sidereal zodiac (anchored to fixed stars).
//! As the equinox precesses westward, the ayanamsha increases over time.
//!
//! Each system is defined by its J2000.0 reference value. The ayanamsha at
//! any epoch is that reference plus the IAU 2006 general precession in
//! longitude; the true-equinox variant also adds nutation in longitude.

use jyoti_frames::{general_precession_longitude_deg, normalize_deg, nutation};
use jyoti_time::{Instant, jd_to_centuries};
use serde::{Deserialize, Serialize};

use crate::error::VedicError;

/// Sidereal reference systems for ayanamsha computation.
///
/// Each variant defines a different convention for anchoring the sidereal
/// zodiac to the fixed stars. The differences reduce to a single parameter:
/// the ayanamsha value at J2000.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AyanamshaSystem {
    /// Lahiri (Chitrapaksha): Spica at 0 Libra sidereal.
    /// Indian government standard (Calendar Reform Committee, 1957).
    #[default]
    Lahiri,

    /// True Lahiri: same anchor as Lahiri, but uses the true
    /// (nutation-corrected) equinox instead of the mean equinox.
    TrueLahiri,

    /// Krishnamurti Paddhati (KP): minimal offset from Lahiri.
    Krishnamurti,

    /// B.V. Raman: from "Hindu Predictive Astrology".
    /// Zero ayanamsha year approximately 397 CE.
    Raman,

    /// Fagan-Bradley: primary Western sidereal system.
    FaganBradley,

    /// Sri Yukteshwar: from "The Holy Science" (1894).
    Yukteshwar,

    /// J.N. Bhasin.
    JnBhasin,

    /// Robert DeLuce (1930s).
    DeLuce,

    /// Djwal Khul: esoteric astrology (Alice Bailey tradition).
    DjwalKhul,

    /// Usha-Shashi.
    UshaShashi,

    /// Hipparchos: derived from Hipparchus observations (~128 BCE).
    Hipparchos,

    /// Sassanian: Sassanid-era Persian tradition.
    Sassanian,

    /// Aldebaran at 15 deg Taurus sidereal.
    Aldebaran15Tau,

    /// Galactic Center at 0 deg Sagittarius sidereal.
    GalacticCenter0Sag,

    /// Surya Siddhanta, with IAU precession instead of the traditional rate.
    SuryaSiddhanta,

    /// Aryabhata (499 CE epoch).
    Aryabhata,
}

const ALL_SYSTEMS: [AyanamshaSystem; 16] = [
    AyanamshaSystem::Lahiri,
    AyanamshaSystem::TrueLahiri,
    AyanamshaSystem::Krishnamurti,
    AyanamshaSystem::Raman,
    AyanamshaSystem::FaganBradley,
    AyanamshaSystem::Yukteshwar,
    AyanamshaSystem::JnBhasin,
    AyanamshaSystem::DeLuce,
    AyanamshaSystem::DjwalKhul,
    AyanamshaSystem::UshaShashi,
    AyanamshaSystem::Hipparchos,
    AyanamshaSystem::Sassanian,
    AyanamshaSystem::Aldebaran15Tau,
    AyanamshaSystem::GalacticCenter0Sag,
    AyanamshaSystem::SuryaSiddhanta,
    AyanamshaSystem::Aryabhata,
];

impl AyanamshaSystem {
    /// Reference ayanamsha at J2000.0 in degrees.
    pub const fn reference_j2000_deg(self) -> f64 {
        match self {
            // Spica at 0 deg Libra sidereal
            Self::Lahiri => 23.853,
            // Same anchor as Lahiri; nutation applied separately
            Self::TrueLahiri => 23.853,
            Self::Krishnamurti => 23.850,
            // zero year ~397 CE
            Self::Raman => 22.370,
            // SVP calibration
            Self::FaganBradley => 24.736,
            Self::Yukteshwar => 22.376,
            Self::JnBhasin => 22.376,
            Self::DeLuce => 21.619,
            Self::DjwalKhul => 22.883,
            Self::UshaShashi => 20.103,
            // Hipparchus ~128 BCE
            Self::Hipparchos => 21.176,
            Self::Sassanian => 19.765,
            Self::Aldebaran15Tau => 24.870,
            Self::GalacticCenter0Sag => 26.860,
            // IAU precession back-computed
            Self::SuryaSiddhanta => 22.459,
            Self::Aryabhata => 20.895,
        }
    }

    /// Sidereal-mode number used by the conventional native ephemeris.
    pub const fn sidereal_mode_code(self) -> i32 {
        match self {
            Self::FaganBradley => 0,
            Self::Lahiri => 1,
            Self::DeLuce => 2,
            Self::Raman => 3,
            Self::UshaShashi => 4,
            Self::Krishnamurti => 5,
            Self::DjwalKhul => 6,
            Self::Yukteshwar => 7,
            Self::JnBhasin => 8,
            Self::Aldebaran15Tau => 14,
            Self::Hipparchos => 15,
            Self::Sassanian => 16,
            Self::GalacticCenter0Sag => 17,
            Self::SuryaSiddhanta => 21,
            Self::Aryabhata => 23,
            Self::TrueLahiri => 27,
        }
    }

    /// Inverse of [`Self::sidereal_mode_code`].
    pub fn from_sidereal_mode_code(code: i32) -> Option<Self> {
        ALL_SYSTEMS
            .iter()
            .copied()
            .find(|s| s.sidereal_mode_code() == code)
    }

    /// Whether this system uses the true (nutation-corrected) equinox.
    ///
    /// Only `TrueLahiri` returns `true`.
    pub const fn uses_true_equinox(self) -> bool {
        matches!(self, Self::TrueLahiri)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Lahiri => "Lahiri",
            Self::TrueLahiri => "True Lahiri",
            Self::Krishnamurti => "Krishnamurti",
            Self::Raman => "Raman",
            Self::FaganBradley => "Fagan-Bradley",
            Self::Yukteshwar => "Yukteshwar",
            Self::JnBhasin => "JN Bhasin",
            Self::DeLuce => "De Luce",
            Self::DjwalKhul => "Djwal Khul",
            Self::UshaShashi => "Usha-Shashi",
            Self::Hipparchos => "Hipparchos",
            Self::Sassanian => "Sassanian",
            Self::Aldebaran15Tau => "Aldebaran 15 Tau",
            Self::GalacticCenter0Sag => "Galactic Center 0 Sag",
            Self::SuryaSiddhanta => "Surya Siddhanta",
            Self::Aryabhata => "Aryabhata",
        }
    }

    /// All 16 defined ayanamsha systems.
    pub const fn all() -> &'static [AyanamshaSystem] {
        &ALL_SYSTEMS
    }
}

impl std::fmt::Display for AyanamshaSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Mean ayanamsha in degrees at `t_centuries` Julian centuries (TT) from J2000.0.
pub fn ayanamsha_mean_deg(system: AyanamshaSystem, t_centuries: f64) -> f64 {
    system.reference_j2000_deg() + general_precession_longitude_deg(t_centuries)
}

/// Ayanamsha for `system` at `t_centuries`, adding Δψ for true-equinox systems.
pub fn ayanamsha_deg_at(system: AyanamshaSystem, t_centuries: f64) -> f64 {
    let mean = ayanamsha_mean_deg(system, t_centuries);
    if system.uses_true_equinox() {
        mean + nutation(t_centuries).longitude_deg
    } else {
        mean
    }
}

/// Ayanamsha for `system` at `instant`.
pub fn ayanamsha_deg(system: AyanamshaSystem, instant: &Instant) -> f64 {
    ayanamsha_deg_at(system, jd_to_centuries(instant.jd_tt()))
}

fn check_longitude(lon: f64) -> Result<(), VedicError> {
    if lon.is_finite() {
        Ok(())
    } else {
        Err(VedicError::Validation(format!(
            "longitude must be finite, got {lon}"
        )))
    }
}

/// Tropical to sidereal longitude, normalized to [0, 360).
pub fn to_sidereal(
    tropical_lon_deg: f64,
    system: AyanamshaSystem,
    instant: &Instant,
) -> Result<f64, VedicError> {
    check_longitude(tropical_lon_deg)?;
    Ok(normalize_deg(tropical_lon_deg - ayanamsha_deg(system, instant)))
}

/// Sidereal to tropical longitude, normalized to [0, 360).
pub fn to_tropical(
    sidereal_lon_deg: f64,
    system: AyanamshaSystem,
    instant: &Instant,
) -> Result<f64, VedicError> {
    check_longitude(sidereal_lon_deg)?;
    Ok(normalize_deg(sidereal_lon_deg + ayanamsha_deg(system, instant)))
}
