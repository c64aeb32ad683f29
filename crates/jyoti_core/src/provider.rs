//! The injected precise-ephemeris capability.
//!
//! The engine never links a native ephemeris itself. A host that has one
//! (a Swiss-Ephemeris binding, a JPL kernel reader, a remote service)
//! implements [`PrecisePositionProvider`] and hands it to the engine.

use std::fmt::{Display, Formatter};
use std::ops::BitOr;
use std::path::Path;

/// Computation flags passed through to the provider.
///
/// Bit values follow the conventional native-ephemeris numbering so a thin
/// binding can forward them unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CalcFlags(u32);

impl CalcFlags {
    pub const NONE: Self = Self(0);
    /// Geometric rather than apparent position (no light-time, no aberration).
    pub const TRUE_POSITION: Self = Self(16);
    /// Include daily motion in the result.
    pub const SPEED: Self = Self(256);
    /// Equatorial instead of ecliptic coordinates.
    pub const EQUATORIAL: Self = Self(2048);
    /// Topocentric instead of geocentric.
    pub const TOPOCENTRIC: Self = Self(32 * 1024);
    /// Sidereal zodiac. The engine never sets this; ayanamsha is applied on its side.
    pub const SIDEREAL: Self = Self(64 * 1024);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for CalcFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Structured failure reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The capability is missing (library not loaded, data files absent).
    Unavailable(String),
    /// The provider ran and reported an error.
    Failed { code: i32, message: String },
    /// The provider gave up on its own deadline.
    Timeout,
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "provider unavailable: {msg}"),
            Self::Failed { code, message } => write!(f, "provider failed ({code}): {message}"),
            Self::Timeout => f.write_str("provider timed out"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// A source of raw geocentric positions.
///
/// `compute` returns `[lon, lat, dist, lon_speed, lat_speed?, dist_speed?]`
/// in degrees, AU and degrees (or AU) per day. It may block; the engine
/// always calls it from a worker thread under a timeout.
pub trait PrecisePositionProvider: Send + Sync {
    fn compute(&self, jd_ut: f64, body_code: i32, flags: CalcFlags)
    -> Result<Vec<f64>, ProviderError>;

    /// Location of the provider's data files, for diagnostics.
    fn ephemeris_path(&self) -> Option<&Path> {
        None
    }
}
