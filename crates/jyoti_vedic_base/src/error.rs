//! Error types for Vedic calculations.

use std::error::Error;
use std::fmt::{Display, Formatter};

use jyoti_core::{CalculationError, ErrorKind};
use jyoti_time::TimeError;

/// Errors from Vedic base calculations.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum VedicError {
    /// Error from a position source.
    Position(CalculationError),
    /// Error from time construction.
    Time(TimeError),
    /// Input outside the accepted domain (non-finite longitude, bad level, ...).
    Validation(String),
    /// Ascendant, house division or sunrise undefined at this latitude.
    PolarUndefined { system: &'static str, latitude_deg: f64 },
    /// Iterative algorithm did not converge.
    NoConvergence(&'static str),
}

impl VedicError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Position(e) => e.kind(),
            Self::Time(_) | Self::Validation(_) => ErrorKind::Validation,
            Self::PolarUndefined { .. } => ErrorKind::PolarUndefined,
            Self::NoConvergence(_) => ErrorKind::CalculationFailure,
        }
    }
}

impl Display for VedicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Position(e) => write!(f, "position error: {e}"),
            Self::Time(e) => write!(f, "time error: {e}"),
            Self::Validation(msg) => write!(f, "invalid input: {msg}"),
            Self::PolarUndefined {
                system,
                latitude_deg,
            } => write!(
                f,
                "{system} is undefined at latitude {latitude_deg:.4}"
            ),
            Self::NoConvergence(msg) => write!(f, "no convergence: {msg}"),
        }
    }
}

impl Error for VedicError {}

impl From<CalculationError> for VedicError {
    fn from(e: CalculationError) -> Self {
        Self::Position(e)
    }
}

impl From<TimeError> for VedicError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}
