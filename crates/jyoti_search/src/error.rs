//! Error types for calendar searches.

use std::error::Error;
use std::fmt::{Display, Formatter};

use jyoti_core::{CalculationError, ErrorKind};
use jyoti_time::TimeError;
use jyoti_vedic_base::VedicError;

/// Errors from calendar and event search.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    /// Error from a Vedic primitive (rise/set, classification, ...).
    Vedic(VedicError),
    /// Error from a position source.
    Position(CalculationError),
    /// Error from time construction.
    Time(TimeError),
    /// Invalid search parameters.
    Validation(String),
    /// A bracketed root search did not find its event.
    NoConvergence(&'static str),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Vedic(e) => e.kind(),
            Self::Position(e) => e.kind(),
            Self::Time(_) | Self::Validation(_) => ErrorKind::Validation,
            Self::NoConvergence(_) => ErrorKind::CalculationFailure,
        }
    }
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vedic(e) => write!(f, "{e}"),
            Self::Position(e) => write!(f, "position error: {e}"),
            Self::Time(e) => write!(f, "time error: {e}"),
            Self::Validation(msg) => write!(f, "invalid search parameters: {msg}"),
            Self::NoConvergence(msg) => write!(f, "search did not converge: {msg}"),
        }
    }
}

impl Error for SearchError {}

impl From<VedicError> for SearchError {
    fn from(e: VedicError) -> Self {
        Self::Vedic(e)
    }
}

impl From<CalculationError> for SearchError {
    fn from(e: CalculationError) -> Self {
        Self::Position(e)
    }
}

impl From<TimeError> for SearchError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_source() {
        let polar = SearchError::from(VedicError::PolarUndefined {
            system: "Sunrise",
            latitude_deg: 78.2,
        });
        assert_eq!(polar.kind(), ErrorKind::PolarUndefined);
        assert_eq!(
            SearchError::NoConvergence("x").kind(),
            ErrorKind::CalculationFailure
        );
        assert_eq!(
            SearchError::Validation("year".into()).kind(),
            ErrorKind::Validation
        );
    }
}
