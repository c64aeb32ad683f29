//! Error type for the facade.

use std::error::Error;
use std::fmt::{Display, Formatter};

use jyoti_core::{CalculationError, ErrorKind};
use jyoti_search::SearchError;
use jyoti_time::TimeError;
use jyoti_vedic_base::VedicError;

/// Errors surfaced by [`EngineFacade`](crate::EngineFacade).
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum JyotiError {
    /// Invalid `AstrologyConfig` or `EngineOptions`.
    Config(String),
    Position(CalculationError),
    Vedic(VedicError),
    Search(SearchError),
    Time(TimeError),
}

impl JyotiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) | Self::Time(_) => ErrorKind::Validation,
            Self::Position(e) => e.kind(),
            Self::Vedic(e) => e.kind(),
            Self::Search(e) => e.kind(),
        }
    }
}

impl Display for JyotiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Position(e) => write!(f, "position error: {e}"),
            Self::Vedic(e) => write!(f, "{e}"),
            Self::Search(e) => write!(f, "{e}"),
            Self::Time(e) => write!(f, "time error: {e}"),
        }
    }
}

impl Error for JyotiError {}

impl From<CalculationError> for JyotiError {
    fn from(e: CalculationError) -> Self {
        Self::Position(e)
    }
}

impl From<VedicError> for JyotiError {
    fn from(e: VedicError) -> Self {
        Self::Vedic(e)
    }
}

impl From<SearchError> for JyotiError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<TimeError> for JyotiError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}
