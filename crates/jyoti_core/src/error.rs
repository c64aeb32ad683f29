//! Error taxonomy shared by every jyoti crate.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use jyoti_time::TimeError;

use crate::provider::ProviderError;

/// Coarse classification of a failure, stable across crate boundaries.
///
/// Every crate's error type maps onto one of these through a `kind()`
/// method so callers can branch on the category without matching on
/// crate-specific variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller supplied an input outside the accepted domain.
    Validation,
    /// An algorithm ran but could not produce a trustworthy result.
    CalculationFailure,
    /// House division is undefined at this latitude.
    PolarUndefined,
    /// A required position source could not be reached.
    SourceUnavailable,
    /// A call exceeded its time budget (after retries).
    Timeout,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Validation => "validation",
            Self::CalculationFailure => "calculation failure",
            Self::PolarUndefined => "polar undefined",
            Self::SourceUnavailable => "source unavailable",
            Self::Timeout => "timeout",
        };
        f.write_str(s)
    }
}

/// Errors from position sources.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CalculationError {
    /// Invalid input (instant, location, body code).
    Validation(String),
    /// The source answered but the answer was unusable.
    Failed(String),
    /// No source could be reached.
    SourceUnavailable(String),
    /// The precise provider did not answer in time.
    Timeout { attempts: u32, timeout_ms: u64 },
}

impl CalculationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Failed(_) => ErrorKind::CalculationFailure,
            Self::SourceUnavailable(_) => ErrorKind::SourceUnavailable,
            Self::Timeout { .. } => ErrorKind::Timeout,
        }
    }

    /// Whether falling back to another source could help.
    ///
    /// Bad input stays bad no matter who computes it.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }
}

impl Display for CalculationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "invalid input: {msg}"),
            Self::Failed(msg) => write!(f, "calculation failed: {msg}"),
            Self::SourceUnavailable(msg) => write!(f, "source unavailable: {msg}"),
            Self::Timeout {
                attempts,
                timeout_ms,
            } => write!(
                f,
                "precise provider timed out after {attempts} attempt(s) of {timeout_ms} ms"
            ),
        }
    }
}

impl Error for CalculationError {}

impl From<TimeError> for CalculationError {
    fn from(e: TimeError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl CalculationError {
    /// Convert a provider failure; `timeout` is the per-call budget the
    /// provider ran under.
    pub fn from_provider(e: ProviderError, timeout: Duration) -> Self {
        match e {
            ProviderError::Unavailable(msg) => Self::SourceUnavailable(msg),
            ProviderError::Failed { code, message } => {
                Self::Failed(format!("provider error {code}: {message}"))
            }
            ProviderError::Timeout => Self::Timeout {
                attempts: 1,
                timeout_ms: timeout.as_millis() as u64,
            },
        }
    }
}
