//! Error types for date/time construction and parsing.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from building or parsing dates and instants.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// A calendar field is out of range (month 13, Feb 30, ...).
    InvalidDate(&'static str),
    /// A clock field is out of range or not finite.
    InvalidTime(&'static str),
    /// Text could not be parsed as an ISO-8601 UTC timestamp or date.
    Parse(String),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(msg) => write!(f, "invalid date: {msg}"),
            Self::InvalidTime(msg) => write!(f, "invalid time: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl Error for TimeError {}
