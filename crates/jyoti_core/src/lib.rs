//! Position sources for the jyoti engine.
//!
//! A [`PositionSource`] answers "where is this body at this instant" with an
//! apparent, geocentric (optionally topocentric) tropical ecliptic position
//! of date. Three implementations are provided:
//!
//! - [`PreciseSource`] wraps an external [`PrecisePositionProvider`] on a
//!   dedicated worker thread with a per-call timeout and bounded retries.
//! - [`AnalyticSource`] evaluates built-in series (Meeus solar and lunar
//!   theories, mean orbital elements for the planets). It never fails for a
//!   valid instant.
//! - [`ResilientSource`] combines the two under a [`PrecisionLevel`] policy
//!   and a circuit breaker, tagging every result with the [`PositionTier`]
//!   that actually produced it.

pub mod analytic;
pub mod body;
pub mod breaker;
pub mod error;
pub mod location;
pub mod position;
pub mod precise;
pub mod provider;
pub mod resilient;
pub mod source;
pub mod topocentric;

pub use analytic::AnalyticSource;
pub use body::{ALL_BODIES, Body, NodeMode};
pub use breaker::{BreakerConfig, BreakerState, CircuitBreaker};
pub use error::{CalculationError, ErrorKind};
pub use location::GeoLocation;
pub use position::{BodyPosition, PositionTier};
pub use precise::{PreciseSettings, PreciseSource};
pub use provider::{CalcFlags, PrecisePositionProvider, ProviderError};
pub use resilient::{PrecisionLevel, ResilientSource};
pub use source::{PositionOptions, PositionSource};
