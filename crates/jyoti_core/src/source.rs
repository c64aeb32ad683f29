//! The position-source strategy trait.

use jyoti_time::Instant;

use crate::body::{Body, NodeMode};
use crate::error::CalculationError;
use crate::location::GeoLocation;
use crate::position::{BodyPosition, PositionTier};

/// Settings every source honors the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PositionOptions {
    pub node_mode: NodeMode,
    /// Apply parallax for the observer when a location is given.
    pub topocentric: bool,
}

/// Anything that can position a body at an instant.
pub trait PositionSource: Send + Sync {
    /// Apparent tropical ecliptic position of date.
    ///
    /// `location` is only used for topocentric output; geocentric results
    /// ignore it.
    fn position(
        &self,
        body: Body,
        instant: &Instant,
        location: Option<&GeoLocation>,
    ) -> Result<BodyPosition, CalculationError>;

    /// Tier this source reports when it succeeds on its own.
    fn tier(&self) -> PositionTier;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
