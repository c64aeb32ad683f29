//! Precise-first position source with analytic fallback.

use jyoti_time::Instant;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analytic::AnalyticSource;
use crate::body::Body;
use crate::breaker::{BreakerConfig, CircuitBreaker};
use crate::error::CalculationError;
use crate::location::GeoLocation;
use crate::position::{BodyPosition, PositionTier};
use crate::precise::PreciseSource;
use crate::source::{PositionOptions, PositionSource};

/// How strictly the precise provider is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrecisionLevel {
    /// Precise failures surface as errors.
    RequirePrecise,
    /// Use the precise provider when it works, otherwise fall back.
    #[default]
    PreferPrecise,
    /// Never call the precise provider.
    AnalyticOnly,
}

/// Selects between a precise and an analytic source per request.
#[derive(Debug)]
pub struct ResilientSource {
    precise: Option<PreciseSource>,
    analytic: AnalyticSource,
    level: PrecisionLevel,
    breaker: CircuitBreaker,
}

impl ResilientSource {
    pub fn new(
        precise: Option<PreciseSource>,
        options: PositionOptions,
        level: PrecisionLevel,
        breaker: BreakerConfig,
    ) -> Self {
        Self {
            precise,
            analytic: AnalyticSource::new(options),
            level,
            breaker: CircuitBreaker::new(breaker),
        }
    }

    /// A source with no precise provider at all.
    pub fn analytic_only(options: PositionOptions) -> Self {
        Self::new(
            None,
            options,
            PrecisionLevel::AnalyticOnly,
            BreakerConfig::default(),
        )
    }

    pub fn level(&self) -> PrecisionLevel {
        self.level
    }

    pub fn has_precise(&self) -> bool {
        self.precise.is_some()
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    pub fn analytic(&self) -> &AnalyticSource {
        &self.analytic
    }

    fn fallback(
        &self,
        body: Body,
        instant: &Instant,
        location: Option<&GeoLocation>,
    ) -> Result<BodyPosition, CalculationError> {
        self.analytic
            .position(body, instant, location)
            .map(|p| p.with_tier(PositionTier::Fallback))
    }
}

impl PositionSource for ResilientSource {
    fn position(
        &self,
        body: Body,
        instant: &Instant,
        location: Option<&GeoLocation>,
    ) -> Result<BodyPosition, CalculationError> {
        let location = location.map(|l| l.validated()).transpose()?;
        let location = location.as_ref();
        let precise = match (self.level, &self.precise) {
            (PrecisionLevel::AnalyticOnly, _) | (PrecisionLevel::PreferPrecise, None) => {
                return self.fallback(body, instant, location);
            }
            (PrecisionLevel::RequirePrecise, None) => {
                return Err(CalculationError::SourceUnavailable(
                    "precise positions required but no provider is configured".into(),
                ));
            }
            (_, Some(p)) => p,
        };

        if !self.breaker.allow() {
            if self.level == PrecisionLevel::RequirePrecise {
                return Err(CalculationError::SourceUnavailable(
                    "precise provider suspended after repeated failures".into(),
                ));
            }
            debug!(%body, "precise provider suspended, using analytic model");
            return self.fallback(body, instant, location);
        }

        match precise.position(body, instant, location) {
            Ok(p) => {
                self.breaker.record_success();
                Ok(p)
            }
            Err(e) if !e.is_recoverable() => {
                // Bad input says nothing about provider health.
                self.breaker.release_trial();
                Err(e)
            }
            Err(e) => {
                self.breaker.record_failure();
                if self.level == PrecisionLevel::RequirePrecise {
                    return Err(e);
                }
                warn!(%body, %instant, error = %e, "precise provider failed, degrading to analytic model");
                self.fallback(body, instant, location)
            }
        }
    }

    fn tier(&self) -> PositionTier {
        match (self.level, &self.precise) {
            (PrecisionLevel::AnalyticOnly, _) | (_, None) => PositionTier::Fallback,
            _ => PositionTier::Precise,
        }
    }

    fn name(&self) -> &'static str {
        "resilient"
    }
}
