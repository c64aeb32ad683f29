//! Calculation settings and operational options.

use std::time::Duration;

use jyoti_core::{BreakerConfig, NodeMode, PositionOptions, PrecisionLevel};
use jyoti_search::CalendarVariant;
use jyoti_vedic_base::{
    AyanamshaSystem, DEFAULT_DASHA_LEVEL, DashaConfig, DashaYear, HouseSystem, MAX_DASHA_LEVEL,
    NadiException,
};
use serde::{Deserialize, Serialize};

use crate::error::JyotiError;

/// Everything that changes the value of a result.
///
/// Part of every cache key. Build a new value to change a setting; the
/// facade never mutates the one it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AstrologyConfig {
    pub ayanamsha: AyanamshaSystem,
    pub house_system: HouseSystem,
    pub precision: PrecisionLevel,
    /// Whether an injected precise provider may be used at all.
    pub native_source_enabled: bool,
    pub node_mode: NodeMode,
    pub topocentric: bool,
    pub dasha_year: DashaYear,
    /// Deepest dasha level kept in a timeline (0 = mahadashas only).
    pub dasha_levels: u8,
    pub nadi_exception: NadiException,
    pub calendar_variant: CalendarVariant,
}

impl Default for AstrologyConfig {
    fn default() -> Self {
        Self {
            ayanamsha: AyanamshaSystem::default(),
            house_system: HouseSystem::default(),
            precision: PrecisionLevel::default(),
            native_source_enabled: true,
            node_mode: NodeMode::default(),
            topocentric: false,
            dasha_year: DashaYear::default(),
            dasha_levels: DEFAULT_DASHA_LEVEL,
            nadi_exception: NadiException::default(),
            calendar_variant: CalendarVariant::default(),
        }
    }
}

impl AstrologyConfig {
    pub fn with_ayanamsha(self, ayanamsha: AyanamshaSystem) -> Self {
        Self { ayanamsha, ..self }
    }

    pub fn with_house_system(self, house_system: HouseSystem) -> Self {
        Self {
            house_system,
            ..self
        }
    }

    pub fn with_precision(self, precision: PrecisionLevel) -> Self {
        Self { precision, ..self }
    }

    pub fn with_native_source(self, enabled: bool) -> Self {
        Self {
            native_source_enabled: enabled,
            ..self
        }
    }

    pub fn with_node_mode(self, node_mode: NodeMode) -> Self {
        Self { node_mode, ..self }
    }

    pub fn with_topocentric(self, topocentric: bool) -> Self {
        Self {
            topocentric,
            ..self
        }
    }

    pub fn with_dasha_year(self, dasha_year: DashaYear) -> Self {
        Self { dasha_year, ..self }
    }

    pub fn with_dasha_levels(self, dasha_levels: u8) -> Self {
        Self {
            dasha_levels,
            ..self
        }
    }

    pub fn with_nadi_exception(self, nadi_exception: NadiException) -> Self {
        Self {
            nadi_exception,
            ..self
        }
    }

    pub fn with_calendar_variant(self, calendar_variant: CalendarVariant) -> Self {
        Self {
            calendar_variant,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), JyotiError> {
        if self.dasha_levels > MAX_DASHA_LEVEL {
            return Err(JyotiError::Config(format!(
                "dasha_levels must be at most {MAX_DASHA_LEVEL}, got {}",
                self.dasha_levels
            )));
        }
        if self.precision == PrecisionLevel::RequirePrecise && !self.native_source_enabled {
            return Err(JyotiError::Config(
                "RequirePrecise needs native_source_enabled".into(),
            ));
        }
        Ok(())
    }

    pub fn position_options(&self) -> PositionOptions {
        PositionOptions {
            node_mode: self.node_mode,
            topocentric: self.topocentric,
        }
    }

    pub fn dasha_config(&self) -> DashaConfig {
        DashaConfig {
            year: self.dasha_year,
            max_level: self.dasha_levels,
        }
    }
}

/// Operational settings. None of these change a result, only how it is
/// obtained and how long it is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Maximum cached results per operation.
    pub cache_capacity: usize,
    /// Age after which a cached result is recomputed.
    pub cache_ttl: Duration,
    /// Budget for one precise provider call.
    pub provider_timeout: Duration,
    /// Extra attempts after a provider timeout.
    pub provider_max_retries: u32,
    /// Consecutive precise failures before the provider is suspended.
    pub breaker_threshold: u32,
    pub breaker_cooldown: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            cache_capacity: 256,
            cache_ttl: Duration::from_secs(600),
            provider_timeout: Duration::from_millis(500),
            provider_max_retries: 1,
            breaker_threshold: 3,
            breaker_cooldown: Duration::from_secs(30),
        }
    }
}

impl EngineOptions {
    pub fn validate(&self) -> Result<(), JyotiError> {
        if self.cache_capacity == 0 {
            return Err(JyotiError::Config(
                "cache_capacity must be greater than zero".into(),
            ));
        }
        if self.cache_ttl.is_zero() {
            return Err(JyotiError::Config(
                "cache_ttl must be greater than zero".into(),
            ));
        }
        if self.provider_timeout.is_zero() {
            return Err(JyotiError::Config(
                "provider_timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn breaker_config(&self) -> BreakerConfig {
        BreakerConfig {
            failure_threshold: self.breaker_threshold,
            cooldown: self.breaker_cooldown,
        }
    }
}
