//! The engine facade: one explicitly constructed entry point that wires a
//! position source to the Vedic calculators and memoizes their results.

use std::num::NonZeroUsize;
use std::sync::Arc;

use jyoti_core::{
    ALL_BODIES, Body, BodyPosition, GeoLocation, PositionSource, PreciseSettings, PreciseSource,
    PrecisePositionProvider, PrecisionLevel, ResilientSource,
};
use jyoti_search::{
    CalendarDay, CalendarVariant, FestivalOccurrence, FestivalRule, SearchContext,
    builtin_festivals, calendar_day, festivals_in_year,
};
use jyoti_time::{CivilDate, Instant};
use jyoti_vedic_base::{
    CompatibilityResult, DashaSnapshot, DashaTimeline, HouseSet, MoonChart, ayanamsha_deg,
    classify, houses, match_charts, to_sidereal, vimshottari,
};
use tracing::info;

use crate::chart::{Chart, Placement};
use crate::config::{AstrologyConfig, EngineOptions};
use crate::error::JyotiError;
use crate::memo::{MemoStats, Memoizer};

/// Memoized operation families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Position,
    Houses,
    Dasha,
    CalendarDay,
    Festivals,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Subject {
    Whole,
    Body(Body),
    Date(CivilDate),
    Year(i32, CalendarVariant),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    operation: Operation,
    subject: Subject,
    instant: Option<u64>,
    location: Option<[u64; 3]>,
    config: AstrologyConfig,
}

type Memo<V> = Memoizer<CacheKey, V, JyotiError>;

/// Entry point for every calculation.
///
/// Construct one per process (or per test) and share it by reference; all
/// methods take `&self` and are safe to call from many threads.
#[derive(Debug)]
pub struct EngineFacade {
    config: AstrologyConfig,
    options: EngineOptions,
    source: ResilientSource,
    rules: Vec<FestivalRule>,
    positions: Memo<BodyPosition>,
    houses: Memo<HouseSet>,
    dashas: Memo<Arc<DashaTimeline>>,
    days: Memo<CalendarDay>,
    festivals: Memo<Arc<Vec<FestivalOccurrence>>>,
}

impl EngineFacade {
    /// Validate `config` and `options` and build the position source.
    ///
    /// `provider` is used only when `config.native_source_enabled` is set
    /// and the precision level is not `AnalyticOnly`.
    pub fn new(
        config: AstrologyConfig,
        options: EngineOptions,
        provider: Option<Arc<dyn PrecisePositionProvider>>,
    ) -> Result<Self, JyotiError> {
        config.validate()?;
        options.validate()?;
        let capacity = NonZeroUsize::new(options.cache_capacity).ok_or_else(|| {
            JyotiError::Config("cache_capacity must be greater than zero".into())
        })?;

        let position_options = config.position_options();
        let source = if !config.native_source_enabled
            || config.precision == PrecisionLevel::AnalyticOnly
        {
            ResilientSource::analytic_only(position_options)
        } else {
            let precise = provider
                .map(|p| {
                    PreciseSource::spawn(
                        p,
                        PreciseSettings {
                            timeout: options.provider_timeout,
                            max_retries: options.provider_max_retries,
                            options: position_options,
                        },
                    )
                })
                .transpose()?;
            ResilientSource::new(
                precise,
                position_options,
                config.precision,
                options.breaker_config(),
            )
        };

        info!(
            ayanamsha = ?config.ayanamsha,
            houses = ?config.house_system,
            precision = ?source.level(),
            precise = source.has_precise(),
            cache_capacity = options.cache_capacity,
            "engine facade ready"
        );

        let ttl = options.cache_ttl;
        Ok(Self {
            config,
            options,
            source,
            rules: builtin_festivals(),
            positions: Memoizer::new("positions", capacity, ttl),
            houses: Memoizer::new("houses", capacity, ttl),
            dashas: Memoizer::new("dashas", capacity, ttl),
            days: Memoizer::new("calendar days", capacity, ttl),
            festivals: Memoizer::new("festivals", capacity, ttl),
        })
    }

    /// Facade over the analytic model only, with default options.
    pub fn analytic(config: AstrologyConfig) -> Result<Self, JyotiError> {
        Self::new(config, EngineOptions::default(), None)
    }

    /// Replace the festival rules used by [`day`](Self::day) and
    /// [`festivals`](Self::festivals).
    pub fn with_festival_rules(mut self, rules: Vec<FestivalRule>) -> Result<Self, JyotiError> {
        for rule in &rules {
            rule.validate()?;
        }
        self.rules = rules;
        self.days.clear();
        self.festivals.clear();
        Ok(self)
    }

    pub fn config(&self) -> &AstrologyConfig {
        &self.config
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn source(&self) -> &ResilientSource {
        &self.source
    }

    pub fn festival_rules(&self) -> &[FestivalRule] {
        &self.rules
    }

    pub fn cache_stats(&self, operation: Operation) -> MemoStats {
        match operation {
            Operation::Position => self.positions.stats(),
            Operation::Houses => self.houses.stats(),
            Operation::Dasha => self.dashas.stats(),
            Operation::CalendarDay => self.days.stats(),
            Operation::Festivals => self.festivals.stats(),
        }
    }

    pub fn clear_caches(&self) {
        self.positions.clear();
        self.houses.clear();
        self.dashas.clear();
        self.days.clear();
        self.festivals.clear();
    }

    fn key(
        &self,
        operation: Operation,
        subject: Subject,
        instant: Option<&Instant>,
        location: Option<&GeoLocation>,
    ) -> CacheKey {
        CacheKey {
            operation,
            subject,
            instant: instant.map(Instant::key_bits),
            location: location.map(GeoLocation::key_bits),
            config: self.config,
        }
    }

    /// Location that affects a position: only topocentric results depend
    /// on the observer.
    fn observer<'a>(&self, location: Option<&'a GeoLocation>) -> Option<&'a GeoLocation> {
        location.filter(|_| self.config.topocentric)
    }

    // -----------------------------------------------------------------
    // Positions and charts
    // -----------------------------------------------------------------

    /// Apparent tropical position, tagged with the tier that produced it.
    pub fn position(
        &self,
        body: Body,
        instant: &Instant,
        location: Option<&GeoLocation>,
    ) -> Result<BodyPosition, JyotiError> {
        let observer = self.observer(location);
        let key = self.key(Operation::Position, Subject::Body(body), Some(instant), observer);
        self.positions.get_or_compute(key, || {
            Ok(self.source.position(body, instant, observer)?)
        })
    }

    pub fn ayanamsha_deg(&self, instant: &Instant) -> f64 {
        ayanamsha_deg(self.config.ayanamsha, instant)
    }

    /// Sidereal longitude and classification of `body`.
    pub fn placement(
        &self,
        body: Body,
        instant: &Instant,
        location: Option<&GeoLocation>,
    ) -> Result<Placement, JyotiError> {
        let position = self.position(body, instant, location)?;
        let sidereal = to_sidereal(position.longitude_deg, self.config.ayanamsha, instant)?;
        Ok(Placement {
            position,
            sidereal_longitude_deg: sidereal,
            classification: classify(sidereal)?,
        })
    }

    /// Houses in the sidereal zodiac for the configured house system.
    pub fn houses(&self, instant: &Instant, location: &GeoLocation) -> Result<HouseSet, JyotiError> {
        let key = self.key(Operation::Houses, Subject::Whole, Some(instant), Some(location));
        self.houses.get_or_compute(key, || {
            let tropical = houses(instant, location, self.config.house_system)?;
            Ok(tropical.to_sidereal(self.ayanamsha_deg(instant)))
        })
    }

    /// Every body plus the houses.
    pub fn chart(&self, instant: &Instant, location: &GeoLocation) -> Result<Chart, JyotiError> {
        let location = location.validated()?;
        let houses = self.houses(instant, &location)?;
        let placements = ALL_BODIES
            .iter()
            .map(|&body| self.placement(body, instant, Some(&location)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Chart {
            instant: *instant,
            location,
            ayanamsha: self.config.ayanamsha,
            ayanamsha_deg: self.ayanamsha_deg(instant),
            placements,
            houses,
        })
    }

    // -----------------------------------------------------------------
    // Dasha and compatibility
    // -----------------------------------------------------------------

    /// Birth Moon rashi, nakshatra and pada.
    pub fn moon_chart(
        &self,
        birth: &Instant,
        location: Option<&GeoLocation>,
    ) -> Result<MoonChart, JyotiError> {
        let moon = self.placement(Body::Moon, birth, location)?;
        Ok(MoonChart::from_sidereal_longitude(moon.sidereal_longitude_deg)?)
    }

    /// Vimshottari timeline from the birth Moon.
    pub fn dasha(
        &self,
        birth: &Instant,
        location: Option<&GeoLocation>,
    ) -> Result<Arc<DashaTimeline>, JyotiError> {
        let observer = self.observer(location);
        let key = self.key(Operation::Dasha, Subject::Whole, Some(birth), observer);
        self.dashas.get_or_compute(key, || {
            let moon = self.placement(Body::Moon, birth, observer)?;
            let timeline = vimshottari(
                birth.jd_ut(),
                moon.sidereal_longitude_deg,
                &self.config.dasha_config(),
            )?;
            Ok(Arc::new(timeline))
        })
    }

    /// Periods active at `as_of`, down to the configured dasha level.
    pub fn current_dasha(
        &self,
        birth: &Instant,
        location: Option<&GeoLocation>,
        as_of: &Instant,
    ) -> Result<DashaSnapshot, JyotiError> {
        let timeline = self.dasha(birth, location)?;
        Ok(timeline.current_period(as_of.jd_ut(), self.config.dasha_levels)?)
    }

    /// Ashta Koota score of a bride and groom, under the configured Nadi
    /// exception.
    pub fn compatibility(&self, bride: &MoonChart, groom: &MoonChart) -> CompatibilityResult {
        match_charts(bride, groom, self.config.nadi_exception)
    }

    /// Compatibility from two birth instants.
    pub fn compatibility_of_births(
        &self,
        bride: (&Instant, Option<&GeoLocation>),
        groom: (&Instant, Option<&GeoLocation>),
    ) -> Result<CompatibilityResult, JyotiError> {
        let bride = self.moon_chart(bride.0, bride.1)?;
        let groom = self.moon_chart(groom.0, groom.1)?;
        Ok(self.compatibility(&bride, &groom))
    }

    // -----------------------------------------------------------------
    // Calendar
    // -----------------------------------------------------------------

    fn search_context(&self) -> SearchContext<'_> {
        SearchContext::new(&self.source, self.config.ayanamsha)
    }

    /// Panchang and festivals of `date` at a sea-level location, under the
    /// configured calendar variant.
    pub fn day(
        &self,
        date: CivilDate,
        latitude_deg: f64,
        longitude_deg: f64,
    ) -> Result<CalendarDay, JyotiError> {
        self.day_at(date, &GeoLocation::new(latitude_deg, longitude_deg, 0.0))
    }

    pub fn day_at(&self, date: CivilDate, location: &GeoLocation) -> Result<CalendarDay, JyotiError> {
        let location = location.validated()?;
        let key = self.key(Operation::CalendarDay, Subject::Date(date), None, Some(&location));
        self.days.get_or_compute(key, || {
            let ctx = self.search_context();
            Ok(calendar_day(
                &ctx,
                date,
                &location,
                &self.config.calendar_variant,
                &self.rules,
            )?)
        })
    }

    /// Festival occurrences dated in `year` under `variant`.
    pub fn festivals(
        &self,
        year: i32,
        latitude_deg: f64,
        longitude_deg: f64,
        variant: &CalendarVariant,
    ) -> Result<Arc<Vec<FestivalOccurrence>>, JyotiError> {
        let location = GeoLocation::new(latitude_deg, longitude_deg, 0.0).validated()?;
        let key = self.key(
            Operation::Festivals,
            Subject::Year(year, *variant),
            None,
            Some(&location),
        );
        self.festivals.get_or_compute(key, || {
            let ctx = self.search_context();
            let found = festivals_in_year(&ctx, year, &location, variant, &self.rules)?;
            Ok(Arc::new(found))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jyoti_core::PositionTier;

    fn instant() -> Instant {
        Instant::new(2000, 1, 1, 12, 0, 0.0).unwrap()
    }

    #[test]
    fn rejects_invalid_options() {
        let options = EngineOptions {
            cache_capacity: 0,
            ..Default::default()
        };
        let err = EngineFacade::new(AstrologyConfig::default(), options, None).unwrap_err();
        assert!(matches!(err, JyotiError::Config(_)));
    }

    #[test]
    fn positions_are_memoized() {
        let engine = EngineFacade::analytic(AstrologyConfig::default()).unwrap();
        let a = engine.position(Body::Sun, &instant(), None).unwrap();
        let b = engine.position(Body::Sun, &instant(), None).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.tier, PositionTier::Fallback);
        let stats = engine.cache_stats(Operation::Position);
        assert_eq!((stats.hits, stats.computations), (1, 1));
    }

    #[test]
    fn geocentric_positions_ignore_location() {
        let engine = EngineFacade::analytic(AstrologyConfig::default()).unwrap();
        let delhi = GeoLocation::new(28.6139, 77.2090, 0.0);
        let a = engine.position(Body::Moon, &instant(), Some(&delhi)).unwrap();
        let b = engine.position(Body::Moon, &instant(), None).unwrap();
        assert_eq!(a, b);
        assert_eq!(engine.cache_stats(Operation::Position).computations, 1);
    }

    #[test]
    fn topocentric_positions_are_keyed_by_location() {
        let engine =
            EngineFacade::analytic(AstrologyConfig::default().with_topocentric(true)).unwrap();
        let delhi = GeoLocation::new(28.6139, 77.2090, 0.0);
        let quito = GeoLocation::new(-0.18, -78.47, 2850.0);
        let a = engine.position(Body::Moon, &instant(), Some(&delhi)).unwrap();
        let b = engine.position(Body::Moon, &instant(), Some(&quito)).unwrap();
        assert!((a.longitude_deg - b.longitude_deg).abs() > 1e-4);
        assert_eq!(engine.cache_stats(Operation::Position).computations, 2);
    }

    #[test]
    fn clear_caches_forces_recompute() {
        let engine = EngineFacade::analytic(AstrologyConfig::default()).unwrap();
        engine.position(Body::Mars, &instant(), None).unwrap();
        engine.clear_caches();
        engine.position(Body::Mars, &instant(), None).unwrap();
        assert_eq!(engine.cache_stats(Operation::Position).computations, 2);
    }

    #[test]
    fn rejects_invalid_rules() {
        let engine = EngineFacade::analytic(AstrologyConfig::default()).unwrap();
        let bad = FestivalRule::lunar(
            "",
            jyoti_vedic_base::Masa::Chaitra,
            jyoti_vedic_base::Paksha::Shukla,
            1,
        );
        assert!(engine.with_festival_rules(vec![bad]).is_err());
    }
}
