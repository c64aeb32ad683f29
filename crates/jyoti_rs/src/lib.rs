//! Facade for the jyoti Vedic astrology engine.
//!
//! [`EngineFacade`] is built explicitly from an [`AstrologyConfig`], an
//! [`EngineOptions`] and an optional [`PrecisePositionProvider`]. It
//! selects between the precise provider and the analytic model, and
//! memoizes positions, houses, dasha timelines and calendar days with at
//! most one computation in flight per key.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use jyoti_rs::*;
//!
//! let engine = EngineFacade::analytic(AstrologyConfig::default())?;
//! let birth: Instant = "2000-01-01T12:00:00Z".parse()?;
//! let delhi = GeoLocation::new(28.6139, 77.2090, 0.0);
//! let chart = engine.chart(&birth, &delhi)?;
//! let moon = chart.placement(Body::Moon).unwrap();
//! println!("Moon in {:?} pada {}", moon.classification.nakshatra.nakshatra, moon.classification.pada());
//! ```

pub mod chart;
pub mod config;
pub mod engine;
pub mod error;
pub mod memo;

pub use chart::{Chart, Placement};
pub use config::{AstrologyConfig, EngineOptions};
pub use engine::{EngineFacade, Operation};
pub use error::JyotiError;
pub use memo::{MemoStats, Memoizer};

// Re-export the types that appear in the facade's signatures.
pub use jyoti_core::{
    Body, BodyPosition, CalcFlags, ErrorKind, GeoLocation, NodeMode, PositionTier,
    PrecisePositionProvider, PrecisionLevel, ProviderError,
};
pub use jyoti_search::{
    CalendarDay, CalendarVariant, FestivalOccurrence, FestivalRule, Kala, MonthScheme,
};
pub use jyoti_time::{CivilDate, Instant};
pub use jyoti_vedic_base::{
    AyanamshaSystem, Classification, CompatibilityBand, CompatibilityResult, DashaSnapshot,
    DashaTimeline, DashaYear, HouseSet, HouseSystem, MoonChart, NadiException,
};
