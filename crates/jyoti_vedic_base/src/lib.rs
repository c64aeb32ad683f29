//! Vedic calculations built on the position sources.
//!
//! This crate provides:
//! - Ayanamsha computation for 16 sidereal reference systems
//! - Rashi / nakshatra / pada classification of sidereal longitudes
//! - Lagna, MC, Vertex and 13 house systems
//! - Vimshottari dasha timelines with up to five levels
//! - Ashta Koota compatibility scoring
//! - Panchang primitives (tithi, yoga, karana, masa, muhurta windows)
//! - Sunrise/sunset and moonrise/moonset

pub mod ayanamsha;
pub mod bhava;
pub mod classify;
pub mod dasha;
pub mod error;
pub mod graha;
pub mod graha_relationships;
pub mod koota;
pub mod lagna;
pub mod nakshatra;
pub mod panchang;
pub mod rashi;
pub mod riseset;
pub mod riseset_types;

pub use ayanamsha::{
    AyanamshaSystem, ayanamsha_deg, ayanamsha_deg_at, ayanamsha_mean_deg, to_sidereal,
    to_tropical,
};
pub use bhava::{ALL_HOUSE_SYSTEMS, HouseSet, HouseSystem, houses, houses_from_armc};
pub use classify::{
    Classification, NakshatraInfo, RashiInfo, classify, nakshatra_from_longitude,
    rashi_from_longitude,
};
pub use dasha::{
    DEFAULT_DASHA_LEVEL, DashaConfig, DashaLevel, DashaPeriod, DashaSnapshot, DashaTimeline,
    DashaYear, MAX_DASHA_LEVEL, vimshottari,
};
pub use error::VedicError;
pub use graha::{ALL_GRAHAS, Graha, rashi_lord};
pub use graha_relationships::{NaisargikaMaitri, naisargika_maitri};
pub use koota::{
    ALL_KOOTAS, CompatibilityBand, CompatibilityResult, Dosha, Koota, KootaScoreSet, MoonChart,
    NadiException, match_charts,
};
pub use lagna::{AngleSet, angles, angles_from_armc, local_sidereal_time_deg, obliquity_at};
pub use nakshatra::{
    ALL_NAKSHATRAS_27, Gana, NAKSHATRA_SPAN_27, Nadi, Nakshatra, PADA_SPAN, YoniAnimal,
};
pub use panchang::{
    ALL_MASAS, ALL_YOGAS, DayWindows, KARANA_SEGMENT_DEG, Karana, KaranaPosition, Masa, Paksha,
    TITHI_SEGMENT_DEG, Tithi, TithiPosition, TimeWindow, YOGA_SEGMENT_DEG, Yoga, YogaPosition,
    day_windows, elongation_deg, karana_from_elongation, sidereal_sum_deg, tithi_from_elongation,
    vaara_lord, vaara_name, yoga_from_sum,
};
pub use rashi::{ALL_RASHIS, Dms, Element, Quality, RASHI_SPAN, Rashi, deg_to_dms, dms_to_deg};
pub use riseset::{
    approximate_local_noon_jd, compute_rise_set, moon_event_on_day, moon_events, sun_events,
    sunrise_jd,
};
pub use riseset_types::{MoonEvents, RiseSetConfig, RiseSetEvent, RiseSetResult, SunEvents};
