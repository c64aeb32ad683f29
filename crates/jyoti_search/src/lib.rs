//! Calendar rule engine over the Vedic primitives.
//!
//! This crate provides:
//! - New/full moon and sankranti search
//! - Lunar months (amanta and purnimanta) with adhika detection
//! - The panchang of a civil day with element end times
//! - Declarative festival rules resolved per regional calendar variant

pub mod context;
pub mod error;
pub mod festival;
pub mod festival_types;
pub mod lunar_phase;
pub mod masa;
pub mod panchang;
pub mod panchang_types;
pub mod sankranti;
pub(crate) mod search_util;

pub use context::SearchContext;
pub use error::SearchError;
pub use festival::{builtin_festivals, festivals_in_year, festivals_on_day};
pub use festival_types::{
    CalendarVariant, FestivalOccurrence, FestivalRule, Kala, LunarRule, RuleKind, SolarRule,
};
pub use lunar_phase::{
    LunarPhase, LunarPhaseEvent, next_amavasya, next_purnima, prev_amavasya, prev_purnima,
    search_lunar_phases,
};
pub use masa::{Lunation, MonthScheme, lunation_containing, lunations_between};
pub use panchang::{calendar_day, karana_at, masa_at, nakshatra_at, tithi_at, yoga_at};
pub use panchang_types::{
    CalendarDay, KaranaInfo, MasaInfo, PanchangNakshatraInfo, TithiInfo, YogaInfo,
};
pub use sankranti::{
    SankrantiEvent, next_sankranti, next_specific_sankranti, prev_sankranti,
    prev_specific_sankranti, search_sankrantis,
};
