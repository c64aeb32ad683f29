//! Vimshottari dasha (planetary period) calculations.
//!
//! - [`types`]: levels, periods, snapshots, year length
//! - [`balance`]: the Moon's progress through its birth nakshatra
//! - [`subperiod`]: proportional child generation and active-period search
//! - [`vimshottari`]: the 120-year cycle and its query API

pub mod balance;
pub mod subperiod;
pub mod types;
pub mod vimshottari;

pub use balance::{BirthBalance, birth_balance};
pub use subperiod::find_active_period;
pub use types::{
    DEFAULT_DASHA_LEVEL, DashaLevel, DashaPeriod, DashaSnapshot, DashaYear, MAX_DASHA_LEVEL,
};
pub use vimshottari::{
    DashaConfig, DashaTimeline, VIMSHOTTARI_SEQUENCE, VIMSHOTTARI_TOTAL_YEARS, vimshottari,
    vimshottari_children, vimshottari_mahadashas, vimshottari_years,
};
