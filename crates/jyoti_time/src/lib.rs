//! Time primitives for the jyoti engine.
//!
//! This crate provides:
//! - Julian Date ↔ Gregorian calendar conversions
//! - Validated civil dates and UTC instants (JD UT and JD TT cached once)
//! - ΔT (TT − UT) polynomial model
//! - Earth Rotation Angle, GMST and local sidereal time

pub mod civil;
pub mod delta_t;
pub mod error;
pub mod instant;
pub mod julian;
pub mod sidereal;

pub use civil::{CivilDate, Weekday};
pub use delta_t::delta_t_seconds;
pub use error::TimeError;
pub use instant::Instant;
pub use julian::{
    DAYS_PER_JULIAN_CENTURY, J2000_JD, SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar,
    jd_to_centuries,
};
pub use sidereal::{
    apparent_sidereal_time_rad, earth_rotation_angle_rad, gmst_rad, local_sidereal_time_rad,
};
