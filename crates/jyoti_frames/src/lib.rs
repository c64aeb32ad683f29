//! Reference-frame helpers shared by the position sources and the Vedic layer.
//!
//! Everything here is a pure function of Julian centuries `t` from J2000.0
//! (TT) or of angles in degrees.

pub mod nutation;
pub mod obliquity;
pub mod precession;
pub mod spherical;

pub use nutation::{Nutation, nutation};
pub use obliquity::{mean_obliquity_deg, true_obliquity_deg};
pub use precession::{general_precession_longitude_deg, precess_longitude_from_j2000_deg};
pub use spherical::{
    SphericalCoords, cartesian_to_spherical, ecliptic_to_equatorial, equatorial_to_ecliptic,
    normalize_deg, signed_arc_deg, spherical_to_cartesian,
};
