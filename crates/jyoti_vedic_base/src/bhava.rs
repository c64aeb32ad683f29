//! Bhava (house) cusps for 13 house systems.
//!
//! All systems share the ascendant/MC/ARMC computation from [`crate::lagna`].
//! Quadrant systems compute cusps 11, 12, 2 and 3; cusps 4-9 are the
//! opposites of 10, 11, 12, 1, 2 and 3.
//!
//! A result is only returned when the 12 cusps run forward around the
//! zodiac and sweep exactly 360°. Beyond the polar circle most quadrant
//! systems (and the Horizontal system where the ecliptic passes the far
//! side of the zenith) fold back on themselves; those cases are reported as
//! [`VedicError::PolarUndefined`] instead of being patched.
//!
//! Sources: Meeus ch. 13; Munkasey, "An Astrological House Formulary";
//! Holden, "The Elements of House Division".

use std::str::FromStr;

use jyoti_core::GeoLocation;
use jyoti_frames::normalize_deg;
use jyoti_time::Instant;
use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::lagna::{
    AngleSet, angles_from_armc, ascendant_deg, check_latitude, local_sidereal_time_deg,
    mc_deg, obliquity_at,
};

const MAX_SEMI_ARC_ITERATIONS: usize = 100;
const SEMI_ARC_TOLERANCE_DEG: f64 = 1e-12;
const SWEEP_TOLERANCE_DEG: f64 = 1e-6;

/// The 13 supported house division systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HouseSystem {
    /// Trisects the diurnal and nocturnal semi-arcs in time.
    #[default]
    Placidus,
    /// Trisects the MC's diurnal semi-arc (birthplace system).
    Koch,
    /// 30° houses from the ascendant.
    Equal,
    /// Each rashi is one house, starting with the rashi of the ascendant.
    WholeSign,
    /// Trisects the ecliptic quadrant arcs (Sripati).
    Porphyry,
    /// 30° arcs of the celestial equator, projected through the horizon's
    /// north and south points.
    Regiomontanus,
    /// 30° arcs of the prime vertical.
    Campanus,
    /// Trisects the ascendant's semi-arcs along the equator.
    Alcabitius,
    /// Polich/Page tangent-ratio system.
    Topocentric,
    /// Great circle through ascendant and zenith, divided in 30° arcs.
    Krusinski,
    /// Meridian system: 30° equator arcs from ARMC along hour circles.
    Axial,
    /// Azimuthal: Campanus with the horizon as the fundamental circle.
    Horizontal,
    /// 30° equator arcs projected through the ecliptic poles.
    Morinus,
}

/// All 13 house systems.
pub const ALL_HOUSE_SYSTEMS: [HouseSystem; 13] = [
    HouseSystem::Placidus,
    HouseSystem::Koch,
    HouseSystem::Equal,
    HouseSystem::WholeSign,
    HouseSystem::Porphyry,
    HouseSystem::Regiomontanus,
    HouseSystem::Campanus,
    HouseSystem::Alcabitius,
    HouseSystem::Topocentric,
    HouseSystem::Krusinski,
    HouseSystem::Axial,
    HouseSystem::Horizontal,
    HouseSystem::Morinus,
];

impl HouseSystem {
    pub const fn all() -> &'static [HouseSystem] {
        &ALL_HOUSE_SYSTEMS
    }

    /// Conventional one-letter code used by native ephemeris libraries.
    pub const fn code(self) -> char {
        match self {
            Self::Placidus => 'P',
            Self::Koch => 'K',
            Self::Equal => 'E',
            Self::WholeSign => 'W',
            Self::Porphyry => 'O',
            Self::Regiomontanus => 'R',
            Self::Campanus => 'C',
            Self::Alcabitius => 'B',
            Self::Topocentric => 'T',
            Self::Krusinski => 'U',
            Self::Axial => 'X',
            Self::Horizontal => 'H',
            Self::Morinus => 'M',
        }
    }

    /// Parse a one-letter code (case-insensitive).
    pub fn from_code(code: char) -> Option<Self> {
        let upper = code.to_ascii_uppercase();
        ALL_HOUSE_SYSTEMS.iter().copied().find(|s| s.code() == upper)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Placidus => "Placidus",
            Self::Koch => "Koch",
            Self::Equal => "Equal",
            Self::WholeSign => "Whole Sign",
            Self::Porphyry => "Porphyry",
            Self::Regiomontanus => "Regiomontanus",
            Self::Campanus => "Campanus",
            Self::Alcabitius => "Alcabitius",
            Self::Topocentric => "Topocentric",
            Self::Krusinski => "Krusinski",
            Self::Axial => "Axial",
            Self::Horizontal => "Horizontal",
            Self::Morinus => "Morinus",
        }
    }

    /// Systems with no iterative or spherical solve.
    pub const fn is_arithmetic(self) -> bool {
        matches!(self, Self::Equal | Self::WholeSign)
    }

    /// Systems whose semi-arc solve has no answer inside the polar circle.
    pub const fn fails_in_polar_circle(self) -> bool {
        matches!(self, Self::Placidus | Self::Koch)
    }
}

impl std::fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = VedicError;

    /// Accepts a one-letter code or a name; "Polich/Page" resolves to
    /// Topocentric.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_code(c)
                .ok_or_else(|| VedicError::Validation(format!("unknown house system code '{c}'")));
        }
        let key: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        let system = match key.as_str() {
            "placidus" => Self::Placidus,
            "koch" => Self::Koch,
            "equal" => Self::Equal,
            "wholesign" => Self::WholeSign,
            "porphyry" | "sripati" => Self::Porphyry,
            "regiomontanus" => Self::Regiomontanus,
            "campanus" => Self::Campanus,
            "alcabitius" | "alcabitus" => Self::Alcabitius,
            "topocentric" | "polichpage" => Self::Topocentric,
            "krusinski" => Self::Krusinski,
            "axial" | "axialrotation" | "meridian" => Self::Axial,
            "horizontal" | "azimuthal" => Self::Horizontal,
            "morinus" => Self::Morinus,
            _ => {
                return Err(VedicError::Validation(format!(
                    "unknown house system '{trimmed}'"
                )));
            }
        };
        Ok(system)
    }
}

/// Twelve cusps plus the angles, tied to one house system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseSet {
    pub system: HouseSystem,
    /// Cusp longitudes; `cusps[0]` is house 1.
    pub cusps: [f64; 12],
    pub ascendant_deg: f64,
    pub mc_deg: f64,
    pub armc_deg: f64,
    pub vertex_deg: f64,
    pub equatorial_ascendant_deg: f64,
    /// Whether longitudes have been shifted to the sidereal zodiac.
    pub sidereal: bool,
}

impl HouseSet {
    /// Cusp of house `n` (1-12).
    pub fn cusp(&self, n: usize) -> Option<f64> {
        if (1..=12).contains(&n) {
            Some(self.cusps[n - 1])
        } else {
            None
        }
    }

    /// House (1-12) containing an ecliptic longitude in the same zodiac.
    pub fn house_of(&self, longitude_deg: f64) -> u8 {
        for i in 0..12 {
            let start = self.cusps[i];
            let end = self.cusps[(i + 1) % 12];
            let span = normalize_deg(end - start);
            if normalize_deg(longitude_deg - start) < span {
                return i as u8 + 1;
            }
        }
        // Only reachable through float ties on zero-width houses
        1
    }

    /// Re-express every longitude in the sidereal zodiac; ARMC is unchanged.
    ///
    /// Whole-sign houses are rebuilt on sidereal sign boundaries.
    pub fn to_sidereal(&self, ayanamsha_deg: f64) -> HouseSet {
        if self.sidereal {
            return *self;
        }
        let shift = |x: f64| normalize_deg(x - ayanamsha_deg);
        let ascendant = shift(self.ascendant_deg);
        let cusps = if self.system == HouseSystem::WholeSign {
            whole_sign_cusps(ascendant)
        } else {
            self.cusps.map(shift)
        };
        HouseSet {
            system: self.system,
            cusps,
            ascendant_deg: ascendant,
            mc_deg: shift(self.mc_deg),
            armc_deg: self.armc_deg,
            vertex_deg: shift(self.vertex_deg),
            equatorial_ascendant_deg: shift(self.equatorial_ascendant_deg),
            sidereal: true,
        }
    }
}

fn forward_arc(from: f64, to: f64) -> f64 {
    normalize_deg(to - from)
}

/// Fill cusps 4-9 as the opposites of 10, 11, 12, 1, 2, 3.
fn with_opposites(asc: f64, mc: f64, h11: f64, h12: f64, h2: f64, h3: f64) -> [f64; 12] {
    let mut c = [0.0; 12];
    c[0] = asc;
    c[1] = h2;
    c[2] = h3;
    c[9] = mc;
    c[10] = h11;
    c[11] = h12;
    for i in [0, 1, 2, 9, 10, 11] {
        c[(i + 6) % 12] = normalize_deg(c[i] + 180.0);
    }
    c
}

fn whole_sign_cusps(asc: f64) -> [f64; 12] {
    let start = (asc / 30.0).floor() * 30.0;
    std::array::from_fn(|i| normalize_deg(start + 30.0 * i as f64))
}

fn equal_cusps(asc: f64) -> [f64; 12] {
    std::array::from_fn(|i| normalize_deg(asc + 30.0 * i as f64))
}

/// Diurnal semi-arc (degrees) of the equator point at `ra`, or `None`
/// when that point is circumpolar.
fn diurnal_semi_arc(ra: f64, tan_lat: f64, tan_eps: f64) -> Option<f64> {
    let dec = (tan_eps * ra.to_radians().sin()).atan();
    let x = -tan_lat * dec.tan();
    if x.abs() > 1.0 {
        None
    } else {
        Some(x.acos().to_degrees())
    }
}

fn placidus_cusp(
    armc: f64,
    lat: f64,
    eps: f64,
    house: u8,
) -> Result<f64, VedicError> {
    let (tan_lat, tan_eps) = (lat.to_radians().tan(), eps.to_radians().tan());
    let place = |dsa: f64| match house {
        11 => armc + dsa / 3.0,
        12 => armc + 2.0 * dsa / 3.0,
        2 => armc + 60.0 + 2.0 * dsa / 3.0,
        _ => armc + 120.0 + dsa / 3.0,
    };
    let mut ra = match house {
        11 => armc + 30.0,
        12 => armc + 60.0,
        2 => armc + 120.0,
        _ => armc + 150.0,
    };
    for _ in 0..MAX_SEMI_ARC_ITERATIONS {
        let dsa = diurnal_semi_arc(ra, tan_lat, tan_eps).ok_or(VedicError::PolarUndefined {
            system: "Placidus",
            latitude_deg: lat,
        })?;
        let next = place(dsa);
        let done = (next - ra).abs() < SEMI_ARC_TOLERANCE_DEG;
        ra = next;
        if done {
            break;
        }
    }
    Ok(mc_deg(ra, eps))
}

fn placidus(a: &AngleSet) -> Result<[f64; 12], VedicError> {
    let (armc, lat, eps) = (a.armc_deg, a.latitude_deg, a.obliquity_deg);
    Ok(with_opposites(
        a.ascendant_deg,
        a.mc_deg,
        placidus_cusp(armc, lat, eps, 11)?,
        placidus_cusp(armc, lat, eps, 12)?,
        placidus_cusp(armc, lat, eps, 2)?,
        placidus_cusp(armc, lat, eps, 3)?,
    ))
}

fn koch(a: &AngleSet) -> Result<[f64; 12], VedicError> {
    let (armc, lat, eps) = (a.armc_deg, a.latitude_deg, a.obliquity_deg);
    let mc_dec = (eps.to_radians().sin() * a.mc_deg.to_radians().sin()).asin();
    let x = lat.to_radians().tan() * mc_dec.tan();
    if x.abs() > 1.0 {
        return Err(VedicError::PolarUndefined {
            system: "Koch",
            latitude_deg: lat,
        });
    }
    let dsa = 90.0 + x.asin().to_degrees();
    let asc_at = |ra: f64| ascendant_deg(ra, lat, eps);
    Ok(with_opposites(
        a.ascendant_deg,
        a.mc_deg,
        asc_at(armc - 2.0 * dsa / 3.0),
        asc_at(armc - dsa / 3.0),
        asc_at(armc + dsa / 3.0),
        asc_at(armc + 2.0 * dsa / 3.0),
    ))
}

/// Regiomontanus and Topocentric differ only in the pole heights of the
/// intermediate house circles.
fn pole_height_system(a: &AngleSet, near: f64, far: f64) -> [f64; 12] {
    let (armc, eps) = (a.armc_deg, a.obliquity_deg);
    with_opposites(
        a.ascendant_deg,
        a.mc_deg,
        ascendant_deg(armc - 60.0, near, eps),
        ascendant_deg(armc - 30.0, far, eps),
        ascendant_deg(armc + 30.0, far, eps),
        ascendant_deg(armc + 60.0, near, eps),
    )
}

fn regiomontanus(a: &AngleSet) -> [f64; 12] {
    let t = a.latitude_deg.to_radians().tan();
    let near = (t * 0.5).atan().to_degrees();
    let far = (t * 60f64.to_radians().sin()).atan().to_degrees();
    pole_height_system(a, near, far)
}

fn topocentric(a: &AngleSet) -> [f64; 12] {
    let t = a.latitude_deg.to_radians().tan();
    let near = (t / 3.0).atan().to_degrees();
    let far = (2.0 * t / 3.0).atan().to_degrees();
    pole_height_system(a, near, far)
}

/// Cusps 11, 12, 2, 3 of Campanus for an arbitrary ARMC and pole.
fn campanus_intermediate(armc: f64, lat: f64, eps: f64) -> [f64; 4] {
    let sin_lat = lat.to_radians().sin();
    let fh1 = (sin_lat / 2.0).asin().to_degrees();
    let fh2 = (3f64.sqrt() / 2.0 * sin_lat).asin().to_degrees();
    let cos_lat = lat.to_radians().cos();
    let (xh1, xh2) = if cos_lat.abs() < 1e-12 {
        (90.0, 90.0)
    } else {
        (
            (3f64.sqrt() / cos_lat).atan().to_degrees(),
            (1.0 / 3f64.sqrt() / cos_lat).atan().to_degrees(),
        )
    };
    [
        ascendant_deg(armc - xh1, fh1, eps),
        ascendant_deg(armc - xh2, fh2, eps),
        ascendant_deg(armc + xh2, fh2, eps),
        ascendant_deg(armc + xh1, fh1, eps),
    ]
}

fn campanus(a: &AngleSet) -> [f64; 12] {
    let [h11, h12, h2, h3] = campanus_intermediate(a.armc_deg, a.latitude_deg, a.obliquity_deg);
    with_opposites(a.ascendant_deg, a.mc_deg, h11, h12, h2, h3)
}

/// Campanus computed for the observer's horizon pole, then turned back.
fn horizontal(a: &AngleSet) -> [f64; 12] {
    let (lat, eps) = (a.latitude_deg, a.obliquity_deg);
    let (mut pole, armc, offset) = if lat >= 0.0 {
        (90.0 - lat, a.armc_deg + 180.0, 180.0)
    } else {
        (90.0 + lat, a.armc_deg, 0.0)
    };
    // On the equator the horizon pole sits exactly on the celestial pole
    if (pole - 90.0).abs() < 1e-9 {
        pole = 90.0 - 1e-9;
    }
    let [h11, h12, h2, h3] = campanus_intermediate(armc, pole, eps);
    let c = with_opposites(
        ascendant_deg(armc, pole, eps),
        mc_deg(armc, eps),
        h11,
        h12,
        h2,
        h3,
    );
    c.map(|x| normalize_deg(x + offset))
}

fn alcabitius(a: &AngleSet) -> Result<[f64; 12], VedicError> {
    let (armc, lat, eps) = (a.armc_deg, a.latitude_deg, a.obliquity_deg);
    let asc_dec = (a.ascendant_deg.to_radians().sin() * eps.to_radians().sin()).asin();
    let x = -lat.to_radians().tan() * asc_dec.tan();
    if x.abs() > 1.0 {
        return Err(VedicError::PolarUndefined {
            system: "Alcabitius",
            latitude_deg: lat,
        });
    }
    let dsa = x.acos().to_degrees();
    let nsa = 180.0 - dsa;
    Ok(with_opposites(
        a.ascendant_deg,
        a.mc_deg,
        mc_deg(armc + dsa / 3.0, eps),
        mc_deg(armc + 2.0 * dsa / 3.0, eps),
        mc_deg(armc + 180.0 - 2.0 * nsa / 3.0, eps),
        mc_deg(armc + 180.0 - nsa / 3.0, eps),
    ))
}

fn axial(a: &AngleSet) -> [f64; 12] {
    std::array::from_fn(|i| mc_deg(a.armc_deg + 90.0 + 30.0 * i as f64, a.obliquity_deg))
}

fn morinus(a: &AngleSet) -> [f64; 12] {
    let cos_eps = a.obliquity_deg.to_radians().cos();
    std::array::from_fn(|i| {
        let (s, c) = (a.armc_deg + 90.0 + 30.0 * i as f64).to_radians().sin_cos();
        normalize_deg((s * cos_eps).atan2(c).to_degrees())
    })
}

fn krusinski(a: &AngleSet) -> [f64; 12] {
    let (sin_eps, cos_eps) = a.obliquity_deg.to_radians().sin_cos();
    let (sin_l, cos_l) = a.ascendant_deg.to_radians().sin_cos();
    let asc = [cos_l, sin_l * cos_eps, sin_l * sin_eps];
    let (sin_f, cos_f) = a.latitude_deg.to_radians().sin_cos();
    let (sin_r, cos_r) = a.armc_deg.to_radians().sin_cos();
    let zenith = [cos_f * cos_r, cos_f * sin_r, sin_f];
    std::array::from_fn(|i| {
        let (s, c) = (-30.0 * i as f64).to_radians().sin_cos();
        let p: [f64; 3] = std::array::from_fn(|k| c * asc[k] + s * zenith[k]);
        mc_deg(p[1].atan2(p[0]).to_degrees(), a.obliquity_deg)
    })
}

fn porphyry(a: &AngleSet) -> [f64; 12] {
    let quadrant = forward_arc(a.mc_deg, a.ascendant_deg);
    let q = quadrant / 3.0;
    let q2 = (180.0 - quadrant) / 3.0;
    with_opposites(
        a.ascendant_deg,
        a.mc_deg,
        normalize_deg(a.mc_deg + q),
        normalize_deg(a.mc_deg + 2.0 * q),
        normalize_deg(a.ascendant_deg + q2),
        normalize_deg(a.ascendant_deg + 2.0 * q2),
    )
}

/// Cusps must run forward and close the circle exactly once.
fn check_ordering(system: HouseSystem, lat: f64, cusps: &[f64; 12]) -> Result<(), VedicError> {
    let polar = VedicError::PolarUndefined {
        system: system.name(),
        latitude_deg: lat,
    };
    if cusps.iter().any(|c| !c.is_finite()) {
        return Err(polar);
    }
    let sweep: f64 = (0..12)
        .map(|i| forward_arc(cusps[i], cusps[(i + 1) % 12]))
        .sum();
    if (sweep - 360.0).abs() > SWEEP_TOLERANCE_DEG {
        return Err(polar);
    }
    Ok(())
}

/// Houses for a given ARMC, latitude and obliquity (tropical, of date).
pub fn houses_from_armc(
    armc_deg: f64,
    latitude_deg: f64,
    obliquity_deg: f64,
    system: HouseSystem,
) -> Result<HouseSet, VedicError> {
    check_latitude(system.name(), latitude_deg)?;
    if system.fails_in_polar_circle() && latitude_deg.abs() >= 90.0 - obliquity_deg {
        return Err(VedicError::PolarUndefined {
            system: system.name(),
            latitude_deg,
        });
    }
    let a = angles_from_armc(armc_deg, latitude_deg, obliquity_deg)?;
    let cusps = match system {
        HouseSystem::Placidus => placidus(&a)?,
        HouseSystem::Koch => koch(&a)?,
        HouseSystem::Equal => equal_cusps(a.ascendant_deg),
        HouseSystem::WholeSign => whole_sign_cusps(a.ascendant_deg),
        HouseSystem::Porphyry => porphyry(&a),
        HouseSystem::Regiomontanus => regiomontanus(&a),
        HouseSystem::Campanus => campanus(&a),
        HouseSystem::Alcabitius => alcabitius(&a)?,
        HouseSystem::Topocentric => topocentric(&a),
        HouseSystem::Krusinski => krusinski(&a),
        HouseSystem::Axial => axial(&a),
        HouseSystem::Horizontal => horizontal(&a),
        HouseSystem::Morinus => morinus(&a),
    };
    check_ordering(system, latitude_deg, &cusps)?;
    Ok(HouseSet {
        system,
        cusps,
        ascendant_deg: a.ascendant_deg,
        mc_deg: a.mc_deg,
        armc_deg: a.armc_deg,
        vertex_deg: a.vertex_deg,
        equatorial_ascendant_deg: a.equatorial_ascendant_deg,
        sidereal: false,
    })
}

/// Houses for an observer at an instant (tropical, of date).
///
/// ARMC is the apparent local sidereal time; the obliquity is the true
/// obliquity of date. Altitude does not affect house division.
pub fn houses(
    instant: &Instant,
    location: &GeoLocation,
    system: HouseSystem,
) -> Result<HouseSet, VedicError> {
    location.validate()?;
    let armc = local_sidereal_time_deg(instant, location.longitude_deg);
    houses_from_armc(armc, location.latitude_deg, obliquity_at(instant), system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jyoti_core::ErrorKind;

    const EPS: f64 = 23.4393;

    fn arc(a: f64, b: f64) -> f64 {
        let d = normalize_deg(a - b);
        d.min(360.0 - d)
    }

    #[test]
    fn codes_round_trip() {
        for s in HouseSystem::all() {
            assert_eq!(HouseSystem::from_code(s.code()), Some(*s));
            assert_eq!(s.code().to_string().parse::<HouseSystem>().unwrap(), *s);
        }
        assert_eq!(HouseSystem::from_code('p'), Some(HouseSystem::Placidus));
        assert_eq!(HouseSystem::from_code('Z'), None);
    }

    #[test]
    fn polich_page_alias() {
        assert_eq!(
            "Polich/Page".parse::<HouseSystem>().unwrap(),
            HouseSystem::Topocentric
        );
        assert_eq!(
            "whole-sign".parse::<HouseSystem>().unwrap(),
            HouseSystem::WholeSign
        );
        assert!("nonsense".parse::<HouseSystem>().is_err());
    }

    #[test]
    fn quadrant_systems_share_angles() {
        for s in [
            HouseSystem::Placidus,
            HouseSystem::Koch,
            HouseSystem::Porphyry,
            HouseSystem::Regiomontanus,
            HouseSystem::Campanus,
            HouseSystem::Alcabitius,
            HouseSystem::Topocentric,
        ] {
            let h = houses_from_armc(123.0, 40.0, EPS, s).unwrap();
            assert!(arc(h.cusps[0], h.ascendant_deg) < 1e-9, "{s}");
            assert!(arc(h.cusps[9], h.mc_deg) < 1e-9, "{s}");
            assert!(arc(h.cusps[3], h.mc_deg + 180.0) < 1e-9, "{s}");
        }
    }

    #[test]
    fn equator_equinox_placidus_is_symmetric() {
        // ARMC 0 on the equator: MC = 0, Asc = 90 and every semi-arc is 90,
        // so Placidus collapses onto the meridian system
        let h = houses_from_armc(0.0, 0.0, EPS, HouseSystem::Placidus).unwrap();
        assert!(arc(h.cusps[9], 0.0) < 1e-9);
        assert!(arc(h.cusps[0], 90.0) < 1e-9);
        let axial = houses_from_armc(0.0, 0.0, EPS, HouseSystem::Axial).unwrap();
        for i in 0..12 {
            assert!(arc(h.cusps[i], axial.cusps[i]) < 1e-6, "cusp {}", i + 1);
        }
    }

    #[test]
    fn whole_sign_starts_at_sign_boundary() {
        let h = houses_from_armc(200.0, 28.6, EPS, HouseSystem::WholeSign).unwrap();
        assert_eq!(h.cusps[0] % 30.0, 0.0);
        assert!(h.ascendant_deg >= h.cusps[0] && h.ascendant_deg < h.cusps[0] + 30.0);
    }

    #[test]
    fn placidus_inside_polar_circle_fails() {
        let err = houses_from_armc(10.0, 70.0, EPS, HouseSystem::Placidus).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PolarUndefined);
        let err = houses_from_armc(10.0, -70.0, EPS, HouseSystem::Koch).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PolarUndefined);
    }

    #[test]
    fn arithmetic_systems_survive_high_latitude() {
        for s in [
            HouseSystem::Equal,
            HouseSystem::WholeSign,
            HouseSystem::Axial,
            HouseSystem::Morinus,
        ] {
            assert!(houses_from_armc(10.0, 75.0, EPS, s).is_ok(), "{s}");
        }
    }

    #[test]
    fn every_system_fails_at_pole() {
        for s in HouseSystem::all() {
            let err = houses_from_armc(10.0, 90.0, EPS, *s).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::PolarUndefined, "{s}");
        }
    }

    #[test]
    fn horizontal_folds_in_tropics() {
        // Ecliptic passes north of the zenith at latitude 10, ARMC 90
        let err = houses_from_armc(90.0, 10.0, EPS, HouseSystem::Horizontal).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PolarUndefined);
        assert!(houses_from_armc(90.0, 45.0, EPS, HouseSystem::Horizontal).is_ok());
    }

    #[test]
    fn house_of_locates_longitudes() {
        let h = houses_from_armc(0.0, 0.0, EPS, HouseSystem::Equal).unwrap();
        assert_eq!(h.house_of(h.cusps[0]), 1);
        assert_eq!(h.house_of(h.cusps[0] + 45.0), 2);
        assert_eq!(h.house_of(h.cusps[11] + 1.0), 12);
    }

    #[test]
    fn sidereal_shift_keeps_armc() {
        let h = houses_from_armc(77.0, 28.6, EPS, HouseSystem::Placidus).unwrap();
        let s = h.to_sidereal(23.85);
        assert_eq!(s.armc_deg, h.armc_deg);
        assert!(arc(s.ascendant_deg, h.ascendant_deg - 23.85) < 1e-9);
        assert!(s.sidereal);
        assert_eq!(s.to_sidereal(23.85), s);
    }

    #[test]
    fn sidereal_whole_sign_realigned() {
        let h = houses_from_armc(77.0, 28.6, EPS, HouseSystem::WholeSign).unwrap();
        let s = h.to_sidereal(23.85);
        assert_eq!(s.cusps[0] % 30.0, 0.0);
        assert!(normalize_deg(s.ascendant_deg - s.cusps[0]) < 30.0);
    }
}
