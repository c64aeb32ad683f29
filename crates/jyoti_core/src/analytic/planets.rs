//! Planets from mean orbital elements.
//!
//! Elements and their linear rates are referred to the equinox of date,
//! day number `d = JD(TT) − 2451543.5`. Kepler's equation is solved by
//! Newton iteration and the largest Jupiter/Saturn/Uranus mutual
//! perturbations are added in longitude and latitude. Pluto uses a short
//! periodic series fitted to J2000 coordinates and precessed to date.

use jyoti_frames::{
    SphericalCoords, cartesian_to_spherical, normalize_deg, spherical_to_cartesian,
};

use crate::body::Body;

use super::sun;

/// Epoch of the element rates: 1999 Dec 31.0 TT.
const ELEMENT_EPOCH_JD: f64 = 2_451_543.5;

/// Light travel time per AU in days.
const LIGHT_TIME_DAYS_PER_AU: f64 = 0.005_775_518_3;

/// Linear orbital elements: value at epoch plus rate per day.
#[derive(Debug, Clone, Copy)]
struct Elements {
    /// Longitude of ascending node N.
    node: (f64, f64),
    /// Inclination i.
    inclination: (f64, f64),
    /// Argument of perihelion w.
    perihelion: (f64, f64),
    /// Semi-major axis a (AU).
    axis: (f64, f64),
    /// Eccentricity e.
    eccentricity: (f64, f64),
    /// Mean anomaly M.
    anomaly: (f64, f64),
}

const fn elements(
    node: (f64, f64),
    inclination: (f64, f64),
    perihelion: (f64, f64),
    axis: (f64, f64),
    eccentricity: (f64, f64),
    anomaly: (f64, f64),
) -> Elements {
    Elements {
        node,
        inclination,
        perihelion,
        axis,
        eccentricity,
        anomaly,
    }
}

const MERCURY: Elements = elements(
    (48.3313, 3.24587e-5),
    (7.0047, 5.00e-8),
    (29.1241, 1.01444e-5),
    (0.387098, 0.0),
    (0.205635, 5.59e-10),
    (168.6562, 4.0923344368),
);
const VENUS: Elements = elements(
    (76.6799, 2.46590e-5),
    (3.3946, 2.75e-8),
    (54.8910, 1.38374e-5),
    (0.723330, 0.0),
    (0.006773, -1.302e-9),
    (48.0052, 1.6021302244),
);
const MARS: Elements = elements(
    (49.5574, 2.11081e-5),
    (1.8497, -1.78e-8),
    (286.5016, 2.92961e-5),
    (1.523688, 0.0),
    (0.093405, 2.516e-9),
    (18.6021, 0.5240207766),
);
const JUPITER: Elements = elements(
    (100.4542, 2.76854e-5),
    (1.3030, -1.557e-7),
    (273.8777, 1.64505e-5),
    (5.20256, 0.0),
    (0.048498, 4.469e-9),
    (19.8950, 0.0830853001),
);
const SATURN: Elements = elements(
    (113.6634, 2.38980e-5),
    (2.4886, -1.081e-7),
    (339.3939, 2.97661e-5),
    (9.55475, 0.0),
    (0.055546, -9.499e-9),
    (316.9670, 0.0334442282),
);
const URANUS: Elements = elements(
    (74.0005, 1.3978e-5),
    (0.7733, 1.9e-8),
    (96.6612, 3.0565e-5),
    (19.18171, -1.55e-8),
    (0.047318, 7.45e-9),
    (142.5905, 0.011725806),
);
const NEPTUNE: Elements = elements(
    (131.7806, 3.0173e-5),
    (1.7700, -2.55e-7),
    (272.8461, -6.027e-6),
    (30.05826, 3.313e-8),
    (0.008606, 2.15e-9),
    (260.2471, 0.005995147),
);

fn elements_for(body: Body) -> Option<&'static Elements> {
    match body {
        Body::Mercury => Some(&MERCURY),
        Body::Venus => Some(&VENUS),
        Body::Mars => Some(&MARS),
        Body::Jupiter => Some(&JUPITER),
        Body::Saturn => Some(&SATURN),
        Body::Uranus => Some(&URANUS),
        Body::Neptune => Some(&NEPTUNE),
        _ => None,
    }
}

fn at(pair: (f64, f64), d: f64) -> f64 {
    pair.0 + pair.1 * d
}

/// Eccentric anomaly in degrees for mean anomaly `m_deg`.
fn solve_kepler(m_deg: f64, e: f64) -> f64 {
    let m = m_deg.to_radians();
    let mut ecc = m + e * m.sin() * (1.0 + e * m.cos());
    for _ in 0..30 {
        let delta = (ecc - e * ecc.sin() - m) / (1.0 - e * ecc.cos());
        ecc -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ecc.to_degrees()
}

fn kepler_heliocentric(el: &Elements, d: f64) -> SphericalCoords {
    let n = at(el.node, d).to_radians();
    let i = at(el.inclination, d).to_radians();
    let w = at(el.perihelion, d);
    let a = at(el.axis, d);
    let e = at(el.eccentricity, d);
    let m = normalize_deg(at(el.anomaly, d));

    let ecc = solve_kepler(m, e).to_radians();
    let xv = a * (ecc.cos() - e);
    let yv = a * (1.0 - e * e).sqrt() * ecc.sin();
    let v = yv.atan2(xv).to_degrees();
    let r = xv.hypot(yv);

    let u = (v + w).to_radians();
    let xh = r * (n.cos() * u.cos() - n.sin() * u.sin() * i.cos());
    let yh = r * (n.sin() * u.cos() + n.cos() * u.sin() * i.cos());
    let zh = r * u.sin() * i.sin();
    cartesian_to_spherical(&[xh, yh, zh])
}

/// Mean anomalies of Jupiter, Saturn and Uranus in degrees.
fn giant_anomalies(d: f64) -> (f64, f64, f64) {
    (
        normalize_deg(at(JUPITER.anomaly, d)),
        normalize_deg(at(SATURN.anomaly, d)),
        normalize_deg(at(URANUS.anomaly, d)),
    )
}

fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

fn cos_deg(x: f64) -> f64 {
    x.to_radians().cos()
}

/// Longitude and latitude perturbations in degrees.
fn perturbations(body: Body, d: f64) -> (f64, f64) {
    let (mj, ms, mu) = giant_anomalies(d);
    match body {
        Body::Jupiter => (
            -0.332 * sin_deg(2.0 * mj - 5.0 * ms - 67.6)
                - 0.056 * sin_deg(2.0 * mj - 2.0 * ms + 21.0)
                + 0.042 * sin_deg(3.0 * mj - 5.0 * ms + 21.0)
                - 0.036 * sin_deg(mj - 2.0 * ms)
                + 0.022 * cos_deg(mj - ms)
                + 0.023 * sin_deg(2.0 * mj - 3.0 * ms + 52.0)
                - 0.016 * sin_deg(mj - 5.0 * ms - 69.0),
            0.0,
        ),
        Body::Saturn => (
            0.812 * sin_deg(2.0 * mj - 5.0 * ms - 67.6) - 0.229 * cos_deg(2.0 * mj - 4.0 * ms - 2.0)
                + 0.119 * sin_deg(mj - 2.0 * ms - 3.0)
                + 0.046 * sin_deg(2.0 * mj - 6.0 * ms - 69.0)
                + 0.014 * sin_deg(mj - 3.0 * ms + 32.0),
            -0.020 * cos_deg(2.0 * mj - 4.0 * ms - 2.0) + 0.018 * sin_deg(2.0 * mj - 6.0 * ms - 49.0),
        ),
        Body::Uranus => (
            0.040 * sin_deg(ms - 2.0 * mu + 6.0) + 0.035 * sin_deg(ms - 3.0 * mu + 33.0)
                - 0.015 * sin_deg(mj - mu + 20.0),
            0.0,
        ),
        _ => (0.0, 0.0),
    }
}

/// Heliocentric Pluto, equinox of date.
fn pluto_heliocentric(d: f64) -> SphericalCoords {
    let s = (50.03 + 0.033459652 * d).to_radians();
    let p = (238.95 + 0.003968789 * d).to_radians();

    let lon = 238.9508 + 0.00400703 * d - 19.799 * p.sin() + 19.848 * p.cos()
        + 0.897 * (2.0 * p).sin()
        - 4.956 * (2.0 * p).cos()
        + 0.610 * (3.0 * p).sin()
        + 1.211 * (3.0 * p).cos()
        - 0.341 * (4.0 * p).sin()
        - 0.190 * (4.0 * p).cos()
        + 0.128 * (5.0 * p).sin()
        - 0.034 * (5.0 * p).cos()
        - 0.038 * (6.0 * p).sin()
        + 0.031 * (6.0 * p).cos()
        + 0.020 * (s - p).sin()
        - 0.010 * (s - p).cos();
    let lat = -3.9082 - 5.453 * p.sin() - 14.975 * p.cos() + 3.527 * (2.0 * p).sin()
        + 1.673 * (2.0 * p).cos()
        - 1.051 * (3.0 * p).sin()
        + 0.328 * (3.0 * p).cos()
        + 0.179 * (4.0 * p).sin()
        - 0.292 * (4.0 * p).cos()
        + 0.019 * (5.0 * p).sin()
        + 0.100 * (5.0 * p).cos()
        - 0.031 * (6.0 * p).sin()
        - 0.026 * (6.0 * p).cos()
        + 0.011 * (s - p).cos();
    let r = 40.72 + 6.68 * p.sin() + 6.90 * p.cos() - 1.18 * (2.0 * p).sin()
        - 0.03 * (2.0 * p).cos()
        + 0.15 * (3.0 * p).sin()
        - 0.14 * (3.0 * p).cos();

    // The series is referred to J2000; precess to date.
    let precession = 3.82394e-5 * (d - 1.5);
    SphericalCoords {
        lon_deg: normalize_deg(lon + precession),
        lat_deg: lat,
        distance: r,
    }
}

/// Heliocentric ecliptic position of date, or `None` for non-planets.
pub fn heliocentric(body: Body, jd_tt: f64) -> Option<SphericalCoords> {
    let d = jd_tt - ELEMENT_EPOCH_JD;
    if body == Body::Pluto {
        return Some(pluto_heliocentric(d));
    }
    let el = elements_for(body)?;
    let mut pos = kepler_heliocentric(el, d);
    let (dl, db) = perturbations(body, d);
    pos.lon_deg = normalize_deg(pos.lon_deg + dl);
    pos.lat_deg += db;
    Some(pos)
}

/// Geometric geocentric position of date, corrected for light time.
///
/// The Earth is taken at `jd_tt`, the planet at `jd_tt − τ`.
pub fn geocentric(body: Body, jd_tt: f64) -> Option<SphericalCoords> {
    let t = (jd_tt - 2_451_545.0) / 36525.0;
    let sun = sun::geometric(t);
    let earth_to_sun = spherical_to_cartesian(&sun);

    let mut tau = 0.0;
    let mut geo = SphericalCoords {
        lon_deg: 0.0,
        lat_deg: 0.0,
        distance: 0.0,
    };
    for _ in 0..3 {
        let helio = heliocentric(body, jd_tt - tau)?;
        let p = spherical_to_cartesian(&helio);
        geo = cartesian_to_spherical(&[
            p[0] + earth_to_sun[0],
            p[1] + earth_to_sun[1],
            p[2] + earth_to_sun[2],
        ]);
        tau = LIGHT_TIME_DAYS_PER_AU * geo.distance;
    }
    Some(geo)
}
