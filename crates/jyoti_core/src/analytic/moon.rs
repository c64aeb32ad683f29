//! Truncated ELP-2000/82 lunar theory.
//!
//! The main periodic terms of Meeus, *Astronomical Algorithms*, 2nd ed.,
//! ch. 47 (tables 47.A and 47.B, largest terms). Accuracy is about 0.01° in
//! longitude and a few hundred km in distance over several centuries.

use jyoti_frames::{SphericalCoords, normalize_deg};

/// Kilometres per astronomical unit.
pub const AU_KM: f64 = 149_597_870.7;

/// Fundamental lunar arguments in degrees.
#[derive(Debug, Clone, Copy)]
pub struct LunarArguments {
    /// Mean longitude L′.
    pub mean_longitude: f64,
    /// Mean elongation D.
    pub elongation: f64,
    /// Sun's mean anomaly M.
    pub sun_anomaly: f64,
    /// Moon's mean anomaly M′.
    pub moon_anomaly: f64,
    /// Argument of latitude F.
    pub latitude_arg: f64,
}

impl LunarArguments {
    pub fn at(t: f64) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;
        let t4 = t3 * t;
        Self {
            mean_longitude: 218.3164477 + 481267.88123421 * t - 0.0015786 * t2 + t3 / 538841.0
                - t4 / 65194000.0,
            elongation: 297.8501921 + 445267.1114034 * t - 0.0018819 * t2 + t3 / 545868.0
                - t4 / 113065000.0,
            sun_anomaly: 357.5291092 + 35999.0502909 * t - 0.0001536 * t2 + t3 / 24490000.0,
            moon_anomaly: 134.9633964 + 477198.8675055 * t + 0.0087414 * t2 + t3 / 69699.0
                - t4 / 14712000.0,
            latitude_arg: 93.2720950 + 483202.0175233 * t - 0.0036539 * t2 - t3 / 3526000.0
                + t4 / 863310000.0,
        }
    }

    fn combine(&self, d: i8, m: i8, mp: i8, f: i8) -> f64 {
        (f64::from(d) * self.elongation
            + f64::from(m) * self.sun_anomaly
            + f64::from(mp) * self.moon_anomaly
            + f64::from(f) * self.latitude_arg)
            .to_radians()
    }
}

/// (D, M, M′, F, Σl coefficient in 1e-6°, Σr coefficient in 1e-3 km)
const LONGITUDE_DISTANCE_TERMS: [(i8, i8, i8, i8, f64, f64); 32] = [
    (0, 0, 1, 0, 6288774.0, -20905355.0),
    (2, 0, -1, 0, 1274027.0, -3699111.0),
    (2, 0, 0, 0, 658314.0, -2955968.0),
    (0, 0, 2, 0, 213618.0, -569925.0),
    (0, 1, 0, 0, -185116.0, 48888.0),
    (0, 0, 0, 2, -114332.0, -3149.0),
    (2, 0, -2, 0, 58793.0, 246158.0),
    (2, -1, -1, 0, 57066.0, -152138.0),
    (2, 0, 1, 0, 53322.0, -170733.0),
    (2, -1, 0, 0, 45758.0, -204586.0),
    (0, 1, -1, 0, -40923.0, -129620.0),
    (1, 0, 0, 0, -34720.0, 108743.0),
    (0, 1, 1, 0, -30383.0, 104755.0),
    (2, 0, 0, -2, 15327.0, 10321.0),
    (0, 0, 1, 2, -12528.0, 0.0),
    (0, 0, 1, -2, 10980.0, 79661.0),
    (4, 0, -1, 0, 10675.0, -34782.0),
    (0, 0, 3, 0, 10034.0, -23210.0),
    (4, 0, -2, 0, 8548.0, -21636.0),
    (2, 1, -1, 0, -7888.0, 24208.0),
    (2, 1, 0, 0, -6766.0, 30824.0),
    (1, 0, -1, 0, -5163.0, -8379.0),
    (1, 1, 0, 0, 4987.0, -16675.0),
    (2, -1, 1, 0, 4036.0, -12831.0),
    (2, 0, 2, 0, 3994.0, -10445.0),
    (4, 0, 0, 0, 3861.0, -11650.0),
    (2, 0, -3, 0, 3665.0, 14403.0),
    (0, 1, -2, 0, -2689.0, -7003.0),
    (2, 0, -1, 2, -2602.0, 0.0),
    (2, -1, -2, 0, 2390.0, 10056.0),
    (1, 0, 1, 0, -2348.0, 6322.0),
    (2, -2, 0, 0, 2236.0, -9884.0),
];

/// (D, M, M′, F, Σb coefficient in 1e-6°)
const LATITUDE_TERMS: [(i8, i8, i8, i8, f64); 20] = [
    (0, 0, 0, 1, 5128122.0),
    (0, 0, 1, 1, 280602.0),
    (0, 0, 1, -1, 277693.0),
    (2, 0, 0, -1, 173237.0),
    (2, 0, -1, 1, 55413.0),
    (2, 0, -1, -1, 46271.0),
    (2, 0, 0, 1, 32573.0),
    (0, 0, 2, 1, 17198.0),
    (2, 0, 1, -1, 9266.0),
    (0, 0, 2, -1, 8822.0),
    (2, -1, 0, -1, 8216.0),
    (2, 0, -2, -1, 4324.0),
    (2, 0, 1, 1, 4200.0),
    (2, 1, 0, -1, -3359.0),
    (2, -1, -1, 1, 2463.0),
    (2, -1, 0, 1, 2211.0),
    (2, -1, -1, -1, 2065.0),
    (0, 1, -1, -1, -1870.0),
    (4, 0, -1, -1, 1828.0),
    (0, 1, 0, 1, -1794.0),
];

/// Geometric geocentric Moon, mean equinox of date. Distance in AU.
pub fn geometric(t: f64) -> SphericalCoords {
    let args = LunarArguments::at(t);
    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479264.290 * t).to_radians();
    let a3 = (313.45 + 481266.484 * t).to_radians();
    // Eccentricity of the Earth's orbit scales terms containing M.
    let e = 1.0 - 0.002516 * t - 0.0000074 * t * t;

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for &(d, m, mp, f, l, r) in &LONGITUDE_DISTANCE_TERMS {
        let arg = args.combine(d, m, mp, f);
        let scale = e.powi(i32::from(m.abs()));
        sum_l += l * scale * arg.sin();
        sum_r += r * scale * arg.cos();
    }

    let mut sum_b = 0.0;
    for &(d, m, mp, f, b) in &LATITUDE_TERMS {
        let scale = e.powi(i32::from(m.abs()));
        sum_b += b * scale * args.combine(d, m, mp, f).sin();
    }

    let lp = args.mean_longitude.to_radians();
    let f = args.latitude_arg.to_radians();
    let mp = args.moon_anomaly.to_radians();
    sum_l += 3958.0 * a1.sin() + 1962.0 * (lp - f).sin() + 318.0 * a2.sin();
    sum_b += -2235.0 * lp.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (lp - mp).sin()
        - 115.0 * (lp + mp).sin();

    let distance_km = 385_000.56 + sum_r / 1000.0;
    SphericalCoords {
        lon_deg: normalize_deg(args.mean_longitude + sum_l / 1e6),
        lat_deg: sum_b / 1e6,
        distance: distance_km / AU_KM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_47a() {
        // 1992 Apr 12.0 TD: λ = 133.162655° (before nutation), β = −3.229126°, Δ = 368409.7 km
        let t = (2_448_724.5 - 2_451_545.0) / 36525.0;
        let m = geometric(t);
        assert!((m.lon_deg - 133.162655).abs() < 1e-3, "λ = {}", m.lon_deg);
        // truncated latitude and distance series
        assert!((m.lat_deg + 3.229126).abs() < 0.01, "β = {}", m.lat_deg);
        assert!((m.distance * AU_KM - 368_409.7).abs() < 30.0);
    }

    #[test]
    fn distance_stays_in_orbit_range() {
        let mut t = -0.01;
        while t < 0.01 {
            let km = geometric(t).distance * AU_KM;
            assert!((355_000.0..407_000.0).contains(&km), "{km} km");
            t += 0.0003;
        }
    }
}
