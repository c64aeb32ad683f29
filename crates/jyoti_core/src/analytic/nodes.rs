//! Lunar nodes.

use jyoti_frames::normalize_deg;

use super::moon::LunarArguments;

/// Mean longitude of the Moon's ascending node, degrees (Meeus eq. 47.7).
pub fn mean_node_deg(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    normalize_deg(
        125.0445479 - 1934.1362891 * t + 0.0020754 * t2 + t3 / 467_441.0 - t4 / 60_616_000.0,
    )
}

/// True (osculating) node: mean node plus the five largest periodic terms.
pub fn true_node_deg(t: f64) -> f64 {
    let a = LunarArguments::at(t);
    let d = a.elongation.to_radians();
    let m = a.sun_anomaly.to_radians();
    let mp = a.moon_anomaly.to_radians();
    let f = a.latitude_arg.to_radians();
    let correction = -1.4979 * (2.0 * (d - f)).sin() - 0.1500 * m.sin() - 0.1226 * (2.0 * d).sin()
        + 0.1176 * (2.0 * f).sin()
        - 0.0801 * (2.0 * (mp - f)).sin();
    normalize_deg(mean_node_deg(t) + correction)
}
