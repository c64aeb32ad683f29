//! Step-and-bisect root finding for angular functions of time.

use crate::error::SearchError;

/// Wrap an angle difference into [-180, 180).
pub(crate) fn normalize_to_pm180(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r >= 180.0 { r - 360.0 } else { r }
}

/// Scan from `jd_start` in steps of `step` days (negative searches
/// backward) for a sign change of `f`, then bisect it down to `tol_days`.
///
/// `f` is expected to be an angle difference wrapped by
/// [`normalize_to_pm180`]; the ±180 wrap jump is not a root and is skipped.
pub(crate) fn find_zero_crossing(
    f: &dyn Fn(f64) -> Result<f64, SearchError>,
    jd_start: f64,
    step: f64,
    max_steps: usize,
    max_iter: usize,
    tol_days: f64,
) -> Result<Option<f64>, SearchError> {
    if step == 0.0 || !step.is_finite() || !jd_start.is_finite() {
        return Err(SearchError::Validation(format!(
            "bad scan start {jd_start} or step {step}"
        )));
    }
    let mut t_a = jd_start;
    let mut f_a = f(t_a)?;
    for _ in 0..max_steps {
        let t_b = t_a + step;
        let f_b = f(t_b)?;
        if (f_a < 0.0) != (f_b < 0.0) && (f_a - f_b).abs() < 180.0 {
            let (lo, f_lo, hi) = if step > 0.0 {
                (t_a, f_a, t_b)
            } else {
                (t_b, f_b, t_a)
            };
            return bisect(f, lo, f_lo, hi, max_iter, tol_days).map(Some);
        }
        t_a = t_b;
        f_a = f_b;
    }
    Ok(None)
}

fn bisect(
    f: &dyn Fn(f64) -> Result<f64, SearchError>,
    mut lo: f64,
    f_lo: f64,
    mut hi: f64,
    max_iter: usize,
    tol_days: f64,
) -> Result<f64, SearchError> {
    let lo_negative = f_lo < 0.0;
    for _ in 0..max_iter {
        if hi - lo < tol_days {
            break;
        }
        let mid = 0.5 * (lo + hi);
        if (f(mid)? < 0.0) == lo_negative {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(0.5 * (lo + hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_range() {
        assert_eq!(normalize_to_pm180(190.0), -170.0);
        assert_eq!(normalize_to_pm180(-190.0), 170.0);
        assert_eq!(normalize_to_pm180(180.0), -180.0);
        assert_eq!(normalize_to_pm180(360.0), 0.0);
    }

    #[test]
    fn linear_root_forward_and_backward() {
        // 12 deg/day angle crossing 30 deg at t = 2.5
        let f = |t: f64| Ok(normalize_to_pm180(12.0 * t - 30.0));
        let fwd = find_zero_crossing(&f, 0.0, 0.25, 40, 60, 1e-9)
            .unwrap()
            .unwrap();
        assert!((fwd - 2.5).abs() < 1e-8, "{fwd}");
        let back = find_zero_crossing(&f, 5.0, -0.25, 40, 60, 1e-9)
            .unwrap()
            .unwrap();
        assert!((back - 2.5).abs() < 1e-8, "{back}");
    }

    #[test]
    fn wrap_jump_is_not_a_root() {
        // Crosses +180 at t = 15, the real root is at t = 30
        let f = |t: f64| Ok(normalize_to_pm180(12.0 * t));
        let r = find_zero_crossing(&f, 1.0, 1.0, 40, 60, 1e-9)
            .unwrap()
            .unwrap();
        assert!((r - 30.0).abs() < 1e-8, "{r}");
    }

    #[test]
    fn none_when_out_of_range() {
        let f = |t: f64| Ok(normalize_to_pm180(t - 100.0));
        assert!(find_zero_crossing(&f, 0.0, 1.0, 10, 60, 1e-9).unwrap().is_none());
    }

    #[test]
    fn zero_step_rejected() {
        let f = |_t: f64| Ok(0.0);
        assert!(find_zero_crossing(&f, 0.0, 0.0, 10, 60, 1e-9).is_err());
    }
}
