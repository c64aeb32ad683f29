//! Proportional sub-period generation over a parent's nominal span.
//!
//! Children are laid out as if the parent ran in full, then clipped to the
//! span actually lived. For the birth mahadasha this places the antardashas
//! where they classically fall, so the first lived antardasha is usually
//! not the mahadasha lord's own.

use super::types::{DashaLevel, DashaPeriod};
use crate::graha::Graha;

/// Rotate `sequence` so it starts at `first`.
pub fn cyclic_from(sequence: &[(Graha, f64)], first: Graha) -> Vec<(Graha, f64)> {
    let start = sequence
        .iter()
        .position(|(g, _)| *g == first)
        .unwrap_or(0);
    sequence[start..]
        .iter()
        .chain(sequence[..start].iter())
        .copied()
        .collect()
}

/// Children of `parent`, each sized `weight / total_weight` of the parent's
/// nominal duration, starting from the parent's own lord.
///
/// Children that fall entirely outside the lived span are dropped; the
/// survivors tile `[parent.start_jd, parent.end_jd)` without gaps.
pub fn proportional_children(
    parent: &DashaPeriod,
    sequence: &[(Graha, f64)],
    total_weight: f64,
    child_level: DashaLevel,
    parent_idx: u32,
) -> Vec<DashaPeriod> {
    let ordered = cyclic_from(sequence, parent.lord);
    let nominal = parent.nominal_duration_days();
    let mut children = Vec::with_capacity(ordered.len());
    let mut cursor = parent.nominal_start_jd;
    let last = ordered.len().saturating_sub(1);

    for (i, &(lord, weight)) in ordered.iter().enumerate() {
        let nominal_end = if i == last {
            parent.nominal_end_jd
        } else {
            cursor + weight / total_weight * nominal
        };
        let start = cursor.max(parent.start_jd);
        let end = nominal_end.min(parent.end_jd);
        if end > start {
            children.push(DashaPeriod {
                lord,
                level: child_level,
                start_jd: start,
                end_jd: end,
                nominal_start_jd: cursor,
                nominal_end_jd: nominal_end,
                order: (i as u16) + 1,
                parent_idx,
            });
        }
        cursor = nominal_end;
    }

    children
}

/// Index of the period containing `jd` in a start-ordered, gap-free slice.
pub fn find_active_period(periods: &[DashaPeriod], jd: f64) -> Option<usize> {
    let idx = periods.partition_point(|p| p.start_jd <= jd);
    if idx == 0 {
        return None;
    }
    if periods[idx - 1].contains(jd) {
        Some(idx - 1)
    } else {
        None
    }
}
