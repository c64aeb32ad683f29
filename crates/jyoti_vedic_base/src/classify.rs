//! Sidereal longitude → rashi, nakshatra and pada.
//!
//! Every boundary is a closed-open interval `[start, end)`, so a longitude
//! exactly on a boundary belongs to the higher-index segment. Input must
//! already be normalized to `[0, 360)`; anything else is rejected rather
//! than wrapped.

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::nakshatra::{ALL_NAKSHATRAS_27, NAKSHATRA_SPAN_27, Nakshatra, PADA_SPAN};
use crate::rashi::{ALL_RASHIS, Dms, RASHI_SPAN, Rashi, deg_to_dms};

/// Rashi position of a sidereal longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RashiInfo {
    pub rashi: Rashi,
    /// Decimal degrees within the rashi [0.0, 30.0).
    pub degrees_in_rashi: f64,
    /// Position within the rashi as DMS.
    pub dms: Dms,
}

/// Nakshatra and pada position of a sidereal longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NakshatraInfo {
    pub nakshatra: Nakshatra,
    /// Pada 1-4.
    pub pada: u8,
    /// Degrees elapsed within the nakshatra [0, 13.333...).
    pub degrees_in_nakshatra: f64,
    /// Degrees elapsed within the pada [0, 3.333...).
    pub degrees_in_pada: f64,
}

impl NakshatraInfo {
    /// Fraction of the nakshatra already traversed, in [0, 1).
    pub fn elapsed_fraction(&self) -> f64 {
        self.degrees_in_nakshatra / NAKSHATRA_SPAN_27
    }
}

/// Full classification of one sidereal longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub longitude_deg: f64,
    pub rashi: RashiInfo,
    pub nakshatra: NakshatraInfo,
}

impl Classification {
    pub fn pada(&self) -> u8 {
        self.nakshatra.pada
    }
}

fn check_normalized(lon: f64) -> Result<(), VedicError> {
    if !lon.is_finite() {
        return Err(VedicError::Validation(format!(
            "sidereal longitude must be finite, got {lon}"
        )));
    }
    if !(0.0..360.0).contains(&lon) {
        return Err(VedicError::Validation(format!(
            "sidereal longitude must be in [0, 360), got {lon}"
        )));
    }
    Ok(())
}

/// Index of the segment containing `lon`, guarding the float edge where
/// `lon / span` rounds up to `count`.
fn segment(lon: f64, span: f64, count: usize) -> usize {
    ((lon / span).floor() as usize).min(count - 1)
}

/// Rashi of a normalized sidereal longitude.
pub fn rashi_from_longitude(sidereal_lon_deg: f64) -> Result<RashiInfo, VedicError> {
    check_normalized(sidereal_lon_deg)?;
    let idx = segment(sidereal_lon_deg, RASHI_SPAN, 12);
    let degrees_in_rashi = sidereal_lon_deg - idx as f64 * RASHI_SPAN;
    Ok(RashiInfo {
        rashi: ALL_RASHIS[idx],
        degrees_in_rashi,
        dms: deg_to_dms(degrees_in_rashi),
    })
}

/// Nakshatra and pada of a normalized sidereal longitude.
pub fn nakshatra_from_longitude(sidereal_lon_deg: f64) -> Result<NakshatraInfo, VedicError> {
    check_normalized(sidereal_lon_deg)?;
    let idx = segment(sidereal_lon_deg, NAKSHATRA_SPAN_27, 27);
    let degrees_in_nakshatra = (sidereal_lon_deg - idx as f64 * NAKSHATRA_SPAN_27).max(0.0);
    let pada_idx = segment(degrees_in_nakshatra, PADA_SPAN, 4);
    Ok(NakshatraInfo {
        nakshatra: ALL_NAKSHATRAS_27[idx],
        pada: pada_idx as u8 + 1,
        degrees_in_nakshatra,
        degrees_in_pada: (degrees_in_nakshatra - pada_idx as f64 * PADA_SPAN).max(0.0),
    })
}

/// Rashi, nakshatra and pada of a normalized sidereal longitude.
pub fn classify(sidereal_lon_deg: f64) -> Result<Classification, VedicError> {
    Ok(Classification {
        longitude_deg: sidereal_lon_deg,
        rashi: rashi_from_longitude(sidereal_lon_deg)?,
        nakshatra: nakshatra_from_longitude(sidereal_lon_deg)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_ashwini_pada_one() {
        let c = classify(0.0).unwrap();
        assert_eq!(c.rashi.rashi, Rashi::Mesha);
        assert_eq!(c.nakshatra.nakshatra, Nakshatra::Ashwini);
        assert_eq!(c.pada(), 1);
    }

    #[test]
    fn boundary_goes_to_higher_segment() {
        assert_eq!(rashi_from_longitude(30.0).unwrap().rashi, Rashi::Vrishabha);
        let n = nakshatra_from_longitude(NAKSHATRA_SPAN_27).unwrap();
        assert_eq!(n.nakshatra, Nakshatra::Bharani);
        assert_eq!(n.pada, 1);
        let p = nakshatra_from_longitude(PADA_SPAN * 2.0).unwrap();
        assert_eq!(p.pada, 3);
    }

    #[test]
    fn just_below_360() {
        let c = classify(359.999_999).unwrap();
        assert_eq!(c.rashi.rashi, Rashi::Meena);
        assert_eq!(c.nakshatra.nakshatra, Nakshatra::Revati);
        assert_eq!(c.pada(), 4);
    }

    #[test]
    fn swati_pada_four() {
        let c = classify(199.47).unwrap();
        assert_eq!(c.rashi.rashi, Rashi::Tula);
        assert_eq!(c.nakshatra.nakshatra, Nakshatra::Swati);
        assert_eq!(c.pada(), 4);
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(classify(360.0).is_err());
        assert!(classify(-0.1).is_err());
        assert!(classify(f64::NAN).is_err());
        assert!(classify(f64::INFINITY).is_err());
    }

    #[test]
    fn elapsed_fraction_mid_nakshatra() {
        let n = nakshatra_from_longitude(NAKSHATRA_SPAN_27 * 3.5).unwrap();
        assert!((n.elapsed_fraction() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn dms_within_rashi() {
        let r = rashi_from_longitude(45.5).unwrap();
        assert_eq!(r.dms.degrees, 15);
        assert_eq!(r.dms.minutes, 30);
    }
}
