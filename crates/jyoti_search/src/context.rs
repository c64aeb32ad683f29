//! Shared inputs for every calendar search.

use jyoti_core::{Body, PositionSource};
use jyoti_frames::normalize_deg;
use jyoti_time::Instant;
use jyoti_vedic_base::{AyanamshaSystem, RiseSetConfig, ayanamsha_deg};

use crate::error::SearchError;

/// Position source plus the sidereal and horizon conventions a search runs
/// under.
#[derive(Clone, Copy)]
pub struct SearchContext<'a> {
    pub source: &'a dyn PositionSource,
    pub ayanamsha: AyanamshaSystem,
    pub riseset: RiseSetConfig,
}

impl<'a> SearchContext<'a> {
    pub fn new(source: &'a dyn PositionSource, ayanamsha: AyanamshaSystem) -> Self {
        Self {
            source,
            ayanamsha,
            riseset: RiseSetConfig::default(),
        }
    }

    pub fn with_riseset(mut self, riseset: RiseSetConfig) -> Self {
        self.riseset = riseset;
        self
    }

    fn tropical(&self, body: Body, instant: &Instant) -> Result<f64, SearchError> {
        Ok(self.source.position(body, instant, None)?.longitude_deg)
    }

    /// Moon − Sun elongation in [0, 360) at `jd_ut`.
    pub fn elongation_at(&self, jd_ut: f64) -> Result<f64, SearchError> {
        let instant = Instant::from_jd_ut(jd_ut)?;
        let moon = self.tropical(Body::Moon, &instant)?;
        let sun = self.tropical(Body::Sun, &instant)?;
        Ok(normalize_deg(moon - sun))
    }

    /// Sidereal longitude of `body` in [0, 360) at `jd_ut`.
    pub fn sidereal_at(&self, body: Body, jd_ut: f64) -> Result<f64, SearchError> {
        let instant = Instant::from_jd_ut(jd_ut)?;
        let lon = self.tropical(body, &instant)?;
        Ok(normalize_deg(lon - ayanamsha_deg(self.ayanamsha, &instant)))
    }

    pub fn sun_sidereal_at(&self, jd_ut: f64) -> Result<f64, SearchError> {
        self.sidereal_at(Body::Sun, jd_ut)
    }

    pub fn moon_sidereal_at(&self, jd_ut: f64) -> Result<f64, SearchError> {
        self.sidereal_at(Body::Moon, jd_ut)
    }

    /// Sidereal Sun + Moon in [0, 360); the ayanamsha does not cancel here.
    pub fn sidereal_sum_at(&self, jd_ut: f64) -> Result<f64, SearchError> {
        let instant = Instant::from_jd_ut(jd_ut)?;
        let aya = ayanamsha_deg(self.ayanamsha, &instant);
        let moon = self.tropical(Body::Moon, &instant)?;
        let sun = self.tropical(Body::Sun, &instant)?;
        Ok(normalize_deg(moon + sun - 2.0 * aya))
    }
}

impl std::fmt::Debug for SearchContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("source", &self.source.name())
            .field("ayanamsha", &self.ayanamsha)
            .field("riseset", &self.riseset)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jyoti_core::AnalyticSource;

    #[test]
    fn sum_matches_parts() {
        let src = AnalyticSource::default();
        let ctx = SearchContext::new(&src, AyanamshaSystem::Lahiri);
        let jd = 2_451_545.0;
        let sum = ctx.sidereal_sum_at(jd).unwrap();
        let parts =
            normalize_deg(ctx.moon_sidereal_at(jd).unwrap() + ctx.sun_sidereal_at(jd).unwrap());
        let d = (sum - parts).abs();
        assert!(d < 1e-9 || (d - 360.0).abs() < 1e-9, "{sum} vs {parts}");
    }

    #[test]
    fn elongation_is_ayanamsha_free() {
        let src = AnalyticSource::default();
        let jd = 2_460_400.5;
        let a = SearchContext::new(&src, AyanamshaSystem::Lahiri)
            .elongation_at(jd)
            .unwrap();
        let b = SearchContext::new(&src, AyanamshaSystem::Raman)
            .elongation_at(jd)
            .unwrap();
        assert_eq!(a, b);
    }
}
