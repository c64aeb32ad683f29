//! Festival rule evaluation.
//!
//! Each rule is tested at one kala per day (sunrise, sunset or madhyahna,
//! from the rule or the calendar variant). A lunar rule lands on the first
//! day at whose kala its tithi prevails. A kshaya tithi, one that begins
//! after kala(d) and ends before kala(d+1), goes to day d. Observances in
//! adhika months are skipped; they fall in the nija month that follows.
//! A solar rule lands on the first day whose kala follows the sankranti.

use std::collections::HashMap;

use jyoti_core::GeoLocation;
use jyoti_time::CivilDate;
use jyoti_vedic_base::{
    Masa, Nakshatra, Paksha, Rashi, nakshatra_from_longitude, rashi_from_longitude,
    tithi_from_elongation,
};
use tracing::debug;

use crate::context::SearchContext;
use crate::error::SearchError;
use crate::festival_types::{
    CalendarVariant, FestivalOccurrence, FestivalRule, Kala, LunarRule, RuleKind, SolarRule,
};
use crate::masa::{Lunation, find_lunation, lunation_containing, lunations_between};
use crate::panchang::sunrise_sunset;

/// Sky state at one kala of one day.
#[derive(Debug, Clone, Copy)]
struct KalaSample {
    jd_ut: f64,
    tithi_index: u8,
    nakshatra: Nakshatra,
    sun_rashi: Rashi,
    lunation: Lunation,
}

/// Memoizes per-day sunrise/sunset and per-(day, kala) samples over a
/// date range, with the lunations of that range computed up front.
struct DaySampler<'c, 'a> {
    ctx: &'c SearchContext<'a>,
    location: GeoLocation,
    lunations: Vec<Lunation>,
    sun_times: HashMap<CivilDate, (f64, f64)>,
    samples: HashMap<(CivilDate, Kala), KalaSample>,
}

impl<'c, 'a> DaySampler<'c, 'a> {
    fn new(
        ctx: &'c SearchContext<'a>,
        location: GeoLocation,
        first: CivilDate,
        last: CivilDate,
    ) -> Result<Self, SearchError> {
        let lunations =
            lunations_between(ctx, first.jd_midnight() - 1.0, last.jd_midnight() + 2.0)?;
        Ok(Self {
            ctx,
            location,
            lunations,
            sun_times: HashMap::new(),
            samples: HashMap::new(),
        })
    }

    fn kala_jd(&mut self, date: CivilDate, kala: Kala) -> Result<f64, SearchError> {
        let (rise, set) = match self.sun_times.get(&date) {
            Some(t) => *t,
            None => {
                let t = sunrise_sunset(self.ctx, &self.location, date)?;
                self.sun_times.insert(date, t);
                t
            }
        };
        Ok(kala.jd_between(rise, set))
    }

    fn sample(&mut self, date: CivilDate, kala: Kala) -> Result<KalaSample, SearchError> {
        if let Some(s) = self.samples.get(&(date, kala)) {
            return Ok(*s);
        }
        let jd = self.kala_jd(date, kala)?;
        let ctx = self.ctx;
        let lunation = match find_lunation(&self.lunations, jd) {
            Some(l) => *l,
            None => lunation_containing(ctx, jd)?,
        };
        let s = KalaSample {
            jd_ut: jd,
            tithi_index: tithi_from_elongation(ctx.elongation_at(jd)?)?.tithi_index,
            nakshatra: nakshatra_from_longitude(ctx.moon_sidereal_at(jd)?)?.nakshatra,
            sun_rashi: rashi_from_longitude(ctx.sun_sidereal_at(jd)?)?.rashi,
            lunation,
        };
        self.samples.insert((date, kala), s);
        Ok(s)
    }

    fn evaluate(
        &mut self,
        rule: &FestivalRule,
        variant: &CalendarVariant,
        date: CivilDate,
    ) -> Result<Option<FestivalOccurrence>, SearchError> {
        let kala = variant.kala_for(rule);
        let hit = match rule.kind {
            RuleKind::Lunar(l) => self.lunar_hit(&l, kala, date)?,
            RuleKind::Solar(s) => self.solar_hit(&s, kala, date)?,
        };
        Ok(hit.map(|(kala_jd, kshaya)| FestivalOccurrence {
            name: rule.name.clone(),
            date,
            kala,
            kala_jd,
            kshaya,
        }))
    }

    /// `(kala instant, kshaya)` when the rule selects `date`.
    fn lunar_hit(
        &mut self,
        rule: &LunarRule,
        kala: Kala,
        date: CivilDate,
    ) -> Result<Option<(f64, bool)>, SearchError> {
        let target = rule.tithi_index();
        let today = self.sample(date, kala)?;

        let (lunation, kshaya, nakshatra_ok) = if today.tithi_index == target {
            let yesterday = self.sample(date.add_days(-1), kala)?;
            if yesterday.tithi_index == target {
                return Ok(None);
            }
            let ok = rule.nakshatra.is_none_or(|n| n == today.nakshatra);
            (today.lunation, false, ok)
        } else if today.tithi_index == (target + 29) % 30 {
            let tomorrow = self.sample(date.add_days(1), kala)?;
            if tomorrow.tithi_index != (target + 1) % 30 {
                return Ok(None);
            }
            // Pratipada opens the next lunation
            let lunation = if target == 0 {
                tomorrow.lunation
            } else {
                today.lunation
            };
            let ok = rule
                .nakshatra
                .is_none_or(|n| n == today.nakshatra || n == tomorrow.nakshatra);
            (lunation, true, ok)
        } else {
            return Ok(None);
        };

        if lunation.adhika || lunation.masa != rule.masa || !nakshatra_ok {
            return Ok(None);
        }
        Ok(Some((today.jd_ut, kshaya)))
    }

    fn solar_hit(
        &mut self,
        rule: &SolarRule,
        kala: Kala,
        date: CivilDate,
    ) -> Result<Option<(f64, bool)>, SearchError> {
        let today = self.sample(date, kala)?;
        if today.sun_rashi != rule.rashi {
            return Ok(None);
        }
        let yesterday = self.sample(date.add_days(-1), kala)?;
        if yesterday.sun_rashi == rule.rashi {
            return Ok(None);
        }
        Ok(Some((today.jd_ut, false)))
    }
}

fn validate_rules(rules: &[FestivalRule]) -> Result<(), SearchError> {
    rules.iter().try_for_each(FestivalRule::validate)
}

/// Festivals observed on `date` under `variant`.
pub fn festivals_on_day(
    ctx: &SearchContext<'_>,
    date: CivilDate,
    location: &GeoLocation,
    variant: &CalendarVariant,
    rules: &[FestivalRule],
) -> Result<Vec<FestivalOccurrence>, SearchError> {
    validate_rules(rules)?;
    if rules.is_empty() {
        return Ok(Vec::new());
    }
    let location = location.validated()?;
    let mut sampler = DaySampler::new(ctx, location, date.add_days(-1), date.add_days(1))?;
    let mut out = Vec::new();
    for rule in rules {
        if let Some(o) = sampler.evaluate(rule, variant, date)? {
            out.push(o);
        }
    }
    Ok(out)
}

/// Every occurrence of `rules` with a date in the Gregorian `year`, in
/// date order.
pub fn festivals_in_year(
    ctx: &SearchContext<'_>,
    year: i32,
    location: &GeoLocation,
    variant: &CalendarVariant,
    rules: &[FestivalRule],
) -> Result<Vec<FestivalOccurrence>, SearchError> {
    validate_rules(rules)?;
    let location = location.validated()?;
    let first = CivilDate::new(year, 1, 1)?;
    let last = CivilDate::new(year, 12, 31)?;
    let mut sampler = DaySampler::new(ctx, location, first.add_days(-1), last.add_days(1))?;

    let mut out = Vec::new();
    for date in CivilDate::days_of_year(year) {
        for rule in rules {
            if let Some(o) = sampler.evaluate(rule, variant, date)? {
                out.push(o);
            }
        }
    }
    debug!(
        year,
        rules = rules.len(),
        occurrences = out.len(),
        samples = sampler.samples.len(),
        "festival year evaluated"
    );
    Ok(out)
}

/// Widely observed festivals with their classical (amanta) definitions.
pub fn builtin_festivals() -> Vec<FestivalRule> {
    use Paksha::{Krishna, Shukla};
    vec![
        FestivalRule::lunar("Ugadi", Masa::Chaitra, Shukla, 1),
        FestivalRule::lunar("Rama Navami", Masa::Chaitra, Shukla, 9).at_kala(Kala::Madhyahna),
        FestivalRule::lunar("Akshaya Tritiya", Masa::Vaishakha, Shukla, 3),
        FestivalRule::lunar("Guru Purnima", Masa::Ashadha, Shukla, 15),
        FestivalRule::lunar("Raksha Bandhan", Masa::Shravana, Shukla, 15),
        FestivalRule::lunar("Krishna Janmashtami", Masa::Shravana, Krishna, 8),
        FestivalRule::lunar("Ganesh Chaturthi", Masa::Bhadrapada, Shukla, 4)
            .at_kala(Kala::Madhyahna),
        FestivalRule::lunar("Navaratri", Masa::Ashwin, Shukla, 1),
        FestivalRule::lunar("Vijaya Dashami", Masa::Ashwin, Shukla, 10),
        FestivalRule::lunar("Diwali", Masa::Ashwin, Krishna, 15).at_kala(Kala::Sunset),
        FestivalRule::lunar("Maha Shivaratri", Masa::Magha, Krishna, 14).at_kala(Kala::Sunset),
        FestivalRule::lunar("Holika Dahan", Masa::Phalguna, Shukla, 15).at_kala(Kala::Sunset),
        FestivalRule::solar("Makar Sankranti", Rashi::Makara),
        FestivalRule::solar("Mesha Sankranti", Rashi::Mesha),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use jyoti_core::AnalyticSource;
    use jyoti_vedic_base::AyanamshaSystem;

    fn delhi() -> GeoLocation {
        GeoLocation::new(28.6139, 77.2090, 0.0)
    }

    #[test]
    fn builtins_are_valid_and_unique() {
        let rules = builtin_festivals();
        assert!(validate_rules(&rules).is_ok());
        let mut names: Vec<_> = rules.iter().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), rules.len());
    }

    #[test]
    fn ugadi_2024() {
        let src = AnalyticSource::default();
        let ctx = SearchContext::new(&src, AyanamshaSystem::Lahiri);
        let date = CivilDate::new(2024, 4, 9).unwrap();
        let found = festivals_on_day(
            &ctx,
            date,
            &delhi(),
            &CalendarVariant::amanta(),
            &builtin_festivals(),
        )
        .unwrap();
        assert!(found.iter().any(|o| o.name == "Ugadi" && !o.kshaya), "{found:?}");
        let day_before = festivals_on_day(
            &ctx,
            date.add_days(-1),
            &delhi(),
            &CalendarVariant::amanta(),
            &builtin_festivals(),
        )
        .unwrap();
        assert!(day_before.iter().all(|o| o.name != "Ugadi"));
    }

    #[test]
    fn makar_sankranti_2024_next_sunrise() {
        let src = AnalyticSource::default();
        let ctx = SearchContext::new(&src, AyanamshaSystem::Lahiri);
        let rules = [FestivalRule::solar("Makar Sankranti", Rashi::Makara)];
        let occ = festivals_in_year(&ctx, 2024, &delhi(), &CalendarVariant::amanta(), &rules)
            .unwrap();
        assert_eq!(occ.len(), 1);
        assert_eq!(occ[0].date, CivilDate::new(2024, 1, 15).unwrap());
        assert_eq!(occ[0].kala, Kala::Sunrise);
    }

    #[test]
    fn empty_rules_short_circuit() {
        let src = AnalyticSource::default();
        let ctx = SearchContext::new(&src, AyanamshaSystem::Lahiri);
        let date = CivilDate::new(2024, 1, 1).unwrap();
        let v = CalendarVariant::amanta();
        assert!(festivals_on_day(&ctx, date, &delhi(), &v, &[]).unwrap().is_empty());
    }

    #[test]
    fn invalid_rule_rejected() {
        let src = AnalyticSource::default();
        let ctx = SearchContext::new(&src, AyanamshaSystem::Lahiri);
        let date = CivilDate::new(2024, 1, 1).unwrap();
        let bad = [FestivalRule::lunar("bad", Masa::Magha, Paksha::Shukla, 0)];
        let err = festivals_on_day(&ctx, date, &delhi(), &CalendarVariant::amanta(), &bad);
        assert!(matches!(err, Err(SearchError::Validation(_))));
    }
}
