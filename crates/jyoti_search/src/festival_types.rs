//! Declarative festival rules and regional calendar variants.

use serde::{Deserialize, Serialize};

use jyoti_time::CivilDate;
use jyoti_vedic_base::{Masa, Nakshatra, Paksha, Rashi};

use crate::error::SearchError;
use crate::masa::MonthScheme;

/// Part of the day at which a rule is tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Kala {
    #[default]
    Sunrise,
    Sunset,
    /// Midpoint between sunrise and sunset.
    Madhyahna,
}

impl Kala {
    /// Instant of this kala given the day's sunrise and sunset.
    pub fn jd_between(self, sunrise_jd: f64, sunset_jd: f64) -> f64 {
        match self {
            Self::Sunrise => sunrise_jd,
            Self::Sunset => sunset_jd,
            Self::Madhyahna => 0.5 * (sunrise_jd + sunset_jd),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunrise => "sunrise",
            Self::Sunset => "sunset",
            Self::Madhyahna => "madhyahna",
        }
    }
}

/// Regional calendar conventions.
///
/// `kala` decides which day a tithi is observed on: the first day at whose
/// kala it prevails. Rules that pin their own kala keep it when
/// `honor_rule_kala` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarVariant {
    pub scheme: MonthScheme,
    pub kala: Kala,
    pub honor_rule_kala: bool,
}

impl Default for CalendarVariant {
    fn default() -> Self {
        Self::amanta()
    }
}

impl CalendarVariant {
    /// Amanta months, sunrise tie-break (South and West India).
    pub const fn amanta() -> Self {
        Self {
            scheme: MonthScheme::Amanta,
            kala: Kala::Sunrise,
            honor_rule_kala: true,
        }
    }

    /// Purnimanta months, sunrise tie-break (North India).
    pub const fn purnimanta() -> Self {
        Self {
            scheme: MonthScheme::Purnimanta,
            kala: Kala::Sunrise,
            honor_rule_kala: true,
        }
    }

    pub const fn with_kala(mut self, kala: Kala) -> Self {
        self.kala = kala;
        self
    }

    pub const fn with_scheme(mut self, scheme: MonthScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub const fn with_rule_kala(mut self, honor: bool) -> Self {
        self.honor_rule_kala = honor;
        self
    }

    /// Kala a rule is evaluated at under this variant.
    pub fn kala_for(&self, rule: &FestivalRule) -> Kala {
        match rule.kala {
            Some(k) if self.honor_rule_kala => k,
            _ => self.kala,
        }
    }
}

/// Tithi-based condition. `masa` is always the amanta month name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunarRule {
    pub masa: Masa,
    pub paksha: Paksha,
    /// 1-15; 15 is Purnima in shukla paksha and Amavasya in krishna.
    pub tithi_in_paksha: u8,
    pub nakshatra: Option<Nakshatra>,
}

impl LunarRule {
    /// 0-based tithi index (0..29).
    pub fn tithi_index(&self) -> u8 {
        let base = match self.paksha {
            Paksha::Shukla => 0,
            Paksha::Krishna => 15,
        };
        base + self.tithi_in_paksha.saturating_sub(1)
    }
}

/// Sankranti condition: the Sun's ingress into `rashi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolarRule {
    pub rashi: Rashi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    Lunar(LunarRule),
    Solar(SolarRule),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FestivalRule {
    pub name: String,
    pub kind: RuleKind,
    /// Kala this observance is traditionally tied to.
    pub kala: Option<Kala>,
}

impl FestivalRule {
    pub fn lunar(
        name: impl Into<String>,
        masa: Masa,
        paksha: Paksha,
        tithi_in_paksha: u8,
    ) -> Self {
        Self {
            name: name.into(),
            kind: RuleKind::Lunar(LunarRule {
                masa,
                paksha,
                tithi_in_paksha,
                nakshatra: None,
            }),
            kala: None,
        }
    }

    pub fn solar(name: impl Into<String>, rashi: Rashi) -> Self {
        Self {
            name: name.into(),
            kind: RuleKind::Solar(SolarRule { rashi }),
            kala: None,
        }
    }

    pub fn at_kala(mut self, kala: Kala) -> Self {
        self.kala = Some(kala);
        self
    }

    /// Additionally require the Moon in `nakshatra` at the kala. No-op for
    /// solar rules.
    pub fn with_nakshatra(mut self, nakshatra: Nakshatra) -> Self {
        if let RuleKind::Lunar(l) = &mut self.kind {
            l.nakshatra = Some(nakshatra);
        }
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.name.trim().is_empty() {
            return Err(SearchError::Validation("festival rule needs a name".into()));
        }
        if let RuleKind::Lunar(l) = self.kind {
            if !(1..=15).contains(&l.tithi_in_paksha) {
                return Err(SearchError::Validation(format!(
                    "{}: tithi in paksha must be 1..=15, got {}",
                    self.name, l.tithi_in_paksha
                )));
            }
        }
        Ok(())
    }
}

/// A rule resolved to a civil day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FestivalOccurrence {
    pub name: String,
    pub date: CivilDate,
    /// Kala the rule was evaluated at.
    pub kala: Kala,
    /// Instant of that kala on `date` (JD UT).
    pub kala_jd: f64,
    /// The tithi touched no kala and was assigned to the day it lies in.
    pub kshaya: bool,
}
