//! Types for the panchang of a civil day.

use serde::Serialize;

use jyoti_time::{CivilDate, Weekday};
use jyoti_vedic_base::{
    DayWindows, Graha, Karana, Masa, Nakshatra, Paksha, Tithi, Yoga, vaara_lord, vaara_name,
};

use crate::masa::MonthScheme;

/// Tithi prevailing at an instant, with the instant it ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TithiInfo {
    pub tithi: Tithi,
    /// 0-based tithi index (0..29).
    pub tithi_index: u8,
    pub paksha: Paksha,
    /// 1-based tithi number within the paksha (1-15).
    pub tithi_in_paksha: u8,
    /// End of this tithi (JD UT), when the boundary search brackets it.
    pub end_jd: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanchangNakshatraInfo {
    pub nakshatra: Nakshatra,
    pub pada: u8,
    pub end_jd: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YogaInfo {
    pub yoga: Yoga,
    /// 0-based yoga index (0..26).
    pub yoga_index: u8,
    pub end_jd: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KaranaInfo {
    pub karana: Karana,
    /// 0-based karana sequence index within the synodic month (0..59).
    pub karana_index: u8,
    pub end_jd: Option<f64>,
}

/// Lunar month of a day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MasaInfo {
    /// Amanta month name.
    pub amanta: Masa,
    /// Month name under `scheme`.
    pub masa: Masa,
    pub scheme: MonthScheme,
    pub adhika: bool,
    /// Opening new moon of the amanta lunation (JD UT).
    pub lunation_start_jd: f64,
    /// Closing new moon of the amanta lunation (JD UT).
    pub lunation_end_jd: f64,
}

/// Panchang of one civil day at one location.
///
/// Tithi, nakshatra, yoga, karana and masa are taken at local sunrise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: CivilDate,
    pub weekday: Weekday,
    pub sunrise_jd: f64,
    pub sunset_jd: f64,
    /// `None` when the Moon does not rise during this local day.
    pub moonrise_jd: Option<f64>,
    pub moonset_jd: Option<f64>,
    pub tithi: TithiInfo,
    pub nakshatra: PanchangNakshatraInfo,
    pub yoga: YogaInfo,
    pub karana: KaranaInfo,
    pub masa: MasaInfo,
    pub windows: DayWindows,
    /// Names of festivals observed on this day.
    pub festivals: Vec<String>,
}

impl CalendarDay {
    pub fn vaara(&self) -> &'static str {
        vaara_name(self.weekday)
    }

    pub fn vaara_lord(&self) -> Graha {
        vaara_lord(self.weekday)
    }

    pub fn paksha(&self) -> Paksha {
        self.tithi.paksha
    }
}
