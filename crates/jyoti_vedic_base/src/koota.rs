//! Ashta Koota compatibility scoring (36 points).
//!
//! Each of the eight kootas is a pure function of the two Moon charts
//! (rashi, nakshatra, pada). The first chart is the bride and the second
//! the groom; Varna, Tara and Gana are directional.
//!
//! Scores are held as integer half-points: Tara awards 1.5 per direction
//! and Graha Maitri can award 0.5, and integers keep totals and band
//! comparisons exact.

use serde::{Deserialize, Serialize};

use crate::classify::classify;
use crate::error::VedicError;
use crate::graha_relationships::{NaisargikaMaitri, naisargika_maitri};
use crate::nakshatra::{Gana, Nakshatra};
use crate::rashi::{ALL_RASHIS, Element, Rashi};

/// Maximum total in half-points (36 points).
pub const MAX_TOTAL_HALF_POINTS: u8 = 72;

/// Birth Moon placement used for matching.
///
/// The three fields must agree: each pada spans 3°20', nine padas make one
/// rashi, so the pada fixes the rashi. [`MoonChart::new`] and deserialization
/// reject combinations no Moon longitude can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoonChartFields")]
pub struct MoonChart {
    pub rashi: Rashi,
    pub nakshatra: Nakshatra,
    /// Pada 1-4.
    pub pada: u8,
}

#[derive(Deserialize)]
struct MoonChartFields {
    rashi: Rashi,
    nakshatra: Nakshatra,
    pada: u8,
}

impl TryFrom<MoonChartFields> for MoonChart {
    type Error = VedicError;

    fn try_from(f: MoonChartFields) -> Result<Self, Self::Error> {
        Self::new(f.rashi, f.nakshatra, f.pada)
    }
}

impl MoonChart {
    pub fn new(rashi: Rashi, nakshatra: Nakshatra, pada: u8) -> Result<Self, VedicError> {
        if !(1..=4).contains(&pada) {
            return Err(VedicError::Validation(format!(
                "pada must be 1-4, got {pada}"
            )));
        }
        let quarter = usize::from(nakshatra.index()) * 4 + usize::from(pada - 1);
        let holder = ALL_RASHIS[quarter / 9];
        if holder != rashi {
            return Err(VedicError::Validation(format!(
                "{nakshatra:?} pada {pada} lies in {holder:?}, not {rashi:?}"
            )));
        }
        Ok(Self {
            rashi,
            nakshatra,
            pada,
        })
    }

    /// Chart from the Moon's sidereal longitude in [0, 360).
    pub fn from_sidereal_longitude(lon: f64) -> Result<Self, VedicError> {
        let c = classify(lon)?;
        Ok(Self {
            rashi: c.rashi.rashi,
            nakshatra: c.nakshatra.nakshatra,
            pada: c.nakshatra.pada,
        })
    }
}

/// The eight kootas in classical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Koota {
    Varna,
    Vashya,
    Tara,
    Yoni,
    GrahaMaitri,
    Gana,
    Bhakoot,
    Nadi,
}

pub const ALL_KOOTAS: [Koota; 8] = [
    Koota::Varna,
    Koota::Vashya,
    Koota::Tara,
    Koota::Yoni,
    Koota::GrahaMaitri,
    Koota::Gana,
    Koota::Bhakoot,
    Koota::Nadi,
];

impl Koota {
    /// Maximum points; also the koota's classical weight.
    pub const fn max_points(self) -> u8 {
        match self {
            Self::Varna => 1,
            Self::Vashya => 2,
            Self::Tara => 3,
            Self::Yoni => 4,
            Self::GrahaMaitri => 5,
            Self::Gana => 6,
            Self::Bhakoot => 7,
            Self::Nadi => 8,
        }
    }

    pub const fn max_half_points(self) -> u8 {
        self.max_points() * 2
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Varna => "Varna",
            Self::Vashya => "Vashya",
            Self::Tara => "Tara",
            Self::Yoni => "Yoni",
            Self::GrahaMaitri => "Graha Maitri",
            Self::Gana => "Gana",
            Self::Bhakoot => "Bhakoot",
            Self::Nadi => "Nadi",
        }
    }
}

/// When two charts share a Nadi, which cases cancel the dosha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NadiException {
    /// Same Nadi always scores 0.
    Strict,
    /// Same nakshatra in a different pada cancels the dosha.
    #[default]
    SameNakshatraDifferentPada,
    /// Also cancels for same rashi with different nakshatras. A nakshatra
    /// split across two rashis needs no clause of its own: its padas differ
    /// whenever its rashis do.
    Extended,
}

/// Per-koota half-point scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KootaScoreSet {
    pub varna: u8,
    pub vashya: u8,
    pub tara: u8,
    pub yoni: u8,
    pub graha_maitri: u8,
    pub gana: u8,
    pub bhakoot: u8,
    pub nadi: u8,
}

impl KootaScoreSet {
    pub fn half_points(&self, koota: Koota) -> u8 {
        match koota {
            Koota::Varna => self.varna,
            Koota::Vashya => self.vashya,
            Koota::Tara => self.tara,
            Koota::Yoni => self.yoni,
            Koota::GrahaMaitri => self.graha_maitri,
            Koota::Gana => self.gana,
            Koota::Bhakoot => self.bhakoot,
            Koota::Nadi => self.nadi,
        }
    }

    /// Points for one koota (half-points / 2).
    pub fn points(&self, koota: Koota) -> f64 {
        f64::from(self.half_points(koota)) / 2.0
    }

    pub fn total_half_points(&self) -> u8 {
        ALL_KOOTAS.iter().map(|&k| self.half_points(k)).sum()
    }

    pub fn total(&self) -> f64 {
        f64::from(self.total_half_points()) / 2.0
    }

    /// (koota, points) pairs in classical order.
    pub fn breakdown(&self) -> [(Koota, f64); 8] {
        ALL_KOOTAS.map(|k| (k, self.points(k)))
    }
}

/// Classification of the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompatibilityBand {
    Excellent,
    VeryGood,
    Good,
    Average,
    Poor,
    VeryPoor,
}

impl CompatibilityBand {
    /// Band for a total in half-points (≥28, ≥24, ≥18, ≥12, ≥6 points).
    pub const fn from_half_points(total: u8) -> Self {
        match total {
            56.. => Self::Excellent,
            48..=55 => Self::VeryGood,
            36..=47 => Self::Good,
            24..=35 => Self::Average,
            12..=23 => Self::Poor,
            _ => Self::VeryPoor,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::VeryGood => "very good",
            Self::Good => "good",
            Self::Average => "average",
            Self::Poor => "poor",
            Self::VeryPoor => "very poor",
        }
    }

    /// 18 points is the conventional minimum for a favorable match.
    pub const fn is_favorable(self) -> bool {
        matches!(self, Self::Excellent | Self::VeryGood | Self::Good)
    }
}

/// Whether a dosha arose and whether a classical exception cancelled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dosha {
    pub present: bool,
    pub cancelled: bool,
}

impl Dosha {
    /// Present and not cancelled.
    pub fn is_active(&self) -> bool {
        self.present && !self.cancelled
    }
}

/// Full match outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub scores: KootaScoreSet,
    pub total_half_points: u8,
    pub band: CompatibilityBand,
    pub nadi_dosha: Dosha,
    /// Informational: the classical cancellation (same or mutually friendly
    /// rashi lords) does not restore Bhakoot points.
    pub bhakoot_dosha: Dosha,
}

impl CompatibilityResult {
    pub fn total(&self) -> f64 {
        f64::from(self.total_half_points) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Individual kootas
// ---------------------------------------------------------------------------

/// Varna rank by the rashi's element: Water (Brahmin) highest, Air
/// (Shudra) lowest.
const fn varna_rank(rashi: Rashi) -> u8 {
    match rashi.element() {
        Element::Water => 4,
        Element::Fire => 3,
        Element::Earth => 2,
        Element::Air => 1,
    }
}

/// 1 point when the groom's varna is at least the bride's.
pub fn varna_score(bride: &MoonChart, groom: &MoonChart) -> u8 {
    if varna_rank(groom.rashi) >= varna_rank(bride.rashi) {
        2
    } else {
        0
    }
}

/// Signs each rashi holds in vashya (Muhurta Chintamani list).
const fn vashya_of(rashi: Rashi) -> &'static [Rashi] {
    use Rashi::*;
    match rashi {
        Mesha => &[Simha, Vrischika],
        Vrishabha => &[Karka, Tula],
        Mithuna => &[Kanya],
        Karka => &[Vrischika, Dhanu],
        Simha => &[Tula],
        Kanya => &[Mithuna, Meena],
        Tula => &[Kanya, Makara],
        Vrischika => &[Karka],
        Dhanu => &[Meena],
        Makara => &[Mesha, Kumbha],
        Kumbha => &[Mesha],
        Meena => &[Makara],
    }
}

/// 2 for same sign or mutual vashya, 1 for one-way, 0 otherwise.
pub fn vashya_score(bride: &MoonChart, groom: &MoonChart) -> u8 {
    if bride.rashi == groom.rashi {
        return 4;
    }
    let b_holds_g = vashya_of(bride.rashi).contains(&groom.rashi);
    let g_holds_b = vashya_of(groom.rashi).contains(&bride.rashi);
    match (b_holds_g, g_holds_b) {
        (true, true) => 4,
        (true, false) | (false, true) => 2,
        (false, false) => 0,
    }
}

/// Tara (1-9) of `to` counted from `from`, inclusive.
pub fn tara_number(from: Nakshatra, to: Nakshatra) -> u8 {
    let count = (to.index() as i16 - from.index() as i16).rem_euclid(27) as u8;
    count % 9 + 1
}

/// Vipat (3), Pratyak (5) and Naidhana (7) are inauspicious.
fn tara_is_auspicious(tara: u8) -> bool {
    !matches!(tara, 3 | 5 | 7)
}

/// 1.5 points for each direction whose tara is auspicious.
pub fn tara_score(bride: &MoonChart, groom: &MoonChart) -> u8 {
    let forward = tara_is_auspicious(tara_number(bride.nakshatra, groom.nakshatra));
    let backward = tara_is_auspicious(tara_number(groom.nakshatra, bride.nakshatra));
    3 * (u8::from(forward) + u8::from(backward))
}

/// Yoni compatibility in points, rows and columns in [`crate::nakshatra::YoniAnimal`] order.
const YONI_TABLE: [[u8; 14]; 14] = [
    [4, 2, 2, 3, 2, 2, 2, 1, 0, 1, 3, 3, 2, 1],
    [2, 4, 3, 3, 2, 2, 2, 2, 3, 1, 2, 3, 2, 0],
    [2, 3, 4, 2, 1, 2, 1, 3, 3, 1, 2, 0, 3, 1],
    [3, 3, 2, 4, 2, 1, 1, 1, 1, 2, 2, 2, 0, 2],
    [2, 2, 1, 2, 4, 2, 1, 2, 2, 1, 0, 2, 1, 1],
    [2, 2, 2, 1, 2, 4, 0, 2, 2, 1, 3, 3, 2, 1],
    [2, 2, 1, 1, 1, 0, 4, 2, 2, 2, 2, 2, 1, 2],
    [1, 2, 3, 1, 2, 2, 2, 4, 3, 0, 3, 2, 2, 1],
    [0, 3, 3, 1, 2, 2, 2, 3, 4, 1, 2, 2, 2, 1],
    [1, 1, 1, 2, 1, 1, 2, 0, 1, 4, 1, 1, 2, 1],
    [3, 2, 2, 2, 0, 3, 2, 3, 2, 1, 4, 2, 2, 1],
    [3, 3, 0, 2, 2, 3, 2, 2, 2, 1, 2, 4, 3, 2],
    [2, 2, 3, 0, 1, 2, 1, 2, 2, 2, 2, 3, 4, 2],
    [1, 0, 1, 2, 1, 1, 2, 1, 1, 1, 1, 2, 2, 4],
];

pub fn yoni_score(bride: &MoonChart, groom: &MoonChart) -> u8 {
    let b = bride.nakshatra.yoni().index() as usize;
    let g = groom.nakshatra.yoni().index() as usize;
    YONI_TABLE[b][g] * 2
}

/// Friendship of the two rashi lords, scored from both sides.
pub fn graha_maitri_score(bride: &MoonChart, groom: &MoonChart) -> u8 {
    let (lb, lg) = (bride.rashi.lord(), groom.rashi.lord());
    if lb == lg {
        return 10;
    }
    use NaisargikaMaitri::*;
    match (naisargika_maitri(lb, lg), naisargika_maitri(lg, lb)) {
        (Friend, Friend) => 10,
        (Friend, Neutral) | (Neutral, Friend) => 8,
        (Neutral, Neutral) => 6,
        (Friend, Enemy) | (Enemy, Friend) => 2,
        (Neutral, Enemy) | (Enemy, Neutral) => 1,
        (Enemy, Enemy) => 0,
    }
}

const fn gana_index(gana: Gana) -> usize {
    match gana {
        Gana::Deva => 0,
        Gana::Manushya => 1,
        Gana::Rakshasa => 2,
    }
}

/// Rows are the groom's gana, columns the bride's.
const GANA_TABLE: [[u8; 3]; 3] = [[6, 6, 1], [5, 6, 0], [1, 0, 6]];

pub fn gana_score(bride: &MoonChart, groom: &MoonChart) -> u8 {
    GANA_TABLE[gana_index(groom.nakshatra.gana())][gana_index(bride.nakshatra.gana())] * 2
}

/// Sign distance from bride to groom, counted inclusively (1-12).
fn rashi_distance(bride: Rashi, groom: Rashi) -> u8 {
    (groom.index() + 12 - bride.index()) % 12 + 1
}

/// 2/12, 5/9 and 6/8 placements carry Bhakoot dosha.
pub fn bhakoot_dosha(bride: &MoonChart, groom: &MoonChart) -> Dosha {
    let present = matches!(
        rashi_distance(bride.rashi, groom.rashi),
        2 | 12 | 5 | 9 | 6 | 8
    );
    let (lb, lg) = (bride.rashi.lord(), groom.rashi.lord());
    let friendly = lb == lg
        || (naisargika_maitri(lb, lg) == NaisargikaMaitri::Friend
            && naisargika_maitri(lg, lb) == NaisargikaMaitri::Friend);
    Dosha {
        present,
        cancelled: present && friendly,
    }
}

pub fn bhakoot_score(bride: &MoonChart, groom: &MoonChart) -> u8 {
    if bhakoot_dosha(bride, groom).present {
        0
    } else {
        14
    }
}

/// Nadi dosha and whether `policy` cancels it.
pub fn nadi_dosha(bride: &MoonChart, groom: &MoonChart, policy: NadiException) -> Dosha {
    let present = bride.nakshatra.nadi() == groom.nakshatra.nadi();
    if !present {
        return Dosha::default();
    }
    let same_nakshatra = bride.nakshatra == groom.nakshatra;
    let same_rashi = bride.rashi == groom.rashi;
    let pada_exception = same_nakshatra && bride.pada != groom.pada;
    let cancelled = match policy {
        NadiException::Strict => false,
        NadiException::SameNakshatraDifferentPada => pada_exception,
        NadiException::Extended => pada_exception || (same_rashi && !same_nakshatra),
    };
    Dosha { present, cancelled }
}

pub fn nadi_score(bride: &MoonChart, groom: &MoonChart, policy: NadiException) -> u8 {
    if nadi_dosha(bride, groom, policy).is_active() {
        0
    } else {
        16
    }
}

/// Score all eight kootas for a bride and groom.
pub fn match_charts(
    bride: &MoonChart,
    groom: &MoonChart,
    policy: NadiException,
) -> CompatibilityResult {
    let scores = KootaScoreSet {
        varna: varna_score(bride, groom),
        vashya: vashya_score(bride, groom),
        tara: tara_score(bride, groom),
        yoni: yoni_score(bride, groom),
        graha_maitri: graha_maitri_score(bride, groom),
        gana: gana_score(bride, groom),
        bhakoot: bhakoot_score(bride, groom),
        nadi: nadi_score(bride, groom, policy),
    };
    let total = scores.total_half_points();
    CompatibilityResult {
        scores,
        total_half_points: total,
        band: CompatibilityBand::from_half_points(total),
        nadi_dosha: nadi_dosha(bride, groom, policy),
        bhakoot_dosha: bhakoot_dosha(bride, groom),
    }
}
