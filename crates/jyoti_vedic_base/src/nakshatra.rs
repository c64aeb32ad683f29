//! Nakshatra (lunar mansion) catalogue and metadata.
//!
//! The ecliptic circle is divided into 27 equal nakshatras of 13 deg 20'
//! each, and each nakshatra into 4 padas of 3 deg 20'. Every nakshatra
//! carries its Vimshottari lord, deity and symbol, plus the gana, yoni and
//! nadi categories read by the compatibility engine.

use serde::{Deserialize, Serialize};

use crate::graha::Graha;

/// Span of one nakshatra: 360/27 = 13.3333... degrees.
pub const NAKSHATRA_SPAN_27: f64 = 360.0 / 27.0;

/// Span of one pada: 13.3333.../4 = 3.3333... degrees.
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN_27 / 4.0;

/// The 27 nakshatras from Ashwini to Revati.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishtha,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

/// All 27 nakshatras in order (0 = Ashwini, 26 = Revati).
pub const ALL_NAKSHATRAS_27: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishtha,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

/// Vimshottari lord cycle, repeated three times across the 27 nakshatras.
pub const NAKSHATRA_LORD_CYCLE: [Graha; 9] = [
    Graha::Ketu,
    Graha::Shukra,
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Rahu,
    Graha::Guru,
    Graha::Shani,
    Graha::Buddh,
];

/// Temperament class of a nakshatra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gana {
    Deva,
    Manushya,
    Rakshasa,
}

/// Physiological channel class of a nakshatra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nadi {
    Aadi,
    Madhya,
    Antya,
}

/// Yoni animal of a nakshatra; 14 animals, most shared by two nakshatras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YoniAnimal {
    Horse,
    Elephant,
    Sheep,
    Serpent,
    Dog,
    Cat,
    Rat,
    Cow,
    Buffalo,
    Tiger,
    Deer,
    Monkey,
    Mongoose,
    Lion,
}

impl YoniAnimal {
    /// Row/column index into the yoni compatibility table.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Horse => "Horse",
            Self::Elephant => "Elephant",
            Self::Sheep => "Sheep",
            Self::Serpent => "Serpent",
            Self::Dog => "Dog",
            Self::Cat => "Cat",
            Self::Rat => "Rat",
            Self::Cow => "Cow",
            Self::Buffalo => "Buffalo",
            Self::Tiger => "Tiger",
            Self::Deer => "Deer",
            Self::Monkey => "Monkey",
            Self::Mongoose => "Mongoose",
            Self::Lion => "Lion",
        }
    }
}

use YoniAnimal as Y;

const YONI: [YoniAnimal; 27] = [
    Y::Horse,
    Y::Elephant,
    Y::Sheep,
    Y::Serpent,
    Y::Serpent,
    Y::Dog,
    Y::Cat,
    Y::Sheep,
    Y::Cat,
    Y::Rat,
    Y::Rat,
    Y::Cow,
    Y::Buffalo,
    Y::Tiger,
    Y::Buffalo,
    Y::Tiger,
    Y::Deer,
    Y::Deer,
    Y::Dog,
    Y::Monkey,
    Y::Mongoose,
    Y::Monkey,
    Y::Lion,
    Y::Horse,
    Y::Lion,
    Y::Cow,
    Y::Elephant,
];

const DEITY: [&str; 27] = [
    "Ashwini Kumaras",
    "Yama",
    "Agni",
    "Prajapati",
    "Soma",
    "Rudra",
    "Aditi",
    "Brihaspati",
    "Nagas",
    "Pitris",
    "Bhaga",
    "Aryaman",
    "Savitr",
    "Tvashtr",
    "Vayu",
    "Indragni",
    "Mitra",
    "Indra",
    "Nirriti",
    "Apas",
    "Vishvedevas",
    "Vishnu",
    "Vasus",
    "Varuna",
    "Aja Ekapada",
    "Ahir Budhnya",
    "Pushan",
];

const SYMBOL: [&str; 27] = [
    "Horse's head",
    "Yoni",
    "Razor",
    "Chariot",
    "Deer's head",
    "Teardrop",
    "Bow and quiver",
    "Cow's udder",
    "Coiled serpent",
    "Royal throne",
    "Front legs of a bed",
    "Back legs of a bed",
    "Hand",
    "Pearl",
    "Young shoot",
    "Triumphal arch",
    "Lotus",
    "Earring",
    "Bunch of roots",
    "Fan",
    "Elephant tusk",
    "Ear",
    "Drum",
    "Empty circle",
    "Sword",
    "Twins",
    "Fish",
];

impl Nakshatra {
    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishtha => "Dhanishtha",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    /// 0-based index (Ashwini=0 .. Revati=26).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// 1-based number (Ashwini=1 .. Revati=27).
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Vimshottari ruling graha.
    pub const fn lord(self) -> Graha {
        NAKSHATRA_LORD_CYCLE[(self.index() % 9) as usize]
    }

    pub const fn deity(self) -> &'static str {
        DEITY[self.index() as usize]
    }

    pub const fn symbol(self) -> &'static str {
        SYMBOL[self.index() as usize]
    }

    pub const fn gana(self) -> Gana {
        match self.index() {
            0 | 4 | 6 | 7 | 12 | 14 | 16 | 21 | 26 => Gana::Deva,
            1 | 3 | 5 | 10 | 11 | 19 | 20 | 24 | 25 => Gana::Manushya,
            _ => Gana::Rakshasa,
        }
    }

    pub const fn yoni(self) -> YoniAnimal {
        YONI[self.index() as usize]
    }

    /// Nadi runs in a zig-zag Aadi, Madhya, Antya, Antya, Madhya, Aadi over
    /// each block of six nakshatras.
    pub const fn nadi(self) -> Nadi {
        match self.index() % 6 {
            0 | 5 => Nadi::Aadi,
            1 | 4 => Nadi::Madhya,
            _ => Nadi::Antya,
        }
    }

    /// Start of this nakshatra in sidereal degrees.
    pub fn start_deg(self) -> f64 {
        self.index() as f64 * NAKSHATRA_SPAN_27
    }

    /// All 27 nakshatras in order.
    pub const fn all() -> &'static [Nakshatra; 27] {
        &ALL_NAKSHATRAS_27
    }
}

impl std::fmt::Display for Nakshatra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_sequential() {
        for (i, n) in ALL_NAKSHATRAS_27.iter().enumerate() {
            assert_eq!(n.index() as usize, i);
            assert_eq!(n.number() as usize, i + 1);
        }
    }

    #[test]
    fn lords_follow_cycle() {
        assert_eq!(Nakshatra::Ashwini.lord(), Graha::Ketu);
        assert_eq!(Nakshatra::Magha.lord(), Graha::Ketu);
        assert_eq!(Nakshatra::Swati.lord(), Graha::Rahu);
        assert_eq!(Nakshatra::Revati.lord(), Graha::Buddh);
        assert_eq!(Nakshatra::Rohini.lord(), Graha::Chandra);
    }

    #[test]
    fn gana_counts_are_nine_each() {
        for g in [Gana::Deva, Gana::Manushya, Gana::Rakshasa] {
            let n = ALL_NAKSHATRAS_27.iter().filter(|n| n.gana() == g).count();
            assert_eq!(n, 9, "{g:?}");
        }
    }

    #[test]
    fn nadi_known_members() {
        let aadi = [0u8, 5, 6, 11, 12, 17, 18, 23, 24];
        let madhya = [1u8, 4, 7, 10, 13, 16, 19, 22, 25];
        for n in ALL_NAKSHATRAS_27 {
            let expected = if aadi.contains(&n.index()) {
                Nadi::Aadi
            } else if madhya.contains(&n.index()) {
                Nadi::Madhya
            } else {
                Nadi::Antya
            };
            assert_eq!(n.nadi(), expected, "{n:?}");
        }
    }

    #[test]
    fn every_yoni_used_and_paired() {
        let mut counts = [0u8; 14];
        for n in ALL_NAKSHATRAS_27 {
            counts[n.yoni().index() as usize] += 1;
        }
        // Mongoose belongs to Uttara Ashadha alone
        for (i, c) in counts.iter().enumerate() {
            let expected = if i == YoniAnimal::Mongoose.index() as usize {
                1
            } else {
                2
            };
            assert_eq!(*c, expected, "animal {i}");
        }
    }

    #[test]
    fn metadata_nonempty() {
        for n in ALL_NAKSHATRAS_27 {
            assert!(!n.deity().is_empty());
            assert!(!n.symbol().is_empty());
        }
        assert_eq!(Nakshatra::Swati.deity(), "Vayu");
    }
}
