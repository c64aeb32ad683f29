//! Bodies known to the position sources.

use serde::{Deserialize, Serialize};

/// A graha or outer planet that can be positioned.
///
/// Rahu is the Moon's ascending node; Ketu is always exactly opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Rahu,
    Ketu,
}

/// All bodies in catalogue order.
pub const ALL_BODIES: [Body; 12] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::Rahu,
    Body::Ketu,
];

/// Which lunar node model Rahu and Ketu follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeMode {
    /// Mean node, a smooth retrograde motion.
    #[default]
    Mean,
    /// Osculating node including the main periodic terms.
    True,
}

/// Provider code for the mean lunar node.
pub const MEAN_NODE_CODE: i32 = 10;
/// Provider code for the true lunar node.
pub const TRUE_NODE_CODE: i32 = 11;

impl Body {
    /// Code passed to a [`crate::PrecisePositionProvider`].
    ///
    /// Sun through Pluto use 0..=9. Both nodes resolve to the node code
    /// selected by `mode`; Ketu is derived from it by the caller.
    pub const fn provider_code(self, mode: NodeMode) -> i32 {
        match self {
            Self::Sun => 0,
            Self::Moon => 1,
            Self::Mercury => 2,
            Self::Venus => 3,
            Self::Mars => 4,
            Self::Jupiter => 5,
            Self::Saturn => 6,
            Self::Uranus => 7,
            Self::Neptune => 8,
            Self::Pluto => 9,
            Self::Rahu | Self::Ketu => match mode {
                NodeMode::Mean => MEAN_NODE_CODE,
                NodeMode::True => TRUE_NODE_CODE,
            },
        }
    }

    /// Body for a provider code. Node codes map to Rahu.
    pub const fn from_provider_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Sun),
            1 => Some(Self::Moon),
            2 => Some(Self::Mercury),
            3 => Some(Self::Venus),
            4 => Some(Self::Mars),
            5 => Some(Self::Jupiter),
            6 => Some(Self::Saturn),
            7 => Some(Self::Uranus),
            8 => Some(Self::Neptune),
            9 => Some(Self::Pluto),
            MEAN_NODE_CODE | TRUE_NODE_CODE => Some(Self::Rahu),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// Whether this is one of the lunar nodes.
    pub const fn is_node(self) -> bool {
        matches!(self, Self::Rahu | Self::Ketu)
    }

    /// Whether the body has a physical distance (nodes do not).
    pub const fn has_distance(self) -> bool {
        !self.is_node()
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
