//! Birth chart value types: signs, planets, houses, and the assembled chart.
//!
//! A [`BirthChart`] can only be built through [`BirthChart::assemble`], which derives
//! every house from the ascendant and files each planet under the house its sign
//! falls in. Charts are immutable once built.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// -----------------------------------------------------------------------------
// ZodiacSign
// -----------------------------------------------------------------------------

/// The twelve signs, in ring order. Houses are offsets around this ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        Self::Aries,
        Self::Taurus,
        Self::Gemini,
        Self::Cancer,
        Self::Leo,
        Self::Virgo,
        Self::Libra,
        Self::Scorpio,
        Self::Sagittarius,
        Self::Capricorn,
        Self::Aquarius,
        Self::Pisces,
    ];

    /// Position on the ring, 0 (Aries) through 11 (Pisces).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Sign at `index`, wrapping around the ring.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    /// Sign `steps` places further around the ring.
    pub fn offset(self, steps: usize) -> Self {
        Self::from_index(self.index() + steps)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// Hex colour used when the host renders the chart grid.
    pub fn color(self) -> &'static str {
        match self {
            Self::Aries => "#FF4136",
            Self::Taurus => "#2ECC40",
            Self::Gemini => "#FFDC00",
            Self::Cancer => "#AAAAAA",
            Self::Leo => "#FF851B",
            Self::Virgo => "#7FDBFF",
            Self::Libra => "#B10DC9",
            Self::Scorpio => "#85144b",
            Self::Sagittarius => "#F012BE",
            Self::Capricorn => "#111111",
            Self::Aquarius => "#0074D9",
            Self::Pisces => "#01FF70",
        }
    }

    /// How a person with this rising sign presents to the world.
    pub fn ascendant_trait(self) -> &'static str {
        match self {
            Self::Aries => "bold and pioneering",
            Self::Taurus => "steady and reliable",
            Self::Gemini => "communicative and versatile",
            Self::Cancer => "nurturing and protective",
            Self::Leo => "charismatic and dignified",
            Self::Virgo => "analytical and precise",
            Self::Libra => "diplomatic and balanced",
            Self::Scorpio => "intense and transformative",
            Self::Sagittarius => "optimistic and philosophical",
            Self::Capricorn => "disciplined and ambitious",
            Self::Aquarius => "innovative and independent",
            Self::Pisces => "compassionate and intuitive",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZodiacSign {
    type Err = UnknownName;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|sign| sign.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownName(wanted.to_string()))
    }
}

// -----------------------------------------------------------------------------
// Planet
// -----------------------------------------------------------------------------

/// The nine modelled bodies, lunar nodes included. Declaration order is the
/// canonical chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Planet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Rahu,
    Ketu,
}

impl Planet {
    pub const ALL: [Planet; 9] = [
        Self::Sun,
        Self::Moon,
        Self::Mercury,
        Self::Venus,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Rahu,
        Self::Ketu,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Sun => "☉",
            Self::Moon => "☽",
            Self::Mercury => "☿",
            Self::Venus => "♀",
            Self::Mars => "♂",
            Self::Jupiter => "♃",
            Self::Saturn => "♄",
            Self::Rahu => "☊",
            Self::Ketu => "☋",
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Planet {
    type Err = UnknownName;

    /// Case-insensitive. Accepts the node aliases providers use for Rahu and Ketu.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        let alias = match wanted.to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "north_node" | "true_node" | "mean_node" => Some(Self::Rahu),
            "south_node" => Some(Self::Ketu),
            _ => None,
        };
        alias
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|planet| planet.name().eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| UnknownName(wanted.to_string()))
    }
}

/// A sign or planet name that is not part of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName(pub String);

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown name '{}'", self.0)
    }
}

impl std::error::Error for UnknownName {}

/// "1st", "2nd", "3rd", "4th", ... "11th", "12th".
pub fn ordinal(n: u8) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

// -----------------------------------------------------------------------------
// Positions, houses, chart
// -----------------------------------------------------------------------------

/// One planet's placement. `degrees` is the position within the sign, in [0, 30).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetaryPosition {
    pub planet: Planet,
    pub house: u8,
    pub sign: ZodiacSign,
    pub degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseData {
    pub number: u8,
    pub sign: ZodiacSign,
    pub planets: Vec<PlanetaryPosition>,
}

/// Input to [`BirthChart::assemble`]: a planet's sign and in-sign degrees. The house is
/// derived from the sign and the ascendant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub planet: Planet,
    pub sign: ZodiacSign,
    pub degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthChart {
    ascendant: ZodiacSign,
    houses: Vec<HouseData>,
    planets: Vec<PlanetaryPosition>,
}

/// House number (1..=12) that `sign` occupies when `ascendant` rises.
pub fn house_of(sign: ZodiacSign, ascendant: ZodiacSign) -> u8 {
    (((sign.index() + 12 - ascendant.index()) % 12) + 1) as u8
}

/// Fold any real degree value into [0, 30).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let folded = degrees.rem_euclid(30.0);
    if folded.is_finite() && folded < 30.0 {
        folded
    } else {
        0.0
    }
}

impl BirthChart {
    /// Build a chart whose houses rotate the zodiac from `ascendant`. Placements are
    /// sorted into canonical planet order; a repeated planet keeps its first placement.
    pub fn assemble(ascendant: ZodiacSign, placements: impl IntoIterator<Item = Placement>) -> Self {
        let mut planets: Vec<PlanetaryPosition> = Vec::with_capacity(Planet::ALL.len());
        for placement in placements {
            if planets.iter().any(|p| p.planet == placement.planet) {
                continue;
            }
            planets.push(PlanetaryPosition {
                planet: placement.planet,
                house: house_of(placement.sign, ascendant),
                sign: placement.sign,
                degrees: normalize_degrees(placement.degrees),
            });
        }
        planets.sort_by_key(|p| p.planet);

        let houses = (0..12u8)
            .map(|i| HouseData {
                number: i + 1,
                sign: ascendant.offset(i as usize),
                planets: planets.iter().filter(|p| p.house == i + 1).cloned().collect(),
            })
            .collect();

        Self {
            ascendant,
            houses,
            planets,
        }
    }

    pub fn ascendant(&self) -> ZodiacSign {
        self.ascendant
    }

    /// All twelve houses, house 1 first.
    pub fn houses(&self) -> &[HouseData] {
        &self.houses
    }

    pub fn planets(&self) -> &[PlanetaryPosition] {
        &self.planets
    }

    pub fn planet(&self, planet: Planet) -> Option<&PlanetaryPosition> {
        self.planets.iter().find(|p| p.planet == planet)
    }

    pub fn house(&self, number: u8) -> Option<&HouseData> {
        self.houses.iter().find(|h| h.number == number)
    }

    /// Number of planets placed in any of `houses`.
    pub fn count_in_houses(&self, houses: &[u8]) -> usize {
        self.planets.iter().filter(|p| houses.contains(&p.house)).count()
    }
}
