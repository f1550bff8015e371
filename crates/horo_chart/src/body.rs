//! Chart points: bodies, house cusps, zodiac signs.

use std::fmt::{Display, Formatter};

use serde::Serialize;

/// The fixed set of bodies every chart carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
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
    /// Mean lunar apogee.
    Lilith,
    /// Mean ascending lunar node.
    NorthNode,
}

/// All 12 bodies in chart order.
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
    Body::Lilith,
    Body::NorthNode,
];

impl Body {
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
            Self::Lilith => "Lilith",
            Self::NorthNode => "NorthNode",
        }
    }

    /// 0-based index into [`ALL_BODIES`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn all() -> &'static [Body; 12] {
        &ALL_BODIES
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything an aspect can connect: a body, or a house cusp (1..=12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Point {
    Body(Body),
    Cusp(u8),
}

const CUSP_LABELS: [&str; 12] = [
    "1st House",
    "2nd House",
    "3rd House",
    "4th House",
    "5th House",
    "6th House",
    "7th House",
    "8th House",
    "9th House",
    "10th House",
    "11th House",
    "12th House",
];

/// Ordinal house label ("1st House" .. "12th House").
pub fn house_label(number: u8) -> &'static str {
    CUSP_LABELS[(number.clamp(1, 12) - 1) as usize]
}

impl Point {
    pub fn name(self) -> &'static str {
        match self {
            Self::Body(b) => b.name(),
            Self::Cusp(n) => house_label(n),
        }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Body> for Point {
    fn from(body: Body) -> Self {
        Self::Body(body)
    }
}

/// The 12 tropical zodiac signs, 30° each from 0° Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sign {
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

pub const ALL_SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

impl Sign {
    pub const fn name(self) -> &'static str {
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

    /// Sign containing an ecliptic longitude.
    pub fn from_longitude(lon_deg: f64) -> Self {
        let idx = (horo_time::normalize_deg(lon_deg) / 30.0).floor() as usize;
        ALL_SIGNS[idx.min(11)]
    }
}

impl Display for Sign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dms {
    pub degrees: u16,
    pub minutes: u8,
    pub seconds: u8,
}

impl Dms {
    /// Split an angle into whole degrees, minutes and (rounded-down) seconds.
    pub fn from_deg(deg: f64) -> Self {
        // Round to the nearest millisecond of arc first so 29.999999…
        // does not print as 29°59'59" from float noise.
        let total_ms = (deg.abs() * 3_600_000.0).round() as u64;
        let total_s = total_ms / 1000;
        Self {
            degrees: (total_s / 3600) as u16,
            minutes: ((total_s / 60) % 60) as u8,
            seconds: (total_s % 60) as u8,
        }
    }

    /// Position within its sign, e.g. `12°34'56"`.
    pub fn within_sign(lon_deg: f64) -> Self {
        Self::from_deg(horo_time::normalize_deg(lon_deg) % 30.0)
    }
}

impl Display for Dms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}°{:02}'{:02}\"", self.degrees, self.minutes, self.seconds)
    }
}
