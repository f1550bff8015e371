//! Aspect kinds, orb tables and aspect records.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::body::Point;

/// Named angular relationships between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AspectKind {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
    Semisextile,
    Quincunx,
}

/// The five major aspects used for charts and synastry.
pub const MAJOR_ASPECTS: [AspectKind; 5] = [
    AspectKind::Conjunction,
    AspectKind::Opposition,
    AspectKind::Trine,
    AspectKind::Square,
    AspectKind::Sextile,
];

/// Major aspects plus semisextile and quincunx.
pub const FORECAST_ASPECTS: [AspectKind; 7] = [
    AspectKind::Conjunction,
    AspectKind::Opposition,
    AspectKind::Trine,
    AspectKind::Square,
    AspectKind::Sextile,
    AspectKind::Semisextile,
    AspectKind::Quincunx,
];

impl AspectKind {
    /// Exact separation in degrees.
    pub const fn angle(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Opposition => 180.0,
            Self::Trine => 120.0,
            Self::Square => 90.0,
            Self::Sextile => 60.0,
            Self::Semisextile => 30.0,
            Self::Quincunx => 150.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "Conjunction",
            Self::Opposition => "Opposition",
            Self::Trine => "Trine",
            Self::Square => "Square",
            Self::Sextile => "Sextile",
            Self::Semisextile => "Semisextile",
            Self::Quincunx => "Quincunx",
        }
    }
}

impl Display for AspectKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-body orbs in degrees, indexed by [`crate::Body::index`], plus the
/// orb used for house cusps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbTable {
    pub body_orbs: [f64; 12],
    pub cusp_orb: f64,
}

impl OrbTable {
    /// Same orb for every point.
    pub const fn uniform(orb: f64) -> Self {
        Self {
            body_orbs: [orb; 12],
            cusp_orb: orb,
        }
    }

    pub fn orb_for(&self, point: Point) -> f64 {
        match point {
            Point::Body(b) => self.body_orbs[b.index()],
            Point::Cusp(_) => self.cusp_orb,
        }
    }
}

/// How the orbs of the two points in a pair are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OrbCombine {
    /// Smaller of the two orbs.
    Min,
    /// Larger of the two orbs.
    Max,
}

impl OrbCombine {
    pub fn combine(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Min => a.min(b),
            Self::Max => a.max(b),
        }
    }
}

/// Everything the detector needs for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectConfig {
    pub kinds: &'static [AspectKind],
    pub orbs: OrbTable,
    pub combine: OrbCombine,
}

impl AspectConfig {
    /// Aspects within one chart.
    ///
    /// Sun 8.5°, Moon 5.5°, Jupiter/Saturn 6.5°, Uranus 7°, Neptune/Pluto 9°,
    /// everything else 5°.
    pub const SELF_CHART: Self = Self {
        kinds: &MAJOR_ASPECTS,
        orbs: OrbTable {
            body_orbs: [8.5, 5.5, 5.0, 5.0, 5.0, 6.5, 6.5, 7.0, 9.0, 9.0, 5.0, 5.0],
            cusp_orb: 5.0,
        },
        combine: OrbCombine::Max,
    };

    /// Synastry and transits.
    pub const SYNASTRY: Self = Self {
        kinds: &MAJOR_ASPECTS,
        orbs: OrbTable {
            body_orbs: [9.0, 9.0, 7.0, 7.0, 7.0, 6.0, 6.0, 5.0, 5.0, 5.0, 5.0, 5.0],
            cusp_orb: 5.0,
        },
        combine: OrbCombine::Min,
    };

    /// Near-exact synastry hits, for bracketing in the exact-time search.
    pub const SYNASTRY_TIGHT: Self = Self {
        kinds: &MAJOR_ASPECTS,
        orbs: OrbTable {
            body_orbs: [0.25, 0.5, 0.2, 0.15, 0.12, 0.1, 0.08, 0.08, 0.08, 0.08, 0.1, 0.1],
            cusp_orb: 0.1,
        },
        combine: OrbCombine::Max,
    };

    /// Bodies and cusps of two charts, 1° everywhere.
    pub const FORECAST: Self = Self {
        kinds: &FORECAST_ASPECTS,
        orbs: OrbTable::uniform(1.0),
        combine: OrbCombine::Min,
    };

    /// Orb limit for a pair of points.
    pub fn orb_limit(&self, a: Point, b: Point) -> f64 {
        self.combine.combine(self.orbs.orb_for(a), self.orbs.orb_for(b))
    }
}

/// One detected aspect. The point order carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aspect {
    pub point1: Point,
    pub point2: Point,
    pub kind: AspectKind,
    /// Deviation from the exact angle, degrees.
    pub orb: f64,
}

/// Order-independent identity of an aspect: sorted point pair plus kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AspectKey {
    pub first: Point,
    pub second: Point,
    pub kind: AspectKind,
}

impl AspectKey {
    pub fn new(a: Point, b: Point, kind: AspectKind) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first,
            second,
            kind,
        }
    }

    /// Both points are the same and the kind is a conjunction.
    pub fn is_self_conjunction(&self) -> bool {
        self.first == self.second && self.kind == AspectKind::Conjunction
    }
}

impl Display for AspectKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.first, self.kind, self.second)
    }
}

impl Aspect {
    pub fn key(&self) -> AspectKey {
        AspectKey::new(self.point1, self.point2, self.kind)
    }

    /// Same pair in either order and same kind.
    pub fn matches(&self, key: &AspectKey) -> bool {
        self.key() == *key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;

    #[test]
    fn key_is_order_independent() {
        let a = Aspect {
            point1: Point::Body(Body::Mars),
            point2: Point::Body(Body::Sun),
            kind: AspectKind::Trine,
            orb: 1.0,
        };
        let b = Aspect {
            point1: Point::Body(Body::Sun),
            point2: Point::Body(Body::Mars),
            ..a
        };
        assert_eq!(a.key(), b.key());
        assert!(a.matches(&b.key()));
        assert!(!a.matches(&AspectKey::new(
            Point::Body(Body::Sun),
            Point::Body(Body::Mars),
            AspectKind::Square
        )));
    }

    #[test]
    fn combine_modes() {
        let sun = Point::Body(Body::Sun);
        let saturn = Point::Body(Body::Saturn);
        assert_eq!(AspectConfig::SYNASTRY.orb_limit(sun, saturn), 6.0);
        assert_eq!(AspectConfig::SYNASTRY_TIGHT.orb_limit(sun, saturn), 0.25);
        assert_eq!(AspectConfig::SELF_CHART.orb_limit(sun, saturn), 8.5);
        assert_eq!(AspectConfig::FORECAST.orb_limit(sun, Point::Cusp(4)), 1.0);
    }

    #[test]
    fn self_conjunction_detected() {
        let sun = Point::Body(Body::Sun);
        assert!(AspectKey::new(sun, sun, AspectKind::Conjunction).is_self_conjunction());
        assert!(!AspectKey::new(sun, sun, AspectKind::Opposition).is_self_conjunction());
    }
}
