//! House system selector and the 12-cusp set.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use horo_time::normalize_deg;
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Supported house division systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    /// Cusps come from the Koch formula in [`crate::house::koch_cusps`].
    Koch,
    Porphyry,
    Regiomontanus,
    Campanus,
    /// 30° houses from the Ascendant.
    Equal,
    /// Each sign is one house.
    WholeSign,
}

/// All systems with their name and single-letter provider code.
const HOUSE_SYSTEMS: &[(HouseSystem, &str, char)] = &[
    (HouseSystem::Placidus, "placidus", 'P'),
    (HouseSystem::Koch, "koch", 'K'),
    (HouseSystem::Porphyry, "porphyry", 'O'),
    (HouseSystem::Regiomontanus, "regiomontanus", 'R'),
    (HouseSystem::Campanus, "campanus", 'C'),
    (HouseSystem::Equal, "equal", 'E'),
    (HouseSystem::WholeSign, "whole_sign", 'W'),
];

impl HouseSystem {
    pub fn name(self) -> &'static str {
        HOUSE_SYSTEMS
            .iter()
            .find(|(s, _, _)| *s == self)
            .map_or("placidus", |(_, name, _)| *name)
    }

    /// Single-letter code understood by Swiss-Ephemeris style providers.
    pub fn code(self) -> char {
        HOUSE_SYSTEMS
            .iter()
            .find(|(s, _, _)| *s == self)
            .map_or('P', |(_, _, code)| *code)
    }

    pub fn from_code(code: char) -> Result<Self, ChartError> {
        let upper = code.to_ascii_uppercase();
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, _, c)| *c == upper)
            .map(|(s, _, _)| *s)
            .ok_or_else(|| ChartError::InvalidInput(format!("unknown house system code {code:?}")))
    }

    /// Quadrant systems yield cusps mod 180° and need disambiguation.
    pub const fn is_quadrant(self) -> bool {
        !matches!(self, Self::Equal | Self::WholeSign)
    }
}

impl FromStr for HouseSystem {
    type Err = ChartError;

    /// Accepts a name (`"koch"`, `"whole-sign"`) or a single-letter code (`"K"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        if let Some((system, _, _)) = HOUSE_SYSTEMS.iter().find(|(_, name, _)| *name == key) {
            return Ok(*system);
        }
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_code(c),
            _ => Err(ChartError::InvalidInput(format!(
                "unknown house system {s:?}"
            ))),
        }
    }
}

impl Display for HouseSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Exactly 12 house cusps, house 1 first, each in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CuspSet(pub(crate) [f64; 12]);

impl CuspSet {
    /// Build from an array, normalizing every value.
    pub fn new(cusps: [f64; 12]) -> Self {
        Self(cusps.map(normalize_deg))
    }

    /// Build from the first 12 values of a slice.
    pub fn from_slice(values: &[f64]) -> Result<Self, ChartError> {
        if values.len() < 12 {
            return Err(ChartError::InvalidInput(format!(
                "expected 12 cusps, got {}",
                values.len()
            )));
        }
        let mut cusps = [0.0; 12];
        cusps.copy_from_slice(&values[..12]);
        Ok(Self::new(cusps))
    }

    pub fn as_array(&self) -> &[f64; 12] {
        &self.0
    }

    /// Cusp of house `number` (1..=12).
    pub fn cusp(&self, number: u8) -> f64 {
        self.0[(number.clamp(1, 12) - 1) as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Cusp 1.
    pub fn ascendant(&self) -> f64 {
        self.0[0]
    }

    /// Cusp 10.
    pub fn midheaven(&self) -> f64 {
        self.0[9]
    }
}
