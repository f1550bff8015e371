//! Body longitudes of one chart.

use std::collections::BTreeMap;

use horo_time::normalize_deg;
use serde::Serialize;
use tracing::warn;

use crate::body::{ALL_BODIES, Body, Point};
use crate::ephemeris::EphemerisSnapshot;
use crate::error::ChartError;
use crate::house_types::CuspSet;

/// Ecliptic longitude of every body, [0, 360).
///
/// Bodies the provider could not supply hold 0.0 and are listed in
/// `missing`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPositions {
    longitudes: BTreeMap<Body, f64>,
    #[serde(skip)]
    speeds: BTreeMap<Body, f64>,
    missing: Vec<Body>,
}

impl ChartPositions {
    /// Positions from a full longitude table (index = [`Body::index`]).
    pub fn from_longitudes(longitudes: [f64; 12]) -> Self {
        Self {
            longitudes: ALL_BODIES
                .iter()
                .map(|&b| (b, normalize_deg(longitudes[b.index()])))
                .collect(),
            speeds: ALL_BODIES.iter().map(|&b| (b, 0.0)).collect(),
            missing: Vec::new(),
        }
    }

    /// Extract positions from a snapshot. A body without a reading is set to
    /// 0.0 and flagged; any other error propagates.
    pub fn from_snapshot(snapshot: &EphemerisSnapshot) -> Result<Self, ChartError> {
        let mut positions = Self::from_longitudes([0.0; 12]);
        for &body in &ALL_BODIES {
            match snapshot.reading(body) {
                Ok(reading) => {
                    positions.longitudes.insert(body, normalize_deg(reading.longitude));
                    positions.speeds.insert(body, reading.speed);
                }
                Err(ChartError::LookupMiss(missing)) => {
                    warn!(body = missing.name(), "no ephemeris reading, using 0°");
                    positions.missing.push(missing);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(positions)
    }

    pub fn longitude(&self, body: Body) -> f64 {
        self.longitudes.get(&body).copied().unwrap_or(0.0)
    }

    /// Longitude speed in degrees/day (0.0 when unknown).
    pub fn speed(&self, body: Body) -> f64 {
        self.speeds.get(&body).copied().unwrap_or(0.0)
    }

    pub fn is_missing(&self, body: Body) -> bool {
        self.missing.contains(&body)
    }

    pub fn missing(&self) -> &[Body] {
        &self.missing
    }

    /// `(body, longitude)` in chart order.
    pub fn iter(&self) -> impl Iterator<Item = (Body, f64)> + '_ {
        self.longitudes.iter().map(|(&b, &lon)| (b, lon))
    }

    /// Bodies as aspect points.
    pub fn points(&self) -> Vec<(Point, f64)> {
        self.iter().map(|(b, lon)| (Point::Body(b), lon)).collect()
    }

    /// Bodies followed by the 12 house cusps as aspect points.
    pub fn points_with_cusps(&self, cusps: &CuspSet) -> Vec<(Point, f64)> {
        let mut points = self.points();
        points.extend(
            cusps
                .iter()
                .enumerate()
                .map(|(i, lon)| (Point::Cusp((i + 1) as u8), lon)),
        );
        points
    }
}
