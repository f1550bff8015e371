//! Chart assembly: one provider call, corrected cusps, tables, aspects.

use horo_time::{DEFAULT_OBLIQUITY_DEG, Moment};
use serde::Serialize;
use tracing::debug;

use crate::aspect::self_chart_aspects;
use crate::aspect_types::Aspect;
use crate::body::{Body, Dms, Sign, house_label};
use crate::ephemeris::EphemerisProvider;
use crate::error::ChartError;
use crate::geo::GeoPoint;
use crate::house::{house_of, resolve_cusps};
use crate::house_types::{CuspSet, HouseSystem};
use crate::positions::ChartPositions;

/// Inputs for one chart computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartRequest {
    pub moment: Moment,
    pub geo: GeoPoint,
    pub house_system: HouseSystem,
    /// Obliquity override in degrees; `None` lets the provider decide and
    /// uses [`DEFAULT_OBLIQUITY_DEG`] for cusp formulas.
    pub obliquity: Option<f64>,
}

impl ChartRequest {
    pub fn new(moment: Moment, geo: GeoPoint, house_system: HouseSystem) -> Self {
        Self {
            moment,
            geo,
            house_system,
            obliquity: None,
        }
    }

    /// Same request at another moment.
    pub fn at(self, moment: Moment) -> Self {
        Self { moment, ..self }
    }

    /// Same request at another place.
    pub fn located(self, geo: GeoPoint) -> Self {
        Self { geo, ..self }
    }

    pub fn with_system(self, house_system: HouseSystem) -> Self {
        Self {
            house_system,
            ..self
        }
    }

    pub fn with_obliquity(self, obliquity: f64) -> Self {
        Self {
            obliquity: Some(obliquity),
            ..self
        }
    }

    /// Obliquity used by the cusp formulas.
    pub fn obliquity_deg(&self) -> f64 {
        self.obliquity.unwrap_or(DEFAULT_OBLIQUITY_DEG)
    }
}

/// One row of the planet table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetRow {
    pub name: &'static str,
    pub is_retrograde: bool,
    pub sign: Sign,
    /// Position within the sign, `DD°MM'SS"`.
    pub formatted_position: String,
    pub house: u8,
}

/// One row of the house table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseRow {
    pub name: &'static str,
    pub formatted_position: String,
    pub sign: Sign,
}

/// A complete chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub moment: Moment,
    pub positions: ChartPositions,
    pub cusps: CuspSet,
    pub ascendant: f64,
    pub midheaven: f64,
    pub planet_table: Vec<PlanetRow>,
    pub house_table: Vec<HouseRow>,
    pub aspects: Vec<Aspect>,
}

impl Chart {
    /// Assemble tables and aspects for already-resolved positions and cusps.
    pub fn assemble(moment: Moment, positions: ChartPositions, cusps: CuspSet) -> Self {
        let mut chart = Self {
            moment,
            ascendant: cusps.ascendant(),
            midheaven: cusps.midheaven(),
            planet_table: Vec::new(),
            house_table: Vec::new(),
            aspects: self_chart_aspects(&positions),
            positions,
            cusps,
        };
        chart.rebuild_tables();
        chart
    }

    /// Replace the cusp set and rebuild everything that depends on it.
    pub fn with_cusps(mut self, cusps: CuspSet) -> Self {
        self.cusps = cusps;
        self.ascendant = cusps.ascendant();
        self.midheaven = cusps.midheaven();
        self.rebuild_tables();
        self
    }

    fn rebuild_tables(&mut self) {
        self.planet_table = self
            .positions
            .iter()
            .map(|(body, lon)| planet_row(body, lon, self.positions.speed(body), &self.cusps))
            .collect();
        self.house_table = self
            .cusps
            .iter()
            .enumerate()
            .map(|(i, lon)| HouseRow {
                name: house_label((i + 1) as u8),
                formatted_position: Dms::within_sign(lon).to_string(),
                sign: Sign::from_longitude(lon),
            })
            .collect();
    }
}

fn planet_row(body: Body, lon: f64, speed: f64, cusps: &CuspSet) -> PlanetRow {
    PlanetRow {
        name: body.name(),
        is_retrograde: speed < 0.0,
        sign: Sign::from_longitude(lon),
        formatted_position: Dms::within_sign(lon).to_string(),
        house: house_of(lon, cusps),
    }
}

/// Compute a chart with exactly one provider call.
///
/// Bodies the provider has no reading for are placed at 0° and flagged in
/// [`ChartPositions::missing`]; every other failure aborts the chart.
pub fn compute_chart<P>(provider: &P, request: &ChartRequest) -> Result<Chart, ChartError>
where
    P: EphemerisProvider + ?Sized,
{
    request.geo.validate()?;
    let snapshot = provider.compute_chart(
        &request.moment,
        &request.geo,
        request.house_system,
        request.obliquity,
    )?;
    snapshot.check_finite()?;

    let positions = ChartPositions::from_snapshot(&snapshot)?;
    let cusps = resolve_cusps(
        request.house_system,
        &snapshot,
        request.geo.latitude_deg,
        request.obliquity_deg(),
    )?;
    debug!(
        moment = %request.moment,
        system = %request.house_system,
        asc = cusps.ascendant(),
        mc = cusps.midheaven(),
        "chart computed"
    );
    Ok(Chart::assemble(request.moment, positions, cusps))
}
