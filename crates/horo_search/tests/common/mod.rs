//! Deterministic ephemeris stubs shared by the integration tests.

#![allow(dead_code)]

use std::cell::Cell;

use horo_chart::{
    ALL_BODIES, BodyReading, ChartError, EphemerisProvider, EphemerisSnapshot, GeoPoint,
    HouseSystem,
};
use horo_time::{
    DEFAULT_OBLIQUITY_DEG, J2000_JD, Moment, atan2_deg, cos_deg, local_sidereal_time_deg,
    normalize_deg, sin_deg, tan_deg,
};
use tracing_subscriber::EnvFilter;

/// Route engine logs to the test harness. `RUST_LOG` overrides the default
/// `warn` level; only the first call in a test binary installs anything.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init()
        .ok();
}

/// Bodies move linearly from a J2000 base; angles follow real sidereal time.
pub struct DriftStub {
    pub calls: Cell<usize>,
}

/// Longitudes at J2000, degrees.
const BASE: [f64; 12] = [
    280.46, 218.32, 252.25, 181.98, 355.43, 34.35, 50.08, 314.06, 304.35, 238.93, 263.35, 125.04,
];

/// Mean daily motion, degrees per day.
const RATE: [f64; 12] = [
    0.9856, 13.1764, 4.0923, 1.6021, 0.5240, 0.0831, 0.0335, 0.0117, 0.0060, 0.0040, 0.1114,
    -0.0530,
];

impl DriftStub {
    pub fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }
}

impl EphemerisProvider for DriftStub {
    fn compute_chart(
        &self,
        moment: &Moment,
        geo: &GeoPoint,
        _house_system: HouseSystem,
        obliquity: Option<f64>,
    ) -> Result<EphemerisSnapshot, ChartError> {
        self.calls.set(self.calls.get() + 1);
        let jd = moment.julian_date();
        let eps = obliquity.unwrap_or(DEFAULT_OBLIQUITY_DEG);
        let lat = geo.latitude_deg;
        let ramc = local_sidereal_time_deg(jd, geo.longitude_deg);
        let mc = normalize_deg(atan2_deg(sin_deg(ramc), cos_deg(ramc) * cos_deg(eps)));
        let asc = normalize_deg(atan2_deg(
            cos_deg(ramc),
            -(sin_deg(ramc) * cos_deg(eps) + tan_deg(lat) * sin_deg(eps)),
        ));

        let mut snapshot = EphemerisSnapshot {
            raw_cusps: (0..12).map(|i| (asc + i as f64 * 30.0) % 180.0).collect(),
            ascendant: asc,
            midheaven: mc,
            ..Default::default()
        };
        for &body in &ALL_BODIES {
            let i = body.index();
            let lon = normalize_deg(BASE[i] + RATE[i] * (jd - J2000_JD));
            snapshot.bodies.insert(body, BodyReading::new(lon, RATE[i]));
        }
        Ok(snapshot)
    }
}

/// Every body parked at a fixed longitude table, regardless of time.
pub struct FixedStub {
    pub longitudes: [f64; 12],
}

impl EphemerisProvider for FixedStub {
    fn compute_chart(
        &self,
        _moment: &Moment,
        _geo: &GeoPoint,
        _house_system: HouseSystem,
        _obliquity: Option<f64>,
    ) -> Result<EphemerisSnapshot, ChartError> {
        let mut snapshot = EphemerisSnapshot {
            raw_cusps: (0..12).map(|i| f64::from(i) * 30.0 % 180.0).collect(),
            ascendant: 0.0,
            midheaven: 270.0,
            ..Default::default()
        };
        for &body in &ALL_BODIES {
            snapshot
                .bodies
                .insert(body, BodyReading::new(self.longitudes[body.index()], 0.0));
        }
        Ok(snapshot)
    }
}
