//! Ephemeris provider contract.
//!
//! The engine never computes orbital positions itself. A provider returns
//! raw ecliptic longitudes for the fixed body set plus the Ascendant,
//! Midheaven and a raw quadrant cusp set. Cusp correction happens in
//! [`crate::house`].

use std::collections::HashMap;

use horo_time::Moment;

use crate::body::Body;
use crate::error::ChartError;
use crate::geo::GeoPoint;
use crate::house_types::HouseSystem;

/// Longitude and daily motion of one body.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyReading {
    /// Ecliptic longitude in degrees, [0, 360).
    pub longitude: f64,
    /// Longitude speed in degrees/day. Negative means retrograde.
    pub speed: f64,
}

impl BodyReading {
    pub fn new(longitude: f64, speed: f64) -> Self {
        Self { longitude, speed }
    }
}

/// Raw provider output for one moment and place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EphemerisSnapshot {
    pub bodies: HashMap<Body, BodyReading>,
    /// Pre-correction house cusps, house 1 first. May be mirrored by 180°.
    pub raw_cusps: Vec<f64>,
    pub ascendant: f64,
    pub midheaven: f64,
}

impl EphemerisSnapshot {
    /// Reading for `body`, or [`ChartError::LookupMiss`] when absent.
    pub fn reading(&self, body: Body) -> Result<BodyReading, ChartError> {
        self.bodies
            .get(&body)
            .copied()
            .ok_or(ChartError::LookupMiss(body))
    }

    /// Check that every value the provider returned is finite.
    pub fn check_finite(&self) -> Result<(), ChartError> {
        if !self.ascendant.is_finite() || !self.midheaven.is_finite() {
            return Err(ChartError::Ephemeris(format!(
                "non-finite angles: asc={} mc={}",
                self.ascendant, self.midheaven
            )));
        }
        if let Some(c) = self.raw_cusps.iter().find(|c| !c.is_finite()) {
            return Err(ChartError::Ephemeris(format!("non-finite cusp {c}")));
        }
        for (body, r) in &self.bodies {
            if !r.longitude.is_finite() || !r.speed.is_finite() {
                return Err(ChartError::Ephemeris(format!(
                    "non-finite reading for {body}: {} / {}",
                    r.longitude, r.speed
                )));
            }
        }
        Ok(())
    }
}

/// Source of raw positions and cusps.
pub trait EphemerisProvider {
    /// Compute raw chart data at `moment` for `geo`.
    ///
    /// `obliquity` overrides the provider's own obliquity of the ecliptic
    /// when given. Invalid time or place must be reported as an error,
    /// never as NaN.
    fn compute_chart(
        &self,
        moment: &Moment,
        geo: &GeoPoint,
        house_system: HouseSystem,
        obliquity: Option<f64>,
    ) -> Result<EphemerisSnapshot, ChartError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_body_is_lookup_miss() {
        let snap = EphemerisSnapshot::default();
        assert_eq!(
            snap.reading(Body::Pluto),
            Err(ChartError::LookupMiss(Body::Pluto))
        );
    }

    #[test]
    fn nan_is_rejected() {
        let mut snap = EphemerisSnapshot::default();
        snap.bodies.insert(Body::Sun, BodyReading::new(f64::NAN, 1.0));
        assert!(matches!(snap.check_finite(), Err(ChartError::Ephemeris(_))));
        snap.bodies.insert(Body::Sun, BodyReading::new(10.0, 1.0));
        assert!(snap.check_finite().is_ok());
        snap.raw_cusps = vec![0.0, f64::INFINITY];
        assert!(snap.check_finite().is_err());
    }
}
