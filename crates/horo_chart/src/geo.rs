//! Geographic observer location.

use serde::Serialize;

use crate::error::ChartError;

/// Observer location. Latitude north positive, longitude east positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    /// Degrees, [-90, 90].
    pub latitude_deg: f64,
    /// Degrees, [-180, 180].
    pub longitude_deg: f64,
}

impl GeoPoint {
    /// Create a validated location.
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, ChartError> {
        let geo = Self {
            latitude_deg,
            longitude_deg,
        };
        geo.validate()?;
        Ok(geo)
    }

    /// Reject non-finite or out-of-range coordinates. Values are never clamped.
    pub fn validate(&self) -> Result<(), ChartError> {
        if !self.latitude_deg.is_finite() || !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(ChartError::InvalidInput(format!(
                "latitude {} outside [-90, 90]",
                self.latitude_deg
            )));
        }
        if !self.longitude_deg.is_finite() || !(-180.0..=180.0).contains(&self.longitude_deg) {
            return Err(ChartError::InvalidInput(format!(
                "longitude {} outside [-180, 180]",
                self.longitude_deg
            )));
        }
        Ok(())
    }

    /// Parse the decimal-degree strings of a birth form.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, ChartError> {
        let lat = parse_coordinate(latitude, "latitude")?;
        let lon = parse_coordinate(longitude, "longitude")?;
        Self::new(lat, lon)
    }
}

fn parse_coordinate(s: &str, what: &str) -> Result<f64, ChartError> {
    s.trim()
        .parse()
        .map_err(|_| ChartError::InvalidInput(format!("{what} {s:?} is not a number")))
}
