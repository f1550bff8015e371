//! Birth-form field groups.

use horo_chart::{ChartRequest, GeoPoint, HouseSystem};
use horo_time::Moment;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// One date/time/place group as entered on the birth form.
///
/// `date` is `DD.MM.YYYY`, `time` is `HH:MM:SS`, `utc_offset` is `±HH:MM`.
/// Latitude and longitude are decimal degrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthFields {
    pub date: String,
    pub time: String,
    pub utc_offset: String,
    pub latitude: String,
    pub longitude: String,
}

impl BirthFields {
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        utc_offset: impl Into<String>,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            utc_offset: utc_offset.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    pub fn moment(&self) -> Result<Moment, SearchError> {
        Ok(Moment::parse(&self.date, &self.time, &self.utc_offset)?)
    }

    pub fn geo(&self) -> Result<GeoPoint, SearchError> {
        Ok(GeoPoint::parse(&self.latitude, &self.longitude)?)
    }

    pub fn to_request(&self, house_system: HouseSystem) -> Result<ChartRequest, SearchError> {
        Ok(ChartRequest::new(self.moment()?, self.geo()?, house_system))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horo_chart::ChartError;
    use horo_time::TimeError;

    fn london() -> BirthFields {
        BirthFields::new("01.01.2000", "12:00:00", "+00:00", "51.5", "-0.12")
    }

    #[test]
    fn builds_request() {
        let r = london().to_request(HouseSystem::Koch).expect("valid");
        assert_eq!(r.house_system, HouseSystem::Koch);
        assert!((r.geo.latitude_deg - 51.5).abs() < 1e-12);
        assert_eq!(r.moment.local().to_string(), "2000-01-01 12:00:00");
        assert_eq!(r.obliquity, None);
    }

    #[test]
    fn bad_offset_is_format_error() {
        let mut f = london();
        f.utc_offset = "+1:00".into();
        assert!(matches!(
            f.to_request(HouseSystem::Placidus),
            Err(SearchError::Time(TimeError::Format(_)))
        ));
    }

    #[test]
    fn bad_latitude_is_invalid_input() {
        let mut f = london();
        f.latitude = "91".into();
        assert!(matches!(
            f.to_request(HouseSystem::Placidus),
            Err(SearchError::Chart(ChartError::InvalidInput(_)))
        ));
    }
}
