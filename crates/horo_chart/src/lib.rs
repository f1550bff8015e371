//! Chart construction on top of an external ephemeris provider.
//!
//! This crate provides:
//! - The fixed body set, chart points, zodiac signs
//! - The [`EphemerisProvider`] contract
//! - House cusps: Koch and hour-angle formulas, 180° disambiguation
//! - Aspect detection with named orb tables
//! - Chart assembly (positions, cusps, planet/house tables, aspects)

pub mod aspect;
pub mod aspect_types;
pub mod body;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod geo;
pub mod house;
pub mod house_types;
pub mod positions;

pub use aspect::{
    aspects_between, cross_chart_aspects, find_aspects, forecast_aspects, self_chart_aspects,
};
pub use aspect_types::{
    Aspect, AspectConfig, AspectKey, AspectKind, FORECAST_ASPECTS, MAJOR_ASPECTS, OrbCombine,
    OrbTable,
};
pub use body::{ALL_BODIES, ALL_SIGNS, Body, Dms, Point, Sign, house_label};
pub use chart::{Chart, ChartRequest, HouseRow, PlanetRow, compute_chart};
pub use ephemeris::{BodyReading, EphemerisProvider, EphemerisSnapshot};
pub use error::ChartError;
pub use geo::GeoPoint;
pub use house::{
    disambiguate_cusps, house_of, is_sequential, koch_cusps, koch_raw_cusps, legacy_cusps,
    resolve_cusps, rotate_half,
};
pub use house_types::{CuspSet, HouseSystem};
pub use positions::ChartPositions;
