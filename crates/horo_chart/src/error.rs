//! Error types for chart construction.

use horo_time::TimeError;
use thiserror::Error;

use crate::body::Body;

/// Errors from house, aspect and chart computation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// Error from date/time parsing or conversion.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
    /// Out-of-range coordinates or malformed cusp arrays.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The ephemeris provider had no reading for a body.
    #[error("no ephemeris reading for {}", .0.name())]
    LookupMiss(Body),
    /// The ephemeris provider failed or returned unusable values.
    #[error("ephemeris error: {0}")]
    Ephemeris(String),
}
