//! Error types for progression, search and calendar operations.

use horo_chart::ChartError;
use horo_time::TimeError;
use thiserror::Error;

/// Errors from search operations.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Error from chart construction.
    #[error("chart error: {0}")]
    Chart(#[from] ChartError),
    /// Error from date/time parsing or arithmetic.
    #[error("time error: {0}")]
    Time(#[from] TimeError),
    /// Invalid search or sweep configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// The requested mode needs a field group that was not supplied.
    #[error("missing input: {0}")]
    MissingInput(&'static str),
}
