//! Error types for time parsing and conversion.

use thiserror::Error;

/// Errors from date/time/offset parsing and Julian Date conversion.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Input string does not match the expected pattern.
    #[error("format error: {0}")]
    Format(String),
    /// Input matched the pattern but its value is out of range.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Result cannot be represented as a calendar instant.
    #[error("out of range: {0}")]
    OutOfRange(String),
}
