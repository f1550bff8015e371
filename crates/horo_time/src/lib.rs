//! Time base for the horo chart engine.
//!
//! This crate provides:
//! - Julian Date ↔ calendar/instant conversions
//! - `±HH:MM` UTC offsets and the birth-form date/time formats
//! - `Moment`, a wall-clock time with its offset
//! - Local sidereal time, from a Julian Date or from a Midheaven
//! - Degree-based trig and angle normalization shared by the chart crates

pub mod angle;
pub mod error;
pub mod julian;
pub mod moment;
pub mod offset;
pub mod sidereal;

pub use angle::{
    arc_forward, asin_deg, atan2_deg, atan_deg, cos_deg, normalize_deg, round_to,
    separation_deg, sin_deg, tan_deg,
};
pub use error::TimeError;
pub use julian::{
    J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, jd_to_calendar,
    julian_to_instant, to_julian_date,
};
pub use moment::Moment;
pub use offset::{UtcOffset, apply_utc_offset, parse_date, parse_time};
pub use sidereal::{
    DEFAULT_OBLIQUITY_DEG, greenwich_sidereal_time_deg, local_sidereal_time_deg,
    sidereal_time_from_midheaven,
};
