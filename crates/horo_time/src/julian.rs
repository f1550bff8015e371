//! Julian Date ↔ calendar conversions.
//!
//! Gregorian calendar throughout (proleptic before 1582), matching chrono.
//!
//! Source: Meeus, *Astronomical Algorithms*, ch. 7.

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};

use crate::error::TimeError;

/// Julian Date of the J2000.0 epoch (2000-Jan-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-Jan-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Calendar date (with fractional day) to Julian Date.
///
/// January and February count as months 13 and 14 of the previous year;
/// `B = 2 − A + ⌊A/4⌋` is the Gregorian century correction.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let y = y as f64;
    let m = m as f64;
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Julian Date to `(year, month, fractional day)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let jd = jd + 0.5;
    let z = jd.floor();
    let f = jd - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Julian Date of a UTC instant.
pub fn to_julian_date(instant: &NaiveDateTime) -> f64 {
    let seconds = instant.second() as f64 + instant.nanosecond() as f64 / 1e9;
    let day_frac = instant.day() as f64
        + instant.hour() as f64 / 24.0
        + instant.minute() as f64 / 1440.0
        + seconds / SECONDS_PER_DAY;
    calendar_to_jd(instant.year(), instant.month(), day_frac)
}

/// UTC instant of a Julian Date, at millisecond resolution.
pub fn julian_to_instant(jd: f64) -> Result<NaiveDateTime, TimeError> {
    if !jd.is_finite() {
        return Err(TimeError::OutOfRange(format!("julian date {jd}")));
    }
    let millis = ((jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round();
    if millis.abs() >= i64::MAX as f64 {
        return Err(TimeError::OutOfRange(format!("julian date {jd}")));
    }
    DateTime::from_timestamp_millis(millis as i64)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| TimeError::OutOfRange(format!("julian date {jd}")))
}

/// Julian centuries elapsed since J2000.0.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}
