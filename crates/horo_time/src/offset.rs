//! UTC offsets and the birth-form date/time string formats.
//!
//! Formats accepted (exact, no surrounding whitespace):
//! - offset `±HH:MM`, within −12:00..=+14:00
//! - date `DD.MM.YYYY`
//! - time `HH:MM:SS`

use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use regex::Regex;
use serde::Serialize;

use crate::error::TimeError;

static OFFSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-])(\d{2}):(\d{2})$").expect("offset pattern compiles"));
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})\.(\d{2})\.(\d{4})$").expect("date pattern compiles"));
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2}):(\d{2}):(\d{2})$").expect("time pattern compiles"));

/// Most negative offset accepted, in minutes (−12:00).
pub const MIN_OFFSET_MINUTES: i32 = -12 * 60;
/// Most positive offset accepted, in minutes (+14:00).
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Signed offset of local wall-clock time from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct UtcOffset {
    minutes: i32,
}

impl UtcOffset {
    pub const UTC: Self = Self { minutes: 0 };

    /// Offset from signed minutes east of Greenwich.
    pub fn from_minutes(minutes: i32) -> Result<Self, TimeError> {
        if !(MIN_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
            return Err(TimeError::InvalidInput(format!(
                "UTC offset {minutes} min outside -12:00..+14:00"
            )));
        }
        Ok(Self { minutes })
    }

    /// Parse a `±HH:MM` offset string.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let caps = OFFSET_RE
            .captures(s)
            .ok_or_else(|| TimeError::Format(format!("UTC offset {s:?} is not ±HH:MM")))?;
        let hours: i32 = parse_field(&caps[2], s)?;
        let minutes: i32 = parse_field(&caps[3], s)?;
        if minutes >= 60 {
            return Err(TimeError::InvalidInput(format!(
                "UTC offset {s:?} has minutes >= 60"
            )));
        }
        let total = hours * 60 + minutes;
        let signed = if &caps[1] == "-" { -total } else { total };
        Self::from_minutes(signed)
    }

    pub fn minutes(self) -> i32 {
        self.minutes
    }

    pub fn as_delta(self) -> TimeDelta {
        TimeDelta::minutes(self.minutes as i64)
    }
}

impl Display for UtcOffset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.minutes < 0 { '-' } else { '+' };
        let abs = self.minutes.abs();
        write!(f, "{sign}{:02}:{:02}", abs / 60, abs % 60)
    }
}

impl std::str::FromStr for UtcOffset {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_field<T: std::str::FromStr>(digits: &str, whole: &str) -> Result<T, TimeError> {
    digits
        .parse()
        .map_err(|_| TimeError::Format(format!("{whole:?}: bad numeric field {digits:?}")))
}

/// Parse a `DD.MM.YYYY` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, TimeError> {
    let caps = DATE_RE
        .captures(s)
        .ok_or_else(|| TimeError::Format(format!("date {s:?} is not DD.MM.YYYY")))?;
    let day: u32 = parse_field(&caps[1], s)?;
    let month: u32 = parse_field(&caps[2], s)?;
    let year: i32 = parse_field(&caps[3], s)?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| TimeError::Format(format!("date {s:?} is not a calendar date")))
}

/// Parse an `HH:MM:SS` wall-clock time.
pub fn parse_time(s: &str) -> Result<NaiveTime, TimeError> {
    let caps = TIME_RE
        .captures(s)
        .ok_or_else(|| TimeError::Format(format!("time {s:?} is not HH:MM:SS")))?;
    let hour: u32 = parse_field(&caps[1], s)?;
    let minute: u32 = parse_field(&caps[2], s)?;
    let second: u32 = parse_field(&caps[3], s)?;
    NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| TimeError::Format(format!("time {s:?} is not a wall-clock time")))
}

/// Convert a local wall-clock date/time with a `±HH:MM` offset to UTC.
pub fn apply_utc_offset(date: &str, time: &str, offset: &str) -> Result<NaiveDateTime, TimeError> {
    let local = NaiveDateTime::new(parse_date(date)?, parse_time(time)?);
    let offset = UtcOffset::parse(offset)?;
    local
        .checked_sub_signed(offset.as_delta())
        .ok_or_else(|| TimeError::OutOfRange(format!("{date} {time} {offset}")))
}
