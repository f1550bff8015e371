//! `Moment`: a local wall-clock time paired with its UTC offset.

use std::fmt::{Display, Formatter};

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::error::TimeError;
use crate::julian::{julian_to_instant, to_julian_date};
use crate::offset::{UtcOffset, parse_date, parse_time};

/// A calendar date and time together with the UTC offset it was recorded in.
///
/// Every constructor resolves the absolute instant up front, so a `Moment`
/// whose UTC time falls outside chrono's range cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Moment {
    local: NaiveDateTime,
    offset: UtcOffset,
    #[serde(skip)]
    utc: NaiveDateTime,
}

impl Moment {
    /// Fails with [`TimeError::OutOfRange`] when `local − offset` is not
    /// representable.
    pub fn new(local: NaiveDateTime, offset: UtcOffset) -> Result<Self, TimeError> {
        let utc = local
            .checked_sub_signed(offset.as_delta())
            .ok_or_else(|| TimeError::OutOfRange(format!("{local} {offset}")))?;
        Ok(Self { local, offset, utc })
    }

    /// Moment for a UTC instant, displayed in `offset`.
    pub fn from_utc(utc: NaiveDateTime, offset: UtcOffset) -> Result<Self, TimeError> {
        let local = utc
            .checked_add_signed(offset.as_delta())
            .ok_or_else(|| TimeError::OutOfRange(format!("{utc} {offset}")))?;
        Ok(Self { local, offset, utc })
    }

    /// Parse the birth-form strings (`DD.MM.YYYY`, `HH:MM:SS`, `±HH:MM`).
    pub fn parse(date: &str, time: &str, offset: &str) -> Result<Self, TimeError> {
        let local = NaiveDateTime::new(parse_date(date)?, parse_time(time)?);
        Self::new(local, UtcOffset::parse(offset)?)
    }

    /// Moment at a Julian Date, shown in `offset`.
    pub fn from_julian_date(jd: f64, offset: UtcOffset) -> Result<Self, TimeError> {
        Self::from_utc(julian_to_instant(jd)?, offset)
    }

    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// The absolute instant (local minus offset).
    pub fn utc(&self) -> NaiveDateTime {
        self.utc
    }

    pub fn julian_date(&self) -> f64 {
        to_julian_date(&self.utc())
    }

    /// Shift by a signed duration, keeping the offset.
    pub fn shifted(&self, delta: TimeDelta) -> Result<Self, TimeError> {
        let local = self
            .local
            .checked_add_signed(delta)
            .ok_or_else(|| TimeError::OutOfRange(format!("{self} shifted by {delta}")))?;
        Self::new(local, self.offset)
    }

    /// Shift by fractional seconds (microsecond resolution), keeping the offset.
    pub fn plus_seconds(&self, seconds: f64) -> Result<Self, TimeError> {
        if !seconds.is_finite() {
            return Err(TimeError::OutOfRange(format!("{self} + {seconds} s")));
        }
        let micros = (seconds * 1e6).round();
        if micros.abs() >= i64::MAX as f64 {
            return Err(TimeError::OutOfRange(format!("{self} + {seconds} s")));
        }
        self.shifted(TimeDelta::microseconds(micros as i64))
    }

    pub fn plus_days(&self, days: f64) -> Result<Self, TimeError> {
        self.plus_seconds(days * crate::julian::SECONDS_PER_DAY)
    }

    /// Same instant re-expressed in another offset.
    pub fn with_offset(&self, offset: UtcOffset) -> Result<Self, TimeError> {
        Self::from_utc(self.utc(), offset)
    }
}

impl Display for Moment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.local.format("%Y-%m-%dT%H:%M:%S"), self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julian::J2000_JD;

    #[test]
    fn parse_and_resolve() {
        let m = Moment::parse("01.01.2000", "17:30:00", "+05:30").expect("valid");
        assert_eq!(m.utc().to_string(), "2000-01-01 12:00:00");
        assert!((m.julian_date() - J2000_JD).abs() < 1e-9);
        assert_eq!(m.to_string(), "2000-01-01T17:30:00+05:30");
    }

    #[test]
    fn offset_less_is_utc() {
        let m = Moment::parse("01.01.2000", "12:00:00", "+00:00").expect("valid");
        assert_eq!(m.utc(), m.local());
    }

    #[test]
    fn from_julian_keeps_offset() {
        let offset = UtcOffset::parse("-05:00").expect("valid");
        let m = Moment::from_julian_date(J2000_JD, offset).expect("valid");
        assert_eq!(m.local().to_string(), "2000-01-01 07:00:00");
        assert_eq!(m.offset(), offset);
    }

    #[test]
    fn plus_days_crosses_midnight() {
        let m = Moment::parse("31.12.1999", "18:00:00", "+00:00").expect("valid");
        let later = m.plus_days(0.5).expect("valid");
        assert_eq!(later.local().to_string(), "2000-01-01 06:00:00");
    }

    #[test]
    fn unrepresentable_instant_is_rejected() {
        let west = UtcOffset::parse("-05:00").expect("valid");
        assert!(matches!(
            Moment::new(NaiveDateTime::MAX, west),
            Err(TimeError::OutOfRange(_))
        ));

        let utc = UtcOffset::parse("+00:00").expect("valid");
        let edge = Moment::new(NaiveDateTime::MAX, utc).expect("no offset to apply");
        assert_eq!(edge.utc(), NaiveDateTime::MAX);

        // Local time still fits after the shift, the UTC instant does not.
        let near = NaiveDateTime::MAX
            .checked_sub_signed(TimeDelta::hours(10))
            .expect("in range");
        let m = Moment::new(near, west).expect("five hours of headroom");
        assert!(matches!(
            m.shifted(TimeDelta::hours(6)),
            Err(TimeError::OutOfRange(_))
        ));
    }

    #[test]
    fn with_offset_keeps_instant() {
        let m = Moment::parse("01.01.2000", "12:00:00", "+00:00").expect("valid");
        let shifted = m
            .with_offset(UtcOffset::parse("+02:00").expect("valid"))
            .expect("valid");
        assert_eq!(shifted.utc(), m.utc());
        assert_eq!(shifted.local().to_string(), "2000-01-01 14:00:00");
    }
}
