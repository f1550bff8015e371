//! Aspect calendars.
//!
//! Two sweeps drive the chart pipeline across a time series:
//!
//! - **Hourly**: samples a short window at a fixed step, keeps each aspect key
//!   once at its minimum orb and buckets the survivors by local calendar day.
//! - **Daily interval**: samples one chart per day around a center date and
//!   runs an [`IntervalTracker`] over the forecast aspects, producing
//!   open/close intervals per aspect key.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Days, NaiveDate, NaiveTime, TimeDelta};
use horo_chart::{
    Aspect, AspectKey, Chart, ChartRequest, EphemerisProvider, compute_chart, cross_chart_aspects,
    forecast_aspects,
};
use horo_time::{Moment, TimeError};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::error::SearchError;
use crate::progression::{fast_progressed_chart, slow_progressed_chart};

// ---------------------------------------------------------------------------
// Hourly sweep
// ---------------------------------------------------------------------------

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Configuration for [`hourly_calendar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourlySweepConfig {
    /// Length of the window, days.
    pub days: u32,
    /// Sampling step, minutes.
    pub step_minutes: u32,
}

impl Default for HourlySweepConfig {
    fn default() -> Self {
        Self {
            days: 7,
            step_minutes: 60,
        }
    }
}

impl HourlySweepConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.days == 0 {
            return Err("days must be > 0");
        }
        if self.step_minutes == 0 {
            return Err("step_minutes must be > 0");
        }
        if self.window_minutes().is_none() {
            return Err("days is too large for a minute-step sweep");
        }
        Ok(())
    }

    fn window_minutes(&self) -> Option<u32> {
        self.days.checked_mul(MINUTES_PER_DAY)
    }

    /// Number of samples; zero for a config that fails [`Self::validate`].
    fn sample_count(&self) -> u32 {
        self.window_minutes()
            .map_or(0, |minutes| minutes.div_ceil(self.step_minutes.max(1)))
    }
}

/// An aspect and the instant it was sampled at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimedAspect {
    pub aspect: Aspect,
    pub moment: Moment,
}

/// One day of the hourly calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub aspects: Vec<TimedAspect>,
}

/// Midnight (local) of the day containing `moment`.
pub fn start_of_day(moment: &Moment) -> Result<Moment, TimeError> {
    Moment::new(
        moment.local().date().and_time(NaiveTime::MIN),
        moment.offset(),
    )
}

/// Sample `aspects_at` over `[start, start + days)` and build the calendar.
///
/// Failing samples are skipped. Each aspect key survives once, at the sample
/// with its smallest orb (earliest on ties), and is filed under the local date
/// of that sample. Days without aspects are omitted; days come out ascending.
pub fn hourly_calendar<F>(
    start: Moment,
    config: &HourlySweepConfig,
    mut aspects_at: F,
) -> Result<Vec<CalendarDay>, SearchError>
where
    F: FnMut(&Moment) -> Result<Vec<Aspect>, SearchError>,
{
    config.validate().map_err(SearchError::InvalidConfig)?;

    let mut best: BTreeMap<AspectKey, TimedAspect> = BTreeMap::new();
    for i in 0..config.sample_count() {
        let offset = i64::from(i) * i64::from(config.step_minutes);
        let moment = start.shifted(TimeDelta::minutes(offset))?;
        let aspects = match aspects_at(&moment) {
            Ok(aspects) => aspects,
            Err(e) => {
                warn!(%moment, error = %e, "skipping calendar sample");
                continue;
            }
        };
        for aspect in aspects {
            let candidate = TimedAspect { aspect, moment };
            best.entry(aspect.key())
                .and_modify(|kept| {
                    if aspect.orb < kept.aspect.orb {
                        *kept = candidate;
                    }
                })
                .or_insert(candidate);
        }
    }

    let mut days: BTreeMap<NaiveDate, Vec<TimedAspect>> = BTreeMap::new();
    for timed in best.into_values() {
        days.entry(timed.moment.local().date())
            .or_default()
            .push(timed);
    }

    Ok(days
        .into_iter()
        .filter_map(|(date, mut aspects)| {
            aspects.retain(|t| t.moment.local().day() == date.day());
            (!aspects.is_empty()).then_some(CalendarDay { date, aspects })
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Interval tracking
// ---------------------------------------------------------------------------

/// Configuration for [`interval_calendar`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntervalSweepConfig {
    /// Days sampled on each side of the center date.
    pub half_window_days: u32,
    /// Orb at which an interval opens, degrees.
    pub open_orb_deg: f64,
    /// Allowed distance from `open_orb_deg` when opening.
    pub open_tolerance_deg: f64,
    /// Orb at or below which an open interval closes.
    pub close_tolerance_deg: f64,
}

impl Default for IntervalSweepConfig {
    fn default() -> Self {
        Self {
            half_window_days: 365,
            open_orb_deg: 1.0,
            open_tolerance_deg: 0.04,
            close_tolerance_deg: 0.01,
        }
    }
}

impl IntervalSweepConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.half_window_days == 0 {
            return Err("half_window_days must be > 0");
        }
        if !self.open_orb_deg.is_finite() || self.open_orb_deg <= 0.0 {
            return Err("open_orb_deg must be positive");
        }
        if !self.open_tolerance_deg.is_finite() || self.open_tolerance_deg < 0.0 {
            return Err("open_tolerance_deg must be non-negative");
        }
        if !self.close_tolerance_deg.is_finite() || self.close_tolerance_deg < 0.0 {
            return Err("close_tolerance_deg must be non-negative");
        }
        if self.close_tolerance_deg >= self.open_orb_deg - self.open_tolerance_deg {
            return Err("close band must lie below the open band");
        }
        Ok(())
    }
}

/// State of a tracked aspect key. Keys absent from the tracker are unseen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum IntervalState {
    Open {
        start: NaiveDate,
        orb_at_start: f64,
    },
    Closed {
        start: NaiveDate,
        orb_at_start: f64,
        end: NaiveDate,
        orb_at_end: f64,
    },
}

/// A finished interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectInterval {
    pub key: AspectKey,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub orb_at_start: f64,
    pub orb_at_end: f64,
}

/// Per-key open/close state machine over days in chronological order.
///
/// - unseen → `Open` when the orb is within tolerance of the opening orb
/// - `Open` → `Closed` when the orb reaches the closing band
/// - `Closed` → emitted on the first later day the key is not observed
///
/// A key closed on the last observed day only leaves through
/// [`IntervalTracker::finish`], which shifts its dates back.
#[derive(Debug, Clone)]
pub struct IntervalTracker {
    config: IntervalSweepConfig,
    active: BTreeMap<AspectKey, IntervalState>,
    emitted: Vec<AspectInterval>,
}

impl IntervalTracker {
    pub fn new(config: IntervalSweepConfig) -> Self {
        Self {
            config,
            active: BTreeMap::new(),
            emitted: Vec::new(),
        }
    }

    pub fn state(&self, key: &AspectKey) -> Option<&IntervalState> {
        self.active.get(key)
    }

    pub fn emitted(&self) -> &[AspectInterval] {
        &self.emitted
    }

    /// Feed one day's aspects.
    pub fn observe_day(&mut self, date: NaiveDate, aspects: &[Aspect]) {
        let mut observed = BTreeSet::new();
        for aspect in aspects {
            let key = aspect.key();
            observed.insert(key);
            self.transition(date, key, aspect.orb);
        }

        let done: Vec<AspectKey> = self
            .active
            .iter()
            .filter(|(key, state)| {
                matches!(state, IntervalState::Closed { .. }) && !observed.contains(*key)
            })
            .map(|(key, _)| *key)
            .collect();
        for key in done {
            if let Some(IntervalState::Closed {
                start,
                orb_at_start,
                end,
                orb_at_end,
            }) = self.active.remove(&key)
            {
                debug!(%key, %start, %end, "interval emitted");
                self.emitted.push(AspectInterval {
                    key,
                    start,
                    end,
                    orb_at_start,
                    orb_at_end,
                });
            }
        }
    }

    fn transition(&mut self, date: NaiveDate, key: AspectKey, orb: f64) {
        let c = &self.config;
        let opening = (orb - c.open_orb_deg).abs() <= c.open_tolerance_deg;
        let closing = orb.abs() <= c.close_tolerance_deg;

        match self.active.get(&key).copied() {
            None if opening => {
                debug!(%key, %date, orb, "interval opened");
                self.active.insert(
                    key,
                    IntervalState::Open {
                        start: date,
                        orb_at_start: orb,
                    },
                );
            }
            Some(IntervalState::Open {
                start,
                orb_at_start,
            }) if closing => {
                debug!(%key, %date, orb, "interval closed");
                self.active.insert(
                    key,
                    IntervalState::Closed {
                        start,
                        orb_at_start,
                        end: date,
                        orb_at_end: orb,
                    },
                );
            }
            _ => {}
        }
    }

    /// End the sweep.
    ///
    /// Closed intervals still held are emitted with start one day and end two
    /// days earlier; open ones are dropped. Self-conjunctions and intervals
    /// entirely outside `center ± half_window_days` are removed. Output is
    /// sorted by start date, then key.
    pub fn finish(mut self, center: NaiveDate) -> Vec<AspectInterval> {
        for (key, state) in std::mem::take(&mut self.active) {
            if let IntervalState::Closed {
                start,
                orb_at_start,
                end,
                orb_at_end,
            } = state
            {
                self.emitted.push(AspectInterval {
                    key,
                    start: days_before(start, 1),
                    end: days_before(end, 2),
                    orb_at_start,
                    orb_at_end,
                });
            }
        }

        let half = Days::new(u64::from(self.config.half_window_days));
        let lo = center.checked_sub_days(half).unwrap_or(NaiveDate::MIN);
        let hi = center.checked_add_days(half).unwrap_or(NaiveDate::MAX);

        let mut out: Vec<AspectInterval> = self
            .emitted
            .into_iter()
            .filter(|i| !i.key.is_self_conjunction())
            .filter(|i| i.end >= lo && i.start <= hi)
            .collect();
        out.sort_by(|a, b| a.start.cmp(&b.start).then(a.key.cmp(&b.key)));
        out
    }
}

fn days_before(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(n)).unwrap_or(date)
}

/// Sample `aspects_on` once per day over `center ± half_window_days` and
/// track intervals.
///
/// Days are processed strictly in order. A failing day is skipped without
/// any state transition.
pub fn interval_calendar<F>(
    center: Moment,
    config: &IntervalSweepConfig,
    mut aspects_on: F,
) -> Result<Vec<AspectInterval>, SearchError>
where
    F: FnMut(&Moment) -> Result<Vec<Aspect>, SearchError>,
{
    config.validate().map_err(SearchError::InvalidConfig)?;

    let half = i64::from(config.half_window_days);
    let mut tracker = IntervalTracker::new(*config);
    for offset in -half..=half {
        let moment = center.shifted(TimeDelta::days(offset))?;
        match aspects_on(&moment) {
            Ok(aspects) => tracker.observe_day(moment.local().date(), &aspects),
            Err(e) => warn!(%moment, error = %e, "skipping calendar day"),
        }
    }
    Ok(tracker.finish(center.local().date()))
}

// ---------------------------------------------------------------------------
// Provider-backed calendars
// ---------------------------------------------------------------------------

/// Natal-vs-transit aspects, hourly, from midnight of `start`'s day.
#[instrument(skip_all, fields(start = %start))]
pub fn transit_calendar<P>(
    provider: &P,
    natal: &Chart,
    transit: &ChartRequest,
    start: &Moment,
    config: &HourlySweepConfig,
) -> Result<Vec<CalendarDay>, SearchError>
where
    P: EphemerisProvider + ?Sized,
{
    hourly_calendar(start_of_day(start)?, config, |moment| {
        let chart = compute_chart(provider, &transit.at(*moment))?;
        Ok(cross_chart_aspects(&natal.positions, &chart.positions, false))
    })
}

/// Natal-vs-fast-progressed aspects, hourly, from midnight of `start`'s day.
#[instrument(skip_all, fields(start = %start))]
pub fn fast_progression_calendar<P>(
    provider: &P,
    natal_request: &ChartRequest,
    natal: &Chart,
    start: &Moment,
    config: &HourlySweepConfig,
) -> Result<Vec<CalendarDay>, SearchError>
where
    P: EphemerisProvider + ?Sized,
{
    hourly_calendar(start_of_day(start)?, config, |moment| {
        let progressed = fast_progressed_chart(provider, natal_request, natal, moment)?;
        Ok(cross_chart_aspects(
            &natal.positions,
            &progressed.positions,
            false,
        ))
    })
}

/// Natal-vs-slow-progressed forecast aspects (bodies and cusps), one day
/// at a time around `center`, as intervals.
#[instrument(skip_all, fields(center = %center))]
pub fn slow_progression_calendar<P>(
    provider: &P,
    natal_request: &ChartRequest,
    natal: &Chart,
    center: &Moment,
    config: &IntervalSweepConfig,
) -> Result<Vec<AspectInterval>, SearchError>
where
    P: EphemerisProvider + ?Sized,
{
    interval_calendar(*center, config, |moment| {
        let progressed = slow_progressed_chart(provider, natal_request, natal, moment)?;
        Ok(forecast_aspects(
            &natal.positions,
            &natal.cusps,
            &progressed.positions,
            &progressed.cusps,
        ))
    })
}
