//! Searches and sweeps over the chart pipeline.
//!
//! This crate provides:
//! - Slow (secondary) and fast progressions
//! - Exact-aspect timing by bisection
//! - Hourly aspect calendars and daily interval tracking
//! - Birth-form field groups and the chart-mode dispatcher

pub mod birth;
pub mod calendar;
pub mod error;
pub mod exact;
pub mod mode;
pub mod progression;

pub use birth::BirthFields;
pub use calendar::{
    AspectInterval, CalendarDay, HourlySweepConfig, IntervalState, IntervalSweepConfig,
    IntervalTracker, TimedAspect, fast_progression_calendar, hourly_calendar, interval_calendar,
    slow_progression_calendar, start_of_day, transit_calendar,
};
pub use error::SearchError;
pub use exact::{ExactHit, ExactSearchConfig, exact_transit_time, refine_exact};
pub use mode::{BirthContext, ChartMode, ModeOutcome, SearchSettings, run_mode};
pub use progression::{
    Progression, SLOW_PROGRESSION_OFFSET, fast_progressed_chart, fast_progression,
    slow_progressed_chart, slow_progression, slow_progression_factor,
};
