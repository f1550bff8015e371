//! Progressed charts.
//!
//! Slow model (secondary progression): one day after birth per year of life.
//! `k = (JD_ref − JD_natal)/365 + 0.177`; the chart is recomputed `k` days
//! after birth and every natal cusp moves forward by `k` degrees.
//!
//! Fast model: the chart is recomputed `(JD_ref − JD_natal)/12` days after
//! birth; the Midheaven advances 30° per 365 elapsed days and the cusps come
//! from [`legacy_cusps`] at the sidereal time of that Midheaven.

use horo_chart::{Chart, ChartRequest, CuspSet, EphemerisProvider, compute_chart, legacy_cusps};
use horo_time::{Moment, SECONDS_PER_DAY, normalize_deg, round_to, sidereal_time_from_midheaven};
use serde::Serialize;

use crate::error::SearchError;

/// Constant added to the slow progression factor.
pub const SLOW_PROGRESSION_OFFSET: f64 = 0.177;

/// Days in the progression year.
const PROGRESSION_YEAR_DAYS: f64 = 365.0;

/// Ratio of elapsed days to progressed days in the fast model.
const FAST_DAY_DIVISOR: f64 = 12.0;

/// Midheaven advance per progression year in the fast model, degrees.
const FAST_MC_DEG_PER_YEAR: f64 = 30.0;

/// A progressed moment with its cusp set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progression {
    pub moment: Moment,
    pub cusps: CuspSet,
}

/// Slow progression factor `k` in days (and degrees of cusp advance).
pub fn slow_progression_factor(jd_natal: f64, jd_reference: f64) -> f64 {
    (jd_reference - jd_natal) / PROGRESSION_YEAR_DAYS + SLOW_PROGRESSION_OFFSET
}

/// Slow progression of a natal moment and cusp set to `reference`.
///
/// Cusps are `normalize(round(cusp + k, 4))`.
pub fn slow_progression(
    natal: &Moment,
    natal_cusps: &CuspSet,
    reference: &Moment,
) -> Result<Progression, SearchError> {
    let jd_natal = natal.julian_date();
    let k = slow_progression_factor(jd_natal, reference.julian_date());
    let moment =
        Moment::from_julian_date(jd_natal, natal.offset())?.plus_seconds(k * SECONDS_PER_DAY)?;
    let cusps = CuspSet::new(natal_cusps.as_array().map(|c| normalize_deg(round_to(c + k, 4))));
    Ok(Progression { moment, cusps })
}

/// Fast progression of a natal moment and Midheaven to `reference`.
pub fn fast_progression(
    natal: &Moment,
    natal_mc: f64,
    latitude: f64,
    obliquity: f64,
    reference: &Moment,
) -> Result<Progression, SearchError> {
    let jd_natal = natal.julian_date();
    let days = reference.julian_date() - jd_natal;
    let moment =
        Moment::from_julian_date(jd_natal, natal.offset())?.plus_days(days / FAST_DAY_DIVISOR)?;
    let mc = normalize_deg(natal_mc + days / PROGRESSION_YEAR_DAYS * FAST_MC_DEG_PER_YEAR);
    let st = sidereal_time_from_midheaven(mc, obliquity);
    let cusps = legacy_cusps(st, latitude, obliquity)?;
    Ok(Progression { moment, cusps })
}

/// Full chart at the slow-progressed moment with progressed cusps.
pub fn slow_progressed_chart<P>(
    provider: &P,
    natal_request: &ChartRequest,
    natal: &Chart,
    reference: &Moment,
) -> Result<Chart, SearchError>
where
    P: EphemerisProvider + ?Sized,
{
    let progression = slow_progression(&natal_request.moment, &natal.cusps, reference)?;
    let chart = compute_chart(provider, &natal_request.at(progression.moment))?;
    Ok(chart.with_cusps(progression.cusps))
}

/// Full chart at the fast-progressed moment with progressed cusps.
pub fn fast_progressed_chart<P>(
    provider: &P,
    natal_request: &ChartRequest,
    natal: &Chart,
    reference: &Moment,
) -> Result<Chart, SearchError>
where
    P: EphemerisProvider + ?Sized,
{
    let progression = fast_progression(
        &natal_request.moment,
        natal.midheaven,
        natal_request.geo.latitude_deg,
        natal_request.obliquity_deg(),
        reference,
    )?;
    let chart = compute_chart(provider, &natal_request.at(progression.moment))?;
    Ok(chart.with_cusps(progression.cusps))
}
