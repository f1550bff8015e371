//! Exact-aspect timing by bisection.
//!
//! Starting from a seed time where an aspect was observed, the search
//! narrows a ±30 minute window around the seed. Each iteration samples the
//! midpoint and records it if its orb is the best so far, then compares the
//! orbs at both window edges and keeps the half on the smaller-orb side.
//! A midpoint without the aspect leaves the window unchanged.
//!
//! Standard bisection; the sampled function is the chart pipeline itself, so
//! every sample is a full chart computation.

use chrono::TimeDelta;
use horo_chart::{
    Aspect, AspectKey, Chart, ChartRequest, EphemerisProvider, compute_chart, cross_chart_aspects,
};
use horo_time::Moment;
use serde::Serialize;
use tracing::debug;

use crate::error::SearchError;

/// Configuration for [`refine_exact`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExactSearchConfig {
    /// Half-width of the search window around the seed, minutes.
    pub window_minutes: u32,
    /// Bisection iteration budget.
    pub max_iterations: u32,
    /// Stop once the best orb is below this, degrees.
    pub convergence_orb_deg: f64,
}

impl Default for ExactSearchConfig {
    fn default() -> Self {
        Self {
            window_minutes: 30,
            max_iterations: 20,
            convergence_orb_deg: 1e-5,
        }
    }
}

impl ExactSearchConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.window_minutes == 0 {
            return Err("window_minutes must be > 0");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !self.convergence_orb_deg.is_finite() || self.convergence_orb_deg <= 0.0 {
            return Err("convergence_orb_deg must be positive");
        }
        Ok(())
    }
}

/// Best moment found and its orb. `orb` is infinite when the aspect was
/// never seen inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExactHit {
    pub moment: Moment,
    pub orb: f64,
}

impl ExactHit {
    pub fn found(&self) -> bool {
        self.orb.is_finite()
    }
}

/// Orb of the aspect matching `key` at `moment`, if any.
///
/// Failed samples count as "no match".
fn orb_at<F>(aspects_at: &mut F, moment: &Moment, key: &AspectKey) -> Option<f64>
where
    F: FnMut(&Moment) -> Result<Vec<Aspect>, SearchError>,
{
    match aspects_at(moment) {
        Ok(aspects) => aspects
            .iter()
            .filter(|a| a.matches(key))
            .map(|a| a.orb)
            .min_by(f64::total_cmp),
        Err(e) => {
            debug!(%moment, error = %e, "exact search sample failed");
            None
        }
    }
}

/// Refine the time of minimum orb for `key` near `seed`. Never fails.
pub fn refine_exact<F>(
    seed: Moment,
    key: &AspectKey,
    mut aspects_at: F,
    config: &ExactSearchConfig,
) -> ExactHit
where
    F: FnMut(&Moment) -> Result<Vec<Aspect>, SearchError>,
{
    let mut best = ExactHit {
        moment: seed,
        orb: f64::INFINITY,
    };
    let window = TimeDelta::minutes(i64::from(config.window_minutes));
    let (Ok(mut start), Ok(mut end)) = (seed.shifted(-window), seed.shifted(window)) else {
        return best;
    };

    for iteration in 0..config.max_iterations {
        let half = (end.local() - start.local()) / 2;
        let Ok(mid) = start.shifted(half) else {
            break;
        };

        let Some(mid_orb) = orb_at(&mut aspects_at, &mid, key) else {
            continue;
        };
        if mid_orb < best.orb {
            best = ExactHit {
                moment: mid,
                orb: mid_orb,
            };
        }
        debug!(iteration, %mid, orb = mid_orb, best = best.orb, "exact search step");
        if best.orb < config.convergence_orb_deg {
            break;
        }

        let start_orb = orb_at(&mut aspects_at, &start, key);
        let end_orb = orb_at(&mut aspects_at, &end, key);
        match (start_orb, end_orb) {
            (Some(s), Some(e)) if e >= s => end = mid,
            _ => start = mid,
        }
    }
    best
}

/// Exact time of a natal-vs-transit aspect, sampling tight-orb cross-chart
/// aspects of charts built from `transit` at each probe time.
pub fn exact_transit_time<P>(
    provider: &P,
    natal: &Chart,
    transit: &ChartRequest,
    key: &AspectKey,
    seed: Moment,
    config: &ExactSearchConfig,
) -> Result<ExactHit, SearchError>
where
    P: EphemerisProvider + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    let aspects_at = |moment: &Moment| -> Result<Vec<Aspect>, SearchError> {
        let chart = compute_chart(provider, &transit.at(*moment))?;
        Ok(cross_chart_aspects(&natal.positions, &chart.positions, true))
    };
    Ok(refine_exact(seed, key, aspects_at, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use horo_chart::{AspectKind, Body, Point};

    fn key() -> AspectKey {
        AspectKey::new(
            Point::Body(Body::Sun),
            Point::Body(Body::Moon),
            AspectKind::Square,
        )
    }

    fn seed() -> Moment {
        Moment::parse("15.06.2010", "08:00:00", "+01:00").expect("valid")
    }

    fn square(orb: f64) -> Aspect {
        Aspect {
            point1: Point::Body(Body::Moon),
            point2: Point::Body(Body::Sun),
            kind: AspectKind::Square,
            orb,
        }
    }

    #[test]
    fn default_config_is_valid() {
        let c = ExactSearchConfig::default();
        assert_eq!(c.window_minutes, 30);
        assert_eq!(c.max_iterations, 20);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn invalid_configs() {
        let mut c = ExactSearchConfig::default();
        c.max_iterations = 0;
        assert!(c.validate().is_err());
        let mut c = ExactSearchConfig::default();
        c.convergence_orb_deg = f64::NAN;
        assert!(c.validate().is_err());
    }

    #[test]
    fn never_matching_returns_seed() {
        let hit = refine_exact(seed(), &key(), |_| Ok(vec![]), &ExactSearchConfig::default());
        assert_eq!(hit.moment, seed());
        assert!(hit.orb.is_infinite());
        assert!(!hit.found());
    }

    #[test]
    fn failing_samples_are_skipped() {
        let hit = refine_exact(
            seed(),
            &key(),
            |_| Err(SearchError::InvalidConfig("sample failed")),
            &ExactSearchConfig::default(),
        );
        assert_eq!(hit.moment, seed());
        assert!(!hit.found());
    }

    #[test]
    fn other_kinds_do_not_match() {
        let trine = Aspect {
            kind: AspectKind::Trine,
            ..square(0.0)
        };
        let hit = refine_exact(seed(), &key(), |_| Ok(vec![trine]), &ExactSearchConfig::default());
        assert!(!hit.found());
    }

    #[test]
    fn stops_at_first_exact_midpoint() {
        let mut calls = 0;
        let hit = refine_exact(
            seed(),
            &key(),
            |_| {
                calls += 1;
                Ok(vec![square(0.0)])
            },
            &ExactSearchConfig::default(),
        );
        assert_eq!(hit.moment, seed());
        assert_eq!(hit.orb, 0.0);
        assert_eq!(calls, 1);
    }
}
