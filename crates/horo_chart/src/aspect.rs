//! Aspect detection.
//!
//! Every mode runs the same test: shortest separation between two points,
//! then for each configured kind emit an aspect when the deviation from the
//! kind's angle is within the pair's orb. Windows may overlap; a pair can
//! emit more than one kind.

use horo_time::separation_deg;

use crate::aspect_types::{Aspect, AspectConfig};
use crate::body::Point;
use crate::house_types::CuspSet;
use crate::positions::ChartPositions;

/// Aspects formed by one pair of points.
pub fn aspects_between(
    config: &AspectConfig,
    (p1, lon1): (Point, f64),
    (p2, lon2): (Point, f64),
) -> impl Iterator<Item = Aspect> + '_ {
    let separation = separation_deg(lon1, lon2);
    let limit = config.orb_limit(p1, p2);
    config.kinds.iter().filter_map(move |&kind| {
        let deviation = (separation - kind.angle()).abs();
        (deviation <= limit).then_some(Aspect {
            point1: p1,
            point2: p2,
            kind,
            orb: deviation,
        })
    })
}

/// Aspects over the cross product `a × b`.
pub fn find_aspects(config: &AspectConfig, a: &[(Point, f64)], b: &[(Point, f64)]) -> Vec<Aspect> {
    let mut out = Vec::new();
    for &pa in a {
        for &pb in b {
            out.extend(aspects_between(config, pa, pb));
        }
    }
    out
}

/// Aspects between distinct bodies of one chart, each pair once.
pub fn self_chart_aspects(positions: &ChartPositions) -> Vec<Aspect> {
    let points = positions.points();
    let config = &AspectConfig::SELF_CHART;
    let mut out = Vec::new();
    for (i, &pa) in points.iter().enumerate() {
        for &pb in &points[i + 1..] {
            out.extend(aspects_between(config, pa, pb));
        }
    }
    out
}

/// Aspects between the bodies of two charts.
///
/// `tight` selects [`AspectConfig::SYNASTRY_TIGHT`] instead of
/// [`AspectConfig::SYNASTRY`].
pub fn cross_chart_aspects(a: &ChartPositions, b: &ChartPositions, tight: bool) -> Vec<Aspect> {
    let config = if tight {
        &AspectConfig::SYNASTRY_TIGHT
    } else {
        &AspectConfig::SYNASTRY
    };
    find_aspects(config, &a.points(), &b.points())
}

/// Aspects between bodies and cusps of two charts with 1° orbs.
pub fn forecast_aspects(
    a_positions: &ChartPositions,
    a_cusps: &CuspSet,
    b_positions: &ChartPositions,
    b_cusps: &CuspSet,
) -> Vec<Aspect> {
    find_aspects(
        &AspectConfig::FORECAST,
        &a_positions.points_with_cusps(a_cusps),
        &b_positions.points_with_cusps(b_cusps),
    )
}
