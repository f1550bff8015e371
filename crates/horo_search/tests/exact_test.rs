//! Exact-aspect solver convergence.

mod common;

use chrono::TimeDelta;
use common::{DriftStub, init_tracing};
use horo_chart::{
    Aspect, AspectKey, AspectKind, Body, ChartRequest, GeoPoint, HouseSystem, Point,
    compute_chart,
};
use horo_search::{ExactSearchConfig, exact_transit_time, refine_exact};
use horo_time::Moment;

fn sun_moon_square(orb: f64) -> Aspect {
    Aspect {
        point1: Point::Body(Body::Moon),
        point2: Point::Body(Body::Sun),
        kind: AspectKind::Square,
        orb,
    }
}

fn minutes_between(a: &Moment, b: &Moment) -> f64 {
    (a.julian_date() - b.julian_date()).abs() * 1440.0
}

#[test]
fn converges_on_linear_orb() {
    let seed = Moment::parse("20.03.2024", "03:06:00", "+00:00").expect("valid");
    let key = sun_moon_square(0.0).key();
    for offset_secs in [-1_700, -433, 1, 917, 1_799] {
        let t0 = seed.shifted(TimeDelta::seconds(offset_secs)).expect("valid");
        let hit = refine_exact(
            seed,
            &key,
            |m| Ok(vec![sun_moon_square(minutes_between(m, &t0))]),
            &ExactSearchConfig::default(),
        );
        let error_secs = minutes_between(&hit.moment, &t0) * 60.0;
        assert!(error_secs < 1.0, "t0 offset {offset_secs}s: off by {error_secs}s");
        assert!(hit.orb < 0.001, "t0 offset {offset_secs}s: orb {}", hit.orb);
    }
}

#[test]
fn target_outside_window_pins_to_edge_side() {
    let seed = Moment::parse("20.03.2024", "03:06:00", "+00:00").expect("valid");
    let t0 = seed.shifted(TimeDelta::hours(2)).expect("valid");
    let key = sun_moon_square(0.0).key();
    let hit = refine_exact(
        seed,
        &key,
        |m| Ok(vec![sun_moon_square(minutes_between(m, &t0))]),
        &ExactSearchConfig::default(),
    );
    assert!(hit.found());
    assert!(hit.moment.utc() > seed.utc());
    assert!(hit.moment.utc() <= seed.shifted(TimeDelta::minutes(30)).expect("valid").utc());
}

#[test]
fn transit_search_improves_on_seed() {
    init_tracing();
    let provider = DriftStub::new();
    let natal_request = ChartRequest::new(
        Moment::parse("01.01.2000", "12:00:00", "+00:00").expect("valid"),
        GeoPoint::new(51.5, 0.0).expect("valid"),
        HouseSystem::Placidus,
    );
    let natal = compute_chart(&provider, &natal_request).expect("natal");

    // The stub Moon moves ~0.09° per 10 minutes; seed the search at the first
    // sample where it sits within 0.1° of natal Sun.
    let natal_sun = natal.positions.longitude(Body::Sun);
    let key = AspectKey::new(
        Point::Body(Body::Sun),
        Point::Body(Body::Moon),
        AspectKind::Conjunction,
    );
    let transit_base = Moment::parse("01.02.2000", "00:00:00", "+00:00").expect("valid");
    let seed = (0..6 * 24 * 30)
        .filter_map(|step| transit_base.shifted(TimeDelta::minutes(10 * step)).ok())
        .find(|m| {
            compute_chart(&provider, &natal_request.at(*m))
                .map(|c| {
                    let d = (c.positions.longitude(Body::Moon) - natal_sun).abs();
                    d.min(360.0 - d) < 0.1
                })
                .unwrap_or(false)
        })
        .expect("the Moon passes natal Sun within a month");

    let hit = exact_transit_time(
        &provider,
        &natal,
        &natal_request,
        &key,
        seed,
        &ExactSearchConfig::default(),
    )
    .expect("valid config");
    assert!(hit.found());
    assert!(hit.orb < 0.01, "orb {}", hit.orb);
    assert!(minutes_between(&hit.moment, &seed) <= 30.0);
}
