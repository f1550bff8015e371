//! Symmetry and orb-bound checks for the aspect detector.

use horo_chart::{
    ALL_BODIES, AspectConfig, AspectKind, ChartPositions, CuspSet, Point, cross_chart_aspects,
    find_aspects, forecast_aspects, self_chart_aspects,
};

/// Deterministic longitude tables (xorshift, fixed seed).
fn longitude_tables(count: usize) -> Vec<[f64; 12]> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64 * 360.0
    };
    (0..count)
        .map(|_| std::array::from_fn(|_| next()))
        .collect()
}

fn kind_orb_pairs(aspects: &[horo_chart::Aspect]) -> Vec<(AspectKind, i64)> {
    let mut pairs: Vec<(AspectKind, i64)> = aspects
        .iter()
        .map(|a| (a.kind, (a.orb * 1e9).round() as i64))
        .collect();
    pairs.sort();
    pairs
}

#[test]
fn cross_chart_is_symmetric() {
    let tables = longitude_tables(20);
    for pair in tables.chunks(2) {
        let a = ChartPositions::from_longitudes(pair[0]);
        let b = ChartPositions::from_longitudes(pair[1]);
        for tight in [false, true] {
            let ab = cross_chart_aspects(&a, &b, tight);
            let ba = cross_chart_aspects(&b, &a, tight);
            assert_eq!(kind_orb_pairs(&ab), kind_orb_pairs(&ba), "tight = {tight}");
        }
    }
}

#[test]
fn forecast_is_symmetric() {
    let tables = longitude_tables(8);
    for quad in tables.chunks(4) {
        let a = ChartPositions::from_longitudes(quad[0]);
        let b = ChartPositions::from_longitudes(quad[1]);
        let ca = CuspSet::new(quad[2]);
        let cb = CuspSet::new(quad[3]);
        let ab = forecast_aspects(&a, &ca, &b, &cb);
        let ba = forecast_aspects(&b, &cb, &a, &ca);
        assert_eq!(kind_orb_pairs(&ab), kind_orb_pairs(&ba));
    }
}

#[test]
fn every_aspect_within_its_limit() {
    let configs = [
        AspectConfig::SELF_CHART,
        AspectConfig::SYNASTRY,
        AspectConfig::SYNASTRY_TIGHT,
        AspectConfig::FORECAST,
    ];
    let tables = longitude_tables(10);
    for table in &tables {
        let points: Vec<(Point, f64)> = ALL_BODIES
            .iter()
            .map(|&b| (Point::Body(b), table[b.index()]))
            .chain((1..=12u8).map(|n| (Point::Cusp(n), table[(n - 1) as usize])))
            .collect();
        for config in &configs {
            for aspect in find_aspects(config, &points, &points) {
                let limit = config.orb_limit(aspect.point1, aspect.point2);
                assert!(
                    aspect.orb <= limit,
                    "{:?}: orb {} > {limit}",
                    aspect.key(),
                    aspect.orb
                );
                assert!(config.kinds.contains(&aspect.kind));
            }
        }
    }
}

#[test]
fn self_chart_has_no_minor_kinds() {
    for table in longitude_tables(10) {
        let positions = ChartPositions::from_longitudes(table);
        for aspect in self_chart_aspects(&positions) {
            assert!(!matches!(
                aspect.kind,
                AspectKind::Semisextile | AspectKind::Quincunx
            ));
            assert!(aspect.orb <= 9.0);
        }
    }
}
