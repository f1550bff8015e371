//! Degree-based angle helpers.
//!
//! Every chart formula works in degrees; these wrap the radian trig
//! functions so call sites read like the formulas they implement.

/// Normalize an angle to [0, 360) degrees.
///
/// Computed as `((x % 360) + 360) % 360`; the second remainder folds the
/// `-0.0`/`360 - ε` rounding case back to zero.
pub fn normalize_deg(deg: f64) -> f64 {
    ((deg % 360.0) + 360.0) % 360.0
}

/// Forward (counter-clockwise) arc from `from` to `to` in degrees, [0, 360).
pub fn arc_forward(from: f64, to: f64) -> f64 {
    normalize_deg(to - from)
}

/// Shortest angular separation between two longitudes, [0, 180].
pub fn separation_deg(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs();
    diff.min(360.0 - diff)
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

pub fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

pub fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

pub fn tan_deg(deg: f64) -> f64 {
    deg.to_radians().tan()
}

pub fn asin_deg(x: f64) -> f64 {
    x.asin().to_degrees()
}

pub fn atan_deg(x: f64) -> f64 {
    x.atan().to_degrees()
}

pub fn atan2_deg(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_range_holds() {
        for &x in &[
            0.0, 45.0, 360.0, 720.0, -10.0, -360.0, -370.0, 1e6, -1e6, -1e-14, 359.999_999,
        ] {
            let n = normalize_deg(x);
            assert!((0.0..360.0).contains(&n), "normalize({x}) = {n}");
        }
    }

    #[test]
    fn normalize_values() {
        assert!((normalize_deg(-10.0) - 350.0).abs() < 1e-12);
        assert!((normalize_deg(730.0) - 10.0).abs() < 1e-10);
        assert!(normalize_deg(360.0).abs() < 1e-12);
        assert!(normalize_deg(-720.0).abs() < 1e-12);
    }

    #[test]
    fn arc_forward_wraps() {
        assert!((arc_forward(350.0, 20.0) - 30.0).abs() < 1e-10);
        assert!((arc_forward(20.0, 350.0) - 330.0).abs() < 1e-10);
    }

    #[test]
    fn separation_is_shortest() {
        assert!((separation_deg(10.0, 350.0) - 20.0).abs() < 1e-10);
        assert!((separation_deg(0.0, 180.0) - 180.0).abs() < 1e-10);
        assert!((separation_deg(100.0, 278.0) - 178.0).abs() < 1e-10);
    }

    #[test]
    fn round_to_four_places() {
        assert!((round_to(12.345_678, 4) - 12.3457).abs() < 1e-12);
        assert!((round_to(-0.000_04, 4)).abs() < 1e-12);
    }

    #[test]
    fn degree_trig() {
        assert!((sin_deg(30.0) - 0.5).abs() < 1e-12);
        assert!((cos_deg(60.0) - 0.5).abs() < 1e-12);
        assert!((tan_deg(45.0) - 1.0).abs() < 1e-12);
        assert!((asin_deg(0.5) - 30.0).abs() < 1e-10);
        assert!((atan_deg(1.0) - 45.0).abs() < 1e-10);
        assert!((atan2_deg(-1.0, -1.0) + 135.0).abs() < 1e-10);
    }
}
