//! Local sidereal time.
//!
//! Two routes: from a Julian Date and east longitude (Meeus 12.4), and
//! backwards from an ecliptic Midheaven (used by progressed charts, where the
//! Midheaven is advanced symbolically and the sidereal time must follow it).
//!
//! Sources:
//! - Meeus, *Astronomical Algorithms*, eq. 12.4. Public domain formula.
//! - Sidereal time from MC: the `atan(tan(mc)/cos ε)` reduction used by the
//!   progressed-chart house tables.

use crate::angle::{atan_deg, cos_deg, normalize_deg, tan_deg};
use crate::julian::{J2000_JD, centuries_since_j2000};

/// Mean obliquity used when a caller does not supply one, degrees.
pub const DEFAULT_OBLIQUITY_DEG: f64 = 23.4367;

/// Greenwich mean sidereal time in degrees, [0, 360).
///
/// θ₀ = 280.46061837 + 360.98564736629·(JD − 2451545) + 0.000387933·T² − T³/38710000
pub fn greenwich_sidereal_time_deg(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    let theta = 280.460_618_37 + 360.985_647_366_29 * (jd - J2000_JD) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_deg(theta)
}

/// Local sidereal time in degrees for an east-positive longitude, [0, 360).
pub fn local_sidereal_time_deg(jd: f64, longitude_deg: f64) -> f64 {
    normalize_deg(greenwich_sidereal_time_deg(jd) + longitude_deg)
}

/// Sidereal time (RAMC) derived from an ecliptic Midheaven longitude.
///
/// `RAMC = atan(tan(mc) / cos(ε))`, plus 180° when the folded Midheaven is
/// above 180°.
///
/// The half-turn test looks at the Midheaven alone, not at the arctangent's
/// branch, so for a Midheaven in (90°, 180°] or (270°, 360°) the result sits
/// on the opposite side of the sky from the Midheaven. Progressed house
/// tables are built on this value.
pub fn sidereal_time_from_midheaven(mc_deg: f64, obliquity_deg: f64) -> f64 {
    let mc = normalize_deg(mc_deg);
    let raw = atan_deg(tan_deg(mc) / cos_deg(obliquity_deg));
    let ramc = if mc > 180.0 { raw + 180.0 } else { raw };
    normalize_deg(ramc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::{atan2_deg, sin_deg};

    #[test]
    fn gmst_j2000_midnight() {
        // 2000-Jan-01 0h UT: GMST ≈ 6h 39m 52s ≈ 99.967°
        let gmst = greenwich_sidereal_time_deg(2_451_544.5);
        assert!((gmst - 99.967_8).abs() < 0.001, "gmst = {gmst}");
    }

    #[test]
    fn meeus_example_12a() {
        // 1987 April 10, 0h UT → 13h10m46.3668s = 197.693195°
        let gmst = greenwich_sidereal_time_deg(2_446_895.5);
        assert!((gmst - 197.693_195).abs() < 1e-4, "gmst = {gmst}");
    }

    #[test]
    fn longitude_shifts_lst() {
        let jd = 2_451_545.0;
        let g = greenwich_sidereal_time_deg(jd);
        let east = local_sidereal_time_deg(jd, 30.0);
        let west = local_sidereal_time_deg(jd, -100.0);
        assert!((east - normalize_deg(g + 30.0)).abs() < 1e-9);
        assert!((west - normalize_deg(g - 100.0)).abs() < 1e-9);
        assert!((0.0..360.0).contains(&west));
    }

    #[test]
    fn ramc_half_turn_follows_folded_midheaven() {
        // (mc, expected) at ε = 23.4367°, one or more per quadrant.
        let table = [
            (45.0, 47.463_617),
            (100.0, 279.189_691),
            (170.0, 349.121_419),
            (200.0, 201.638_118),
            (250.0, 251.533_634),
            (300.0, 117.911_014),
            (350.0, 169.121_419),
            (-60.0, 117.911_014),
        ];
        for (mc, expected) in table {
            let got = sidereal_time_from_midheaven(mc, DEFAULT_OBLIQUITY_DEG);
            assert!(
                (got - expected).abs() < 1e-5,
                "mc = {mc}: got {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn ramc_matches_true_right_ascension_in_first_and_third_quadrants() {
        let eps = DEFAULT_OBLIQUITY_DEG;
        for mc in [0.0, 15.0, 89.0, 181.0, 225.0, 269.0] {
            let truth = normalize_deg(atan2_deg(sin_deg(mc), cos_deg(mc) * cos_deg(eps)));
            let got = sidereal_time_from_midheaven(mc, eps);
            assert!((got - truth).abs() < 1e-9, "mc = {mc}: got {got}, truth {truth}");
        }
    }

    #[test]
    fn ramc_equinox_points_fixed() {
        let eps = DEFAULT_OBLIQUITY_DEG;
        assert!(sidereal_time_from_midheaven(0.0, eps).abs() < 1e-9);
        // 180° is not above 180°, so no half turn: the autumn point maps to 0°.
        let st = sidereal_time_from_midheaven(180.0, eps);
        assert!(st.min(360.0 - st) < 1e-9, "st = {st}");
    }
}
