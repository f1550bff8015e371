//! House cusp computation and correction.
//!
//! Two cusp formulas are provided:
//! - [`koch_cusps`]: the primary quadrant formula, used for [`HouseSystem::Koch`].
//!   Works from MC, Ascendant, latitude and obliquity.
//! - [`legacy_cusps`]: the hour-angle table formula, driven by a sidereal time.
//!   Progressed charts use it to build cusps from a progressed Midheaven.
//!
//! Both produce Koch cusps for consistent inputs. Quadrant formulas based on
//! an arctangent only determine a cusp mod 180°, so raw cusps go through
//! [`disambiguate_cusps`], which pins the angles and flips any intermediate
//! cusp that is not forward of its quadrant's angle.
//!
//! Sources: standard spherical astronomy (Meeus ch. 13, Montenbruck & Pfleger)
//! and the Koch birthplace system as tabulated in classic house tables.

use horo_time::{arc_forward, asin_deg, atan2_deg, atan_deg, cos_deg, normalize_deg, sin_deg, tan_deg};

use crate::ephemeris::EphemerisSnapshot;
use crate::error::ChartError;
use crate::house_types::{CuspSet, HouseSystem};

/// Index pairs `(reference, candidate)` checked during disambiguation.
///
/// Cusps 2/3 follow cusp 1, 5/6 follow cusp 4 (IC), 8/9 follow cusp 7,
/// 11/12 follow cusp 10 (MC).
const QUADRANT_FOLLOWERS: [(usize, usize); 8] = [
    (0, 1),
    (0, 2),
    (3, 4),
    (3, 5),
    (6, 7),
    (6, 8),
    (9, 10),
    (9, 11),
];

/// Whether `candidate` lies forward of `reference` by less than a half circle.
///
/// Both inputs in [0, 360). Equal values count as ordered. When the candidate
/// is numerically smaller, it is only ordered if the pair straddles the
/// 360→0 wrap (gap larger than 180°).
pub fn is_sequential(reference: f64, candidate: f64) -> bool {
    if candidate == reference {
        true
    } else if candidate < reference {
        reference - candidate > 180.0
    } else {
        candidate - reference < 180.0
    }
}

/// Correct a raw quadrant cusp set whose values may be off by 180°.
///
/// Pins cusp 10 to `mc`, cusp 4 to `mc + 180` and cusp 7 to `cusp 1 + 180`,
/// then adds 180° to each intermediate cusp that is not sequential after its
/// quadrant's angle.
///
/// Fails with [`ChartError::InvalidInput`] if `raw` has fewer than 12 values.
pub fn disambiguate_cusps(raw: &[f64], mc: f64) -> Result<CuspSet, ChartError> {
    let mut cusps = CuspSet::from_slice(raw)?.0;

    cusps[9] = normalize_deg(mc);
    cusps[3] = normalize_deg(mc + 180.0);
    cusps[6] = normalize_deg(cusps[0] + 180.0);

    for (reference, idx) in QUADRANT_FOLLOWERS {
        if !is_sequential(cusps[reference], cusps[idx]) {
            cusps[idx] = normalize_deg(cusps[idx] + 180.0);
        }
    }
    Ok(CuspSet(cusps))
}

/// Rotate a cusp array by six houses (house n takes house n+6's cusp).
pub fn rotate_half(cusps: [f64; 12]) -> [f64; 12] {
    let mut out = [0.0; 12];
    for (i, cusp) in out.iter_mut().enumerate() {
        *cusp = cusps[(i + 6) % 12];
    }
    out
}

/// Raw Koch cusps before rotation and disambiguation.
///
/// Cusps 1, 2, 3, 11, 12 are only known mod 180°. Cusps 4 and 10 are the
/// IC and MC; 5, 6, 7, 8, 9 mirror 11, 12, 1, 2, 3.
pub fn koch_raw_cusps(mc: f64, lat: f64, eps: f64) -> [f64; 12] {
    let ramc = normalize_deg(atan2_deg(sin_deg(mc) * cos_deg(eps), cos_deg(mc)));
    let dec_mc = asin_deg(sin_deg(eps) * sin_deg(mc));
    let ascensional_diff = asin_deg(tan_deg(lat) * tan_deg(dec_mc));
    let oblique_asc_mc = ramc - ascensional_diff;
    let interval = (ramc + 90.0 - oblique_asc_mc) / 3.0;

    // Oblique ascensions of cusps 11, 12, 1, 2, 3.
    let h11 = oblique_asc_mc + interval;
    let h12 = h11 + interval;
    let h1 = h12 + interval;
    let h2 = h1 + interval;
    let h3 = h2 + interval;

    let mut cusps = [0.0; 12];
    cusps[10] = koch_projection(h11, lat, eps);
    cusps[11] = koch_projection(h12, lat, eps);
    cusps[0] = koch_projection(h1, lat, eps);
    cusps[1] = koch_projection(h2, lat, eps);
    cusps[2] = koch_projection(h3, lat, eps);
    cusps[9] = normalize_deg(mc);
    cusps[3] = normalize_deg(mc + 180.0);

    cusps[4] = normalize_deg(cusps[10] + 180.0);
    cusps[5] = normalize_deg(cusps[11] + 180.0);
    cusps[6] = normalize_deg(cusps[0] + 180.0);
    cusps[7] = normalize_deg(cusps[1] + 180.0);
    cusps[8] = normalize_deg(cusps[2] + 180.0);
    cusps
}

/// Ecliptic longitude rising at oblique ascension `h`, folded into [0, 180).
fn koch_projection(h: f64, lat: f64, eps: f64) -> f64 {
    let denom = -(sin_deg(h - 90.0) * cos_deg(eps) + tan_deg(lat) * sin_deg(eps));
    let lon = atan_deg(cos_deg(h - 90.0) / denom);
    ((lon % 180.0) + 180.0) % 180.0
}

/// Koch cusps: raw formula, half rotation when the Ascendant is in the
/// western half (≥ 180°), then disambiguation against `mc`.
///
/// Fails with [`ChartError::InvalidInput`] above the polar circles, where
/// the ascensional difference is undefined.
pub fn koch_cusps(mc: f64, asc: f64, lat: f64, eps: f64) -> Result<CuspSet, ChartError> {
    let mut raw = koch_raw_cusps(mc, lat, eps);
    if normalize_deg(asc) >= 180.0 {
        raw = rotate_half(raw);
    }
    check_finite(&raw, lat)?;
    disambiguate_cusps(&raw, mc)
}

/// Cusps from sidereal time via the hour-angle table.
///
/// For house n: `Bn = (60 + 30n) mod 360`, `Gn = ((Bn mod 180) − 90)/90`,
/// `Kn = +1` for `Bn < 180` else `−1`, `Z = asin(sin ST · tan φ · tan ε)`,
/// `Hn = ST + Bn + Gn·Z`, and
/// `λn = atan2(sin Hn, cos Hn · cos ε − Kn · tan φ · sin ε)`.
pub fn legacy_cusps(st: f64, lat: f64, eps: f64) -> Result<CuspSet, ChartError> {
    let z = asin_deg(sin_deg(st) * tan_deg(lat) * tan_deg(eps));
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        let n = (i + 1) as f64;
        let b = (60.0 + 30.0 * n) % 360.0;
        let (g, k) = if b < 180.0 {
            ((b - 90.0) / 90.0, 1.0)
        } else {
            ((b - 270.0) / 90.0, -1.0)
        };
        let h = st + b + g * z;
        *cusp = normalize_deg(atan2_deg(
            sin_deg(h),
            cos_deg(h) * cos_deg(eps) - k * tan_deg(lat) * sin_deg(eps),
        ));
    }
    check_finite(&cusps, lat)?;
    Ok(CuspSet(cusps))
}

fn check_finite(cusps: &[f64; 12], lat: f64) -> Result<(), ChartError> {
    if cusps.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidInput(format!(
            "quadrant cusps undefined at latitude {lat}"
        )))
    }
}

/// Final cusp set for a house system from raw provider output.
///
/// Koch uses [`koch_cusps`]; other quadrant systems disambiguate the
/// provider's raw cusps; Equal and Whole Sign are used as given.
pub fn resolve_cusps(
    system: HouseSystem,
    snapshot: &EphemerisSnapshot,
    lat: f64,
    eps: f64,
) -> Result<CuspSet, ChartError> {
    match system {
        HouseSystem::Koch => koch_cusps(snapshot.midheaven, snapshot.ascendant, lat, eps),
        s if s.is_quadrant() => disambiguate_cusps(&snapshot.raw_cusps, snapshot.midheaven),
        _ => CuspSet::from_slice(&snapshot.raw_cusps),
    }
}

/// House number (1..=12) containing an ecliptic longitude.
pub fn house_of(lon: f64, cusps: &CuspSet) -> u8 {
    let c = cusps.as_array();
    let lon = normalize_deg(lon);
    for i in 0..12 {
        let next = (i + 1) % 12;
        let span = arc_forward(c[i], c[next]);
        if arc_forward(c[i], lon) < span {
            return (i + 1) as u8;
        }
    }
    1
}
