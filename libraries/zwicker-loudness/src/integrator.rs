//! Total loudness from the specific loudness pattern

use crate::masking::LoudnessPattern;
use crate::REFERENCE_LOUDNESS_LEVEL_PHON;

/// Loudness above which the total is reported with two decimals instead of three (sone)
const FINE_ROUNDING_LIMIT: f64 = 16.0;

/// Integrate the specific loudness pattern over critical band rate (sone)
///
/// The pattern is piecewise linear, so summing trapezoids over its
/// breakpoints is exact.
pub fn integrate(pattern: &LoudnessPattern) -> f64 {
    pattern
        .segments()
        .iter()
        .map(|s| s.area())
        .sum::<f64>()
        .max(0.0)
}

/// Round total loudness the way ISO 532-1 reports it
///
/// Three decimals up to 16 sone, two decimals above.
pub fn round_total_loudness(sone: f64) -> f64 {
    let sone = sone.max(0.0);
    let scale = if sone <= FINE_ROUNDING_LIMIT { 1000.0 } else { 100.0 };
    (sone * scale + 0.5).floor() / scale
}

/// Loudness level (phon) of a total loudness (sone)
///
/// 1 sone is 40 phon and every doubling of loudness adds 10 phon; below
/// 1 sone the standard's power-law extension applies.
pub fn loudness_level_phon(sone: f64) -> f64 {
    let sone = sone.max(0.0);
    if sone < 1.0 {
        REFERENCE_LOUDNESS_LEVEL_PHON * (sone + 0.0005).powf(0.35)
    } else {
        REFERENCE_LOUDNESS_LEVEL_PHON + 33.22 * sone.log10()
    }
}

/// Inverse of [`loudness_level_phon`] above 40 phon (sone)
pub fn loudness_from_phon(phon: f64) -> f64 {
    if phon >= REFERENCE_LOUDNESS_LEVEL_PHON {
        10.0_f64.powf((phon - REFERENCE_LOUDNESS_LEVEL_PHON) / 33.22)
    } else {
        ((phon.max(0.0) / REFERENCE_LOUDNESS_LEVEL_PHON).powf(1.0 / 0.35) - 0.0005).max(0.0)
    }
}
