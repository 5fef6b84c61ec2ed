//! Sharpness (DIN 45692)
//!
//! Sharpness is the loudness-weighted centroid of the specific loudness
//! pattern, with extra weight on critical band rates above 15.8 Bark:
//!
//! ```text
//! S = 0.11 * ∫ N'(z) g(z) z dz / ∫ N'(z) dz   [acum]
//! ```
//!
//! A critical-band-wide noise at 1 kHz and 60 dB is 1 acum.

/// Calibration constant (acum)
const SHARPNESS_SCALE: f64 = 0.11;

/// Critical band rate above which high frequencies get extra weight (Bark)
const WEIGHTING_KNEE: f64 = 15.8;

/// Weighting function g(z) of DIN 45692
pub fn weighting(z: f64) -> f64 {
    if z < WEIGHTING_KNEE {
        1.0
    } else {
        0.15 * (0.42 * (z - WEIGHTING_KNEE)).exp() + 0.85
    }
}

/// Sharpness (acum) of a specific loudness profile sampled on `bark_axis`
///
/// Returns 0 for a silent profile. Both slices must have the same length;
/// extra values in the longer one are ignored.
pub fn sharpness_din(specific_loudness: &[f64], bark_axis: &[f64]) -> f64 {
    let (weighted, total) = specific_loudness
        .iter()
        .zip(bark_axis.iter())
        .fold((0.0, 0.0), |(weighted, total), (&n, &z)| {
            (weighted + n * weighting(z) * z, total + n)
        });

    if total <= f64::EPSILON {
        return 0.0;
    }

    SHARPNESS_SCALE * weighted / total
}
