//! Specific loudness law
//!
//! Turns the excitation level of each approximated critical band into main
//! specific loudness (sone/Bark) with Zwicker's power law:
//!
//! ```text
//! N' = 0.0635 * 10^(0.025 * LTQ) * ((1 - s + s * 10^((LE - LTQ) / 10))^0.25 - 1)
//! ```
//!
//! where `LTQ` is the critical band level at the threshold in quiet,
//! `s = 0.25` and `LE` is the excitation level after adapting the
//! third-octave level to the critical band level (DCB).

use crate::critical_band::CriticalBandLevels;
use crate::error::{LoudnessError, Result};
use crate::grid::NUM_CRITICAL_BANDS;
use tracing::trace;

/// Critical band level at the threshold in quiet (dB), ear transmission excluded
pub const THRESHOLD_IN_QUIET: [f64; NUM_CRITICAL_BANDS] = [
    30.0, 18.0, 12.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0,
    3.0, 3.0,
];

/// Adaptation of third-octave levels to critical band levels (dB)
const DCB: [f64; NUM_CRITICAL_BANDS] = [
    -0.25, -0.6, -0.8, -0.8, -0.5, 0.0, 0.5, 1.1, 1.5, 1.7, 1.8, 1.8, 1.7, 1.6, 1.4, 1.2, 0.8,
    0.5, 0.0, -0.5,
];

/// Scale factor of the loudness law (sone/Bark)
const LOUDNESS_SCALE: f64 = 0.0635;

/// Threshold factor `s` of the loudness law
const THRESHOLD_FACTOR: f64 = 0.25;

/// Exponent of the loudness law
const LOUDNESS_EXPONENT: f64 = 0.25;

/// Main specific loudness (sone/Bark) of each approximated critical band
///
/// Holds one trailing zero for the 23.6-24 Bark band that closes the pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MainLoudness {
    values: [f64; NUM_CRITICAL_BANDS + 1],
}

impl MainLoudness {
    /// Wrap precomputed main loudness values for the 20 critical bands
    ///
    /// # Errors
    /// Returns [`LoudnessError::Domain`] for negative or non-finite values.
    pub fn new(bands: [f64; NUM_CRITICAL_BANDS]) -> Result<Self> {
        if let Some(v) = bands.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(LoudnessError::Domain(format!(
                "main loudness must be finite and non-negative, got {}",
                v
            )));
        }

        let mut values = [0.0; NUM_CRITICAL_BANDS + 1];
        values[..NUM_CRITICAL_BANDS].copy_from_slice(&bands);
        Ok(Self { values })
    }

    /// Values of the 20 critical bands followed by the closing zero band
    pub fn values(&self) -> &[f64; NUM_CRITICAL_BANDS + 1] {
        &self.values
    }

    /// Values of the 20 critical bands
    pub fn bands(&self) -> &[f64] {
        &self.values[..NUM_CRITICAL_BANDS]
    }
}

/// Specific loudness of one band from its excitation level
///
/// Returns 0 at or below the threshold in quiet.
fn band_loudness(band: usize, excitation_db: f64) -> f64 {
    let ltq = THRESHOLD_IN_QUIET[band];
    if excitation_db <= ltq {
        return 0.0;
    }

    let level = excitation_db - DCB[band];
    let scale = LOUDNESS_SCALE * 10.0_f64.powf(0.025 * ltq);
    let growth = (1.0 - THRESHOLD_FACTOR + THRESHOLD_FACTOR * 10.0_f64.powf((level - ltq) / 10.0))
        .powf(LOUDNESS_EXPONENT)
        - 1.0;

    (scale * growth).max(0.0)
}

/// Correction for the level dependence of the threshold inside the lowest band
fn lowest_band_correction(loudness: f64) -> f64 {
    (0.4 + 0.32 * loudness.powf(0.2)).min(1.0)
}

/// Apply the loudness law to every critical band
///
/// # Errors
/// Returns [`LoudnessError::Domain`] if an excitation level is NaN or infinite
/// or so large that the band loudness overflows.
pub fn main_loudness(excitation: &CriticalBandLevels) -> Result<MainLoudness> {
    let mut values = [0.0_f64; NUM_CRITICAL_BANDS + 1];

    for (band, &level) in excitation.levels().iter().enumerate() {
        if !level.is_finite() {
            return Err(LoudnessError::Domain(format!(
                "critical band {} has non-finite excitation {}",
                band + 1,
                level
            )));
        }
        let loudness = band_loudness(band, level);
        if !loudness.is_finite() {
            return Err(LoudnessError::Domain(format!(
                "critical band {} excitation {:.1} dB overflows the loudness law",
                band + 1,
                level
            )));
        }
        values[band] = loudness;
    }

    values[0] *= lowest_band_correction(values[0]);

    trace!("Main loudness: {:?}", values);

    Ok(MainLoudness { values })
}
