//! Third-octave to critical-band mapping
//!
//! Below 315 Hz a third-octave band is narrower than a critical band, so the
//! eleven lowest bands are first weighted by the equal-loudness contours
//! (which depend on level, hence the RAP/DLL range tables) and then
//! power-summed into the three lowest approximated critical bands. From
//! 315 Hz upward every third-octave band feeds exactly one critical band.

use crate::error::{LoudnessError, Result};
use crate::field::CorrectedSpectrum;
use crate::grid::NUM_CRITICAL_BANDS;
use tracing::trace;

/// Number of third-octave bands receiving the equal-loudness correction
const NUM_LOW_BANDS: usize = 11;

/// Number of level ranges in the equal-loudness correction
const NUM_LEVEL_RANGES: usize = 8;

/// Upper bounds (dB) of the level ranges for the low-frequency correction
const RAP: [f64; NUM_LEVEL_RANGES] = [45.0, 55.0, 65.0, 71.0, 80.0, 90.0, 100.0, 120.0];

/// Reduction (dB) of the bands up to 250 Hz within each level range
const DLL: [[f64; NUM_LOW_BANDS]; NUM_LEVEL_RANGES] = [
    [-32.0, -24.0, -16.0, -10.0, -5.0, 0.0, -7.0, -3.0, 0.0, -2.0, 0.0],
    [-29.0, -22.0, -15.0, -10.0, -4.0, 0.0, -7.0, -2.0, 0.0, -2.0, 0.0],
    [-27.0, -19.0, -14.0, -9.0, -4.0, 0.0, -6.0, -2.0, 0.0, -2.0, 0.0],
    [-25.0, -17.0, -12.0, -9.0, -3.0, 0.0, -5.0, -2.0, 0.0, -2.0, 0.0],
    [-23.0, -16.0, -11.0, -7.0, -3.0, 0.0, -4.0, -1.0, 0.0, -1.0, 0.0],
    [-20.0, -14.0, -10.0, -6.0, -3.0, 0.0, -4.0, -1.0, 0.0, -1.0, 0.0],
    [-18.0, -12.0, -9.0, -6.0, -2.0, 0.0, -3.0, -1.0, 0.0, -1.0, 0.0],
    [-15.0, -10.0, -8.0, -4.0, -2.0, 0.0, -3.0, -1.0, 0.0, -1.0, 0.0],
];

/// Third-octave band ranges summed into the three lowest critical bands
const LOW_BAND_GROUPS: [std::ops::Range<usize>; 3] = [0..6, 6..9, 9..11];

/// First third-octave band that maps 1:1 onto a critical band (315 Hz)
const FIRST_DIRECT_BAND: usize = NUM_LOW_BANDS;

/// Main excitation level (dB) of each approximated critical band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalBandLevels {
    levels: [f64; NUM_CRITICAL_BANDS],
}

impl CriticalBandLevels {
    /// Wrap precomputed excitation levels
    pub fn new(levels: [f64; NUM_CRITICAL_BANDS]) -> Self {
        Self { levels }
    }

    pub fn levels(&self) -> &[f64; NUM_CRITICAL_BANDS] {
        &self.levels
    }

    pub fn level(&self, band: usize) -> Option<f64> {
        self.levels.get(band).copied()
    }
}

/// Convert a level in dB to relative intensity
pub fn level_to_intensity(level_db: f64) -> f64 {
    10.0_f64.powf(level_db / 10.0)
}

/// Convert a relative intensity back to dB
///
/// Zero intensity is clamped to the smallest positive normal value so the
/// logarithm stays finite.
///
/// # Errors
/// Returns [`LoudnessError::Domain`] for negative or NaN intensities.
pub fn intensity_to_level(intensity: f64) -> Result<f64> {
    if intensity.is_nan() || intensity < 0.0 {
        return Err(LoudnessError::Domain(format!(
            "cannot take the level of intensity {}",
            intensity
        )));
    }

    Ok(10.0 * intensity.max(f64::MIN_POSITIVE).log10())
}

/// Index of the level range a low band falls into
///
/// The range is selected on the measured (uncorrected) level.
fn level_range(band: usize, measured_db: f64) -> usize {
    (0..NUM_LEVEL_RANGES - 1)
        .find(|&j| measured_db <= RAP[j] - DLL[j][band])
        .unwrap_or(NUM_LEVEL_RANGES - 1)
}

/// Map corrected third-octave levels onto the 20 approximated critical bands
pub fn map_to_critical_bands(spectrum: &CorrectedSpectrum) -> Result<CriticalBandLevels> {
    let mut intensities = [0.0_f64; NUM_LOW_BANDS];
    for (band, intensity) in intensities.iter_mut().enumerate() {
        let range = level_range(band, spectrum.measured(band));
        *intensity = level_to_intensity(spectrum.level(band) + DLL[range][band]);
    }

    let mut levels = [0.0_f64; NUM_CRITICAL_BANDS];
    for (group, bands) in LOW_BAND_GROUPS.iter().enumerate() {
        let energy: f64 = intensities[bands.clone()].iter().sum();
        levels[group] = intensity_to_level(energy)?;
    }

    for (cb, level) in levels
        .iter_mut()
        .enumerate()
        .skip(LOW_BAND_GROUPS.len())
    {
        *level = spectrum.level(cb + FIRST_DIRECT_BAND - LOW_BAND_GROUPS.len());
    }

    trace!("Critical band excitation: {:?}", levels);

    Ok(CriticalBandLevels { levels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{apply_field_correction, FieldType};
    use crate::spectrum::ThirdOctaveSpectrum;
    use crate::NUM_THIRD_OCTAVE_BANDS;

    fn map(levels: [f64; NUM_THIRD_OCTAVE_BANDS], field: FieldType) -> CriticalBandLevels {
        let spectrum = ThirdOctaveSpectrum::from_levels(levels).unwrap();
        map_to_critical_bands(&apply_field_correction(&spectrum, field)).unwrap()
    }

    #[test]
    fn test_intensity_level_conversion() {
        assert!((intensity_to_level(level_to_intensity(63.0)).unwrap() - 63.0).abs() < 1e-9);
        assert!(intensity_to_level(0.0).unwrap().is_finite());
        assert!(matches!(
            intensity_to_level(-1.0),
            Err(LoudnessError::Domain(_))
        ));
        assert!(intensity_to_level(f64::NAN).is_err());
    }

    #[test]
    fn test_level_range_selection() {
        // 25 Hz band: 45 - (-32) = 77 dB upper bound of the first range
        assert_eq!(level_range(0, 40.0), 0);
        assert_eq!(level_range(0, 77.0), 0);
        assert_eq!(level_range(0, 77.1), 1);
        assert_eq!(level_range(0, 200.0), NUM_LEVEL_RANGES - 1);
    }

    #[test]
    fn test_direct_bands_pass_through() {
        let mut levels = [-60.0; NUM_THIRD_OCTAVE_BANDS];
        levels[16] = 60.0; // 1 kHz
        let cb = map(levels, FieldType::Free);

        assert_eq!(cb.level(8), Some(60.0));
        assert_eq!(cb.level(7), Some(-60.0));
    }

    #[test]
    fn test_low_bands_are_power_summed() {
        // Two equal bands at 200 and 250 Hz (no DLL reduction at 250 Hz,
        // -2 dB at 200 Hz in the lowest range)
        let mut levels = [-60.0; NUM_THIRD_OCTAVE_BANDS];
        levels[9] = 40.0;
        levels[10] = 40.0;
        let cb = map(levels, FieldType::Free);

        let expected = 10.0 * (10.0_f64.powf(3.8) + 10.0_f64.powf(4.0)).log10();
        assert!((cb.levels()[2] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_equal_loudness_reduction_at_low_frequencies() {
        let mut levels = [-60.0; NUM_THIRD_OCTAVE_BANDS];
        levels[0] = 60.0; // 25 Hz, range 0 -> -32 dB
        let cb = map(levels, FieldType::Free);

        assert!((cb.levels()[0] - 28.0).abs() < 1e-6);
    }

    #[test]
    fn test_diffuse_field_raises_third_critical_band() {
        let mut levels = [-60.0; NUM_THIRD_OCTAVE_BANDS];
        levels[10] = 50.0;
        let free = map(levels, FieldType::Free);
        let diffuse = map(levels, FieldType::Diffuse);

        assert!((diffuse.levels()[2] - free.levels()[2] - 0.5).abs() < 1e-6);
    }
}
