//! Third-octave band spectra
//!
//! The loudness procedure works on 28 third-octave band levels between
//! 25 Hz and 12.5 kHz. A [`ThirdOctaveSpectrum`] can only be built through
//! validating constructors, so every value that reaches the pipeline has the
//! right shape and finite levels.

use crate::error::{LoudnessError, Result};
use crate::NUM_THIRD_OCTAVE_BANDS;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Nominal third-octave centre frequencies (Hz), IEC 61260
pub const THIRD_OCTAVE_CENTER_FREQUENCIES: [f64; NUM_THIRD_OCTAVE_BANDS] = [
    25.0, 31.5, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0, 200.0, 250.0, 315.0, 400.0, 500.0,
    630.0, 800.0, 1000.0, 1250.0, 1600.0, 2000.0, 2500.0, 3150.0, 4000.0, 5000.0, 6300.0, 8000.0,
    10000.0, 12500.0,
];

/// Level used for bands that carry no significant energy (dB SPL)
pub const NEGLIGIBLE_LEVEL_DB: f64 = -60.0;

/// Sound pressure levels (dB re 20 µPa) of the 28 third-octave bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<f64>", try_from = "Vec<f64>")]
pub struct ThirdOctaveSpectrum {
    levels: [f64; NUM_THIRD_OCTAVE_BANDS],
}

impl ThirdOctaveSpectrum {
    /// Build a spectrum from 28 band levels
    ///
    /// # Errors
    /// Returns [`LoudnessError::Domain`] if any level is NaN or infinite.
    pub fn from_levels(levels: [f64; NUM_THIRD_OCTAVE_BANDS]) -> Result<Self> {
        if let Some((band, level)) = levels.iter().enumerate().find(|(_, l)| !l.is_finite()) {
            return Err(LoudnessError::Domain(format!(
                "band {} ({} Hz) has non-finite level {}",
                band, THIRD_OCTAVE_CENTER_FREQUENCIES[band], level
            )));
        }

        Ok(Self { levels })
    }

    /// A spectrum with every band at [`NEGLIGIBLE_LEVEL_DB`]
    pub fn silent() -> Self {
        Self {
            levels: [NEGLIGIBLE_LEVEL_DB; NUM_THIRD_OCTAVE_BANDS],
        }
    }

    /// All band levels in ascending frequency order
    pub fn levels(&self) -> &[f64; NUM_THIRD_OCTAVE_BANDS] {
        &self.levels
    }

    /// Level of a single band, `None` if the index is out of range
    pub fn level(&self, band: usize) -> Option<f64> {
        self.levels.get(band).copied()
    }

    /// Copy of this spectrum with one band replaced
    pub fn with_band_level(&self, band: usize, level_db: f64) -> Result<Self> {
        if band >= NUM_THIRD_OCTAVE_BANDS {
            return Err(LoudnessError::Domain(format!(
                "band index {} out of range (0-{})",
                band,
                NUM_THIRD_OCTAVE_BANDS - 1
            )));
        }

        let mut levels = self.levels;
        levels[band] = level_db;
        Self::from_levels(levels)
    }

    /// Iterate over `(centre frequency, level)` pairs
    pub fn bands(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        THIRD_OCTAVE_CENTER_FREQUENCIES
            .iter()
            .copied()
            .zip(self.levels.iter().copied())
    }

    /// Highest band level in the spectrum
    pub fn max_level(&self) -> f64 {
        self.levels.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Whether every band sits at or below the negligible-energy sentinel
    pub fn is_silent(&self) -> bool {
        self.levels.iter().all(|&l| l <= NEGLIGIBLE_LEVEL_DB)
    }
}

/// Index of the band whose nominal centre frequency matches `frequency_hz`
///
/// Matching is done on a log-frequency scale, accepting anything within a
/// sixth of an octave of the nominal centre.
pub fn band_index(frequency_hz: f64) -> Option<usize> {
    if !(frequency_hz.is_finite() && frequency_hz > 0.0) {
        return None;
    }

    THIRD_OCTAVE_CENTER_FREQUENCIES
        .iter()
        .position(|&fc| (frequency_hz / fc).log2().abs() < 1.0 / 6.0)
}

impl Default for ThirdOctaveSpectrum {
    fn default() -> Self {
        Self::silent()
    }
}

impl TryFrom<&[f64]> for ThirdOctaveSpectrum {
    type Error = LoudnessError;

    fn try_from(levels: &[f64]) -> Result<Self> {
        let levels: [f64; NUM_THIRD_OCTAVE_BANDS] = levels
            .try_into()
            .map_err(|_| LoudnessError::shape(levels.len()))?;
        Self::from_levels(levels)
    }
}

impl TryFrom<Vec<f64>> for ThirdOctaveSpectrum {
    type Error = LoudnessError;

    fn try_from(levels: Vec<f64>) -> Result<Self> {
        Self::try_from(levels.as_slice())
    }
}

impl From<ThirdOctaveSpectrum> for Vec<f64> {
    fn from(spectrum: ThirdOctaveSpectrum) -> Self {
        spectrum.levels.to_vec()
    }
}

impl fmt::Display for ThirdOctaveSpectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (freq, level)) in self.bands().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} Hz: {:.1} dB", freq, level)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_frequencies_ascending() {
        assert!(THIRD_OCTAVE_CENTER_FREQUENCIES
            .windows(2)
            .all(|w| w[0] < w[1]));
        assert_eq!(THIRD_OCTAVE_CENTER_FREQUENCIES[0], 25.0);
        assert_eq!(THIRD_OCTAVE_CENTER_FREQUENCIES[27], 12500.0);
    }

    #[test]
    fn test_wrong_length_is_shape_error() {
        let short = vec![60.0; 27];
        let long = vec![60.0; 29];

        assert_eq!(
            ThirdOctaveSpectrum::try_from(short),
            Err(LoudnessError::Shape {
                expected: 28,
                actual: 27
            })
        );
        assert!(matches!(
            ThirdOctaveSpectrum::try_from(long.as_slice()),
            Err(LoudnessError::Shape { actual: 29, .. })
        ));
        assert!(matches!(
            ThirdOctaveSpectrum::try_from(Vec::new()),
            Err(LoudnessError::Shape { actual: 0, .. })
        ));
    }

    #[test]
    fn test_non_finite_is_domain_error() {
        let mut levels = [40.0; NUM_THIRD_OCTAVE_BANDS];
        levels[5] = f64::NAN;
        assert!(matches!(
            ThirdOctaveSpectrum::from_levels(levels),
            Err(LoudnessError::Domain(_))
        ));

        levels[5] = f64::INFINITY;
        assert!(ThirdOctaveSpectrum::from_levels(levels).is_err());
    }

    #[test]
    fn test_negative_levels_are_valid() {
        let spectrum = ThirdOctaveSpectrum::from_levels([-20.0; NUM_THIRD_OCTAVE_BANDS]).unwrap();
        assert_eq!(spectrum.level(0), Some(-20.0));
        assert!(!spectrum.is_silent());
        assert!(ThirdOctaveSpectrum::silent().is_silent());
    }

    #[test]
    fn test_with_band_level() {
        let spectrum = ThirdOctaveSpectrum::silent().with_band_level(16, 60.0).unwrap();
        assert_eq!(spectrum.level(16), Some(60.0));
        assert_eq!(spectrum.max_level(), 60.0);
        assert!(spectrum.with_band_level(28, 60.0).is_err());
        assert!(spectrum.with_band_level(3, f64::NAN).is_err());
    }

    #[test]
    fn test_band_index() {
        assert_eq!(band_index(1000.0), Some(16));
        assert_eq!(band_index(31.5), Some(1));
        assert_eq!(band_index(1025.0), Some(16));
        assert_eq!(band_index(12500.0), Some(27));
        assert_eq!(band_index(20000.0), None);
        assert_eq!(band_index(0.0), None);
        assert_eq!(band_index(f64::NAN), None);
    }

    #[test]
    fn test_serde_as_plain_array() {
        let spectrum = ThirdOctaveSpectrum::silent().with_band_level(0, 10.0).unwrap();
        let json = serde_json::to_string(&spectrum).unwrap();
        assert!(json.starts_with("[10.0,-60.0"));

        let back: ThirdOctaveSpectrum = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spectrum);

        let bad: std::result::Result<ThirdOctaveSpectrum, _> = serde_json::from_str("[1.0, 2.0]");
        assert!(bad.is_err());
    }
}
