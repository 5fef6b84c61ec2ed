//! Stationary loudness pipeline
//!
//! ```text
//! ThirdOctaveSpectrum ─► field correction ─► critical band mapping
//!        ─► loudness law ─► spread of masking ─► integration ─► LoudnessResult
//! ```
//!
//! Every stage is a pure function of its input and the constant tables, so
//! one [`StationaryLoudness`] can be shared freely between threads.

use crate::critical_band::map_to_critical_bands;
use crate::error::{LoudnessError, Result};
use crate::field::{apply_field_correction, FieldType};
use crate::grid::bark_axis;
use crate::integrator::{integrate, loudness_level_phon, round_total_loudness};
use crate::loudness_law::main_loudness;
use crate::masking::spread_masking;
use crate::result::LoudnessResult;
use crate::spectrum::ThirdOctaveSpectrum;
use tracing::{debug, warn};

/// Highest band level covered by the equal-loudness correction (dB)
const MAX_CORRECTED_LEVEL_DB: f64 = 120.0;

/// What to compute loudness for
#[derive(Debug, Clone, PartialEq)]
pub enum LoudnessInput {
    /// A single spectrum of a steady sound
    Stationary {
        spectrum: ThirdOctaveSpectrum,
        field_type: FieldType,
    },
    /// A sequence of short-term spectra of a time-varying sound
    TimeVarying {
        frames: Vec<ThirdOctaveSpectrum>,
        frame_rate_hz: f64,
        field_type: FieldType,
    },
}

/// Zwicker loudness calculator for stationary sounds (ISO 532-1 method A)
///
/// # Example
///
/// ```
/// use zwicker_loudness::{FieldType, StationaryLoudness, ThirdOctaveSpectrum};
///
/// let spectrum = ThirdOctaveSpectrum::silent().with_band_level(16, 60.0)?;
/// let result = StationaryLoudness::new(FieldType::Free).compute(&spectrum)?;
///
/// println!("{:.2} sone", result.total_sone);
/// # Ok::<(), zwicker_loudness::LoudnessError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StationaryLoudness {
    field_type: FieldType,
}

impl StationaryLoudness {
    pub fn new(field_type: FieldType) -> Self {
        Self { field_type }
    }

    /// Calculator for frontal free-field measurements
    pub fn free_field() -> Self {
        Self::new(FieldType::Free)
    }

    /// Calculator for diffuse-field measurements
    pub fn diffuse_field() -> Self {
        Self::new(FieldType::Diffuse)
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Run the full pipeline on one spectrum
    ///
    /// # Errors
    /// Returns [`LoudnessError::Domain`] if an intermediate value leaves the
    /// valid numeric range.
    pub fn compute(&self, spectrum: &ThirdOctaveSpectrum) -> Result<LoudnessResult> {
        let max_level = spectrum.max_level();
        if max_level > MAX_CORRECTED_LEVEL_DB {
            warn!(
                "Band level {:.1} dB exceeds the {} dB range of the equal-loudness correction",
                max_level, MAX_CORRECTED_LEVEL_DB
            );
        }

        let corrected = apply_field_correction(spectrum, self.field_type);
        let excitation = map_to_critical_bands(&corrected)?;
        let main = main_loudness(&excitation)?;
        let pattern = spread_masking(&main);
        let total_sone = round_total_loudness(integrate(&pattern));

        debug!(
            "Stationary loudness ({} field): {:.3} sone from {} pattern segments",
            self.field_type,
            total_sone,
            pattern.segments().len()
        );

        Ok(LoudnessResult {
            total_sone,
            loudness_level_phon: loudness_level_phon(total_sone),
            field_type: self.field_type,
            main_loudness: main.bands().to_vec(),
            specific_loudness: pattern.sample().to_vec(),
            bark_axis: bark_axis().to_vec(),
        })
    }
}

/// Compute loudness for a tagged input
///
/// # Errors
/// Time-varying input is recognised but not supported and returns
/// [`LoudnessError::Unsupported`].
pub fn compute(input: &LoudnessInput) -> Result<LoudnessResult> {
    match input {
        LoudnessInput::Stationary {
            spectrum,
            field_type,
        } => StationaryLoudness::new(*field_type).compute(spectrum),
        LoudnessInput::TimeVarying { frames, .. } => Err(LoudnessError::Unsupported(format!(
            "time-varying loudness ({} frames); only stationary spectra are supported",
            frames.len()
        ))),
    }
}

/// Compute stationary loudness from 28 raw third-octave levels (dB SPL)
///
/// # Errors
/// Returns [`LoudnessError::Shape`] unless exactly 28 levels are given and
/// [`LoudnessError::Domain`] for non-finite levels.
pub fn compute_stationary_loudness(levels: &[f64], field_type: FieldType) -> Result<LoudnessResult> {
    let spectrum = ThirdOctaveSpectrum::try_from(levels)?;
    StationaryLoudness::new(field_type).compute(&spectrum)
}
