//! Sound field correction
//!
//! Converts measured third-octave levels into levels at the eardrum. The
//! offset of each band combines the transmission characteristic of the ear
//! (A0) with, for diffuse fields, the diffuse/free level difference (DDF).
//! Both are tabulated per approximated critical band in ISO 532-1; here they
//! are projected onto the third-octave bands feeding each critical band:
//!
//! - bands 0-8 (25-160 Hz) feed critical bands 1 and 2
//! - bands 9-10 (200-250 Hz) feed critical band 3
//! - band `b >= 11` feeds critical band `b - 8`

use crate::error::{LoudnessError, Result};
use crate::spectrum::ThirdOctaveSpectrum;
use crate::NUM_THIRD_OCTAVE_BANDS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Listening condition the spectrum was measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Frontal free field (plane wave)
    #[default]
    Free,
    /// Diffuse (reverberant) field
    Diffuse,
}

impl FieldType {
    /// Per-band level offsets (dB) for this field type
    pub fn corrections(&self) -> &'static [f64; NUM_THIRD_OCTAVE_BANDS] {
        match self {
            Self::Free => &FREE_FIELD_CORRECTION,
            Self::Diffuse => &DIFFUSE_FIELD_CORRECTION,
        }
    }

    /// Convert to string for settings persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Diffuse => "diffuse",
        }
    }
}

impl FromStr for FieldType {
    type Err = LoudnessError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "free" | "free-field" | "free_field" | "f" => Ok(Self::Free),
            "diffuse" | "diffuse-field" | "diffuse_field" | "d" => Ok(Self::Diffuse),
            other => Err(LoudnessError::Config(format!(
                "unknown field type '{}' (expected 'free' or 'diffuse')",
                other
            ))),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free field: ear transmission only (-A0)
const FREE_FIELD_CORRECTION: [f64; NUM_THIRD_OCTAVE_BANDS] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 25-160 Hz
    0.0, 0.0, // 200-250 Hz
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 315-1250 Hz
    0.5, 1.6, 3.2, 5.4, 5.6, 4.0, 1.5, -2.0, -5.0, -12.0, // 1600-12500 Hz
];

/// Diffuse field: ear transmission plus diffuse/free level difference (-A0 + DDF)
const DIFFUSE_FIELD_CORRECTION: [f64; NUM_THIRD_OCTAVE_BANDS] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, // 25-160 Hz
    0.5, 0.5, // 200-250 Hz
    0.9, 1.2, 1.6, 2.3, 2.8, 3.0, 2.0, // 315-1250 Hz
    0.5, 0.2, 1.2, 3.5, 4.6, 4.5, 4.5, 2.0, -0.7, -8.0, // 1600-12500 Hz
];

/// A spectrum after sound field correction
///
/// Keeps the measured levels alongside the offsets: the low-frequency
/// equal-loudness ranges are selected on measured levels, while the energy
/// that reaches the critical bands uses the corrected ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectedSpectrum {
    measured: ThirdOctaveSpectrum,
    field_type: FieldType,
}

impl CorrectedSpectrum {
    /// Field type the correction was taken from
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Level as measured, before correction
    pub fn measured(&self, band: usize) -> f64 {
        self.measured.levels()[band]
    }

    /// Offset applied to a band (dB)
    pub fn offset(&self, band: usize) -> f64 {
        self.field_type.corrections()[band]
    }

    /// Level at the eardrum
    pub fn level(&self, band: usize) -> f64 {
        self.measured(band) + self.offset(band)
    }

    /// All corrected levels in ascending frequency order
    pub fn levels(&self) -> [f64; NUM_THIRD_OCTAVE_BANDS] {
        std::array::from_fn(|band| self.level(band))
    }
}

/// Apply the free- or diffuse-field correction to every band
///
/// Each band is corrected independently of its neighbours.
pub fn apply_field_correction(
    spectrum: &ThirdOctaveSpectrum,
    field_type: FieldType,
) -> CorrectedSpectrum {
    CorrectedSpectrum {
        measured: *spectrum,
        field_type,
    }
}
