//! Loudness computation results

use crate::field::FieldType;
use crate::sharpness::sharpness_din;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a stationary loudness computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoudnessResult {
    /// Total loudness in sone, rounded as ISO 532-1 reports it
    pub total_sone: f64,

    /// Loudness level in phon
    pub loudness_level_phon: f64,

    /// Sound field the spectrum was corrected for
    pub field_type: FieldType,

    /// Main specific loudness of the 20 approximated critical bands (sone/Bark)
    pub main_loudness: Vec<f64>,

    /// Specific loudness on the 0.1 Bark grid (sone/Bark)
    pub specific_loudness: Vec<f64>,

    /// Critical band rate of each specific loudness value (Bark)
    pub bark_axis: Vec<f64>,
}

impl LoudnessResult {
    /// `(Bark, sone/Bark)` pairs for plotting or reporting
    pub fn profile_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.bark_axis
            .iter()
            .copied()
            .zip(self.specific_loudness.iter().copied())
    }

    /// Sharpness of the specific loudness profile (acum, DIN 45692)
    pub fn sharpness_acum(&self) -> f64 {
        sharpness_din(&self.specific_loudness, &self.bark_axis)
    }

    /// Critical band rate and value of the loudest grid point
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.profile_points()
            .filter(|&(_, n)| n > 0.0)
            .fold(None, |best, point| match best {
                Some((_, n)) if n >= point.1 => best,
                _ => Some(point),
            })
    }

    /// Whether the spectrum was entirely below the threshold in quiet
    pub fn is_silent(&self) -> bool {
        self.total_sone == 0.0
    }
}

impl fmt::Display for LoudnessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loudness: {:.2} sone ({:.1} phon, {} field)",
            self.total_sone, self.loudness_level_phon, self.field_type
        )
    }
}
