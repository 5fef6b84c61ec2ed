//! Zwicker loudness of stationary sounds (ISO 532-1 method A, DIN 45631)
//!
//! This crate provides:
//! - Total loudness (sone) and loudness level (phon) from a third-octave spectrum
//! - Specific loudness over the critical-band-rate (Bark) scale
//! - Free- and diffuse-field correction
//! - Sharpness (DIN 45692) derived from the specific loudness
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │ Third-octave     │ ──► │ Field correction │ ──► │ Critical band    │
//! │ spectrum (28)    │     │ (free / diffuse) │     │ mapping (20)     │
//! └──────────────────┘     └──────────────────┘     └──────────────────┘
//!                                                            │
//!                                                            ▼
//! ┌──────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │ LoudnessResult   │ ◄── │ Integration      │ ◄── │ Loudness law +   │
//! │ (sone, N'(z))    │     │                  │     │ masking slopes   │
//! └──────────────────┘     └──────────────────┘     └──────────────────┘
//! ```
//!
//! All tables are constants; the Bark grid is built once on first use. The
//! computation holds no state between calls and is safe to run from many
//! threads at once.
//!
//! # Example
//!
//! ```
//! use zwicker_loudness::{compute_stationary_loudness, FieldType};
//!
//! // ISO 532-1 machinery noise
//! let levels = [
//!     -60.0, -60.0, 78.0, 79.0, 89.0, 72.0, 80.0, 89.0, 75.0, 87.0, 85.0, 79.0, 86.0, 80.0,
//!     71.0, 70.0, 72.0, 71.0, 72.0, 74.0, 69.0, 65.0, 67.0, 77.0, 68.0, 58.0, 45.0, 30.0,
//! ];
//! let result = compute_stationary_loudness(&levels, FieldType::Free)?;
//!
//! println!("Loudness: {:.1} sone ({:.1} phon)", result.total_sone, result.loudness_level_phon);
//! for (z, n) in result.profile_points().step_by(10) {
//!     println!("{:5.1} Bark: {:.2} sone/Bark", z, n);
//! }
//! # Ok::<(), zwicker_loudness::LoudnessError>(())
//! ```

#![forbid(unsafe_code)]

pub mod critical_band;
mod error;
pub mod field;
pub mod grid;
pub mod integrator;
pub mod loudness_law;
pub mod masking;
mod pipeline;
mod result;
pub mod sharpness;
mod spectrum;

pub use error::{LoudnessError, Result};
pub use field::{apply_field_correction, CorrectedSpectrum, FieldType};
pub use grid::{bark_axis, BARK_GRID_POINTS, BARK_STEP, NUM_CRITICAL_BANDS};
pub use pipeline::{compute, compute_stationary_loudness, LoudnessInput, StationaryLoudness};
pub use result::LoudnessResult;
pub use spectrum::{
    band_index, ThirdOctaveSpectrum, NEGLIGIBLE_LEVEL_DB, THIRD_OCTAVE_CENTER_FREQUENCIES,
};

/// Number of third-octave bands in an input spectrum (25 Hz - 12.5 kHz)
pub const NUM_THIRD_OCTAVE_BANDS: usize = 28;

/// Loudness level of 1 sone, a 1 kHz tone at 40 dB SPL (phon)
pub const REFERENCE_LOUDNESS_LEVEL_PHON: f64 = 40.0;
