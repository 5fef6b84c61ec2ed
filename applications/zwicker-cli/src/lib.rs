//! Zwicker CLI Library
//!
//! Command-line front end for `zwicker-loudness`: configuration, spectrum
//! input files and report rendering.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod error;
pub mod input;
pub mod report;

// Re-export commonly used types for convenience
pub use config::{CliConfig, OutputFormat, OutputSettings};
pub use error::{CliError, Result};
pub use input::{SpectrumInput, SpectrumSource};

use zwicker_loudness::{FieldType, LoudnessResult, StationaryLoudness};

/// Load a spectrum and compute its loudness
///
/// The field type is taken from `field_override`, then from the input file,
/// then from the configured default.
pub fn compute_from_source(
    source: &SpectrumSource,
    field_override: Option<FieldType>,
    config: &CliConfig,
) -> Result<LoudnessResult> {
    let input = source.load()?;
    let field_type = field_override
        .or(input.field_type)
        .unwrap_or(config.default_field_type);

    tracing::info!(
        "Computing {} field loudness for spectrum from {}",
        field_type,
        source.describe()
    );

    let result = StationaryLoudness::new(field_type).compute(&input.spectrum)?;

    tracing::info!(
        "{:.3} sone, {:.1} phon",
        result.total_sone,
        result.loudness_level_phon
    );

    Ok(result)
}
