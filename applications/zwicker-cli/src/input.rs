//! Spectrum sources for the command line
//!
//! A spectrum comes either inline (`--levels 60,62.5,...`) or from a JSON or
//! TOML file. Files hold a bare array of 28 levels or a document with a
//! `levels` array and an optional `field_type`:
//!
//! ```toml
//! field_type = "diffuse"
//! levels = [-60, -60, 78, 79, 89, 72, 80, 89, 75, 87, 85, 79, 86, 80,
//!           71, 70, 72, 71, 72, 74, 69, 65, 67, 77, 68, 58, 45, 30]
//! ```

use crate::error::{CliError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use zwicker_loudness::{FieldType, ThirdOctaveSpectrum};

/// Where the spectrum comes from
#[derive(Debug, Clone, PartialEq)]
pub enum SpectrumSource {
    Inline(String),
    File(PathBuf),
}

/// A spectrum ready for computation
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumInput {
    pub spectrum: ThirdOctaveSpectrum,
    /// Field type stated by the input file, if any
    pub field_type: Option<FieldType>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SpectrumFile {
    Levels(Vec<f64>),
    Document {
        levels: Vec<f64>,
        #[serde(default)]
        field_type: Option<FieldType>,
    },
}

impl SpectrumSource {
    /// Read and validate the spectrum
    pub fn load(&self) -> Result<SpectrumInput> {
        match self {
            SpectrumSource::Inline(text) => Ok(SpectrumInput {
                spectrum: ThirdOctaveSpectrum::try_from(parse_levels(text)?)?,
                field_type: None,
            }),
            SpectrumSource::File(path) => load_spectrum_file(path),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SpectrumSource::Inline(_) => "command line".to_string(),
            SpectrumSource::File(path) => path.display().to_string(),
        }
    }
}

/// Parse a comma or whitespace separated list of band levels (dB)
///
/// Surrounding brackets are accepted so a JSON array can be pasted as is.
pub fn parse_levels(text: &str) -> Result<Vec<f64>> {
    let trimmed = text.trim().trim_start_matches('[').trim_end_matches(']');

    trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| CliError::Input(format!("'{}' is not a band level", token)))
        })
        .collect()
}

/// Load a spectrum from a `.json` or `.toml` file
pub fn load_spectrum_file(path: &Path) -> Result<SpectrumInput> {
    let contents = fs::read_to_string(path)?;

    let file: SpectrumFile = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&contents)?,
        Some("toml") => toml::from_str(&contents)?,
        _ => {
            return Err(CliError::Input(format!(
                "{}: expected a .json or .toml spectrum file",
                path.display()
            )))
        }
    };

    let (levels, field_type) = match file {
        SpectrumFile::Levels(levels) => (levels, None),
        SpectrumFile::Document { levels, field_type } => (levels, field_type),
    };

    Ok(SpectrumInput {
        spectrum: ThirdOctaveSpectrum::try_from(levels)?,
        field_type,
    })
}
