//! Rendering loudness results for the terminal

use crate::config::{OutputFormat, OutputSettings};
use crate::error::Result;
use serde::Serialize;
use std::fmt::{self, Write};
use zwicker_loudness::{LoudnessResult, THIRD_OCTAVE_CENTER_FREQUENCIES};

/// JSON report: the full result plus derived quantities
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a LoudnessResult,
    sharpness_acum: f64,
}

/// Render a result in the configured format
pub fn render(result: &LoudnessResult, output: &OutputSettings) -> Result<String> {
    match output.format {
        OutputFormat::Text => render_text(result, output),
        OutputFormat::Json => render_json(result),
    }
}

pub fn render_json(result: &LoudnessResult) -> Result<String> {
    let report = JsonReport {
        result,
        sharpness_acum: result.sharpness_acum(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn render_text(result: &LoudnessResult, output: &OutputSettings) -> Result<String> {
    let mut text = String::new();
    write_text(&mut text, result, output)?;
    Ok(text)
}

fn write_text(
    out: &mut impl Write,
    result: &LoudnessResult,
    output: &OutputSettings,
) -> fmt::Result {
    let precision = output.precision;

    writeln!(out, "Total loudness:  {:.*} sone", precision, result.total_sone)?;
    writeln!(out, "Loudness level:  {:.1} phon", result.loudness_level_phon)?;
    writeln!(out, "Sharpness:       {:.2} acum", result.sharpness_acum())?;
    writeln!(out, "Sound field:     {}", result.field_type)?;

    if let Some((z, n)) = result.peak() {
        writeln!(
            out,
            "Peak:            {:.*} sone/Bark at {:.1} Bark",
            precision, n, z
        )?;
    }

    if output.show_profile {
        writeln!(out, "\n  Bark  sone/Bark")?;
        for (z, n) in result.profile_points() {
            writeln!(out, "{:6.1}  {:.*}", z, precision, n)?;
        }
    }

    Ok(())
}

/// Table of the input bands and their centre frequencies
pub fn render_bands() -> Result<String> {
    let mut text = String::from("Band  Centre (Hz)\n");
    for (i, fc) in THIRD_OCTAVE_CENTER_FREQUENCIES.iter().enumerate() {
        writeln!(text, "{:4}  {:>11}", i, fc)?;
    }
    Ok(text)
}
