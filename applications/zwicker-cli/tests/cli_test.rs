//! Integration tests for the zwicker CLI library
//!
//! Covers spectrum files, field type precedence and report output.

use std::io::Write;
use tempfile::NamedTempFile;
use zwicker_cli::{
    compute_from_source, report, CliConfig, CliError, OutputFormat, OutputSettings,
    SpectrumSource,
};
use zwicker_loudness::FieldType;

// ========== Helper Functions ==========

const MACHINERY_NOISE: &str = "-60, -60, 78, 79, 89, 72, 80, 89, 75, 87, 85, 79, 86, 80, \
                               71, 70, 72, 71, 72, 74, 69, 65, 67, 77, 68, 58, 45, 30";

fn spectrum_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn machinery_toml(field_type: Option<&str>) -> NamedTempFile {
    let field_line = field_type
        .map(|f| format!("field_type = \"{}\"\n", f))
        .unwrap_or_default();
    spectrum_file(
        ".toml",
        &format!("{}levels = [{}]\n", field_line, MACHINERY_NOISE),
    )
}

// ========== Spectrum Sources ==========

#[test]
fn test_inline_machinery_noise() {
    let source = SpectrumSource::Inline(MACHINERY_NOISE.to_string());
    let result = compute_from_source(&source, None, &CliConfig::default()).unwrap();

    assert_eq!(result.total_sone, 83.3);
    assert_eq!(result.field_type, FieldType::Free);
}

#[test]
fn test_json_file_matches_inline() {
    let file = spectrum_file(".json", &format!("[{}]", MACHINERY_NOISE));
    let from_file = compute_from_source(
        &SpectrumSource::File(file.path().to_path_buf()),
        None,
        &CliConfig::default(),
    )
    .unwrap();
    let inline = compute_from_source(
        &SpectrumSource::Inline(MACHINERY_NOISE.to_string()),
        None,
        &CliConfig::default(),
    )
    .unwrap();

    assert_eq!(from_file, inline);
}

#[test]
fn test_invalid_inline_levels() {
    let source = SpectrumSource::Inline("60, 60".to_string());
    assert!(matches!(
        compute_from_source(&source, None, &CliConfig::default()),
        Err(CliError::Loudness(_))
    ));
}

// ========== Field Type Precedence ==========

#[test]
fn test_field_type_from_file() {
    let file = machinery_toml(Some("diffuse"));
    let source = SpectrumSource::File(file.path().to_path_buf());

    let result = compute_from_source(&source, None, &CliConfig::default()).unwrap();
    assert_eq!(result.field_type, FieldType::Diffuse);
}

#[test]
fn test_override_beats_file() {
    let file = machinery_toml(Some("diffuse"));
    let source = SpectrumSource::File(file.path().to_path_buf());

    let result = compute_from_source(&source, Some(FieldType::Free), &CliConfig::default()).unwrap();
    assert_eq!(result.field_type, FieldType::Free);
}

#[test]
fn test_config_default_used_last() {
    let file = machinery_toml(None);
    let source = SpectrumSource::File(file.path().to_path_buf());
    let config = CliConfig {
        default_field_type: FieldType::Diffuse,
        ..CliConfig::default()
    };

    let result = compute_from_source(&source, None, &config).unwrap();
    assert_eq!(result.field_type, FieldType::Diffuse);
    assert!((result.total_sone - 85.57).abs() < 0.05);
}

// ========== Reports ==========

#[test]
fn test_text_and_json_reports_agree() {
    let source = SpectrumSource::Inline(MACHINERY_NOISE.to_string());
    let result = compute_from_source(&source, None, &CliConfig::default()).unwrap();

    let text = report::render(&result, &OutputSettings::default()).unwrap();
    assert!(text.contains("83.30 sone"), "{}", text);

    let json_settings = OutputSettings {
        format: OutputFormat::Json,
        ..OutputSettings::default()
    };
    let json = report::render(&result, &json_settings).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total_sone"], 83.3);
}

#[test]
fn test_config_file_drives_report() {
    let config_file = spectrum_file(
        ".toml",
        "[output]\nformat = \"json\"\nshow_profile = true\n",
    );
    let config = CliConfig::load(Some(config_file.path())).unwrap();
    config.validate().unwrap();

    assert_eq!(config.output.format, OutputFormat::Json);
    assert!(config.output.show_profile);
    assert_eq!(config.output.precision, 2);
    assert_eq!(config.default_field_type, FieldType::Free);
}
