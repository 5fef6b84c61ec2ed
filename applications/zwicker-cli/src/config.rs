/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zwicker_loudness::FieldType;

/// Configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "zwicker.toml";

/// Most decimals the text report will print
const MAX_PRECISION: usize = 6;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_field_type")]
    pub default_field_type: FieldType,

    #[serde(default = "default_output")]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputSettings {
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Decimals for loudness values in text reports
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Append the specific loudness over Bark to text reports
    #[serde(default = "default_show_profile")]
    pub show_profile: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `zwicker.toml` is read when
    /// present in the working directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Configuration file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables, e.g. ZWICKER_OUTPUT__FORMAT=json
        settings = settings.add_source(
            config::Environment::with_prefix("ZWICKER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.output.precision > MAX_PRECISION {
            return Err(CliError::Config(format!(
                "output.precision must be at most {}, got {}",
                MAX_PRECISION, self.output.precision
            )));
        }

        Ok(())
    }
}

// Default values
fn default_field_type() -> FieldType {
    FieldType::Free
}

fn default_output() -> OutputSettings {
    OutputSettings {
        format: default_format(),
        precision: default_precision(),
        show_profile: default_show_profile(),
    }
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}

fn default_precision() -> usize {
    2
}

fn default_show_profile() -> bool {
    false
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_field_type: default_field_type(),
            output: default_output(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        default_output()
    }
}
