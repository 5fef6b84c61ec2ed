/// Zwicker - stationary loudness calculator
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zwicker_cli::{compute_from_source, report, CliConfig, OutputFormat, SpectrumSource};
use zwicker_loudness::FieldType;

#[derive(Parser)]
#[command(name = "zwicker")]
#[command(about = "Zwicker loudness (ISO 532-1) of third-octave spectra", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "ZWICKER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute loudness of a third-octave spectrum (28 bands, 25 Hz - 12.5 kHz)
    Compute {
        /// Band levels in dB SPL, comma separated
        #[arg(short, long, allow_hyphen_values = true, conflicts_with = "input")]
        levels: Option<String>,

        /// Spectrum file (.json or .toml)
        #[arg(short, long, required_unless_present = "levels")]
        input: Option<PathBuf>,

        /// Sound field of the measurement: free or diffuse
        #[arg(short, long)]
        field: Option<FieldType>,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Print the specific loudness over Bark
        #[arg(long)]
        profile: bool,
    },
    /// List the third-octave bands of the input spectrum
    Bands,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zwicker_cli=info,zwicker_loudness=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Compute {
            levels,
            input,
            field,
            format,
            profile,
        } => {
            let source = match (levels, input) {
                (Some(levels), _) => SpectrumSource::Inline(levels),
                (None, Some(path)) => SpectrumSource::File(path),
                (None, None) => anyhow::bail!("either --levels or --input is required"),
            };

            if let Some(format) = format {
                config.output.format = format;
            }
            config.output.show_profile |= profile;

            let result = compute_from_source(&source, field, &config)?;
            println!("{}", report::render(&result, &config.output)?.trim_end());
        }
        Commands::Bands => {
            println!("{}", report::render_bands()?.trim_end());
        }
    }

    Ok(())
}
