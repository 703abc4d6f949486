//! roomscope CLI - reverberation and resonance analysis of room recordings.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roomscope")]
#[command(author, version, about = "Room acoustics analysis from WAV recordings", long_about = None)]
struct Cli {
    /// Log pipeline stages to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report duration, resonance, and per-band RT60
    Analyze(commands::analyze::AnalyzeArgs),

    /// Display WAV file metadata
    Info(commands::info::InfoArgs),

    /// Export each band's filtered signal and decay curve
    Bands(commands::bands::BandsArgs),

    /// Export a mel spectrogram in dB as CSV
    Spectrogram(commands::spectrogram::SpectrogramArgs),

    /// Show or create the analysis configuration file
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let fallback = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Bands(args) => commands::bands::run(args),
        Commands::Spectrogram(args) => commands::spectrogram::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
