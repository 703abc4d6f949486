//! Mel spectrogram export.

use clap::Args;
use roomscope_analysis::mel_spectrogram_db;
use roomscope_io::export_mel_spectrogram_csv;
use std::path::PathBuf;

use super::common::{load_input, resolve_config};

/// Compute a mel spectrogram in dB and write it as CSV.
#[derive(Args)]
pub struct SpectrogramArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Analysis configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the number of mel bands
    #[arg(long)]
    pub mel_bins: Option<usize>,
}

/// Run the spectrogram command.
pub fn run(args: SpectrogramArgs) -> anyhow::Result<()> {
    let config = resolve_config(args.config.as_deref())?;
    let mut settings = config.spectrogram;
    if let Some(mel_bins) = args.mel_bins {
        settings.num_mel_bins = mel_bins;
    }

    let signal = load_input(&args.input)?;
    let mel = mel_spectrogram_db(&signal, &settings)?;
    export_mel_spectrogram_csv(&mel, &args.output)?;

    println!(
        "{} frames x {} mel bands -> {}",
        mel.num_frames,
        mel.num_mel_bins(),
        args.output.display()
    );
    if mel.num_frames == 0 {
        println!(
            "Input is shorter than one {}-sample frame; no frames written",
            settings.fft_size
        );
    }

    Ok(())
}
