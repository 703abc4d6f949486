//! Export per-band filtered signals and decay curves for inspection.

use anyhow::Context;
use clap::Args;
use roomscope_analysis::BandAnalysisPipeline;
use roomscope_io::{export_decay_curve_csv, write_signal};
use std::path::PathBuf;

use super::common::{format_secs, load_input, resolve_config};

/// Write `{band}.wav` and `{band}_decay.csv` for each band.
#[derive(Args)]
pub struct BandsArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory for the exported files (created if missing)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Analysis configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bit depth of the exported WAV files
    #[arg(long, default_value = "32")]
    pub bits: u16,
}

/// Run the bands command.
pub fn run(args: BandsArgs) -> anyhow::Result<()> {
    if !matches!(args.bits, 8 | 16 | 24 | 32) {
        anyhow::bail!("unsupported bit depth {} (use 8, 16, 24, or 32)", args.bits);
    }

    let config = resolve_config(args.config.as_deref())?;
    let signal = load_input(&args.input)?;
    let pipeline = BandAnalysisPipeline::new(&config)?;
    let detailed = pipeline.analyze_detailed(&signal)?;

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    for (band, result) in detailed.iter() {
        let wav_path = args.output_dir.join(format!("{band}.wav"));
        let csv_path = args.output_dir.join(format!("{band}_decay.csv"));

        write_signal(&wav_path, &result.filtered, args.bits)?;
        export_decay_curve_csv(&result.decay, signal.sample_rate(), &csv_path)?;

        println!(
            "{:<5} RT60 {:>8}  -> {}, {}",
            band.name(),
            format_secs(result.rt60),
            wav_path.display(),
            csv_path.display()
        );
    }

    Ok(())
}
