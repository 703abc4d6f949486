//! Per-band reverberation report.

use clap::Args;
use roomscope_analysis::{BandAnalysisPipeline, PerBand, format_deviation, rt60_deviation};
use roomscope_io::export_power_spectrum_csv;
use serde::Serialize;
use std::path::PathBuf;

use super::common::{format_duration, format_secs, load_input, resolve_config};

/// Report duration, resonance, and per-band RT60 of a recording.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Analysis configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write the Welch power spectrum to this CSV file
    #[arg(long, value_name = "CSV")]
    pub spectrum: Option<PathBuf>,
}

/// Machine-readable analysis report. Undefined values serialize as `null`.
#[derive(Debug, Serialize)]
struct AnalysisReport {
    file: PathBuf,
    sample_rate: u32,
    duration_secs: f64,
    resonance_hz: f64,
    target_rt60_secs: f64,
    rt60_secs: PerBand<f64>,
    deviation_secs: PerBand<f64>,
}

/// Run the analyze command.
pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = resolve_config(args.config.as_deref())?;
    let signal = load_input(&args.input)?;

    let pipeline = BandAnalysisPipeline::new(&config)?;
    let rt60 = pipeline.analyze(&signal)?;

    let spectrum = pipeline.power_spectrum(&signal);
    let resonance_hz = spectrum.peak().map_or(f64::NAN, |(freq, _)| freq);

    if let Some(path) = &args.spectrum {
        export_power_spectrum_csv(&spectrum, path)?;
    }

    let target = config.target_rt60_secs;
    let report = AnalysisReport {
        file: args.input.clone(),
        sample_rate: signal.sample_rate(),
        duration_secs: signal.duration_secs(),
        resonance_hz,
        target_rt60_secs: target,
        rt60_secs: rt60,
        deviation_secs: rt60.map(|_, value| rt60_deviation(value, target)),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File:       {}", report.file.display());
    println!(
        "Duration:   {} ({} Hz)",
        format_duration(report.duration_secs),
        report.sample_rate
    );
    if report.resonance_hz.is_nan() {
        println!("Resonance:  n/a");
    } else {
        println!("Resonance:  {:.2} Hz", report.resonance_hz);
    }
    println!();
    println!("RT60 (deviation from {target:.2} s target):");
    for (band, &value) in report.rt60_secs.iter() {
        let cutoffs = config.bands.get(band);
        println!(
            "  {:<5} {:>6.0}-{:<6.0} Hz  {:>8}  {:>6}",
            band.name(),
            cutoffs.low_hz,
            cutoffs.high_hz,
            format_secs(value),
            format_deviation(*report.deviation_secs.get(band)),
        );
    }

    if let Some(path) = &args.spectrum {
        println!();
        println!("Spectrum written to {}", path.display());
    }

    Ok(())
}
