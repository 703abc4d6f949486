//! CSV export of analysis results for external plotting.
//!
//! Every file has a header row. Non-finite values are written as empty
//! fields so spreadsheet tools treat them as missing rather than as numbers.

use roomscope_analysis::{DecayCurve, MelSpectrogram, PowerSpectrum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Result;

fn field(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.6}")
    } else {
        String::new()
    }
}

/// Write a decay curve as `index,lag_s,level_db`.
///
/// `lag_s` is measured from the zero-lag point at the middle of the curve, so
/// the first half has negative lags.
pub fn export_decay_curve_csv(
    curve: &DecayCurve,
    sample_rate: u32,
    path: impl AsRef<Path>,
) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    let center = curve.len() / 2;
    let fs = f64::from(sample_rate);

    writeln!(file, "index,lag_s,level_db")?;
    for (i, &level) in curve.as_slice().iter().enumerate() {
        let lag = (i as f64 - center as f64) / fs;
        writeln!(file, "{i},{},{}", field(lag), field(level))?;
    }

    file.flush()?;
    Ok(())
}

/// Write a power spectrum as `frequency_hz,power`.
pub fn export_power_spectrum_csv(spectrum: &PowerSpectrum, path: impl AsRef<Path>) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "frequency_hz,power")?;
    for (&freq, &power) in spectrum.frequencies.iter().zip(&spectrum.power) {
        writeln!(file, "{},{power:e}", field(freq))?;
    }

    file.flush()?;
    Ok(())
}

/// Write a mel spectrogram with one row per frame.
///
/// The header holds `time_s` followed by each mel band's center frequency.
pub fn export_mel_spectrogram_csv(mel: &MelSpectrogram, path: impl AsRef<Path>) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    write!(file, "time_s")?;
    for &center in &mel.center_frequencies {
        write!(file, ",{center:.2}")?;
    }
    writeln!(file)?;

    for (frame, values) in mel.data.iter().enumerate() {
        write!(file, "{:.6}", mel.frame_to_time(frame))?;
        for &value in values {
            write!(file, ",{}", field(value))?;
        }
        writeln!(file)?;
    }

    file.flush()?;
    Ok(())
}
