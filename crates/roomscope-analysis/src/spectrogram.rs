//! STFT and mel spectrograms for visualization.
//!
//! Frames are taken without centering or padding, so a signal yields
//! `(len - fft_size) / hop_size + 1` frames and none at all when it is shorter
//! than one FFT. Cells hold power (magnitude squared). The mel projection
//! uses the HTK mel scale with triangular filters spanning 0 Hz to Nyquist.

use roomscope_core::amplitude_to_db;
use serde::Serialize;

use crate::config::SpectrogramConfig;
use crate::error::Result;
use crate::fft::{Fft, hann_window};
use crate::signal::Signal;

/// Smallest amplitude distinguished by [`to_db_relative_to_max`].
pub const DB_AMPLITUDE_FLOOR: f64 = 1e-5;

/// Linear-frequency power spectrogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    /// Power data `[time_frame][frequency_bin]`
    pub data: Vec<Vec<f64>>,
    /// FFT size used
    pub fft_size: usize,
    /// Hop size between frames
    pub hop_size: usize,
    /// Sample rate
    pub sample_rate: f64,
    /// Number of time frames
    pub num_frames: usize,
    /// Number of frequency bins (fft_size / 2 + 1)
    pub num_bins: usize,
}

impl Spectrogram {
    /// Frequency in Hz of a bin
    pub fn bin_to_freq(&self, bin: usize) -> f64 {
        bin as f64 * self.sample_rate / self.fft_size as f64
    }

}

/// Short-time Fourier transform analyzer with a periodic Hann window
pub struct StftAnalyzer {
    fft_size: usize,
    hop_size: usize,
    sample_rate: f64,
    fft: Fft,
    window_coeffs: Vec<f64>,
}

impl StftAnalyzer {
    /// Create an analyzer.
    ///
    /// `fft_size` below 2 and `hop_size` of 0 are raised to the nearest
    /// usable value.
    pub fn new(sample_rate: f64, fft_size: usize, hop_size: usize) -> Self {
        let fft_size = fft_size.max(2);
        Self {
            fft_size,
            hop_size: hop_size.max(1),
            sample_rate,
            fft: Fft::new(fft_size),
            window_coeffs: hann_window(fft_size),
        }
    }

    /// Power spectrogram of `signal`
    pub fn analyze(&self, signal: &[f64]) -> Spectrogram {
        let num_frames = if signal.len() >= self.fft_size {
            (signal.len() - self.fft_size) / self.hop_size + 1
        } else {
            0
        };

        let num_bins = self.fft_size / 2 + 1;
        let mut frame = vec![0.0; self.fft_size];

        let data = (0..num_frames)
            .map(|frame_idx| {
                let start = frame_idx * self.hop_size;
                let chunk = &signal[start..start + self.fft_size];

                for ((out, &x), &w) in frame.iter_mut().zip(chunk).zip(&self.window_coeffs) {
                    *out = x * w;
                }

                self.fft
                    .forward(&frame)
                    .iter()
                    .map(|c| c.norm_sqr())
                    .collect()
            })
            .collect();

        Spectrogram {
            data,
            fft_size: self.fft_size,
            hop_size: self.hop_size,
            sample_rate: self.sample_rate,
            num_frames,
            num_bins,
        }
    }
}

/// Mel-scaled spectrogram `[time_frame][mel_bin]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MelSpectrogram {
    /// Mel-band values, power or dB depending on how it was produced
    pub data: Vec<Vec<f64>>,
    /// Center frequency in Hz of each mel band
    pub center_frequencies: Vec<f64>,
    /// Sample rate
    pub sample_rate: f64,
    /// Hop size
    pub hop_size: usize,
    /// Number of frames
    pub num_frames: usize,
}

impl MelSpectrogram {
    /// Number of mel bands.
    pub fn num_mel_bins(&self) -> usize {
        self.center_frequencies.len()
    }

    /// Start time in seconds of a frame
    pub fn frame_to_time(&self, frame: usize) -> f64 {
        (frame * self.hop_size) as f64 / self.sample_rate
    }

    /// Convert to dB relative to the loudest cell, keeping `top_db` of range.
    pub fn to_db(&self, top_db: f64) -> MelSpectrogram {
        MelSpectrogram {
            data: to_db_relative_to_max(&self.data, top_db),
            center_frequencies: self.center_frequencies.clone(),
            sample_rate: self.sample_rate,
            hop_size: self.hop_size,
            num_frames: self.num_frames,
        }
    }
}

/// Triangular filters mapping FFT bins onto the mel scale
pub struct MelFilterbank {
    filters: Vec<Vec<f64>>,
    center_frequencies: Vec<f64>,
}

impl MelFilterbank {
    /// Create a filterbank.
    ///
    /// Weights are evaluated at each bin's exact frequency. Each slope is at
    /// least one bin wide, so narrow low-frequency bands still cover the bin
    /// nearest their center instead of falling between bins.
    ///
    /// # Arguments
    /// * `num_fft_bins` - Number of FFT bins (fft_size / 2 + 1)
    /// * `num_mel_bins` - Number of mel bands
    /// * `sample_rate` - Sample rate in Hz
    /// * `min_freq` - Lowest filter edge in Hz
    /// * `max_freq` - Highest filter edge in Hz
    pub fn new(
        num_fft_bins: usize,
        num_mel_bins: usize,
        sample_rate: f64,
        min_freq: f64,
        max_freq: f64,
    ) -> Self {
        let fft_size = (num_fft_bins.saturating_sub(1) * 2).max(1);
        let bin_width = sample_rate / fft_size as f64;

        let mel_min = hz_to_mel(min_freq);
        let mel_max = hz_to_mel(max_freq);

        let hz_points: Vec<f64> = (0..=num_mel_bins + 1)
            .map(|i| mel_to_hz(mel_min + (mel_max - mel_min) * i as f64 / (num_mel_bins + 1) as f64))
            .collect();

        let filters = hz_points
            .windows(3)
            .map(|edges| {
                let center = edges[1];
                let rise = (center - edges[0]).max(bin_width);
                let fall = (edges[2] - center).max(bin_width);

                (0..num_fft_bins)
                    .map(|k| {
                        let freq = k as f64 * bin_width;
                        let up = (freq - (center - rise)) / rise;
                        let down = ((center + fall) - freq) / fall;
                        up.min(down).max(0.0)
                    })
                    .collect()
            })
            .collect();

        Self {
            filters,
            center_frequencies: hz_points[1..=num_mel_bins].to_vec(),
        }
    }

    /// Project one linear spectrum frame onto the mel bands
    pub fn apply(&self, spectrum: &[f64]) -> Vec<f64> {
        self.filters
            .iter()
            .map(|filter| filter.iter().zip(spectrum).map(|(&f, &s)| f * s).sum())
            .collect()
    }

    /// Project a whole spectrogram
    pub fn apply_to_spectrogram(&self, spectrogram: &Spectrogram) -> MelSpectrogram {
        MelSpectrogram {
            data: spectrogram.data.iter().map(|frame| self.apply(frame)).collect(),
            center_frequencies: self.center_frequencies.clone(),
            sample_rate: spectrogram.sample_rate,
            hop_size: spectrogram.hop_size,
            num_frames: spectrogram.num_frames,
        }
    }

    /// Center frequency in Hz of each band
    pub fn center_frequencies(&self) -> &[f64] {
        &self.center_frequencies
    }

    /// Number of mel bands
    pub fn num_mel_bins(&self) -> usize {
        self.filters.len()
    }
}

fn hz_to_mel(hz: f64) -> f64 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f64) -> f64 {
    700.0 * (10.0_f64.powf(mel / 2595.0) - 1.0)
}

/// Amplitude to dB relative to the largest value, clipped `top_db` below the peak.
///
/// Each cell becomes `20·log10(max(x, 1e-5)) - 20·log10(max(ref, 1e-5))` where
/// `ref` is the largest cell, so the loudest cell reads 0 dB.
pub fn to_db_relative_to_max(data: &[Vec<f64>], top_db: f64) -> Vec<Vec<f64>> {
    let reference = data
        .iter()
        .flatten()
        .copied()
        .fold(0.0_f64, f64::max);
    let reference_db = amplitude_to_db(reference, DB_AMPLITUDE_FLOOR);

    let mut db: Vec<Vec<f64>> = data
        .iter()
        .map(|frame| {
            frame
                .iter()
                .map(|&x| amplitude_to_db(x, DB_AMPLITUDE_FLOOR) - reference_db)
                .collect()
        })
        .collect();

    let peak = db.iter().flatten().copied().fold(f64::NEG_INFINITY, f64::max);
    let clip = peak - top_db;
    for value in db.iter_mut().flatten() {
        *value = value.max(clip);
    }
    db
}

/// Mel power spectrogram of `signal`.
pub fn mel_spectrogram(signal: &Signal, config: &SpectrogramConfig) -> Result<MelSpectrogram> {
    config.validate()?;

    let sample_rate = f64::from(signal.sample_rate());
    let stft = StftAnalyzer::new(sample_rate, config.fft_size, config.hop_size);
    let spectrogram = stft.analyze(signal.samples());

    let filterbank = MelFilterbank::new(
        config.fft_size / 2 + 1,
        config.num_mel_bins,
        sample_rate,
        0.0,
        signal.nyquist_hz(),
    );

    Ok(filterbank.apply_to_spectrogram(&spectrogram))
}

/// Mel spectrogram of `signal` in dB relative to its loudest cell.
pub fn mel_spectrogram_db(signal: &Signal, config: &SpectrogramConfig) -> Result<MelSpectrogram> {
    Ok(mel_spectrogram(signal, config)?.to_db(config.top_db))
}
