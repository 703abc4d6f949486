//! Power spectral density by Welch's method, and the dominant frequency.
//!
//! The signal is cut into overlapping segments; each segment is detrended
//! (mean removed), windowed, and transformed. The one-sided periodograms are
//! averaged and scaled to a density in units²/Hz:
//!
//! ```text
//! P[k] = c_k / (fs · Σ w²) · mean_s |X_s[k]|²
//! c_k  = 2 for 0 < k < N/2, else 1
//! ```
//!
//! Defaults are a periodic Hann window with 50% overlap. A signal shorter
//! than one segment is analyzed as a single segment of its own length, which
//! coarsens the frequency grid; the estimate still comes out but is less
//! accurate.
//!
//! # Reference
//!
//! P. Welch, "The use of fast Fourier transform for the estimation of power
//! spectra", IEEE Trans. Audio Electroacoustics 15 (1967).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{WELCH_OVERLAP, WELCH_SEGMENT_LEN};
use crate::fft::{Fft, hann_window};
use crate::signal::Signal;

/// One-sided power spectral density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSpectrum {
    /// Bin center frequencies in Hz, from DC upwards.
    pub frequencies: Vec<f64>,
    /// Power density per bin.
    pub power: Vec<f64>,
}

impl PowerSpectrum {
    /// Number of bins.
    pub fn len(&self) -> usize {
        self.power.len()
    }

    /// True when there are no bins.
    pub fn is_empty(&self) -> bool {
        self.power.is_empty()
    }

    /// Spacing between bins in Hz, or NaN with fewer than two bins.
    pub fn bin_width(&self) -> f64 {
        match self.frequencies.as_slice() {
            [first, second, ..] => second - first,
            _ => f64::NAN,
        }
    }

    /// `(frequency, power)` of the strongest bin.
    ///
    /// Ties go to the lowest frequency; NaN bins are skipped.
    pub fn peak(&self) -> Option<(f64, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &p) in self.power.iter().enumerate() {
            if p.is_nan() {
                continue;
            }
            if best.is_none_or(|(_, best_p)| p > best_p) {
                best = Some((i, p));
            }
        }
        best.map(|(i, p)| (self.frequencies[i], p))
    }
}

/// Welch's averaged-periodogram estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Welch {
    segment_len: usize,
    overlap: f64,
}

impl Default for Welch {
    fn default() -> Self {
        Self {
            segment_len: WELCH_SEGMENT_LEN,
            overlap: WELCH_OVERLAP,
        }
    }
}

impl Welch {
    /// Estimator with the given segment length and the default overlap.
    ///
    /// A zero segment length is treated as one.
    pub fn new(segment_len: usize) -> Self {
        Self {
            segment_len: segment_len.max(1),
            ..Self::default()
        }
    }

    /// Set the overlap as a fraction of the segment, clamped to `[0, 1)`.
    pub fn with_overlap(mut self, overlap: f64) -> Self {
        self.overlap = if overlap.is_finite() {
            overlap.clamp(0.0, 0.999)
        } else {
            WELCH_OVERLAP
        };
        self
    }

    /// Configured segment length.
    pub fn segment_len(&self) -> usize {
        self.segment_len
    }

    /// Density estimate of `samples` recorded at `sample_rate` Hz.
    pub fn estimate(&self, samples: &[f64], sample_rate: f64) -> PowerSpectrum {
        if samples.is_empty() {
            return PowerSpectrum {
                frequencies: Vec::new(),
                power: Vec::new(),
            };
        }

        let nperseg = self.segment_len.min(samples.len());
        let noverlap = ((nperseg as f64 * self.overlap) as usize).min(nperseg - 1);
        let step = nperseg - noverlap;
        let num_segments = (samples.len() - nperseg) / step + 1;
        let num_bins = nperseg / 2 + 1;

        debug!(
            "welch: {} samples, segment {nperseg}, overlap {noverlap}, {num_segments} segments",
            samples.len()
        );

        let window = hann_window(nperseg);
        let window_power: f64 = window.iter().map(|w| w * w).sum();
        let scale = if window_power > 0.0 {
            1.0 / (sample_rate * window_power)
        } else {
            0.0
        };

        let fft = Fft::new(nperseg);
        let mut accum = vec![0.0; num_bins];
        let mut segment = vec![0.0; nperseg];

        for s in 0..num_segments {
            let start = s * step;
            let chunk = &samples[start..start + nperseg];
            let mean = chunk.iter().sum::<f64>() / nperseg as f64;

            for ((out, &x), &w) in segment.iter_mut().zip(chunk).zip(&window) {
                *out = (x - mean) * w;
            }

            for (acc, bin) in accum.iter_mut().zip(fft.forward(&segment)) {
                *acc += bin.norm_sqr();
            }
        }

        // Double every bin except DC and, for even lengths, Nyquist
        let last_doubled = if nperseg % 2 == 0 { num_bins - 1 } else { num_bins };
        let power = accum
            .iter()
            .enumerate()
            .map(|(k, &acc)| {
                let one_sided = if k > 0 && k < last_doubled { 2.0 } else { 1.0 };
                acc * scale * one_sided / num_segments as f64
            })
            .collect();

        let frequencies = (0..num_bins)
            .map(|k| k as f64 * sample_rate / nperseg as f64)
            .collect();

        PowerSpectrum { frequencies, power }
    }
}

/// PSD of `samples` with the default overlap.
pub fn welch_psd(samples: &[f64], sample_rate: f64, segment_len: usize) -> PowerSpectrum {
    Welch::new(segment_len).estimate(samples, sample_rate)
}

/// Finds the frequency carrying the most spectral power.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResonanceDetector {
    welch: Welch,
}

impl ResonanceDetector {
    /// Detector using `segment_len`-sample Welch segments.
    pub fn new(segment_len: usize) -> Self {
        Self {
            welch: Welch::new(segment_len),
        }
    }

    /// PSD of the whole signal.
    pub fn spectrum(&self, signal: &Signal) -> PowerSpectrum {
        if signal.len() < self.welch.segment_len() {
            warn!(
                "signal has {} samples, shorter than one {}-sample segment; resonance estimate is coarse",
                signal.len(),
                self.welch.segment_len()
            );
        }
        self.welch
            .estimate(signal.samples(), f64::from(signal.sample_rate()))
    }

    /// Dominant frequency in Hz. NaN only if every bin is NaN.
    pub fn detect(&self, signal: &Signal) -> f64 {
        self.spectrum(signal)
            .peak()
            .map_or(f64::NAN, |(frequency, _)| frequency)
    }
}

/// Dominant frequency of `signal` using 4096-sample Welch segments.
pub fn dominant_frequency(signal: &Signal) -> f64 {
    ResonanceDetector::default().detect(signal)
}
