//! Roomscope Analysis - reverberation and resonance of recorded rooms
//!
//! Given a mono recording, this crate estimates:
//!
//! - the reverberation time (RT60) in three fixed bands, and
//! - the dominant resonant frequency of the whole recording,
//!
//! plus a mel spectrogram for visualization.
//!
//! ## Modules
//!
//! - [`signal`] - Validated mono sample buffer
//! - [`band`] - The Low/Mid/High band set and per-band containers
//! - [`config`] - Named tunables and their defaults
//! - [`filterbank`] - Butterworth band-pass filtering with Nyquist checks
//! - [`xcorr`] - FFT autocorrelation
//! - [`decay`] - Schroeder energy decay curves
//! - [`rt60`] - RT60 from a decay curve
//! - [`spectrum`] - Welch PSD and dominant frequency
//! - [`spectrogram`] - STFT, mel filterbank, dB conversion
//! - [`pipeline`] - The per-band orchestration
//! - [`fft`] - FFT wrapper with windowing functions
//!
//! ## Pipeline
//!
//! ```text
//! Signal ─┬─ bandpass(Low)  ── decay curve ── RT60 ─┐
//!         ├─ bandpass(Mid)  ── decay curve ── RT60 ─┼─ PerBand<f64>
//!         ├─ bandpass(High) ── decay curve ── RT60 ─┘
//!         └─ Welch PSD ── argmax ── dominant frequency
//! ```
//!
//! An RT60 that cannot be measured (the decay never reaches -65 dB) is
//! `f64::NAN`. Only unusable configuration, such as a band edge above the
//! Nyquist frequency, is an [`AnalysisError`].
//!
//! ## Example
//!
//! ```rust
//! use roomscope_analysis::{BandAnalysisPipeline, Signal, dominant_frequency};
//! use std::f64::consts::PI;
//!
//! let samples: Vec<f64> = (0..44100)
//!     .map(|i| (2.0 * PI * 1000.0 * i as f64 / 44100.0).sin())
//!     .collect();
//! let signal = Signal::new(samples, 44100).unwrap();
//!
//! let rt60 = BandAnalysisPipeline::default().analyze(&signal).unwrap();
//! println!("low {:.2} s, mid {:.2} s, high {:.2} s", rt60.low, rt60.mid, rt60.high);
//!
//! let peak = dominant_frequency(&signal);
//! assert!((peak - 1000.0).abs() < 11.0);
//! ```

pub mod band;
pub mod config;
pub mod decay;
pub mod error;
pub mod fft;
pub mod filterbank;
pub mod pipeline;
pub mod rt60;
pub mod signal;
pub mod spectrogram;
pub mod spectrum;
pub mod xcorr;

pub use band::{BandEdges, Cutoffs, FrequencyBand, PerBand};
pub use config::{AnalysisConfig, SpectrogramConfig};
pub use decay::{DecayCurve, EnergyDecay, decay_curve};
pub use error::{AnalysisError, Result};
pub use filterbank::{BandpassFilter, bandpass};
pub use pipeline::{BandAnalysisPipeline, BandResult, analyze};
pub use rt60::{Rt60Estimator, estimate_rt60, format_deviation, rt60_deviation};
pub use signal::Signal;
pub use spectrogram::{MelFilterbank, MelSpectrogram, StftAnalyzer, mel_spectrogram, mel_spectrogram_db};
pub use spectrum::{PowerSpectrum, ResonanceDetector, dominant_frequency, welch_psd};
pub use xcorr::autocorrelation;
