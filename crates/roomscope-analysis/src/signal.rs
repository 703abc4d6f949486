//! Mono sample buffer with its sampling rate.

use crate::error::{AnalysisError, Result};

/// A fully-buffered mono recording.
///
/// Invariants, checked on construction: the sampling rate is positive, there
/// is at least one sample, and every sample is finite. A `Signal` is never
/// mutated afterwards; derived signals (band-filtered copies) are new values.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl Signal {
    /// Wrap `samples` recorded at `sample_rate` Hz.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidSignal(
                "sampling rate must be positive".to_string(),
            ));
        }
        if samples.is_empty() {
            return Err(AnalysisError::InvalidSignal(
                "signal must contain at least one sample".to_string(),
            ));
        }
        if let Some(index) = samples.iter().position(|x| !x.is_finite()) {
            return Err(AnalysisError::InvalidSignal(format!(
                "sample {index} is not finite"
            )));
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Widen decoded `f32` samples into a signal.
    pub fn from_f32(samples: &[f32], sample_rate: u32) -> Result<Self> {
        Self::new(samples.iter().map(|&x| f64::from(x)).collect(), sample_rate)
    }

    /// A signal at the same rate with different samples (filter output).
    pub(crate) fn derive(&self, samples: Vec<f64>) -> Self {
        debug_assert_eq!(samples.len(), self.samples.len());
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// The samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sampling rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples (always at least one).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Half the sampling rate.
    pub fn nyquist_hz(&self) -> f64 {
        f64::from(self.sample_rate) / 2.0
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}
