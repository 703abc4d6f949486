//! Band-pass filtering of a [`Signal`] into one analysis band.
//!
//! Filters are Butterworth band-passes applied as cascaded second-order
//! sections (see [`roomscope_core::ButterworthBandpass`]). Band edges are
//! checked against the signal's Nyquist frequency at design time and never
//! clamped.
//!
//! # Example
//!
//! ```rust
//! use roomscope_analysis::{Signal, filterbank::bandpass};
//!
//! let signal = Signal::new(vec![0.0; 4410], 44100).unwrap();
//! let mid = bandpass(&signal, 250.0, 2000.0, 4).unwrap();
//! assert_eq!(mid.len(), signal.len());
//!
//! // 20 kHz is above Nyquist at 8 kHz
//! let narrow = Signal::new(vec![0.0; 800], 8000).unwrap();
//! assert!(bandpass(&narrow, 2000.0, 20000.0, 4).is_err());
//! ```

use roomscope_core::ButterworthBandpass;
use tracing::trace;

use crate::band::Cutoffs;
use crate::error::{AnalysisError, Result};
use crate::signal::Signal;

/// A designed band-pass filter bound to one sampling rate.
#[derive(Debug, Clone)]
pub struct BandpassFilter {
    cascade: ButterworthBandpass,
    cutoffs: Cutoffs,
    sample_rate: u32,
}

impl BandpassFilter {
    /// Design an order-`order` Butterworth band-pass for `sample_rate`.
    ///
    /// Fails with [`AnalysisError::InvalidBand`] unless
    /// `0 < low_hz / nyquist < high_hz / nyquist < 1`, and with
    /// [`AnalysisError::InvalidOrder`] for order zero.
    pub fn design(cutoffs: Cutoffs, order: usize, sample_rate: u32) -> Result<Self> {
        if order == 0 {
            return Err(AnalysisError::InvalidOrder(order));
        }

        let nyquist_hz = f64::from(sample_rate) / 2.0;
        let low_norm = cutoffs.low_hz / nyquist_hz;
        let high_norm = cutoffs.high_hz / nyquist_hz;

        // Written so that NaN edges fail every comparison and are rejected.
        let valid = 0.0 < low_norm && low_norm < high_norm && high_norm < 1.0;
        if !valid {
            return Err(AnalysisError::InvalidBand {
                low_hz: cutoffs.low_hz,
                high_hz: cutoffs.high_hz,
                nyquist_hz,
            });
        }

        trace!(
            "bandpass design: {}-{} Hz (normalized {low_norm:.5}-{high_norm:.5}), order {order}",
            cutoffs.low_hz,
            cutoffs.high_hz
        );

        let cascade = ButterworthBandpass::new(
            cutoffs.low_hz,
            cutoffs.high_hz,
            order,
            f64::from(sample_rate),
        );

        Ok(Self {
            cascade,
            cutoffs,
            sample_rate,
        })
    }

    /// Filter `signal`, returning a new signal of the same length and rate.
    ///
    /// The filter starts from a cleared state on every call, so applying it
    /// twice to the same input gives identical output.
    pub fn apply(&self, signal: &Signal) -> Result<Signal> {
        if signal.sample_rate() != self.sample_rate {
            return Err(AnalysisError::InvalidSignal(format!(
                "filter designed for {} Hz applied to a {} Hz signal",
                self.sample_rate,
                signal.sample_rate()
            )));
        }

        let mut cascade = self.cascade.clone();
        Ok(signal.derive(cascade.process_buffer(signal.samples())))
    }

    /// Pass band edges.
    pub fn cutoffs(&self) -> Cutoffs {
        self.cutoffs
    }

    /// Butterworth order of each half of the cascade.
    pub fn order(&self) -> usize {
        self.cascade.order()
    }
}

/// Design and apply a band-pass in one step.
pub fn bandpass(signal: &Signal, low_hz: f64, high_hz: f64, order: usize) -> Result<Signal> {
    BandpassFilter::design(Cutoffs::new(low_hz, high_hz), order, signal.sample_rate())?.apply(signal)
}
