//! Butterworth band-pass filters built from cascaded sections.
//!
//! An order-`n` band-pass is an order-`n` Butterworth high-pass at the lower
//! edge followed by an order-`n` Butterworth low-pass at the upper edge. Each
//! half is split into `n / 2` second-order sections (plus one first-order
//! section when `n` is odd), so no section ever carries more than two poles.

use alloc::vec::Vec;
use core::f64::consts::PI;
use libm::sin;

use crate::biquad::{
    Biquad, first_order_highpass_coefficients, first_order_lowpass_coefficients,
    highpass_coefficients, lowpass_coefficients,
};

/// Q factors of the second-order sections of an order-`order` Butterworth filter.
///
/// Pole pair `k` sits at angle `(2k + 1)π / 2n` from the imaginary axis, which
/// gives `Q_k = 1 / (2 sin((2k + 1)π / 2n))`. Order 4 yields `[1.3066, 0.5412]`.
pub fn butterworth_q_factors(order: usize) -> Vec<f64> {
    (0..order / 2)
        .map(|k| {
            let angle = (2 * k + 1) as f64 * PI / (2 * order) as f64;
            1.0 / (2.0 * sin(angle))
        })
        .collect()
}

/// Cascade of sections implementing one Butterworth band-pass response.
#[derive(Debug, Clone)]
pub struct ButterworthBandpass {
    sections: Vec<Biquad>,
    order: usize,
}

impl ButterworthBandpass {
    /// Designs a band-pass of the given order.
    ///
    /// Callers must ensure `0 < low_hz < high_hz < sample_rate / 2` and
    /// `order >= 1`; the design itself does not validate.
    pub fn new(low_hz: f64, high_hz: f64, order: usize, sample_rate: f64) -> Self {
        let q_factors = butterworth_q_factors(order);
        let mut sections = Vec::with_capacity(2 * (order / 2 + order % 2));

        for &q in &q_factors {
            sections.push(Biquad::from_coefficients(highpass_coefficients(
                low_hz,
                q,
                sample_rate,
            )));
        }
        if order % 2 == 1 {
            sections.push(Biquad::from_coefficients(
                first_order_highpass_coefficients(low_hz, sample_rate),
            ));
        }

        for &q in &q_factors {
            sections.push(Biquad::from_coefficients(lowpass_coefficients(
                high_hz,
                q,
                sample_rate,
            )));
        }
        if order % 2 == 1 {
            sections.push(Biquad::from_coefficients(
                first_order_lowpass_coefficients(high_hz, sample_rate),
            ));
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            "butterworth_bandpass: {low_hz}-{high_hz} Hz, order {order}, {} sections",
            sections.len()
        );

        Self { sections, order }
    }

    /// Processes a single sample through every section in turn.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        self.sections
            .iter_mut()
            .fold(input, |sample, section| section.process(sample))
    }

    /// Filters a whole buffer from a cleared state. Output length equals input length.
    pub fn process_buffer(&mut self, input: &[f64]) -> Vec<f64> {
        self.reset();
        input.iter().map(|&x| self.process(x)).collect()
    }

    /// Clears the state of every section.
    pub fn reset(&mut self) {
        for section in &mut self.sections {
            section.clear();
        }
    }

    /// The cascaded sections, high-pass half first.
    pub fn sections(&self) -> &[Biquad] {
        &self.sections
    }

    /// Butterworth order of each half.
    pub fn order(&self) -> usize {
        self.order
    }
}
