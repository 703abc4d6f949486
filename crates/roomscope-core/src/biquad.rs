//! Second-order section (biquad) filter structure.
//!
//! A [`Biquad`] is the building block of every cascaded filter in this crate.
//! Coefficient helpers follow the RBJ Audio EQ Cookbook, evaluated in `f64`
//! so that low cutoffs at high sample rates keep their precision.

use core::f64::consts::PI;
use libm::{cos, sin, tan};

/// Raw section coefficients as `(b0, b1, b2, a0, a1, a2)`.
pub type SectionCoefficients = (f64, f64, f64, f64, f64, f64);

/// Second-order IIR section with its own state.
///
/// Implements the Direct Form I structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
///
/// A first-order section is the special case `b2 = a2 = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,

    /// Input delay line: x[n-1], x[n-2]
    x1: f64,
    x2: f64,

    /// Output delay line: y[n-1], y[n-2]
    y1: f64,
    y2: f64,
}

impl Biquad {
    /// Creates a section with passthrough coefficients (`y[n] = x[n]`).
    pub fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Creates a section from raw coefficients.
    pub fn from_coefficients(coefficients: SectionCoefficients) -> Self {
        let mut section = Self::new();
        section.set_coefficients(coefficients);
        section
    }

    /// Sets the section coefficients, normalizing by `a0`.
    pub fn set_coefficients(&mut self, (b0, b1, b2, a0, a1, a2): SectionCoefficients) {
        let a0_inv = 1.0 / a0;
        self.b0 = b0 * a0_inv;
        self.b1 = b1 * a0_inv;
        self.b2 = b2 * a0_inv;
        self.a1 = a1 * a0_inv;
        self.a2 = a2 * a0_inv;
    }

    /// Returns the normalized coefficients `(b0, b1, b2, 1.0, a1, a2)`.
    pub fn coefficients(&self) -> SectionCoefficients {
        (self.b0, self.b1, self.b2, 1.0, self.a1, self.a2)
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clears the delay lines without touching the coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    /// Returns true when both poles lie strictly inside the unit circle.
    ///
    /// Uses the stability triangle for `1 + a1 z^-1 + a2 z^-2`.
    pub fn is_stable(&self) -> bool {
        self.a2.abs() < 1.0 && self.a1.abs() < 1.0 + self.a2
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// Low-pass section coefficients (RBJ cookbook).
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (0.7071 for a single Butterworth pair)
/// * `sample_rate` - Sample rate in Hz
pub fn lowpass_coefficients(frequency: f64, q: f64, sample_rate: f64) -> SectionCoefficients {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cos(omega);
    let alpha = sin(omega) / (2.0 * q);

    let b0 = (1.0 - cos_omega) / 2.0;
    let b1 = 1.0 - cos_omega;
    let b2 = (1.0 - cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// High-pass section coefficients (RBJ cookbook).
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (0.7071 for a single Butterworth pair)
/// * `sample_rate` - Sample rate in Hz
pub fn highpass_coefficients(frequency: f64, q: f64, sample_rate: f64) -> SectionCoefficients {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cos(omega);
    let alpha = sin(omega) / (2.0 * q);

    let b0 = (1.0 + cos_omega) / 2.0;
    let b1 = -(1.0 + cos_omega);
    let b2 = (1.0 + cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// First-order low-pass coefficients via the bilinear transform with prewarping.
///
/// Returned in section form with `b2 = a2 = 0`.
pub fn first_order_lowpass_coefficients(frequency: f64, sample_rate: f64) -> SectionCoefficients {
    let k = tan(PI * frequency / sample_rate);
    (k, k, 0.0, 1.0 + k, k - 1.0, 0.0)
}

/// First-order high-pass coefficients via the bilinear transform with prewarping.
///
/// Returned in section form with `b2 = a2 = 0`.
pub fn first_order_highpass_coefficients(frequency: f64, sample_rate: f64) -> SectionCoefficients {
    let k = tan(PI * frequency / sample_rate);
    (1.0, -1.0, 0.0, 1.0 + k, k - 1.0, 0.0)
}
