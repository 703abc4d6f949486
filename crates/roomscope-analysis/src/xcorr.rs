//! Full linear autocorrelation via the FFT.
//!
//! The autocorrelation of `x` with itself is the linear convolution of `x`
//! with its time reversal:
//!
//! ```text
//! R(τ) = Σ_n x[n] · x[n + τ],   τ = -(N-1) ..= N-1
//! ```
//!
//! It is computed as `IFFT(|X(f)|²)` with zero padding to at least `2N - 1`
//! points so the circular result holds no wrap-around.
//!
//! # Reference
//!
//! Oppenheim & Schafer, "Discrete-Time Signal Processing" (3rd ed.), §2.8.

use rustfft::num_complex::Complex;

use crate::fft::Fft;

/// Inputs up to this length skip the FFT.
const DIRECT_MAX_LEN: usize = 64;

/// Full autocorrelation of `x`.
///
/// Returns `2 * x.len() - 1` values laid out as
/// `[R(-(N-1)), …, R(0), …, R(N-1)]`, so the zero-lag peak sits at index
/// `N - 1`. An empty input yields an empty output.
///
/// # Example
///
/// ```rust
/// use roomscope_analysis::xcorr::autocorrelation;
///
/// let r = autocorrelation(&[1.0, 2.0, 3.0]);
/// let expected = [3.0, 8.0, 14.0, 8.0, 3.0];
/// for (a, b) in r.iter().zip(expected) {
///     assert!((a - b).abs() < 1e-9);
/// }
/// ```
pub fn autocorrelation(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    if n <= DIRECT_MAX_LEN {
        return autocorrelation_direct(x);
    }

    let out_len = 2 * n - 1;
    let fft_size = out_len.next_power_of_two();
    let fft = Fft::new(fft_size);

    let mut buffer: Vec<Complex<f64>> = x.iter().map(|&v| Complex::new(v, 0.0)).collect();
    buffer.resize(fft_size, Complex::new(0.0, 0.0));

    fft.forward_complex(&mut buffer);
    for c in &mut buffer {
        *c = Complex::new(c.norm_sqr(), 0.0);
    }
    fft.inverse_complex(&mut buffer);

    // Circular layout: lag τ >= 0 at index τ, lag τ < 0 at fft_size + τ.
    let mut result = Vec::with_capacity(out_len);
    result.extend(buffer[fft_size - (n - 1)..].iter().map(|c| c.re));
    result.extend(buffer[..n].iter().map(|c| c.re));
    result
}

/// Direct O(N²) autocorrelation with the same layout as [`autocorrelation`].
///
/// [`autocorrelation`] falls back to this for inputs of at most 64 samples.
pub fn autocorrelation_direct(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    if n == 0 {
        return Vec::new();
    }

    (0..2 * n - 1)
        .map(|out_i| {
            let lag = out_i.abs_diff(n - 1);
            x[..n - lag]
                .iter()
                .zip(&x[lag..])
                .map(|(a, b)| a * b)
                .sum()
        })
        .collect()
}
