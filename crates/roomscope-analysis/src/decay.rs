//! Energy decay curves by Schroeder backward integration.
//!
//! The band-limited recording is autocorrelated with itself, which stands in
//! for the room's impulse response without needing a separate excitation
//! signal. The squared, peak-normalized autocorrelation is then integrated
//! backwards in time, so each point of the curve holds the energy that
//! remains from that instant to the end.
//!
//! ```text
//! r[n]   = R(n) / max|R|
//! E[n]   = Σ_{k ≥ n} r[k]²
//! L[n]   = 10 · log10(max(E[n] / max(E), floor))   dB
//! ```
//!
//! # Reference
//!
//! M. R. Schroeder, "New Method of Measuring Reverberation Time",
//! J. Acoust. Soc. Am. 37 (1965).

use roomscope_core::power_to_db;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ENERGY_FLOOR;
use crate::signal::Signal;
use crate::xcorr::autocorrelation;

/// Decibel levels of remaining energy, one per autocorrelation lag.
///
/// For an `N`-sample band signal the curve has `2N - 1` points. It is
/// non-increasing in expectation, but nothing here enforces that; consumers
/// must tolerate local bumps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecayCurve {
    levels_db: Vec<f64>,
}

impl DecayCurve {
    /// Wrap precomputed dB levels.
    pub fn from_levels(levels_db: Vec<f64>) -> Self {
        Self { levels_db }
    }

    /// Levels in dB.
    pub fn as_slice(&self) -> &[f64] {
        &self.levels_db
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.levels_db.len()
    }

    /// True for a curve with no points.
    pub fn is_empty(&self) -> bool {
        self.levels_db.is_empty()
    }

    /// Index of the first point at or below `threshold_db`, scanning from the start.
    ///
    /// Later crossings after a local rise are never considered.
    pub fn first_index_at_or_below(&self, threshold_db: f64) -> Option<usize> {
        self.levels_db.iter().position(|&level| level <= threshold_db)
    }

    /// Lowest level on the curve.
    pub fn min_db(&self) -> f64 {
        self.levels_db.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

/// Backward cumulative sum: `out[n] = Σ_{k ≥ n} energy[k]`.
///
/// ```rust
/// use roomscope_analysis::decay::schroeder_integral;
///
/// assert_eq!(schroeder_integral(&[1.0, 2.0, 3.0]), vec![6.0, 5.0, 3.0]);
/// ```
pub fn schroeder_integral(energy: &[f64]) -> Vec<f64> {
    let mut integral = Vec::with_capacity(energy.len());
    let mut remaining = 0.0;

    for &e in energy.iter().rev() {
        remaining += e;
        integral.push(remaining);
    }

    integral.reverse();
    integral
}

/// Computes [`DecayCurve`]s with a fixed energy floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyDecay {
    floor: f64,
}

impl Default for EnergyDecay {
    fn default() -> Self {
        Self::new(ENERGY_FLOOR)
    }
}

impl EnergyDecay {
    /// Create with the given floor, a power ratio in `(0, 1)`.
    pub fn new(floor: f64) -> Self {
        Self { floor }
    }

    /// Energy floor as a power ratio.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Decay curve of a band-limited signal.
    pub fn compute(&self, band_signal: &Signal) -> DecayCurve {
        self.compute_slice(band_signal.samples())
    }

    /// Decay curve of raw samples. An empty slice yields an empty curve.
    pub fn compute_slice(&self, samples: &[f64]) -> DecayCurve {
        // Scaling to unit peak keeps |X(f)|² finite for large inputs; the
        // curve is invariant to the input gain.
        let amplitude = samples.iter().fold(0.0_f64, |acc, &x| acc.max(x.abs()));
        let mut correlation = if amplitude > 0.0 && amplitude.is_finite() {
            let scaled: Vec<f64> = samples.iter().map(|&x| x / amplitude).collect();
            autocorrelation(&scaled)
        } else {
            autocorrelation(samples)
        };

        let peak = correlation.iter().fold(0.0_f64, |acc, &r| acc.max(r.abs()));
        if peak > 0.0 {
            for r in &mut correlation {
                *r /= peak;
            }
        } else {
            debug!("autocorrelation is identically zero, decay curve will be flat");
        }

        let energy: Vec<f64> = correlation.iter().map(|r| r * r).collect();
        let mut integral = schroeder_integral(&energy);
        for e in &mut integral {
            *e = e.max(self.floor);
        }

        let max_energy = integral.iter().copied().fold(0.0_f64, f64::max);
        let levels_db = integral
            .iter()
            .map(|&e| power_to_db(e / max_energy, self.floor))
            .collect();

        DecayCurve { levels_db }
    }
}

/// Decay curve of `band_signal` with the given energy floor.
pub fn decay_curve(band_signal: &Signal, floor: f64) -> DecayCurve {
    EnergyDecay::new(floor).compute(band_signal)
}
