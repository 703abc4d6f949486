//! Error types for the analysis pipeline.
//!
//! Only configuration-shaped problems are errors. A decay curve that never
//! crosses the measurement thresholds is a normal outcome and is reported as
//! an `f64::NAN` RT60, not through this type.

use thiserror::Error;

/// Errors raised while designing filters or validating analysis inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Band edges are non-positive, inverted, or at/above the Nyquist frequency.
    #[error(
        "invalid band {low_hz}-{high_hz} Hz: edges must satisfy 0 < low < high < Nyquist ({nyquist_hz} Hz)"
    )]
    InvalidBand {
        /// Requested lower edge in Hz.
        low_hz: f64,
        /// Requested upper edge in Hz.
        high_hz: f64,
        /// Nyquist frequency of the signal being filtered.
        nyquist_hz: f64,
    },

    /// Butterworth order must be at least one.
    #[error("filter order must be at least 1, got {0}")]
    InvalidOrder(usize),

    /// The signal violates its construction invariants.
    #[error("invalid signal: {0}")]
    InvalidSignal(String),

    /// A tunable is inconsistent with the others or out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
