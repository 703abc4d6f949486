//! Reverberation time from a decay curve.
//!
//! RT60 is measured between the first point at or below -5 dB and the first
//! point at or below -65 dB. Skipping the first 5 dB keeps the direct-path
//! energy out of the estimate while still spanning the 60 dB of the standard
//! definition.
//!
//! A curve that never reaches one of the thresholds has no RT60. That is an
//! ordinary outcome for silent or very short input and is returned as
//! `f64::NAN`, never as an error and never as zero.

use tracing::debug;

use crate::config::{DECAY_END_DB, DECAY_START_DB};
use crate::decay::DecayCurve;
use crate::error::{AnalysisError, Result};

/// Measures RT60 between two fixed decay levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rt60Estimator {
    start_db: f64,
    end_db: f64,
}

impl Default for Rt60Estimator {
    fn default() -> Self {
        Self {
            start_db: DECAY_START_DB,
            end_db: DECAY_END_DB,
        }
    }
}

impl Rt60Estimator {
    /// Create an estimator measuring from `start_db` down to `end_db`.
    ///
    /// Both must be finite and `end_db` must lie below `start_db`.
    pub fn new(start_db: f64, end_db: f64) -> Result<Self> {
        if !(start_db.is_finite() && end_db.is_finite()) || end_db >= start_db {
            return Err(AnalysisError::InvalidConfig(format!(
                "decay window {start_db} dB to {end_db} dB must be finite and descending"
            )));
        }
        Ok(Self { start_db, end_db })
    }

    /// Upper threshold in dB.
    pub fn start_db(&self) -> f64 {
        self.start_db
    }

    /// Lower threshold in dB.
    pub fn end_db(&self) -> f64 {
        self.end_db
    }

    /// RT60 in seconds, or NaN when the curve misses a threshold.
    pub fn estimate(&self, curve: &DecayCurve, sample_rate: u32) -> f64 {
        estimate_rt60(curve, sample_rate, self.start_db, self.end_db)
    }
}

/// RT60 in seconds between the first crossings of `start_db` and `end_db`.
///
/// Both crossings come from a linear scan from index 0; the curve is not
/// assumed monotonic and no interpolation is done. Returns NaN when either
/// crossing is missing or `sample_rate` is zero.
///
/// ```rust
/// use roomscope_analysis::decay::DecayCurve;
/// use roomscope_analysis::rt60::estimate_rt60;
///
/// let curve = DecayCurve::from_levels(vec![0.0, -10.0, -30.0, -70.0]);
/// assert_eq!(estimate_rt60(&curve, 2, -5.0, -65.0), 1.0);
///
/// let shallow = DecayCurve::from_levels(vec![0.0, -10.0, -30.0]);
/// assert!(estimate_rt60(&shallow, 2, -5.0, -65.0).is_nan());
/// ```
pub fn estimate_rt60(curve: &DecayCurve, sample_rate: u32, start_db: f64, end_db: f64) -> f64 {
    if sample_rate == 0 {
        return f64::NAN;
    }

    let start = curve.first_index_at_or_below(start_db);
    let end = curve.first_index_at_or_below(end_db);

    match (start, end) {
        (Some(start), Some(end)) => (end as f64 - start as f64) / f64::from(sample_rate),
        _ => {
            debug!(
                "decay curve never crosses {start_db} dB and {end_db} dB (lowest {:.1} dB), RT60 undefined",
                curve.min_db()
            );
            f64::NAN
        }
    }
}

/// Signed difference of `rt60` from `target_secs`. NaN in gives NaN out.
///
/// ```rust
/// use roomscope_analysis::rt60::rt60_deviation;
///
/// assert!((rt60_deviation(0.62, 0.5) - 0.12).abs() < 1e-12);
/// assert!(rt60_deviation(f64::NAN, 0.5).is_nan());
/// ```
pub fn rt60_deviation(rt60: f64, target_secs: f64) -> f64 {
    rt60 - target_secs
}

/// Format a deviation to two decimals, or `n/a` for NaN.
///
/// Values that round to a positive number carry a `+`. Anything that rounds
/// to zero prints as `0.00` without a sign.
///
/// ```rust
/// use roomscope_analysis::rt60::format_deviation;
///
/// assert_eq!(format_deviation(0.123), "+0.12");
/// assert_eq!(format_deviation(-0.5), "-0.50");
/// assert_eq!(format_deviation(0.0), "0.00");
/// assert_eq!(format_deviation(f64::NAN), "n/a");
/// ```
pub fn format_deviation(deviation: f64) -> String {
    if deviation.is_nan() {
        return "n/a".to_string();
    }
    let rounded = (deviation * 100.0).round() / 100.0;
    if rounded > 0.0 {
        format!("+{rounded:.2}")
    } else {
        // Adding zero turns -0.0 into 0.0.
        format!("{:.2}", rounded + 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_decay(db_per_sample: f64, len: usize) -> DecayCurve {
        DecayCurve::from_levels((0..len).map(|i| -(i as f64) * db_per_sample).collect())
    }

    #[test]
    fn test_linear_decay() {
        // 0.25 dB per sample: -5 dB at 20, -65 dB at 260
        let curve = linear_decay(0.25, 400);
        let rt60 = Rt60Estimator::default().estimate(&curve, 40);
        assert!((rt60 - 6.0).abs() < 1e-9, "rt60 = {rt60}");
    }

    #[test]
    fn test_uses_first_crossing_despite_rebound() {
        let curve = DecayCurve::from_levels(vec![0.0, -5.0, 2.0, -20.0, -65.0, -10.0, -80.0]);
        assert_eq!(estimate_rt60(&curve, 1, -5.0, -65.0), 3.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let curve = DecayCurve::from_levels(vec![-5.0, -65.0]);
        assert_eq!(estimate_rt60(&curve, 10, -5.0, -65.0), 0.1);
    }

    #[test]
    fn test_missing_end_is_nan() {
        let curve = linear_decay(0.25, 200);
        assert!(Rt60Estimator::default().estimate(&curve, 40).is_nan());
    }

    #[test]
    fn test_flat_curve_is_nan() {
        let curve = DecayCurve::from_levels(vec![0.0; 100]);
        assert!(Rt60Estimator::default().estimate(&curve, 44100).is_nan());
    }

    #[test]
    fn test_empty_curve_is_nan() {
        let curve = DecayCurve::from_levels(Vec::new());
        assert!(Rt60Estimator::default().estimate(&curve, 44100).is_nan());
    }

    #[test]
    fn test_zero_rate_is_nan() {
        let curve = linear_decay(1.0, 100);
        assert!(estimate_rt60(&curve, 0, -5.0, -65.0).is_nan());
    }

    #[test]
    fn test_rejects_non_descending_window() {
        assert!(Rt60Estimator::new(-65.0, -5.0).is_err());
        assert!(Rt60Estimator::new(-5.0, -5.0).is_err());
        assert!(Rt60Estimator::new(f64::NAN, -65.0).is_err());
        assert!(Rt60Estimator::new(-5.0, -35.0).is_ok());
    }

    #[test]
    fn test_custom_window() {
        let curve = linear_decay(0.25, 400);
        let t30 = Rt60Estimator::new(-5.0, -35.0).unwrap().estimate(&curve, 40);
        assert!((t30 - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_deviation_sign() {
        assert_eq!(format_deviation(rt60_deviation(0.5, 0.5)), "0.00");
        assert_eq!(format_deviation(rt60_deviation(0.25, 0.5)), "-0.25");
    }

    #[test]
    fn test_deviation_rounding_to_zero_is_unsigned() {
        assert_eq!(format_deviation(-0.001), "0.00");
        assert_eq!(format_deviation(-0.0), "0.00");
        assert_eq!(format_deviation(0.004), "0.00");
        assert_eq!(format_deviation(0.006), "+0.01");
        assert_eq!(format_deviation(-0.006), "-0.01");
    }
}
