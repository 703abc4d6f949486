//! Level conversions used by the decay and spectral code.
//!
//! Everything here is allocation-free and `no_std`.

use libm::{log10, pow};

/// Smallest power ratio considered distinct from silence (-100 dB).
pub const POWER_FLOOR: f64 = 1e-10;

/// Convert a power ratio to decibels, clamping at `floor` first.
///
/// ```rust
/// use roomscope_core::power_to_db;
///
/// assert_eq!(power_to_db(1.0, 1e-10), 0.0);
/// assert!((power_to_db(0.5, 1e-10) + 3.0103).abs() < 1e-4);
/// assert_eq!(power_to_db(0.0, 1e-10), -100.0);
/// ```
#[inline]
pub fn power_to_db(power: f64, floor: f64) -> f64 {
    10.0 * log10(power.max(floor))
}

/// Convert an amplitude ratio to decibels, clamping at `floor` first.
///
/// ```rust
/// use roomscope_core::amplitude_to_db;
///
/// assert!((amplitude_to_db(0.5, 1e-5) + 6.0206).abs() < 1e-4);
/// assert_eq!(amplitude_to_db(0.0, 1e-5), -100.0);
/// ```
#[inline]
pub fn amplitude_to_db(amplitude: f64, floor: f64) -> f64 {
    20.0 * log10(amplitude.max(floor))
}

/// Convert decibels back to a power ratio.
#[inline]
pub fn db_to_power(db: f64) -> f64 {
    pow(10.0, db / 10.0)
}
