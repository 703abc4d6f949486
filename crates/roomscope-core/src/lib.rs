//! Roomscope Core - filter primitives for room acoustics analysis
//!
//! The building blocks used by `roomscope-analysis` to split a recording into
//! frequency bands. Everything is evaluated in `f64`: the analysis runs once
//! over a fully-buffered signal, so precision matters more than throughput.
//!
//! ## Filters
//!
//! - [`Biquad`] - Second-order section with RBJ cookbook coefficients
//! - [`ButterworthBandpass`] - Butterworth band-pass as a cascade of sections
//! - [`butterworth_q_factors`] - Section Q values for any Butterworth order
//!
//! ## Utilities
//!
//! - Level conversions: [`power_to_db`], [`amplitude_to_db`], [`db_to_power`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc` for the section list).
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! roomscope-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use roomscope_core::ButterworthBandpass;
//!
//! let mut mid = ButterworthBandpass::new(250.0, 2000.0, 4, 44100.0);
//! let filtered = mid.process_buffer(&[0.0, 1.0, 0.0, -1.0]);
//! assert_eq!(filtered.len(), 4);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod biquad;
pub mod butterworth;
pub mod math;

pub use biquad::{
    Biquad, SectionCoefficients, first_order_highpass_coefficients,
    first_order_lowpass_coefficients, highpass_coefficients, lowpass_coefficients,
};
pub use butterworth::{ButterworthBandpass, butterworth_q_factors};
pub use math::{POWER_FLOOR, amplitude_to_db, db_to_power, power_to_db};
