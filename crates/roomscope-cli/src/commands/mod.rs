//! CLI command implementations.

pub mod analyze;
pub mod bands;
pub mod common;
pub mod config;
pub mod info;
pub mod spectrogram;
