//! Loading and exporting for roomscope.
//!
//! This crate provides:
//!
//! - **WAV input**: [`read_wav`] decodes any PCM or float WAV at its native
//!   rate and mixes it down to mono; [`load_signal`] wraps the result in an
//!   analysis [`Signal`](roomscope_analysis::Signal).
//! - **WAV output**: [`write_wav`] and [`write_signal`] for band-filtered
//!   signals.
//! - **CSV export**: decay curves, power spectra, and mel spectrograms for
//!   external plotting.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roomscope_io::load_signal;
//! use roomscope_analysis::analyze;
//!
//! let signal = load_signal("room.wav")?;
//! let rt60 = analyze(&signal)?;
//! println!("mid band RT60: {:.2} s", rt60.mid);
//! ```

pub mod export;
mod wav;

pub use export::{export_decay_curve_csv, export_mel_spectrogram_csv, export_power_spectrum_csv};
pub use wav::{
    WavFormat, WavInfo, WavSpec, load_signal, read_wav, read_wav_info, write_signal, write_wav,
};

use std::path::PathBuf;

/// Error types for loading and exporting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file decoded to zero sample frames.
    #[error("No audio frames in {}", .0.display())]
    EmptyFile(PathBuf),

    /// The decoded samples do not form a valid signal.
    #[error("Invalid audio in {}: {source}", path.display())]
    InvalidSignal {
        /// File the samples came from.
        path: PathBuf,
        /// Why the samples were rejected.
        source: roomscope_analysis::AnalysisError,
    },

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for loading and exporting.
pub type Result<T> = std::result::Result<T, Error>;
