//! Analysis tunables and their defaults.
//!
//! Every threshold the pipeline uses is a named constant here. The
//! [`AnalysisConfig`] struct carries them at runtime so tests and config files
//! can override any of them.

use serde::{Deserialize, Serialize};

use crate::band::{BandEdges, Cutoffs};
use crate::error::{AnalysisError, Result};

/// Default Low band: room modes and bass build-up.
pub const LOW_BAND: Cutoffs = Cutoffs::new(20.0, 250.0);

/// Default Mid band: speech intelligibility range.
pub const MID_BAND: Cutoffs = Cutoffs::new(250.0, 2000.0);

/// Default High band: up to the nominal limit of hearing.
pub const HIGH_BAND: Cutoffs = Cutoffs::new(2000.0, 20000.0);

/// Butterworth order of each half of the band-pass cascade.
pub const DEFAULT_FILTER_ORDER: usize = 4;

/// Start of the measured decay. The first few dB are dominated by direct-path
/// energy and are skipped.
pub const DECAY_START_DB: f64 = -5.0;

/// End of the measured decay; 60 dB below [`DECAY_START_DB`].
pub const DECAY_END_DB: f64 = -65.0;

/// Energy floor applied before taking logarithms (-100 dB).
pub const ENERGY_FLOOR: f64 = 1e-10;

/// Welch segment length in samples.
pub const WELCH_SEGMENT_LEN: usize = 4096;

/// Fraction of each Welch segment shared with the next.
pub const WELCH_OVERLAP: f64 = 0.5;

/// Reverberation time the report compares each band against.
pub const TARGET_RT60_SECS: f64 = 0.5;

/// Spectrogram FFT size.
pub const SPECTROGRAM_FFT_SIZE: usize = 1024;

/// Spectrogram hop between frames.
pub const SPECTROGRAM_HOP_SIZE: usize = 1024;

/// Number of mel bands in the spectrogram.
pub const SPECTROGRAM_MEL_BINS: usize = 128;

/// Dynamic range kept below the loudest spectrogram cell.
pub const SPECTROGRAM_TOP_DB: f64 = 80.0;

/// Settings of the mel spectrogram used for visualization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrogramConfig {
    /// FFT size of each frame.
    pub fft_size: usize,
    /// Samples between frame starts.
    pub hop_size: usize,
    /// Number of mel bands.
    pub num_mel_bins: usize,
    /// Cells further than this below the maximum are clipped.
    pub top_db: f64,
}

impl Default for SpectrogramConfig {
    fn default() -> Self {
        Self {
            fft_size: SPECTROGRAM_FFT_SIZE,
            hop_size: SPECTROGRAM_HOP_SIZE,
            num_mel_bins: SPECTROGRAM_MEL_BINS,
            top_db: SPECTROGRAM_TOP_DB,
        }
    }
}

/// All analysis tunables.
///
/// Missing fields in a deserialized config fall back to the defaults above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Band edges in Hz.
    pub bands: BandEdges,
    /// Butterworth order of each half of the band-pass cascade.
    pub filter_order: usize,
    /// First decay-curve level (dB) of the RT60 measurement window.
    pub decay_start_db: f64,
    /// Last decay-curve level (dB) of the RT60 measurement window.
    pub decay_end_db: f64,
    /// Floor applied to energies before the dB conversion.
    pub energy_floor: f64,
    /// Welch segment length for the resonance estimate.
    pub welch_segment_len: usize,
    /// Reference RT60 for deviation reporting, in seconds.
    pub target_rt60_secs: f64,
    /// Visualization spectrogram settings.
    pub spectrogram: SpectrogramConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            bands: BandEdges::default(),
            filter_order: DEFAULT_FILTER_ORDER,
            decay_start_db: DECAY_START_DB,
            decay_end_db: DECAY_END_DB,
            energy_floor: ENERGY_FLOOR,
            welch_segment_len: WELCH_SEGMENT_LEN,
            target_rt60_secs: TARGET_RT60_SECS,
            spectrogram: SpectrogramConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Check the tunables against each other.
    ///
    /// Band edges depend on the sampling rate and are checked when the
    /// filters are designed instead.
    pub fn validate(&self) -> Result<()> {
        if self.filter_order == 0 {
            return Err(AnalysisError::InvalidOrder(0));
        }
        if !(self.decay_start_db.is_finite() && self.decay_end_db.is_finite()) {
            return Err(invalid("decay thresholds must be finite"));
        }
        if self.decay_end_db >= self.decay_start_db {
            return Err(invalid(format!(
                "decay_end_db ({}) must be below decay_start_db ({})",
                self.decay_end_db, self.decay_start_db
            )));
        }
        if !(self.energy_floor > 0.0 && self.energy_floor < 1.0) {
            return Err(invalid("energy_floor must be in (0, 1)"));
        }
        if self.welch_segment_len == 0 {
            return Err(invalid("welch_segment_len must be at least 1"));
        }
        if !self.target_rt60_secs.is_finite() {
            return Err(invalid("target_rt60_secs must be finite"));
        }

        self.spectrogram.validate()
    }
}

impl SpectrogramConfig {
    /// Check that the frame layout and dB range are usable.
    pub fn validate(&self) -> Result<()> {
        if self.fft_size < 2 {
            return Err(invalid("spectrogram.fft_size must be at least 2"));
        }
        if self.hop_size == 0 {
            return Err(invalid("spectrogram.hop_size must be at least 1"));
        }
        if self.num_mel_bins == 0 {
            return Err(invalid("spectrogram.num_mel_bins must be at least 1"));
        }
        if self.top_db.is_nan() || self.top_db <= 0.0 {
            return Err(invalid("spectrogram.top_db must be positive"));
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> AnalysisError {
    AnalysisError::InvalidConfig(reason.into())
}
