//! Per-band RT60 pipeline.
//!
//! For each of Low, Mid and High the signal is band-pass filtered, turned
//! into a decay curve, and measured. Bands share nothing but the read-only
//! input, so with the `parallel` feature they run on the rayon pool; results
//! are always gathered into a [`PerBand`] and never depend on scheduling.
//!
//! All three filters are designed before any band is processed, so an
//! unusable band edge fails the whole call up front.
//!
//! # Example
//!
//! ```rust
//! use roomscope_analysis::{BandAnalysisPipeline, Signal};
//!
//! let silence = Signal::new(vec![0.0; 4410], 44100).unwrap();
//! let rt60 = BandAnalysisPipeline::default().analyze(&silence).unwrap();
//! assert!(rt60.low.is_nan() && rt60.mid.is_nan() && rt60.high.is_nan());
//! ```

use tracing::debug;

use crate::band::{BandEdges, FrequencyBand, PerBand};
use crate::config::AnalysisConfig;
use crate::decay::{DecayCurve, EnergyDecay};
use crate::error::Result;
use crate::filterbank::BandpassFilter;
use crate::rt60::Rt60Estimator;
use crate::signal::Signal;
use crate::spectrum::{PowerSpectrum, ResonanceDetector};

/// Everything computed for one band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandResult {
    /// Band-pass filtered copy of the input.
    pub filtered: Signal,
    /// Decay curve of the filtered signal.
    pub decay: DecayCurve,
    /// RT60 in seconds, NaN when undefined.
    pub rt60: f64,
}

/// Runs the band-split RT60 analysis and the resonance estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct BandAnalysisPipeline {
    bands: BandEdges,
    filter_order: usize,
    decay: EnergyDecay,
    rt60: Rt60Estimator,
    resonance: ResonanceDetector,
}

impl Default for BandAnalysisPipeline {
    fn default() -> Self {
        Self {
            bands: BandEdges::default(),
            filter_order: crate::config::DEFAULT_FILTER_ORDER,
            decay: EnergyDecay::default(),
            rt60: Rt60Estimator::default(),
            resonance: ResonanceDetector::default(),
        }
    }
}

impl BandAnalysisPipeline {
    /// Build a pipeline from a validated configuration.
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            bands: config.bands,
            filter_order: config.filter_order,
            decay: EnergyDecay::new(config.energy_floor),
            rt60: Rt60Estimator::new(config.decay_start_db, config.decay_end_db)?,
            resonance: ResonanceDetector::new(config.welch_segment_len),
        })
    }

    /// Replace the band edges.
    pub fn with_bands(mut self, bands: BandEdges) -> Self {
        self.bands = bands;
        self
    }

    /// Design the three band filters for `sample_rate`, in Low, Mid, High order.
    pub fn design_filters(&self, sample_rate: u32) -> Result<PerBand<BandpassFilter>> {
        PerBand::try_from_fn(|band| {
            BandpassFilter::design(self.bands.get(band), self.filter_order, sample_rate)
        })
    }

    /// Check that every band can be filtered at `sample_rate`.
    pub fn validate_for(&self, sample_rate: u32) -> Result<()> {
        self.design_filters(sample_rate).map(|_| ())
    }

    /// RT60 of each band, in seconds or NaN.
    pub fn analyze(&self, signal: &Signal) -> Result<PerBand<f64>> {
        let filters = self.design_filters(signal.sample_rate())?;
        run_bands(|band| {
            self.run_band(band, filters.get(band), signal)
                .map(|result| result.rt60)
        })
        .transpose()
    }

    /// Like [`analyze`](Self::analyze), also returning the filtered signals
    /// and decay curves for inspection.
    pub fn analyze_detailed(&self, signal: &Signal) -> Result<PerBand<BandResult>> {
        let filters = self.design_filters(signal.sample_rate())?;
        run_bands(|band| self.run_band(band, filters.get(band), signal)).transpose()
    }

    /// Analyze one band on its own.
    pub fn analyze_band(&self, signal: &Signal, band: FrequencyBand) -> Result<BandResult> {
        let filter =
            BandpassFilter::design(self.bands.get(band), self.filter_order, signal.sample_rate())?;
        self.run_band(band, &filter, signal)
    }

    /// Welch PSD of the unfiltered signal, as used for the resonance estimate.
    pub fn power_spectrum(&self, signal: &Signal) -> PowerSpectrum {
        self.resonance.spectrum(signal)
    }

    fn run_band(
        &self,
        band: FrequencyBand,
        filter: &BandpassFilter,
        signal: &Signal,
    ) -> Result<BandResult> {
        let cutoffs = filter.cutoffs();
        debug!(
            "{band} band: {}-{} Hz, order {}, {} samples",
            cutoffs.low_hz,
            cutoffs.high_hz,
            filter.order(),
            signal.len()
        );

        let filtered = filter.apply(signal)?;
        let decay = self.decay.compute(&filtered);
        let rt60 = self.rt60.estimate(&decay, signal.sample_rate());

        debug!("{band} band: {} curve points, rt60 = {rt60:.3} s", decay.len());

        Ok(BandResult {
            filtered,
            decay,
            rt60,
        })
    }
}

#[cfg(feature = "parallel")]
fn run_bands<T: Send>(f: impl Fn(FrequencyBand) -> T + Sync) -> PerBand<T> {
    let (low, (mid, high)) = rayon::join(
        || f(FrequencyBand::Low),
        || rayon::join(|| f(FrequencyBand::Mid), || f(FrequencyBand::High)),
    );
    PerBand { low, mid, high }
}

#[cfg(not(feature = "parallel"))]
fn run_bands<T>(f: impl Fn(FrequencyBand) -> T) -> PerBand<T> {
    PerBand::from_fn(f)
}

/// RT60 of each band with the default configuration.
pub fn analyze(signal: &Signal) -> Result<PerBand<f64>> {
    BandAnalysisPipeline::default().analyze(signal)
}
