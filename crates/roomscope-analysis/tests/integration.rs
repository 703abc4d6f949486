//! Integration tests for roomscope-analysis.
//!
//! Synthetic signals with known decay and spectral content are pushed through
//! the public API and checked against their analytical values.

use std::f64::consts::{LN_10, PI};

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use roomscope_analysis::{
    AnalysisConfig, AnalysisError, BandAnalysisPipeline, BandEdges, Cutoffs, FrequencyBand,
    Signal, analyze, bandpass, dominant_frequency, welch_psd,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sine under an exponential amplitude envelope `e^{-t/tau}`.
fn decaying_sine(freq_hz: f64, tau_secs: f64, sample_rate: u32, duration_secs: f64) -> Signal {
    let fs = f64::from(sample_rate);
    let num_samples = (duration_secs * fs) as usize;
    let samples = (0..num_samples)
        .map(|i| {
            let t = i as f64 / fs;
            (-t / tau_secs).exp() * (2.0 * PI * freq_hz * t).sin()
        })
        .collect();
    Signal::new(samples, sample_rate).unwrap()
}

/// Seeded white noise whose energy falls by 60 dB every `decay_secs`.
fn decaying_noise(decay_secs: f64, sample_rate: u32, duration_secs: f64, seed: u64) -> Signal {
    let fs = f64::from(sample_rate);
    let num_samples = (duration_secs * fs) as usize;
    let mut rng = StdRng::seed_from_u64(seed);
    let samples = (0..num_samples)
        .map(|i| {
            let t = i as f64 / fs;
            let envelope = 10.0_f64.powf(-3.0 * t / decay_secs);
            envelope * rng.random_range(-1.0..1.0)
        })
        .collect();
    Signal::new(samples, sample_rate).unwrap()
}

fn sine(freq_hz: f64, sample_rate: u32, duration_secs: f64) -> Signal {
    decaying_sine(freq_hz, f64::INFINITY, sample_rate, duration_secs)
}

fn bits(values: (f64, f64, f64)) -> (u64, u64, u64) {
    (values.0.to_bits(), values.1.to_bits(), values.2.to_bits())
}

// ===========================================================================
// 1. RT60 against analytical decay
// ===========================================================================

#[test]
fn decaying_sine_rt60_matches_time_constant() {
    // Energy falls as e^{-2t/tau}, so 60 dB takes 3·ln(10)·tau
    let tau = 0.05;
    let expected = 3.0 * LN_10 * tau;

    let signal = decaying_sine(1000.0, tau, 44100, 1.0);
    let rt60 = analyze(&signal).unwrap();

    assert!(
        (rt60.mid - expected).abs() / expected < 0.1,
        "mid RT60 {} s, expected about {expected} s",
        rt60.mid
    );
}

#[test]
fn decaying_sine_in_low_band() {
    let tau = 0.1;
    let expected = 3.0 * LN_10 * tau;

    let signal = decaying_sine(120.0, tau, 48000, 2.0);
    let rt60 = analyze(&signal).unwrap();

    assert!(
        (rt60.low - expected).abs() / expected < 0.15,
        "low RT60 {} s, expected about {expected} s",
        rt60.low
    );
}

#[test]
fn decaying_noise_scenario() {
    let signal = decaying_noise(0.3, 44100, 2.0, 0x5eed);
    let rt60 = analyze(&signal).unwrap();

    assert!(
        (0.2..=0.5).contains(&rt60.mid),
        "mid RT60 {} s outside 0.2..=0.5",
        rt60.mid
    );
    for (band, value) in rt60.iter() {
        assert!(!value.is_nan(), "{band} band RT60 is undefined");
        assert!(*value > 0.0, "{band} band RT60 is {value}");
    }
}

// ===========================================================================
// 2. Degenerate input
// ===========================================================================

#[test]
fn all_zero_signal_gives_nan_in_every_band() {
    let signal = Signal::new(vec![0.0; 44100], 44100).unwrap();
    let rt60 = analyze(&signal).unwrap();
    assert!(rt60.low.is_nan());
    assert!(rt60.mid.is_nan());
    assert!(rt60.high.is_nan());
}

#[test]
fn very_short_signals_do_not_fail() {
    for len in [1, 2, 5, 64] {
        let samples: Vec<f64> = (0..len).map(|i| if i == 0 { 1.0 } else { 0.0 }).collect();
        let signal = Signal::new(samples, 44100).unwrap();

        let rt60 = analyze(&signal).unwrap();
        for (band, value) in rt60.iter() {
            assert!(value.is_nan() || *value >= 0.0, "{band}: {value}");
        }

        let resonance = dominant_frequency(&signal);
        assert!(resonance.is_finite());
    }
}

#[test]
fn signal_constructor_rejects_empty_and_zero_rate() {
    assert!(matches!(
        Signal::new(Vec::new(), 44100),
        Err(AnalysisError::InvalidSignal(_))
    ));
    assert!(matches!(
        Signal::new(vec![0.0], 0),
        Err(AnalysisError::InvalidSignal(_))
    ));
}

// ===========================================================================
// 3. Band validation
// ===========================================================================

#[test]
fn low_sample_rate_rejects_high_band() {
    let signal = Signal::new(vec![0.1; 8000], 8000).unwrap();
    let err = analyze(&signal).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::InvalidBand {
            low_hz: 2000.0,
            high_hz: 20000.0,
            nyquist_hz: 4000.0,
        }
    );

    let pipeline = BandAnalysisPipeline::default();
    assert!(pipeline.analyze_detailed(&signal).is_err());
    assert!(pipeline.analyze_band(&signal, FrequencyBand::High).is_err());
}

#[test]
fn configured_bands_are_used() {
    let config = AnalysisConfig {
        bands: BandEdges {
            high: Cutoffs::new(2000.0, 3900.0),
            ..BandEdges::default()
        },
        ..AnalysisConfig::default()
    };
    let pipeline = BandAnalysisPipeline::new(&config).unwrap();
    let signal = decaying_sine(3000.0, 0.05, 8000, 1.0);

    let rt60 = pipeline.analyze(&signal).unwrap();
    assert!(!rt60.high.is_nan());
}

// ===========================================================================
// 4. Determinism and ordering
// ===========================================================================

#[test]
fn analyze_is_deterministic() {
    let signal = decaying_noise(0.3, 44100, 1.0, 42);
    let first = analyze(&signal).unwrap();
    let second = analyze(&signal).unwrap();
    assert_eq!(bits(first.to_tuple()), bits(second.to_tuple()));
}

#[test]
fn detailed_output_agrees_with_summary() {
    let signal = decaying_sine(500.0, 0.04, 22050, 0.5);
    let pipeline = BandAnalysisPipeline::default().with_bands(BandEdges {
        high: Cutoffs::new(2000.0, 10000.0),
        ..BandEdges::default()
    });

    let summary = pipeline.analyze(&signal).unwrap();
    let detailed = pipeline.analyze_detailed(&signal).unwrap();

    for band in FrequencyBand::ALL {
        let result = detailed.get(band);
        assert_eq!(summary.get(band).to_bits(), result.rt60.to_bits());
        assert_eq!(result.filtered.len(), signal.len());
        assert_eq!(result.decay.len(), 2 * signal.len() - 1);
    }
}

#[test]
fn results_serialize_by_band_name() {
    let signal = Signal::new(vec![0.0; 4410], 44100).unwrap();
    let rt60 = analyze(&signal).unwrap();
    let json = serde_json::to_value(rt60).unwrap();
    assert!(json["low"].is_null());
    assert!(json["mid"].is_null());
    assert!(json["high"].is_null());
}

// ===========================================================================
// 5. Resonance
// ===========================================================================

#[test]
fn dominant_frequency_of_pure_sines() {
    for (freq, rate) in [(440.0, 48000), (1000.0, 44100), (3150.0, 44100), (60.0, 16000)] {
        let signal = sine(freq, rate, 2.0);
        let bin_width = f64::from(rate) / 4096.0;
        let found = dominant_frequency(&signal);
        assert!(
            (found - freq).abs() <= bin_width,
            "{freq} Hz at {rate} Hz detected as {found} Hz"
        );
    }
}

#[test]
fn resonance_of_mixture_picks_strongest() {
    let rate = 44100;
    let weak = sine(300.0, rate, 1.0);
    let strong = sine(2500.0, rate, 1.0);
    let samples: Vec<f64> = weak
        .samples()
        .iter()
        .zip(strong.samples())
        .map(|(a, b)| 0.3 * a + b)
        .collect();
    let signal = Signal::new(samples, rate).unwrap();

    let psd = welch_psd(signal.samples(), f64::from(rate), 4096);
    let (peak, _) = psd.peak().unwrap();
    assert!((peak - 2500.0).abs() <= psd.bin_width());
}

// ===========================================================================
// 6. Filter length property
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bandpass_preserves_length(
        len in 1usize..3000,
        low in 10.0f64..5000.0,
        width in 1.1f64..4.0,
        order in 1usize..9,
    ) {
        let high = (low * width).min(21000.0);
        prop_assume!(high > low);

        let samples: Vec<f64> = (0..len).map(|i| ((i * 7) % 13) as f64 / 6.0 - 1.0).collect();
        let signal = Signal::new(samples, 44100).unwrap();
        let filtered = bandpass(&signal, low, high, order).unwrap();

        prop_assert_eq!(filtered.len(), len);
        prop_assert_eq!(filtered.sample_rate(), 44100);
        prop_assert!(filtered.samples().iter().all(|x| x.is_finite()));
    }
}
