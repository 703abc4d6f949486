//! Criterion benchmarks for roomscope-analysis components
//!
//! Run with: cargo bench -p roomscope-analysis
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use roomscope_analysis::{
    BandAnalysisPipeline, EnergyDecay, Signal, SpectrogramConfig, autocorrelation,
    mel_spectrogram_db, welch_psd,
};

const SAMPLE_RATE: u32 = 44100;

/// Xorshift noise under an exponential envelope, 60 dB down after 0.3 s
fn generate_decaying_noise(size: usize) -> Vec<f64> {
    let mut state = 0x1234_5678_u32;
    (0..size)
        .map(|i| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = f64::from(state as i32) / f64::from(i32::MAX);
            let t = i as f64 / f64::from(SAMPLE_RATE);
            noise * 10.0_f64.powf(-10.0 * t)
        })
        .collect()
}

fn bench_autocorrelation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Autocorrelation");

    for &size in &[4410usize, 44100, 88200] {
        let input = generate_decaying_noise(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(autocorrelation(black_box(&input))));
        });
    }

    group.finish();
}

fn bench_decay_curve(c: &mut Criterion) {
    let input = generate_decaying_noise(44100);
    let decay = EnergyDecay::default();

    c.bench_function("DecayCurve/44100", |b| {
        b.iter(|| black_box(decay.compute_slice(black_box(&input))));
    });
}

fn bench_welch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Welch_PSD");

    for &segment in &[1024usize, 4096] {
        let input = generate_decaying_noise(88200);
        group.bench_with_input(BenchmarkId::from_parameter(segment), &segment, |b, &segment| {
            b.iter(|| black_box(welch_psd(black_box(&input), f64::from(SAMPLE_RATE), segment)));
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pipeline");
    group.sample_size(10);

    for &seconds in &[1usize, 2] {
        let signal =
            Signal::new(generate_decaying_noise(seconds * SAMPLE_RATE as usize), SAMPLE_RATE)
                .unwrap();
        let pipeline = BandAnalysisPipeline::default();

        group.bench_with_input(BenchmarkId::new("analyze", seconds), &seconds, |b, _| {
            b.iter(|| black_box(pipeline.analyze(black_box(&signal))));
        });
    }

    group.finish();
}

fn bench_mel_spectrogram(c: &mut Criterion) {
    let signal = Signal::new(generate_decaying_noise(88200), SAMPLE_RATE).unwrap();
    let config = SpectrogramConfig::default();

    c.bench_function("MelSpectrogram/2s", |b| {
        b.iter(|| black_box(mel_spectrogram_db(black_box(&signal), &config)));
    });
}

criterion_group!(
    benches,
    bench_autocorrelation,
    bench_decay_curve,
    bench_welch,
    bench_pipeline,
    bench_mel_spectrogram,
);
criterion_main!(benches);
