//! Integration tests for the roomscope binary.

use roomscope_io::{WavSpec, write_wav};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Helper to get the path to the `roomscope` binary built by cargo.
fn roomscope_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_roomscope"));
    // Keep the user's real config file out of the tests.
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("roomscope-cli-tests"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Exponentially decaying 1 kHz tone, 1 s at 44.1 kHz.
fn write_decaying_tone(path: &Path) {
    let sr = 44100;
    let samples: Vec<f32> = (0..sr)
        .map(|i| {
            let t = i as f32 / sr as f32;
            (-t / 0.05).exp() * (2.0 * std::f32::consts::PI * 1000.0 * t).sin()
        })
        .collect();
    write_wav(path, &samples, WavSpec::default()).unwrap();
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

#[test]
fn cli_analyze_text_report() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tone.wav");
    write_decaying_tone(&input);

    let output = roomscope_bin()
        .args(["analyze", input.to_str().unwrap()])
        .output()
        .expect("failed to run roomscope analyze");

    assert!(
        output.status.success(),
        "roomscope analyze failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Duration:   0:01.000 (44100 Hz)"), "{stdout}");
    assert!(stdout.contains("Resonance:"));
    for band in ["low", "mid", "high"] {
        assert!(stdout.contains(band), "report should list '{band}'");
    }
}

#[test]
fn cli_analyze_json_report() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tone.wav");
    write_decaying_tone(&input);

    let output = roomscope_bin()
        .args(["analyze", input.to_str().unwrap(), "--json"])
        .output()
        .expect("failed to run roomscope analyze --json");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["sample_rate"], 44100);
    assert_eq!(report["target_rt60_secs"], 0.5);

    // 3 ln(10) * 0.05 s
    let expected = 3.0 * std::f64::consts::LN_10 * 0.05;
    let mid = report["rt60_secs"]["mid"].as_f64().unwrap();
    assert!((mid - expected).abs() / expected < 0.1, "mid RT60 {mid}");

    let deviation = report["deviation_secs"]["mid"].as_f64().unwrap();
    assert!((deviation - (mid - 0.5)).abs() < 1e-12);

    let resonance = report["resonance_hz"].as_f64().unwrap();
    assert!((resonance - 1000.0).abs() < 11.0, "resonance {resonance}");
}

#[test]
fn cli_analyze_silence_reports_null() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("silence.wav");
    write_wav(&input, &vec![0.0; 4410], WavSpec::default()).unwrap();

    let output = roomscope_bin()
        .args(["analyze", input.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    for band in ["low", "mid", "high"] {
        assert!(report["rt60_secs"][band].is_null());
        assert!(report["deviation_secs"][band].is_null());
    }

    let text = roomscope_bin()
        .args(["analyze", input.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&text.stdout).contains("n/a"));
}

#[test]
fn cli_analyze_low_sample_rate_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("phone.wav");
    let spec = WavSpec {
        sample_rate: 8000,
        ..WavSpec::default()
    };
    write_wav(&input, &vec![0.1; 8000], spec).unwrap();

    let output = roomscope_bin()
        .args(["analyze", input.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Nyquist"), "stderr: {stderr}");
}

#[test]
fn cli_analyze_with_config_override() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("phone.wav");
    let spec = WavSpec {
        sample_rate: 8000,
        ..WavSpec::default()
    };
    write_wav(&input, &vec![0.1; 8000], spec).unwrap();

    let config = dir.path().join("narrow.toml");
    std::fs::write(&config, "[bands.high]\nlow_hz = 2000.0\nhigh_hz = 3900.0\n").unwrap();

    let output = roomscope_bin()
        .args([
            "analyze",
            input.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn cli_analyze_writes_spectrum() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tone.wav");
    let csv = dir.path().join("psd.csv");
    write_decaying_tone(&input);

    let output = roomscope_bin()
        .args([
            "analyze",
            input.to_str().unwrap(),
            "--spectrum",
            csv.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = std::fs::read_to_string(&csv).unwrap();
    // 4096-sample segments: 2049 one-sided bins plus the header.
    assert_eq!(text.lines().count(), 2050);
}

#[test]
fn cli_analyze_missing_file_fails() {
    let output = roomscope_bin()
        .args(["analyze", "/nonexistent/recording.wav"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// info / bands / spectrogram
// ---------------------------------------------------------------------------

#[test]
fn cli_info_shows_metadata() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tone.wav");
    write_decaying_tone(&input);

    let output = roomscope_bin()
        .args(["info", input.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("IEEE float 32-bit"));
    assert!(stdout.contains("Sample Rate: 44100 Hz"));
    assert!(stdout.contains("44100 frames"));
}

#[test]
fn cli_bands_exports_every_band() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tone.wav");
    let out_dir = dir.path().join("bands");
    write_decaying_tone(&input);

    let output = roomscope_bin()
        .args([
            "bands",
            input.to_str().unwrap(),
            "--output-dir",
            out_dir.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    for band in ["low", "mid", "high"] {
        let wav = out_dir.join(format!("{band}.wav"));
        let (samples, spec) = roomscope_io::read_wav(&wav).unwrap();
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(samples.len(), 44100);

        let csv = std::fs::read_to_string(out_dir.join(format!("{band}_decay.csv"))).unwrap();
        assert!(csv.starts_with("index,lag_s,level_db"));
        assert_eq!(csv.lines().count(), 2 * 44100 - 1 + 1);
    }
}

#[test]
fn cli_spectrogram_writes_csv() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tone.wav");
    let csv = dir.path().join("mel.csv");
    write_decaying_tone(&input);

    let output = roomscope_bin()
        .args([
            "spectrogram",
            input.to_str().unwrap(),
            "--output",
            csv.to_str().unwrap(),
            "--mel-bins",
            "40",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = std::fs::read_to_string(&csv).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next().unwrap().split(',').count(), 41);
    // (44100 - 1024) / 1024 + 1 frames
    assert_eq!(lines.count(), 43);
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn cli_config_init_then_show() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("analysis.toml");

    let init = roomscope_bin()
        .args(["config", "init", "--output", path.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(init.status.success());
    assert!(path.is_file());

    let again = roomscope_bin()
        .args(["config", "init", "--output", path.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!again.status.success(), "init must not overwrite without --force");

    let show = roomscope_bin()
        .args(["config", "show", "--config", path.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(show.status.success());
    let stdout = String::from_utf8_lossy(&show.stdout);
    assert!(stdout.contains("filter_order = 4"));
    assert!(stdout.contains("decay_end_db = -65.0"));
}

#[test]
fn cli_config_show_defaults() {
    let output = roomscope_bin().args(["config", "show"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("# source: built-in defaults"));
}
