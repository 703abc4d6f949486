//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use roomscope_analysis::{AnalysisConfig, Signal};
use roomscope_config::{ConfigSource, load_or_default};
use roomscope_io::load_signal;
use std::path::Path;
use tracing::info;

/// Resolve the configuration from `--config` or the user config file.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    let (config, source) = load_or_default(explicit).context("loading configuration")?;
    if let ConfigSource::File(path) = &source {
        info!("using configuration from {}", path.display());
    }
    Ok(config)
}

/// Load a WAV file as an analysis signal.
pub fn load_input(path: &Path) -> anyhow::Result<Signal> {
    load_signal(path).with_context(|| format!("loading {}", path.display()))
}

/// Format a duration as `m:ss.sss`.
pub fn format_duration(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "n/a".to_string();
    }
    let minutes = (secs / 60.0).floor();
    let rest = secs - minutes * 60.0;
    format!("{}:{:06.3}", minutes as u64, rest)
}

/// Format seconds with two decimals, or `n/a` for NaN.
pub fn format_secs(secs: f64) -> String {
    if secs.is_nan() {
        "n/a".to_string()
    } else {
        format!("{secs:.2} s")
    }
}
