//! Loading and saving [`AnalysisConfig`] as TOML.

use roomscope_analysis::AnalysisConfig;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::ConfigError;
use crate::paths::{default_config_path, ensure_parent_dir};

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from this file.
    File(PathBuf),
    /// No file was found; built-in defaults are in use.
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Parse and validate a configuration from a TOML string.
///
/// Fields missing from the document keep their default values.
pub fn config_from_toml(toml_str: &str) -> Result<AnalysisConfig, ConfigError> {
    let config: AnalysisConfig = toml::from_str(toml_str)?;
    config.validate()?;
    Ok(config)
}

/// Serialize a configuration to pretty TOML.
pub fn config_to_toml(config: &AnalysisConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

/// Load and validate a configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalysisConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let config = config_from_toml(&content)?;
    debug!("loaded analysis config from {}", path.display());
    Ok(config)
}

/// Save a configuration file, creating parent directories as needed.
pub fn save_config(path: impl AsRef<Path>, config: &AnalysisConfig) -> Result<(), ConfigError> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let content = config_to_toml(config)?;
    std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
    Ok(())
}

/// Write the default configuration to `path`.
///
/// An existing file is only replaced when `force` is set.
pub fn init_config(path: impl AsRef<Path>, force: bool) -> Result<(), ConfigError> {
    let path = path.as_ref();
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }

    save_config(path, &AnalysisConfig::default())?;
    info!("wrote default analysis config to {}", path.display());
    Ok(())
}

/// Resolve the effective configuration.
///
/// An explicit path must exist and parse. Without one, the file at
/// [`default_config_path`] is used if present, otherwise the built-in
/// defaults.
pub fn load_or_default(
    explicit: Option<&Path>,
) -> Result<(AnalysisConfig, ConfigSource), ConfigError> {
    if let Some(path) = explicit {
        return Ok((load_config(path)?, ConfigSource::File(path.to_path_buf())));
    }

    let path = default_config_path();
    if path.is_file() {
        let config = load_config(&path)?;
        return Ok((config, ConfigSource::File(path)));
    }

    debug!("no config file at {}, using defaults", path.display());
    Ok((AnalysisConfig::default(), ConfigSource::Defaults))
}
