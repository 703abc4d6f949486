//! Configuration files for roomscope.
//!
//! The analysis tunables live in [`AnalysisConfig`]; this crate reads and
//! writes them as TOML and knows where the per-user file lives.
//!
//! # Example
//!
//! ```rust,no_run
//! use roomscope_config::{load_or_default, save_config, default_config_path};
//!
//! let (mut config, source) = load_or_default(None).unwrap();
//! println!("using {source}");
//!
//! config.target_rt60_secs = 0.8;
//! save_config(default_config_path(), &config).unwrap();
//! ```

mod error;
mod file;

/// Platform-specific configuration paths.
pub mod paths;

pub use error::ConfigError;
pub use file::{
    ConfigSource, config_from_toml, config_to_toml, init_config, load_config, load_or_default,
    save_config,
};
pub use paths::{CONFIG_FILE_NAME, default_config_path, user_config_dir};

pub use roomscope_analysis::AnalysisConfig;
