//! CLI subcommands.

pub mod batch;
pub mod clear;
pub mod config;
pub mod export;
pub mod insights;
pub mod process;
pub mod sample;

use std::path::{Path, PathBuf};

use tracing::debug;

use tally_core::models::config::TallyConfig;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tally")
        .join("config.json")
}

/// Load the configuration from `config_path`, else from the default
/// location if a file exists there, else the built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<TallyConfig> {
    if let Some(path) = config_path {
        return Ok(TallyConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(TallyConfig::from_file(&default_path)?)
    } else {
        Ok(TallyConfig::default())
    }
}
