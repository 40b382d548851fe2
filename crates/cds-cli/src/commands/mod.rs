//! Subcommand implementations.

pub mod config;
pub mod extract;
pub mod text;

use std::path::{Path, PathBuf};

use cds_core::CdsConfig;
use tracing::debug;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cds")
        .join("config.json")
}

/// Resolve which configuration file applies: the explicit one, else the default path.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration from an explicit path, the default path, or built-in defaults.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<CdsConfig> {
    if let Some(path) = explicit {
        return CdsConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path, e));
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(CdsConfig::from_file(&path)?)
    } else {
        Ok(CdsConfig::default())
    }
}
