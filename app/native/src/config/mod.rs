//! Configuration module for Gridboard.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.
//!
//! Configuration is loaded once by the caller and passed down explicitly.

pub mod template;
pub mod types;

use std::path::{Path, PathBuf};

pub use types::{
    ConfigError, GridboardConfig, StorageConfig, config_paths, default_data_dir,
    load_config as load_config_default, load_config_from_path,
};

/// A configuration together with the file it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: GridboardConfig,
    /// `None` when defaults are in use.
    pub path: Option<PathBuf>,
}

impl LoadedConfig {
    /// Directory layout records are stored in.
    #[must_use]
    pub fn storage_dir(&self) -> PathBuf {
        self.config.storage.resolve_dir(self.path.as_deref().and_then(Path::parent))
    }
}

/// Loads the configuration from `custom` or the default search paths.
///
/// A missing file yields defaults. An unreadable or invalid file also yields
/// defaults, with a warning.
#[must_use]
pub fn load(custom: Option<&Path>) -> LoadedConfig {
    let result = custom.map_or_else(load_config_default, load_config_from_path);

    match result {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "loaded configuration");
            LoadedConfig { config, path: Some(path) }
        }
        Err(ConfigError::NotFound) => {
            if let Some(path) = custom {
                tracing::warn!(path = %path.display(), "configuration file not found, using defaults");
            }
            LoadedConfig::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load configuration, using defaults");
            LoadedConfig::default()
        }
    }
}
