//! Configuration types for Gridboard.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{APP_NAME, DEFAULT_STORAGE_KEY};
use crate::grid::GridConfig;
use crate::platform::path::expand_and_resolve;

/// Where layouts are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageConfig {
    /// Directory layout records are stored in. `~` is expanded and relative
    /// paths resolve against the config file's directory.
    /// Default: the platform data directory, e.g. `~/.local/share/gridboard`
    pub path: String,

    /// Key the layout record is stored under (file name without `.json`).
    /// Default: "dashboard-widgets-v2"
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self { Self { path: String::new(), key: DEFAULT_STORAGE_KEY.to_string() } }
}

impl StorageConfig {
    /// Resolves the storage directory.
    ///
    /// `base_dir` is the directory of the loaded config file, if any.
    #[must_use]
    pub fn resolve_dir(&self, base_dir: Option<&Path>) -> PathBuf {
        if self.path.trim().is_empty() {
            return default_data_dir();
        }

        let base = base_dir.map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        expand_and_resolve(&self.path, &base)
    }

    /// The storage key, falling back to the default when blank.
    #[must_use]
    pub fn key(&self) -> &str {
        let key = self.key.trim();
        if key.is_empty() { DEFAULT_STORAGE_KEY } else { key }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GridboardConfig {
    /// JSON Schema reference, ignored when loading.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Grid geometry and span limits.
    pub grid: GridConfig,

    /// Layout persistence.
    pub storage: StorageConfig,
}

/// Default directory for layout records.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "No configuration file found. Expected at ~/.config/gridboard/config.jsonc, \
         the platform config directory, or ~/.gridboard.jsonc"
    )]
    NotFound,

    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Configuration file names in the home directory.
const HOME_CONFIG_FILE_NAMES: &[&str] = &[".gridboard.jsonc", ".gridboard.json"];

/// Returns the possible configuration file paths in priority order.
///
/// The function checks the following locations (both `.jsonc` and `.json` variants):
/// 1. `$XDG_CONFIG_HOME/gridboard/config.jsonc`, if the variable is set
/// 2. `~/.config/gridboard/config.jsonc`
/// 3. the platform config directory, e.g. `~/Library/Application Support/gridboard/`
/// 4. `~/.gridboard.jsonc` or `~/.gridboard.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = Vec::new();
    let mut push_dir = |dir: PathBuf| {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    };

    if let Some(xdg_config) = std::env::var("XDG_CONFIG_HOME").ok().filter(|v| !v.is_empty()) {
        push_dir(PathBuf::from(xdg_config).join(APP_NAME));
    }

    if let Some(home) = dirs::home_dir() {
        push_dir(home.join(".config").join(APP_NAME));
    }

    if let Some(config_dir) = dirs::config_dir() {
        push_dir(config_dir.join(APP_NAME));
    }

    if let Some(home) = dirs::home_dir() {
        for filename in HOME_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of the expected locations.
/// Returns `ConfigError::IoError` if a configuration file exists but could not be read.
/// Returns `ConfigError::ParseError` if the configuration file contains invalid JSON.
pub fn load_config() -> Result<(GridboardConfig, PathBuf), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            return load_config_from_path(&path);
        }
    }

    Err(ConfigError::NotFound)
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist, or the same
/// errors as [`load_config`] otherwise.
pub fn load_config_from_path(path: &Path) -> Result<(GridboardConfig, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }

    let file = fs::File::open(path)?;
    // Strip comments from JSONC before parsing
    let reader = json_comments::StripComments::new(file);
    let config: GridboardConfig = serde_json::from_reader(reader)?;
    Ok((config, path.to_path_buf()))
}
