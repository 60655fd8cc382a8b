//! Error types for Gridboard.
//!
//! Module errors ([`StorageError`], [`ValidationError`], [`ImportError`],
//! [`ConfigError`], [`PlacementError`]) convert into [`GridboardError`], the
//! single error type returned by CLI commands.

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::grid::PlacementError;
use crate::store::{ImportError, StorageError, ValidationError};

/// Errors surfaced to the user.
///
/// Serializes as `{ "kind": "...", "message": "..." }` for JSON output.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum GridboardError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// A widget id matched nothing.
    #[error("Widget not found: {0}")]
    WidgetNotFound(String),
    /// A placement was rejected.
    #[error("Invalid placement: {0}")]
    PlacementError(String),
    /// Malformed layout payload.
    #[error("Invalid layout: {0}")]
    ValidationError(String),
    /// Local persistence failed.
    #[error("Storage error: {0}")]
    StorageError(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl From<std::io::Error> for GridboardError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for GridboardError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<String> for GridboardError {
    fn from(msg: String) -> Self { Self::CommandError(msg) }
}

impl From<&str> for GridboardError {
    fn from(msg: &str) -> Self { Self::CommandError(msg.to_string()) }
}

impl From<StorageError> for GridboardError {
    fn from(err: StorageError) -> Self { Self::StorageError(err.to_string()) }
}

impl From<ValidationError> for GridboardError {
    fn from(err: ValidationError) -> Self { Self::ValidationError(err.to_string()) }
}

impl From<ImportError> for GridboardError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Validation(err) => err.into(),
            ImportError::Storage(err) => err.into(),
        }
    }
}

impl From<ConfigError> for GridboardError {
    fn from(err: ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<PlacementError> for GridboardError {
    fn from(err: PlacementError) -> Self { Self::PlacementError(err.to_string()) }
}
