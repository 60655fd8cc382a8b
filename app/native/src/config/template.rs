//! Configuration template generation.
//!
//! Generates a commented configuration template with all available options.

use std::fs;
use std::path::Path;

/// Generates a configuration template with all options commented out.
///
/// The values shown are the defaults.
#[must_use]
pub fn generate_config_template() -> String {
    r#"// Gridboard Configuration File
// ============================
// This file uses JSONC format (JSON with comments).
// All options below are commented out and show their default values.
// Uncomment and modify the options you want to configure.
//
// Print the JSON Schema with: gridboard schema

{
  // ============================================================================
  // Grid
  // ============================================================================
  // "grid": {
  //   // Number of columns
  //   "columns": 12,
  //
  //   // Height of one row in pixels
  //   "rowHeight": 100,
  //
  //   // Gap between cells in pixels
  //   "gap": 16,
  //
  //   // Inner padding of the grid container in pixels
  //   "padding": 20,
  //
  //   // Largest column span a widget may take
  //   "maxColSpan": 12,
  //
  //   // Largest row span a widget may take
  //   "maxRowSpan": 8,
  //
  //   // Rows scanned for free space before new widgets are appended below
  //   "maxSearchRows": 50
  // },

  // ============================================================================
  // Storage
  // ============================================================================
  // "storage": {
  //   // Directory for layout records. Empty uses the platform data directory.
  //   // "~" is expanded; relative paths resolve against this file's directory.
  //   "path": "",
  //
  //   // Record name (stored as <key>.json)
  //   "key": "dashboard-widgets-v2"
  // }
}
"#
    .to_string()
}

/// Creates a configuration file with the template at the specified path.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}
