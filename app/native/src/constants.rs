//! Application-wide constants.

/// Application name, used for config and data directory names.
pub const APP_NAME: &str = "gridboard";

/// Storage key the layout record is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "dashboard-widgets-v2";

/// Format version written into exported snapshots.
pub const SNAPSHOT_FORMAT_VERSION: &str = "2.0";

/// Largest import file accepted by the CLI, in bytes (5 MB).
pub const MAX_IMPORT_BYTES: u64 = 5 * 1024 * 1024;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "GRIDBOARD_LOG";

/// Grid defaults.
pub mod grid {
    /// Number of columns in the grid.
    pub const COLUMNS: u32 = 12;

    /// Height of one grid row in pixels.
    pub const ROW_HEIGHT: f64 = 100.0;

    /// Gap between adjacent cells in pixels.
    pub const GAP: f64 = 16.0;

    /// Inner padding of the grid container in pixels.
    pub const PADDING: f64 = 20.0;

    /// Largest column span a widget may have.
    pub const MAX_COL_SPAN: u32 = 12;

    /// Largest row span a widget may have.
    pub const MAX_ROW_SPAN: u32 = 8;

    /// Number of rows the free-slot scan visits before falling back to
    /// appending below all widgets.
    pub const MAX_SEARCH_ROWS: u32 = 50;
}
