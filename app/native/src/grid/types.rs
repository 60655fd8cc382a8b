//! Grid coordinate types and the grid configuration.
//!
//! Positions and sizes are unsigned: a committed widget can never sit at a
//! negative cell. Raw pointer conversions produce a signed [`GridPoint`]
//! which callers clamp into a [`GridPosition`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants::grid as defaults;

// ============================================================================
// Cell Coordinates
// ============================================================================

/// Top-left grid cell of a widget, 0-indexed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct GridPosition {
    pub col: u32,
    pub row: u32,
}

impl GridPosition {
    /// Create a new grid position.
    #[must_use]
    pub const fn new(col: u32, row: u32) -> Self { Self { col, row } }
}

impl std::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Width and height of a widget in grid units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GridSize {
    pub col_span: u32,
    pub row_span: u32,
}

impl Default for GridSize {
    fn default() -> Self { Self::new(1, 1) }
}

impl GridSize {
    /// Create a new grid size.
    #[must_use]
    pub const fn new(col_span: u32, row_span: u32) -> Self { Self { col_span, row_span } }

    /// Number of cells covered.
    #[must_use]
    pub const fn area(&self) -> u64 { self.col_span as u64 * self.row_span as u64 }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.col_span, self.row_span)
    }
}

/// Unclamped cell coordinate produced from pointer input.
///
/// May be negative or past the last column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridPoint {
    pub col: i64,
    pub row: i64,
}

impl GridPoint {
    /// Create a new raw grid point.
    #[must_use]
    pub const fn new(col: i64, row: i64) -> Self { Self { col, row } }
}

// ============================================================================
// Placement
// ============================================================================

/// A rectangle on the grid: position plus size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub position: GridPosition,
    pub size: GridSize,
}

impl Placement {
    /// Create a new placement.
    #[must_use]
    pub const fn new(position: GridPosition, size: GridSize) -> Self { Self { position, size } }

    /// Create a placement from raw cell values.
    #[must_use]
    pub const fn from_cells(col: u32, row: u32, col_span: u32, row_span: u32) -> Self {
        Self::new(GridPosition::new(col, row), GridSize::new(col_span, row_span))
    }

    /// Exclusive right edge (first column past the placement).
    #[must_use]
    pub const fn right(&self) -> u64 { self.position.col as u64 + self.size.col_span as u64 }

    /// Exclusive bottom edge (first row past the placement).
    #[must_use]
    pub const fn bottom(&self) -> u64 { self.position.row as u64 + self.size.row_span as u64 }
}

/// CSS grid line descriptor for a placement.
///
/// Lines are 1-indexed and the end line is exclusive, matching
/// `grid-column: start / end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpan {
    pub column_start: u64,
    pub column_end: u64,
    pub row_start: u64,
    pub row_end: u64,
}

impl GridSpan {
    /// Column shorthand, e.g. `4 / span 2`.
    #[must_use]
    pub fn column_css(&self) -> String {
        format!("{} / span {}", self.column_start, self.column_end - self.column_start)
    }

    /// Row shorthand, e.g. `1 / span 3`.
    #[must_use]
    pub fn row_css(&self) -> String {
        format!("{} / span {}", self.row_start, self.row_end - self.row_start)
    }
}

// ============================================================================
// Grid Configuration
// ============================================================================

/// Fixed parameters of the dashboard grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Total number of columns.
    /// Default: 12
    pub columns: u32,

    /// Height of one row in pixels.
    /// Default: 100
    pub row_height: f64,

    /// Gap between cells in pixels.
    /// Default: 16
    pub gap: f64,

    /// Inner padding of the grid container in pixels.
    /// Default: 20
    pub padding: f64,

    /// Largest column span a widget may take.
    /// Default: 12
    pub max_col_span: u32,

    /// Largest row span a widget may take.
    /// Default: 8
    pub max_row_span: u32,

    /// Rows scanned when looking for free space before appending below
    /// existing content.
    /// Default: 50
    pub max_search_rows: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: defaults::COLUMNS,
            row_height: defaults::ROW_HEIGHT,
            gap: defaults::GAP,
            padding: defaults::PADDING,
            max_col_span: defaults::MAX_COL_SPAN,
            max_row_span: defaults::MAX_ROW_SPAN,
            max_search_rows: defaults::MAX_SEARCH_ROWS,
        }
    }
}

impl GridConfig {
    /// Widest span a widget can take on this grid.
    #[must_use]
    pub fn col_span_limit(&self) -> u32 { self.columns.min(self.max_col_span).max(1) }

    /// Clamps a requested size into `[1, col_span_limit] x [1, max_row_span]`.
    #[must_use]
    pub fn clamp_size(&self, size: GridSize) -> GridSize {
        GridSize::new(
            size.col_span.clamp(1, self.col_span_limit()),
            size.row_span.clamp(1, self.max_row_span.max(1)),
        )
    }
}
