//! Pixel <-> grid conversions.
//!
//! All functions here are pure and total. Results may be negative or past
//! the last column; clamping is the caller's job.

use super::types::{GridConfig, GridPoint, GridPosition, GridSize, GridSpan};

// ============================================================================
// Pixel Types
// ============================================================================

/// A point in client pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

/// Bounding box of the grid container in client pixel space.
///
/// Only the origin and width matter: rows have a fixed height, so the
/// container grows vertically with its content.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
}

impl ContainerRect {
    /// Create a new container rect.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64) -> Self { Self { left, top, width } }

    /// Translates a client point into container-relative pixels.
    #[must_use]
    pub fn to_local(&self, point: Point) -> Point { Point::new(point.x - self.left, point.y - self.top) }
}

/// Size of a single grid cell in pixels, excluding the gap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellSize {
    pub col_width: f64,
    pub row_height: f64,
}

impl CellSize {
    /// Horizontal distance between the left edges of adjacent columns.
    #[must_use]
    pub fn col_step(&self, gap: f64) -> f64 { self.col_width + gap }

    /// Vertical distance between the top edges of adjacent rows.
    #[must_use]
    pub fn row_step(&self, gap: f64) -> f64 { self.row_height + gap }
}

// ============================================================================
// Conversions
// ============================================================================

/// Computes the cell size for a container of the given width.
///
/// `col_width = (width - 2 * padding - (columns - 1) * gap) / columns`.
#[must_use]
pub fn cell_size(container_width: f64, config: &GridConfig) -> CellSize {
    let columns = f64::from(config.columns.max(1));
    let gutters = (columns - 1.0) * config.gap;
    let col_width = (container_width - 2.0 * config.padding - gutters) / columns;

    CellSize { col_width, row_height: config.row_height }
}

/// Maps a client point to the grid cell under it.
///
/// Subtracts the container origin and padding, then floors the quotient by
/// the column and row steps. No clamping is performed.
#[must_use]
pub fn pixel_to_grid(point: Point, container: &ContainerRect, config: &GridConfig) -> GridPoint {
    let cell = cell_size(container.width, config);
    let local = container.to_local(point);
    let x = local.x - config.padding;
    let y = local.y - config.padding;

    GridPoint::new(
        to_grid_units((x / cell.col_step(config.gap)).floor()),
        to_grid_units((y / cell.row_step(config.gap)).floor()),
    )
}

/// Container-relative pixel origin of a grid cell.
#[must_use]
pub fn cell_origin(position: GridPosition, cell: &CellSize, config: &GridConfig) -> Point {
    Point::new(
        config.padding + f64::from(position.col) * cell.col_step(config.gap),
        config.padding + f64::from(position.row) * cell.row_step(config.gap),
    )
}

/// Converts a pixel extent anchored at a cell into spans, rounding to the
/// nearest whole unit.
///
/// Returns unclamped `(col_span, row_span)`; either may be zero or negative.
#[must_use]
pub fn extent_to_spans(width: f64, height: f64, cell: &CellSize, gap: f64) -> (i64, i64) {
    (
        to_grid_units((width / cell.col_step(gap)).round()),
        to_grid_units((height / cell.row_step(gap)).round()),
    )
}

/// CSS grid lines for a placement (1-indexed, end exclusive).
#[must_use]
pub fn grid_to_span(position: GridPosition, size: GridSize) -> GridSpan {
    let column_start = u64::from(position.col) + 1;
    let row_start = u64::from(position.row) + 1;

    GridSpan {
        column_start,
        column_end: column_start + u64::from(size.col_span),
        row_start,
        row_end: row_start + u64::from(size.row_span),
    }
}

/// Clamps a raw grid point so a widget of `size` stays inside the columns.
///
/// `col` lands in `[0, columns - col_span]`, `row` in `[0, inf)`.
#[must_use]
pub fn clamp_to_grid(point: GridPoint, size: GridSize, config: &GridConfig) -> GridPosition {
    let max_col = i64::from(config.columns.saturating_sub(size.col_span));

    GridPosition::new(saturate_u32(point.col.clamp(0, max_col)), saturate_u32(point.row.max(0)))
}

/// Float-to-int conversion used for grid units. NaN maps to zero and
/// infinities saturate.
#[allow(clippy::cast_possible_truncation)]
fn to_grid_units(value: f64) -> i64 { value as i64 }

fn saturate_u32(value: i64) -> u32 { u32::try_from(value.max(0)).unwrap_or(u32::MAX) }

#[cfg(test)]
mod tests {
    use super::*;

    /// 1200px container: (1200 - 40 - 11 * 16) / 12 = 82px columns.
    fn config() -> GridConfig { GridConfig::default() }

    fn container() -> ContainerRect { ContainerRect::new(100.0, 50.0, 1200.0) }

    #[test]
    fn test_cell_size_default_grid() {
        let cell = cell_size(1200.0, &config());
        assert!((cell.col_width - 82.0).abs() < 1e-9);
        assert!((cell.row_height - 100.0).abs() < 1e-9);
        assert!((cell.col_step(16.0) - 98.0).abs() < 1e-9);
    }

    #[test]
    fn test_cell_size_zero_columns_does_not_divide_by_zero() {
        let config = GridConfig { columns: 0, ..config() };
        let cell = cell_size(1200.0, &config);
        assert!(cell.col_width.is_finite());
    }

    #[test]
    fn test_pixel_to_grid_origin_cell() {
        let point = Point::new(100.0 + 20.0 + 1.0, 50.0 + 20.0 + 1.0);
        assert_eq!(pixel_to_grid(point, &container(), &config()), GridPoint::new(0, 0));
    }

    #[test]
    fn test_pixel_to_grid_floors() {
        // Column 3 starts at 20 + 3 * 98 = 314, row 2 at 20 + 2 * 116 = 252.
        let point = Point::new(100.0 + 314.0 + 97.0, 50.0 + 252.0 + 115.0);
        assert_eq!(pixel_to_grid(point, &container(), &config()), GridPoint::new(3, 2));
    }

    #[test]
    fn test_pixel_to_grid_negative_left_of_padding() {
        let point = Point::new(100.0, 50.0);
        assert_eq!(pixel_to_grid(point, &container(), &config()), GridPoint::new(-1, -1));
    }

    #[test]
    fn test_pixel_to_grid_past_last_column() {
        let point = Point::new(100.0 + 1300.0, 50.0 + 30.0);
        let raw = pixel_to_grid(point, &container(), &config());
        assert!(raw.col >= 12);
    }

    #[test]
    fn test_cell_origin_matches_steps() {
        let cell = cell_size(1200.0, &config());
        let origin = cell_origin(GridPosition::new(2, 1), &cell, &config());
        assert!((origin.x - (20.0 + 2.0 * 98.0)).abs() < 1e-9);
        assert!((origin.y - (20.0 + 116.0)).abs() < 1e-9);
    }

    #[test]
    fn test_extent_to_spans_rounds() {
        let cell = cell_size(1200.0, &config());
        // 2.4 columns rounds down, 1.6 rows rounds up.
        let (cols, rows) = extent_to_spans(98.0 * 2.4, 116.0 * 1.6, &cell, 16.0);
        assert_eq!((cols, rows), (2, 2));
    }

    #[test]
    fn test_extent_to_spans_negative_extent() {
        let cell = cell_size(1200.0, &config());
        let (cols, rows) = extent_to_spans(-300.0, -10.0, &cell, 16.0);
        assert!(cols < 0);
        assert_eq!(rows, 0);
    }

    #[test]
    fn test_grid_to_span_is_one_indexed() {
        let span = grid_to_span(GridPosition::new(3, 0), GridSize::new(2, 2));
        assert_eq!(span.column_start, 4);
        assert_eq!(span.column_end, 6);
        assert_eq!(span.row_start, 1);
        assert_eq!(span.row_end, 3);
    }

    #[test]
    fn test_clamp_to_grid_bounds() {
        let size = GridSize::new(3, 1);
        assert_eq!(clamp_to_grid(GridPoint::new(-4, -2), size, &config()), GridPosition::new(0, 0));
        assert_eq!(clamp_to_grid(GridPoint::new(11, 7), size, &config()), GridPosition::new(9, 7));
    }

    #[test]
    fn test_clamp_to_grid_full_width_widget() {
        let size = GridSize::new(12, 1);
        assert_eq!(clamp_to_grid(GridPoint::new(5, 0), size, &config()), GridPosition::new(0, 0));
    }

    #[test]
    fn test_nan_input_is_total() {
        let point = Point::new(f64::NAN, f64::NAN);
        assert_eq!(pixel_to_grid(point, &container(), &config()), GridPoint::new(0, 0));
    }
}
