//! Free-slot search for new widgets.

use super::collision::{GridItem, has_collision};
use super::types::{GridConfig, GridPosition, GridSize, Placement};

/// Finds the first collision-free position for a widget of `size`.
///
/// Scans rows `0..max_search_rows` and, within each row, columns
/// `0..=columns - col_span`, returning the lexicographically smallest
/// `(row, col)` that is free. If the scan finds nothing, the widget is
/// placed at column 0 directly below the lowest existing widget, which can
/// never collide.
#[must_use]
pub fn find_free_position<T: GridItem>(
    size: GridSize,
    items: &[T],
    config: &GridConfig,
) -> GridPosition {
    if let Some(max_col) = config.columns.checked_sub(size.col_span) {
        for row in 0..config.max_search_rows {
            for col in 0..=max_col {
                let candidate = Placement::new(GridPosition::new(col, row), size);
                if !has_collision(&candidate, items, None) {
                    return candidate.position;
                }
            }
        }
    }

    let position = GridPosition::new(0, content_bottom(items));
    tracing::debug!(
        size = %size,
        row = position.row,
        "no free slot within scan ceiling, appending below content"
    );
    position
}

/// First row below every item (0 when there are none).
#[must_use]
pub fn content_bottom<T: GridItem>(items: &[T]) -> u32 {
    items
        .iter()
        .map(|item| item.placement().bottom())
        .max()
        .map_or(0, |bottom| u32::try_from(bottom).unwrap_or(u32::MAX))
}
