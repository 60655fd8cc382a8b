//! Placement validation for commits that bypass the interaction controller.
//!
//! The store trusts its callers; gestures are clamped by the controller, and
//! everything else (CLI edits, scripted layouts) goes through
//! [`check_placement`] first.

use thiserror::Error;

use super::collision::{GridItem, first_collision};
use super::types::{GridConfig, GridPosition, GridSize, Placement};

/// Why a placement cannot be committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// A span of zero cells.
    #[error("size {size} has a zero span")]
    ZeroSpan { size: GridSize },

    /// Span exceeds the grid's column count or the configured span limits.
    #[error("size {size} exceeds the limit of {max_col_span}x{max_row_span}")]
    SpanTooLarge { size: GridSize, max_col_span: u32, max_row_span: u32 },

    /// Right edge is past the last column.
    #[error("placement at {position} with size {size} extends past column {columns}")]
    OutOfBounds { position: GridPosition, size: GridSize, columns: u32 },

    /// Overlaps another widget.
    #[error("placement overlaps widget '{with}'")]
    Collision { with: String },
}

/// Returns true if the placement fits inside the grid's columns and span
/// limits.
#[must_use]
pub fn is_within_bounds(placement: &Placement, config: &GridConfig) -> bool {
    check_bounds(placement, config).is_ok()
}

/// Checks only the bounds rules: non-zero spans, span limits, and
/// `col + col_span <= columns`.
///
/// # Errors
///
/// Returns the first rule the placement breaks.
pub fn check_bounds(placement: &Placement, config: &GridConfig) -> Result<(), PlacementError> {
    let size = placement.size;
    if size.col_span == 0 || size.row_span == 0 {
        return Err(PlacementError::ZeroSpan { size });
    }

    let max_col_span = config.col_span_limit();
    if size.col_span > max_col_span || size.row_span > config.max_row_span {
        return Err(PlacementError::SpanTooLarge {
            size,
            max_col_span,
            max_row_span: config.max_row_span,
        });
    }

    if placement.right() > u64::from(config.columns) {
        return Err(PlacementError::OutOfBounds {
            position: placement.position,
            size,
            columns: config.columns,
        });
    }

    Ok(())
}

/// Checks bounds, then collisions against `items` excluding `exclude_id`.
///
/// # Errors
///
/// Returns the first rule the placement breaks.
pub fn check_placement<T: GridItem>(
    placement: &Placement,
    items: &[T],
    config: &GridConfig,
    exclude_id: Option<&str>,
) -> Result<(), PlacementError> {
    check_bounds(placement, config)?;

    if let Some(other) = first_collision(placement, items, exclude_id) {
        return Err(PlacementError::Collision { with: other.item_id().to_string() });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(&'static str, Placement);

    impl GridItem for Item {
        fn item_id(&self) -> &str { self.0 }

        fn placement(&self) -> Placement { self.1 }
    }

    #[test]
    fn test_full_width_at_origin_is_valid() {
        let placement = Placement::from_cells(0, 0, 12, 1);
        assert!(is_within_bounds(&placement, &GridConfig::default()));
    }

    #[test]
    fn test_one_column_too_far_right_is_rejected() {
        let config = GridConfig::default();
        // col = columns - col_span + 1
        let placement = Placement::from_cells(12 - 3 + 1, 0, 3, 1);
        assert!(matches!(
            check_bounds(&placement, &config),
            Err(PlacementError::OutOfBounds { columns: 12, .. })
        ));
    }

    #[test]
    fn test_span_wider_than_grid_is_rejected() {
        let placement = Placement::from_cells(0, 0, 13, 1);
        assert!(matches!(
            check_bounds(&placement, &GridConfig::default()),
            Err(PlacementError::SpanTooLarge { .. })
        ));
    }

    #[test]
    fn test_row_span_above_limit_is_rejected() {
        let placement = Placement::from_cells(0, 0, 1, 9);
        assert!(matches!(
            check_bounds(&placement, &GridConfig::default()),
            Err(PlacementError::SpanTooLarge { max_row_span: 8, .. })
        ));
    }

    #[test]
    fn test_zero_span_is_rejected() {
        let placement = Placement::from_cells(0, 0, 0, 1);
        assert!(matches!(
            check_bounds(&placement, &GridConfig::default()),
            Err(PlacementError::ZeroSpan { .. })
        ));
    }

    #[test]
    fn test_collision_names_other_widget() {
        let items = vec![Item("a", Placement::from_cells(0, 0, 3, 2))];
        let candidate = Placement::from_cells(2, 1, 2, 2);
        let err = check_placement(&candidate, &items, &GridConfig::default(), None).unwrap_err();
        assert_eq!(err, PlacementError::Collision { with: "a".to_string() });
        assert!(err.to_string().contains("'a'"));
    }

    #[test]
    fn test_self_excluded_placement_is_valid() {
        let items = vec![Item("a", Placement::from_cells(0, 0, 3, 2))];
        let candidate = Placement::from_cells(1, 0, 3, 2);
        assert!(check_placement(&candidate, &items, &GridConfig::default(), Some("a")).is_ok());
    }
}
