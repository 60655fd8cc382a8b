//! Axis-aligned rectangle collision on the grid.

use super::types::Placement;

/// Anything that occupies a rectangle on the grid and has a stable id.
pub trait GridItem {
    /// Stable identifier used for self-exclusion.
    fn item_id(&self) -> &str;

    /// Occupied rectangle.
    fn placement(&self) -> Placement;
}

/// Returns true if the two rectangles share at least one cell.
///
/// Rectangles that only touch along an edge do not overlap.
#[must_use]
pub const fn overlaps(a: &Placement, b: &Placement) -> bool {
    let separated = a.right() <= b.position.col as u64
        || a.position.col as u64 >= b.right()
        || a.bottom() <= b.position.row as u64
        || a.position.row as u64 >= b.bottom();

    !separated
}

/// Returns the first item (in slice order) that `candidate` overlaps,
/// skipping the item whose id equals `exclude_id`.
#[must_use]
pub fn first_collision<'a, T: GridItem>(
    candidate: &Placement,
    items: &'a [T],
    exclude_id: Option<&str>,
) -> Option<&'a T> {
    items
        .iter()
        .filter(|item| exclude_id != Some(item.item_id()))
        .find(|item| overlaps(candidate, &item.placement()))
}

/// Returns true if `candidate` overlaps any item other than `exclude_id`.
///
/// Bounds are not checked here: a candidate past the last column is still
/// tested against the items that are inside the grid.
#[must_use]
pub fn has_collision<T: GridItem>(
    candidate: &Placement,
    items: &[T],
    exclude_id: Option<&str>,
) -> bool {
    first_collision(candidate, items, exclude_id).is_some()
}
