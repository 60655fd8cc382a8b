//! Grid layout engine.
//!
//! Leaf-first:
//!
//! - [`types`] - cell coordinates, placements and the grid configuration
//! - [`geometry`] - pixel <-> grid conversions
//! - [`collision`] - rectangle overlap tests
//! - [`allocator`] - first-free-slot search for new widgets
//! - [`bounds`] - placement validation for direct commits
//!
//! Everything in this module is pure and synchronous.

pub mod allocator;
pub mod bounds;
pub mod collision;
pub mod geometry;
pub mod types;

pub use allocator::{content_bottom, find_free_position};
pub use bounds::{PlacementError, check_bounds, check_placement, is_within_bounds};
pub use collision::{GridItem, first_collision, has_collision, overlaps};
pub use geometry::{
    CellSize, ContainerRect, Point, cell_origin, cell_size, clamp_to_grid, extent_to_spans,
    grid_to_span, pixel_to_grid,
};
pub use types::{GridConfig, GridPoint, GridPosition, GridSize, GridSpan, Placement};
