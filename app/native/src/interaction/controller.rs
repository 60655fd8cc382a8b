//! The gesture state machine.
//!
//! ```text
//!        start_drag (handle)            release
//!  Idle ─────────────────────▶ Dragging ────────▶ Idle
//!    │                                            ▲
//!    │   start_resize (handle)          release   │
//!    └───────────────────────▶ Resizing ──────────┘
//! ```
//!
//! Pointer samples only update the preview. The store is touched once, on
//! release, and only when the preview is collision-free.

use super::pointer::{ContainerRect, PointerPoint, PointerTarget};
use super::state::{DiscardReason, Gesture, GestureOutcome, InteractionState};
use crate::grid::{
    GridConfig, GridPosition, GridSize, Placement, cell_origin, cell_size, clamp_to_grid,
    extent_to_spans, has_collision, pixel_to_grid,
};
use crate::store::{Layout, LayoutStore, StorageError};
use crate::widget::Widget;

/// Tracks the single active drag or resize gesture.
#[derive(Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    /// Create an idle controller.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &InteractionState { &self.state }

    /// Returns true if no gesture is active.
    #[must_use]
    pub const fn is_idle(&self) -> bool { self.state.is_idle() }

    /// Begins dragging `widget`.
    ///
    /// Ignored unless the press landed on the drag handle and no gesture is
    /// active. Returns whether the drag started.
    pub fn start_drag(&mut self, widget: &Widget, target: PointerTarget) -> bool {
        if !target.starts_drag() || !self.can_start(widget) {
            return false;
        }
        tracing::debug!(widget_id = %widget.id(), "drag started");
        self.state = InteractionState::Dragging(Gesture::new(widget));
        true
    }

    /// Begins resizing `widget` from its bottom-right corner.
    ///
    /// Ignored unless the press landed on the resize handle and no gesture is
    /// active. Returns whether the resize started.
    pub fn start_resize(&mut self, widget: &Widget, target: PointerTarget) -> bool {
        if !target.starts_resize() || !self.can_start(widget) {
            return false;
        }
        tracing::debug!(widget_id = %widget.id(), "resize started");
        self.state = InteractionState::Resizing(Gesture::new(widget));
        true
    }

    /// Updates the preview from a pointer sample. Does nothing when idle.
    pub fn pointer_move(&mut self, point: PointerPoint, container: &ContainerRect, layout: &Layout) {
        match &mut self.state {
            InteractionState::Idle => {}
            InteractionState::Dragging(gesture) => {
                let raw = pixel_to_grid(point, container, &layout.grid);
                let position = clamp_to_grid(raw, gesture.snapshot.size, &layout.grid);
                let candidate = Placement::new(position, gesture.snapshot.size);

                gesture.has_collision =
                    has_collision(&candidate, &layout.widgets, Some(gesture.snapshot.id()));
                gesture.preview = Some(position);
            }
            InteractionState::Resizing(gesture) => {
                let size = resize_preview(point, container, &layout.grid, gesture.snapshot.position);
                let candidate = Placement::new(gesture.snapshot.position, size);

                gesture.has_collision =
                    has_collision(&candidate, &layout.widgets, Some(gesture.snapshot.id()));
                gesture.preview = Some(size);
            }
        }
    }

    /// Ends the gesture, committing the preview if it is collision-free.
    ///
    /// The preview is checked again against the store's current layout, so
    /// widgets added or moved since the last pointer sample are respected.
    /// Always returns the controller to idle.
    pub fn release(&mut self, store: &mut LayoutStore) -> GestureOutcome {
        match std::mem::take(&mut self.state) {
            InteractionState::Idle => GestureOutcome::Idle,
            InteractionState::Dragging(gesture) => {
                let size = gesture.snapshot.size;
                let verdict = gesture.verdict().map(|position| Placement::new(position, size));
                settle(store, gesture.widget_id(), verdict, |store, id, placement| {
                    store.move_widget(id, placement.position)
                })
            }
            InteractionState::Resizing(gesture) => {
                let position = gesture.snapshot.position;
                let verdict = gesture.verdict().map(|size| Placement::new(position, size));
                settle(store, gesture.widget_id(), verdict, |store, id, placement| {
                    store.resize(id, placement.size)
                })
            }
        }
    }

    fn can_start(&self, widget: &Widget) -> bool {
        if let Some(active) = self.state.active_widget() {
            tracing::debug!(widget_id = %widget.id(), active = %active, "gesture already active");
            return false;
        }
        true
    }
}

/// Size under the pointer for a widget anchored at `anchor`.
///
/// The extent from the anchor cell's origin to the pointer is rounded to whole
/// units, then clamped to `[1, min(columns - col, max_col_span)]` columns and
/// `[1, max_row_span]` rows.
fn resize_preview(
    point: PointerPoint,
    container: &ContainerRect,
    grid: &GridConfig,
    anchor: GridPosition,
) -> GridSize {
    let cell = cell_size(container.width, grid);
    let origin = cell_origin(anchor, &cell, grid);
    let local = container.to_local(point);
    let (col_span, row_span) = extent_to_spans(local.x - origin.x, local.y - origin.y, &cell, grid.gap);

    let max_cols = grid.columns.saturating_sub(anchor.col).min(grid.col_span_limit()).max(1);
    let max_rows = grid.max_row_span.max(1);

    GridSize::new(clamp_span(col_span, max_cols), clamp_span(row_span, max_rows))
}

fn clamp_span(raw: i64, max: u32) -> u32 {
    u32::try_from(raw.clamp(1, i64::from(max))).unwrap_or(1)
}

/// Commits a gesture verdict if the placement is still free in the
/// store's current layout.
fn settle<F>(
    store: &mut LayoutStore,
    id: &str,
    verdict: Result<Placement, DiscardReason>,
    apply: F,
) -> GestureOutcome
where
    F: FnOnce(&mut LayoutStore, &str, Placement) -> Result<bool, StorageError>,
{
    let placement = match verdict {
        Ok(placement) => placement,
        Err(reason) => return discard(id.to_string(), reason),
    };

    let layout = store.layout();
    if layout.get(id).is_none() {
        return discard(id.to_string(), DiscardReason::WidgetRemoved);
    }
    if has_collision(&placement, &layout.widgets, Some(id)) {
        tracing::debug!(widget_id = %id, "layout changed under the preview");
        return discard(id.to_string(), DiscardReason::Collision);
    }

    match apply(store, id, placement) {
        Ok(true) => {
            tracing::debug!(
                widget_id = %id,
                position = %placement.position,
                size = %placement.size,
                "gesture committed"
            );
            GestureOutcome::Committed { id: id.to_string(), placement }
        }
        Ok(false) => discard(id.to_string(), DiscardReason::WidgetRemoved),
        Err(err) => {
            // The commit is in memory; only the write failed.
            tracing::warn!(widget_id = %id, error = %err, "gesture committed but not persisted");
            GestureOutcome::Committed { id: id.to_string(), placement }
        }
    }
}

fn discard(id: String, reason: DiscardReason) -> GestureOutcome {
    tracing::debug!(widget_id = %id, %reason, "gesture discarded");
    GestureOutcome::Discarded { id, reason }
}
