//! Gesture state and outcomes.

use crate::grid::{GridPosition, GridSize, Placement};
use crate::widget::Widget;

/// An active gesture over a snapshot of the widget taken at press time.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture<P> {
    /// Copy of the widget as committed when the gesture started.
    pub snapshot: Widget,
    /// Latest candidate, `None` until the first pointer sample.
    pub preview: Option<P>,
    /// Whether the preview overlaps another widget.
    pub has_collision: bool,
}

impl<P: Copy> Gesture<P> {
    pub(crate) fn new(widget: &Widget) -> Self {
        Self { snapshot: widget.clone(), preview: None, has_collision: false }
    }

    /// Id of the widget being manipulated.
    #[must_use]
    pub fn widget_id(&self) -> &str { self.snapshot.id() }

    /// The preview if it can be committed.
    pub(crate) fn verdict(&self) -> Result<P, DiscardReason> {
        match (self.preview, self.has_collision) {
            (None, _) => Err(DiscardReason::NoPreview),
            (Some(_), true) => Err(DiscardReason::Collision),
            (Some(preview), false) => Ok(preview),
        }
    }
}

/// Transient interaction state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    /// No gesture.
    #[default]
    Idle,
    /// A widget is being moved.
    Dragging(Gesture<GridPosition>),
    /// A widget is being resized.
    Resizing(Gesture<GridSize>),
}

impl InteractionState {
    /// Returns true if no gesture is active.
    #[must_use]
    pub const fn is_idle(&self) -> bool { matches!(self, Self::Idle) }

    /// Id of the widget under the active gesture.
    #[must_use]
    pub fn active_widget(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Dragging(gesture) => Some(gesture.widget_id()),
            Self::Resizing(gesture) => Some(gesture.widget_id()),
        }
    }

    /// Placement the preview would commit, if there is a preview.
    #[must_use]
    pub const fn preview_placement(&self) -> Option<Placement> {
        match self {
            Self::Idle => None,
            Self::Dragging(Gesture { snapshot, preview: Some(position), .. }) => {
                Some(Placement::new(*position, snapshot.size))
            }
            Self::Resizing(Gesture { snapshot, preview: Some(size), .. }) => {
                Some(Placement::new(snapshot.position, *size))
            }
            Self::Dragging(_) | Self::Resizing(_) => None,
        }
    }

    /// Whether the current preview collides.
    #[must_use]
    pub const fn has_collision(&self) -> bool {
        match self {
            Self::Idle => false,
            Self::Dragging(gesture) => gesture.has_collision,
            Self::Resizing(gesture) => gesture.has_collision,
        }
    }
}

/// Why a gesture ended without a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// The pointer never produced a preview.
    NoPreview,
    /// The preview overlapped another widget.
    Collision,
    /// The widget was removed while the gesture was active.
    WidgetRemoved,
}

impl std::fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NoPreview => "no preview",
            Self::Collision => "collision",
            Self::WidgetRemoved => "widget removed",
        })
    }
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The preview was written to the store.
    Committed { id: String, placement: Placement },
    /// The widget keeps its committed placement.
    Discarded { id: String, reason: DiscardReason },
    /// No gesture was active.
    Idle,
}

impl GestureOutcome {
    /// Returns true if the gesture was committed.
    #[must_use]
    pub const fn is_committed(&self) -> bool { matches!(self, Self::Committed { .. }) }
}
