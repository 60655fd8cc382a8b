//! Pointer input model.

pub use crate::grid::{ContainerRect, Point as PointerPoint};

/// The part of a widget a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The drag handle in the widget header.
    DragHandle,
    /// The resize handle in the bottom-right corner.
    ResizeHandle,
    /// Anywhere else on the widget.
    Body,
    /// A control inside the widget (title editor, button).
    Interactive,
}

impl PointerTarget {
    /// Returns true if a press here may start a drag.
    #[must_use]
    pub const fn starts_drag(self) -> bool { matches!(self, Self::DragHandle) }

    /// Returns true if a press here may start a resize.
    #[must_use]
    pub const fn starts_resize(self) -> bool { matches!(self, Self::ResizeHandle) }
}
