//! The immutable layout value published by the store.

use std::collections::HashSet;

use serde::Serialize;

use crate::grid::{GridConfig, overlaps};
use crate::widget::Widget;

/// One committed state of the dashboard.
///
/// Widget order is paint order and carries no other meaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Incremented once per effective mutation.
    pub revision: u64,

    /// Grid the widgets are placed on.
    pub grid: GridConfig,

    /// Placed widgets.
    pub widgets: Vec<Widget>,
}

/// A broken layout invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutViolation {
    /// Widget extends past the last column.
    OutOfBounds { id: String },
    /// Widget has a zero column or row span.
    ZeroSpan { id: String },
    /// Two widgets overlap.
    Overlap { a: String, b: String },
    /// Two widgets share an id.
    DuplicateId { id: String },
}

impl std::fmt::Display for LayoutViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds { id } => write!(f, "widget '{id}' extends past the last column"),
            Self::ZeroSpan { id } => write!(f, "widget '{id}' has a zero span"),
            Self::Overlap { a, b } => write!(f, "widgets '{a}' and '{b}' overlap"),
            Self::DuplicateId { id } => write!(f, "id '{id}' is used more than once"),
        }
    }
}

impl Layout {
    /// Create a layout at revision 0.
    #[must_use]
    pub const fn new(grid: GridConfig, widgets: Vec<Widget>) -> Self {
        Self { revision: 0, grid, widgets }
    }

    /// Returns the widget with `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Widget> { self.widgets.iter().find(|w| w.id() == id) }

    /// Index of the widget with `id`.
    #[must_use]
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.widgets.iter().position(|w| w.id() == id)
    }

    /// Number of widgets.
    #[must_use]
    pub fn len(&self) -> usize { self.widgets.len() }

    /// Returns true if there are no widgets.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.widgets.is_empty() }

    /// Lists every broken invariant, in widget order.
    #[must_use]
    pub fn violations(&self) -> Vec<LayoutViolation> {
        let mut violations = Vec::new();
        let mut seen = HashSet::new();

        for widget in &self.widgets {
            let id = widget.id();
            if !seen.insert(id) {
                violations.push(LayoutViolation::DuplicateId { id: id.to_string() });
            }
            if widget.size.col_span == 0 || widget.size.row_span == 0 {
                violations.push(LayoutViolation::ZeroSpan { id: id.to_string() });
            }
            if widget.placement().right() > u64::from(self.grid.columns) {
                violations.push(LayoutViolation::OutOfBounds { id: id.to_string() });
            }
        }

        for (i, a) in self.widgets.iter().enumerate() {
            for b in &self.widgets[i + 1..] {
                if overlaps(&a.placement(), &b.placement()) {
                    violations.push(LayoutViolation::Overlap {
                        a: a.id().to_string(),
                        b: b.id().to_string(),
                    });
                }
            }
        }

        violations
    }

    /// Returns true if no invariant is broken.
    #[must_use]
    pub fn is_valid(&self) -> bool { self.violations().is_empty() }
}
