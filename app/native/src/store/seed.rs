//! Layout used when nothing is stored.

use crate::grid::Placement;
use crate::widget::{Widget, WidgetType};

/// The two starter widgets of a fresh dashboard.
#[must_use]
pub fn seed_widgets() -> Vec<Widget> {
    vec![
        Widget::new(
            "1",
            "Metrics Dashboard",
            WidgetType::Metrics,
            Placement::from_cells(0, 0, 3, 2),
            "#e3f2fd",
        ),
        Widget::new("2", "Welcome", WidgetType::Text, Placement::from_cells(3, 0, 2, 2), "#f3e5f5"),
    ]
}
