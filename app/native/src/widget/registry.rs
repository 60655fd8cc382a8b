//! Widget type metadata.
//!
//! The layout engine only reads `default_size` from this table, when a new
//! widget is created. Labels, descriptions and icons are for pickers.

use serde::Serialize;

use super::types::WidgetType;
use crate::grid::GridSize;

/// Size used for types missing from the registry.
pub const FALLBACK_SIZE: GridSize = GridSize::new(2, 2);

/// Descriptive metadata for one widget type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetTypeMetadata {
    #[serde(rename = "type")]
    pub kind: WidgetType,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub default_size: GridSize,
    /// Whether content is fetched from a remote source.
    pub online_source: bool,
}

/// All registered widget types.
pub const WIDGET_TYPES: [WidgetTypeMetadata; 8] = [
    WidgetTypeMetadata {
        kind: WidgetType::Metrics,
        label: "Metrics & Charts",
        description: "Displays metrics and bar charts",
        icon: "chart-bar",
        default_size: GridSize::new(3, 2),
        online_source: false,
    },
    WidgetTypeMetadata {
        kind: WidgetType::Text,
        label: "Text Widget",
        description: "Simple static text display",
        icon: "text",
        default_size: GridSize::new(2, 1),
        online_source: false,
    },
    WidgetTypeMetadata {
        kind: WidgetType::PieChart,
        label: "Pie Chart",
        description: "Interactive pie chart with live data",
        icon: "pie-chart",
        default_size: GridSize::new(2, 2),
        online_source: true,
    },
    WidgetTypeMetadata {
        kind: WidgetType::BarChart,
        label: "Bar Chart",
        description: "Dynamic bar chart visualization",
        icon: "bar-chart",
        default_size: GridSize::new(3, 2),
        online_source: true,
    },
    WidgetTypeMetadata {
        kind: WidgetType::LineChart,
        label: "Line Chart",
        description: "Time series line chart",
        icon: "line-chart",
        default_size: GridSize::new(3, 2),
        online_source: true,
    },
    WidgetTypeMetadata {
        kind: WidgetType::StatsCard,
        label: "Statistics Card",
        description: "Key metrics and statistics",
        icon: "stats",
        default_size: GridSize::new(2, 1),
        online_source: true,
    },
    WidgetTypeMetadata {
        kind: WidgetType::ProgressRing,
        label: "Progress Ring",
        description: "Circular progress indicator",
        icon: "progress-ring",
        default_size: GridSize::new(1, 1),
        online_source: true,
    },
    WidgetTypeMetadata {
        kind: WidgetType::DataTable,
        label: "Data Table",
        description: "Tabular data display",
        icon: "table",
        default_size: GridSize::new(4, 3),
        online_source: true,
    },
];

/// Looks up the metadata for a widget type.
#[must_use]
pub fn metadata(kind: WidgetType) -> Option<&'static WidgetTypeMetadata> {
    WIDGET_TYPES.iter().find(|meta| meta.kind == kind)
}

/// Default creation size for a widget type.
#[must_use]
pub fn default_size(kind: WidgetType) -> GridSize {
    metadata(kind).map_or(FALLBACK_SIZE, |meta| meta.default_size)
}

/// Types whose content is created locally.
pub fn local_types() -> impl Iterator<Item = &'static WidgetTypeMetadata> {
    WIDGET_TYPES.iter().filter(|meta| !meta.online_source)
}

/// Types whose content is fetched from a remote source.
pub fn online_types() -> impl Iterator<Item = &'static WidgetTypeMetadata> {
    WIDGET_TYPES.iter().filter(|meta| meta.online_source)
}
