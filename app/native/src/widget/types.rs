//! Widget records.
//!
//! A widget is a typed rectangle on the grid. Its id is fixed at creation;
//! title, position and size are the only fields the store ever changes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::grid::{GridItem, GridPosition, GridSize, Placement};

/// Type-specific widget options, opaque to the layout engine.
pub type WidgetConfig = serde_json::Map<String, serde_json::Value>;

// ============================================================================
// Widget Type
// ============================================================================

/// The kinds of widget a dashboard can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetType {
    /// Metrics and bar charts.
    #[serde(rename = "widget-1")]
    Metrics,
    /// Static text.
    #[serde(rename = "widget-2")]
    Text,
    /// Pie chart fed by a remote source.
    #[serde(rename = "pie-chart")]
    PieChart,
    /// Bar chart fed by a remote source.
    #[serde(rename = "bar-chart")]
    BarChart,
    /// Time-series line chart.
    #[serde(rename = "line-chart")]
    LineChart,
    /// Key statistics card.
    #[serde(rename = "stats-card")]
    StatsCard,
    /// Circular progress indicator.
    #[serde(rename = "progress-ring")]
    ProgressRing,
    /// Tabular data.
    #[serde(rename = "data-table")]
    DataTable,
}

impl WidgetType {
    /// Every widget type, in registry order.
    pub const ALL: [Self; 8] = [
        Self::Metrics,
        Self::Text,
        Self::PieChart,
        Self::BarChart,
        Self::LineChart,
        Self::StatsCard,
        Self::ProgressRing,
        Self::DataTable,
    ];

    /// Returns the serialized name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Metrics => "widget-1",
            Self::Text => "widget-2",
            Self::PieChart => "pie-chart",
            Self::BarChart => "bar-chart",
            Self::LineChart => "line-chart",
            Self::StatsCard => "stats-card",
            Self::ProgressRing => "progress-ring",
            Self::DataTable => "data-table",
        }
    }
}

impl std::fmt::Display for WidgetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for WidgetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.as_str() == needle).ok_or_else(|| {
            let names: Vec<&str> = Self::ALL.iter().map(|kind| kind.as_str()).collect();
            format!("Invalid widget type '{s}'. Expected one of: {}", names.join(", "))
        })
    }
}

// ============================================================================
// Widget
// ============================================================================

/// A positioned, sized, typed block on the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    id: String,

    /// Display title.
    pub title: String,

    /// Widget type.
    #[serde(rename = "type")]
    pub kind: WidgetType,

    /// Top-left cell.
    #[serde(rename = "gridPosition")]
    pub position: GridPosition,

    /// Size in grid units.
    #[serde(rename = "gridSize")]
    pub size: GridSize,

    /// Background color, usually a hex string.
    pub color: String,

    /// Type-specific options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<WidgetConfig>,
}

impl Widget {
    /// Create a new widget.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: WidgetType,
        placement: Placement,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            position: placement.position,
            size: placement.size,
            color: color.into(),
            config: None,
        }
    }

    /// Attach type-specific options.
    #[must_use]
    pub fn with_config(mut self, config: WidgetConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// The widget's identifier.
    #[must_use]
    pub fn id(&self) -> &str { &self.id }

    /// The rectangle the widget occupies.
    #[must_use]
    pub const fn placement(&self) -> Placement { Placement::new(self.position, self.size) }
}

impl GridItem for Widget {
    fn item_id(&self) -> &str { &self.id }

    fn placement(&self) -> Placement { Placement::new(self.position, self.size) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Widget {
        Widget::new(
            "1",
            "Metrics Dashboard",
            WidgetType::Metrics,
            Placement::from_cells(0, 0, 3, 2),
            "#e3f2fd",
        )
    }

    #[test]
    fn test_widget_serializes_with_grid_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["type"], "widget-1");
        assert_eq!(json["gridPosition"]["col"], 0);
        assert_eq!(json["gridSize"]["colSpan"], 3);
        assert_eq!(json["gridSize"]["rowSpan"], 2);
        assert!(json.get("config").is_none());
    }

    #[test]
    fn test_widget_deserializes_with_config() {
        let json = r##"{
            "id": "w",
            "title": "Sales",
            "type": "bar-chart",
            "gridPosition": { "col": 4, "row": 1 },
            "gridSize": { "colSpan": 3, "rowSpan": 2 },
            "color": "#fff3e0",
            "config": { "refreshInterval": 30, "showLegend": true }
        }"##;
        let widget: Widget = serde_json::from_str(json).unwrap();
        assert_eq!(widget.id(), "w");
        assert_eq!(widget.kind, WidgetType::BarChart);
        assert_eq!(widget.placement(), Placement::from_cells(4, 1, 3, 2));
        assert_eq!(widget.config.unwrap()["refreshInterval"], 30);
    }

    #[test]
    fn test_widget_rejects_unknown_type() {
        let json = r##"{
            "id": "w", "title": "x", "type": "gauge",
            "gridPosition": { "col": 0, "row": 0 },
            "gridSize": { "colSpan": 1, "rowSpan": 1 },
            "color": "#fff"
        }"##;
        assert!(serde_json::from_str::<Widget>(json).is_err());
    }

    #[test]
    fn test_widget_rejects_negative_position() {
        let json = r##"{
            "id": "w", "title": "x", "type": "widget-2",
            "gridPosition": { "col": -1, "row": 0 },
            "gridSize": { "colSpan": 1, "rowSpan": 1 },
            "color": "#fff"
        }"##;
        assert!(serde_json::from_str::<Widget>(json).is_err());
    }

    #[test]
    fn test_widget_type_round_trips_names() {
        for kind in WidgetType::ALL {
            let parsed: WidgetType = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
            assert_eq!(serde_json::to_string(&kind).unwrap(), format!("\"{kind}\""));
        }
    }

    #[test]
    fn test_widget_type_from_str_invalid() {
        let err = "gauge".parse::<WidgetType>().unwrap_err();
        assert!(err.contains("Invalid widget type"));
        assert!(err.contains("data-table"));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = sample();
        let mut snapshot = original.clone();
        snapshot.position = GridPosition::new(5, 5);
        snapshot.title = "Changed".to_string();
        assert_eq!(original.position, GridPosition::new(0, 0));
        assert_eq!(original.title, "Metrics Dashboard");
    }
}
