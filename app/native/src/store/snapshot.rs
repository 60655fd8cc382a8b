//! Serialized forms of a layout: the persisted record and the export file.
//!
//! Persisted record:
//!
//! ```json
//! { "widgets": [ ... ], "layout": { "columns": 12, "gap": 16 } }
//! ```
//!
//! Export file:
//!
//! ```json
//! {
//!   "version": "2.0",
//!   "timestamp": "2026-01-01T00:00:00+00:00",
//!   "widgets": [ ... ],
//!   "layout": { "columns": 12, "gap": 16, "widgets": [ ... ] }
//! }
//! ```
//!
//! Both are read by the same parser. The `layout` section is optional and
//! `layout.widgets` is ignored. Older records stored a bare widget array,
//! which is still accepted from storage.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::layout::{Layout, LayoutViolation};
use crate::constants::SNAPSHOT_FORMAT_VERSION;
use crate::grid::GridConfig;
use crate::widget::Widget;

/// Malformed layout payload.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Payload is not JSON.
    #[error("invalid JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// Payload is JSON but not an object.
    #[error("invalid file format: expected an object")]
    NotAnObject,

    /// The `widgets` field is absent.
    #[error("invalid file format: missing 'widgets'")]
    MissingWidgets,

    /// The `widgets` field is not an array.
    #[error("invalid file format: 'widgets' must be an array")]
    WidgetsNotArray,

    /// An entry of `widgets` is not a well-formed widget.
    #[error("invalid widget at index {index}: {source}")]
    InvalidWidget {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The `layout` section is malformed.
    #[error("invalid layout section: {0}")]
    InvalidLayout(String),

    /// The widgets are well-formed but cannot be placed on the grid together.
    #[error("widgets break the grid rules: {}", join_violations(.0))]
    BrokenInvariants(Vec<LayoutViolation>),
}

fn join_violations(violations: &[LayoutViolation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

// ============================================================================
// Grid Overrides
// ============================================================================

/// Grid parameters carried inside a payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GridOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
}

impl GridOverride {
    /// The overridable parts of `grid`.
    #[must_use]
    pub const fn from_grid(grid: &GridConfig) -> Self {
        Self { columns: Some(grid.columns), gap: Some(grid.gap) }
    }

    /// Applies the override on top of `grid`.
    #[must_use]
    pub fn apply(self, grid: GridConfig) -> GridConfig {
        GridConfig {
            columns: self.columns.unwrap_or(grid.columns),
            gap: self.gap.unwrap_or(grid.gap),
            ..grid
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.columns == Some(0) {
            return Err(ValidationError::InvalidLayout("columns must be at least 1".to_string()));
        }
        if self.gap.is_some_and(|gap| !gap.is_finite() || gap < 0.0) {
            return Err(ValidationError::InvalidLayout(
                "gap must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

/// A validated payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLayout {
    pub widgets: Vec<Widget>,
    pub grid: Option<GridOverride>,
}

// ============================================================================
// Parsing
// ============================================================================

/// Parses an export file.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the text is not JSON, is not an object,
/// lacks a `widgets` array, holds a malformed widget, or has an invalid
/// `layout` section.
pub fn parse_snapshot(text: &str) -> Result<ParsedLayout, ValidationError> {
    let value: Value = serde_json::from_str(text).map_err(ValidationError::Json)?;
    parse_object(value)
}

/// Parses a persisted record, also accepting a bare widget array.
///
/// # Errors
///
/// Same as [`parse_snapshot`].
pub fn parse_record(text: &str) -> Result<ParsedLayout, ValidationError> {
    let value: Value = serde_json::from_str(text).map_err(ValidationError::Json)?;
    match value {
        Value::Array(items) => Ok(ParsedLayout { widgets: parse_widgets(items)?, grid: None }),
        other => parse_object(other),
    }
}

fn parse_object(value: Value) -> Result<ParsedLayout, ValidationError> {
    let Value::Object(mut map) = value else {
        return Err(ValidationError::NotAnObject);
    };

    let widgets = match map.remove("widgets") {
        Some(Value::Array(items)) => parse_widgets(items)?,
        Some(_) => return Err(ValidationError::WidgetsNotArray),
        None => return Err(ValidationError::MissingWidgets),
    };

    let grid = match map.remove("layout") {
        None | Some(Value::Null) => None,
        Some(section) => {
            let grid: GridOverride = serde_json::from_value(section)
                .map_err(|err| ValidationError::InvalidLayout(err.to_string()))?;
            grid.validate()?;
            Some(grid)
        }
    };

    Ok(ParsedLayout { widgets, grid })
}

fn parse_widgets(items: Vec<Value>) -> Result<Vec<Widget>, ValidationError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|source| ValidationError::InvalidWidget { index, source })
        })
        .collect()
}

// ============================================================================
// Encoding
// ============================================================================

/// The record written to storage.
#[derive(Debug, Serialize)]
pub struct PersistedRecord<'a> {
    pub widgets: &'a [Widget],
    pub layout: GridOverride,
}

impl<'a> PersistedRecord<'a> {
    /// Borrow the parts of `layout` that are persisted.
    #[must_use]
    pub fn new(layout: &'a Layout) -> Self {
        Self { widgets: &layout.widgets, layout: GridOverride::from_grid(&layout.grid) }
    }
}

/// `layout` section of an export file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotLayout {
    pub columns: u32,
    pub gap: f64,
    pub widgets: Vec<Widget>,
}

/// A user-facing export of the whole layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSnapshot {
    pub version: String,
    pub timestamp: String,
    pub widgets: Vec<Widget>,
    pub layout: SnapshotLayout,
}

impl LayoutSnapshot {
    /// Captures `layout`, stamped with the current time.
    #[must_use]
    pub fn capture(layout: &Layout) -> Self {
        Self {
            version: SNAPSHOT_FORMAT_VERSION.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            widgets: layout.widgets.clone(),
            layout: SnapshotLayout {
                columns: layout.grid.columns,
                gap: layout.grid.gap,
                widgets: layout.widgets.clone(),
            },
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Placement;
    use crate::widget::WidgetType;

    fn sample_layout() -> Layout {
        Layout::new(GridConfig::default(), vec![Widget::new(
            "a",
            "Alpha",
            WidgetType::StatsCard,
            Placement::from_cells(1, 2, 2, 1),
            "#fce4ec",
        )])
    }

    #[test]
    fn test_capture_shape() {
        let snapshot = LayoutSnapshot::capture(&sample_layout());
        let json: Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();

        assert_eq!(json["version"], "2.0");
        assert!(chrono::DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());
        assert_eq!(json["widgets"][0]["id"], "a");
        assert_eq!(json["layout"]["columns"], 12);
        assert_eq!(json["layout"]["widgets"][0]["title"], "Alpha");
    }

    #[test]
    fn test_parse_export() {
        let text = LayoutSnapshot::capture(&sample_layout()).to_json().unwrap();
        let parsed = parse_snapshot(&text).unwrap();

        assert_eq!(parsed.widgets, sample_layout().widgets);
        assert_eq!(parsed.grid, Some(GridOverride { columns: Some(12), gap: Some(16.0) }));
    }

    #[test]
    fn test_parse_without_layout_section() {
        let parsed = parse_snapshot(r#"{ "widgets": [] }"#).unwrap();
        assert!(parsed.widgets.is_empty());
        assert!(parsed.grid.is_none());
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(matches!(parse_snapshot("not json"), Err(ValidationError::Json(_))));
    }

    #[test]
    fn test_parse_rejects_missing_widgets() {
        assert!(matches!(parse_snapshot(r#"{ "version": "2.0" }"#), Err(ValidationError::MissingWidgets)));
    }

    #[test]
    fn test_parse_rejects_widgets_not_array() {
        assert!(matches!(
            parse_snapshot(r#"{ "widgets": { "a": 1 } }"#),
            Err(ValidationError::WidgetsNotArray)
        ));
    }

    #[test]
    fn test_parse_rejects_bare_array_for_import() {
        assert!(matches!(parse_snapshot("[]"), Err(ValidationError::NotAnObject)));
    }

    #[test]
    fn test_parse_reports_bad_widget_index() {
        let text = r##"{ "widgets": [
            { "id": "ok", "title": "t", "type": "widget-2",
              "gridPosition": { "col": 0, "row": 0 },
              "gridSize": { "colSpan": 1, "rowSpan": 1 }, "color": "#fff" },
            { "id": "bad", "title": "t" }
        ] }"##;
        assert!(matches!(parse_snapshot(text), Err(ValidationError::InvalidWidget { index: 1, .. })));
    }

    #[test]
    fn test_parse_rejects_zero_columns() {
        let err = parse_snapshot(r#"{ "widgets": [], "layout": { "columns": 0 } }"#).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidLayout(_)));
    }

    #[test]
    fn test_parse_record_accepts_bare_array() {
        let parsed = parse_record("[]").unwrap();
        assert!(parsed.widgets.is_empty());
        assert!(parsed.grid.is_none());
    }

    #[test]
    fn test_persisted_record_round_trip() {
        let layout = sample_layout();
        let text = serde_json::to_string(&PersistedRecord::new(&layout)).unwrap();
        let parsed = parse_record(&text).unwrap();

        assert_eq!(parsed.widgets, layout.widgets);
        assert_eq!(parsed.grid.unwrap().apply(GridConfig::default()), layout.grid);
    }

    #[test]
    fn test_override_keeps_unset_fields() {
        let grid = GridOverride { columns: Some(6), gap: None }.apply(GridConfig::default());
        assert_eq!(grid.columns, 6);
        assert!((grid.gap - 16.0).abs() < f64::EPSILON);
        assert_eq!(grid.max_row_span, 8);
    }
}
