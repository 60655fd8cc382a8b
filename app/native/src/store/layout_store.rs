//! The authoritative layout store.
//!
//! Holds the current [`Layout`] in an `eyeball` observable. Every effective
//! mutation builds a new layout value, bumps the revision, publishes it and
//! writes the persisted record synchronously. Mutations that match nothing
//! publish nothing and write nothing.
//!
//! Persistence failures never roll back the in-memory commit: the returned
//! [`StorageError`] only reports that the write did not reach storage.

use std::sync::Arc;

use eyeball::{Observable, Subscriber};
use thiserror::Error;

use super::layout::Layout;
use super::seed::seed_widgets;
use super::snapshot::{LayoutSnapshot, ParsedLayout, PersistedRecord, ValidationError, parse_record, parse_snapshot};
use super::storage::{LayoutStorage, StorageError};
use crate::grid::{GridConfig, GridPosition, GridSize, Placement, find_free_position};
use crate::widget::{DEFAULT_WIDGET_COLOR, Widget, WidgetType, default_size};

/// Title given to widgets created without one.
pub const DEFAULT_WIDGET_TITLE: &str = "New Widget";

/// Failure of [`LayoutStore::import_snapshot`].
#[derive(Debug, Error)]
pub enum ImportError {
    /// The payload was rejected; the store is unchanged.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The payload was applied but could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// How the initial layout was obtained.
#[derive(Debug)]
pub enum LoadStatus {
    /// Read from storage.
    Restored,
    /// Nothing was stored; the seed layout is in use.
    Seeded,
    /// Storage could not be read or decoded; the seed layout is in use.
    Recovered(StorageError),
}

impl LoadStatus {
    /// Returns true if a stored layout was loaded.
    #[must_use]
    pub const fn is_restored(&self) -> bool { matches!(self, Self::Restored) }
}

/// Caller-supplied fields of a new widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWidget {
    pub title: String,
    pub kind: WidgetType,
    pub color: Option<String>,
}

impl NewWidget {
    /// A new widget of `kind` with the given title and the default color.
    #[must_use]
    pub fn new(title: impl Into<String>, kind: WidgetType) -> Self {
        Self { title: title.into(), kind, color: None }
    }

    /// Sets the background color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Owns the committed layout and its persistence.
pub struct LayoutStore {
    layout: Observable<Arc<Layout>>,
    storage: Box<dyn LayoutStorage>,
    key: String,
    configured_grid: GridConfig,
}

impl std::fmt::Debug for LayoutStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutStore")
            .field("key", &self.key)
            .field("layout", &**Observable::get(&self.layout))
            .finish_non_exhaustive()
    }
}

impl LayoutStore {
    /// Loads the layout stored under `key`, falling back to the seed layout.
    ///
    /// `grid` is the configured grid; a stored record may override its
    /// columns and gap.
    pub fn open(
        storage: impl LayoutStorage + 'static,
        key: impl Into<String>,
        grid: GridConfig,
    ) -> (Self, LoadStatus) {
        let key = key.into();

        let (layout, status) = match load(&storage, &key) {
            Ok(Some(parsed)) => {
                let grid = parsed.grid.map_or(grid, |over| over.apply(grid));
                tracing::debug!(key = %key, widgets = parsed.widgets.len(), "restored layout");
                (Layout::new(grid, parsed.widgets), LoadStatus::Restored)
            }
            Ok(None) => {
                tracing::debug!(key = %key, "no stored layout, using seed");
                (Layout::new(grid, seed_widgets()), LoadStatus::Seeded)
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "failed to load layout, using seed");
                (Layout::new(grid, seed_widgets()), LoadStatus::Recovered(err))
            }
        };

        let store = Self {
            layout: Observable::new(Arc::new(layout)),
            storage: Box::new(storage),
            key,
            configured_grid: grid,
        };
        (store, status)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The current committed layout.
    #[must_use]
    pub fn layout(&self) -> Arc<Layout> { Arc::clone(Observable::get(&self.layout)) }

    /// Subscribes to committed layouts.
    #[must_use]
    pub fn subscribe(&self) -> Subscriber<Arc<Layout>> { Observable::subscribe(&self.layout) }

    /// The grid widgets are currently placed on.
    #[must_use]
    pub fn grid(&self) -> GridConfig { Observable::get(&self.layout).grid }

    /// Current revision.
    #[must_use]
    pub fn revision(&self) -> u64 { Observable::get(&self.layout).revision }

    /// Returns a copy of the widget with `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Widget> { Observable::get(&self.layout).get(id).cloned() }

    /// Storage key the layout is persisted under.
    #[must_use]
    pub fn key(&self) -> &str { &self.key }

    /// First free slot for a widget of `size` in the current layout.
    #[must_use]
    pub fn find_free_position(&self, size: GridSize) -> GridPosition {
        let layout = Observable::get(&self.layout);
        find_free_position(size, &layout.widgets, &layout.grid)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Appends a widget.
    ///
    /// The id must be unique and the placement free; neither is checked.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the new layout could not be persisted.
    pub fn add(&mut self, widget: Widget) -> Result<(), StorageError> {
        tracing::info!(
            widget_id = %widget.id(),
            kind = %widget.kind,
            position = %widget.position,
            size = %widget.size,
            "adding widget"
        );
        self.commit(|layout| {
            layout.widgets.push(widget);
            true
        })
        .map(|_| ())
    }

    /// Creates a widget of the registry's default size at the first free slot
    /// and appends it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the new layout could not be persisted. The
    /// widget is still part of the layout.
    pub fn create_widget(&mut self, new: NewWidget) -> Result<Widget, StorageError> {
        let grid = self.grid();
        let size = grid.clamp_size(default_size(new.kind));
        let position = self.find_free_position(size);

        let title = if new.title.trim().is_empty() { DEFAULT_WIDGET_TITLE.to_string() } else { new.title };
        let color = new.color.unwrap_or_else(|| DEFAULT_WIDGET_COLOR.to_string());
        let id = format!("widget-{}", uuid::Uuid::now_v7());

        let widget = Widget::new(id, title, new.kind, Placement::new(position, size), color);
        self.add(widget.clone())?;
        Ok(widget)
    }

    /// Removes the widget with `id`. Returns false if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the new layout could not be persisted.
    pub fn remove(&mut self, id: &str) -> Result<bool, StorageError> {
        let removed = self.commit(|layout| {
            let before = layout.widgets.len();
            layout.widgets.retain(|w| w.id() != id);
            layout.widgets.len() != before
        })?;
        if removed {
            tracing::info!(widget_id = %id, "removed widget");
        }
        Ok(removed)
    }

    /// Replaces the title of the widget with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the new layout could not be persisted.
    pub fn rename(&mut self, id: &str, title: impl Into<String>) -> Result<bool, StorageError> {
        let title = title.into();
        self.update(id, "renamed widget", |widget| widget.title = title)
    }

    /// Moves the widget with `id`. The position is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the new layout could not be persisted.
    pub fn move_widget(&mut self, id: &str, position: GridPosition) -> Result<bool, StorageError> {
        self.update(id, "moved widget", |widget| widget.position = position)
    }

    /// Resizes the widget with `id`. The size is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the new layout could not be persisted.
    pub fn resize(&mut self, id: &str, size: GridSize) -> Result<bool, StorageError> {
        self.update(id, "resized widget", |widget| widget.size = size)
    }

    /// Replaces the widgets with the seed layout and the grid with the
    /// configured grid.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the new layout could not be persisted.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        let grid = self.configured_grid;
        tracing::info!("resetting layout to seed");
        self.commit(|layout| {
            layout.grid = grid;
            layout.widgets = seed_widgets();
            true
        })
        .map(|_| ())
    }

    // ========================================================================
    // Import / Export
    // ========================================================================

    /// Captures the current layout for export.
    #[must_use]
    pub fn export_snapshot(&self) -> LayoutSnapshot { LayoutSnapshot::capture(&self.layout()) }

    /// Replaces the whole layout with the one in `text`.
    ///
    /// A `layout` section overrides columns and gap of the current grid. The
    /// widgets must fit that grid: every span at least 1, no widget past the
    /// last column, unique ids and no overlaps.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Validation`] if `text` is malformed or its
    /// widgets break those rules, in which case nothing changes, or
    /// [`ImportError::Storage`] if the imported layout could not be persisted.
    pub fn import_snapshot(&mut self, text: &str) -> Result<(), ImportError> {
        let candidate = self.parse_import(text).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected layout import");
        })?;

        tracing::info!(widgets = candidate.widgets.len(), "importing layout");
        self.commit(|layout| {
            layout.grid = candidate.grid;
            layout.widgets = candidate.widgets;
            true
        })?;
        Ok(())
    }

    /// Parses `text` into the layout an import would produce.
    fn parse_import(&self, text: &str) -> Result<Layout, ValidationError> {
        let ParsedLayout { widgets, grid } = parse_snapshot(text)?;
        let current = self.grid();
        let grid = grid.map_or(current, |over| over.apply(current));

        let candidate = Layout::new(grid, widgets);
        let violations = candidate.violations();
        if violations.is_empty() {
            Ok(candidate)
        } else {
            Err(ValidationError::BrokenInvariants(violations))
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn update<F>(&mut self, id: &str, action: &str, apply: F) -> Result<bool, StorageError>
    where
        F: FnOnce(&mut Widget),
    {
        let updated = self.commit(|layout| {
            layout.widgets.iter_mut().find(|w| w.id() == id).map(apply).is_some()
        })?;
        if updated {
            tracing::info!(widget_id = %id, "{action}");
        } else {
            tracing::debug!(widget_id = %id, "no widget to update");
        }
        Ok(updated)
    }

    /// Applies `mutate` to a copy of the layout and publishes it if
    /// `mutate` returns true.
    fn commit<F>(&mut self, mutate: F) -> Result<bool, StorageError>
    where
        F: FnOnce(&mut Layout) -> bool,
    {
        let mut next = Layout::clone(&**Observable::get(&self.layout));
        if !mutate(&mut next) {
            return Ok(false);
        }
        next.revision += 1;

        let next = Arc::new(next);
        Observable::set(&mut self.layout, Arc::clone(&next));
        self.persist(&next)?;
        Ok(true)
    }

    fn persist(&self, layout: &Layout) -> Result<(), StorageError> {
        let result = serde_json::to_string(&PersistedRecord::new(layout))
            .map_err(StorageError::Encode)
            .and_then(|json| self.storage.write(&self.key, &json));

        if let Err(err) = &result {
            tracing::warn!(key = %self.key, revision = layout.revision, error = %err, "failed to persist layout");
        }
        result
    }
}

fn load(storage: &dyn LayoutStorage, key: &str) -> Result<Option<ParsedLayout>, StorageError> {
    let Some(text) = storage.read(key)? else {
        return Ok(None);
    };
    parse_record(&text)
        .map(Some)
        .map_err(|source| StorageError::Decode { key: key.to_string(), source })
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use tempfile::TempDir;

    use super::*;
    use crate::store::{FileStorage, LayoutViolation, MemoryStorage};

    const KEY: &str = "test-layout";

    fn open_memory() -> (LayoutStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        let (store, _) = LayoutStore::open(storage.clone(), KEY, GridConfig::default());
        (store, storage)
    }

    // ========================================================================
    // Loading
    // ========================================================================

    #[test]
    fn test_open_empty_storage_seeds() {
        let (store, status) = LayoutStore::open(MemoryStorage::new(), KEY, GridConfig::default());
        assert!(matches!(status, LoadStatus::Seeded));
        assert_eq!(store.layout().widgets, seed_widgets());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_open_corrupt_storage_recovers_with_seed() {
        let storage = MemoryStorage::with_entry(KEY, "{ not json");
        let (store, status) = LayoutStore::open(storage, KEY, GridConfig::default());
        assert!(matches!(status, LoadStatus::Recovered(StorageError::Decode { .. })));
        assert_eq!(store.layout().widgets, seed_widgets());
    }

    #[test]
    fn test_open_restores_and_applies_grid_override() {
        let record = r##"{
            "widgets": [{ "id": "x", "title": "X", "type": "widget-2",
                "gridPosition": { "col": 0, "row": 0 },
                "gridSize": { "colSpan": 2, "rowSpan": 1 }, "color": "#fff" }],
            "layout": { "columns": 6, "gap": 8 }
        }"##;
        let storage = MemoryStorage::with_entry(KEY, record);
        let (store, status) = LayoutStore::open(storage, KEY, GridConfig::default());

        assert!(status.is_restored());
        assert_eq!(store.grid().columns, 6);
        assert!((store.grid().gap - 8.0).abs() < f64::EPSILON);
        assert_eq!(store.get("x").unwrap().title, "X");
    }

    #[test]
    fn test_open_accepts_legacy_bare_array() {
        let storage = MemoryStorage::with_entry(KEY, "[]");
        let (store, status) = LayoutStore::open(storage, KEY, GridConfig::default());
        assert!(status.is_restored());
        assert!(store.layout().is_empty());
    }

    #[test]
    fn test_open_does_not_write() {
        let (_store, storage) = open_memory();
        assert!(storage.get(KEY).is_none());
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    #[test]
    fn test_move_persists_and_bumps_revision() {
        let (mut store, storage) = open_memory();

        assert!(store.move_widget("2", GridPosition::new(6, 3)).unwrap());
        assert_eq!(store.revision(), 1);
        assert_eq!(store.get("2").unwrap().position, GridPosition::new(6, 3));

        let (reopened, _) = LayoutStore::open(storage, KEY, GridConfig::default());
        assert_eq!(reopened.get("2").unwrap().position, GridPosition::new(6, 3));
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let (mut store, storage) = open_memory();

        assert!(!store.move_widget("nope", GridPosition::new(1, 1)).unwrap());
        assert!(!store.resize("nope", GridSize::new(1, 1)).unwrap());
        assert!(!store.rename("nope", "x").unwrap());
        assert!(!store.remove("nope").unwrap());

        assert_eq!(store.revision(), 0);
        assert!(storage.get(KEY).is_none());
    }

    #[test]
    fn test_rename_only_changes_title() {
        let (mut store, _) = open_memory();
        let before = store.get("1").unwrap();

        store.rename("1", "Renamed").unwrap();
        let after = store.get("1").unwrap();

        assert_eq!(after.title, "Renamed");
        assert_eq!(after.placement(), before.placement());
        assert_eq!(after.color, before.color);
        assert_eq!(store.get("2"), seed_widgets().into_iter().nth(1));
    }

    #[test]
    fn test_resize_and_remove() {
        let (mut store, _) = open_memory();

        store.resize("1", GridSize::new(2, 4)).unwrap();
        assert_eq!(store.get("1").unwrap().size, GridSize::new(2, 4));

        assert!(store.remove("1").unwrap());
        assert!(store.get("1").is_none());
        assert_eq!(store.layout().len(), 1);
    }

    #[test]
    fn test_committed_layouts_are_not_aliased() {
        let (mut store, _) = open_memory();
        let before = store.layout();

        store.move_widget("1", GridPosition::new(0, 5)).unwrap();

        assert_eq!(before.get("1").unwrap().position, GridPosition::new(0, 0));
        assert!(!Arc::ptr_eq(&before, &store.layout()));
    }

    #[test]
    fn test_create_widget_uses_default_size_and_free_slot() {
        let (mut store, _) = open_memory();

        let widget = store.create_widget(NewWidget::new("Sales", WidgetType::BarChart)).unwrap();

        assert!(widget.id().starts_with("widget-"));
        assert_eq!(widget.size, GridSize::new(3, 2));
        assert_eq!(widget.position, GridPosition::new(5, 0));
        assert_eq!(widget.color, DEFAULT_WIDGET_COLOR);
        assert!(store.layout().is_valid());
    }

    #[test]
    fn test_create_widget_defaults_empty_title() {
        let (mut store, _) = open_memory();
        let widget = store
            .create_widget(NewWidget::new("  ", WidgetType::ProgressRing).with_color("#74b9ff"))
            .unwrap();
        assert_eq!(widget.title, DEFAULT_WIDGET_TITLE);
        assert_eq!(widget.color, "#74b9ff");
    }

    #[test]
    fn test_create_widget_clamps_size_to_narrow_grid() {
        let grid = GridConfig { columns: 2, ..GridConfig::default() };
        let (mut store, _) = LayoutStore::open(MemoryStorage::with_entry(KEY, "[]"), KEY, grid);

        let widget = store.create_widget(NewWidget::new("Table", WidgetType::DataTable)).unwrap();
        assert_eq!(widget.size, GridSize::new(2, 3));
        assert_eq!(widget.position, GridPosition::new(0, 0));
    }

    #[test]
    fn test_ids_are_unique() {
        let (mut store, _) = open_memory();
        let a = store.create_widget(NewWidget::new("a", WidgetType::Text)).unwrap();
        let b = store.create_widget(NewWidget::new("b", WidgetType::Text)).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_reset_restores_seed_and_configured_grid() {
        let (mut store, _) = open_memory();
        store
            .import_snapshot(r#"{ "widgets": [], "layout": { "columns": 4 } }"#)
            .unwrap();
        assert_eq!(store.grid().columns, 4);

        store.reset().unwrap();
        assert_eq!(store.layout().widgets, seed_widgets());
        assert_eq!(store.grid(), GridConfig::default());
    }

    #[test]
    fn test_write_failure_keeps_in_memory_commit() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();

        let (mut store, _) = LayoutStore::open(FileStorage::new(&blocker), KEY, GridConfig::default());
        let result = store.rename("1", "Still here");

        assert!(matches!(result, Err(StorageError::Write { .. })));
        assert_eq!(store.get("1").unwrap().title, "Still here");
        assert_eq!(store.revision(), 1);
    }

    // ========================================================================
    // Import / Export
    // ========================================================================

    #[test]
    fn test_export_import_round_trip() {
        let (mut source, _) = open_memory();
        source.create_widget(NewWidget::new("Extra", WidgetType::LineChart)).unwrap();
        let json = source.export_snapshot().to_json().unwrap();

        let (mut target, _) = LayoutStore::open(MemoryStorage::with_entry(KEY, "[]"), KEY, GridConfig::default());
        target.import_snapshot(&json).unwrap();

        assert_eq!(target.layout().widgets, source.layout().widgets);
    }

    #[test]
    fn test_rejected_import_leaves_store_unchanged() {
        let (mut store, storage) = open_memory();

        let err = store.import_snapshot(r#"{ "widgets": "nope" }"#).unwrap_err();
        assert!(matches!(err, ImportError::Validation(ValidationError::WidgetsNotArray)));
        assert_eq!(store.revision(), 0);
        assert_eq!(store.layout().widgets, seed_widgets());
        assert!(storage.get(KEY).is_none());
    }

    fn import_widgets(widgets: &str) -> String {
        format!(r#"{{ "version": "2.0", "widgets": [{widgets}] }}"#)
    }

    fn widget_json(id: &str, col: u32, col_span: u32, row_span: u32) -> String {
        format!(
            r##"{{ "id": "{id}", "title": "{id}", "type": "widget-2",
                 "gridPosition": {{ "col": {col}, "row": 0 }},
                 "gridSize": {{ "colSpan": {col_span}, "rowSpan": {row_span} }},
                 "color": "#fff" }}"##
        )
    }

    fn assert_import_rejected(text: &str, expected: &LayoutViolation) {
        let (mut store, storage) = open_memory();

        let err = store.import_snapshot(text).unwrap_err();
        let ImportError::Validation(ValidationError::BrokenInvariants(violations)) = err else {
            panic!("expected broken invariants, got {err:?}");
        };
        assert!(violations.contains(expected), "{violations:?}");
        assert_eq!(store.revision(), 0);
        assert_eq!(store.layout().widgets, seed_widgets());
        assert!(storage.get(KEY).is_none());
    }

    #[test]
    fn test_import_rejects_out_of_bounds_widget() {
        assert_import_rejected(
            &import_widgets(&widget_json("x", 11, 3, 1)),
            &LayoutViolation::OutOfBounds { id: "x".to_string() },
        );
    }

    #[test]
    fn test_import_rejects_zero_span() {
        assert_import_rejected(
            &import_widgets(&widget_json("x", 0, 2, 0)),
            &LayoutViolation::ZeroSpan { id: "x".to_string() },
        );
    }

    #[test]
    fn test_import_rejects_duplicate_ids() {
        let widgets = format!("{}, {}", widget_json("x", 0, 2, 1), widget_json("x", 4, 2, 1));
        assert_import_rejected(
            &import_widgets(&widgets),
            &LayoutViolation::DuplicateId { id: "x".to_string() },
        );
    }

    #[test]
    fn test_import_rejects_overlap() {
        let widgets = format!("{}, {}", widget_json("x", 0, 3, 1), widget_json("y", 2, 2, 1));
        assert_import_rejected(
            &import_widgets(&widgets),
            &LayoutViolation::Overlap { a: "x".to_string(), b: "y".to_string() },
        );
    }

    #[test]
    fn test_import_checks_bounds_against_overridden_columns() {
        let text = r##"{ "widgets": [
            { "id": "x", "title": "x", "type": "widget-2",
              "gridPosition": { "col": 4, "row": 0 },
              "gridSize": { "colSpan": 3, "rowSpan": 1 }, "color": "#fff" }
        ], "layout": { "columns": 6 } }"##;
        assert_import_rejected(text, &LayoutViolation::OutOfBounds { id: "x".to_string() });
    }

    #[test]
    fn test_import_replaces_wholesale() {
        let (mut store, _) = open_memory();
        store.import_snapshot(r#"{ "widgets": [] }"#).unwrap();
        assert!(store.layout().is_empty());
        assert_eq!(store.revision(), 1);
    }

    // ========================================================================
    // Observation
    // ========================================================================

    #[test]
    fn test_subscriber_sees_commits() {
        let (mut store, _) = open_memory();
        let mut subscriber = store.subscribe();
        assert_eq!(subscriber.get().revision, 0);

        store.rename("2", "Hello").unwrap();

        let layout = block_on(subscriber.next()).unwrap();
        assert_eq!(layout.revision, 1);
        assert_eq!(layout.get("2").unwrap().title, "Hello");
    }

    #[test]
    fn test_subscriber_ends_when_store_drops() {
        let (store, _) = open_memory();
        let mut subscriber = store.subscribe();
        drop(store);
        assert!(block_on(subscriber.next()).is_none());
    }
}
