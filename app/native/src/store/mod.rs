//! Layout state: the committed layout value, its store, and persistence.
//!
//! - [`layout`] - immutable layout value and invariant checks
//! - [`layout_store`] - the observable, persisting store
//! - [`storage`] - file and memory backends
//! - [`snapshot`] - persisted record and export file formats
//! - [`seed`] - the starter layout

pub mod layout;
pub mod layout_store;
pub mod seed;
pub mod snapshot;
pub mod storage;

pub use layout::{Layout, LayoutViolation};
pub use layout_store::{DEFAULT_WIDGET_TITLE, ImportError, LayoutStore, LoadStatus, NewWidget};
pub use seed::seed_widgets;
pub use snapshot::{GridOverride, LayoutSnapshot, ParsedLayout, ValidationError, parse_record, parse_snapshot};
pub use storage::{FileStorage, LayoutStorage, MemoryStorage, StorageError};
