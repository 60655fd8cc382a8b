//! Widget records, the type registry and the color palette.

pub mod palette;
pub mod registry;
pub mod types;

pub use palette::{DEFAULT_WIDGET_COLOR, WIDGET_COLOR_PALETTE, random_widget_color};
pub use registry::{WIDGET_TYPES, WidgetTypeMetadata, default_size, metadata};
pub use types::{Widget, WidgetConfig, WidgetType};
