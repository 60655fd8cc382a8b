//! Widget background colors.

use rand::seq::IndexedRandom;

/// Color used when none is chosen.
pub const DEFAULT_WIDGET_COLOR: &str = "#ffffff";

/// Pastel palette offered for new widgets.
pub const WIDGET_COLOR_PALETTE: [&str; 16] = [
    "#e3f2fd", // Light Blue
    "#f3e5f5", // Light Purple
    "#e8f5e9", // Light Green
    "#fff3e0", // Light Orange
    "#fce4ec", // Light Pink
    "#e0f2f1", // Light Teal
    "#f1f8e9", // Light Lime
    "#fff9c4", // Light Yellow
    "#ffeaa7", // Light Peach
    "#dfe6e9", // Light Gray
    "#fab1a0", // Light Coral
    "#74b9ff", // Sky Blue
    "#a29bfe", // Light Lavender
    "#fd79a8", // Light Rose
    "#fdcb6e", // Light Gold
    "#e17055", // Light Terracotta
];

/// Picks a palette color uniformly at random.
#[must_use]
pub fn random_widget_color() -> &'static str {
    WIDGET_COLOR_PALETTE.choose(&mut rand::rng()).copied().unwrap_or(DEFAULT_WIDGET_COLOR)
}
