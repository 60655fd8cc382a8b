//! JSON Schema for the configuration file.

use crate::config::GridboardConfig;

/// Generates a JSON Schema for the Gridboard configuration.
///
/// The schema includes all configuration options with their types,
/// descriptions, and default values.
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(GridboardConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert("$id".to_string(), serde_json::json!("gridboard.schema.json"));
    }

    schema
}

/// Pretty-printed JSON Schema for the Gridboard configuration.
#[must_use]
pub fn print_schema() -> String {
    serde_json::to_string_pretty(&generate_schema()).unwrap_or_default()
}
