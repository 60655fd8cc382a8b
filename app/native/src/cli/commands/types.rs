//! Widget type registry listing.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::error::GridboardError;
use crate::widget::{WIDGET_TYPES, WidgetTypeMetadata};

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Default size")]
    size: String,
    #[tabled(rename = "Online")]
    online: String,
    #[tabled(rename = "Description")]
    description: &'static str,
}

impl From<&WidgetTypeMetadata> for TypeRow {
    fn from(meta: &WidgetTypeMetadata) -> Self {
        Self {
            kind: meta.kind.to_string(),
            label: meta.label,
            size: meta.default_size.to_string(),
            online: output::format_bool(meta.online_source),
            description: meta.description,
        }
    }
}

/// Prints the widget type registry.
///
/// # Errors
///
/// Returns an error if the registry cannot be serialized.
pub fn execute(json: bool) -> Result<(), GridboardError> {
    if json {
        output::print_highlighted_json(&serde_json::to_value(WIDGET_TYPES)?);
    } else {
        println!("{}", render_table());
    }
    Ok(())
}

fn render_table() -> String {
    let rows: Vec<TypeRow> = WIDGET_TYPES.iter().map(TypeRow::from).collect();
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..4)).with(Alignment::center()))
        .to_string()
}
