//! Widget CLI commands.

use clap::Subcommand;
use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::Context;
use crate::cli::output;
use crate::error::GridboardError;
use crate::grid::{GridPosition, GridSize, Placement, check_placement, grid_to_span};
use crate::store::{LayoutStore, NewWidget};
use crate::widget::{Widget, WidgetType, random_widget_color};

/// Widget subcommands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum WidgetCommands {
    /// Create a widget at the first free slot.
    ///
    /// The size comes from the widget type's default size.
    #[command(after_long_help = r#"Examples:
  gridboard widget add --type bar-chart --title "Sales"
  gridboard widget add --type widget-2 --random-color"#)]
    Add {
        /// Widget title. Defaults to "New Widget".
        #[arg(long, short)]
        title: Option<String>,

        /// Widget type (see `gridboard types`).
        #[arg(long = "type", short = 'k', value_name = "TYPE")]
        kind: WidgetType,

        /// Background color, e.g. "#e3f2fd".
        #[arg(long, conflicts_with = "random_color")]
        color: Option<String>,

        /// Pick a color from the palette at random.
        #[arg(long)]
        random_color: bool,
    },

    /// Remove a widget.
    Remove {
        /// Widget id.
        id: String,
    },

    /// Change a widget's title.
    Rename {
        /// Widget id.
        id: String,

        /// New title.
        title: String,
    },

    /// Move a widget to another cell.
    ///
    /// Rejected if the widget would leave the grid or overlap another widget.
    Move {
        /// Widget id.
        id: String,

        /// Target column (0-indexed).
        #[arg(long)]
        col: u32,

        /// Target row (0-indexed).
        #[arg(long)]
        row: u32,
    },

    /// Change a widget's size, keeping its top-left cell.
    ///
    /// Rejected if the widget would leave the grid, exceed the span limits,
    /// or overlap another widget.
    Resize {
        /// Widget id.
        id: String,

        /// Width in columns.
        #[arg(long)]
        col_span: u32,

        /// Height in rows.
        #[arg(long)]
        row_span: u32,
    },

    /// List all widgets.
    List {
        /// Output in JSON format instead of table format.
        #[arg(long, short = 'j')]
        json: bool,

        /// Show detailed information (more columns).
        #[arg(long, short = 'd')]
        detailed: bool,
    },
}

/// Execute widget subcommands.
///
/// # Errors
///
/// Returns an error if the widget does not exist, a placement is rejected,
/// or the layout cannot be persisted.
pub fn execute(cmd: &WidgetCommands, context: &Context) -> Result<(), GridboardError> {
    let mut store = context.open_store();

    match cmd {
        WidgetCommands::Add { title, kind, color, random_color } => {
            let color = if *random_color {
                Some(random_widget_color().to_string())
            } else {
                color.clone()
            };
            let new = NewWidget { title: title.clone().unwrap_or_default(), kind: *kind, color };
            let widget = store.create_widget(new)?;
            println!(
                "{} {} at {} ({})",
                "Added".green().bold(),
                widget.id().bold(),
                widget.position,
                widget.size
            );
            Ok(())
        }

        WidgetCommands::Remove { id } => {
            if !store.remove(id)? {
                return Err(GridboardError::WidgetNotFound(id.clone()));
            }
            println!("{} {}", "Removed".green().bold(), id.bold());
            Ok(())
        }

        WidgetCommands::Rename { id, title } => {
            if !store.rename(id, title.as_str())? {
                return Err(GridboardError::WidgetNotFound(id.clone()));
            }
            println!("{} {} to \"{title}\"", "Renamed".green().bold(), id.bold());
            Ok(())
        }

        WidgetCommands::Move { id, col, row } => {
            let position = GridPosition::new(*col, *row);
            let widget = validated(&store, id, |w| Placement::new(position, w.size))?;
            store.move_widget(widget.id(), position)?;
            println!("{} {} to {position}", "Moved".green().bold(), id.bold());
            Ok(())
        }

        WidgetCommands::Resize { id, col_span, row_span } => {
            let size = GridSize::new(*col_span, *row_span);
            let widget = validated(&store, id, |w| Placement::new(w.position, size))?;
            store.resize(widget.id(), size)?;
            println!("{} {} to {size}", "Resized".green().bold(), id.bold());
            Ok(())
        }

        WidgetCommands::List { json, detailed } => list(&store, *json, *detailed),
    }
}

/// Looks up `id` and checks the placement `target` builds from it.
fn validated(
    store: &LayoutStore,
    id: &str,
    target: impl FnOnce(&Widget) -> Placement,
) -> Result<Widget, GridboardError> {
    let layout = store.layout();
    let widget = layout.get(id).ok_or_else(|| GridboardError::WidgetNotFound(id.to_string()))?;
    check_placement(&target(widget), &layout.widgets, &layout.grid, Some(id))?;
    Ok(widget.clone())
}

fn list(store: &LayoutStore, json: bool, detailed: bool) -> Result<(), GridboardError> {
    #[derive(Tabled)]
    struct WidgetRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Title")]
        title: String,
        #[tabled(rename = "Type")]
        kind: String,
        #[tabled(rename = "Position")]
        position: String,
        #[tabled(rename = "Size")]
        size: String,
        #[tabled(rename = "Color")]
        color: String,
    }

    #[derive(Tabled)]
    struct DetailedWidgetRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Title")]
        title: String,
        #[tabled(rename = "Type")]
        kind: String,
        #[tabled(rename = "Position")]
        position: String,
        #[tabled(rename = "Size")]
        size: String,
        #[tabled(rename = "grid-column")]
        column: String,
        #[tabled(rename = "grid-row")]
        row: String,
        #[tabled(rename = "Color")]
        color: String,
        #[tabled(rename = "Config")]
        config: String,
    }

    let layout = store.layout();

    if json {
        output::print_highlighted_json(&serde_json::to_value(&layout.widgets)?);
        return Ok(());
    }

    if layout.is_empty() {
        println!("{}", "No widgets.".dimmed());
        return Ok(());
    }

    let table = if detailed {
        let rows: Vec<DetailedWidgetRow> = layout
            .widgets
            .iter()
            .map(|w| {
                let span = grid_to_span(w.position, w.size);
                DetailedWidgetRow {
                    id: w.id().to_string(),
                    title: output::truncate(&w.title, 32),
                    kind: w.kind.to_string(),
                    position: w.position.to_string(),
                    size: w.size.to_string(),
                    column: span.column_css(),
                    row: span.row_css(),
                    color: w.color.clone(),
                    config: w.config.as_ref().map_or_else(String::new, |config| {
                        config.keys().cloned().collect::<Vec<_>>().join(", ")
                    }),
                }
            })
            .collect();
        Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(3..7)).with(Alignment::right()))
            .to_string()
    } else {
        let rows: Vec<WidgetRow> = layout
            .widgets
            .iter()
            .map(|w| WidgetRow {
                id: w.id().to_string(),
                title: output::truncate(&w.title, 32),
                kind: w.kind.to_string(),
                position: w.position.to_string(),
                size: w.size.to_string(),
                color: w.color.clone(),
            })
            .collect();
        Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(3..5)).with(Alignment::right()))
            .to_string()
    };

    println!("{}", format!("Widgets ({})", layout.len()).bold());
    println!("{table}");
    Ok(())
}
