//! Layout CLI commands.

use std::path::PathBuf;

use clap::Subcommand;
use colored::Colorize;

use super::{Context, read_capped};
use crate::cli::output;
use crate::constants::MAX_IMPORT_BYTES;
use crate::error::GridboardError;
use crate::grid::GridSize;

/// Layout subcommands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum LayoutCommands {
    /// Export the layout as a versioned JSON snapshot.
    Export {
        /// Write to a file instead of stdout.
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Replace the layout with an exported snapshot.
    ///
    /// The file must be at most 5 MB and contain a `widgets` array. The
    /// current layout is left untouched if the file is rejected.
    Import {
        /// Snapshot file to import.
        path: PathBuf,
    },

    /// Restore the starter layout.
    Reset,

    /// Print the first free slot for a widget of the given size.
    FindSlot {
        /// Width in columns.
        #[arg(long)]
        col_span: u32,

        /// Height in rows.
        #[arg(long)]
        row_span: u32,

        /// Output in JSON format.
        #[arg(long, short = 'j')]
        json: bool,
    },

    /// Check the layout for overlaps, out-of-bounds widgets and duplicate ids.
    ///
    /// Exits with an error if any problem is found.
    Check {
        /// Output in JSON format.
        #[arg(long, short = 'j')]
        json: bool,
    },

    /// Show where the layout is stored.
    Path,
}

/// Execute layout subcommands.
///
/// # Errors
///
/// Returns an error if a file cannot be read or written, an import is
/// rejected, or `check` finds problems.
pub fn execute(cmd: &LayoutCommands, context: &Context) -> Result<(), GridboardError> {
    match cmd {
        LayoutCommands::Export { output } => {
            let json = context.open_store().export_snapshot().to_json()?;
            match output {
                Some(path) => {
                    std::fs::write(path, json + "\n")?;
                    println!("{} {}", "Exported to".green().bold(), path.display());
                }
                None => println!("{json}"),
            }
            Ok(())
        }

        LayoutCommands::Import { path } => {
            let text = read_capped(path, MAX_IMPORT_BYTES)?;
            let mut store = context.open_store();
            store.import_snapshot(&text)?;
            println!(
                "{} {} widgets from {}",
                "Imported".green().bold(),
                store.layout().len(),
                path.display()
            );
            Ok(())
        }

        LayoutCommands::Reset => {
            context.open_store().reset()?;
            println!("{}", "Layout reset to defaults.".green().bold());
            Ok(())
        }

        LayoutCommands::FindSlot { col_span, row_span, json } => {
            let store = context.open_store();
            let size = store.grid().clamp_size(GridSize::new(*col_span, *row_span));
            let position = store.find_free_position(size);

            if *json {
                output::print_highlighted_json(&serde_json::json!({
                    "position": position,
                    "size": size,
                }));
            } else {
                println!("{position} ({size})");
            }
            Ok(())
        }

        LayoutCommands::Check { json } => {
            let layout = context.open_store().layout();
            let violations = layout.violations();

            if *json {
                let messages: Vec<String> = violations.iter().map(ToString::to_string).collect();
                output::print_highlighted_json(&serde_json::json!({
                    "valid": violations.is_empty(),
                    "violations": messages,
                }));
            } else if violations.is_empty() {
                println!("{} {} widgets, no problems", "OK".green().bold(), layout.len());
            } else {
                for violation in &violations {
                    println!("{} {violation}", "✗".red());
                }
            }

            if violations.is_empty() {
                Ok(())
            } else {
                Err(GridboardError::CommandError(format!(
                    "layout has {} problem(s)",
                    violations.len()
                )))
            }
        }

        LayoutCommands::Path => {
            let record = context.record_path();
            let marker = if record.exists() { " (exists)" } else { "" };
            println!("{}{marker}", record.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;
    use crate::config::LoadedConfig;
    use crate::store::seed_widgets;

    fn context(temp: &TempDir) -> Context {
        Context { loaded: LoadedConfig::default(), data_dir: temp.path().join("data") }
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let temp = TempDir::new().unwrap();
        let context = context(&temp);
        let file = temp.path().join("board.json");

        let mut store = context.open_store();
        store.rename("1", "Exported").unwrap();
        drop(store);

        execute(&LayoutCommands::Export { output: Some(file.clone()) }, &context).unwrap();
        execute(&LayoutCommands::Reset, &context).unwrap();
        assert_eq!(context.open_store().get("1").unwrap().title, "Metrics Dashboard");

        execute(&LayoutCommands::Import { path: file }, &context).unwrap();
        assert_eq!(context.open_store().get("1").unwrap().title, "Exported");
    }

    #[test]
    fn test_import_rejects_malformed_file() {
        let temp = TempDir::new().unwrap();
        let context = context(&temp);
        let file = temp.path().join("bad.json");
        std::fs::write(&file, r#"{ "version": "2.0" }"#).unwrap();

        let err = execute(&LayoutCommands::Import { path: file }, &context).unwrap_err();
        assert!(matches!(err, GridboardError::ValidationError(_)));
        assert_eq!(context.open_store().layout().widgets, seed_widgets());
    }

    #[test]
    fn test_import_missing_file() {
        let temp = TempDir::new().unwrap();
        let context = context(&temp);
        let cmd = LayoutCommands::Import { path: PathBuf::from("/nonexistent/board.json") };
        assert!(matches!(execute(&cmd, &context), Err(GridboardError::IoError(_))));
    }

    #[test]
    fn test_check_reports_overlap() {
        let temp = TempDir::new().unwrap();
        let context = context(&temp);

        let mut store = context.open_store();
        store.move_widget("2", crate::grid::GridPosition::new(1, 1)).unwrap();
        drop(store);

        let result = execute(&LayoutCommands::Check { json: false }, &context);
        assert!(matches!(result, Err(GridboardError::CommandError(_))));
    }

    #[test]
    fn test_check_passes_on_seed() {
        let temp = TempDir::new().unwrap();
        let context = context(&temp);
        assert!(execute(&LayoutCommands::Check { json: true }, &context).is_ok());
    }
}
