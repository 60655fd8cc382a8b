//! Config CLI commands: create, inspect and locate the configuration.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use colored::Colorize;

use super::Context;
use crate::cli::output;
use crate::config::template::{create_config_file, generate_config_template};
use crate::config::{LoadedConfig, config_paths, load_config_from_path};
use crate::error::GridboardError;

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Write a commented configuration template.
    ///
    /// Every grid and storage option is listed with its default value and
    /// commented out, so the new file loads as the defaults.
    #[command(after_long_help = r#"Examples:
  gridboard config init                        # ~/.config/gridboard/config.jsonc
  gridboard config init --path ./board.jsonc   # next to a project
  gridboard config init --stdout > board.jsonc"#)]
    Init {
        /// Replace an existing file.
        #[arg(long, short)]
        force: bool,

        /// Where to write the file instead of the first search path.
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the template instead of writing it.
        #[arg(long, conflicts_with_all = ["force", "path"])]
        stdout: bool,
    },

    /// Print the effective grid and storage settings.
    Show {
        /// Output in JSON format.
        #[arg(long, short = 'j')]
        json: bool,
    },

    /// Show the configuration search paths and the layout storage location.
    Path,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be written.
pub fn execute(cmd: &ConfigCommands, context: &Context) -> Result<(), GridboardError> {
    match cmd {
        ConfigCommands::Init { stdout: true, .. } => {
            println!("{}", generate_config_template());
            Ok(())
        }
        ConfigCommands::Init { force, path, .. } => {
            let target = path.clone().unwrap_or_else(default_config_path);
            let loaded = init_config(&target, *force)?;
            println!("{} {}", "Created".green().bold(), target.display());
            println!("Layouts will be stored in {}", loaded.storage_dir().display());
            Ok(())
        }
        ConfigCommands::Show { json } => show_config(context, *json),
        ConfigCommands::Path => {
            show_config_path(context);
            Ok(())
        }
    }
}

fn default_config_path() -> PathBuf {
    config_paths().into_iter().next().unwrap_or_else(|| PathBuf::from("config.jsonc"))
}

/// Writes the template to `target` and loads it back.
fn init_config(target: &Path, force: bool) -> Result<LoadedConfig, GridboardError> {
    if target.exists() && !force {
        return Err(GridboardError::ConfigError(format!(
            "{} already exists; pass --force to replace it",
            target.display()
        )));
    }

    create_config_file(target)?;
    let (config, path) = load_config_from_path(target)?;
    Ok(LoadedConfig { config, path: Some(path) })
}

fn show_config(context: &Context, json: bool) -> Result<(), GridboardError> {
    let config = &context.loaded.config;

    if json {
        output::print_highlighted_json(&serde_json::json!({
            "source": context.loaded.path.as_ref().map(|path| path.display().to_string()),
            "grid": config.grid,
            "storage": {
                "directory": context.data_dir.display().to_string(),
                "key": config.storage.key(),
            },
        }));
        return Ok(());
    }

    let source = context
        .loaded
        .path
        .as_ref()
        .map_or_else(|| "defaults".to_string(), |path| path.display().to_string());
    let grid = &config.grid;

    println!("{} {source}", "Source:".bold());
    println!(
        "{} {} columns, {}px rows, {}px gap, {}px padding",
        "Grid:".bold(),
        grid.columns,
        grid.row_height,
        grid.gap,
        grid.padding
    );
    println!(
        "{} {}x{} max span, {} rows scanned for free slots",
        "Limits:".bold(),
        grid.max_col_span,
        grid.max_row_span,
        grid.max_search_rows
    );
    println!("{} {}", "Storage:".bold(), context.record_path().display());
    Ok(())
}

fn show_config_path(context: &Context) {
    let active = context.loaded.path.as_deref();
    let searched = config_paths();

    println!("Search paths, highest priority first:");
    for (i, path) in searched.iter().enumerate() {
        let marker = match (Some(path.as_path()) == active, path.exists()) {
            (true, _) => " (active)".green().to_string(),
            (false, true) => " (exists)".to_string(),
            (false, false) => String::new(),
        };
        println!("  {}. {}{marker}", i + 1, path.display());
    }

    match active {
        None => println!("\nNo configuration file found. Run 'gridboard config init'."),
        Some(path) if !searched.iter().any(|p| p == path) => {
            println!("\nUsing --config {}", path.display());
        }
        Some(_) => {}
    }

    println!("\nLayout record: {}", context.record_path().display());
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::config::GridboardConfig;

    #[test]
    fn test_init_writes_template_that_loads_as_defaults() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("nested").join("config.jsonc");

        let loaded = init_config(&target, false).unwrap();
        assert_eq!(loaded.config, GridboardConfig::default());
        assert_eq!(loaded.path.as_deref(), Some(target.as_path()));
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("config.jsonc");
        std::fs::write(&target, r#"{ "grid": { "columns": 6 } }"#).unwrap();

        let err = init_config(&target, false).unwrap_err();
        assert!(matches!(err, GridboardError::ConfigError(_)));
        assert_eq!(load_config_from_path(&target).unwrap().0.grid.columns, 6);

        let loaded = init_config(&target, true).unwrap();
        assert_eq!(loaded.config.grid.columns, 12);
    }

    #[test]
    fn test_init_resolves_relative_storage_next_to_file() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("config.jsonc");

        let loaded = init_config(&target, false).unwrap();
        std::fs::write(&target, r#"{ "storage": { "path": "layouts" } }"#).unwrap();
        let (config, path) = load_config_from_path(&target).unwrap();
        let reloaded = LoadedConfig { config, path: Some(path) };

        assert_ne!(loaded.storage_dir(), reloaded.storage_dir());
        assert_eq!(reloaded.storage_dir(), temp.path().join("layouts"));
    }

    #[test]
    fn test_show_uses_context() {
        let temp = TempDir::new().unwrap();
        let context = Context { loaded: LoadedConfig::default(), data_dir: temp.path().to_path_buf() };
        assert!(show_config(&context, true).is_ok());
        assert!(show_config(&context, false).is_ok());
    }
}
