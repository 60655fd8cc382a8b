//! CLI command definitions using Clap.
//!
//! Commands are organized into domain-specific submodules:
//!
//! - `widget` - add, remove, rename, move, resize and list widgets
//! - `layout` - import, export, reset and inspect the whole layout
//! - `config_cmd` - configuration file management
//! - `types` - the widget type registry

use std::io;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};
use colored::Colorize;

use crate::config::{self, LoadedConfig};
use crate::error::GridboardError;
use crate::schema;
use crate::store::{FileStorage, LayoutStore, LoadStatus};

pub mod config_cmd;
pub mod layout;
pub mod types;
pub mod widget;

pub use config_cmd::ConfigCommands;
pub use layout::LayoutCommands;
pub use widget::WidgetCommands;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gridboard CLI - arrange dashboard widgets on a fixed-column grid.
#[derive(Parser, Debug)]
#[command(name = "gridboard")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Directory layout records are stored in.
    ///
    /// Overrides `storage.path` from the configuration file.
    #[arg(long, global = true, value_name = "DIR", env = "GRIDBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Widget commands.
    ///
    /// Create, edit and list the widgets of the dashboard.
    #[command(subcommand)]
    Widget(WidgetCommands),

    /// Layout commands.
    ///
    /// Import, export, reset and validate the whole layout.
    #[command(subcommand)]
    Layout(LayoutCommands),

    /// List the available widget types and their default sizes.
    Types {
        /// Output in JSON format instead of table format.
        #[arg(long, short = 'j')]
        json: bool,
    },

    /// Configuration file management commands.
    ///
    /// Initialize, inspect and locate the configuration file.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Output the configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// configuration file. Can be redirected to a file for use with editors
    /// that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    ///
    /// Usage:
    ///   eval "$(gridboard completions --shell zsh)"
    ///   gridboard completions --shell fish > ~/.config/fish/completions/gridboard.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

/// Configuration and storage shared by the commands.
pub struct Context {
    pub loaded: LoadedConfig,
    pub data_dir: PathBuf,
}

impl Context {
    /// Opens the layout store, reporting a recovered load on stderr.
    #[must_use]
    pub fn open_store(&self) -> LayoutStore {
        let storage = FileStorage::new(&self.data_dir);
        let (store, status) =
            LayoutStore::open(storage, self.loaded.config.storage.key(), self.loaded.config.grid);

        if let LoadStatus::Recovered(err) = status {
            eprintln!("{} {err}; using the default layout", "warning:".yellow().bold());
        }
        store
    }

    /// Path of the layout record.
    #[must_use]
    pub fn record_path(&self) -> PathBuf {
        FileStorage::new(&self.data_dir).path_for(self.loaded.config.storage.key())
    }
}

impl Cli {
    /// Returns the custom config path if specified via --config flag.
    #[must_use]
    pub fn config_path(&self) -> Option<PathBuf> { self.config.as_ref().map(PathBuf::from) }

    /// Loads configuration and resolves the storage directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `--config` names a file that does not exist.
    pub fn context(&self) -> Result<Context, GridboardError> {
        let custom = self.config_path();
        if let Some(path) = custom.as_deref().filter(|path| !path.exists()) {
            return Err(GridboardError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let loaded = config::load(custom.as_deref());
        let data_dir = self.data_dir.clone().unwrap_or_else(|| loaded.storage_dir());
        Ok(Context { loaded, data_dir })
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), GridboardError> {
        match &self.command {
            Commands::Widget(cmd) => widget::execute(cmd, &self.context()?),
            Commands::Layout(cmd) => layout::execute(cmd, &self.context()?),
            Commands::Config(cmd) => config_cmd::execute(cmd, &self.context()?),
            Commands::Types { json } => types::execute(*json),

            Commands::Schema => {
                println!("{}", schema::print_schema());
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "gridboard", &mut io::stdout());
    }
}

/// Reads a file, refusing anything larger than `max_bytes`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is too large.
pub fn read_capped(path: &Path, max_bytes: u64) -> Result<String, GridboardError> {
    let size = std::fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(GridboardError::InvalidArguments(format!(
            "{} is {size} bytes; the limit is {max_bytes} bytes",
            path.display()
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}
