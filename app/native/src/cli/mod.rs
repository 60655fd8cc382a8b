//! CLI module for Gridboard.
//!
//! Every command opens the layout store from the configured storage
//! directory, applies at most one mutation, and exits.

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;

use crate::error::GridboardError;

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), GridboardError> {
    let cli = Cli::parse();
    cli.execute()
}
