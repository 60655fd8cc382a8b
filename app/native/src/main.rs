#![allow(clippy::multiple_crate_versions)]

//! Gridboard - command-line front end for the dashboard layout engine.
//!
//! Logs go to stderr. The level is read from `GRIDBOARD_LOG` and defaults
//! to `warn`.

use gridboard_lib::constants::LOG_ENV_VAR;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if let Err(err) = gridboard_lib::cli::run() {
        eprintln!("gridboard: {err}");
        std::process::exit(1);
    }
}
