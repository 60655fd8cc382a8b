//! Platform helpers.
//!
//! - [`path`] - shell-like path expansion

pub mod path;

pub use path::{expand, expand_and_resolve};
