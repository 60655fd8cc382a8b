//! Gridboard - grid layout and collision engine for dashboard builders.
//!
//! Widgets live on a fixed-column grid and may never overlap. The library
//! provides the geometry, collision and placement primitives, a persisted
//! layout store, a pointer gesture controller, and the `gridboard` CLI.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod interaction;
pub mod platform;
pub mod schema;
pub mod store;
pub mod widget;
