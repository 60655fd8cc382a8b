//! Pointer-driven drag and resize.
//!
//! - [`pointer`] - pointer samples and press targets
//! - [`state`] - gesture state and outcomes
//! - [`controller`] - the state machine that previews and commits

pub mod controller;
pub mod pointer;
pub mod state;

pub use controller::InteractionController;
pub use pointer::{ContainerRect, PointerPoint, PointerTarget};
pub use state::{DiscardReason, Gesture, GestureOutcome, InteractionState};
