//! Input subsystem.
//!
//! Only the HUD terminal is read; the hand itself arrives through [`crate::tracking`].

pub mod service;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::input` rather than reaching into submodules.
pub use service::{ControlAction, InputService, InputStateMachine};
