//! # palmpad - Hands-free Directional Keyboard Control
//!
//! Turns the position of one tracked hand into arrow-key presses, so a game can be played by
//! moving a palm in front of a camera.
//!
//! ## Features
//!
//! - **Dominant-axis classifier**: only the axis with the larger displacement counts, which
//!   keeps diagonals from flickering between two keys
//! - **Idempotent key driver**: at most one key held, never a duplicate press or a stuck key
//! - **External tracker**: camera capture and landmark detection run in a separate process
//!   that streams JSON lines
//! - **Terminal HUD**: threshold grid, hand skeleton and active command
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - Thresholds, camera index and tracker settings
//! - [`gesture`] - Landmark types and the classifier
//! - [`keys`] - Key driver and injectors
//! - [`tracking`] - Tracked frame sources
//! - [`input`] - Exit key handling
//! - [`render::ui`](crate::render::ui) - HUD renderers
//! - [`app`] - The frame loop

// Core modules
pub mod config;
pub mod error;
pub mod gesture;
pub mod keys;

// I/O subsystems
pub mod input;
pub mod render;
pub mod tracking;

// Orchestration
pub mod app;

// Re-export commonly used types for convenience
pub use error::{PalmpadError, Result};

// Public API surface for external usage
pub use app::{Application, ExitReason};
pub use config::Config;
pub use gesture::{classify, Bounds, Direction, NormalizedPoint};
pub use keys::{DirectionKey, KeyDriver, KeyInjector};
pub use tracking::{HandTracker, LineTracker, TrackedFrame};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
