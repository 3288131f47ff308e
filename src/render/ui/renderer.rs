//! HUD renderer trait
//!
//! This module defines the `HudRenderer` trait for drawing the controller HUD, reading the
//! exit key, and managing lifecycle hooks such as initialization and cleanup.

use crate::error::Result;
use crate::input::ControlAction;
use crate::render::ui::state::HudState;
use std::time::Duration;

/// Core trait for HUD rendering and event handling
pub trait HudRenderer {
    /// Draw the current HUD state
    ///
    /// This method should:
    /// - Draw the threshold grid
    /// - Draw the tracked hand, if any
    /// - Show the active command
    fn render(&mut self, hud: &HudState) -> Result<()>;

    /// Collect control actions (exit key, resize), waiting at most `timeout`
    fn handle_input(&mut self, timeout: Duration) -> Result<Vec<ControlAction>>;

    /// Initialize the display
    ///
    /// This method should:
    /// - Set up raw mode
    /// - Switch to the alternate screen
    fn initialize(&mut self) -> Result<()>;

    /// Clean up and restore terminal state
    ///
    /// Must be safe to call more than once.
    fn cleanup(&mut self) -> Result<()>;

    /// Get current display dimensions
    fn get_terminal_size(&self) -> Result<(u16, u16)>; // (width, height)
}
