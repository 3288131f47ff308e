//! Log-only renderer for running without a terminal HUD.

use crate::error::Result;
use crate::gesture::Direction;
use crate::input::ControlAction;
use crate::render::ui::{HudRenderer, HudState};
use std::time::Duration;

/// Logs command transitions instead of drawing.
///
/// There is no exit key in this mode; the process stops on Ctrl-C or when the tracker does.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    last_direction: Option<Direction>,
    transitions: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of command changes logged so far
    pub fn transitions(&self) -> u64 {
        self.transitions
    }
}

impl HudRenderer for HeadlessRenderer {
    fn render(&mut self, hud: &HudState) -> Result<()> {
        if self.last_direction != Some(hud.direction) {
            log::info!("{}", hud.format_status_line());
            self.last_direction = Some(hud.direction);
            self.transitions += 1;
        }
        Ok(())
    }

    fn handle_input(&mut self, _timeout: Duration) -> Result<Vec<ControlAction>> {
        Ok(Vec::new())
    }

    fn initialize(&mut self) -> Result<()> {
        log::info!("running headless; press Ctrl-C to exit");
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        Ok((0, 0))
    }
}
