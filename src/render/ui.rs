//! HUD rendering components.
//!
//! This module hosts the concrete terminal HUD implementation along with the supporting state
//! structure and styling utilities.

pub mod headless;
pub mod renderer;
pub mod state;
pub mod terminal;
pub mod theme;

pub use headless::HeadlessRenderer;
pub use renderer::HudRenderer;
pub use state::HudState;
pub use terminal::TerminalHud;
pub use theme::ColorTheme;

#[cfg(test)]
pub use renderer::tests::MockHudRenderer;

pub use ratatui::style::{Color, Style};
