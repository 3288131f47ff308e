//! Rendering subsystem.
//!
//! Hosts the HUD renderers: the ratatui terminal view and a log-only headless variant.

pub mod ui;

pub use ui::{ColorTheme, HeadlessRenderer, HudRenderer, HudState, TerminalHud};
