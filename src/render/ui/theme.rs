//! Color theme and styling definitions using ratatui colors
//!
//! This module provides color themes for the HUD using ratatui's color system directly to
//! avoid unnecessary abstractions.

use crate::gesture::Direction;
use ratatui::style::{Color, Style};

/// Color theme for HUD elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// No command active
    pub neutral: Color,

    /// LEFT and RIGHT
    pub horizontal: Color,

    pub up: Color,

    pub down: Color,

    /// Threshold lines
    pub grid: Color,

    /// Hand bones
    pub skeleton: Color,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            neutral: Color::Gray,
            horizontal: Color::Yellow,
            up: Color::Green,
            down: Color::Red,
            grid: Color::White,
            skeleton: Color::DarkGray,
            status_bg: Color::Blue,
            status_fg: Color::White,
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            neutral: Color::White,
            horizontal: Color::White,
            up: Color::White,
            down: Color::White,
            grid: Color::White,
            skeleton: Color::White,
            status_bg: Color::Black,
            status_fg: Color::White,
        }
    }

    /// Color used for the palm marker and command label
    pub fn direction_color(&self, direction: Direction) -> Color {
        match direction {
            Direction::Neutral => self.neutral,
            Direction::Left | Direction::Right => self.horizontal,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    /// Base style of the status line
    pub fn status_style(&self) -> Style {
        Style::default().bg(self.status_bg).fg(self.status_fg)
    }
}
