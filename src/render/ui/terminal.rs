//! Terminal HUD implementation using ratatui
//!
//! Draws the threshold grid, the tracked hand and the active command on a braille canvas, and
//! reads the exit key through the input service.

use crate::error::Result;
use crate::gesture::landmarks::HAND_CONNECTIONS;
use crate::input::{ControlAction, InputService};
use crate::render::ui::{ColorTheme, HudRenderer, HudState};
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Block, Borders, Paragraph,
    },
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Radius of the palm marker, in normalized frame units.
const PALM_RADIUS: f64 = 0.03;

/// Canvas y grows upwards, frame y grows downwards.
fn canvas_y(y: f32) -> f64 {
    1.0 - y as f64
}

/// Terminal HUD with ratatui backend
///
/// Raw mode and the alternate screen are tracked on their own so a partially completed
/// `initialize` is still undone by `cleanup`.
pub struct TerminalHud {
    terminal: Option<CrosstermTerminal>,
    raw_mode: bool,
    alternate_screen: bool,
    theme: ColorTheme,
    input: InputService,
}

impl TerminalHud {
    /// Create a new terminal HUD with the default theme
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    /// Create terminal HUD with custom theme
    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            raw_mode: false,
            alternate_screen: false,
            theme,
            input: InputService::new(),
        })
    }

    /// Render grid and hand (helper for closure)
    fn render_canvas(frame: &mut Frame, area: Rect, hud: &HudState, theme: &ColorTheme) {
        let title = format!(" palmpad | {} | ESC to exit ", hud.source);
        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL).title(title))
            .marker(Marker::Braille)
            .x_bounds([0.0, 1.0])
            .y_bounds([0.0, 1.0])
            .paint(|ctx| {
                let bounds = &hud.bounds;
                for x in [bounds.left, bounds.right] {
                    ctx.draw(&CanvasLine {
                        x1: x as f64,
                        y1: 0.0,
                        x2: x as f64,
                        y2: 1.0,
                        color: theme.grid,
                    });
                }
                for y in [bounds.up, bounds.down] {
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: canvas_y(y),
                        x2: 1.0,
                        y2: canvas_y(y),
                        color: theme.grid,
                    });
                }

                let Some(hand) = &hud.hand else {
                    return;
                };

                ctx.layer();
                for (from, to) in HAND_CONNECTIONS {
                    if let (Some(a), Some(b)) = (hand.get(from), hand.get(to)) {
                        ctx.draw(&CanvasLine {
                            x1: a.x as f64,
                            y1: canvas_y(a.y),
                            x2: b.x as f64,
                            y2: canvas_y(b.y),
                            color: theme.skeleton,
                        });
                    }
                }

                let palm = hand.palm();
                ctx.draw(&Circle {
                    x: palm.x as f64,
                    y: canvas_y(palm.y),
                    radius: PALM_RADIUS,
                    color: theme.direction_color(hud.direction),
                });
            });

        frame.render_widget(canvas, area);
    }

    /// Render status line using theme colors (helper for closure)
    fn render_status(frame: &mut Frame, area: Rect, hud: &HudState, theme: &ColorTheme) {
        let command_style = Style::default()
            .fg(theme.direction_color(hud.direction))
            .add_modifier(Modifier::BOLD);

        let status = Paragraph::new(Line::from(vec![
            Span::styled(format!(" {} ", hud.command_label()), command_style),
            Span::raw(format!("| {}", hud.details())),
        ]))
        .style(theme.status_style());
        frame.render_widget(status, area);
    }
}

impl HudRenderer for TerminalHud {
    fn render(&mut self, hud: &HudState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            // Extract theme before closure to avoid borrowing issues
            let theme = &self.theme;

            terminal.draw(move |frame| {
                let size = frame.size();

                // Split screen: canvas and status line
                let chunks = Layout::default()
                    .direction(LayoutDirection::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
                    .split(size);

                Self::render_canvas(frame, chunks[0], hud, theme);
                Self::render_status(frame, chunks[1], hud, theme);
            })?;
        }
        Ok(())
    }

    fn handle_input(&mut self, timeout: Duration) -> Result<Vec<ControlAction>> {
        if self.terminal.is_none() {
            return Ok(Vec::new());
        }
        self.input.poll_actions(timeout)
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        self.raw_mode = true;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        self.alternate_screen = true;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        // Every step runs; the first failure is reported
        let mut first_error: Option<io::Error> = None;

        if std::mem::take(&mut self.raw_mode) {
            if let Err(err) = disable_raw_mode() {
                first_error.get_or_insert(err);
            }
        }
        if std::mem::take(&mut self.alternate_screen) {
            if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen) {
                first_error.get_or_insert(err);
            }
        }
        if let Some(mut terminal) = self.terminal.take() {
            if let Err(err) = terminal.show_cursor() {
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalHud {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
