//! High-level input service.
//!
//! Polls crossterm for terminal events, runs them through the control state machine, and
//! yields `ControlAction`s that the frame loop consumes.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// High-level actions emitted by the state machine/service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Quit,
    Resize { width: u16, height: u16 },
    NoAction,
    InvalidInput,
}

/// Maps terminal keys to controller actions.
///
/// ESC is the designated exit key; `q` and Ctrl-C are accepted too because raw mode swallows
/// the interrupt signal.
#[derive(Debug, Default)]
pub struct InputStateMachine;

impl InputStateMachine {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> ControlAction {
        if key_event.kind != KeyEventKind::Press {
            return ControlAction::NoAction;
        }

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Esc, _) => ControlAction::Quit,
            (KeyCode::Char('q'), modifiers)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                ControlAction::Quit
            }
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => ControlAction::Quit,
            _ => ControlAction::InvalidInput,
        }
    }
}

/// Service responsible for producing `ControlAction`s from terminal events.
#[derive(Debug, Default)]
pub struct InputService {
    state_machine: InputStateMachine,
}

impl InputService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every pending terminal event, waiting at most `timeout` for the first one.
    ///
    /// The frame loop passes a zero timeout so it never stalls between frames.
    pub fn poll_actions(&mut self, timeout: Duration) -> Result<Vec<ControlAction>> {
        let mut actions = Vec::new();
        let mut wait = timeout;

        while event::poll(wait)? {
            let event = event::read()?;
            if let Some(action) = self.process_event(event) {
                actions.push(action);
            }
            wait = Duration::ZERO;
        }

        Ok(actions)
    }

    /// Translate one event, dropping ones the controller ignores.
    pub fn process_event(&mut self, event: Event) -> Option<ControlAction> {
        let action = match event {
            Event::Key(key_event) => self.state_machine.handle_key_event(key_event),
            Event::Resize(width, height) => ControlAction::Resize { width, height },
            _ => ControlAction::NoAction,
        };

        match action {
            ControlAction::NoAction | ControlAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}
