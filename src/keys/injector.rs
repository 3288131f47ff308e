//! Key injection seam.

use crate::error::Result;
use std::fmt;

/// The four keys the controller can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionKey {
    Left,
    Right,
    Up,
    Down,
}

impl DirectionKey {
    pub const ALL: [DirectionKey; 4] = [
        DirectionKey::Left,
        DirectionKey::Right,
        DirectionKey::Up,
        DirectionKey::Down,
    ];
}

impl fmt::Display for DirectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DirectionKey::Left => "Left",
            DirectionKey::Right => "Right",
            DirectionKey::Up => "Up",
            DirectionKey::Down => "Down",
        };
        f.write_str(name)
    }
}

/// A single injected key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Press(DirectionKey),
    Release(DirectionKey),
}

/// OS-level key injection.
///
/// Implementations only forward calls; deduplication is the job of
/// [`KeyDriver`](crate::keys::KeyDriver).
pub trait KeyInjector {
    fn press(&mut self, key: DirectionKey) -> Result<()>;

    fn release(&mut self, key: DirectionKey) -> Result<()>;
}

/// Injector that records and logs key events instead of sending them to the OS.
///
/// Used by `--dry-run` and by tests.
#[derive(Debug, Default)]
pub struct DryRunInjector {
    events: Vec<KeyEvent>,
}

impl DryRunInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event seen so far, oldest first.
    pub fn events(&self) -> &[KeyEvent] {
        &self.events
    }

    /// Number of presses minus releases for `key`.
    pub fn net_presses(&self, key: DirectionKey) -> i64 {
        self.events.iter().fold(0, |net, event| match *event {
            KeyEvent::Press(k) if k == key => net + 1,
            KeyEvent::Release(k) if k == key => net - 1,
            _ => net,
        })
    }
}

impl KeyInjector for DryRunInjector {
    fn press(&mut self, key: DirectionKey) -> Result<()> {
        log::info!("press {}", key);
        self.events.push(KeyEvent::Press(key));
        Ok(())
    }

    fn release(&mut self, key: DirectionKey) -> Result<()> {
        log::info!("release {}", key);
        self.events.push(KeyEvent::Release(key));
        Ok(())
    }
}
