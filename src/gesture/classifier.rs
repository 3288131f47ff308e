//! Dominant-axis direction classifier.
//!
//! The palm position is compared against four thresholds, but only along the axis with the
//! larger displacement from the frame centre. A hand drifting up and slightly left therefore
//! reads as UP instead of flickering between UP and LEFT.

use crate::error::{PalmpadError, Result};
use crate::gesture::landmarks::{HandLandmarks, NormalizedPoint};
use crate::keys::DirectionKey;
use serde::Deserialize;
use std::fmt;

/// Default horizontal/vertical thresholds: a 10% move away from centre triggers a key.
pub const LEFT_BOUND: f32 = 0.40;
pub const RIGHT_BOUND: f32 = 0.60;
pub const UP_BOUND: f32 = 0.40;
pub const DOWN_BOUND: f32 = 0.60;

/// Discrete command derived from the hand position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Neutral,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Key that should be held while this direction is active.
    pub fn key(self) -> Option<DirectionKey> {
        match self {
            Direction::Neutral => None,
            Direction::Left => Some(DirectionKey::Left),
            Direction::Right => Some(DirectionKey::Right),
            Direction::Up => Some(DirectionKey::Up),
            Direction::Down => Some(DirectionKey::Down),
        }
    }

    /// Label shown in the HUD and logs.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Neutral => "NEUTRAL",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Threshold lines, in normalized frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub up: f32,
    pub down: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            left: LEFT_BOUND,
            right: RIGHT_BOUND,
            up: UP_BOUND,
            down: DOWN_BOUND,
        }
    }
}

impl Bounds {
    /// Check that left/up lie in `(0, 0.5)` and right/down in `(0.5, 1)`.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("left", self.left, 0.0, 0.5),
            ("up", self.up, 0.0, 0.5),
            ("right", self.right, 0.5, 1.0),
            ("down", self.down, 0.5, 1.0),
        ];

        for (name, value, low, high) in checks {
            // NaN fails both comparisons
            if !(value > low && value < high) {
                return Err(PalmpadError::config(format!(
                    "{} bound {} must lie strictly between {} and {}",
                    name, value, low, high
                )));
            }
        }
        Ok(())
    }
}

/// Classify a single point.
///
/// When both axes are equally displaced the vertical branch is taken. This is an arbitrary
/// but stable default.
pub fn classify(point: NormalizedPoint, bounds: &Bounds) -> Direction {
    let x_dist = (point.x - 0.5).abs();
    let y_dist = (point.y - 0.5).abs();

    if x_dist > y_dist {
        if point.x < bounds.left {
            Direction::Left
        } else if point.x > bounds.right {
            Direction::Right
        } else {
            Direction::Neutral
        }
    } else if point.y < bounds.up {
        Direction::Up
    } else if point.y > bounds.down {
        Direction::Down
    } else {
        Direction::Neutral
    }
}

/// Classify the palm centre of a tracked hand; no hand means NEUTRAL.
pub fn classify_hand(hand: Option<&HandLandmarks>, bounds: &Bounds) -> Direction {
    hand.map_or(Direction::Neutral, |hand| classify(hand.palm(), bounds))
}
