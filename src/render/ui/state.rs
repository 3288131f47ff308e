//! HUD state management structures
//!
//! The frame loop owns one `HudState` and updates it once per frame; renderers only read it.

use crate::gesture::{Bounds, Direction, HandLandmarks, NormalizedPoint};
use crate::keys::DirectionKey;

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone)]
pub struct HudState {
    /// Threshold grid
    pub bounds: Bounds,

    /// Command derived from the latest frame
    pub direction: Direction,

    /// Latest tracked hand, already mirrored if configured
    pub hand: Option<HandLandmarks>,

    /// Key the driver currently holds
    pub held_key: Option<DirectionKey>,

    /// Frames processed so far
    pub frames: u64,

    /// Where frames come from (tracker command or replay path)
    pub source: String,

    /// Display dimensions
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl HudState {
    pub fn new(
        source: impl Into<String>,
        bounds: Bounds,
        viewport_width: u16,
        viewport_height: u16,
    ) -> Self {
        Self {
            bounds,
            direction: Direction::Neutral,
            hand: None,
            held_key: None,
            frames: 0,
            source: source.into(),
            viewport_width,
            viewport_height,
        }
    }

    /// Record the outcome of one classify/drive cycle
    pub fn record_frame(
        &mut self,
        hand: Option<HandLandmarks>,
        direction: Direction,
        held_key: Option<DirectionKey>,
    ) {
        self.hand = hand;
        self.direction = direction;
        self.held_key = held_key;
        self.frames += 1;
    }

    /// Palm centre of the tracked hand
    pub fn palm(&self) -> Option<NormalizedPoint> {
        self.hand.as_ref().map(HandLandmarks::palm)
    }

    /// Update display dimensions
    /// Returns true if dimensions actually changed
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;
        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
        }
        changed
    }

    /// Highlighted part of the status line
    pub fn command_label(&self) -> String {
        format!("CMD: {}", self.direction)
    }

    /// Secondary status details
    pub fn details(&self) -> String {
        let key = self
            .held_key
            .map_or_else(|| "none".to_string(), |key| key.to_string());

        match self.palm() {
            Some(palm) => format!(
                "key: {} | palm {:.2},{:.2} | frame {}",
                key, palm.x, palm.y, self.frames
            ),
            None => format!("key: {} | no hand | frame {}", key, self.frames),
        }
    }

    /// Format the complete status line
    pub fn format_status_line(&self) -> String {
        format!("{} | {}", self.command_label(), self.details())
    }
}
