//! Hand landmark storage.
//!
//! Landmarks arrive normalized to the frame: `(0, 0)` is the top-left corner and `(1, 1)` the
//! bottom-right, so `y` grows downwards.

use crate::error::{PalmpadError, Result};

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Number of landmarks in one tracked hand.
pub const LANDMARK_COUNT: usize = 21;

/// Landmark used as the palm centre for classification.
pub const PALM_CENTER: usize = MIDDLE_MCP;

/// Bones drawn by the HUD skeleton.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC),
    (THUMB_CMC, THUMB_MCP),
    (THUMB_MCP, THUMB_IP),
    (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP),
    (INDEX_MCP, INDEX_PIP),
    (INDEX_PIP, INDEX_DIP),
    (INDEX_DIP, INDEX_TIP),
    (INDEX_MCP, MIDDLE_MCP),
    (MIDDLE_MCP, MIDDLE_PIP),
    (MIDDLE_PIP, MIDDLE_DIP),
    (MIDDLE_DIP, MIDDLE_TIP),
    (MIDDLE_MCP, RING_MCP),
    (RING_MCP, RING_PIP),
    (RING_PIP, RING_DIP),
    (RING_DIP, RING_TIP),
    (RING_MCP, PINKY_MCP),
    (WRIST, PINKY_MCP),
    (PINKY_MCP, PINKY_PIP),
    (PINKY_PIP, PINKY_DIP),
    (PINKY_DIP, PINKY_TIP),
];

/// A landmark position relative to frame width/height, each axis in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPoint {
    /// Frame centre, the neutral position.
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    /// Create a point, clamping both axes into `[0, 1]`.
    ///
    /// Trackers report slightly out-of-frame values for hands near the border; clamping keeps
    /// them on the same side of every threshold.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }

    /// Create a point from raw tracker coordinates, rejecting NaN and infinities.
    pub fn try_new(x: f32, y: f32) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(PalmpadError::invalid_landmarks(format!(
                "non-finite coordinate ({}, {})",
                x, y
            )));
        }
        Ok(Self::new(x, y))
    }

    /// Flip horizontally, as seen in a selfie-view camera.
    pub fn mirrored(self) -> Self {
        Self {
            x: 1.0 - self.x,
            y: self.y,
        }
    }
}

/// The full landmark set for one tracked hand.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: Vec<NormalizedPoint>,
}

impl HandLandmarks {
    /// Wrap a landmark list, which must hold exactly [`LANDMARK_COUNT`] points.
    pub fn new(points: Vec<NormalizedPoint>) -> Result<Self> {
        if points.len() != LANDMARK_COUNT {
            return Err(PalmpadError::invalid_landmarks(format!(
                "expected {} landmarks, got {}",
                LANDMARK_COUNT,
                points.len()
            )));
        }
        Ok(Self { points })
    }

    /// Landmark at `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<NormalizedPoint> {
        self.points.get(index).copied()
    }

    /// The palm centre (middle finger MCP).
    pub fn palm(&self) -> NormalizedPoint {
        self.points[PALM_CENTER]
    }

    pub fn points(&self) -> &[NormalizedPoint] {
        &self.points
    }

    /// Mirror every landmark horizontally.
    pub fn mirrored(self) -> Self {
        Self {
            points: self.points.into_iter().map(NormalizedPoint::mirrored).collect(),
        }
    }
}
