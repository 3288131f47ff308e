//! Wire format emitted by the external tracker.
//!
//! ```json
//! {"ok": true, "hands": [{"landmarks": [{"x": 0.52, "y": 0.31, "z": -0.01}], "score": 0.98}]}
//! ```
//!
//! `ok` defaults to `true`; `"ok": false` reports that the camera stopped delivering frames.

use crate::error::{PalmpadError, Result};
use crate::gesture::{HandLandmarks, NormalizedPoint};
use crate::tracking::TrackedFrame;
use serde::Deserialize;

fn default_ok() -> bool {
    true
}

/// One line of tracker output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrameMessage {
    #[serde(default = "default_ok")]
    pub ok: bool,
    #[serde(default)]
    pub hands: Vec<HandMessage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HandMessage {
    pub landmarks: Vec<LandmarkMessage>,
    #[serde(default)]
    pub score: Option<f32>,
}

/// Landmark coordinates; `z` is depth and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LandmarkMessage {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

/// Result of decoding one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Frame(TrackedFrame),
    /// The tracker reported that frame acquisition failed.
    AcquisitionFailed,
}

impl FrameMessage {
    /// Convert to a frame, keeping only the first hand.
    pub fn into_decoded(self, mirror: bool) -> Result<Decoded> {
        if !self.ok {
            return Ok(Decoded::AcquisitionFailed);
        }

        let hand = match self.hands.into_iter().next() {
            Some(message) => Some(message.into_landmarks(mirror)?),
            None => None,
        };
        Ok(Decoded::Frame(TrackedFrame { hand }))
    }
}

impl HandMessage {
    fn into_landmarks(self, mirror: bool) -> Result<HandLandmarks> {
        let points = self
            .landmarks
            .iter()
            .map(|landmark| NormalizedPoint::try_new(landmark.x, landmark.y))
            .collect::<Result<Vec<_>>>()?;
        let hand = HandLandmarks::new(points)?;
        Ok(if mirror { hand.mirrored() } else { hand })
    }
}

/// Decode a single non-empty line. `line_number` is 1-based and only used for errors.
pub fn decode_line(line: &str, line_number: u64, mirror: bool) -> Result<Decoded> {
    let message: FrameMessage =
        serde_json::from_str(line).map_err(|source| PalmpadError::FrameDecode {
            line: line_number,
            source,
        })?;
    message.into_decoded(mirror)
}
