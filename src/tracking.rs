//! Tracking subsystem.
//!
//! Camera capture and landmark detection run in an external tracker. This module only reads
//! the frames it produces, one JSON object per line.

use crate::error::Result;
use crate::gesture::HandLandmarks;
use async_trait::async_trait;

pub mod protocol;
pub mod stream;

pub use stream::LineTracker;

/// One acquired camera frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackedFrame {
    /// The first detected hand, if any.
    pub hand: Option<HandLandmarks>,
}

/// Source of tracked frames.
#[async_trait]
pub trait HandTracker: Send {
    /// Wait for the next frame.
    ///
    /// `Ok(None)` means frame acquisition has stopped for good; callers must not retry.
    async fn next_frame(&mut self) -> Result<Option<TrackedFrame>>;

    /// Short description for logs and the HUD title.
    fn describe(&self) -> String;
}
