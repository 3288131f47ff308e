//! Gesture subsystem: hand landmark types and the dominant-axis classifier.

pub mod classifier;
pub mod landmarks;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::gesture` rather than reaching into submodules.
pub use classifier::{classify, classify_hand, Bounds, Direction};
pub use landmarks::{HandLandmarks, NormalizedPoint, LANDMARK_COUNT, PALM_CENTER};
