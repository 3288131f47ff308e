//! Runtime configuration.
//!
//! Every setting has a compiled-in default. With the `config` feature enabled, a TOML file at
//! `<config dir>/palmpad/config.toml` can override any subset of them:
//!
//! ```toml
//! camera_index = 1
//!
//! [bounds]
//! left = 0.35
//! right = 0.65
//! ```

use crate::error::{PalmpadError, Result};
use crate::gesture::Bounds;
use serde::Deserialize;

/// Camera opened by the tracker.
pub const CAMERA_INDEX: u32 = 0;
/// Executable started when no replay file is given.
pub const DEFAULT_TRACKER_PROGRAM: &str = "palmpad-tracker";
pub const MIN_DETECTION_CONFIDENCE: f32 = 0.7;
pub const MIN_TRACKING_CONFIDENCE: f32 = 0.7;
/// Playback rate for recorded sessions.
pub const DEFAULT_REPLAY_FPS: f32 = 30.0;
pub const MIN_REPLAY_FPS: f32 = 1.0;
pub const MAX_REPLAY_FPS: f32 = 1000.0;

/// External hand tracker settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub program: String,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_TRACKER_PROGRAM.to_string(),
            min_detection_confidence: MIN_DETECTION_CONFIDENCE,
            min_tracking_confidence: MIN_TRACKING_CONFIDENCE,
        }
    }
}

impl TrackerConfig {
    /// Command-line arguments passed to the tracker for `camera_index`.
    pub fn args(&self, camera_index: u32) -> Vec<String> {
        vec![
            "--camera".to_string(),
            camera_index.to_string(),
            "--max-hands".to_string(),
            "1".to_string(),
            "--min-detection-confidence".to_string(),
            self.min_detection_confidence.to_string(),
            "--min-tracking-confidence".to_string(),
            self.min_tracking_confidence.to_string(),
        ]
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bounds: Bounds,
    pub camera_index: u32,
    /// Flip landmarks horizontally so the HUD behaves like a mirror.
    pub mirror: bool,
    pub tracker: TrackerConfig,
    pub replay_fps: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            camera_index: CAMERA_INDEX,
            mirror: true,
            tracker: TrackerConfig::default(),
            replay_fps: DEFAULT_REPLAY_FPS,
        }
    }
}

impl Config {
    /// Reject settings the controller cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.bounds.validate()?;

        if self.tracker.program.trim().is_empty() {
            return Err(PalmpadError::config("tracker program must not be empty"));
        }
        for (name, value) in [
            ("min_detection_confidence", self.tracker.min_detection_confidence),
            ("min_tracking_confidence", self.tracker.min_tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PalmpadError::config(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        // NaN fails the range check
        if !(MIN_REPLAY_FPS..=MAX_REPLAY_FPS).contains(&self.replay_fps) {
            return Err(PalmpadError::config(format!(
                "replay_fps must be within [{}, {}], got {}",
                MIN_REPLAY_FPS, MAX_REPLAY_FPS, self.replay_fps
            )));
        }
        Ok(())
    }

    /// Parse a TOML document; missing keys keep their defaults.
    #[cfg(feature = "config")]
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)
            .map_err(|e| PalmpadError::config(format!("invalid config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `<config dir>/palmpad/config.toml`, falling back to defaults when it is absent.
    #[cfg(feature = "config")]
    pub fn load() -> Result<Self> {
        let Some(path) = dirs::config_dir().map(|dir| dir.join("palmpad").join("config.toml"))
        else {
            return Ok(Self::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                log::info!("loading config from {}", path.display());
                Self::from_toml(&text)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(PalmpadError::file_error(
                format!("failed to read {}", path.display()),
                err,
            )),
        }
    }

    /// Defaults only; file loading needs the `config` feature.
    #[cfg(not(feature = "config"))]
    pub fn load() -> Result<Self> {
        Ok(Self::default())
    }
}
