//! Error types and handling infrastructure for palmpad.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types. The binary wraps these with `anyhow` for top-level context.
//!
//! ## Design Principles
//!
//! - **User-friendly messages**: Errors should say which collaborator failed
//! - **Context preservation**: Keep the underlying io/serde error as the source
//! - **Consistency**: Standardized Result type across all modules

use thiserror::Error;

/// The main error type for palmpad operations.
///
/// Covers the tracker collaborator, the key injector, the terminal HUD and configuration.
#[derive(Error, Debug)]
pub enum PalmpadError {
    /// The external tracker process could not be started
    #[error("Failed to start tracker `{program}`: {source}")]
    TrackerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading from the tracker stream failed
    #[error("Tracker stream failed: {message}")]
    TrackerError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A tracker line was not a valid frame
    #[error("Malformed frame on line {line}: {source}")]
    FrameDecode {
        line: u64,
        #[source]
        source: serde_json::Error,
    },

    /// A frame decoded but its landmarks are unusable
    #[error("Invalid landmarks: {message}")]
    InvalidLandmarks { message: String },

    /// Pressing or releasing a key failed
    #[error("Key injection failed: {message}")]
    KeyInjection {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system related errors (replay files, config files)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Standard Result type for palmpad operations.
pub type Result<T> = std::result::Result<T, PalmpadError>;

impl PalmpadError {
    /// Create a TrackerSpawn error for the given program
    pub fn tracker_spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::TrackerSpawn {
            program: program.into(),
            source,
        }
    }

    /// Create a TrackerError from an io::Error with additional context
    pub fn tracker(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::TrackerError {
            message: message.into(),
            source,
        }
    }

    /// Create an InvalidLandmarks error with a descriptive message
    pub fn invalid_landmarks(message: impl Into<String>) -> Self {
        Self::InvalidLandmarks {
            message: message.into(),
        }
    }

    /// Create a KeyInjection error from an io::Error with additional context
    pub fn key_injection(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::KeyInjection {
            message: message.into(),
            source,
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }
}

// Terminal setup and drawing report plain io errors
impl From<std::io::Error> for PalmpadError {
    fn from(err: std::io::Error) -> Self {
        Self::UIError {
            message: err.to_string(),
        }
    }
}
