//! Error types
//!
//! Only start-up can fail. Once assets are loaded the simulation has no
//! fallible operations.

use thiserror::Error;

/// Failure reported by a platform backend, carrying its message text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PlatformError(pub String);

impl PlatformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Fatal start-up errors
#[derive(Debug, Error)]
pub enum GameError {
    /// A capability call failed while loading assets
    #[error("{operation} failed: {source}")]
    Backend {
        operation: String,
        #[source]
        source: PlatformError,
    },

    /// A sprite stem resolved to an empty frame sequence
    #[error("sprite \"{stem}\" has no frames")]
    NoFrames { stem: String },

    /// The monitor cannot fit the fixed window
    #[error("screen must be at least {min_width} x {min_height}, found {width} x {height}")]
    DisplayTooSmall {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },
}

impl GameError {
    pub(crate) fn backend(operation: impl Into<String>, source: PlatformError) -> Self {
        Self::Backend {
            operation: operation.into(),
            source,
        }
    }
}
