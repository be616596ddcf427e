//! Error types for the fx-engine core.

use thiserror::Error;

/// Errors produced by effect operations.
#[derive(Debug, Error)]
pub enum EffectError {
    /// Width or height was zero (or overflowed) when creating a surface.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A constructor parameter had a value the effect cannot work with.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A requested effect name was not recognized by the registry.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// An I/O failure while writing a snapshot.
    #[error("i/o error: {0}")]
    Io(String),
}
