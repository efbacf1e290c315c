//! Error types for the surface-stream core.

use thiserror::Error;

/// Errors produced by generator, driver, and sink operations.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// A pattern name did not match any known [`Pattern`](crate::Pattern).
    #[error("unknown pattern: {0}")]
    InvalidPattern(String),

    /// Grid resolution outside `2..=1024`, or not an integer at all.
    #[error("invalid resolution {0}: must be an integer from 2 to 1024")]
    InvalidResolution(String),

    /// A rendering sink refused a push.
    #[error("sink rejected update: {0}")]
    SinkRejected(String),

    /// A field buffer had the wrong number of cells for its resolution.
    #[error("dimension mismatch: expected {expected} cells, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A configuration value was out of its valid range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Snapshot or file output failed.
    #[error("i/o error: {0}")]
    Io(String),
}
