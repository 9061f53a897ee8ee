//! Error types for rotation requests.

use thiserror::Error;

/// Errors surfaced by [`crate::rotate`] and the validating constructors.
///
/// Every error is reported before any output pixel buffer is allocated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RotateError {
    /// Malformed angle range, annotation entry or image buffer.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A rectangle re-fit received fewer than 3 distinct points.
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),
}

impl RotateError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        RotateError::InvalidConfig(msg.into())
    }

    pub(crate) fn degenerate(msg: impl Into<String>) -> Self {
        RotateError::DegenerateGeometry(msg.into())
    }
}
