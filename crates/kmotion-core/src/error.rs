//! Error types for volume geometry and resampling.

use thiserror::Error;

/// Error type for volume geometry and resampling operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The volume's direction matrix cannot be inverted, so physical
    /// points cannot be mapped back to grid indices.
    #[error("Singular direction matrix: {0}")]
    SingularDirection(String),

    /// Shape mismatch between volumes that must share a grid.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: [usize; 3],
        actual: [usize; 3],
    },
}

/// Result type for volume operations.
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create a singular-direction error.
    pub fn singular_direction(msg: impl Into<String>) -> Self {
        Self::SingularDirection(msg.into())
    }
}
