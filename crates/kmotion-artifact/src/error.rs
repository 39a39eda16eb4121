//! Error types for motion-artifact synthesis.

use kmotion_core::CoreError;
use thiserror::Error;

/// Main error type for motion-artifact synthesis.
#[derive(Error, Debug)]
pub enum MotionError {
    /// Invalid configuration, rejected before any sampling occurs.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The spectra handed to the splicer do not line up with the event
    /// times or with each other.
    #[error("Spectrum mismatch: {0}")]
    SpectrumMismatch(String),

    /// A volume geometry or resampling failure.
    #[error(transparent)]
    Volume(#[from] CoreError),
}

/// Result type for motion-artifact operations.
pub type Result<T> = std::result::Result<T, MotionError>;

impl MotionError {
    /// Create an invalid-configuration error.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create a spectrum-mismatch error.
    pub fn spectrum_mismatch(msg: impl Into<String>) -> Self {
        Self::SpectrumMismatch(msg.into())
    }
}
