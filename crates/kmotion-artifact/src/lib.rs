//! MRI k-space motion-artifact synthesis.
//!
//! Implements the motion model of
//!
//! > Shaw et al., 2019. MRI k-Space Motion Artefact Augmentation:
//! > Model Robustness and Task-Specific Uncertainty.
//!
//! as a stochastic data-augmentation step: random rigid pose changes at
//! sampled acquisition times, one resampled volume per pose, and a
//! composite k-space stitched band-by-band along the phase-encode axis
//! before inverse transforming back to image space.
//!
//! The entry point is [`RandomMotion`]; [`MotionParams`] records every
//! drawn value so a synthesis can be replayed exactly.

pub mod engine;
pub mod error;
pub mod motion;
pub mod resample;
pub mod sampler;
pub mod spectral;

pub use engine::{MotionConfig, RandomMotion};
pub use error::{MotionError, Result};
pub use sampler::{MotionParams, MotionSampler};
