//! Motion-artifact engine and configuration.

use burn::tensor::backend::Backend;
use serde::{Deserialize, Serialize};
use tracing::warn;

use kmotion_core::{Interpolation, Volume};

use crate::error::{MotionError, Result};
use crate::motion::build_motion_transforms;
use crate::resample::resample_poses;
use crate::sampler::{MotionParams, MotionSampler};
use crate::spectral::splice_spectra;

/// Intensities below this trigger the negative-value advisory. Slightly
/// below zero so floating noise around zero does not warn.
const NEGATIVE_INTENSITY_TOLERANCE: f64 = -0.1;

/// Configuration for [`RandomMotion`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Per-axis rotation range in degrees, `(lo, hi)`.
    pub degrees: (f64, f64),
    /// Per-axis translation range in millimetres, `(lo, hi)`.
    pub translation_mm: (f64, f64),
    /// Number of motion events per synthesis, at least 1.
    pub num_transforms: usize,
    /// Interpolation kernel used when resampling each pose.
    pub interpolation: Interpolation,
    /// Probability in [0, 1] that the artifact is applied to a sample.
    pub proportion_to_augment: f64,
    /// Relative jitter of the evenly spaced event times, non-negative;
    /// 0 keeps the exact baseline.
    pub time_perturbation: f64,
    /// Seed for the engine's RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            degrees: (-10.0, 10.0),
            translation_mm: (-10.0, 10.0),
            num_transforms: 2,
            interpolation: Interpolation::Linear,
            proportion_to_augment: 1.0,
            time_perturbation: 0.3,
            seed: None,
        }
    }
}

impl MotionConfig {
    /// Set a symmetric rotation range `(-degrees, degrees)`.
    pub fn with_degrees(mut self, degrees: f64) -> Self {
        self.degrees = (-degrees, degrees);
        self
    }

    /// Set a symmetric translation range `(-mm, mm)`.
    pub fn with_translation_mm(mut self, mm: f64) -> Self {
        self.translation_mm = (-mm, mm);
        self
    }

    /// Set the number of motion events.
    pub fn with_num_transforms(mut self, num_transforms: usize) -> Self {
        self.num_transforms = num_transforms;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration, rejecting it before any sampling.
    pub fn validate(&self) -> Result<()> {
        if self.degrees.0 > self.degrees.1 {
            return Err(MotionError::invalid_configuration(format!(
                "degrees range ({}, {}) has lo > hi",
                self.degrees.0, self.degrees.1
            )));
        }
        if self.translation_mm.0 > self.translation_mm.1 {
            return Err(MotionError::invalid_configuration(format!(
                "translation range ({}, {}) has lo > hi",
                self.translation_mm.0, self.translation_mm.1
            )));
        }
        if self.num_transforms < 1 {
            return Err(MotionError::invalid_configuration(
                "num_transforms must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.proportion_to_augment) {
            return Err(MotionError::invalid_configuration(format!(
                "proportion_to_augment {} is outside [0, 1]",
                self.proportion_to_augment
            )));
        }
        if self.time_perturbation < 0.0 {
            return Err(MotionError::invalid_configuration(format!(
                "time_perturbation {} is negative",
                self.time_perturbation
            )));
        }
        Ok(())
    }
}

/// Adds a random MRI motion artifact to a volume.
///
/// Samples a handful of instantaneous pose changes over a notional
/// unit-duration acquisition, resamples the volume under each pose, and
/// splices the poses' k-space representations along the phase-encode
/// axis, the way patient motion corrupts different frequency bands at
/// different times during a scan.
///
/// The engine owns its RNG: repeated calls on one seeded instance are
/// deterministic, and separate instances are independent.
#[derive(Debug)]
pub struct RandomMotion {
    config: MotionConfig,
    sampler: MotionSampler,
}

impl RandomMotion {
    /// Create an engine, validating the configuration up front.
    pub fn new(config: MotionConfig) -> Result<Self> {
        config.validate()?;
        let sampler = match config.seed {
            Some(seed) => MotionSampler::seeded(seed),
            None => MotionSampler::from_entropy(),
        };
        Ok(Self { config, sampler })
    }

    /// Get the engine's configuration.
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Apply the artifact to a volume.
    ///
    /// Returns the corrupted volume together with the full parameter
    /// record. When the Bernoulli draw skips the sample, the input is
    /// returned unchanged and no transforms, resampling, or spectral
    /// work happens. Either the whole synthesis succeeds or the call
    /// fails; a partially corrupted volume is never returned.
    pub fn apply<B: Backend>(&mut self, volume: &Volume<B>) -> Result<(Volume<B>, MotionParams)> {
        let params = self.sampler.sample(&self.config)?;
        if !params.applied {
            return Ok((volume.clone(), params));
        }

        if volume.min_intensity() < NEGATIVE_INTENSITY_TOLERANCE {
            warn!(
                "volume has negative intensities; the corrupted volume is the magnitude of an \
                 inverse Fourier transform, so results can be unexpected"
            );
        }

        let transforms = build_motion_transforms(&params.degrees, &params.translations_mm, volume);
        let volumes = resample_poses(volume, &transforms, self.config.interpolation)?;
        let output = splice_spectra(&volumes, &params.times)?;

        Ok((output, params))
    }
}
