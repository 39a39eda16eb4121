//! Random sampling of motion events.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::engine::MotionConfig;
use crate::error::Result;

/// Complete record of one sampled synthesis.
///
/// Together with the input volume and the engine's seed, this record is
/// enough to reproduce the corrupted volume exactly; persist it next to
/// the augmented sample for provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionParams {
    /// Fractional acquisition time of each event, nominally in (0, 1).
    /// Recorded as drawn; extreme jitter settings can push a value
    /// slightly outside the interval.
    pub times: Vec<f64>,
    /// Per-event rotation `(x, y, z)` in degrees.
    pub degrees: Vec<[f64; 3]>,
    /// Per-event translation `(x, y, z)` in millimetres.
    pub translations_mm: Vec<[f64; 3]>,
    /// Whether the artifact was applied to this sample.
    pub applied: bool,
}

/// Draws motion events from an instance-owned RNG.
///
/// Each sampler owns its `StdRng`, so seeding scopes reproducibility to
/// one engine instance rather than the whole process; concurrent
/// data-loading workers get independent streams.
#[derive(Debug)]
pub struct MotionSampler {
    rng: StdRng,
}

impl MotionSampler {
    /// Create a sampler with a deterministic seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a sampler seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Draw the events for one synthesis.
    ///
    /// Rotations and translations are uniform per axis within the
    /// configured ranges. Event times start evenly spaced at
    /// `(i + 1) / (N + 1)` and each is jittered by uniform noise in
    /// `[-step * perturbation, step * perturbation]`; zero perturbation
    /// yields exactly the even baseline. The apply decision is a
    /// Bernoulli draw with the configured probability.
    ///
    /// Validates the configuration before touching the RNG.
    pub fn sample(&mut self, config: &MotionConfig) -> Result<MotionParams> {
        config.validate()?;

        let n = config.num_transforms;
        let degrees = self.uniform_triples(config.degrees, n);
        let translations_mm = self.uniform_triples(config.translation_mm, n);

        let denom = (n + 1) as f64;
        let jitter = config.time_perturbation / denom;
        let times = (0..n)
            .map(|i| (i + 1) as f64 / denom + self.rng.gen_range(-jitter..=jitter))
            .collect();

        let applied = self.rng.gen_bool(config.proportion_to_augment);

        Ok(MotionParams {
            times,
            degrees,
            translations_mm,
            applied,
        })
    }

    fn uniform_triples(&mut self, (lo, hi): (f64, f64), n: usize) -> Vec<[f64; 3]> {
        (0..n)
            .map(|_| {
                [
                    self.rng.gen_range(lo..=hi),
                    self.rng.gen_range(lo..=hi),
                    self.rng.gen_range(lo..=hi),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MotionError;
    use kmotion_core::Interpolation;

    fn config(num_transforms: usize) -> MotionConfig {
        MotionConfig {
            num_transforms,
            ..MotionConfig::default()
        }
    }

    #[test]
    fn test_zero_perturbation_gives_even_times() {
        let mut sampler = MotionSampler::seeded(7);
        let mut cfg = config(3);
        cfg.time_perturbation = 0.0;

        let params = sampler.sample(&cfg).unwrap();
        assert_eq!(params.times, vec![1.0 / 4.0, 2.0 / 4.0, 3.0 / 4.0]);
    }

    #[test]
    fn test_draws_stay_in_range() {
        let mut sampler = MotionSampler::seeded(11);
        let mut cfg = config(5);
        cfg.degrees = (-3.0, 3.0);
        cfg.translation_mm = (0.5, 1.5);

        let params = sampler.sample(&cfg).unwrap();
        assert_eq!(params.degrees.len(), 5);
        assert_eq!(params.translations_mm.len(), 5);
        for event in &params.degrees {
            for &d in event {
                assert!((-3.0..=3.0).contains(&d));
            }
        }
        for event in &params.translations_mm {
            for &t in event {
                assert!((0.5..=1.5).contains(&t));
            }
        }
    }

    #[test]
    fn test_same_seed_same_draws() {
        let cfg = config(4);
        let a = MotionSampler::seeded(42).sample(&cfg).unwrap();
        let b = MotionSampler::seeded(42).sample(&cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_probability_never_applies() {
        let mut cfg = config(2);
        cfg.proportion_to_augment = 0.0;
        for seed in 0..20 {
            let params = MotionSampler::seeded(seed).sample(&cfg).unwrap();
            assert!(!params.applied);
        }
    }

    #[test]
    fn test_invalid_range_is_rejected() {
        let mut sampler = MotionSampler::seeded(0);
        let mut cfg = config(2);
        cfg.degrees = (5.0, -5.0);

        let err = sampler.sample(&cfg).unwrap_err();
        assert!(matches!(err, MotionError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_zero_events_is_rejected() {
        let mut sampler = MotionSampler::seeded(0);
        let cfg = config(0);
        assert!(sampler.sample(&cfg).is_err());
    }

    #[test]
    fn test_params_serde_roundtrip() {
        let mut cfg = config(2);
        cfg.interpolation = Interpolation::Nearest;
        let params = MotionSampler::seeded(3).sample(&cfg).unwrap();

        let json = serde_json::to_string(&params).unwrap();
        let back: MotionParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}
