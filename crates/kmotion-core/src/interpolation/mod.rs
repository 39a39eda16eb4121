//! Interpolation kernels for sampling volumes at continuous coordinates.

pub mod bspline;
pub mod linear;
pub mod nearest;
pub mod trait_;

pub use bspline::BSplineInterpolator;
pub use linear::LinearInterpolator;
pub use nearest::NearestNeighborInterpolator;
pub use trait_::Interpolator;

use serde::{Deserialize, Serialize};

/// Interpolation kernel selection for resampling.
///
/// A closed set of kernels; callers pick a variant instead of passing
/// backend-specific codes around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    /// Nearest-neighbor sampling.
    Nearest,
    /// Trilinear interpolation.
    Linear,
    /// Cubic B-Spline interpolation.
    BSpline,
}
