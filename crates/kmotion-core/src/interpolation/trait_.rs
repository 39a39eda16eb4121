//! Interpolator trait for sampling values at continuous coordinates.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Samples volume values at non-integer coordinates.
///
/// # Type Parameters
/// * `B` - The Burn backend
pub trait Interpolator<B: Backend> {
    /// Interpolate values from a volume at the given continuous indices.
    ///
    /// Indices outside the volume are sampled from the nearest border
    /// voxel; callers that need a fill value mask afterwards.
    ///
    /// # Arguments
    /// * `data` - The source volume, `[Z, Y, X]`
    /// * `indices` - Continuous indices `[Batch, 3]`, `(x, y, z)` order
    ///
    /// # Returns
    /// Tensor of sampled values `[Batch]`.
    fn interpolate(&self, data: &Tensor<B, 3>, indices: Tensor<B, 2>) -> Tensor<B, 1>;
}
