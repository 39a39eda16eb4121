//! Resample volume filter.

use std::marker::PhantomData;

use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};

use crate::error::Result;
use crate::interpolation::trait_::Interpolator;
use crate::spatial::{Direction3, Point3, Spacing3};
use crate::transform::trait_::Transform;
use crate::volume::Volume;

/// Resample volume filter.
///
/// Resamples a volume by mapping every output grid point through a
/// transform into the input volume's physical space and interpolating
/// there. The transform maps Output Physical Space -> Input Physical
/// Space. Samples that fall outside the input volume receive the
/// configured default value.
///
/// # Type Parameters
/// * `B` - The Burn backend
/// * `T` - The transform type
/// * `I` - The interpolator type
pub struct ResampleVolumeFilter<B, T, I>
where
    B: Backend,
    T: Transform<B>,
    I: Interpolator<B>,
{
    size: [usize; 3],
    origin: Point3,
    spacing: Spacing3,
    direction: Direction3,
    transform: T,
    interpolator: I,
    default_value: f64,
    _phantom: PhantomData<B>,
}

impl<B, T, I> ResampleVolumeFilter<B, T, I>
where
    B: Backend,
    T: Transform<B>,
    I: Interpolator<B>,
{
    /// Create a new resample filter.
    ///
    /// # Arguments
    /// * `size` - Output grid size `[Z, Y, X]`
    /// * `origin` - Output grid origin
    /// * `spacing` - Output grid spacing
    /// * `direction` - Output grid orientation
    /// * `transform` - Transform from output space to input space
    /// * `interpolator` - Interpolator for sampling the input volume
    pub fn new(
        size: [usize; 3],
        origin: Point3,
        spacing: Spacing3,
        direction: Direction3,
        transform: T,
        interpolator: I,
    ) -> Self {
        Self {
            size,
            origin,
            spacing,
            direction,
            transform,
            interpolator,
            default_value: 0.0,
            _phantom: PhantomData,
        }
    }

    /// Create a filter whose output grid matches a reference volume.
    pub fn from_reference(reference: &Volume<B>, transform: T, interpolator: I) -> Self {
        Self::new(
            reference.shape(),
            *reference.origin(),
            *reference.spacing(),
            *reference.direction(),
            transform,
            interpolator,
        )
    }

    /// Set the value used for samples outside the input field of view.
    pub fn with_default_value(mut self, value: f64) -> Self {
        self.default_value = value;
        self
    }

    /// Apply the filter to an input volume.
    ///
    /// Fails when the input volume's direction matrix is singular.
    pub fn apply(&self, input: &Volume<B>) -> Result<Volume<B>> {
        let device = input.data().device();

        // 1. Grid of output indices
        let output_indices = self.generate_grid_indices(&device);

        // 2. Output indices -> output physical points
        let output_points = self.indices_to_physical(output_indices, &device);

        // 3. Transform into input physical space
        let input_points = self.transform.transform_points(output_points);

        // 4. Input physical points -> input continuous indices
        let input_indices = input.world_to_index_tensor(input_points)?;

        // 5. Interpolate; replace samples outside the input grid with the
        //    default value
        let inside = inside_mask(&input_indices, input.shape());
        let sampled = self.interpolator.interpolate(input.data(), input_indices);
        let fill = inside.clone().neg().add_scalar(1.0).mul_scalar(self.default_value);
        let output_flat = sampled * inside + fill;

        // 6. Reshape to the output grid
        let output_data = output_flat.reshape(self.size);

        Ok(Volume::new(output_data, self.origin, self.spacing, self.direction))
    }

    fn generate_grid_indices(&self, device: &B::Device) -> Tensor<B, 2> {
        let [d, h, w] = self.size;

        let z_range = Tensor::<B, 1, burn::tensor::Int>::arange(0..d as i64, device);
        let y_range = Tensor::<B, 1, burn::tensor::Int>::arange(0..h as i64, device);
        let x_range = Tensor::<B, 1, burn::tensor::Int>::arange(0..w as i64, device);

        let z_grid = z_range.reshape([d, 1, 1]).repeat(&[1, h, w]).reshape([d * h * w]).float();
        let y_grid = y_range.reshape([1, h, 1]).repeat(&[d, 1, w]).reshape([d * h * w]).float();
        let x_grid = x_range.reshape([1, 1, w]).repeat(&[d, h, 1]).reshape([d * h * w]).float();

        Tensor::cat(
            vec![
                x_grid.unsqueeze_dim(1),
                y_grid.unsqueeze_dim(1),
                z_grid.unsqueeze_dim(1),
            ],
            1,
        )
    }

    fn indices_to_physical(&self, indices: Tensor<B, 2>, device: &B::Device) -> Tensor<B, 2> {
        // point = origin + Direction * (index * spacing), row-vector form

        let origin_vec: Vec<f32> = (0..3).map(|i| self.origin[i] as f32).collect();
        let origin_tensor =
            Tensor::<B, 1>::from_data(TensorData::new(origin_vec, [3]), device).reshape([1, 3]);

        let spacing_vec: Vec<f32> = (0..3).map(|i| self.spacing[i] as f32).collect();
        let spacing_tensor =
            Tensor::<B, 1>::from_data(TensorData::new(spacing_vec, [3]), device).reshape([1, 3]);

        let scaled = indices * spacing_tensor;

        // Direction transposed for row-vector matmul
        let mut dir_data = Vec::with_capacity(9);
        for c in 0..3 {
            for r in 0..3 {
                dir_data.push(self.direction[(r, c)] as f32);
            }
        }
        let dir_t_tensor = Tensor::<B, 2>::from_data(TensorData::new(dir_data, [3, 3]), device);

        origin_tensor + scaled.matmul(dir_t_tensor)
    }
}

/// Indicator (1.0 inside, 0.0 outside) of which continuous indices fall
/// within the `[Z, Y, X]`-shaped grid.
fn inside_mask<B: Backend>(indices: &Tensor<B, 2>, shape: [usize; 3]) -> Tensor<B, 1> {
    let [d0, d1, d2] = shape;
    let n = indices.dims()[0];

    let x = indices.clone().narrow(1, 0, 1).squeeze::<1>(1);
    let y = indices.clone().narrow(1, 1, 1).squeeze::<1>(1);
    let z = indices.clone().narrow(1, 2, 1).squeeze::<1>(1);

    let bound = |coord: Tensor<B, 1>, max: usize| {
        coord.clone().greater_equal_elem(0.0).float() * coord.lower_equal_elem((max - 1) as f64).float()
    };

    bound(x, d2) * bound(y, d1) * bound(z, d0)
}
