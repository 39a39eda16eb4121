//! Volume type with physical metadata and coordinate transformations.

use burn::tensor::backend::Backend;
use burn::tensor::{ElementConversion, Tensor, TensorData};

use crate::error::{CoreError, Result};
use crate::spatial::{Direction3, Point3, Spacing3, Vector3};

/// A 3-D scalar volume with physical-space metadata.
///
/// Tensor data is stored `[Z, Y, X]`; the metadata (origin, spacing,
/// direction) is ordered `(x, y, z)`. The two coordinate systems are:
///
/// * **Index space**: continuous voxel indices `(x, y, z)`.
/// * **Physical space**: continuous coordinates in millimetres.
///
/// Mapping between them follows
/// `point = origin + Direction * (index * spacing)`.
///
/// A volume is immutable once constructed; operations that change voxel
/// values produce a new volume on the same grid.
#[derive(Debug, Clone)]
pub struct Volume<B: Backend> {
    data: Tensor<B, 3>,
    origin: Point3,
    spacing: Spacing3,
    direction: Direction3,
}

impl<B: Backend> Volume<B> {
    /// Create a new volume from tensor data and physical metadata.
    pub fn new(data: Tensor<B, 3>, origin: Point3, spacing: Spacing3, direction: Direction3) -> Self {
        Self {
            data,
            origin,
            spacing,
            direction,
        }
    }

    /// Get the voxel data tensor, `[Z, Y, X]`.
    pub fn data(&self) -> &Tensor<B, 3> {
        &self.data
    }

    /// Get the origin (physical coordinate of voxel `(0, 0, 0)`).
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Get the spacing (physical distance between voxels).
    pub fn spacing(&self) -> &Spacing3 {
        &self.spacing
    }

    /// Get the direction (orientation matrix).
    pub fn direction(&self) -> &Direction3 {
        &self.direction
    }

    /// Get the volume shape as `[Z, Y, X]`.
    pub fn shape(&self) -> [usize; 3] {
        self.data.shape().dims.try_into().expect("Tensor rank mismatch")
    }

    /// Continuous index of the volume's geometric center, `(x, y, z)`.
    pub fn center_index(&self) -> Point3 {
        let [nz, ny, nx] = self.shape();
        Point3::new([nx as f64 / 2.0, ny as f64 / 2.0, nz as f64 / 2.0])
    }

    /// The minimum intensity anywhere in the volume.
    pub fn min_intensity(&self) -> f64 {
        self.data.clone().min().into_scalar().elem::<f64>()
    }

    /// Convert a continuous index to a physical point.
    pub fn transform_continuous_index_to_physical_point(&self, index: &Point3) -> Point3 {
        let mut scaled = Vector3::zeros();
        for i in 0..3 {
            scaled[i] = index[i] * self.spacing[i];
        }
        self.origin + self.direction * scaled
    }

    /// Convert a physical point to a continuous index.
    ///
    /// Fails when the direction matrix is singular.
    pub fn transform_physical_point_to_continuous_index(&self, point: &Point3) -> Result<Point3> {
        let inv_dir = self
            .direction
            .try_inverse()
            .ok_or_else(|| CoreError::singular_direction("cannot map physical point to index"))?;
        let rotated = inv_dir * (*point - self.origin);

        let mut index = Point3::origin();
        for i in 0..3 {
            index[i] = rotated[i] / self.spacing[i];
        }
        Ok(index)
    }

    /// Batch transform physical points to continuous indices.
    ///
    /// `points` is `[Batch, 3]` in `(x, y, z)` order. Uses row-vector
    /// convention: `I = (P - O) @ T` with `T[r, c] = InvDir[c, r] / S[c]`.
    pub fn world_to_index_tensor(&self, points: Tensor<B, 2>) -> Result<Tensor<B, 2>> {
        let device = points.device();

        let origin_vec: Vec<f32> = (0..3).map(|i| self.origin[i] as f32).collect();
        let origin_tensor =
            Tensor::<B, 1>::from_data(TensorData::new(origin_vec, [3]), &device).reshape([1, 3]);

        let inv_dir = self
            .direction
            .try_inverse()
            .ok_or_else(|| CoreError::singular_direction("cannot map physical points to indices"))?;

        let mut t_data = Vec::with_capacity(9);
        for r in 0..3 {
            for c in 0..3 {
                t_data.push((inv_dir[(c, r)] / self.spacing[c]) as f32);
            }
        }
        let t_tensor = Tensor::<B, 2>::from_data(TensorData::new(t_data, [3, 3]), &device);

        Ok((points - origin_tensor).matmul(t_tensor))
    }

    /// Batch transform continuous indices to physical points.
    ///
    /// `indices` is `[Batch, 3]` in `(x, y, z)` order. Uses row-vector
    /// convention: `P = O + I @ M` with `M[r, c] = S[r] * Dir[c, r]`.
    pub fn index_to_world_tensor(&self, indices: Tensor<B, 2>) -> Tensor<B, 2> {
        let device = indices.device();

        let origin_vec: Vec<f32> = (0..3).map(|i| self.origin[i] as f32).collect();
        let origin_tensor =
            Tensor::<B, 1>::from_data(TensorData::new(origin_vec, [3]), &device).reshape([1, 3]);

        let mut m_data = Vec::with_capacity(9);
        for r in 0..3 {
            for c in 0..3 {
                m_data.push((self.spacing[r] * self.direction[(c, r)]) as f32);
            }
        }
        let m_tensor = Tensor::<B, 2>::from_data(TensorData::new(m_data, [3, 3]), &device);

        indices.matmul(m_tensor) + origin_tensor
    }
}
