//! Rigid transform implementation.

use burn::tensor::backend::Backend;
use burn::tensor::{Tensor, TensorData};
use nalgebra::SMatrix;

use super::trait_::Transform;
use crate::spatial::{Point3, Vector3};

/// Rigid transform (rotation + translation) about a fixed center:
/// `T(x) = R(x - c) + c + t`.
///
/// Euler angles follow the intrinsic Z-Y-X convention,
/// `R = Rz(gamma) * Ry(beta) * Rx(alpha)`, with angles in radians.
/// The rotation matrix is computed once at construction; the transform
/// holds no trainable state.
#[derive(Debug, Clone)]
pub struct RigidTransform<B: Backend> {
    matrix: Tensor<B, 2>,      // [3, 3]
    translation: Tensor<B, 1>, // [3]
    center: Tensor<B, 1>,      // [3]
}

impl<B: Backend> RigidTransform<B> {
    /// Create a rigid transform from Euler angles, a translation, and a
    /// fixed center of rotation.
    ///
    /// # Arguments
    /// * `radians` - Euler angles `(alpha, beta, gamma)` about x, y, z
    /// * `translation` - Translation vector in millimetres
    /// * `center` - Fixed center of rotation in physical space
    pub fn new(radians: Vector3, translation: Vector3, center: Point3, device: &B::Device) -> Self {
        let r = euler_zyx_matrix(&radians);
        let mut matrix_data = Vec::with_capacity(9);
        for row in 0..3 {
            for col in 0..3 {
                matrix_data.push(r[(row, col)] as f32);
            }
        }
        let translation_data: Vec<f32> = (0..3).map(|i| translation[i] as f32).collect();
        let center_data: Vec<f32> = (0..3).map(|i| center[i] as f32).collect();

        Self {
            matrix: Tensor::from_data(TensorData::new(matrix_data, [3, 3]), device),
            translation: Tensor::from_data(TensorData::new(translation_data, [3]), device),
            center: Tensor::from_data(TensorData::new(center_data, [3]), device),
        }
    }

    /// Create an identity transform (no rotation, no translation) about
    /// the given center.
    pub fn identity(center: Point3, device: &B::Device) -> Self {
        Self::new(Vector3::zeros(), Vector3::zeros(), center, device)
    }

    /// Get the 3×3 rotation matrix.
    pub fn rotation_matrix(&self) -> Tensor<B, 2> {
        self.matrix.clone()
    }
}

/// Rotation matrix for intrinsic Z-Y-X Euler angles:
/// `R = Rz(gamma) * Ry(beta) * Rx(alpha)`.
fn euler_zyx_matrix(radians: &Vector3) -> SMatrix<f64, 3, 3> {
    let (sx, cx) = radians[0].sin_cos();
    let (sy, cy) = radians[1].sin_cos();
    let (sz, cz) = radians[2].sin_cos();

    SMatrix::<f64, 3, 3>::new(
        cz * cy,
        cz * sy * sx - sz * cx,
        cz * sy * cx + sz * sx,
        sz * cy,
        sz * sy * sx + cz * cx,
        sz * sy * cx - cz * sx,
        -sy,
        cy * sx,
        cy * cx,
    )
}

impl<B: Backend> Transform<B> for RigidTransform<B> {
    fn transform_points(&self, points: Tensor<B, 2>) -> Tensor<B, 2> {
        // Row-vector form: y = (x - c) @ R^T + c + t
        let [n_points, _] = points.dims();
        let r_t = self.matrix.clone().transpose();
        let t = self.translation.clone().reshape([1, 3]);
        let c = self.center.clone().reshape([1, 3]);

        // Dispatch-limited backends (wgpu) cap a single launch; chunk
        // large batches well below the limit.
        const CHUNK_SIZE: usize = 32768;

        if n_points <= CHUNK_SIZE {
            (points - c.clone()).matmul(r_t) + c + t
        } else {
            let num_chunks = n_points.div_ceil(CHUNK_SIZE);
            let mut chunks = Vec::with_capacity(num_chunks);
            for i in 0..num_chunks {
                let start = i * CHUNK_SIZE;
                let end = usize::min(start + CHUNK_SIZE, n_points);
                let chunk = points.clone().slice([start..end]);
                chunks.push((chunk - c.clone()).matmul(r_t.clone()) + c.clone() + t.clone());
            }
            Tensor::cat(chunks, 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_translation_only() {
        let device = Default::default();
        let transform = RigidTransform::<TestBackend>::new(
            Vector3::zeros(),
            Vector3::new([1.0, 2.0, 3.0]),
            Point3::origin(),
            &device,
        );

        let points = Tensor::<TestBackend, 2>::from_floats([[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]], &device);
        let transformed = transform.transform_points(points);
        let data = transformed.into_data();
        let slice = data.as_slice::<f32>().unwrap();

        assert_eq!(&slice[..3], &[1.0, 2.0, 3.0]);
        assert_eq!(&slice[3..], &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_rotation_about_z() {
        let device = Default::default();
        // 90 degrees around z: (1, 0, 0) -> (0, 1, 0)
        let transform = RigidTransform::<TestBackend>::new(
            Vector3::new([0.0, 0.0, std::f64::consts::FRAC_PI_2]),
            Vector3::zeros(),
            Point3::origin(),
            &device,
        );

        let points = Tensor::<TestBackend, 2>::from_floats([[1.0, 0.0, 0.0]], &device);
        let transformed = transform.transform_points(points);
        let data = transformed.into_data();
        let slice = data.as_slice::<f32>().unwrap();

        assert!((slice[0] - 0.0).abs() < 1e-6);
        assert!((slice[1] - 1.0).abs() < 1e-6);
        assert!((slice[2] - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_about_offset_center() {
        let device = Default::default();
        // 180 degrees around z, centered at (1, 0, 0): origin -> (2, 0, 0)
        let transform = RigidTransform::<TestBackend>::new(
            Vector3::new([0.0, 0.0, std::f64::consts::PI]),
            Vector3::zeros(),
            Point3::new([1.0, 0.0, 0.0]),
            &device,
        );

        let points = Tensor::<TestBackend, 2>::from_floats([[0.0, 0.0, 0.0]], &device);
        let transformed = transform.transform_points(points);
        let data = transformed.into_data();
        let slice = data.as_slice::<f32>().unwrap();

        assert!((slice[0] - 2.0).abs() < 1e-5);
        assert!(slice[1].abs() < 1e-5);
        assert!(slice[2].abs() < 1e-5);
    }

    #[test]
    fn test_identity_leaves_points_unchanged() {
        let device = Default::default();
        let transform = RigidTransform::<TestBackend>::identity(Point3::new([5.0, -3.0, 2.0]), &device);

        let points = Tensor::<TestBackend, 2>::from_floats([[1.5, 2.5, -3.5]], &device);
        let transformed = transform.transform_points(points);
        let data = transformed.into_data();
        let slice = data.as_slice::<f32>().unwrap();

        assert!((slice[0] - 1.5).abs() < 1e-6);
        assert!((slice[1] - 2.5).abs() < 1e-6);
        assert!((slice[2] + 3.5).abs() < 1e-6);
    }

    #[test]
    fn test_euler_zyx_order() {
        // With beta = 90 degrees, R maps (1, 0, 0) to (0, 0, -1).
        let r = euler_zyx_matrix(&Vector3::new([0.0, std::f64::consts::FRAC_PI_2, 0.0]));
        assert!((r[(2, 0)] + 1.0).abs() < 1e-12);
        assert!(r[(0, 0)].abs() < 1e-12);
    }
}
