//! Cubic B-Spline interpolation implementation.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use super::trait_::Interpolator;

/// Cubic B-Spline basis function.
///
/// - `(2/3) - |x|^2 + (1/2)|x|^3`    for `|x| < 1`
/// - `(1/6)(2 - |x|)^3`              for `1 <= |x| < 2`
/// - `0`                             otherwise
fn cubic_bspline(x: f32) -> f32 {
    let abs_x = x.abs();
    if abs_x < 1.0 {
        (2.0 / 3.0) - abs_x.powi(2) + 0.5 * abs_x.powi(3)
    } else if abs_x < 2.0 {
        let two_minus_x = 2.0 - abs_x;
        (1.0 / 6.0) * two_minus_x.powi(3)
    } else {
        0.0
    }
}

/// Cubic B-Spline interpolator.
///
/// Smooth sampling over a 4×4×4 neighborhood, with weights renormalized
/// near the borders where part of the support falls outside the volume.
#[derive(Debug, Clone, Copy)]
pub struct BSplineInterpolator;

impl BSplineInterpolator {
    /// Create a new B-Spline interpolator.
    pub fn new() -> Self {
        Self
    }
}

impl Default for BSplineInterpolator {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Interpolator<B> for BSplineInterpolator {
    fn interpolate(&self, data: &Tensor<B, 3>, indices: Tensor<B, 2>) -> Tensor<B, 1> {
        let device = indices.device();
        let [n_points, rank] = indices.dims();
        assert_eq!(rank, 3, "Indices must be [Batch, 3]");

        let [d0, d1, d2] = data.dims(); // [Z, Y, X]

        // The kernel walks a scalar neighborhood per point; pull both the
        // volume and the indices to host memory once.
        let data_host = data.clone().into_data();
        let values: &[f32] = data_host.as_slice::<f32>().expect("Volume data must be f32");
        let indices_data = indices.to_data();
        let coords: &[f32] = indices_data.as_slice::<f32>().expect("Indices must be f32");

        let mut results = Vec::with_capacity(n_points);
        for i in 0..n_points {
            let x = coords[i * 3];
            let y = coords[i * 3 + 1];
            let z = coords[i * 3 + 2];
            results.push(interpolate_point(values, x, y, z, d0, d1, d2));
        }

        Tensor::from_data(burn::tensor::TensorData::new(results, [n_points]), &device)
    }
}

/// B-Spline interpolation for a single point against `[Z, Y, X]` data.
fn interpolate_point(values: &[f32], x: f32, y: f32, z: f32, d0: usize, d1: usize, d2: usize) -> f32 {
    let x0 = x.floor() as isize - 1;
    let y0 = y.floor() as isize - 1;
    let z0 = z.floor() as isize - 1;

    let mut result = 0.0f32;
    let mut weight_sum = 0.0f32;

    // Sample the 4x4x4 support
    for dz in 0..4 {
        let zi = z0 + dz;
        if zi < 0 || zi >= d0 as isize {
            continue;
        }
        let wz = cubic_bspline(z - zi as f32);
        for dy in 0..4 {
            let yi = y0 + dy;
            if yi < 0 || yi >= d1 as isize {
                continue;
            }
            let wy = cubic_bspline(y - yi as f32);
            for dx in 0..4 {
                let xi = x0 + dx;
                if xi < 0 || xi >= d2 as isize {
                    continue;
                }
                let weight = cubic_bspline(x - xi as f32) * wy * wz;
                result += values[(zi as usize * d1 + yi as usize) * d2 + xi as usize] * weight;
                weight_sum += weight;
            }
        }
    }

    if weight_sum > 0.0 {
        result / weight_sum
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::tensor::TensorData;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_bspline_basis() {
        assert!((cubic_bspline(0.0) - 2.0 / 3.0).abs() < 1e-6);
        assert!(cubic_bspline(1.0) > 0.0);
        assert_eq!(cubic_bspline(2.0), 0.0);
        assert_eq!(cubic_bspline(-2.0), 0.0);
        assert!((cubic_bspline(0.5) - cubic_bspline(-0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_bspline_constant_volume_is_exact() {
        let device = Default::default();
        let data = Tensor::<TestBackend, 3>::from_data(
            TensorData::new(vec![5.0f32; 64], [4, 4, 4]),
            &device,
        );
        let interpolator = BSplineInterpolator::new();

        let indices =
            Tensor::<TestBackend, 2>::from_floats([[1.5, 1.5, 1.5], [0.25, 2.75, 1.0]], &device);
        let values = interpolator.interpolate(&data, indices);
        let values_data = values.into_data();
        let slice = values_data.as_slice::<f32>().unwrap();

        assert!((slice[0] - 5.0).abs() < 1e-5);
        assert!((slice[1] - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_bspline_stays_in_range() {
        let device = Default::default();
        let data: Vec<f32> = (0..64).map(|v| v as f32).collect();
        let data = Tensor::<TestBackend, 3>::from_data(TensorData::new(data, [4, 4, 4]), &device);
        let interpolator = BSplineInterpolator::new();

        let indices = Tensor::<TestBackend, 2>::from_floats([[1.5, 1.5, 1.5]], &device);
        let values = interpolator.interpolate(&data, indices);
        let values_data = values.into_data();
        let val = values_data.as_slice::<f32>().unwrap()[0];

        assert!(val >= 0.0 && val <= 63.0, "Interpolated value {} out of range", val);
    }
}
