//! Trilinear interpolation implementation.

use burn::tensor::backend::Backend;
use burn::tensor::{Int, Tensor};

use super::trait_::Interpolator;

/// Linear Interpolator.
///
/// Performs trilinear interpolation over the eight surrounding voxels.
#[derive(Debug, Clone, Copy)]
pub struct LinearInterpolator;

impl LinearInterpolator {
    /// Create a new linear interpolator.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinearInterpolator {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Interpolator<B> for LinearInterpolator {
    fn interpolate(&self, data: &Tensor<B, 3>, indices: Tensor<B, 2>) -> Tensor<B, 1> {
        let [d0, d1, d2] = data.dims(); // [Z, Y, X]
        let batch_size = indices.dims()[0];
        let device = indices.device();

        // indices: (x, y, z)
        let x = indices.clone().narrow(1, 0, 1).squeeze::<1>(1);
        let y = indices.clone().narrow(1, 1, 1).squeeze::<1>(1);
        let z = indices.narrow(1, 2, 1).squeeze::<1>(1);

        let x0 = x.clone().floor();
        let y0 = y.clone().floor();
        let z0 = z.clone().floor();

        let wx = x - x0.clone();
        let wy = y - y0.clone();
        let wz = z - z0.clone();

        let x1 = x0.clone() + 1.0;
        let y1 = y0.clone() + 1.0;
        let z1 = z0.clone() + 1.0;

        let x0_i = x0.clamp(0.0, (d2 - 1) as f64).int();
        let y0_i = y0.clamp(0.0, (d1 - 1) as f64).int();
        let z0_i = z0.clamp(0.0, (d0 - 1) as f64).int();

        let x1_i = x1.clamp(0.0, (d2 - 1) as f64).int();
        let y1_i = y1.clamp(0.0, (d1 - 1) as f64).int();
        let z1_i = z1.clamp(0.0, (d0 - 1) as f64).int();

        // Strides for [Z, Y, X]
        let stride_z = (d1 * d2) as i32;
        let stride_y = d2 as i32;

        let flat_data = data.clone().reshape([d0 * d1 * d2]);

        let v000 = gather(&flat_data, &x0_i, &y0_i, &z0_i, stride_y, stride_z);
        let v001 = gather(&flat_data, &x0_i, &y0_i, &z1_i, stride_y, stride_z);
        let v010 = gather(&flat_data, &x0_i, &y1_i, &z0_i, stride_y, stride_z);
        let v011 = gather(&flat_data, &x0_i, &y1_i, &z1_i, stride_y, stride_z);
        let v100 = gather(&flat_data, &x1_i, &y0_i, &z0_i, stride_y, stride_z);
        let v101 = gather(&flat_data, &x1_i, &y0_i, &z1_i, stride_y, stride_z);
        let v110 = gather(&flat_data, &x1_i, &y1_i, &z0_i, stride_y, stride_z);
        let v111 = gather(&flat_data, &x1_i, &y1_i, &z1_i, stride_y, stride_z);

        let one = Tensor::<B, 1>::ones([batch_size], &device);
        let one_minus_wx = one.clone() - wx.clone();
        let one_minus_wy = one.clone() - wy.clone();
        let one_minus_wz = one - wz.clone();

        // Interpolate along X
        let c00 = v000 * one_minus_wx.clone() + v100 * wx.clone();
        let c01 = v001 * one_minus_wx.clone() + v101 * wx.clone();
        let c10 = v010 * one_minus_wx.clone() + v110 * wx.clone();
        let c11 = v011 * one_minus_wx + v111 * wx;

        // Interpolate along Y
        let c0 = c00 * one_minus_wy.clone() + c10 * wy.clone();
        let c1 = c01 * one_minus_wy + c11 * wy;

        // Interpolate along Z
        c0 * one_minus_wz + c1 * wz
    }
}

#[inline]
fn gather<B: Backend>(
    flat_data: &Tensor<B, 1>,
    xi: &Tensor<B, 1, Int>,
    yi: &Tensor<B, 1, Int>,
    zi: &Tensor<B, 1, Int>,
    stride_y: i32,
    stride_z: i32,
) -> Tensor<B, 1> {
    let idx = zi.clone() * stride_z + yi.clone() * stride_y + xi.clone();
    flat_data.clone().gather(0, idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::tensor::TensorData;
    use burn_ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    fn corner_volume() -> Tensor<TestBackend, 3> {
        // [Z=2, Y=2, X=2], value = z * 100 + y * 10 + x
        let device = Default::default();
        let data = vec![0.0, 1.0, 10.0, 11.0, 100.0, 101.0, 110.0, 111.0];
        Tensor::from_data(TensorData::new(data, [2, 2, 2]), &device)
    }

    #[test]
    fn test_linear_at_grid_points() {
        let device = Default::default();
        let data = corner_volume();
        let interpolator = LinearInterpolator::new();

        let indices = Tensor::<TestBackend, 2>::from_floats(
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            &device,
        );
        let values = interpolator.interpolate(&data, indices);
        let values_data = values.into_data();
        let slice = values_data.as_slice::<f32>().unwrap();

        assert_eq!(slice[0], 0.0);
        assert_eq!(slice[1], 1.0);
        assert_eq!(slice[2], 10.0);
        assert_eq!(slice[3], 100.0);
    }

    #[test]
    fn test_linear_at_cell_center() {
        let device = Default::default();
        let data = corner_volume();
        let interpolator = LinearInterpolator::new();

        let center = Tensor::<TestBackend, 2>::from_floats([[0.5, 0.5, 0.5]], &device);
        let value = interpolator.interpolate(&data, center);
        let value_data = value.into_data();
        let slice = value_data.as_slice::<f32>().unwrap();

        let expected = (0.0 + 1.0 + 10.0 + 11.0 + 100.0 + 101.0 + 110.0 + 111.0) / 8.0;
        assert!((slice[0] - expected).abs() < 1e-5);
    }

    #[test]
    fn test_linear_clamps_out_of_bounds() {
        let device = Default::default();
        let data = corner_volume();
        let interpolator = LinearInterpolator::new();

        let indices =
            Tensor::<TestBackend, 2>::from_floats([[-1.0, -1.0, -1.0], [5.0, 5.0, 5.0]], &device);
        let values = interpolator.interpolate(&data, indices);
        let values_data = values.into_data();
        let slice = values_data.as_slice::<f32>().unwrap();

        assert_eq!(slice[0], 0.0);
        assert_eq!(slice[1], 111.0);
    }
}
