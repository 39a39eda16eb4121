//! Per-pose resampling of the input volume.

use burn::tensor::backend::Backend;
use kmotion_core::filter::ResampleVolumeFilter;
use kmotion_core::interpolation::{
    BSplineInterpolator, Interpolator, LinearInterpolator, NearestNeighborInterpolator,
};
use kmotion_core::transform::RigidTransform;
use kmotion_core::{Interpolation, Volume};

use crate::error::Result;

/// Resample the volume once per motion event.
///
/// Slot 0 is the input itself (identity pose, no resampling). Every
/// remaining transform is applied on the input's own grid; samples that
/// leave the field of view take the minimum intensity found anywhere in
/// the input. Output stays in the f32 working type of the backend.
///
/// Fails when the volume geometry cannot be inverted for resampling.
pub fn resample_poses<B: Backend>(
    volume: &Volume<B>,
    transforms: &[RigidTransform<B>],
    interpolation: Interpolation,
) -> Result<Vec<Volume<B>>> {
    let fill = volume.min_intensity();

    let mut volumes = Vec::with_capacity(transforms.len());
    volumes.push(volume.clone());

    // First transform is the identity
    for transform in transforms.iter().skip(1) {
        let resampled = match interpolation {
            Interpolation::Nearest => {
                resample_one(volume, transform.clone(), NearestNeighborInterpolator::new(), fill)?
            }
            Interpolation::Linear => {
                resample_one(volume, transform.clone(), LinearInterpolator::new(), fill)?
            }
            Interpolation::BSpline => {
                resample_one(volume, transform.clone(), BSplineInterpolator::new(), fill)?
            }
        };
        volumes.push(resampled);
    }

    Ok(volumes)
}

fn resample_one<B: Backend, I: Interpolator<B>>(
    volume: &Volume<B>,
    transform: RigidTransform<B>,
    interpolator: I,
    fill: f64,
) -> Result<Volume<B>> {
    let filter = ResampleVolumeFilter::from_reference(volume, transform, interpolator)
        .with_default_value(fill);
    Ok(filter.apply(volume)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::build_motion_transforms;
    use burn::tensor::{Tensor, TensorData};
    use burn_ndarray::NdArray;
    use kmotion_core::{Direction3, Point3, Spacing3};

    type TestBackend = NdArray<f32>;

    fn gradient_volume() -> Volume<TestBackend> {
        let device = Default::default();
        let data: Vec<f32> = (0..64).map(|v| v as f32 + 1.0).collect();
        let tensor = Tensor::<TestBackend, 3>::from_data(TensorData::new(data, [4, 4, 4]), &device);
        Volume::new(tensor, Point3::origin(), Spacing3::uniform(1.0), Direction3::identity())
    }

    #[test]
    fn test_slot_zero_is_the_input() {
        let volume = gradient_volume();
        let transforms = build_motion_transforms(&[[0.0, 0.0, 90.0]], &[[0.0, 0.0, 0.0]], &volume);

        let volumes = resample_poses(&volume, &transforms, Interpolation::Linear).unwrap();
        assert_eq!(volumes.len(), 2);

        let original = volume.data().clone().into_data();
        let slot_zero = volumes[0].data().clone().into_data();
        assert_eq!(
            original.as_slice::<f32>().unwrap(),
            slot_zero.as_slice::<f32>().unwrap()
        );
    }

    #[test]
    fn test_out_of_view_samples_take_the_minimum() {
        let volume = gradient_volume();
        // Large translation pushes most samples outside the grid.
        let transforms = build_motion_transforms(&[[0.0, 0.0, 0.0]], &[[100.0, 0.0, 0.0]], &volume);

        let volumes = resample_poses(&volume, &transforms, Interpolation::Linear).unwrap();
        let moved = volumes[1].data().clone().into_data();
        let slice = moved.as_slice::<f32>().unwrap();

        // Minimum of the gradient volume is 1.0
        for &v in slice {
            assert!((v - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_every_kernel_resamples() {
        let volume = gradient_volume();
        let transforms = build_motion_transforms(&[[0.0, 0.0, 10.0]], &[[0.5, 0.0, 0.0]], &volume);

        for interpolation in [Interpolation::Nearest, Interpolation::Linear, Interpolation::BSpline] {
            let volumes = resample_poses(&volume, &transforms, interpolation).unwrap();
            assert_eq!(volumes.len(), 2);
            assert_eq!(volumes[1].shape(), volume.shape());
        }
    }
}
