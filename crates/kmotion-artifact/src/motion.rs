//! Construction of per-event rigid transforms.

use burn::tensor::backend::Backend;
use kmotion_core::transform::RigidTransform;
use kmotion_core::{Vector3, Volume};

/// Build the rigid transforms for a motion sequence.
///
/// The first transform is always the identity, representing the volume's
/// starting pose. Each sampled event becomes one transform from
/// reference-frame physical points to the moved frame, anchored at the
/// volume's physical center. Events are independent: each applies to the
/// original pose, transforms are never chained.
pub fn build_motion_transforms<B: Backend>(
    degrees: &[[f64; 3]],
    translations_mm: &[[f64; 3]],
    volume: &Volume<B>,
) -> Vec<RigidTransform<B>> {
    let device = volume.data().device();
    let center = volume.transform_continuous_index_to_physical_point(&volume.center_index());

    let mut transforms = Vec::with_capacity(degrees.len() + 1);
    transforms.push(RigidTransform::identity(center, &device));

    for (event_degrees, event_translation) in degrees.iter().zip(translations_mm) {
        let radians = Vector3::new([
            event_degrees[0].to_radians(),
            event_degrees[1].to_radians(),
            event_degrees[2].to_radians(),
        ]);
        let translation = Vector3::new(*event_translation);
        transforms.push(RigidTransform::new(radians, translation, center, &device));
    }

    transforms
}
