//! Vector type for spatial displacements.

use nalgebra::SVector;
use serde::{Deserialize, Serialize};

/// A displacement in 3-D space.
///
/// Thin wrapper around nalgebra's `SVector` to provide domain-specific
/// functionality while keeping all nalgebra operations available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3(pub SVector<f64, 3>);

impl Vector3 {
    /// Create a new vector from `(x, y, z)` components.
    pub fn new(components: [f64; 3]) -> Self {
        Self(SVector::from(components))
    }

    /// Create a zero vector.
    pub fn zeros() -> Self {
        Self(SVector::zeros())
    }

    /// Get the inner nalgebra vector.
    pub fn inner(&self) -> &SVector<f64, 3> {
        &self.0
    }
}

impl std::ops::Index<usize> for Vector3 {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl std::ops::IndexMut<usize> for Vector3 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl std::ops::Add for Vector3 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self(self.0 + other.0)
    }
}
