//! Point type for positions in physical space.

use nalgebra::Point3 as NaPoint3;
use serde::{Deserialize, Serialize};

use super::Vector3;

/// A position in 3-D physical space, in millimetres.
///
/// Thin wrapper around nalgebra's `Point3` to provide domain-specific
/// functionality while keeping all nalgebra operations available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3(pub NaPoint3<f64>);

impl Point3 {
    /// Create a new point from `(x, y, z)` coordinates.
    pub fn new(coords: [f64; 3]) -> Self {
        Self(NaPoint3::from(coords))
    }

    /// Create a point at the origin.
    pub fn origin() -> Self {
        Self(NaPoint3::origin())
    }

    /// Get the inner nalgebra point.
    pub fn inner(&self) -> &NaPoint3<f64> {
        &self.0
    }
}

impl std::ops::Index<usize> for Point3 {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0.coords[index]
    }
}

impl std::ops::IndexMut<usize> for Point3 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0.coords[index]
    }
}

impl std::ops::Sub for Point3 {
    type Output = Vector3;

    fn sub(self, other: Self) -> Self::Output {
        Vector3(self.0.coords - other.0.coords)
    }
}

impl std::ops::Add<Vector3> for Point3 {
    type Output = Self;

    fn add(self, vector: Vector3) -> Self::Output {
        Self(self.0 + vector.0)
    }
}
