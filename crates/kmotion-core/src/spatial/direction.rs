//! Direction type for volume orientation.

use nalgebra::SMatrix;
use serde::{Deserialize, Serialize};

use super::Vector3;

/// Orientation of the volume axes in physical space.
///
/// A 3×3 matrix whose column i is the physical direction of the i-th
/// volume axis. Thin wrapper around nalgebra's `SMatrix`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Direction3(pub SMatrix<f64, 3, 3>);

impl Direction3 {
    /// Create an identity direction matrix (axis-aligned volume).
    pub fn identity() -> Self {
        Self(SMatrix::identity())
    }

    /// Check if the direction matrix is orthogonal.
    pub fn is_orthogonal(&self) -> bool {
        let product = self.0 * self.0.transpose();
        let identity = SMatrix::<f64, 3, 3>::identity();
        (0..3).all(|i| (0..3).all(|j| (product[(i, j)] - identity[(i, j)]).abs() < 1e-6))
    }

    /// Try to compute the inverse of the direction matrix.
    pub fn try_inverse(&self) -> Option<Self> {
        self.0.try_inverse().map(Self)
    }

    /// Get the inner nalgebra matrix.
    pub fn inner(&self) -> &SMatrix<f64, 3, 3> {
        &self.0
    }

    /// Get mutable reference to the inner nalgebra matrix.
    pub fn inner_mut(&mut self) -> &mut SMatrix<f64, 3, 3> {
        &mut self.0
    }
}

impl std::ops::Index<(usize, usize)> for Direction3 {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.0[index]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Direction3 {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl std::ops::Mul<Vector3> for Direction3 {
    type Output = Vector3;

    fn mul(self, vector: Vector3) -> Self::Output {
        Vector3(self.0 * vector.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_identity() {
        let d = Direction3::identity();
        assert_eq!(d[(0, 0)], 1.0);
        assert_eq!(d[(1, 1)], 1.0);
        assert_eq!(d[(2, 2)], 1.0);
        assert_eq!(d[(0, 1)], 0.0);
    }

    #[test]
    fn test_direction_is_orthogonal() {
        assert!(Direction3::identity().is_orthogonal());

        // 90 degrees around Z
        let mut rot = Direction3::identity();
        rot[(0, 0)] = 0.0;
        rot[(0, 1)] = -1.0;
        rot[(1, 0)] = 1.0;
        rot[(1, 1)] = 0.0;
        assert!(rot.is_orthogonal());
    }

    #[test]
    fn test_singular_direction_has_no_inverse() {
        let mut d = Direction3::identity();
        d[(2, 2)] = 0.0;
        assert!(d.try_inverse().is_none());
    }
}
