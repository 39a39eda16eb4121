//! Core volume primitives for motion-artifact synthesis.
//!
//! Provides the volume abstraction (tensor data plus physical-space
//! metadata), rigid spatial transforms, interpolation kernels, and the
//! resampling filter that the artifact crate drives.

pub mod error;
pub mod filter;
pub mod interpolation;
pub mod spatial;
pub mod transform;
pub mod volume;

pub use error::{CoreError, Result};
pub use interpolation::Interpolation;
pub use spatial::{Direction3, Point3, Spacing3, Vector3};
pub use volume::Volume;
