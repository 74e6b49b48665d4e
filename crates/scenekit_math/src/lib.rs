//! 3D Mathematics Library
//!
//! This crate provides the vector, rotation and matrix types used across
//! scenekit, plus a couple of scalar helpers.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quat`] - Unit quaternion rotation
//! - [`Mat4`] - 4x4 column-major matrix (see [`mat4`] for helpers)
//! - [`Spherical`] - Spherical coordinates used for orbiting
//!
//! ## Scalar Helpers
//!
//! - [`truncate`] - Round to a fixed number of fractional digits
//! - [`lerp`] - Unclamped linear interpolation

mod vec3;
mod quat;
mod spherical;
pub mod mat4;
pub mod numeric;

pub use vec3::Vec3;
pub use quat::Quat;
pub use spherical::Spherical;
pub use mat4::Mat4;
pub use numeric::{truncate, lerp, DEFAULT_PRECISION};
